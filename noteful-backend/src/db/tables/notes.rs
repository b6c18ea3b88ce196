//! Store adapter for the `notes` table
//!
//! Writes take a [`FolderRefPolicy`]. Under `Enforced` the folder existence
//! check is part of the same INSERT/UPDATE statement, so a folder deleted
//! concurrently can never end up referenced by a freshly written note.

use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult, ToSql};
use thiserror::Error;

use crate::config::FolderRefPolicy;
use crate::models::{NewNote, Note, NoteUpdate};

const NOTE_COLUMNS: &str = "id, name, content, folder_id";

#[derive(Debug, Error)]
pub enum NoteWriteError {
    #[error("folder {0} does not exist")]
    MissingFolder(i64),

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}

fn row_to_note(row: &rusqlite::Row) -> SqliteResult<Note> {
    Ok(Note {
        id: row.get(0)?,
        name: row.get(1)?,
        content: row.get(2)?,
        folder_id: row.get(3)?,
    })
}

/// All notes in insertion order
pub fn list_all(conn: &Connection) -> SqliteResult<Vec<Note>> {
    let mut stmt = conn.prepare(&format!("SELECT {} FROM notes ORDER BY id", NOTE_COLUMNS))?;
    let rows = stmt.query_map([], row_to_note)?;
    rows.collect()
}

/// Notes referencing `folder_id`, in insertion order
pub fn list_by_folder(conn: &Connection, folder_id: i64) -> SqliteResult<Vec<Note>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM notes WHERE folder_id = ?1 ORDER BY id",
        NOTE_COLUMNS
    ))?;
    let rows = stmt.query_map(params![folder_id], row_to_note)?;
    rows.collect()
}

/// Insert a note and return the persisted row with its generated id
pub fn insert(
    conn: &Connection,
    new_note: &NewNote,
    policy: FolderRefPolicy,
) -> Result<Note, NoteWriteError> {
    match policy {
        FolderRefPolicy::Advisory => Ok(conn.query_row(
            &format!(
                "INSERT INTO notes (name, content, folder_id) VALUES (?1, ?2, ?3) RETURNING {}",
                NOTE_COLUMNS
            ),
            params![new_note.name, new_note.content, new_note.folder_id],
            row_to_note,
        )?),
        FolderRefPolicy::Enforced => {
            let inserted = conn
                .query_row(
                    &format!(
                        "INSERT INTO notes (name, content, folder_id)
                         SELECT ?1, ?2, ?3
                         WHERE ?3 IS NULL OR EXISTS (SELECT 1 FROM folders WHERE id = ?3)
                         RETURNING {}",
                        NOTE_COLUMNS
                    ),
                    params![new_note.name, new_note.content, new_note.folder_id],
                    row_to_note,
                )
                .optional()?;

            match (inserted, new_note.folder_id) {
                (Some(note), _) => Ok(note),
                (None, Some(folder_id)) => Err(NoteWriteError::MissingFolder(folder_id)),
                // Only the folder guard can suppress the insert, and it passes for NULL.
                (None, None) => Err(NoteWriteError::Sqlite(rusqlite::Error::QueryReturnedNoRows)),
            }
        }
    }
}

pub fn get_by_id(conn: &Connection, id: i64) -> SqliteResult<Option<Note>> {
    conn.query_row(
        &format!("SELECT {} FROM notes WHERE id = ?1", NOTE_COLUMNS),
        params![id],
        row_to_note,
    )
    .optional()
}

pub fn exists(conn: &Connection, id: i64) -> SqliteResult<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM notes WHERE id = ?1",
        params![id],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// Returns the number of rows removed (0 or 1)
pub fn delete_by_id(conn: &Connection, id: i64) -> SqliteResult<usize> {
    conn.execute("DELETE FROM notes WHERE id = ?1", params![id])
}

/// Apply the fields present in `update`. Returns the number of rows matched (0 or 1).
pub fn update_by_id(
    conn: &Connection,
    id: i64,
    update: &NoteUpdate,
    policy: FolderRefPolicy,
) -> Result<usize, NoteWriteError> {
    if update.is_empty() {
        return Ok(exists(conn, id)? as usize);
    }

    let mut sets: Vec<String> = Vec::new();
    let mut values: Vec<&dyn ToSql> = Vec::new();

    if let Some(name) = &update.name {
        values.push(name);
        sets.push(format!("name = ?{}", values.len()));
    }
    if let Some(content) = &update.content {
        values.push(content);
        sets.push(format!("content = ?{}", values.len()));
    }
    if let Some(folder_id) = &update.folder_id {
        values.push(folder_id);
        sets.push(format!("folder_id = ?{}", values.len()));
    }

    values.push(&id);
    let mut sql = format!(
        "UPDATE notes SET {} WHERE id = ?{}",
        sets.join(", "),
        values.len()
    );

    let guarded_folder = match policy {
        FolderRefPolicy::Enforced => update.folder_id,
        FolderRefPolicy::Advisory => None,
    };
    if let Some(folder_id) = &guarded_folder {
        values.push(folder_id);
        sql.push_str(&format!(
            " AND EXISTS (SELECT 1 FROM folders WHERE id = ?{})",
            values.len()
        ));
    }

    let count = conn.execute(&sql, values.as_slice())?;

    match guarded_folder {
        Some(folder_id) if count == 0 && exists(conn, id)? => {
            Err(NoteWriteError::MissingFolder(folder_id))
        }
        _ => Ok(count),
    }
}
