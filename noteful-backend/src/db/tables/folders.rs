//! Store adapter for the `folders` table

use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult};

use crate::models::{Folder, FolderUpdate, NewFolder};

fn row_to_folder(row: &rusqlite::Row) -> SqliteResult<Folder> {
    Ok(Folder {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}

/// All folders in insertion order
pub fn list_all(conn: &Connection) -> SqliteResult<Vec<Folder>> {
    let mut stmt = conn.prepare("SELECT id, name FROM folders ORDER BY id")?;
    let rows = stmt.query_map([], row_to_folder)?;
    rows.collect()
}

/// Insert a folder and return the persisted row with its generated id
pub fn insert(conn: &Connection, new_folder: &NewFolder) -> SqliteResult<Folder> {
    conn.query_row(
        "INSERT INTO folders (name) VALUES (?1) RETURNING id, name",
        params![new_folder.name],
        row_to_folder,
    )
}

pub fn get_by_id(conn: &Connection, id: i64) -> SqliteResult<Option<Folder>> {
    conn.query_row(
        "SELECT id, name FROM folders WHERE id = ?1",
        params![id],
        row_to_folder,
    )
    .optional()
}

pub fn exists(conn: &Connection, id: i64) -> SqliteResult<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM folders WHERE id = ?1",
        params![id],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// Returns the number of rows removed (0 or 1)
pub fn delete_by_id(conn: &Connection, id: i64) -> SqliteResult<usize> {
    conn.execute("DELETE FROM folders WHERE id = ?1", params![id])
}

/// Apply the fields present in `update`. Returns the number of rows matched (0 or 1).
pub fn update_by_id(conn: &Connection, id: i64, update: &FolderUpdate) -> SqliteResult<usize> {
    match &update.name {
        Some(name) => conn.execute(
            "UPDATE folders SET name = ?1 WHERE id = ?2",
            params![name, id],
        ),
        None => Ok(exists(conn, id)? as usize),
    }
}
