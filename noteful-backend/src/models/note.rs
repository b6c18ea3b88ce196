use serde::{Deserialize, Serialize};

/// A persisted note row. `content` and `folder_id` serialize as `null` when unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub name: String,
    pub content: Option<String>,
    pub folder_id: Option<i64>,
}

/// Validated, sanitized values for a note insert.
#[derive(Debug, Clone)]
pub struct NewNote {
    pub name: String,
    pub content: Option<String>,
    pub folder_id: Option<i64>,
}

/// Fields to change on an existing note. `None` leaves the column as is.
#[derive(Debug, Clone, Default)]
pub struct NoteUpdate {
    pub name: Option<String>,
    pub content: Option<String>,
    pub folder_id: Option<i64>,
}

impl NoteUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.content.is_none() && self.folder_id.is_none()
    }
}

/// Body of `POST /notes`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateNoteRequest {
    pub name: Option<String>,
    pub content: Option<String>,
    pub folder_id: Option<i64>,
}

/// Body of `PATCH /notes/{id}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateNoteRequest {
    pub name: Option<String>,
    pub content: Option<String>,
    pub folder_id: Option<i64>,
}
