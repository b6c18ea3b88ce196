use serde::{Deserialize, Serialize};

/// A persisted folder row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub id: i64,
    pub name: String,
}

/// Validated, sanitized values for a folder insert.
#[derive(Debug, Clone)]
pub struct NewFolder {
    pub name: String,
}

/// Fields to change on an existing folder. `None` leaves the column as is.
#[derive(Debug, Clone, Default)]
pub struct FolderUpdate {
    pub name: Option<String>,
}

impl FolderUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
    }
}

/// Body of `POST /folders`. Unknown fields (including `id`) are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateFolderRequest {
    pub name: Option<String>,
}

/// Body of `PATCH /folders/{id}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateFolderRequest {
    pub name: Option<String>,
}
