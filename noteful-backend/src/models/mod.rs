//! Row types and request bodies for the folders and notes resources.

mod folder;
mod note;

pub use folder::{CreateFolderRequest, Folder, FolderUpdate, NewFolder, UpdateFolderRequest};
pub use note::{CreateNoteRequest, NewNote, Note, NoteUpdate, UpdateNoteRequest};

use std::fmt;

/// Addressable resource kinds, used to phrase not-found messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Folder,
    Note,
}

impl Resource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Folder => "Folder",
            Resource::Note => "Note",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
