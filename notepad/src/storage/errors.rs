use thiserror::Error;
use tokio::io::Error as IoError;
use crate::data::NoteId;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error(transparent)]
    Io(#[from] IoError),

    #[error("note collection is corrupt: {0}")]
    Corrupt(serde_json::Error),

    #[error("note collection is corrupt: duplicate note id {0}")]
    DuplicateNoteId(NoteId),

    #[error("failed to serialize note collection: {0}")]
    Serialization(serde_json::Error),

    #[error("note collection too large")]
    TooBig,

    #[error("note title or content too large")]
    NoteTooBig,

    #[error("note not found")]
    NoteNotFound,

    #[error("no note ids left")]
    NoteIdsExhausted,
}
