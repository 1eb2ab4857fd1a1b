pub mod errors;
mod internal;

pub use internal::{NoteStorage, NoteStorageImpl};
