use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use log::{debug, error, trace};
use tokio::sync::Mutex as AsyncMutex;

use crate::config::app_config::AppConfig;
use crate::data::{NewNote, Note, NoteCollection, NoteId, NoteUpdate};
use crate::lib_constants::{DEFAULT_NOTE_TITLE, NOTES_DIRECTORY_PATH, NOTES_FILE_SUFFIX};
use crate::storage::errors::StorageError;
use crate::username_string::UsernameString;
use crate::util::tmp_path_for;

use io_trait::NoteStorageIo;
use io_trait::ProductionNoteStorageIo;

mod io_trait;

pub type NoteStorage = NoteStorageImpl<ProductionNoteStorageIo>;

/// Per-user note collections, one JSON file each.
///
/// Mutations of one user's collection are serialized with a per-user lock
/// and written through a temporary file, so readers never need a lock.
#[allow(private_bounds)]
pub struct NoteStorageImpl<Io: NoteStorageIo> {
    io: Io,
    notes_dir: PathBuf,
    max_note_size: u64,
    max_note_name_size: u64,
    max_collection_size: u64,
    user_locks: Mutex<HashMap<UsernameString, Arc<AsyncMutex<()>>>>,
}

impl NoteStorage {
    pub async fn new(
        app_config: &AppConfig,
    ) -> Result<NoteStorage, StorageError> {
        Self::new_internal(
            Self::get_notes_dir(app_config),
            app_config.max_note_size,
            app_config.max_note_name_size,
            app_config.max_collection_size,
            ProductionNoteStorageIo::new(),
        ).await
    }

    pub fn get_notes_dir(app_config: &AppConfig) -> PathBuf {
        app_config.data_directory.join(NOTES_DIRECTORY_PATH)
    }
}

#[allow(private_bounds)]
impl<Io: NoteStorageIo> NoteStorageImpl<Io> {
    async fn new_internal(
        notes_dir: PathBuf,
        max_note_size: u64,
        max_note_name_size: u64,
        max_collection_size: u64,
        io: Io,
    ) -> Result<NoteStorageImpl<Io>, StorageError> {
        debug!(
            "creating note storage at \"{}\"",
            notes_dir.display(),
        );
        io.create_dir_all(&notes_dir).await?;
        Ok(NoteStorageImpl {
            io,
            notes_dir,
            max_note_size,
            max_note_name_size,
            max_collection_size,
            user_locks: Mutex::new(HashMap::new()),
        })
    }

    /// All notes of the user, most recently updated first.
    pub async fn list_notes(
        &self,
        username: &UsernameString,
    ) -> Result<Vec<Note>, StorageError> {
        debug!("listing notes for user \"{username}\"");
        let collection = self.load_collection(username).await?;
        Ok(collection.into_recent_first())
    }

    pub async fn read_note(
        &self,
        username: &UsernameString,
        id: NoteId,
    ) -> Result<Note, StorageError> {
        debug!("reading note {id} for user \"{username}\"");
        self.load_collection(username).await?
            .get(id)
            .cloned()
            .ok_or(StorageError::NoteNotFound)
    }

    pub async fn create_note(
        &self,
        username: &UsernameString,
        note: NewNote,
    ) -> Result<Note, StorageError> {
        debug!("creating a note for user \"{username}\"");
        self.check_note_size(note.title.as_deref(), note.content.as_deref())?;
        let user_lock = self.get_user_lock(username);
        let _guard = user_lock.lock().await;

        let mut collection = self.ensure_collection(username).await?;
        let id = collection.next_id()
            .ok_or(StorageError::NoteIdsExhausted)?;
        let now = self.io.now();
        let note = Note {
            id,
            title: note.title.unwrap_or_else(|| DEFAULT_NOTE_TITLE.to_owned()),
            content: note.content.unwrap_or_default(),
            created_at: now,
            updated_at: Some(now),
        };
        trace!("new note {id} for user \"{username}\": {note:?}");
        collection.push(note.clone());
        self.save_collection(username, &collection).await?;
        Ok(note)
    }

    pub async fn update_note(
        &self,
        username: &UsernameString,
        id: NoteId,
        update: NoteUpdate,
    ) -> Result<Note, StorageError> {
        debug!("updating note {id} for user \"{username}\"");
        self.check_note_size(update.title.as_deref(), update.content.as_deref())?;
        let user_lock = self.get_user_lock(username);
        let _guard = user_lock.lock().await;

        let mut collection = self.load_collection(username).await?;
        let now = self.io.now();
        let note = collection.get_mut(id)
            .ok_or(StorageError::NoteNotFound)?;
        if let Some(title) = update.title {
            note.title = title;
        }
        if let Some(content) = update.content {
            note.content = content;
        }
        let previous = note.updated_at.unwrap_or(note.created_at);
        note.updated_at = Some(now.max(previous));
        let note = note.clone();
        self.save_collection(username, &collection).await?;
        Ok(note)
    }

    /// Deleting a note that doesn't exist is not an error.
    pub async fn delete_note(
        &self,
        username: &UsernameString,
        id: NoteId,
    ) -> Result<(), StorageError> {
        debug!("deleting note {id} for user \"{username}\"");
        let user_lock = self.get_user_lock(username);
        let _guard = user_lock.lock().await;

        let mut collection = self.load_collection(username).await?;
        if collection.remove(id) {
            self.save_collection(username, &collection).await
        } else {
            debug!("note {id} for user \"{username}\" is already absent");
            Ok(())
        }
    }

    fn check_note_size(
        &self,
        title: Option<&str>,
        content: Option<&str>,
    ) -> Result<(), StorageError> {
        let title_len = title.map(str::len).unwrap_or(0) as u64;
        let content_len = content.map(str::len).unwrap_or(0) as u64;
        if title_len > self.max_note_name_size || content_len > self.max_note_size {
            debug!(
                "rejecting a note with a {title_len} byte title \
                    and {content_len} byte content",
            );
            return Err(StorageError::NoteTooBig);
        }
        Ok(())
    }

    fn get_user_lock(&self, username: &UsernameString) -> Arc<AsyncMutex<()>> {
        self.user_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(username.clone())
            .or_default()
            .clone()
    }

    async fn ensure_collection(
        &self,
        username: &UsernameString,
    ) -> Result<NoteCollection, StorageError> {
        self.io.create_dir_all(&self.notes_dir).await?;
        self.load_collection(username).await
    }

    async fn load_collection(
        &self,
        username: &UsernameString,
    ) -> Result<NoteCollection, StorageError> {
        let path = self.get_collection_path(username);
        trace!("loading note collection from \"{}\"", path.display());
        let file = match self.io.read_file(&path, self.max_collection_size).await {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                trace!("no note collection for user \"{username}\" yet");
                return Ok(NoteCollection::new());
            },
            Err(e) => return Err(e.into()),
        };
        if file.size > self.max_collection_size {
            error!(
                "note collection \"{}\" is {} bytes, more than the limit",
                path.display(),
                file.size,
            );
            return Err(StorageError::TooBig);
        }
        let collection: NoteCollection = serde_json::from_slice(&file.data)
            .map_err(StorageError::Corrupt)?;
        if let Some(id) = collection.find_duplicate_id() {
            return Err(StorageError::DuplicateNoteId(id));
        }
        trace!(
            "loaded {} notes for user \"{username}\"",
            collection.len(),
        );
        Ok(collection)
    }

    async fn save_collection(
        &self,
        username: &UsernameString,
        collection: &NoteCollection,
    ) -> Result<(), StorageError> {
        let data = serde_json::to_vec_pretty(collection)
            .map_err(StorageError::Serialization)?;
        if data.len() as u64 > self.max_collection_size {
            return Err(StorageError::TooBig);
        }
        let path = self.get_collection_path(username);
        let tmp_path = tmp_path_for(&path, self.io.generate_uuid());
        debug!(
            "writing {} notes for user \"{username}\" to \"{}\"",
            collection.len(),
            path.display(),
        );
        trace!("tmp filename for \"{}\": \"{}\"", path.display(), tmp_path.display());
        if let Err(e) = self.io.write_file(&tmp_path, data).await {
            error!("failed to write tmp file \"{}\": {e}", tmp_path.display());
            self.remove_tmp_file(&tmp_path).await;
            return Err(e.into());
        }
        if let Err(e) = self.io.rename_file(&tmp_path, &path).await {
            error!(
                "failed to rename tmp file \"{}\" to \"{}\": {e}",
                tmp_path.display(),
                path.display(),
            );
            self.remove_tmp_file(&tmp_path).await;
            return Err(e.into());
        }
        Ok(())
    }

    async fn remove_tmp_file(&self, tmp_path: &Path) {
        if let Err(e) = self.io.remove_file(tmp_path).await {
            error!(
                "failed to remove tmp file \"{}\": {e}",
                tmp_path.display(),
            );
        }
    }

    fn get_collection_path(&self, username: &UsernameString) -> PathBuf {
        self.notes_dir.join(format!("{username}{NOTES_FILE_SUFFIX}"))
    }
}
