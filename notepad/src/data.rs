use std::collections::HashSet;
use std::fmt::{self, Display, Formatter};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Note id, unique within one user's collection.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct NoteId(u64);

impl NoteId {
    pub const FIRST: NoteId = NoteId(1);

    pub fn get(self) -> u64 {
        self.0
    }

    pub fn next(self) -> Option<NoteId> {
        self.0.checked_add(1).map(NoteId)
    }
}

impl From<u64> for NoteId {
    fn from(value: u64) -> Self {
        NoteId(value)
    }
}

impl Display for NoteId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,

    #[serde(default)]
    pub content: String,

    #[serde(with = "crate::serde::timestamp")]
    pub created_at: OffsetDateTime,

    #[serde(default, with = "crate::serde::timestamp::option")]
    pub updated_at: Option<OffsetDateTime>,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct NewNote {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Fields left as `None` keep their stored values.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct NoteUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// All notes of one user, in stored order.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct NoteCollection(Vec<Note>);

impl NoteCollection {
    pub fn new() -> Self {
        NoteCollection(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `None` only when the highest id in use is `u64::MAX`.
    pub fn next_id(&self) -> Option<NoteId> {
        match self.0.iter().map(|note| note.id).max() {
            None => Some(NoteId::FIRST),
            Some(max) => max.next(),
        }
    }

    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.0.iter().find(|note| note.id == id)
    }

    pub fn get_mut(&mut self, id: NoteId) -> Option<&mut Note> {
        self.0.iter_mut().find(|note| note.id == id)
    }

    pub fn push(&mut self, note: Note) {
        self.0.push(note)
    }

    /// Returns whether anything was removed.
    pub fn remove(&mut self, id: NoteId) -> bool {
        let len_before = self.0.len();
        self.0.retain(|note| note.id != id);
        len_before != self.0.len()
    }

    pub fn find_duplicate_id(&self) -> Option<NoteId> {
        let mut seen = HashSet::with_capacity(self.0.len());
        self.0.iter()
            .map(|note| note.id)
            .find(|id| !seen.insert(*id))
    }

    /// Most recently updated first. Notes without `updated_at` go last,
    /// ties keep the stored order.
    pub fn into_recent_first(self) -> Vec<Note> {
        let mut notes = self.0;
        notes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        notes
    }
}

impl From<Vec<Note>> for NoteCollection {
    fn from(value: Vec<Note>) -> Self {
        NoteCollection(value)
    }
}

impl IntoIterator for NoteCollection {
    type Item = Note;
    type IntoIter = std::vec::IntoIter<Note>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
