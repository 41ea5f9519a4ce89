use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Note, NoteId};

/// The full set of notes, persisted as one unit.
///
/// Mutations return a new collection so a half-applied change can never be
/// written back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteCollection {
    notes: BTreeMap<NoteId, Note>,
}

impl NoteCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &NoteId) -> Option<&Note> {
        self.notes.get(id)
    }

    pub fn contains(&self, id: &NoteId) -> bool {
        self.notes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NoteId, &Note)> {
        self.notes.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &NoteId> {
        self.notes.keys()
    }

    /// Collection with `note` stored under `id`, replacing any previous note.
    pub fn with_note(&self, id: NoteId, note: Note) -> Self {
        let mut notes = self.notes.clone();
        notes.insert(id, note);
        Self { notes }
    }

    /// Collection without `id`. Absent ids yield an identical collection.
    pub fn without(&self, id: &NoteId) -> Self {
        let mut notes = self.notes.clone();
        notes.remove(id);
        Self { notes }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}

impl FromIterator<(NoteId, Note)> for NoteCollection {
    fn from_iter<T: IntoIterator<Item = (NoteId, Note)>>(iter: T) -> Self {
        Self {
            notes: iter.into_iter().collect(),
        }
    }
}
