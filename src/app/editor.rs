use crate::entity::{Note, NoteId};
use crate::error::Result;
use crate::storage::{KeyValueStore, NoteStore};

/// Editable view of a single note.
///
/// Each field edit writes the whole note back straight away. If that write
/// fails the edited text stays in the controller, and the next edit writes it
/// again.
#[derive(Debug, Clone)]
pub struct EditorController {
    id: NoteId,
    name: String,
    content: String,
}

impl EditorController {
    pub fn open<S: KeyValueStore>(store: &mut NoteStore<S>, id: NoteId) -> Self {
        let note = store.get(&id);
        Self {
            id,
            name: note.name,
            content: note.content,
        }
    }

    pub fn id(&self) -> &NoteId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn note(&self) -> Note {
        Note::new(self.name.clone(), self.content.clone())
    }

    pub fn set_name<S: KeyValueStore>(
        &mut self,
        store: &mut NoteStore<S>,
        name: impl Into<String>,
    ) -> Result<()> {
        self.name = name.into();
        store.update(&self.id, self.note())
    }

    pub fn set_content<S: KeyValueStore>(
        &mut self,
        store: &mut NoteStore<S>,
        content: impl Into<String>,
    ) -> Result<()> {
        self.content = content.into();
        store.update(&self.id, self.note())
    }

    /// Finish editing. Every edit is already persisted, so this only hands
    /// back the id that was edited.
    pub fn save(self) -> NoteId {
        self.id
    }
}
