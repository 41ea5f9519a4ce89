use serde::Serialize;

use crate::entity::NoteId;
use crate::error::Result;
use crate::storage::{KeyValueStore, NoteStore};

/// One card in the note list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteSummary {
    pub id: NoteId,
    pub name: String,
    pub preview: String,
}

/// A single interaction with the list. Each variant is handled on its own,
/// so deleting a card can never also open it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListAction {
    Create,
    Select(NoteId),
    Delete(NoteId),
}

#[derive(Debug, Clone)]
pub struct ListController {
    preview_chars: usize,
    summaries: Vec<NoteSummary>,
}

impl ListController {
    pub fn new(preview_chars: usize) -> Self {
        Self {
            preview_chars,
            summaries: Vec::new(),
        }
    }

    pub fn summaries(&self) -> &[NoteSummary] {
        &self.summaries
    }

    /// Reload summaries from storage.
    pub fn refresh<S: KeyValueStore>(&mut self, store: &mut NoteStore<S>) -> &[NoteSummary] {
        self.summaries = store
            .load_all()
            .iter()
            .map(|(id, note)| NoteSummary {
                id: id.clone(),
                name: note.name.clone(),
                preview: note.preview(self.preview_chars),
            })
            .collect();
        &self.summaries
    }

    /// Apply `action`. Returns the note to open in the editor, if any.
    pub fn activate<S: KeyValueStore>(
        &mut self,
        store: &mut NoteStore<S>,
        action: ListAction,
    ) -> Result<Option<NoteId>> {
        match action {
            ListAction::Create => {
                let id = store.create()?;
                self.refresh(store);
                Ok(Some(id))
            }
            ListAction::Select(id) => Ok(Some(id)),
            ListAction::Delete(id) => {
                store.delete(&id)?;
                self.refresh(store);
                Ok(None)
            }
        }
    }
}
