//! The notes application as a two-state machine.
//!
//! `Listing` shows every note and accepts create/select/delete; `Editing`
//! holds one note open and accepts field edits until `save` returns to the
//! list. There is no history stack and no other transition.

mod editor;
mod list;

pub use editor::EditorController;
pub use list::{ListAction, ListController, NoteSummary};

use crate::entity::NoteId;
use crate::error::{NoteboxError, Result};
use crate::storage::{KeyValueStore, NoteStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Listing,
    Editing(NoteId),
}

impl std::fmt::Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            View::Listing => write!(f, "listing"),
            View::Editing(id) => write!(f, "editing {}", id),
        }
    }
}

pub struct App<S> {
    store: NoteStore<S>,
    list: ListController,
    editor: Option<EditorController>,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(store: NoteStore<S>, preview_chars: usize) -> Self {
        let mut app = Self {
            store,
            list: ListController::new(preview_chars),
            editor: None,
        };
        app.list.refresh(&mut app.store);
        app
    }

    pub fn view(&self) -> View {
        match &self.editor {
            Some(editor) => View::Editing(editor.id().clone()),
            None => View::Listing,
        }
    }

    pub fn store(&self) -> &NoteStore<S> {
        &self.store
    }

    pub fn summaries(&self) -> &[NoteSummary] {
        self.list.summaries()
    }

    pub fn editor(&self) -> Option<&EditorController> {
        self.editor.as_ref()
    }

    /// Handle a list interaction. Create and select move to `Editing`.
    pub fn activate(&mut self, action: ListAction) -> Result<View> {
        if self.editor.is_some() {
            return Err(NoteboxError::InvalidTransition(self.view().to_string()));
        }
        if let Some(id) = self.list.activate(&mut self.store, action)? {
            self.editor = Some(EditorController::open(&mut self.store, id));
        }
        Ok(self.view())
    }

    pub fn edit_name(&mut self, name: impl Into<String>) -> Result<()> {
        let editor = self.editor.as_mut().ok_or_else(not_editing)?;
        editor.set_name(&mut self.store, name)
    }

    pub fn edit_content(&mut self, content: impl Into<String>) -> Result<()> {
        let editor = self.editor.as_mut().ok_or_else(not_editing)?;
        editor.set_content(&mut self.store, content)
    }

    /// Leave the editor and go back to a freshly loaded list.
    pub fn save(&mut self) -> Result<View> {
        let editor = self.editor.take().ok_or_else(not_editing)?;
        let id = editor.save();
        tracing::debug!(id = %id, "closed editor");
        self.list.refresh(&mut self.store);
        Ok(self.view())
    }
}

fn not_editing() -> NoteboxError {
    NoteboxError::InvalidTransition(View::Listing.to_string())
}
