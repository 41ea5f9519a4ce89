// src/entity/note.rs
use serde::{Deserialize, Serialize};

pub const DEFAULT_NOTE_NAME: &str = "New Note";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub name: String,
    pub content: String,
}

impl Note {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// First `max_chars` characters of the content, with an ellipsis when cut.
    pub fn preview(&self, max_chars: usize) -> String {
        let mut chars = self.content.char_indices();
        match chars.nth(max_chars) {
            Some((idx, _)) => format!("{}…", &self.content[..idx]),
            None => self.content.clone(),
        }
    }
}

/// A freshly created note, also used as the placeholder for absent ids.
impl Default for Note {
    fn default() -> Self {
        Self::new(DEFAULT_NOTE_NAME, "")
    }
}
