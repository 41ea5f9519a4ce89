pub mod app;
pub mod cli;
pub mod config;
pub mod entity;
pub mod error;
pub mod logging;
pub mod storage;
pub mod warnings;

pub use app::{App, View};
pub use config::Config;
pub use entity::{Note, NoteCollection, NoteId};
pub use error::{NoteboxError, Result};
pub use storage::{FileKv, KeyValueStore, MemoryKv, NoteStore};
