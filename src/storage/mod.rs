mod ids;
mod kv;
mod note_store;

pub use ids::IdStrategy;
pub use kv::{FileKv, KeyValueStore, MemoryKv, STORAGE_FILE};
pub use note_store::NoteStore;
