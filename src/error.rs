use thiserror::Error;

#[derive(Error, Debug)]
pub enum NoteboxError {
    #[error("Not in a notebox project. Run 'notebox init' first.")]
    NotInitialized,

    #[error("Already initialized. Remove .notebox/ to reinitialize.")]
    AlreadyInitialized,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Failed to write '{key}' to storage: {reason}")]
    StorageWrite { key: String, reason: String },

    #[error("Confirmation required: {0}")]
    ConfirmationRequired(String),

    #[error("Not allowed while {0}")]
    InvalidTransition(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl NoteboxError {
    /// True for failures the caller can recover from by retrying later or
    /// freeing space, without losing the in-memory state.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, NoteboxError::StorageWrite { .. })
    }
}

pub type Result<T> = std::result::Result<T, NoteboxError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirmation_required_message() {
        let err = NoteboxError::ConfirmationRequired(
            "use --force to delete in non-interactive mode".to_string(),
        );
        let msg = err.to_string();
        assert!(msg.starts_with("Confirmation required"));
        assert!(!msg.contains("Storage error"));
        assert!(!err.is_recoverable());
    }
}
