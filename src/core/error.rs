use thiserror::Error;

/// Failures of the persistence boundary.
///
/// Query and mutation operations never produce these: they report rejected
/// work through `None`/`false`/empty selections. Only loading, saving and
/// talking to a storage collaborator can fail.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Document '{0}' not found")]
    DocumentNotFound(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("I/O error: {0}")]
    IoError(String),
}

pub type Result<T> = std::result::Result<T, DbError>;

impl From<serde_json::Error> for DbError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() || err.is_syntax() || err.is_eof() {
            Self::ParseError(err.to_string())
        } else {
            Self::SerializationError(err.to_string())
        }
    }
}

impl From<std::io::Error> for DbError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError(err.to_string())
    }
}
