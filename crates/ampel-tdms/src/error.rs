//! Error taxonomy for token dictionaries and the dictionary registry.

use crate::types::DictionaryType;

/// Dictionary errors. Lookup failures name the offending id or value and
/// the dictionary they were looked up in.
#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    #[error("ID {id:?} already exists in dictionary {dictionary:?}")]
    DuplicateId { id: String, dictionary: String },

    #[error("ID {id:?} not found in dictionary {dictionary:?}")]
    IdNotFound { id: String, dictionary: String },

    #[error("value {value:?} not found in dictionary {dictionary:?}")]
    ValueNotFound { value: String, dictionary: String },

    #[error("dictionary type '{0}' not registered")]
    UnregisteredType(DictionaryType),

    #[error("unsupported file format: {0:?}")]
    UnsupportedFormat(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for dictionary operations.
pub type Result<T> = std::result::Result<T, DictionaryError>;
