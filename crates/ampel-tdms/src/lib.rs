//! Token dictionaries for AMPEL360 documents.
//!
//! A dictionary maps short ids (`28`, `AMM`, `FBL`) to their full values and
//! back. The registry holds one dictionary per [`DictionaryType`] and routes
//! `resolve` / `compact` calls to it.

pub mod config;
pub mod dictionary;
pub mod digest;
pub mod error;
pub mod format;
pub mod registry;
pub mod standard;
pub mod types;

pub use config::TdmsConfig;
pub use dictionary::{DictionaryDocument, TokenDictionary};
pub use error::{DictionaryError, Result};
pub use format::DocumentFormat;
pub use registry::DictionaryRegistry;
pub use types::{DictionaryEntry, DictionaryType};
