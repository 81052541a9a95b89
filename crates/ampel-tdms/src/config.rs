//! Environment-backed settings for dictionary storage.

use std::path::{Path, PathBuf};

use crate::format::DocumentFormat;

pub const DICT_DIR_ENV: &str = "AMPEL_DICT_DIR";
pub const DICT_FORMAT_ENV: &str = "AMPEL_DICT_FORMAT";
pub const DEFAULT_DICT_DIR: &str = "dictionaries";

/// Where dictionaries live and how new ones are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TdmsConfig {
    /// Directory scanned by `load_all` and written by `save_all`
    pub dict_dir: PathBuf,
    /// Encoding used when saving
    pub format: DocumentFormat,
}

impl Default for TdmsConfig {
    fn default() -> Self {
        let format = match std::env::var(DICT_FORMAT_ENV) {
            Ok(raw) => raw.parse::<DocumentFormat>().unwrap_or_else(|err| {
                tracing::warn!(event = "config.invalid", var = DICT_FORMAT_ENV, error = %err);
                DocumentFormat::default()
            }),
            Err(_) => DocumentFormat::default(),
        };
        TdmsConfig {
            dict_dir: std::env::var(DICT_DIR_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_DICT_DIR)),
            format,
        }
    }
}

impl TdmsConfig {
    /// Read `AMPEL_DICT_DIR` and `AMPEL_DICT_FORMAT`, falling back to
    /// `dictionaries` and YAML.
    pub fn from_env() -> Self {
        Self::default()
    }

    pub fn new(dict_dir: impl Into<PathBuf>, format: DocumentFormat) -> Self {
        TdmsConfig {
            dict_dir: dict_dir.into(),
            format,
        }
    }

    pub fn with_dir(mut self, dict_dir: impl Into<PathBuf>) -> Self {
        self.dict_dir = dict_dir.into();
        self
    }

    pub fn with_format(mut self, format: DocumentFormat) -> Self {
        self.format = format;
        self
    }

    pub fn dict_dir(&self) -> &Path {
        &self.dict_dir
    }
}
