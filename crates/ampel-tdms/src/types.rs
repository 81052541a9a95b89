//! Dictionary type tags and entries.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Domain a dictionary covers. One dictionary per type in a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DictionaryType {
    /// ATA chapter codes
    Ata,
    /// S1000D element codes
    S1000d,
    Publication,
    Artifact,
    Status,
    Stakeholder,
    Baseline,
    Lifecycle,
    Severity,
    /// User-defined
    Custom,
}

impl DictionaryType {
    pub const ALL: [DictionaryType; 10] = [
        Self::Ata,
        Self::S1000d,
        Self::Publication,
        Self::Artifact,
        Self::Status,
        Self::Stakeholder,
        Self::Baseline,
        Self::Lifecycle,
        Self::Severity,
        Self::Custom,
    ];

    /// Wire tag, also used in `dict_{tag}.{ext}` file names.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ata => "ata",
            Self::S1000d => "s1000d",
            Self::Publication => "publication",
            Self::Artifact => "artifact",
            Self::Status => "status",
            Self::Stakeholder => "stakeholder",
            Self::Baseline => "baseline",
            Self::Lifecycle => "lifecycle",
            Self::Severity => "severity",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for DictionaryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DictionaryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown dictionary type: {s}"))
    }
}

/// One id/value pair. `description` and `metadata` are omitted from the
/// document form when empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    pub id: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl DictionaryEntry {
    pub fn new(id: &str, value: &str) -> Self {
        Self {
            id: id.to_string(),
            value: value.to_string(),
            description: String::new(),
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_metadata(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.metadata.insert(key.to_string(), value.into());
        self
    }
}
