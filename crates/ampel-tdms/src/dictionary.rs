//! Bidirectional id/value dictionaries.
//!
//! A [`TokenDictionary`] keeps its entries in insertion order with two
//! indices: exact id lookup and case-insensitive value lookup. Ids are
//! unique. Values are not: when two entries share a lowercased value the
//! later one wins in the value index and the earlier one stays reachable by
//! id only.

use chrono::{DateTime, NaiveDateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

use crate::digest;
use crate::error::{DictionaryError, Result};
use crate::format::DocumentFormat;
use crate::types::{DictionaryEntry, DictionaryType};

pub const DEFAULT_VERSION: &str = "1.0.0";

fn default_version() -> String {
    DEFAULT_VERSION.to_string()
}

/// Serialized form of a dictionary, shared by the YAML and JSON encodings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DictionaryDocument {
    pub name: String,
    #[serde(rename = "type")]
    pub dict_type: DictionaryType,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "deserialize_created")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub entries: Vec<DictionaryEntry>,
}

// Accepts RFC 3339 and offset-less ISO 8601 (read as UTC).
fn deserialize_created<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    raw.map(|s| parse_timestamp(&s).map_err(serde::de::Error::custom))
        .transpose()
}

fn parse_timestamp(s: &str) -> std::result::Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| format!("invalid created timestamp {s:?}: {e}"))
}

/// Named, typed, versioned id/value dictionary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(into = "DictionaryDocument", try_from = "DictionaryDocument")]
pub struct TokenDictionary {
    name: String,
    dict_type: DictionaryType,
    version: String,
    description: String,
    created: DateTime<Utc>,
    entries: Vec<DictionaryEntry>,
    by_id: HashMap<String, usize>,
    by_value: HashMap<String, usize>,
}

impl TokenDictionary {
    /// Empty dictionary at version `1.0.0`, created now.
    pub fn new(name: &str, dict_type: DictionaryType) -> Self {
        Self {
            name: name.to_string(),
            dict_type,
            version: default_version(),
            description: String::new(),
            created: Utc::now(),
            entries: Vec::new(),
            by_id: HashMap::new(),
            by_value: HashMap::new(),
        }
    }

    pub fn with_version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
        self.created = created;
        self
    }

    /// Build from a fixed `(id, value)` table. Ids in the table are unique.
    pub(crate) fn from_table(
        name: &str,
        dict_type: DictionaryType,
        description: &str,
        rows: &[(&str, &str)],
    ) -> Self {
        let mut dict = Self::new(name, dict_type).with_description(description);
        for (id, value) in rows {
            dict.index(DictionaryEntry::new(id, value));
        }
        dict
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dict_type(&self) -> DictionaryType {
        self.dict_type
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    /// Add an entry with no description or metadata.
    pub fn add(&mut self, id: &str, value: &str) -> Result<&DictionaryEntry> {
        self.add_entry(DictionaryEntry::new(id, value))
    }

    /// Add a fully specified entry. Fails if the id is already present.
    pub fn add_entry(&mut self, entry: DictionaryEntry) -> Result<&DictionaryEntry> {
        if self.by_id.contains_key(&entry.id) {
            return Err(DictionaryError::DuplicateId {
                id: entry.id,
                dictionary: self.name.clone(),
            });
        }
        let idx = self.index(entry);
        Ok(&self.entries[idx])
    }

    /// Append and index without the duplicate-id check.
    pub(crate) fn index(&mut self, entry: DictionaryEntry) -> usize {
        let idx = self.entries.len();
        self.by_id.insert(entry.id.clone(), idx);
        if let Some(prev) = self.by_value.insert(entry.value.to_lowercase(), idx) {
            warn!(
                event = "dictionary.value_collision",
                dictionary = %self.name,
                value = %entry.value,
                id = %entry.id,
                shadowed_id = %self.entries[prev].id,
            );
        }
        self.entries.push(entry);
        idx
    }

    pub fn get_entry(&self, id: &str) -> Option<&DictionaryEntry> {
        self.by_id.get(id).map(|&idx| &self.entries[idx])
    }

    /// Expand a compact id to its value.
    pub fn get_value(&self, id: &str) -> Result<&str> {
        self.get_entry(id)
            .map(|entry| entry.value.as_str())
            .ok_or_else(|| DictionaryError::IdNotFound {
                id: id.to_string(),
                dictionary: self.name.clone(),
            })
    }

    /// Compact a value to its id, ignoring case.
    pub fn get_id(&self, value: &str) -> Result<&str> {
        self.by_value
            .get(&value.to_lowercase())
            .map(|&idx| self.entries[idx].id.as_str())
            .ok_or_else(|| DictionaryError::ValueNotFound {
                value: value.to_string(),
                dictionary: self.name.clone(),
            })
    }

    pub fn has_id(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn has_value(&self, value: &str) -> bool {
        self.by_value.contains_key(&value.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, DictionaryEntry> {
        self.entries.iter()
    }

    /// Plain `id -> value` map in insertion order.
    pub fn to_compact_map(&self) -> IndexMap<String, String> {
        self.entries
            .iter()
            .map(|e| (e.id.clone(), e.value.clone()))
            .collect()
    }

    pub fn to_document(&self) -> DictionaryDocument {
        DictionaryDocument {
            name: self.name.clone(),
            dict_type: self.dict_type,
            version: self.version.clone(),
            description: self.description.clone(),
            created: Some(self.created),
            entries: self.entries.clone(),
        }
    }

    /// Rebuild a dictionary and its indices from a document.
    ///
    /// A missing `created` timestamp is set to now. Duplicate ids are
    /// rejected.
    pub fn from_document(doc: DictionaryDocument) -> Result<Self> {
        let mut dict = Self::new(&doc.name, doc.dict_type)
            .with_version(&doc.version)
            .with_description(&doc.description);
        if let Some(created) = doc.created {
            dict.created = created;
        }
        for entry in doc.entries {
            dict.add_entry(entry)?;
        }
        Ok(dict)
    }

    pub fn to_text(&self, format: DocumentFormat) -> Result<String> {
        format.encode(&self.to_document())
    }

    pub fn from_text(text: &str, format: DocumentFormat) -> Result<Self> {
        Self::from_document(format.decode(text)?)
    }

    /// Write the whole document to `path`. The file is replaced in place,
    /// not atomically.
    pub fn save(&self, path: impl AsRef<Path>, format: DocumentFormat) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_text(format)?)?;
        info!(
            event = "dictionary.saved",
            dictionary = %self.name,
            path = %path.display(),
            format = %format,
            entries = self.entries.len(),
        );
        Ok(())
    }

    /// Read a dictionary, choosing the decoder from the file extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = DocumentFormat::from_path(path)?;
        let text = std::fs::read_to_string(path)?;
        let dict = Self::from_text(&text, format)?;
        info!(
            event = "dictionary.loaded",
            dictionary = %dict.name,
            path = %path.display(),
            entries = dict.entries.len(),
        );
        Ok(dict)
    }

    /// First 16 hex characters of the SHA-256 of the canonical JSON document.
    ///
    /// The document includes `created`, so two otherwise identical
    /// dictionaries created at different times hash differently.
    pub fn compute_hash(&self) -> Result<String> {
        digest::short_digest(&self.to_document())
    }
}

impl<'a> IntoIterator for &'a TokenDictionary {
    type Item = &'a DictionaryEntry;
    type IntoIter = std::slice::Iter<'a, DictionaryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl From<TokenDictionary> for DictionaryDocument {
    fn from(dict: TokenDictionary) -> Self {
        DictionaryDocument {
            name: dict.name,
            dict_type: dict.dict_type,
            version: dict.version,
            description: dict.description,
            created: Some(dict.created),
            entries: dict.entries,
        }
    }
}

impl TryFrom<DictionaryDocument> for TokenDictionary {
    type Error = DictionaryError;

    fn try_from(doc: DictionaryDocument) -> Result<Self> {
        Self::from_document(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tracing_test::traced_test;

    fn publications() -> TokenDictionary {
        let mut dict = TokenDictionary::new("Publication Types", DictionaryType::Publication);
        dict.add("AMM", "Aircraft Maintenance Manual").expect("add");
        dict.add("SRM", "Structural Repair Manual").expect("add");
        dict
    }

    #[test]
    fn test_add_and_lookup() {
        let dict = publications();
        assert_eq!(dict.get_value("AMM").expect("id"), "Aircraft Maintenance Manual");
        assert_eq!(dict.get_id("structural repair manual").expect("value"), "SRM");
        assert!(dict.has_id("AMM"));
        assert!(!dict.has_id("amm"));
        assert!(dict.has_value("AIRCRAFT MAINTENANCE MANUAL"));
        assert_eq!(dict.len(), 2);
        assert_eq!(dict.version(), DEFAULT_VERSION);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut dict = publications();
        match dict.add("AMM", "Another Manual") {
            Err(DictionaryError::DuplicateId { id, dictionary }) => {
                assert_eq!(id, "AMM");
                assert_eq!(dictionary, "Publication Types");
            }
            other => panic!("expected DuplicateId, got {other:?}"),
        }
        assert_eq!(dict.len(), 2);
        assert_eq!(dict.get_value("AMM").expect("id"), "Aircraft Maintenance Manual");
    }

    #[test]
    fn test_missing_lookups() {
        let dict = publications();
        assert!(matches!(
            dict.get_value("ZZZ"),
            Err(DictionaryError::IdNotFound { .. })
        ));
        assert!(matches!(
            dict.get_id("Nothing"),
            Err(DictionaryError::ValueNotFound { .. })
        ));
        assert!(dict.get_entry("ZZZ").is_none());
    }

    #[traced_test]
    #[test]
    fn test_value_collision_last_write_wins() {
        let mut dict = TokenDictionary::new("Codes", DictionaryType::Custom);
        dict.add("A1", "Fuel").expect("add");
        dict.add("A2", "FUEL").expect("add");

        assert_eq!(dict.get_id("fuel").expect("value"), "A2");
        assert_eq!(dict.get_value("A1").expect("id"), "Fuel");
        assert_eq!(dict.len(), 2);
        assert!(logs_contain("dictionary.value_collision"));
    }

    #[test]
    fn test_entry_with_metadata() {
        let mut dict = TokenDictionary::new("Severity", DictionaryType::Severity);
        let entry = DictionaryEntry::new("CAT", "Catastrophic")
            .with_description("Prevents continued safe flight")
            .with_metadata("rank", 1);
        dict.add_entry(entry).expect("add");
        let stored = dict.get_entry("CAT").expect("entry");
        assert_eq!(stored.metadata["rank"], serde_json::json!(1));
    }

    #[test]
    fn test_to_compact_map_keeps_order() {
        let dict = publications();
        let map = dict.to_compact_map();
        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["AMM", "SRM"]);
    }

    #[test]
    fn test_iteration_order() {
        let dict = publications();
        let ids: Vec<&str> = dict.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["AMM", "SRM"]);
        assert_eq!((&dict).into_iter().count(), 2);
    }

    #[test]
    fn test_document_round_trip_in_both_formats() {
        let dict = publications().with_description("Standard aerospace publication types");
        for format in [DocumentFormat::Yaml, DocumentFormat::Json] {
            let text = dict.to_text(format).expect("encode");
            let back = TokenDictionary::from_text(&text, format).expect("decode");
            assert_eq!(back.to_document(), dict.to_document(), "{format}");
            assert_eq!(back.get_id("aircraft maintenance manual").expect("value"), "AMM");
        }
    }

    #[test]
    fn test_document_field_names() {
        let created = Utc.with_ymd_and_hms(2025, 1, 15, 10, 30, 0).unwrap();
        let dict = publications().with_created(created);
        let value = serde_json::to_value(&dict).expect("serialize");
        assert_eq!(value["type"], "publication");
        assert_eq!(value["version"], "1.0.0");
        assert_eq!(value["created"], "2025-01-15T10:30:00Z");
        assert_eq!(
            value["entries"][0],
            serde_json::json!({"id": "AMM", "value": "Aircraft Maintenance Manual"})
        );
    }

    #[test]
    fn test_from_document_rejects_duplicate_ids() {
        let json = r#"{
            "name": "Broken",
            "type": "status",
            "entries": [{"id": "DFT", "value": "Draft"}, {"id": "DFT", "value": "Drafted"}]
        }"#;
        match TokenDictionary::from_text(json, DocumentFormat::Json) {
            Err(DictionaryError::DuplicateId { id, .. }) => assert_eq!(id, "DFT"),
            other => panic!("expected DuplicateId, got {other:?}"),
        }
    }

    #[test]
    fn test_document_defaults() {
        let yaml = "name: Minimal\ntype: custom\n";
        let dict = TokenDictionary::from_text(yaml, DocumentFormat::Yaml).expect("decode");
        assert_eq!(dict.version(), "1.0.0");
        assert!(dict.description().is_empty());
        assert!(dict.is_empty());
    }

    #[test]
    fn test_created_accepts_offsetless_timestamps() {
        let yaml =
            "name: Legacy\ntype: custom\ncreated: '2024-03-01T08:15:30.250000'\nentries: []\n";
        let dict = TokenDictionary::from_text(yaml, DocumentFormat::Yaml).expect("decode");
        assert_eq!(
            dict.created(),
            Utc.with_ymd_and_hms(2024, 3, 1, 8, 15, 30).unwrap()
                + chrono::Duration::milliseconds(250)
        );
        assert!(TokenDictionary::from_text(
            "name: X\ntype: custom\ncreated: yesterday\n",
            DocumentFormat::Yaml
        )
        .is_err());
    }

    #[test]
    fn test_compute_hash() {
        let created = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let a = publications().with_created(created);
        let b = publications().with_created(created);
        let hash = a.compute_hash().expect("hash");
        assert_eq!(hash.len(), 16);
        assert_eq!(hash, b.compute_hash().expect("hash"));

        let mut c = publications().with_created(created);
        c.add("CMM", "Component Maintenance Manual").expect("add");
        assert_ne!(hash, c.compute_hash().expect("hash"));

        let later = publications().with_created(created + chrono::Duration::seconds(1));
        assert_ne!(hash, later.compute_hash().expect("hash"));
    }

    #[test]
    fn test_hash_ignores_metadata_key_order() {
        let doc = |metadata: &str| {
            format!(
                "name: Lifecycle\ntype: lifecycle\ncreated: 2025-01-01T00:00:00Z\n\
                 entries:\n  - id: LC04\n    value: Design Definition\n    metadata:\n{metadata}"
            )
        };
        let a = TokenDictionary::from_text(
            &doc("      mnemonic: DES\n      category: PLM\n"),
            DocumentFormat::Yaml,
        )
        .expect("yaml");
        let b = TokenDictionary::from_text(
            &doc("      category: PLM\n      mnemonic: DES\n"),
            DocumentFormat::Yaml,
        )
        .expect("yaml");
        assert_eq!(
            a.compute_hash().expect("hash"),
            b.compute_hash().expect("hash")
        );

        let reordered_json = r#"{"entries":[{"metadata":{"category":"PLM","mnemonic":"DES"},
            "value":"Design Definition","id":"LC04"}],"created":"2025-01-01T00:00:00Z",
            "type":"lifecycle","name":"Lifecycle"}"#;
        let c = TokenDictionary::from_text(reordered_json, DocumentFormat::Json).expect("json");
        assert_eq!(
            a.compute_hash().expect("hash"),
            c.compute_hash().expect("hash")
        );
    }
}
