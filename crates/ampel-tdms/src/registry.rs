//! One dictionary per type, with lookup routed by type.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::TdmsConfig;
use crate::dictionary::TokenDictionary;
use crate::error::{DictionaryError, Result};
use crate::format::DocumentFormat;
use crate::standard;
use crate::types::DictionaryType;

const FILE_PREFIX: &str = "dict_";

#[derive(Debug, Clone, Default)]
pub struct DictionaryRegistry {
    dictionaries: BTreeMap<DictionaryType, TokenDictionary>,
}

impl DictionaryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the six reference dictionaries.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for dict in standard::all() {
            registry.register(dict);
        }
        registry
    }

    /// Registry for `config`: the dictionaries in its directory if that
    /// directory exists, the reference set otherwise.
    pub fn from_config(config: &TdmsConfig) -> Result<Self> {
        if config.dict_dir.is_dir() {
            Self::load_all(&config.dict_dir)
        } else {
            Ok(Self::with_defaults())
        }
    }

    /// Insert `dictionary`, replacing any dictionary of the same type.
    pub fn register(&mut self, dictionary: TokenDictionary) -> Option<TokenDictionary> {
        debug!(
            event = "dictionary.registered",
            dictionary = %dictionary.name(),
            dict_type = %dictionary.dict_type(),
        );
        self.dictionaries.insert(dictionary.dict_type(), dictionary)
    }

    pub fn get(&self, dict_type: DictionaryType) -> Option<&TokenDictionary> {
        self.dictionaries.get(&dict_type)
    }

    pub fn get_mut(&mut self, dict_type: DictionaryType) -> Option<&mut TokenDictionary> {
        self.dictionaries.get_mut(&dict_type)
    }

    fn require(&self, dict_type: DictionaryType) -> Result<&TokenDictionary> {
        self.get(dict_type)
            .ok_or(DictionaryError::UnregisteredType(dict_type))
    }

    /// Expand `id` with the dictionary registered for `dict_type`.
    pub fn resolve(&self, id: &str, dict_type: DictionaryType) -> Result<&str> {
        self.require(dict_type)?.get_value(id)
    }

    /// Compact `value` with the dictionary registered for `dict_type`.
    pub fn compact(&self, value: &str, dict_type: DictionaryType) -> Result<&str> {
        self.require(dict_type)?.get_id(value)
    }

    /// Registered types in tag order.
    pub fn types(&self) -> impl Iterator<Item = DictionaryType> + '_ {
        self.dictionaries.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TokenDictionary> {
        self.dictionaries.values()
    }

    pub fn len(&self) -> usize {
        self.dictionaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dictionaries.is_empty()
    }

    /// File name used by `save_all` for a type.
    pub fn file_name(dict_type: DictionaryType, format: DocumentFormat) -> String {
        format!("{FILE_PREFIX}{dict_type}.{}", format.extension())
    }

    /// Write every dictionary to `dir/dict_{type}.{ext}`, creating `dir`.
    pub fn save_all(&self, dir: impl AsRef<Path>, format: DocumentFormat) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;

        let mut written = Vec::with_capacity(self.dictionaries.len());
        for (dict_type, dict) in &self.dictionaries {
            let path = dir.join(Self::file_name(*dict_type, format));
            dict.save(&path, format)?;
            written.push(path);
        }
        info!(
            event = "registry.saved",
            dir = %dir.display(),
            count = written.len(),
        );
        Ok(written)
    }

    /// Load every `dict_*.yaml|yml|json` file in `dir`.
    ///
    /// Files are read in name order; when two files carry the same type the
    /// later one replaces the earlier.
    pub fn load_all(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            let is_dictionary = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with(FILE_PREFIX));
            if path.is_file() && is_dictionary && DocumentFormat::from_path(&path).is_ok() {
                paths.push(path);
            }
        }
        paths.sort();

        let mut registry = Self::new();
        for path in &paths {
            registry.register(TokenDictionary::load(path)?);
        }
        info!(
            event = "registry.loaded",
            dir = %dir.display(),
            count = registry.len(),
        );
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let registry = DictionaryRegistry::with_defaults();
        assert_eq!(registry.len(), 6);
        assert_eq!(
            registry.resolve("AMM", DictionaryType::Publication).expect("resolve"),
            "Aircraft Maintenance Manual"
        );
        assert_eq!(
            registry.compact("Functional Baseline", DictionaryType::Baseline).expect("compact"),
            "FBL"
        );
        assert_eq!(
            registry.resolve("LC12", DictionaryType::Lifecycle).expect("resolve"),
            "Continued Airworthiness & MRO"
        );
    }

    #[test]
    fn test_unregistered_type_vs_missing_id() {
        let registry = DictionaryRegistry::with_defaults();
        assert!(matches!(
            registry.resolve("AMM", DictionaryType::S1000d),
            Err(DictionaryError::UnregisteredType(DictionaryType::S1000d))
        ));
        assert!(matches!(
            registry.compact("x", DictionaryType::Severity),
            Err(DictionaryError::UnregisteredType(DictionaryType::Severity))
        ));
        assert!(matches!(
            registry.resolve("ZZZ", DictionaryType::Publication),
            Err(DictionaryError::IdNotFound { .. })
        ));
        assert!(matches!(
            registry.compact("Nothing", DictionaryType::Publication),
            Err(DictionaryError::ValueNotFound { .. })
        ));
    }

    #[test]
    fn test_register_replaces_same_type() {
        let mut registry = DictionaryRegistry::with_defaults();
        let mut custom = TokenDictionary::new("Site Publications", DictionaryType::Publication);
        custom.add("LMM", "Line Maintenance Manual").expect("add");

        let previous = registry.register(custom).expect("replaced");
        assert_eq!(previous.name(), "Publication Types");
        assert_eq!(registry.len(), 6);
        assert!(registry.resolve("AMM", DictionaryType::Publication).is_err());
        assert_eq!(
            registry.resolve("LMM", DictionaryType::Publication).expect("resolve"),
            "Line Maintenance Manual"
        );
    }

    #[test]
    fn test_get_mut_extends_dictionary() {
        let mut registry = DictionaryRegistry::with_defaults();
        registry
            .get_mut(DictionaryType::Status)
            .expect("status")
            .add("ARC", "Archived")
            .expect("add");
        assert_eq!(
            registry.compact("archived", DictionaryType::Status).expect("compact"),
            "ARC"
        );
    }

    #[test]
    fn test_types_in_tag_order() {
        let registry = DictionaryRegistry::with_defaults();
        let types: Vec<DictionaryType> = registry.types().collect();
        assert_eq!(
            types,
            vec![
                DictionaryType::Ata,
                DictionaryType::Publication,
                DictionaryType::Status,
                DictionaryType::Stakeholder,
                DictionaryType::Baseline,
                DictionaryType::Lifecycle,
            ]
        );
    }

    #[test]
    fn test_file_name() {
        assert_eq!(
            DictionaryRegistry::file_name(DictionaryType::Ata, DocumentFormat::Yaml),
            "dict_ata.yaml"
        );
        assert_eq!(
            DictionaryRegistry::file_name(DictionaryType::S1000d, DocumentFormat::Json),
            "dict_s1000d.json"
        );
    }
}
