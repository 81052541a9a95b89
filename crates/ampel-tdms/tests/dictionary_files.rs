//! Dictionary persistence against a real filesystem.

use ampel_tdms::{
    DictionaryError, DictionaryRegistry, DictionaryType, DocumentFormat, TdmsConfig,
    TokenDictionary,
};
use tempfile::TempDir;

fn fixture() -> TokenDictionary {
    let mut dict = TokenDictionary::new("Severity Levels", DictionaryType::Severity)
        .with_version("2.1.0")
        .with_description("Hazard classification");
    dict.add("CAT", "Catastrophic").expect("add");
    dict.add("HAZ", "Hazardous").expect("add");
    dict.add("MAJ", "Major").expect("add");
    dict
}

#[test]
fn save_then_load_preserves_document_and_hash() {
    let dir = TempDir::new().expect("tempdir");
    let dict = fixture();

    for (file, format) in [
        ("severity.yaml", DocumentFormat::Yaml),
        ("severity.json", DocumentFormat::Json),
    ] {
        let path = dir.path().join(file);
        dict.save(&path, format).expect("save");
        let loaded = TokenDictionary::load(&path).expect("load");

        assert_eq!(loaded.to_document(), dict.to_document(), "{file}");
        assert_eq!(loaded.get_id("major").expect("value"), "MAJ");
        assert_eq!(
            loaded.compute_hash().expect("hash"),
            dict.compute_hash().expect("hash"),
            "{file}"
        );
    }
}

#[test]
fn yml_extension_is_yaml() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("severity.yml");
    fixture().save(&path, DocumentFormat::Yaml).expect("save");
    assert_eq!(TokenDictionary::load(&path).expect("load").len(), 3);
}

#[test]
fn unsupported_extension_is_rejected() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("severity.txt");
    std::fs::write(&path, "name: X\ntype: custom\n").expect("write");
    assert!(matches!(
        TokenDictionary::load(&path),
        Err(DictionaryError::UnsupportedFormat(_))
    ));
}

#[test]
fn missing_file_is_io_error() {
    let dir = TempDir::new().expect("tempdir");
    assert!(matches!(
        TokenDictionary::load(dir.path().join("absent.yaml")),
        Err(DictionaryError::Io(_))
    ));
}

#[test]
fn loads_hand_written_yaml() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("dict_custom.yaml");
    let yaml = r#"name: Zones
type: custom
description: Aircraft zones
created: '2025-06-01T09:00:00'
entries:
- id: Z100
  value: Lower Fuselage
- id: Z200
  value: Upper Fuselage
  description: Above the floor line
  metadata:
    major_zone: 200
"#;
    std::fs::write(&path, yaml).expect("write");

    let dict = TokenDictionary::load(&path).expect("load");
    assert_eq!(dict.name(), "Zones");
    assert_eq!(dict.version(), "1.0.0");
    assert_eq!(dict.get_value("Z100").expect("id"), "Lower Fuselage");
    let upper = dict.get_entry("Z200").expect("entry");
    assert_eq!(upper.description, "Above the floor line");
    assert_eq!(upper.metadata["major_zone"], serde_json::json!(200));
}

#[test]
fn registry_save_all_and_load_all() {
    let dir = TempDir::new().expect("tempdir");
    let mut registry = DictionaryRegistry::with_defaults();
    registry.register(fixture());

    let written = registry
        .save_all(dir.path().join("dicts"), DocumentFormat::Json)
        .expect("save_all");
    assert_eq!(written.len(), 7);
    assert!(dir.path().join("dicts/dict_severity.json").is_file());
    assert!(dir.path().join("dicts/dict_ata.json").is_file());

    let loaded = DictionaryRegistry::load_all(dir.path().join("dicts")).expect("load_all");
    assert_eq!(loaded.len(), 7);
    for dict in registry.iter() {
        let other = loaded.get(dict.dict_type()).expect("registered");
        assert_eq!(other.to_document(), dict.to_document());
    }
    assert_eq!(
        loaded.resolve("CAT", DictionaryType::Severity).expect("resolve"),
        "Catastrophic"
    );
}

#[test]
fn load_all_ignores_unrelated_files() {
    let dir = TempDir::new().expect("tempdir");
    fixture()
        .save(dir.path().join("dict_severity.yaml"), DocumentFormat::Yaml)
        .expect("save");
    std::fs::write(dir.path().join("README.md"), "notes").expect("write");
    std::fs::write(dir.path().join("dict_notes.txt"), "not a dictionary").expect("write");
    std::fs::write(dir.path().join("other.json"), "{}").expect("write");

    let registry = DictionaryRegistry::load_all(dir.path()).expect("load_all");
    assert_eq!(registry.types().collect::<Vec<_>>(), vec![DictionaryType::Severity]);
}

#[test]
fn load_all_rejects_duplicate_ids() {
    let dir = TempDir::new().expect("tempdir");
    std::fs::write(
        dir.path().join("dict_status.json"),
        r#"{"name":"Status","type":"status",
            "entries":[{"id":"A","value":"x"},{"id":"A","value":"y"}]}"#,
    )
    .expect("write");
    assert!(matches!(
        DictionaryRegistry::load_all(dir.path()),
        Err(DictionaryError::DuplicateId { .. })
    ));
}

#[test]
fn from_config_falls_back_to_defaults() {
    let dir = TempDir::new().expect("tempdir");
    let missing = TdmsConfig::new(dir.path().join("nowhere"), DocumentFormat::Yaml);
    assert_eq!(DictionaryRegistry::from_config(&missing).expect("defaults").len(), 6);

    fixture()
        .save(dir.path().join("dict_severity.yaml"), DocumentFormat::Yaml)
        .expect("save");
    let present = TdmsConfig::new(dir.path(), DocumentFormat::Yaml);
    assert_eq!(DictionaryRegistry::from_config(&present).expect("loaded").len(), 1);
}
