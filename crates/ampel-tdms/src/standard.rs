//! Reference dictionaries shipped with the registry defaults.

use ampel_ids::LifecyclePhase;

use crate::dictionary::TokenDictionary;
use crate::types::{DictionaryEntry, DictionaryType};

const ATA_CHAPTERS: &[(&str, &str)] = &[
    ("00", "General"),
    ("05", "Time Limits/Maintenance Checks"),
    ("06", "Dimensions and Areas"),
    ("07", "Lifting and Shoring"),
    ("08", "Leveling and Weighing"),
    ("09", "Towing and Taxiing"),
    ("10", "Parking, Mooring, Storage and Return to Service"),
    ("11", "Placards and Markings"),
    ("12", "Servicing"),
    ("20", "Standard Practices — Airframe"),
    ("21", "Air Conditioning"),
    ("22", "Auto Flight"),
    ("23", "Communications"),
    ("24", "Electrical Power"),
    ("25", "Equipment/Furnishings"),
    ("26", "Fire Protection"),
    ("27", "Flight Controls"),
    ("28", "Fuel"),
    ("29", "Hydraulic Power"),
    ("30", "Ice and Rain Protection"),
    ("31", "Indicating/Recording Systems"),
    ("32", "Landing Gear"),
    ("33", "Lights"),
    ("34", "Navigation"),
    ("35", "Oxygen"),
    ("36", "Pneumatic"),
    ("37", "Vacuum"),
    ("38", "Water/Waste"),
    ("45", "Central Maintenance System"),
    ("46", "Information Systems"),
    ("49", "Airborne Auxiliary Power"),
    ("51", "Standard Practices — Structures"),
    ("52", "Doors"),
    ("53", "Fuselage"),
    ("54", "Nacelles/Pylons"),
    ("55", "Stabilizers"),
    ("56", "Windows"),
    ("57", "Wings"),
    ("71", "Power Plant"),
    ("72", "Engine"),
    ("73", "Engine Fuel and Control"),
    ("74", "Ignition"),
    ("75", "Air"),
    ("76", "Engine Controls"),
    ("77", "Engine Indicating"),
    ("78", "Exhaust"),
    ("79", "Oil"),
    ("80", "Starting"),
];

const PUBLICATION_TYPES: &[(&str, &str)] = &[
    ("AMM", "Aircraft Maintenance Manual"),
    ("SRM", "Structural Repair Manual"),
    ("CMM", "Component Maintenance Manual"),
    ("IPC", "Illustrated Parts Catalog"),
    ("FCOM", "Flight Crew Operating Manual"),
    ("TSM", "Troubleshooting Manual"),
    ("WDM", "Wiring Diagram Manual"),
    ("SB", "Service Bulletin"),
    ("IETP", "Interactive Electronic Technical Publication"),
    ("CSDB", "Common Source Database"),
    ("AFM", "Aircraft Flight Manual"),
    ("MEL", "Minimum Equipment List"),
    ("QRH", "Quick Reference Handbook"),
];

const STATUS_CODES: &[(&str, &str)] = &[
    ("DFT", "Draft"),
    ("REV", "Review"),
    ("APV", "Approved"),
    ("ACT", "Active"),
    ("SUP", "Superseded"),
    ("WTH", "Withdrawn"),
    ("PND", "Pending"),
    ("RUN", "Running"),
    ("SUC", "Success"),
    ("FAL", "Failed"),
    ("PAR", "Partial"),
    ("CAN", "Cancelled"),
];

const STAKEHOLDER_ROLES: &[(&str, &str)] = &[
    ("ENG", "Engineering"),
    ("CM", "Configuration Management"),
    ("QA", "Quality Assurance"),
    ("CERT", "Certification"),
    ("OPS", "Operations"),
    ("MRO", "Maintenance, Repair, Overhaul"),
    ("TRN", "Training"),
    ("SUP", "Supply Chain"),
];

const BASELINE_TYPES: &[(&str, &str)] = &[
    ("FBL", "Functional Baseline"),
    ("ABL", "Allocated Baseline"),
    ("PBL", "Product Baseline"),
    ("OBL", "Operational Baseline"),
    ("DBL", "Documentation Baseline"),
];

/// ATA iSpec 2200 chapters.
pub fn ata() -> TokenDictionary {
    TokenDictionary::from_table(
        "ATA Chapters",
        DictionaryType::Ata,
        "ATA iSpec 2200 chapter codes and descriptions",
        ATA_CHAPTERS,
    )
}

pub fn publication() -> TokenDictionary {
    TokenDictionary::from_table(
        "Publication Types",
        DictionaryType::Publication,
        "Standard aerospace publication types",
        PUBLICATION_TYPES,
    )
}

pub fn status() -> TokenDictionary {
    TokenDictionary::from_table(
        "Status Codes",
        DictionaryType::Status,
        "Document and contract status codes",
        STATUS_CODES,
    )
}

pub fn stakeholder() -> TokenDictionary {
    TokenDictionary::from_table(
        "Stakeholder Roles",
        DictionaryType::Stakeholder,
        "ASIT stakeholder role codes",
        STAKEHOLDER_ROLES,
    )
}

pub fn baseline() -> TokenDictionary {
    TokenDictionary::from_table(
        "Baseline Types",
        DictionaryType::Baseline,
        "ASIT baseline type codes",
        BASELINE_TYPES,
    )
}

/// `LCnn` to phase title, with the WBS mnemonic and category as metadata.
pub fn lifecycle() -> TokenDictionary {
    let mut dict = TokenDictionary::new("Lifecycle Phases", DictionaryType::Lifecycle)
        .with_description("Canonical LC01-LC14 lifecycle phases");
    for phase in LifecyclePhase::all() {
        let entry = DictionaryEntry::new(phase.code(), phase.title())
            .with_metadata("mnemonic", phase.mnemonic())
            .with_metadata("category", phase.category().short_code())
            .with_metadata("storage_root", phase.category().storage_root());
        dict.index(entry);
    }
    dict
}

/// All six reference dictionaries.
pub fn all() -> Vec<TokenDictionary> {
    vec![
        ata(),
        publication(),
        status(),
        stakeholder(),
        baseline(),
        lifecycle(),
    ]
}
