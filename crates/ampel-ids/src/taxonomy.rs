//! Fixed taxonomy tables shared by every identifier grammar.
//!
//! - `LifecyclePhase`: the fourteen canonical `LCnn` stages and their WBS mnemonics
//! - `PhaseCategory`: program-lifecycle vs. operations partition and storage roots
//! - `Axis` and `SUBDOMAIN_CODES`: OPT-IN axis to subdomain membership
//! - ATA chapter / section / subject range checks
//!
//! Everything here is policy, so it lives in constants rather than runtime maps.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Canonical lifecycle phase `LC01`..`LC14`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LifecyclePhase {
    #[serde(rename = "LC01")]
    Lc01,
    #[serde(rename = "LC02")]
    Lc02,
    #[serde(rename = "LC03")]
    Lc03,
    #[serde(rename = "LC04")]
    Lc04,
    #[serde(rename = "LC05")]
    Lc05,
    #[serde(rename = "LC06")]
    Lc06,
    #[serde(rename = "LC07")]
    Lc07,
    #[serde(rename = "LC08")]
    Lc08,
    #[serde(rename = "LC09")]
    Lc09,
    #[serde(rename = "LC10")]
    Lc10,
    #[serde(rename = "LC11")]
    Lc11,
    #[serde(rename = "LC12")]
    Lc12,
    #[serde(rename = "LC13")]
    Lc13,
    #[serde(rename = "LC14")]
    Lc14,
}

/// Phase table: (phase, code, WBS mnemonic, title).
pub const LIFECYCLE_PHASES: &[(LifecyclePhase, &str, &str, &str)] = &[
    (LifecyclePhase::Lc01, "LC01", "PRB", "Problem Statement"),
    (LifecyclePhase::Lc02, "LC02", "REQ", "System Requirements"),
    (LifecyclePhase::Lc03, "LC03", "SAF", "Safety & Reliability"),
    (LifecyclePhase::Lc04, "LC04", "DES", "Design Definition"),
    (LifecyclePhase::Lc05, "LC05", "ANA", "Analysis Models"),
    (LifecyclePhase::Lc06, "LC06", "VER", "Integration & Test"),
    (LifecyclePhase::Lc07, "LC07", "QAP", "QA & Process Compliance"),
    (LifecyclePhase::Lc08, "LC08", "CRT", "Certification"),
    (LifecyclePhase::Lc09, "LC09", "ESG", "ESG & Sustainability"),
    (LifecyclePhase::Lc10, "LC10", "IND", "Industrial & Supply Chain"),
    (LifecyclePhase::Lc11, "LC11", "OPC", "Operations Customization"),
    (LifecyclePhase::Lc12, "LC12", "MRO", "Continued Airworthiness & MRO"),
    (LifecyclePhase::Lc13, "LC13", "MSD", "Maintenance Source Data"),
    (LifecyclePhase::Lc14, "LC14", "EOL", "End of Life"),
];

/// Cross-cutting WBS mnemonic with no lifecycle phase (publications).
pub const CROSS_CUTTING_PHASE_CODE: &str = "PUB";

impl LifecyclePhase {
    /// All phases in canonical order.
    pub fn all() -> impl Iterator<Item = LifecyclePhase> {
        LIFECYCLE_PHASES.iter().map(|(phase, ..)| *phase)
    }

    fn row(self) -> &'static (LifecyclePhase, &'static str, &'static str, &'static str) {
        // The table is indexed by discriminant.
        &LIFECYCLE_PHASES[self as usize]
    }

    /// `LCnn` code.
    pub fn code(self) -> &'static str {
        self.row().1
    }

    /// Three-letter WBS mnemonic.
    pub fn mnemonic(self) -> &'static str {
        self.row().2
    }

    /// Human-readable phase title.
    pub fn title(self) -> &'static str {
        self.row().3
    }

    /// Ordinal 1..=14.
    pub fn number(self) -> u8 {
        self as u8 + 1
    }

    /// Look up a phase by its `LCnn` code.
    pub fn from_code(code: &str) -> Option<Self> {
        LIFECYCLE_PHASES
            .iter()
            .find(|(_, c, ..)| *c == code)
            .map(|(phase, ..)| *phase)
    }

    /// Look up a phase by its WBS mnemonic. `PUB` has no phase and yields `None`.
    pub fn from_mnemonic(mnemonic: &str) -> Option<Self> {
        LIFECYCLE_PHASES
            .iter()
            .find(|(_, _, m, _)| *m == mnemonic)
            .map(|(phase, ..)| *phase)
    }

    pub fn category(self) -> PhaseCategory {
        if self.number() <= 10 {
            PhaseCategory::ProgramLifecycle
        } else {
            PhaseCategory::Operations
        }
    }
}

impl fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for LifecyclePhase {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| format!("unknown lifecycle phase: {s}"))
    }
}

/// Whether `code` is a valid WBS phase mnemonic (the 14 phase mnemonics plus `PUB`).
pub fn is_wbs_phase_code(code: &str) -> bool {
    code == CROSS_CUTTING_PHASE_CODE || LifecyclePhase::from_mnemonic(code).is_some()
}

/// Partition of the lifecycle into program-lifecycle and operations phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseCategory {
    /// LC01–LC10
    ProgramLifecycle,
    /// LC11–LC14
    Operations,
}

impl PhaseCategory {
    /// Canonical storage root for artifacts of this category.
    pub fn storage_root(self) -> &'static str {
        match self {
            Self::ProgramLifecycle => "KDB/LM/SSOT/PLM",
            Self::Operations => "IDB/OPS/LM",
        }
    }

    pub fn short_code(self) -> &'static str {
        match self {
            Self::ProgramLifecycle => "PLM",
            Self::Operations => "OPS",
        }
    }
}

impl fmt::Display for PhaseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_code())
    }
}

/// OPT-IN framework axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    #[serde(rename = "O")]
    Organizations,
    #[serde(rename = "P")]
    Programs,
    #[serde(rename = "T")]
    Technologies,
    #[serde(rename = "I")]
    Infrastructures,
    #[serde(rename = "N")]
    NeuralNetworks,
}

/// Axis letter to permitted subdomain codes.
pub const SUBDOMAIN_CODES: &[(char, &[&str])] = &[
    ('O', &["A", "B"]),
    ('P', &["P", "S"]),
    (
        'T',
        &[
            "A", "M", "E1", "D", "I", "E2", "E3", "L1", "L2", "C1", "C2", "I2", "A2", "O", "P",
        ],
    ),
    ('I', &["M1", "M2", "O"]),
    ('N', &["D", "A", "P*"]),
];

/// Subdomains flagged as novel technology, regardless of axis.
pub const NOVEL_TECHNOLOGY_SUBDOMAINS: &[&str] = &["C2", "I2", "P"];

impl Axis {
    pub fn letter(self) -> char {
        match self {
            Self::Organizations => 'O',
            Self::Programs => 'P',
            Self::Technologies => 'T',
            Self::Infrastructures => 'I',
            Self::NeuralNetworks => 'N',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'O' => Some(Self::Organizations),
            'P' => Some(Self::Programs),
            'T' => Some(Self::Technologies),
            'I' => Some(Self::Infrastructures),
            'N' => Some(Self::NeuralNetworks),
            _ => None,
        }
    }

    /// Subdomain codes permitted under this axis.
    pub fn subdomains(self) -> &'static [&'static str] {
        let letter = self.letter();
        SUBDOMAIN_CODES
            .iter()
            .find(|(axis, _)| *axis == letter)
            .map(|(_, codes)| *codes)
            .unwrap_or(&[])
    }

    pub fn permits(self, subdomain: &str) -> bool {
        self.subdomains().contains(&subdomain)
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

pub fn is_novel_technology_subdomain(subdomain: &str) -> bool {
    NOVEL_TECHNOLOGY_SUBDOMAINS.contains(&subdomain)
}

/// Infrastructure pseudo-chapter.
pub const ATA_INFRASTRUCTURE: &str = "IN";

/// Highest numbered ATA chapter accepted.
pub const ATA_CHAPTER_MAX: u8 = 98;

/// `00`..=`98` or `IN`.
pub fn is_valid_ata_chapter(chapter: &str) -> bool {
    if chapter == ATA_INFRASTRUCTURE {
        return true;
    }
    is_two_digits(chapter) && chapter.parse::<u8>().is_ok_and(|n| n <= ATA_CHAPTER_MAX)
}

/// Section and subject codes: exactly two ASCII digits.
pub fn is_two_digits(code: &str) -> bool {
    code.len() == 2 && code.bytes().all(|b| b.is_ascii_digit())
}
