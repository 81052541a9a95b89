//! Artifact identifiers.
//!
//! An artifact identifier names one lifecycle-phase-scoped record:
//!
//! ```text
//! AMPEL360_Q100_MSN001_ATA28-10-00_LC02_REQ_001
//!               ^^^^^^    ^^ ^^ ^^ ^^^^ ^^^ ^^^
//!               serial    chapter  phase type sequence
//!                            section/subject
//! ```
//!
//! The same seven fields serialize as compact, hyphenated, or URN text; see
//! [`IdFormat`]. Parsing lives in [`parser`], sequence allocation in
//! [`generator`].

pub mod generator;
pub mod parser;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{IdField, IdentError, Result};
use crate::taxonomy::{self, LifecyclePhase, PhaseCategory};

/// Program prefix shared by every serialization.
pub const PROGRAM: &str = "AMPEL360";
/// Aircraft model token.
pub const MODEL: &str = "Q100";

pub const SEQUENCE_MIN: u16 = 1;
pub const SEQUENCE_MAX: u16 = 999;

/// Textual encoding of an [`ArtifactId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdFormat {
    /// `AMPEL360_Q100_MSN001_ATA25-10-00_LC02_REQ_001`
    Compact,
    /// `AMPEL360-Q100-MSN001-ATA25-10-00-LC02-REQ-001`
    Hyphenated,
    /// `urn:ampel360:q100:msn001:ata25-10-00:lc02:req:001`
    Urn,
}

impl IdFormat {
    pub const ALL: [IdFormat; 3] = [IdFormat::Compact, IdFormat::Hyphenated, IdFormat::Urn];

    /// Detect the format from the structural prefix alone.
    pub fn detect(input: &str) -> Option<Self> {
        if input.starts_with("AMPEL360_") {
            Some(Self::Compact)
        } else if input.starts_with("AMPEL360-") {
            Some(Self::Hyphenated)
        } else if input.starts_with("urn:ampel360:") {
            Some(Self::Urn)
        } else {
            None
        }
    }
}

impl fmt::Display for IdFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compact => write!(f, "compact"),
            Self::Hyphenated => write!(f, "hyphenated"),
            Self::Urn => write!(f, "urn"),
        }
    }
}

impl FromStr for IdFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "compact" => Ok(Self::Compact),
            "hyphenated" => Ok(Self::Hyphenated),
            "urn" => Ok(Self::Urn),
            other => Err(format!("unknown identifier format: {other}")),
        }
    }
}

/// Validated artifact identifier. Immutable once constructed.
///
/// Deserializing runs the same checks as [`ArtifactId::new`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ArtifactIdFields")]
pub struct ArtifactId {
    serial_number: String,
    ata_chapter: String,
    section: String,
    subject: String,
    lifecycle_phase: LifecyclePhase,
    artifact_type: String,
    sequence: u16,
}

#[derive(Deserialize)]
struct ArtifactIdFields {
    serial_number: String,
    ata_chapter: String,
    section: String,
    subject: String,
    lifecycle_phase: String,
    artifact_type: String,
    sequence: u16,
}

impl TryFrom<ArtifactIdFields> for ArtifactId {
    type Error = IdentError;

    fn try_from(f: ArtifactIdFields) -> Result<Self> {
        Self::new(
            &f.serial_number,
            &f.ata_chapter,
            &f.section,
            &f.subject,
            &f.lifecycle_phase,
            &f.artifact_type,
            f.sequence,
        )
    }
}

impl ArtifactId {
    /// Validate all seven fields and build the identifier.
    ///
    /// Fields are checked in order: serial number, ATA chapter, section,
    /// subject, lifecycle phase, artifact type, sequence. The first failure is
    /// returned.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        serial_number: &str,
        ata_chapter: &str,
        section: &str,
        subject: &str,
        lifecycle_phase: &str,
        artifact_type: &str,
        sequence: u16,
    ) -> Result<Self> {
        validate_serial_number(serial_number)?;
        validate_ata_chapter(ata_chapter)?;
        validate_two_digit(IdField::Section, section)?;
        validate_two_digit(IdField::Subject, subject)?;
        let phase = LifecyclePhase::from_code(lifecycle_phase).ok_or_else(|| {
            IdentError::invalid(
                IdField::LifecyclePhase,
                lifecycle_phase,
                "expected one of LC01..LC14",
            )
        })?;
        validate_artifact_type(artifact_type)?;
        validate_sequence(sequence)?;

        Ok(Self {
            serial_number: serial_number.to_string(),
            ata_chapter: ata_chapter.to_string(),
            section: section.to_string(),
            subject: subject.to_string(),
            lifecycle_phase: phase,
            artifact_type: artifact_type.to_string(),
            sequence,
        })
    }

    /// Start a builder with the mandatory fields; section and subject default
    /// to `00`, sequence to `001`.
    pub fn builder(
        serial_number: &str,
        ata_chapter: &str,
        lifecycle_phase: &str,
        artifact_type: &str,
    ) -> ArtifactIdBuilder {
        ArtifactIdBuilder {
            serial_number: serial_number.to_string(),
            ata_chapter: ata_chapter.to_string(),
            section: "00".to_string(),
            subject: "00".to_string(),
            lifecycle_phase: lifecycle_phase.to_string(),
            artifact_type: artifact_type.to_string(),
            sequence: SEQUENCE_MIN,
        }
    }

    /// Same identifier with a different sequence number.
    pub fn with_sequence(&self, sequence: u16) -> Result<Self> {
        validate_sequence(sequence)?;
        Ok(Self {
            sequence,
            ..self.clone()
        })
    }

    pub fn serial_number(&self) -> &str {
        &self.serial_number
    }

    pub fn ata_chapter(&self) -> &str {
        &self.ata_chapter
    }

    pub fn section(&self) -> &str {
        &self.section
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn lifecycle_phase(&self) -> LifecyclePhase {
        self.lifecycle_phase
    }

    pub fn artifact_type(&self) -> &str {
        &self.artifact_type
    }

    pub fn sequence(&self) -> u16 {
        self.sequence
    }

    /// Zero-padded three-digit sequence, e.g. `"007"`.
    pub fn sequence_str(&self) -> String {
        format!("{:03}", self.sequence)
    }

    pub fn phase_category(&self) -> PhaseCategory {
        self.lifecycle_phase.category()
    }

    /// Root directory under which this artifact is stored.
    pub fn storage_root(&self) -> &'static str {
        self.phase_category().storage_root()
    }

    pub fn to_compact(&self) -> String {
        format!(
            "{PROGRAM}_{MODEL}_{}_ATA{}-{}-{}_{}_{}_{:03}",
            self.serial_number,
            self.ata_chapter,
            self.section,
            self.subject,
            self.lifecycle_phase,
            self.artifact_type,
            self.sequence
        )
    }

    pub fn to_hyphenated(&self) -> String {
        format!(
            "{PROGRAM}-{MODEL}-{}-ATA{}-{}-{}-{}-{}-{:03}",
            self.serial_number,
            self.ata_chapter,
            self.section,
            self.subject,
            self.lifecycle_phase,
            self.artifact_type,
            self.sequence
        )
    }

    pub fn to_urn(&self) -> String {
        format!(
            "urn:{}:{}:{}:ata{}-{}-{}:{}:{}:{:03}",
            PROGRAM.to_lowercase(),
            MODEL.to_lowercase(),
            self.serial_number.to_lowercase(),
            self.ata_chapter.to_lowercase(),
            self.section,
            self.subject,
            self.lifecycle_phase.code().to_lowercase(),
            self.artifact_type.to_lowercase(),
            self.sequence
        )
    }

    pub fn to_format(&self, format: IdFormat) -> String {
        match format {
            IdFormat::Compact => self.to_compact(),
            IdFormat::Hyphenated => self.to_hyphenated(),
            IdFormat::Urn => self.to_urn(),
        }
    }
}

impl fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_compact())
    }
}

impl FromStr for ArtifactId {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match parser::check_identifier(s) {
            crate::error::ParseOutcome::Parsed(id) => Ok(id),
            outcome => Err(outcome
                .reason()
                .unwrap_or_else(|| "unparseable identifier".to_string())),
        }
    }
}

/// Builder for [`ArtifactId`] applying the `00` / `001` defaults.
#[derive(Debug, Clone)]
pub struct ArtifactIdBuilder {
    serial_number: String,
    ata_chapter: String,
    section: String,
    subject: String,
    lifecycle_phase: String,
    artifact_type: String,
    sequence: u16,
}

impl ArtifactIdBuilder {
    pub fn section(mut self, section: &str) -> Self {
        self.section = section.to_string();
        self
    }

    pub fn subject(mut self, subject: &str) -> Self {
        self.subject = subject.to_string();
        self
    }

    pub fn sequence(mut self, sequence: u16) -> Self {
        self.sequence = sequence;
        self
    }

    pub fn build(self) -> Result<ArtifactId> {
        ArtifactId::new(
            &self.serial_number,
            &self.ata_chapter,
            &self.section,
            &self.subject,
            &self.lifecycle_phase,
            &self.artifact_type,
            self.sequence,
        )
    }
}

/// Build an identifier and serialize it in one step.
#[allow(clippy::too_many_arguments)]
pub fn create_identifier(
    serial_number: &str,
    ata_chapter: &str,
    section: &str,
    subject: &str,
    lifecycle_phase: &str,
    artifact_type: &str,
    sequence: u16,
    format: IdFormat,
) -> Result<String> {
    let id = ArtifactId::new(
        serial_number,
        ata_chapter,
        section,
        subject,
        lifecycle_phase,
        artifact_type,
        sequence,
    )?;
    Ok(id.to_format(format))
}

fn validate_serial_number(serial: &str) -> Result<()> {
    let digits = serial.strip_prefix("MSN").unwrap_or("");
    if digits.len() == 3 && digits.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(IdentError::invalid(
            IdField::SerialNumber,
            serial,
            "expected MSN followed by 3 digits",
        ))
    }
}

pub(crate) fn validate_ata_chapter(chapter: &str) -> Result<()> {
    if taxonomy::is_valid_ata_chapter(chapter) {
        Ok(())
    } else {
        Err(IdentError::invalid(
            IdField::AtaChapter,
            chapter,
            "must be between 00 and 98, or 'IN'",
        ))
    }
}

pub(crate) fn validate_two_digit(field: IdField, code: &str) -> Result<()> {
    if taxonomy::is_two_digits(code) {
        Ok(())
    } else {
        Err(IdentError::invalid(field, code, "expected 2 digits"))
    }
}

/// Uppercase alphanumeric segments joined by single hyphens, e.g. `REQ-TRC`.
fn validate_artifact_type(artifact_type: &str) -> Result<()> {
    let well_formed = !artifact_type.is_empty()
        && artifact_type.split('-').all(|segment| {
            !segment.is_empty()
                && segment
                    .bytes()
                    .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
        });
    if well_formed {
        Ok(())
    } else {
        Err(IdentError::invalid(
            IdField::ArtifactType,
            artifact_type,
            "expected uppercase alphanumeric segments joined by '-'",
        ))
    }
}

pub(crate) fn validate_sequence(sequence: u16) -> Result<()> {
    if (SEQUENCE_MIN..=SEQUENCE_MAX).contains(&sequence) {
        Ok(())
    } else {
        Err(IdentError::invalid(
            IdField::Sequence,
            sequence.to_string(),
            "sequence must be 1-999",
        ))
    }
}
