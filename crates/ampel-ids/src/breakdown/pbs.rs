//! Product Breakdown Structure identifiers.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::artifact::{validate_ata_chapter, validate_two_digit};
use crate::error::{IdField, IdentError, ParseOutcome, Result};
use crate::taxonomy::{self, Axis};

static PBS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^PBS-([OPTIN])([A-Z0-9*]+)-ATA([0-9]{2}|IN)-([0-9]{2})-([0-9]{2})-([A-Z0-9_]+)$",
    )
    .expect("pbs identifier regex")
});

/// Validated PBS identifier, e.g. `PBS-TC2-ATA28-10-00-CRYO_TANK_FWD`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PbsFields")]
pub struct PbsId {
    axis: Axis,
    subdomain: String,
    ata_chapter: String,
    section: String,
    subject: String,
    item_name: String,
}

#[derive(Deserialize)]
struct PbsFields {
    axis: String,
    subdomain: String,
    ata_chapter: String,
    section: String,
    subject: String,
    item_name: String,
}

impl TryFrom<PbsFields> for PbsId {
    type Error = IdentError;

    fn try_from(f: PbsFields) -> Result<Self> {
        Self::new(
            &f.axis,
            &f.subdomain,
            &f.ata_chapter,
            &f.section,
            &f.subject,
            &f.item_name,
        )
    }
}

impl PbsId {
    /// Validate and build. The subdomain must belong to the axis' own set; a
    /// code that is only valid under another axis is rejected.
    pub fn new(
        axis: &str,
        subdomain: &str,
        ata_chapter: &str,
        section: &str,
        subject: &str,
        item_name: &str,
    ) -> Result<Self> {
        let parsed_axis = single_char(axis)
            .and_then(Axis::from_letter)
            .ok_or_else(|| IdentError::invalid(IdField::Axis, axis, "must be O, P, T, I, or N"))?;

        if !parsed_axis.permits(subdomain) {
            return Err(IdentError::invalid(
                IdField::Subdomain,
                subdomain,
                format!(
                    "not permitted for axis '{}'; valid options: {:?}",
                    parsed_axis,
                    parsed_axis.subdomains()
                ),
            ));
        }

        validate_ata_chapter(ata_chapter)?;
        validate_two_digit(IdField::Section, section)?;
        validate_two_digit(IdField::Subject, subject)?;

        let item_ok = !item_name.is_empty()
            && item_name
                .bytes()
                .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'_');
        if !item_ok {
            return Err(IdentError::invalid(
                IdField::ItemName,
                item_name,
                "must be uppercase alphanumeric with underscores",
            ));
        }

        Ok(Self {
            axis: parsed_axis,
            subdomain: subdomain.to_string(),
            ata_chapter: ata_chapter.to_string(),
            section: section.to_string(),
            subject: subject.to_string(),
            item_name: item_name.to_string(),
        })
    }

    /// Shape match followed by construction.
    pub fn check(input: &str) -> ParseOutcome<Self> {
        let Some(caps) = PBS_RE.captures(input) else {
            return ParseOutcome::Malformed;
        };
        ParseOutcome::from_construction(Self::new(
            &caps[1], &caps[2], &caps[3], &caps[4], &caps[5], &caps[6],
        ))
    }

    pub fn parse(input: &str) -> Option<Self> {
        Self::check(input).ok()
    }

    pub fn validate(input: &str) -> bool {
        Self::check(input).is_parsed()
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn subdomain(&self) -> &str {
        &self.subdomain
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

    pub fn item_name(&self) -> &str {
        &self.item_name
    }

    pub fn is_novel_technology(&self) -> bool {
        taxonomy::is_novel_technology_subdomain(&self.subdomain)
    }

    /// `ATA{cc}-{ss}-{bb}` for joins against the ATA chapter system.
    pub fn ata_path(&self) -> String {
        format!("ATA{}-{}-{}", self.ata_chapter, self.section, self.subject)
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

impl fmt::Display for PbsId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PBS-{}{}-{}-{}",
            self.axis,
            self.subdomain,
            self.ata_path(),
            self.item_name
        )
    }
}

impl FromStr for PbsId {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match Self::check(s) {
            ParseOutcome::Parsed(id) => Ok(id),
            outcome => Err(outcome
                .reason()
                .unwrap_or_else(|| "unparseable PBS ID".to_string())),
        }
    }
}

/// Build a PBS identifier and return its string form.
pub fn create_pbs_id(
    axis: &str,
    subdomain: &str,
    ata_chapter: &str,
    section: &str,
    subject: &str,
    item_name: &str,
) -> Result<String> {
    PbsId::new(axis, subdomain, ata_chapter, section, subject, item_name).map(|id| id.to_string())
}

pub fn parse_pbs(input: &str) -> Option<PbsId> {
    PbsId::parse(input)
}
