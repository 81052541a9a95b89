//! Work Breakdown Structure identifiers.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::error::{IdField, IdentError, ParseOutcome, Result};
use crate::taxonomy::{self, LifecyclePhase};

static WBS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^WBS-([A-Z]{3})-([0-9]+(?:\.[0-9]+)*)$").expect("wbs identifier regex")
});

/// Validated WBS identifier, e.g. `WBS-DES-2.3.1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "WbsFields")]
pub struct WbsId {
    phase_code: String,
    hierarchy: String,
}

#[derive(Deserialize)]
struct WbsFields {
    phase_code: String,
    hierarchy: String,
}

impl TryFrom<WbsFields> for WbsId {
    type Error = IdentError;

    fn try_from(f: WbsFields) -> Result<Self> {
        Self::new(&f.phase_code, &f.hierarchy)
    }
}

impl WbsId {
    /// `phase_code` is one of the fourteen phase mnemonics or `PUB`;
    /// `hierarchy` is dot-separated decimal components.
    pub fn new(phase_code: &str, hierarchy: &str) -> Result<Self> {
        if !taxonomy::is_wbs_phase_code(phase_code) {
            return Err(IdentError::invalid(
                IdField::PhaseCode,
                phase_code,
                "expected a lifecycle mnemonic (PRB..EOL) or PUB",
            ));
        }

        let well_formed = hierarchy
            .split('.')
            .all(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()));
        if !well_formed {
            return Err(IdentError::invalid(
                IdField::Hierarchy,
                hierarchy,
                "expected dot-separated decimal components",
            ));
        }

        Ok(Self {
            phase_code: phase_code.to_string(),
            hierarchy: hierarchy.to_string(),
        })
    }

    /// WBS root for a lifecycle phase, keyed by its mnemonic.
    pub fn for_phase(phase: LifecyclePhase, hierarchy: &str) -> Result<Self> {
        Self::new(phase.mnemonic(), hierarchy)
    }

    pub fn check(input: &str) -> ParseOutcome<Self> {
        let Some(caps) = WBS_RE.captures(input) else {
            return ParseOutcome::Malformed;
        };
        ParseOutcome::from_construction(Self::new(&caps[1], &caps[2]))
    }

    pub fn parse(input: &str) -> Option<Self> {
        Self::check(input).ok()
    }

    pub fn validate(input: &str) -> bool {
        Self::check(input).is_parsed()
    }

    pub fn phase_code(&self) -> &str {
        &self.phase_code
    }

    pub fn hierarchy(&self) -> &str {
        &self.hierarchy
    }

    /// Depth in the tree: `1` for `WBS-DES-2`, `3` for `WBS-DES-2.3.1`.
    pub fn level(&self) -> usize {
        self.hierarchy.split('.').count()
    }

    /// The enclosing work package, `None` at the top level.
    pub fn parent(&self) -> Option<Self> {
        let (head, _) = self.hierarchy.rsplit_once('.')?;
        Some(Self {
            phase_code: self.phase_code.clone(),
            hierarchy: head.to_string(),
        })
    }

    /// Lifecycle phase this work package belongs to. `PUB` has none.
    pub fn lifecycle_phase(&self) -> Option<LifecyclePhase> {
        LifecyclePhase::from_mnemonic(&self.phase_code)
    }
}

impl fmt::Display for WbsId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WBS-{}-{}", self.phase_code, self.hierarchy)
    }
}

impl FromStr for WbsId {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match Self::check(s) {
            ParseOutcome::Parsed(id) => Ok(id),
            outcome => Err(outcome
                .reason()
                .unwrap_or_else(|| "unparseable WBS ID".to_string())),
        }
    }
}

/// Build a WBS identifier from a lifecycle phase code (`LC04`) and hierarchy.
pub fn create_wbs_id(lc_phase: &str, hierarchy: &str) -> Result<String> {
    let phase = LifecyclePhase::from_code(lc_phase).ok_or_else(|| {
        IdentError::invalid(IdField::LifecyclePhase, lc_phase, "must be LC01-LC14")
    })?;
    WbsId::for_phase(phase, hierarchy).map(|id| id.to_string())
}

pub fn parse_wbs(input: &str) -> Option<WbsId> {
    WbsId::parse(input)
}
