//! Error taxonomy for identifier construction and the stateful registries.
//!
//! Construction failures (`IdentError`) name the offending field. Parsers never
//! return these directly; see [`ParseOutcome`]. Registry failures
//! (`RegistryError`) name the offending id and the registry.

use std::fmt;

/// Identifier field that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdField {
    SerialNumber,
    AtaChapter,
    Section,
    Subject,
    LifecyclePhase,
    ArtifactType,
    Sequence,
    Axis,
    Subdomain,
    ItemName,
    PhaseCode,
    Hierarchy,
}

impl fmt::Display for IdField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::SerialNumber => "MSN",
            Self::AtaChapter => "ATA chapter",
            Self::Section => "section",
            Self::Subject => "subject",
            Self::LifecyclePhase => "LC phase",
            Self::ArtifactType => "artifact type",
            Self::Sequence => "sequence",
            Self::Axis => "axis",
            Self::Subdomain => "subdomain",
            Self::ItemName => "item name",
            Self::PhaseCode => "phase code",
            Self::Hierarchy => "hierarchy",
        };
        f.write_str(name)
    }
}

/// Identifier construction errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentError {
    #[error("invalid {field}: {value:?} ({reason})")]
    InvalidField {
        field: IdField,
        value: String,
        reason: String,
    },
}

impl IdentError {
    pub(crate) fn invalid(
        field: IdField,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidField {
            field,
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// The field that failed validation.
    pub fn field(&self) -> IdField {
        match self {
            Self::InvalidField { field, .. } => *field,
        }
    }
}

/// Result type for identifier construction.
pub type Result<T> = std::result::Result<T, IdentError>;

/// Errors raised by the sequence generator and the linkage registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("sequence exhausted for {key} in {registry}: counter already at 999")]
    SequenceExhausted { key: String, registry: String },

    #[error("invalid PBS ID {id:?} rejected by {registry}")]
    InvalidPbs { id: String, registry: String },

    #[error("invalid WBS ID {id:?} rejected by {registry}")]
    InvalidWbs { id: String, registry: String },

    #[error("identifier error: {0}")]
    Ident(#[from] IdentError),
}

/// Result type for registry operations.
pub type RegistryResult<T> = std::result::Result<T, RegistryError>;

/// Outcome of checking a string against an identifier grammar.
///
/// `parse()` collapses the two failure arms into `None`; callers that need to
/// tell a wrong shape from a well-shaped but invalid identifier use `check()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome<T> {
    Parsed(T),
    /// Input does not have the shape of the grammar.
    Malformed,
    /// Input has the right shape but a field fails validation.
    Invalid(IdentError),
}

impl<T> ParseOutcome<T> {
    pub fn ok(self) -> Option<T> {
        match self {
            Self::Parsed(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_parsed(&self) -> bool {
        matches!(self, Self::Parsed(_))
    }

    /// Human-readable failure reason, `None` on success.
    pub fn reason(&self) -> Option<String> {
        match self {
            Self::Parsed(_) => None,
            Self::Malformed => Some("does not match identifier grammar".to_string()),
            Self::Invalid(err) => Some(err.to_string()),
        }
    }

    pub(crate) fn from_construction(result: Result<T>) -> Self {
        match result {
            Ok(value) => Self::Parsed(value),
            Err(err) => Self::Invalid(err),
        }
    }
}
