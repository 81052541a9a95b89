//! AMPEL360 Q100 identifier grammar.
//!
//! Re-exports the identifier value types, their parsers, the sequence
//! generator and the PBS/WBS linkage registry.

pub mod artifact;
pub mod breakdown;
pub mod error;
pub mod linkage;
pub mod obs;
pub mod taxonomy;
pub mod telemetry;

pub use artifact::generator::{IdGenerator, SequenceKey};
pub use artifact::parser::{check_identifier, parse_identifier, validate_identifier};
pub use artifact::{create_identifier, ArtifactId, ArtifactIdBuilder, IdFormat};

pub use breakdown::pbs::{create_pbs_id, parse_pbs, PbsId};
pub use breakdown::wbs::{create_wbs_id, parse_wbs, WbsId};

pub use error::{IdField, IdentError, ParseOutcome, RegistryError, RegistryResult, Result};
pub use linkage::LinkageRegistry;

pub use taxonomy::{Axis, LifecyclePhase, PhaseCategory};

pub use obs::{
    emit_identifier_generated, emit_link_recorded, emit_link_rejected, emit_sequence_reset,
    RegistrySpan,
};
pub use telemetry::init_tracing;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
