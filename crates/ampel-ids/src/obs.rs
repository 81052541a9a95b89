//! Structured events for the stateful registries.
//!
//! This module provides:
//! - Registry-scoped tracing spans via the `RegistrySpan` RAII guard
//! - Emission functions for sequence allocation, counter resets and link decisions
//!
//! Accepted operations log at `info!`, rejections at `warn!`. Pure parsing and
//! formatting never log.

use tracing::{info, warn};

use crate::artifact::ArtifactId;

/// RAII guard that enters a span tagged with a registry name.
///
/// # Example
///
/// ```ignore
/// let _span = RegistrySpan::enter("ampel360-msn001");
/// // events emitted here carry registry = "ampel360-msn001"
/// ```
pub struct RegistrySpan {
    _span: tracing::span::EnteredSpan,
}

impl RegistrySpan {
    pub fn enter(registry: &str) -> Self {
        let span = tracing::info_span!("ampel.registry", registry = %registry);
        Self {
            _span: span.entered(),
        }
    }
}

/// Emit event: the generator produced an identifier.
///
/// `auto` is true when the sequence came from the per-key counter.
pub fn emit_identifier_generated(registry: &str, id: &ArtifactId, auto: bool) {
    info!(
        event = "identifier.generated",
        registry = %registry,
        id = %id,
        sequence = id.sequence(),
        auto = auto,
    );
}

/// Emit event: a sequence counter was reset.
pub fn emit_sequence_reset(registry: &str, key: &str) {
    info!(event = "sequence.reset", registry = %registry, key = %key);
}

/// Emit event: a PBS-WBS link was recorded (or was already present).
pub fn emit_link_recorded(registry: &str, pbs_id: &str, wbs_id: &str, new: bool) {
    info!(
        event = "link.recorded",
        registry = %registry,
        pbs_id = %pbs_id,
        wbs_id = %wbs_id,
        new = new,
    );
}

/// Emit event: a link request failed validation (warning level).
pub fn emit_link_rejected(registry: &str, id: &str, error: &dyn std::fmt::Display) {
    warn!(event = "link.rejected", registry = %registry, id = %id, error = %error);
}
