//! Per-key sequence allocation for artifact identifiers.
//!
//! The generator is a plain value owned by the caller's session. It holds no
//! lock; concurrent use must be serialized by the owner.

use std::collections::HashMap;
use std::fmt;

use super::{ArtifactId, SEQUENCE_MAX};
use crate::error::{RegistryError, RegistryResult};
use crate::obs;

/// Counter key: every identifier field except the sequence itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SequenceKey {
    pub serial_number: String,
    pub ata_chapter: String,
    pub section: String,
    pub subject: String,
    pub lifecycle_phase: String,
    pub artifact_type: String,
}

impl SequenceKey {
    pub fn new(
        serial_number: &str,
        ata_chapter: &str,
        section: &str,
        subject: &str,
        lifecycle_phase: &str,
        artifact_type: &str,
    ) -> Self {
        Self {
            serial_number: serial_number.to_string(),
            ata_chapter: ata_chapter.to_string(),
            section: section.to_string(),
            subject: subject.to_string(),
            lifecycle_phase: lifecycle_phase.to_string(),
            artifact_type: artifact_type.to_string(),
        }
    }

    /// Key of an existing identifier.
    pub fn of(id: &ArtifactId) -> Self {
        Self::new(
            id.serial_number(),
            id.ata_chapter(),
            id.section(),
            id.subject(),
            id.lifecycle_phase().code(),
            id.artifact_type(),
        )
    }

    fn build(&self, sequence: u16) -> crate::error::Result<ArtifactId> {
        ArtifactId::new(
            &self.serial_number,
            &self.ata_chapter,
            &self.section,
            &self.subject,
            &self.lifecycle_phase,
            &self.artifact_type,
            sequence,
        )
    }
}

impl fmt::Display for SequenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/ATA{}-{}-{}/{}/{}",
            self.serial_number,
            self.ata_chapter,
            self.section,
            self.subject,
            self.lifecycle_phase,
            self.artifact_type
        )
    }
}

/// In-memory sequence allocator.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    name: String,
    counters: HashMap<SequenceKey, u16>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::named("default")
    }

    /// Generator with a name used in log events and errors.
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            counters: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Allocate the next sequence for `key`, or use `sequence` verbatim.
    ///
    /// An explicit sequence bypasses the counter and leaves it untouched. The
    /// counter only advances once the identifier has validated, so a rejected
    /// request never consumes a number.
    pub fn generate(
        &mut self,
        key: &SequenceKey,
        sequence: Option<u16>,
    ) -> RegistryResult<ArtifactId> {
        if let Some(explicit) = sequence {
            let id = key.build(explicit)?;
            obs::emit_identifier_generated(&self.name, &id, false);
            return Ok(id);
        }

        let current = self.current_sequence(key);
        if current >= SEQUENCE_MAX {
            return Err(RegistryError::SequenceExhausted {
                key: key.to_string(),
                registry: self.name.clone(),
            });
        }

        let id = key.build(current + 1)?;
        self.counters.insert(key.clone(), id.sequence());
        obs::emit_identifier_generated(&self.name, &id, true);
        Ok(id)
    }

    /// Convenience over [`generate`](Self::generate) taking the six key fields.
    #[allow(clippy::too_many_arguments)]
    pub fn generate_for(
        &mut self,
        serial_number: &str,
        ata_chapter: &str,
        section: &str,
        subject: &str,
        lifecycle_phase: &str,
        artifact_type: &str,
        sequence: Option<u16>,
    ) -> RegistryResult<ArtifactId> {
        let key = SequenceKey::new(
            serial_number,
            ata_chapter,
            section,
            subject,
            lifecycle_phase,
            artifact_type,
        );
        self.generate(&key, sequence)
    }

    /// Last sequence allocated for `key`, 0 if none.
    pub fn current_sequence(&self, key: &SequenceKey) -> u16 {
        self.counters.get(key).copied().unwrap_or(0)
    }

    /// Zero the counter for exactly this key.
    pub fn reset_sequence(&mut self, key: &SequenceKey) {
        self.counters.remove(key);
        obs::emit_sequence_reset(&self.name, &key.to_string());
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
