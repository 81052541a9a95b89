//! PBS to WBS linkage registry.
//!
//! Forward links are stored per PBS id in first-link order; the reverse
//! direction is answered by scanning the forward map.

use indexmap::IndexMap;

use crate::breakdown::pbs::PbsId;
use crate::breakdown::wbs::WbsId;
use crate::error::{RegistryError, RegistryResult};
use crate::obs;

/// Named store of PBS-WBS associations.
#[derive(Debug, Clone, Default)]
pub struct LinkageRegistry {
    name: String,
    links: IndexMap<String, Vec<String>>,
}

impl LinkageRegistry {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            links: IndexMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Record that `pbs_id` is produced by work package `wbs_id`.
    ///
    /// Both ids are parsed before anything is stored, so a rejected call
    /// leaves the registry untouched. Linking an existing pair is a no-op.
    pub fn link(&mut self, pbs_id: &str, wbs_id: &str) -> RegistryResult<()> {
        let pbs = PbsId::parse(pbs_id).ok_or_else(|| self.reject_pbs(pbs_id))?;
        let wbs = WbsId::parse(wbs_id).ok_or_else(|| self.reject_wbs(wbs_id))?;

        let pbs_key = pbs.to_string();
        let wbs_key = wbs.to_string();
        let targets = self.links.entry(pbs_key.clone()).or_default();
        let new = !targets.contains(&wbs_key);
        if new {
            targets.push(wbs_key.clone());
        }
        obs::emit_link_recorded(&self.name, &pbs_key, &wbs_key, new);
        Ok(())
    }

    /// WBS ids linked to `pbs_id`, in link order. Empty if none.
    pub fn wbs_for_pbs(&self, pbs_id: &str) -> &[String] {
        self.links.get(pbs_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// PBS ids linked to `wbs_id`, in PBS first-link order.
    pub fn pbs_for_wbs(&self, wbs_id: &str) -> Vec<&str> {
        self.links
            .iter()
            .filter(|(_, targets)| targets.iter().any(|w| w == wbs_id))
            .map(|(pbs, _)| pbs.as_str())
            .collect()
    }

    /// Snapshot of every PBS and its linked WBS ids.
    pub fn links(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.links
            .iter()
            .map(|(pbs, targets)| (pbs.as_str(), targets.as_slice()))
    }

    /// Number of PBS ids with at least one link.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    fn reject_pbs(&self, id: &str) -> RegistryError {
        let err = RegistryError::InvalidPbs {
            id: id.to_string(),
            registry: self.name.clone(),
        };
        obs::emit_link_rejected(&self.name, id, &err);
        err
    }

    fn reject_wbs(&self, id: &str) -> RegistryError {
        let err = RegistryError::InvalidWbs {
            id: id.to_string(),
            registry: self.name.clone(),
        };
        obs::emit_link_rejected(&self.name, id, &err);
        err
    }
}
