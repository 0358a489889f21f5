//! Client state: the latest check history per registered site.
//!
//! The only mutation is `merge`, which inserts or replaces one site's entry as
//! a whole. Entries are never removed individually; a full reload discards the
//! container and starts a new one.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::model::{Site, SiteCheckData};
use crate::registry::SiteRegistry;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("site '{0}' is not in the registry")]
    UnknownSite(String),
}

/// Result of a successful merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// First data for this site in the session.
    Inserted,
    /// Previous entry replaced with a different document.
    Replaced,
    /// Document equal to the one already stored.
    Unchanged,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClientState {
    known: HashSet<String>,
    entries: HashMap<String, SiteCheckData>,
}

impl ClientState {
    /// Empty state accepting only the ids of `registry`.
    pub fn new(registry: &SiteRegistry) -> Self {
        Self {
            known: registry.iter().map(|s| s.id.clone()).collect(),
            entries: HashMap::new(),
        }
    }

    /// Stores `data` under `data.id`, replacing any previous entry.
    ///
    /// Other entries are left untouched, so merges for different sites commute.
    pub fn merge(&mut self, data: SiteCheckData) -> Result<MergeOutcome, StateError> {
        if !self.known.contains(&data.id) {
            return Err(StateError::UnknownSite(data.id));
        }
        let outcome = match self.entries.get(&data.id) {
            None => MergeOutcome::Inserted,
            Some(prev) if *prev == data => MergeOutcome::Unchanged,
            Some(_) => MergeOutcome::Replaced,
        };
        self.entries.insert(data.id.clone(), data);
        Ok(outcome)
    }

    pub fn get(&self, id: &str) -> Option<&SiteCheckData> {
        self.entries.get(id)
    }

    pub fn is_loaded(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Loaded entries paired with their site, in registry order.
    pub fn loaded_in<'a>(
        &'a self,
        registry: &'a SiteRegistry,
    ) -> Vec<(&'a Site, &'a SiteCheckData)> {
        registry
            .iter()
            .filter_map(|site| self.entries.get(&site.id).map(|data| (site, data)))
            .collect()
    }
}
