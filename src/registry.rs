//! Site registry: the fixed, ordered list of monitored sites.
//!
//! The default list is compiled into the binary from `sites.json`. A JSON file
//! with the same shape can replace it at startup (`--sites`).

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::model::Site;

/// Site list bundled at build time.
const BUNDLED_SITES: &str = include_str!("../sites.json");

/// Errors raised while loading the site list.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to read site list {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed site list: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate site id '{0}'")]
    DuplicateId(String),

    #[error("site #{index} has an empty '{field}'")]
    EmptyField { index: usize, field: &'static str },
}

/// Where the registry is loaded from. Re-read on every full reload.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RegistrySource {
    #[default]
    Bundled,
    File(PathBuf),
}

impl RegistrySource {
    pub fn load(&self) -> Result<SiteRegistry, RegistryError> {
        match self {
            RegistrySource::Bundled => SiteRegistry::bundled(),
            RegistrySource::File(path) => SiteRegistry::from_path(path),
        }
    }
}

/// Ordered, immutable list of sites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteRegistry {
    sites: Vec<Site>,
}

impl SiteRegistry {
    /// Registry compiled into the binary.
    pub fn bundled() -> Result<Self, RegistryError> {
        Self::from_json(BUNDLED_SITES)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Parses a JSON array of `{id, name, url}` records.
    ///
    /// Only the structure is checked: every field present and non-empty, ids
    /// unique. URLs are not validated.
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let sites: Vec<Site> = serde_json::from_str(json)?;
        Self::new(sites)
    }

    pub fn new(sites: Vec<Site>) -> Result<Self, RegistryError> {
        let mut seen = HashSet::with_capacity(sites.len());
        for (index, site) in sites.iter().enumerate() {
            for (field, value) in [("id", &site.id), ("name", &site.name), ("url", &site.url)] {
                if value.trim().is_empty() {
                    return Err(RegistryError::EmptyField { index, field });
                }
            }
            if !seen.insert(site.id.as_str()) {
                return Err(RegistryError::DuplicateId(site.id.clone()));
            }
        }
        Ok(Self { sites })
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    pub fn iter(&self) -> impl Iterator<Item = &Site> {
        self.sites.iter()
    }

    pub fn get(&self, id: &str) -> Option<&Site> {
        self.sites.iter().find(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }
}
