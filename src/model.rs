//! Data model shared by the registry, the feed and the chart projector.
//!
//! The check history documents are produced by an external checker and read
//! verbatim. Timestamps are kept as the raw strings the producer wrote and are
//! only parsed when a consumer needs a position on the time axis.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A monitored site as listed in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    /// Stable identifier, also the name of the feed document (`<id>.json`).
    pub id: String,
    /// Display name used as the card title.
    pub name: String,
    /// Public URL shown in the card footer.
    pub url: String,
}

/// One historical check result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckSample {
    /// Check time, RFC 3339.
    pub t: String,
    /// Whether the check considered the site up.
    pub ok: bool,
    /// HTTP-like status code returned by the check.
    pub code: u16,
    /// Response time in milliseconds.
    pub rt: f64,
}

impl CheckSample {
    /// Parses the sample timestamp. Returns `None` for malformed values.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.t)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    pub fn is_up(&self) -> bool {
        self.ok
    }
}

/// Full check history for one site, as served by the feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteCheckData {
    pub id: String,
    pub name: String,
    pub url: String,
    /// Samples in ascending time order (producer contract, not verified).
    #[serde(default)]
    pub checks: Vec<CheckSample>,
}

impl SiteCheckData {
    /// Most recent sample, if any.
    pub fn latest(&self) -> Option<&CheckSample> {
        self.checks.last()
    }
}
