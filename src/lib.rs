//! statusboard - terminal status dashboard for a static uptime feed.
//!
//! Provides:
//! - `registry` - the fixed list of monitored sites
//! - `model` - site and check history types
//! - `feed` - check history sources (HTTP feed)
//! - `poll` - concurrent per-site fetch passes
//! - `state` - client state keyed by site id
//! - `refresh` - one-shot reload timer
//! - `session` - sessions, full reloads and outcome merging
//! - `chart` - projection of checks onto a response time series
//! - `report` - plain-text summary for the one-shot mode
//! - `tui` - interactive dashboard (ratatui/crossterm)

pub mod chart;
pub mod feed;
pub mod model;
pub mod poll;
pub mod refresh;
pub mod registry;
pub mod report;
pub mod session;
pub mod state;
pub mod tui;
