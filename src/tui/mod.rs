//! Terminal User Interface for the status dashboard.
//!
//! One card per site with data, drawn as soon as that site's fetch resolves.

mod app;
mod event;
mod input;
mod render;
mod state;
mod style;
mod widgets;

pub use app::{App, AppConfig};
