//! Header bar showing title, UTC time, load progress and reload countdown.

use std::time::Duration;

use chrono::{DateTime, Utc};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::widgets::Paragraph;

use crate::tui::style::Styles;

/// Values shown in the header.
pub struct HeaderInfo<'a> {
    pub title: &'a str,
    pub now: DateTime<Utc>,
    pub loaded: usize,
    pub total: usize,
    /// `None` when no reload is scheduled.
    pub reload_in: Option<Duration>,
    pub status_message: Option<&'a str>,
}

/// Renders the header bar.
pub fn render_header(frame: &mut Frame, area: Rect, info: &HeaderInfo) {
    let chunks = Layout::horizontal([
        Constraint::Min(16),    // Title
        Constraint::Length(25), // Time
        Constraint::Length(14), // Loaded
        Constraint::Length(18), // Reload countdown / status
    ])
    .split(area);

    frame.render_widget(
        Paragraph::new(format!(" {}", info.title)).style(Styles::header()),
        chunks[0],
    );

    let time_str = info.now.format("%Y-%m-%d %H:%M:%S UTC").to_string();
    frame.render_widget(Paragraph::new(time_str).style(Styles::header()), chunks[1]);

    let loaded = format!("{}/{} sites", info.loaded, info.total);
    frame.render_widget(Paragraph::new(loaded).style(Styles::header()), chunks[2]);

    let (right, style) = match info.status_message {
        Some(msg) => (msg.to_string(), Styles::status()),
        None => (
            match info.reload_in {
                Some(left) => format!("reload in {}", format_countdown(left)),
                None => "no reload".to_string(),
            },
            Styles::header(),
        ),
    };
    frame.render_widget(Paragraph::new(right).style(style), chunks[3]);
}

/// `mm:ss`, rounded up so the display never shows 00:00 before the reload.
pub fn format_countdown(left: Duration) -> String {
    let secs = left.as_secs() + u64::from(left.subsec_nanos() > 0);
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
