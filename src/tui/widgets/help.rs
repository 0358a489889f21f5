//! Help popup and the one-line key hint at the bottom of the screen.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use super::popup_area;
use crate::tui::style::Styles;

const KEYS: &[(&str, &str)] = &[
    ("↑/k ↓/j", "focus previous / next site"),
    ("←/→", "inspect previous / next check"),
    ("Home/End", "first check / follow latest"),
    ("r", "reload all sites now"),
    ("?/h", "toggle this help"),
    ("q", "quit"),
];

/// Renders the help popup centered on screen.
pub fn render_help(frame: &mut Frame, area: Rect, reload_after_secs: u64) {
    let popup_width = (area.width * 60 / 100).clamp(40, 64);
    let popup = popup_area(area, popup_width, KEYS.len() as u16 + 6);

    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Styles::popup_border());
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let chunks = Layout::vertical([
        Constraint::Min(1),    // Content
        Constraint::Length(1), // Footer
    ])
    .split(inner);

    let mut content: Vec<Line> = KEYS
        .iter()
        .map(|(key, desc)| {
            Line::from(vec![
                Span::styled(format!("{:>10}  ", key), Styles::popup_key()),
                Span::styled(*desc, Styles::popup_text()),
            ])
        })
        .collect();
    content.push(Line::from(""));
    content.push(Line::from(Span::styled(
        format!(
            "All sites are re-fetched {} min after the last reload.",
            reload_after_secs / 60
        ),
        Styles::dim(),
    )));
    frame.render_widget(Paragraph::new(content), chunks[0]);

    let footer = Paragraph::new(Line::from(vec![
        Span::styled("Press ", Styles::dim()),
        Span::styled("?", Styles::popup_key()),
        Span::styled(" or ", Styles::dim()),
        Span::styled("Esc", Styles::popup_key()),
        Span::styled(" to close", Styles::dim()),
    ]));
    frame.render_widget(footer, chunks[1]);
}

/// Renders the key hint line.
pub fn render_help_line(frame: &mut Frame, area: Rect) {
    let hints = [("q", "quit"), ("r", "reload"), ("↑↓", "site"), ("←→", "inspect"), ("?", "help")];
    let spans: Vec<Span> = hints
        .iter()
        .flat_map(|(key, label)| {
            vec![
                Span::styled(format!(" {}", key), Styles::help_key()),
                Span::styled(format!(" {} ", label), Styles::help()),
            ]
        })
        .collect();
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
