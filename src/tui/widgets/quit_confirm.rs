//! Quit prompt.
//!
//! Tells the user how much of the current session would be lost: data is never
//! persisted, so the next start fetches every site again.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use super::popup_area;
use crate::tui::style::Styles;

/// Sizes of the session the prompt reports on.
pub struct QuitSummary {
    pub loaded: usize,
    pub total: usize,
}

pub fn render_quit_confirm(frame: &mut Frame, area: Rect, summary: &QuitSummary) {
    let popup = popup_area(area, 46, 8);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(Span::styled(" Quit statusboard? ", Styles::card_title()))
        .borders(Borders::ALL)
        .border_style(Styles::popup_border());
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let loaded = if summary.loaded == summary.total {
        format!("All {} sites loaded.", summary.total)
    } else {
        format!("{} of {} sites loaded.", summary.loaded, summary.total)
    };
    let content = vec![
        Line::from(Span::styled(loaded, Styles::popup_text())),
        Line::from(Span::styled(
            "Everything is fetched again on next start.",
            Styles::dim(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter", Styles::popup_key()),
            Span::styled("/", Styles::dim()),
            Span::styled("q", Styles::popup_key()),
            Span::styled(" quit   ", Styles::dim()),
            Span::styled("Esc", Styles::popup_key()),
            Span::styled("/", Styles::dim()),
            Span::styled("n", Styles::popup_key()),
            Span::styled(" stay", Styles::dim()),
        ]),
    ];

    frame.render_widget(
        Paragraph::new(content).alignment(Alignment::Center),
        inner,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::widgets::testing::buffer_text;
    use ratatui::{Terminal, backend::TestBackend};

    fn draw(width: u16, height: u16, summary: &QuitSummary) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).expect("failed to create terminal");
        terminal
            .draw(|f| render_quit_confirm(f, f.area(), summary))
            .expect("failed to draw");
        buffer_text(&terminal)
    }

    #[test]
    fn test_reports_partial_load() {
        let text = draw(80, 20, &QuitSummary { loaded: 2, total: 4 });
        assert!(text.contains("Quit statusboard?"));
        assert!(text.contains("2 of 4 sites loaded."));
        assert!(text.contains("Esc/n stay"));
    }

    #[test]
    fn test_reports_full_load() {
        let text = draw(80, 20, &QuitSummary { loaded: 4, total: 4 });
        assert!(text.contains("All 4 sites loaded."));
    }

    #[test]
    fn test_fits_tiny_terminal() {
        // Must not panic when the popup is larger than the screen.
        draw(12, 3, &QuitSummary { loaded: 0, total: 1 });
    }
}
