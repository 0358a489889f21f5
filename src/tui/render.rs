//! Main rendering logic for TUI.

use std::time::Instant;

use chrono::{DateTime, Utc};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::widgets::Paragraph;

use crate::model::{Site, SiteCheckData};
use crate::session::Session;

use super::state::AppState;
use super::style::Styles;
use super::widgets::{
    CARD_HEIGHT, CardView, HeaderInfo, QuitSummary, render_card, render_header, render_help,
    render_help_line, render_quit_confirm,
};

/// Frame-independent inputs of a render pass.
pub struct RenderContext<'a> {
    pub title: &'a str,
    pub now: Instant,
    pub wall_clock: DateTime<Utc>,
    pub reload_after_secs: u64,
}

/// Sites that have data, in registry order. Sites still loading or whose
/// fetch failed are not part of the list.
pub fn loaded_cards(session: &Session) -> Vec<(&Site, &SiteCheckData)> {
    session.state().loaded_in(session.registry())
}

/// Main render function.
pub fn render(frame: &mut Frame, state: &AppState, session: &Session, ctx: &RenderContext) {
    let area = frame.area();
    let cards = loaded_cards(session);

    let chunks = Layout::vertical([
        Constraint::Length(1), // Header
        Constraint::Min(3),    // Cards
        Constraint::Length(1), // Key hints
    ])
    .split(area);

    render_header(
        frame,
        chunks[0],
        &HeaderInfo {
            title: ctx.title,
            now: ctx.wall_clock,
            loaded: cards.len(),
            total: session.registry().len(),
            reload_in: session.reload_in(ctx.now),
            status_message: state.status_message.as_deref(),
        },
    );

    render_cards(frame, chunks[1], state, &cards);
    render_help_line(frame, chunks[2]);

    if state.show_help {
        render_help(frame, area, ctx.reload_after_secs);
    }

    // Rendered last to overlay everything
    if state.show_quit_confirm {
        render_quit_confirm(
            frame,
            area,
            &QuitSummary {
                loaded: cards.len(),
                total: session.registry().len(),
            },
        );
    }
}

fn render_cards(frame: &mut Frame, area: Rect, state: &AppState, cards: &[(&Site, &SiteCheckData)]) {
    if cards.is_empty() {
        let waiting = Paragraph::new("Waiting for site data...")
            .alignment(Alignment::Center)
            .style(Styles::dim());
        frame.render_widget(waiting, area);
        return;
    }

    let (first, count) = visible_range(cards.len(), state.focused, area.height);
    for (slot, index) in (first..first + count).enumerate() {
        let (site, data) = cards[index];
        let y = area.y + slot as u16 * CARD_HEIGHT;
        let height = CARD_HEIGHT.min(area.bottom().saturating_sub(y));
        let card_area = Rect::new(area.x, y, area.width, height);

        let focused = index == state.focused;
        let inspected = if focused {
            state.inspected(data.checks.len())
        } else {
            None
        };
        render_card(
            frame,
            card_area,
            &CardView {
                site,
                checks: &data.checks,
                focused,
                inspected,
            },
        );
    }
}

/// First card index and number of cards to draw so the focused card is visible.
fn visible_range(cards: usize, focused: usize, height: u16) -> (usize, usize) {
    let fits = usize::from((height / CARD_HEIGHT).max(1));
    let focused = focused.min(cards.saturating_sub(1));
    let first = if focused < fits { 0 } else { focused + 1 - fits };
    (first, fits.min(cards - first))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poll::FetchOutcome;
    use crate::poll::testing::{doc, registry};
    use crate::tui::widgets::testing::buffer_text;
    use ratatui::{Terminal, backend::TestBackend};
    use std::time::Duration;

    fn outcome(id: &str, rts: &[f64]) -> FetchOutcome {
        FetchOutcome {
            generation: 1,
            site_id: id.to_string(),
            result: Ok(doc(id, rts)),
            elapsed: Duration::ZERO,
        }
    }

    fn draw(session: &Session, state: &AppState, height: u16) -> String {
        let backend = TestBackend::new(90, height);
        let mut terminal = Terminal::new(backend).expect("failed to create terminal");
        let ctx = RenderContext {
            title: "Status",
            now: Instant::now(),
            wall_clock: Utc::now(),
            reload_after_secs: 600,
        };
        terminal
            .draw(|f| render(f, state, session, &ctx))
            .expect("failed to draw");
        buffer_text(&terminal)
    }

    #[test]
    fn test_only_loaded_sites_get_cards() {
        let now = Instant::now();
        let mut session = Session::new(1, registry(&["web", "api", "docs"]), now, Duration::from_secs(600));
        session.apply(outcome("api", &[120.0, 340.0]));
        session.apply(outcome("docs", &[]));
        session.apply(FetchOutcome {
            generation: 1,
            site_id: "web".to_string(),
            result: Err(crate::feed::FetchError::Http {
                url: url::Url::parse("http://mock/web.json").unwrap(),
                status: 500,
            }),
            elapsed: Duration::ZERO,
        });

        let text = draw(&session, &AppState::new(), 2 + 2 * CARD_HEIGHT);
        assert!(text.contains(" API "));
        assert!(text.contains("https://api.example"));
        assert!(text.contains(" DOCS "));
        assert!(text.contains("https://docs.example"));
        assert!(!text.contains(" WEB "));
        assert!(!text.contains("https://web.example"));
        assert!(text.contains("2/3 sites"));
    }

    #[test]
    fn test_waiting_before_any_data() {
        let session = Session::new(1, registry(&["web"]), Instant::now(), Duration::from_secs(600));
        let text = draw(&session, &AppState::new(), 20);
        assert!(text.contains("Waiting for site data..."));
        assert!(text.contains("0/1 sites"));
    }

    #[test]
    fn test_popups_render() {
        let session = Session::new(1, registry(&["web"]), Instant::now(), Duration::from_secs(600));
        let state = AppState {
            show_help: true,
            ..AppState::default()
        };
        assert!(draw(&session, &state, 20).contains("Help"));

        let state = AppState {
            show_quit_confirm: true,
            ..AppState::default()
        };
        assert!(draw(&session, &state, 20).contains("0 of 1 sites loaded."));
    }

    #[test]
    fn test_visible_range_follows_focus() {
        // 30 rows fit two cards.
        assert_eq!(visible_range(5, 0, 30), (0, 2));
        assert_eq!(visible_range(5, 1, 30), (0, 2));
        assert_eq!(visible_range(5, 2, 30), (1, 2));
        assert_eq!(visible_range(5, 4, 30), (3, 2));
        assert_eq!(visible_range(1, 0, 30), (0, 1));
        // Too small for a whole card still shows one.
        assert_eq!(visible_range(3, 2, 5), (2, 1));
    }
}
