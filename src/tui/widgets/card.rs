//! Site card: title, response time chart, inspection line and URL footer.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph};

use crate::chart::{self, ChartSeries};
use crate::model::{CheckSample, Site};
use crate::tui::style::Styles;

/// Rows a card needs to show a readable chart.
pub const CARD_HEIGHT: u16 = 12;

/// Everything needed to draw one card.
pub struct CardView<'a> {
    pub site: &'a Site,
    pub checks: &'a [CheckSample],
    pub focused: bool,
    /// Inspected sample index, only meaningful for the focused card.
    pub inspected: Option<usize>,
}

/// Renders a site card.
pub fn render_card(frame: &mut Frame, area: Rect, view: &CardView) {
    let block = Block::default()
        .title(Line::styled(format!(" {} ", view.site.name), Styles::card_title()))
        .borders(Borders::ALL)
        .border_style(Styles::card_border(view.focused));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::vertical([
        Constraint::Min(3),    // Chart
        Constraint::Length(1), // Inspection
        Constraint::Length(1), // Footer link
    ])
    .split(inner);

    let series = chart::project(view.checks);
    let inspected = if view.focused { view.inspected } else { None };
    render_chart(frame, chunks[0], &series, view.checks, inspected);

    let tooltip = inspected
        .and_then(|i| chart::tooltip(view.checks, i))
        .unwrap_or_default();
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(tooltip, Styles::cursor()))),
        chunks[1],
    );

    let footer = Line::from(Span::styled(view.site.url.as_str(), Styles::link()));
    frame.render_widget(Paragraph::new(footer), chunks[2]);
}

/// Chart position of the inspected sample, on the same scale as the plotted points.
fn cursor_point(checks: &[CheckSample], inspected: Option<usize>) -> Option<(f64, f64)> {
    let sample = checks.get(inspected?)?;
    sample.timestamp().map(|ts| (chart::unix_secs(ts), sample.rt))
}

fn render_chart(
    frame: &mut Frame,
    area: Rect,
    series: &ChartSeries,
    checks: &[CheckSample],
    inspected: Option<usize>,
) {
    if area.width < 10 || area.height < 3 {
        return;
    }
    let cursor: Vec<(f64, f64)> = cursor_point(checks, inspected).into_iter().collect();

    let mut datasets = vec![
        Dataset::default()
            .marker(Marker::Braille)
            .graph_type(GraphType::Bar)
            .style(Styles::response_area())
            .data(&series.points),
        Dataset::default()
            .name("Response")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Styles::response_line())
            .data(&series.points),
    ];
    if !cursor.is_empty() {
        datasets.push(
            Dataset::default()
                .marker(Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(Styles::cursor())
                .data(&cursor),
        );
    }

    let mut x_axis = Axis::default()
        .style(Styles::dim())
        .bounds(series.x_bounds);
    if !series.x_labels.is_empty() {
        x_axis = x_axis.labels(series.x_labels.iter().map(String::as_str));
    }
    let y_axis = Axis::default()
        .style(Styles::dim())
        .bounds(series.y_bounds)
        .labels(series.y_labels.iter().map(String::as_str));

    let chart = Chart::new(datasets)
        .x_axis(x_axis)
        .y_axis(y_axis)
        .legend_position(None);
    frame.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::widgets::testing::buffer_text;
    use ratatui::{Terminal, backend::TestBackend};

    fn site() -> Site {
        Site {
            id: "api".to_string(),
            name: "Public API".to_string(),
            url: "https://api.example.com".to_string(),
        }
    }

    fn checks() -> Vec<CheckSample> {
        vec![
            CheckSample {
                t: "2024-01-01T00:00:00Z".to_string(),
                ok: true,
                code: 200,
                rt: 120.0,
            },
            CheckSample {
                t: "2024-01-01T00:10:00Z".to_string(),
                ok: true,
                code: 200,
                rt: 340.0,
            },
        ]
    }

    fn draw(view: &CardView) -> String {
        let backend = TestBackend::new(80, CARD_HEIGHT);
        let mut terminal = Terminal::new(backend).expect("failed to create terminal");
        terminal
            .draw(|f| render_card(f, f.area(), view))
            .expect("failed to draw");
        buffer_text(&terminal)
    }

    #[test]
    fn test_card_has_title_and_link() {
        let site = site();
        let checks = checks();
        let text = draw(&CardView {
            site: &site,
            checks: &checks,
            focused: false,
            inspected: None,
        });
        assert!(text.contains("Public API"));
        assert!(text.contains("https://api.example.com"));
        assert!(!text.contains("Jan 1, 00:10  340ms"));
    }

    #[test]
    fn test_focused_card_shows_tooltip() {
        let site = site();
        let checks = checks();
        let text = draw(&CardView {
            site: &site,
            checks: &checks,
            focused: true,
            inspected: Some(1),
        });
        assert!(text.contains("Jan 1, 00:10  340ms"));
    }

    #[test]
    fn test_cursor_sits_on_plotted_point() {
        let checks = vec![CheckSample {
            t: "2024-01-01T00:00:00.250Z".to_string(),
            ok: true,
            code: 200,
            rt: 80.0,
        }];
        let series = chart::project(&checks);
        assert_eq!(cursor_point(&checks, Some(0)), Some(series.points[0]));
        assert_eq!(cursor_point(&checks, Some(1)), None);
        assert_eq!(cursor_point(&checks, None), None);
    }

    #[test]
    fn test_empty_checks_render() {
        let site = site();
        let text = draw(&CardView {
            site: &site,
            checks: &[],
            focused: true,
            inspected: None,
        });
        assert!(text.contains("Public API"));
        assert!(text.contains("https://api.example.com"));
    }

    #[test]
    fn test_tiny_area_does_not_panic() {
        let site = site();
        let checks = checks();
        let backend = TestBackend::new(10, 3);
        let mut terminal = Terminal::new(backend).expect("failed to create terminal");
        terminal
            .draw(|f| {
                render_card(
                    f,
                    f.area(),
                    &CardView {
                        site: &site,
                        checks: &checks,
                        focused: true,
                        inspected: Some(0),
                    },
                )
            })
            .expect("failed to draw");
    }
}
