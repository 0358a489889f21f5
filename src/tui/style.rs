//! Color scheme and styles.

use ratatui::style::{Color, Modifier, Style};

/// Dashboard color palette.
pub struct Theme;

impl Theme {
    // Background colors
    pub const HEADER_BG: Color = Color::Blue;

    // Foreground colors
    pub const FG: Color = Color::White;
    pub const FG_DIM: Color = Color::DarkGray;
    pub const HEADER_FG: Color = Color::White;

    // Card colors
    pub const BORDER: Color = Color::DarkGray;
    pub const BORDER_FOCUSED: Color = Color::Cyan;
    pub const LINK: Color = Color::Blue;

    // Chart colors
    pub const RESPONSE_LINE: Color = Color::Green;
    pub const RESPONSE_AREA: Color = Color::Rgb(0, 95, 0);
    pub const CURSOR: Color = Color::Yellow;

    // Popup colors
    pub const POPUP_BORDER: Color = Color::Cyan;
    pub const POPUP_KEY: Color = Color::Yellow;
}

/// Pre-defined styles.
pub struct Styles;

impl Styles {
    /// Header bar style.
    pub fn header() -> Style {
        Style::default()
            .fg(Theme::HEADER_FG)
            .bg(Theme::HEADER_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Card title style.
    pub fn card_title() -> Style {
        Style::default().fg(Theme::FG).add_modifier(Modifier::BOLD)
    }

    pub fn card_border(focused: bool) -> Style {
        if focused {
            Style::default().fg(Theme::BORDER_FOCUSED)
        } else {
            Style::default().fg(Theme::BORDER)
        }
    }

    /// Footer link style.
    pub fn link() -> Style {
        Style::default()
            .fg(Theme::LINK)
            .add_modifier(Modifier::UNDERLINED)
    }

    /// Response time line.
    pub fn response_line() -> Style {
        Style::default().fg(Theme::RESPONSE_LINE)
    }

    /// Filled area under the response time line.
    pub fn response_area() -> Style {
        Style::default().fg(Theme::RESPONSE_AREA)
    }

    /// Inspected sample marker and tooltip.
    pub fn cursor() -> Style {
        Style::default()
            .fg(Theme::CURSOR)
            .add_modifier(Modifier::BOLD)
    }

    pub fn popup_border() -> Style {
        Style::default().fg(Theme::POPUP_BORDER)
    }

    /// Key names inside popups.
    pub fn popup_key() -> Style {
        Style::default().fg(Theme::POPUP_KEY)
    }

    pub fn popup_text() -> Style {
        Style::default().fg(Theme::FG)
    }

    /// Dimmed text style.
    pub fn dim() -> Style {
        Style::default().fg(Theme::FG_DIM)
    }

    /// Status message style.
    pub fn status() -> Style {
        Style::default().fg(Color::Yellow).bg(Theme::HEADER_BG)
    }

    /// Help text style.
    pub fn help() -> Style {
        Style::default().fg(Theme::FG_DIM)
    }

    /// Help key style (highlighted keys in help line).
    pub fn help_key() -> Style {
        Style::default().fg(Theme::FG).add_modifier(Modifier::BOLD)
    }
}
