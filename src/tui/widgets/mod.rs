//! TUI widgets.

mod card;
mod header;
mod help;
mod quit_confirm;

pub use card::{CARD_HEIGHT, CardView, render_card};
pub use header::{HeaderInfo, render_header};
pub use help::{render_help, render_help_line};
pub use quit_confirm::{QuitSummary, render_quit_confirm};

use ratatui::layout::Rect;

/// Centered popup of at most `width` x `height`, clipped to `area`.
fn popup_area(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
