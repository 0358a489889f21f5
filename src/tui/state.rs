//! View state: focus, inspection cursor and popups.
//!
//! Data lives in the session; this only tracks what the user is looking at.

/// Interactive state of the dashboard view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    /// Index of the focused card among the cards currently shown.
    pub focused: usize,
    /// Inspected sample of the focused card. `None` follows the latest sample.
    pub cursor: Option<usize>,
    pub show_help: bool,
    pub show_quit_confirm: bool,
    /// Transient message shown in the header.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves focus to the next card, wrapping around.
    pub fn focus_next(&mut self, cards: usize) {
        if cards == 0 {
            return;
        }
        self.focused = (self.focused + 1) % cards;
        self.cursor = None;
    }

    /// Moves focus to the previous card, wrapping around.
    pub fn focus_prev(&mut self, cards: usize) {
        if cards == 0 {
            return;
        }
        self.focused = (self.focused + cards - 1) % cards;
        self.cursor = None;
    }

    /// Moves the inspection cursor one sample back in time.
    pub fn cursor_left(&mut self, samples: usize) {
        if samples == 0 {
            return;
        }
        let current = self.inspected(samples).unwrap_or(0);
        self.cursor = Some(current.saturating_sub(1));
    }

    /// Moves the inspection cursor one sample forward; past the end it goes
    /// back to following the latest sample.
    pub fn cursor_right(&mut self, samples: usize) {
        self.cursor = match self.cursor {
            Some(i) if i + 1 < samples.saturating_sub(1) => Some(i + 1),
            _ => None,
        };
    }

    pub fn cursor_first(&mut self, samples: usize) {
        if samples > 0 {
            self.cursor = Some(0);
        }
    }

    pub fn cursor_latest(&mut self) {
        self.cursor = None;
    }

    /// Sample index under inspection for a card with `samples` samples.
    pub fn inspected(&self, samples: usize) -> Option<usize> {
        if samples == 0 {
            return None;
        }
        Some(self.cursor.map_or(samples - 1, |i| i.min(samples - 1)))
    }

    /// Keeps focus within range after cards appear or a reload clears them.
    pub fn clamp(&mut self, cards: usize) {
        if cards == 0 {
            self.focused = 0;
            self.cursor = None;
        } else if self.focused >= cards {
            self.focused = cards - 1;
            self.cursor = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_wraps() {
        let mut state = AppState::new();
        state.focus_prev(3);
        assert_eq!(state.focused, 2);
        state.focus_next(3);
        assert_eq!(state.focused, 0);
        state.focus_next(0);
        assert_eq!(state.focused, 0);
    }

    #[test]
    fn test_focus_change_resets_cursor() {
        let mut state = AppState::new();
        state.cursor_left(5);
        assert_eq!(state.cursor, Some(3));
        state.focus_next(2);
        assert_eq!(state.cursor, None);
    }

    #[test]
    fn test_cursor_movement() {
        let mut state = AppState::new();
        assert_eq!(state.inspected(4), Some(3));

        state.cursor_left(4);
        state.cursor_left(4);
        assert_eq!(state.inspected(4), Some(1));

        state.cursor_right(4);
        assert_eq!(state.inspected(4), Some(2));
        state.cursor_right(4);
        assert_eq!(state.cursor, None);
        assert_eq!(state.inspected(4), Some(3));

        state.cursor_first(4);
        assert_eq!(state.inspected(4), Some(0));
        state.cursor_left(4);
        assert_eq!(state.inspected(4), Some(0));

        state.cursor_latest();
        assert_eq!(state.inspected(0), None);
    }

    #[test]
    fn test_clamp() {
        let mut state = AppState {
            focused: 4,
            cursor: Some(2),
            ..AppState::default()
        };
        state.clamp(2);
        assert_eq!(state.focused, 1);
        assert_eq!(state.cursor, None);

        state.clamp(0);
        assert_eq!(state.focused, 0);
    }
}
