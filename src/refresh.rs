//! One-shot reload timer.
//!
//! A session arms exactly one timer when it starts. The timer reports due once,
//! the first time it is polled at or after its deadline; the caller then
//! starts a new session, which arms a new timer. A delay too large to
//! represent as an instant leaves the timer unarmed; it then never fires.

use std::time::{Duration, Instant};

/// Delay between session start and the scheduled full reload.
pub const RELOAD_AFTER: Duration = Duration::from_millis(600_000);

#[derive(Debug, Clone)]
pub struct ReloadTimer {
    deadline: Option<Instant>,
    fired: bool,
}

impl ReloadTimer {
    pub fn new(started_at: Instant, delay: Duration) -> Self {
        Self {
            deadline: started_at.checked_add(delay),
            fired: false,
        }
    }

    /// Returns `true` exactly once, on the first call with `now >= deadline`.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if !self.fired && now >= deadline => {
                self.fired = true;
                true
            }
            _ => false,
        }
    }

    /// Time left until the deadline, zero once it has passed.
    /// `None` if the timer is unarmed.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_exactly_at_deadline() {
        let start = Instant::now();
        let mut timer = ReloadTimer::new(start, RELOAD_AFTER);

        assert!(!timer.poll(start));
        assert!(!timer.poll(start + Duration::from_millis(599_999)));
        assert!(timer.poll(start + Duration::from_millis(600_000)));
        assert!(!timer.poll(start + Duration::from_millis(600_001)));
    }

    #[test]
    fn test_fires_only_once() {
        let start = Instant::now();
        let mut timer = ReloadTimer::new(start, RELOAD_AFTER);

        assert!(timer.poll(start + Duration::from_secs(601)));
        assert!(!timer.poll(start + Duration::from_secs(602)));
        assert!(!timer.poll(start + Duration::from_secs(3600)));
    }

    #[test]
    fn test_remaining() {
        let start = Instant::now();
        let timer = ReloadTimer::new(start, Duration::from_secs(10));
        assert_eq!(timer.remaining(start), Some(Duration::from_secs(10)));
        assert_eq!(
            timer.remaining(start + Duration::from_secs(4)),
            Some(Duration::from_secs(6))
        );
        assert_eq!(
            timer.remaining(start + Duration::from_secs(20)),
            Some(Duration::ZERO)
        );
    }

    #[test]
    fn test_unrepresentable_delay_never_fires() {
        let start = Instant::now();
        let mut timer = ReloadTimer::new(start, Duration::from_secs(u64::MAX));

        assert_eq!(timer.remaining(start), None);
        assert!(!timer.poll(start));
        assert!(!timer.poll(start + Duration::from_secs(86_400 * 365)));
    }
}
