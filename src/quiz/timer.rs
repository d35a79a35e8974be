//! Cancellable countdown tick source
//!
//! The caller supplies the clock so the countdown can be driven from the TUI
//! loop and from tests alike.

use std::time::{Duration, Instant};

/// Shortest interval a countdown ticks at
const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Repeating tick source with an explicit armed/disarmed state
#[derive(Debug, Clone)]
pub struct Countdown {
    interval: Duration,
    next_tick: Option<Instant>,
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl Countdown {
    /// Intervals below one millisecond are raised to it
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(MIN_INTERVAL),
            next_tick: None,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.next_tick.is_some()
    }

    /// Start ticking one interval after `now`. No-op when already armed.
    pub fn arm(&mut self, now: Instant) {
        if self.next_tick.is_none() {
            self.next_tick = Some(now + self.interval);
        }
    }

    pub fn disarm(&mut self) {
        self.next_tick = None;
    }

    /// Arm or disarm to match whether a tick source should be active
    pub fn sync(&mut self, should_run: bool, now: Instant) {
        if should_run {
            self.arm(now);
        } else {
            self.disarm();
        }
    }

    /// Number of whole intervals that elapsed since the last call
    pub fn due_ticks(&mut self, now: Instant) -> u32 {
        let Some(mut next) = self.next_tick else {
            return 0;
        };

        let mut ticks = 0;
        while next <= now {
            ticks += 1;
            next += self.interval;
        }
        self.next_tick = Some(next);
        ticks
    }

    /// Time left until the next tick, if armed
    pub fn until_next(&self, now: Instant) -> Option<Duration> {
        self.next_tick.map(|next| next.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disarmed_never_ticks() {
        let mut countdown = Countdown::default();
        let now = Instant::now();
        assert!(!countdown.is_armed());
        assert_eq!(countdown.due_ticks(now + Duration::from_secs(10)), 0);
        assert!(countdown.until_next(now).is_none());
    }

    #[test]
    fn test_ticks_once_per_interval() {
        let mut countdown = Countdown::default();
        let start = Instant::now();
        countdown.arm(start);

        assert_eq!(countdown.due_ticks(start + Duration::from_millis(999)), 0);
        assert_eq!(countdown.due_ticks(start + Duration::from_secs(1)), 1);
        assert_eq!(countdown.due_ticks(start + Duration::from_millis(1500)), 0);
        assert_eq!(countdown.due_ticks(start + Duration::from_millis(4200)), 3);
        assert_eq!(
            countdown.until_next(start + Duration::from_millis(4200)),
            Some(Duration::from_millis(800))
        );
    }

    #[test]
    fn test_arm_is_idempotent() {
        let mut countdown = Countdown::default();
        let start = Instant::now();
        countdown.arm(start);
        countdown.arm(start + Duration::from_millis(900));
        assert_eq!(countdown.due_ticks(start + Duration::from_secs(1)), 1);
    }

    #[test]
    fn test_sync_cancels_pending_ticks() {
        let mut countdown = Countdown::default();
        let start = Instant::now();
        countdown.sync(true, start);
        assert!(countdown.is_armed());

        countdown.sync(false, start + Duration::from_secs(5));
        assert!(!countdown.is_armed());
        assert_eq!(countdown.due_ticks(start + Duration::from_secs(5)), 0);

        // Re-arming starts a fresh interval rather than replaying missed ticks
        countdown.sync(true, start + Duration::from_secs(5));
        assert_eq!(countdown.due_ticks(start + Duration::from_millis(5500)), 0);
        assert_eq!(countdown.due_ticks(start + Duration::from_secs(6)), 1);
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let start = Instant::now();
        let mut countdown = Countdown::new(Duration::ZERO);
        countdown.arm(start);

        assert_eq!(countdown.due_ticks(start), 0);
        assert_eq!(countdown.due_ticks(start + Duration::from_millis(5)), 5);
    }
}
