//! Repeating frame timer expressed as deadlines.

use super::interval::Interval;
use std::time::{Duration, Instant};

/// Deadline-based repeating timer.
///
/// Deadlines advance from the previous deadline rather than from the time
/// the tick was handled, so handling latency does not accumulate. A host
/// that falls more than one interval behind is resynchronised to
/// `now + interval` instead of firing back-to-back ticks.
#[derive(Debug, Clone)]
pub struct FrameClock {
    interval: Duration,
    deadline: Option<Instant>,
}

impl FrameClock {
    pub fn new(interval: Interval) -> Self {
        Self {
            interval: interval.as_duration(),
            deadline: None,
        }
    }

    /// Arm the first deadline. Stays disarmed if `now + interval` is not
    /// representable.
    pub fn arm(&mut self, now: Instant) {
        self.deadline = now.checked_add(self.interval);
    }

    pub fn disarm(&mut self) {
        self.deadline = None;
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|deadline| now >= deadline)
    }

    /// Move to the deadline after the one that just fired.
    pub fn advance(&mut self, now: Instant) {
        if let Some(deadline) = self.deadline {
            self.deadline = match deadline.checked_add(self.interval) {
                Some(next) if next > now => Some(next),
                _ => now.checked_add(self.interval),
            };
        }
    }
}
