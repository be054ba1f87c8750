//! Countdown tokens for timed events.
//!
//! The caller owns the clock: it feeds elapsed time into `tick` and, once
//! the token reports `Expired`, hands it to `TurnEngine::expire_timer`,
//! which declines the event exactly once. `cancel` is idempotent, so every
//! exit path (player answered, game reset, modal closed) can call it.

use std::time::Duration;

use crate::engine::PendingEvent;

/// Observable state of a `ResponseTimer`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerStatus {
    Running { remaining: Duration },
    Expired,
    Cancelled,
}

/// Cancellable countdown bound to one pending event.
#[derive(Debug)]
pub struct ResponseTimer {
    event_serial: u64,
    remaining: Duration,
    cancelled: bool,
    fired: bool,
}

impl ResponseTimer {
    /// Arm a timer for a pending event. `None` if the event is untimed.
    #[must_use]
    pub fn for_event(pending: &PendingEvent) -> Option<Self> {
        let secs = pending.template.timer_secs?;
        Some(Self::new(pending.serial, Duration::from_secs(u64::from(secs))))
    }

    pub(crate) fn new(event_serial: u64, duration: Duration) -> Self {
        Self {
            event_serial,
            remaining: duration,
            cancelled: false,
            fired: false,
        }
    }

    /// Serial of the pending event this timer belongs to.
    #[must_use]
    pub fn event_serial(&self) -> u64 {
        self.event_serial
    }

    /// Advance the countdown.
    pub fn tick(&mut self, elapsed: Duration) -> TimerStatus {
        if !self.cancelled {
            self.remaining = self.remaining.saturating_sub(elapsed);
        }
        self.status()
    }

    #[must_use]
    pub fn status(&self) -> TimerStatus {
        if self.cancelled {
            TimerStatus::Cancelled
        } else if self.remaining.is_zero() {
            TimerStatus::Expired
        } else {
            TimerStatus::Running {
                remaining: self.remaining,
            }
        }
    }

    /// Stop the timer. Safe to call any number of times.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    /// Consume the expiry. True at most once, and never after `cancel`.
    pub(crate) fn take_expiry(&mut self) -> bool {
        if self.fired || self.status() != TimerStatus::Expired {
            return false;
        }
        self.fired = true;
        self.cancelled = true;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_down_to_expiry() {
        let mut timer = ResponseTimer::new(1, Duration::from_secs(3));

        assert_eq!(
            timer.tick(Duration::from_secs(1)),
            TimerStatus::Running { remaining: Duration::from_secs(2) }
        );
        assert_eq!(timer.tick(Duration::from_secs(5)), TimerStatus::Expired);
    }

    #[test]
    fn test_expiry_taken_once() {
        let mut timer = ResponseTimer::new(1, Duration::from_secs(1));
        assert!(!timer.take_expiry());

        timer.tick(Duration::from_secs(1));
        assert!(timer.take_expiry());
        assert!(!timer.take_expiry());
        assert_eq!(timer.status(), TimerStatus::Cancelled);
    }

    #[test]
    fn test_cancel_is_idempotent_and_blocks_expiry() {
        let mut timer = ResponseTimer::new(1, Duration::from_secs(1));
        timer.cancel();
        timer.cancel();

        assert_eq!(timer.tick(Duration::from_secs(10)), TimerStatus::Cancelled);
        assert!(!timer.take_expiry());
    }
}
