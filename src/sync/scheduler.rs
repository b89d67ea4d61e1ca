//! Sync scheduling with debounce.
//!
//! Mutations arrive in rapid bursts (every keystroke on a numeric input).
//! Each `notify()` cancels and restarts a fixed-delay deadline, so a burst
//! collapses into a single push reflecting the final state. Ticks from
//! superseded timers arrive early, fail the deadline check and are
//! ignored; the last timer's tick fires.

use std::time::{Duration, Instant};

use crossbeam::channel::Sender;

/// Timer completion marker sent to the engine's channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SyncTick;

pub struct SyncScheduler {
    /// Scheduled fire time, if a push is pending.
    pending: Option<Instant>,

    /// Debounce window.
    delay: Duration,

    /// Channel to send timer completions.
    timer_tx: Sender<SyncTick>,
}

impl SyncScheduler {
    pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(1000);

    pub fn new(timer_tx: Sender<SyncTick>) -> Self {
        Self::with_delay(timer_tx, Self::DEFAULT_DEBOUNCE)
    }

    pub fn with_delay(timer_tx: Sender<SyncTick>, delay: Duration) -> Self {
        SyncScheduler {
            pending: None,
            delay,
            timer_tx,
        }
    }

    /// Record a local mutation: restart the debounce window.
    pub fn notify(&mut self) {
        self.pending = Some(Instant::now() + self.delay);

        let tx = self.timer_tx.clone();
        let delay = self.delay;
        std::thread::spawn(move || {
            std::thread::sleep(delay);
            // Ignore send errors - receiver may have been dropped
            let _ = tx.send(SyncTick);
        });
    }

    /// Check whether the pending deadline has elapsed; clears it if so.
    pub fn should_fire(&mut self) -> bool {
        match self.pending {
            Some(fire_at) if Instant::now() >= fire_at => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
