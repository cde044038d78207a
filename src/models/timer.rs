//! Manual pausable game timer.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Stopwatch that only moves while started. Time already run is kept in
/// `accumulated_ms`; `running_since` is set while the timer is running.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchTimer {
    pub accumulated_ms: i64,
    pub running_since: Option<DateTime<Utc>>,
}

impl MatchTimer {
    pub fn is_running(&self) -> bool {
        self.running_since.is_some()
    }

    /// Start (or resume) the timer. No-op if already running.
    pub fn start(&mut self, now: DateTime<Utc>) {
        if self.running_since.is_none() {
            self.running_since = Some(now);
        }
    }

    /// Pause the timer, folding the running segment into `accumulated_ms`. No-op if paused.
    pub fn pause(&mut self, now: DateTime<Utc>) {
        if let Some(since) = self.running_since.take() {
            // Clock skew must not make the timer go backwards.
            self.accumulated_ms += (now - since).num_milliseconds().max(0);
        }
    }

    /// Back to zero, paused.
    pub fn reset(&mut self) {
        self.accumulated_ms = 0;
        self.running_since = None;
    }

    /// Total run time as of `now`.
    pub fn elapsed(&self, now: DateTime<Utc>) -> Duration {
        let running = self
            .running_since
            .map(|since| (now - since).num_milliseconds().max(0))
            .unwrap_or(0);
        Duration::milliseconds(self.accumulated_ms + running)
    }
}
