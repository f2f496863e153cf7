//! Delayed transitions requested by the engine.
//!
//! The engine never sleeps itself: it hands out `TimerRequest`s and the owner of the
//! session schedules them, then reports back through `ProgressionEngine::fire`. Each request
//! carries a ticket; only the most recent ticket of each kind is honoured.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Move from a completed step to the next one
    AutoAdvance,
    /// Clear the current feedback message
    FeedbackExpiry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerRequest {
    pub kind: TimerKind,
    pub ticket: u64,
    pub delay: Duration,
}

/// Timer durations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    pub auto_advance: Duration,
    pub feedback_ttl: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            auto_advance: Duration::from_millis(1500),
            feedback_ttl: Duration::from_millis(3000),
        }
    }
}
