//! Progression Engine
//!
//! State machine driving step -> level -> game completion:
//!
//! - `Playing(i, j)` -> `StepComplete` -> (auto, after `Timings::auto_advance`) -> `Playing(i, j+1)`
//! - last step of a level -> `LevelComplete` -> (explicit `advance_level`) -> `Playing(i+1, 0)`
//! - last step of the last level -> `LevelComplete` + `GameComplete` (terminal)
//!
//! The engine only reads snapshots; it never touches the tree. Completion is evaluated at
//! most once per step instance: outside `Playing`, `evaluate` is a no-op.

pub mod feedback;
pub mod state;
pub mod timer;

pub use feedback::{Feedback, FeedbackKind};
pub use state::{Phase, ProgressionState};
pub use timer::{TimerKind, TimerRequest, Timings};

use crate::error::{ApiError, StoreError};
use crate::level::{Level, LevelCatalog, Step, StepContext};
use std::sync::Arc;
use tracing::{debug, info};

pub struct ProgressionEngine {
    catalog: Arc<LevelCatalog>,
    timings: Timings,
    state: ProgressionState,
    next_ticket: u64,
    pending_advance: Option<u64>,
    pending_expiry: Option<u64>,
}

impl ProgressionEngine {
    /// Engine at `Playing(0, 0)`
    pub fn new(catalog: Arc<LevelCatalog>, timings: Timings) -> Self {
        Self {
            catalog,
            timings,
            state: ProgressionState::default(),
            next_ticket: 1,
            pending_advance: None,
            pending_expiry: None,
        }
    }

    /// Engine at the first step of `level_index`
    pub fn starting_at(
        catalog: Arc<LevelCatalog>,
        timings: Timings,
        level_index: usize,
    ) -> Result<Self, ApiError> {
        if level_index >= catalog.len() {
            return Err(ApiError::InvalidTransition(format!(
                "level {} does not exist (catalog has {})",
                level_index + 1,
                catalog.len()
            )));
        }
        let mut engine = Self::new(catalog, timings);
        engine.state = ProgressionState::at_level(level_index);
        Ok(engine)
    }

    pub fn catalog(&self) -> &Arc<LevelCatalog> {
        &self.catalog
    }

    pub fn timings(&self) -> Timings {
        self.timings
    }

    pub fn state(&self) -> &ProgressionState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn current_level(&self) -> &Level {
        // level_index is only ever set to a valid index (construction, advance, restart).
        &self.catalog.levels()[self.state.level_index]
    }

    pub fn current_step(&self) -> &Step {
        // step_index only advances while a later step exists.
        &self.current_level().steps[self.state.step_index]
    }

    /// Whether a timer of this kind is outstanding
    pub fn has_pending(&self, kind: TimerKind) -> bool {
        match kind {
            TimerKind::AutoAdvance => self.pending_advance.is_some(),
            TimerKind::FeedbackExpiry => self.pending_expiry.is_some(),
        }
    }

    /// Check the active step against the latest snapshot.
    ///
    /// Returns the timers the caller must schedule (empty when nothing changed).
    pub fn evaluate(&mut self, ctx: &StepContext<'_>) -> Vec<TimerRequest> {
        if !self.state.is_playing() {
            debug!(phase = ?self.phase(), "Skipping evaluation outside Playing");
            return Vec::new();
        }
        if !self.current_step().is_complete(ctx) {
            return Vec::new();
        }

        let level_index = self.state.level_index;
        let step_index = self.state.step_index;
        let step_id = self.current_step().id.clone();
        let mut timers = Vec::new();

        self.state.step_complete = true;
        if self.current_level().is_last_step(step_index) {
            self.state.level_complete = true;
            let message = if self.catalog.is_last(level_index) {
                self.state.game_complete = true;
                info!(level = level_index, "Game complete");
                "Congratulations, you completed every level!".to_string()
            } else {
                info!(level = level_index, step = %step_id, "Level complete");
                format!("Level complete: {}", self.current_level().title)
            };
            timers.push(self.set_feedback(Feedback::success(message)));
        } else {
            info!(level = level_index, step = %step_id, "Step complete");
            let message = format!("Well done! {}", self.current_step().instruction);
            timers.push(self.set_feedback(Feedback::success(message)));
            let ticket = self.issue_ticket();
            self.pending_advance = Some(ticket);
            timers.push(TimerRequest {
                kind: TimerKind::AutoAdvance,
                ticket,
                delay: self.timings.auto_advance,
            });
        }
        timers
    }

    /// Surface a failed mutation. Leaves the progression untouched apart from feedback.
    pub fn report_failure(&mut self, err: &StoreError) -> Option<TimerRequest> {
        if !err.is_user_facing() {
            debug!(error = %err, "Ignoring silent store failure");
            return None;
        }
        Some(self.set_feedback(Feedback::error(err.to_string())))
    }

    /// Apply a timer that has elapsed. Returns `false` for stale tickets.
    pub fn fire(&mut self, kind: TimerKind, ticket: u64) -> bool {
        match kind {
            TimerKind::AutoAdvance => {
                if self.pending_advance != Some(ticket) {
                    debug!(ticket, "Ignoring stale auto-advance");
                    return false;
                }
                self.pending_advance = None;
                self.pending_expiry = None;
                self.state.feedback = None;
                self.state.step_complete = false;
                self.state.step_index += 1;
                info!(
                    level = self.state.level_index,
                    step = self.state.step_index,
                    "Advanced to next step"
                );
                true
            }
            TimerKind::FeedbackExpiry => {
                if self.pending_expiry != Some(ticket) {
                    debug!(ticket, "Ignoring stale feedback expiry");
                    return false;
                }
                self.pending_expiry = None;
                self.state.feedback = None;
                true
            }
        }
    }

    /// Explicit learner action after `LevelComplete`; not available once the game is complete.
    pub fn advance_level(&mut self) -> Result<&Level, ApiError> {
        if self.state.game_complete {
            return Err(ApiError::InvalidTransition(
                "every level is already complete".to_string(),
            ));
        }
        if !self.state.level_complete {
            return Err(ApiError::InvalidTransition(
                "the current level is not complete yet".to_string(),
            ));
        }
        let next = self.state.level_index + 1;
        self.reset_to(next);
        info!(level = next, "Started next level");
        Ok(self.current_level())
    }

    /// Back to the first step of the current level
    pub fn restart_level(&mut self) -> &Level {
        let level = self.state.level_index;
        self.reset_to(level);
        info!(level, "Restarted level");
        self.current_level()
    }

    /// Back to the first step of the first level
    pub fn restart_game(&mut self) -> &Level {
        self.reset_to(0);
        info!("Restarted game");
        self.current_level()
    }

    /// Reset all state and forget every outstanding ticket
    fn reset_to(&mut self, level_index: usize) {
        self.state = ProgressionState::at_level(level_index);
        self.pending_advance = None;
        self.pending_expiry = None;
    }

    fn set_feedback(&mut self, feedback: Feedback) -> TimerRequest {
        self.state.feedback = Some(feedback);
        let ticket = self.issue_ticket();
        self.pending_expiry = Some(ticket);
        TimerRequest {
            kind: TimerKind::FeedbackExpiry,
            ticket,
            delay: self.timings.feedback_ttl,
        }
    }

    fn issue_ticket(&mut self) -> u64 {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        ticket
    }
}
