//! Progression state

use super::feedback::Feedback;
use serde::{Deserialize, Serialize};

/// Coarse state of the machine, derived from the completion flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Playing,
    StepComplete,
    LevelComplete,
    GameComplete,
}

/// Mutable progression of one session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionState {
    pub level_index: usize,
    pub step_index: usize,
    pub step_complete: bool,
    pub level_complete: bool,
    pub game_complete: bool,
    pub feedback: Option<Feedback>,
}

impl ProgressionState {
    /// Fresh state at the first step of `level_index`
    pub fn at_level(level_index: usize) -> Self {
        Self {
            level_index,
            step_index: 0,
            step_complete: false,
            level_complete: false,
            game_complete: false,
            feedback: None,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.game_complete {
            Phase::GameComplete
        } else if self.level_complete {
            Phase::LevelComplete
        } else if self.step_complete {
            Phase::StepComplete
        } else {
            Phase::Playing
        }
    }

    pub fn is_playing(&self) -> bool {
        self.phase() == Phase::Playing
    }
}

impl Default for ProgressionState {
    fn default() -> Self {
        Self::at_level(0)
    }
}
