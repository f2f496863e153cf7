//! Level Catalog
//!
//! Levels are immutable configuration: an initial tree plus an ordered list of steps.
//! A step's completion rule is a pure predicate over the latest snapshot, stored as a typed
//! closure next to its instruction text.

pub mod curriculum;
pub mod goals;

pub use curriculum::Curriculum;

use crate::error::ApiError;
use crate::tree::NodeCollection;
use crate::types::NodeId;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Read-only input of a step predicate
#[derive(Debug, Clone, Copy)]
pub struct StepContext<'a> {
    pub nodes: &'a NodeCollection,
    pub current_folder: &'a NodeId,
    /// Navigation stack, root first
    pub path: &'a [NodeId],
}

/// Completion rule of a step
pub type StepPredicate = Arc<dyn Fn(&StepContext<'_>) -> bool + Send + Sync>;

/// One required learner action
#[derive(Clone)]
pub struct Step {
    pub id: String,
    pub instruction: String,
    predicate: StepPredicate,
}

impl Step {
    pub fn new<F>(id: impl Into<String>, instruction: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&StepContext<'_>) -> bool + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            instruction: instruction.into(),
            predicate: Arc::new(predicate),
        }
    }

    pub fn is_complete(&self, ctx: &StepContext<'_>) -> bool {
        (self.predicate)(ctx)
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step")
            .field("id", &self.id)
            .field("instruction", &self.instruction)
            .finish_non_exhaustive()
    }
}

/// Initial tree plus the steps to perform on it
#[derive(Debug, Clone)]
pub struct Level {
    pub id: String,
    pub title: String,
    pub initial_nodes: NodeCollection,
    pub steps: Vec<Step>,
}

impl Level {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        initial_nodes: NodeCollection,
        steps: Vec<Step>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            initial_nodes,
            steps,
        }
    }

    pub fn is_last_step(&self, index: usize) -> bool {
        index + 1 >= self.steps.len()
    }
}

/// Ordered, read-only list of levels
#[derive(Debug)]
pub struct LevelCatalog {
    levels: Vec<Level>,
}

impl LevelCatalog {
    pub fn new(levels: Vec<Level>) -> Result<Self, ApiError> {
        if levels.is_empty() {
            return Err(ApiError::InvalidCatalog("catalog has no levels".to_string()));
        }
        let mut seen = HashSet::new();
        for level in &levels {
            if !seen.insert(level.id.as_str()) {
                return Err(ApiError::InvalidCatalog(format!(
                    "duplicate level id '{}'",
                    level.id
                )));
            }
            if level.steps.is_empty() {
                return Err(ApiError::InvalidCatalog(format!(
                    "level '{}' has no steps",
                    level.id
                )));
            }
        }
        Ok(Self { levels })
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn get(&self, index: usize) -> Option<&Level> {
        self.levels.get(index)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn is_last(&self, index: usize) -> bool {
        index + 1 >= self.levels.len()
    }

    /// Total number of steps across all levels
    pub fn total_steps(&self) -> usize {
        self.levels.iter().map(|l| l.steps.len()).sum()
    }
}
