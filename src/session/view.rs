//! Render snapshot returned by every session intent.

use crate::engine::{Feedback, Phase, ProgressionState};
use crate::tree::{Node, NodeCollection};
use crate::types::NodeId;

/// Everything the presentation layer needs to redraw after an action
#[derive(Debug, Clone, PartialEq)]
pub struct SessionView {
    pub nodes: NodeCollection,
    /// Navigation stack, root first
    pub navigation: Vec<NodeId>,
    pub path_names: Vec<String>,
    /// Children of the current folder in display order
    pub children: Vec<Node>,
    pub state: ProgressionState,
    pub rename_target: Option<NodeId>,
    pub level_id: String,
    pub level_title: String,
    pub level_count: usize,
    pub step_count: usize,
    pub instruction: String,
}

impl SessionView {
    pub fn current_folder(&self) -> &NodeId {
        // The navigation stack always holds at least the root.
        &self.navigation[self.navigation.len() - 1]
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.state.feedback.as_ref()
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    /// 1-based level number for display
    pub fn level_number(&self) -> usize {
        self.state.level_index + 1
    }

    /// 1-based step number for display
    pub fn step_number(&self) -> usize {
        self.state.step_index + 1
    }

    /// Child of the current folder with a case-insensitively matching name
    pub fn child_named(&self, name: &str) -> Option<&Node> {
        self.children
            .iter()
            .find(|n| crate::tree::names_match(&n.name, name))
    }
}
