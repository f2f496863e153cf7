//! Navigation Stack
//!
//! Path of folder ids from the root to the folder being viewed. The stack does not check
//! its entries against the store: an id whose node was deleted simply renders as
//! `MISSING_NAME` in the breadcrumb.

use crate::tree::NodeCollection;
use crate::types::NodeId;

/// Breadcrumb text for an id that no longer resolves to a node
pub const MISSING_NAME: &str = "?";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationStack {
    ids: Vec<NodeId>,
}

impl NavigationStack {
    pub fn new(root: NodeId) -> Self {
        Self { ids: vec![root] }
    }

    /// Push `folder_id`. The caller guarantees it refers to a folder.
    pub fn enter(&mut self, folder_id: NodeId) {
        self.ids.push(folder_id);
    }

    /// Pop the current folder; at the root this is a no-op.
    pub fn back(&mut self) {
        if self.ids.len() > 1 {
            self.ids.pop();
        }
    }

    /// Collapse to `[root]`
    pub fn reset(&mut self, root: NodeId) {
        self.ids.clear();
        self.ids.push(root);
    }

    pub fn current_folder(&self) -> &NodeId {
        // The stack is never empty: construction and reset both seed the root.
        &self.ids[self.ids.len() - 1]
    }

    pub fn root(&self) -> &NodeId {
        &self.ids[0]
    }

    pub fn ids(&self) -> &[NodeId] {
        &self.ids
    }

    /// Number of folders entered below the root
    pub fn depth(&self) -> usize {
        self.ids.len() - 1
    }

    /// Names along the stack for breadcrumb display
    pub fn path_names(&self, nodes: &NodeCollection) -> Vec<String> {
        self.ids
            .iter()
            .map(|id| {
                nodes
                    .get(id)
                    .map(|n| n.name.clone())
                    .unwrap_or_else(|| MISSING_NAME.to_string())
            })
            .collect()
    }
}
