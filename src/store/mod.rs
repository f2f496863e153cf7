//! Node Store
//!
//! Owns the current `NodeCollection` and implements create / rename / delete / move with
//! their invariants: unique sibling names (case-insensitive) and an acyclic parent relation.
//!
//! Every mutation builds a new collection and swaps it in only on success, so a failed
//! operation leaves the previous snapshot untouched.

use crate::error::StoreError;
use crate::tree::{names_match, Node, NodeCollection};
use crate::types::{NodeId, NodeKind};
use tracing::debug;

/// Node currently being renamed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameTarget {
    pub id: NodeId,
    /// Created by `create` and never successfully renamed since
    pub fresh: bool,
}

/// Result of committing a rename from the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameOutcome {
    Renamed,
    /// The rename failed on a pre-existing node; its old name stays.
    Reverted(StoreError),
    /// The rename failed on a fresh placeholder; the node was removed.
    Abandoned(StoreError),
}

impl RenameOutcome {
    pub fn error(&self) -> Option<&StoreError> {
        match self {
            RenameOutcome::Renamed => None,
            RenameOutcome::Reverted(e) | RenameOutcome::Abandoned(e) => Some(e),
        }
    }
}

/// Mutable owner of the simulated tree
#[derive(Debug, Clone)]
pub struct NodeStore {
    nodes: NodeCollection,
    next_id: u64,
    rename: Option<RenameTarget>,
}

impl NodeStore {
    pub fn new(nodes: NodeCollection) -> Self {
        Self {
            nodes,
            next_id: 1,
            rename: None,
        }
    }

    /// Current snapshot
    pub fn nodes(&self) -> &NodeCollection {
        &self.nodes
    }

    pub fn rename_target(&self) -> Option<&RenameTarget> {
        self.rename.as_ref()
    }

    /// Replace the whole tree (restart, level advance). Drops any rename in progress.
    pub fn reseed(&mut self, nodes: NodeCollection) {
        self.nodes = nodes;
        self.rename = None;
    }

    /// Create a node with a placeholder name under `parent`.
    ///
    /// The name is `"New folder"` (or `"New file"`), suffixed with ` (2)`, ` (3)`, ... until it
    /// is unique among the parent's children. The new node becomes the rename target.
    pub fn create(
        &mut self,
        parent: &NodeId,
        kind: NodeKind,
    ) -> Result<(NodeCollection, NodeId), StoreError> {
        let parent_node = self
            .nodes
            .get(parent)
            .ok_or_else(|| StoreError::NodeNotFound(parent.clone()))?;
        if !parent_node.is_folder() {
            return Err(StoreError::InvalidTarget(format!(
                "'{}' is not a folder",
                parent_node.name
            )));
        }

        let name = unique_name(&self.nodes, parent, kind.placeholder_name());
        let id = self.allocate_id();
        let mut next = self.nodes.clone();
        next.insert(Node::new(id.clone(), name.clone(), kind, Some(parent.clone())));

        debug!(id = %id, parent = %parent, name = %name, kind = ?kind, "Created node");
        self.nodes = next.clone();
        self.rename = Some(RenameTarget {
            id: id.clone(),
            fresh: true,
        });
        Ok((next, id))
    }

    /// Mark an existing node as the rename target.
    pub fn start_rename(&mut self, id: &NodeId) -> Result<(), StoreError> {
        let node = self
            .nodes
            .get(id)
            .ok_or_else(|| StoreError::NodeNotFound(id.clone()))?;
        if node.is_root() {
            return Err(StoreError::InvalidTarget("the root cannot be renamed".to_string()));
        }
        let fresh = matches!(&self.rename, Some(t) if t.id == *id && t.fresh);
        self.rename = Some(RenameTarget {
            id: id.clone(),
            fresh,
        });
        Ok(())
    }

    /// Rename `id` to the trimmed `new_name`.
    pub fn rename(&mut self, id: &NodeId, new_name: &str) -> Result<NodeCollection, StoreError> {
        let node = self
            .nodes
            .get(id)
            .ok_or_else(|| StoreError::NodeNotFound(id.clone()))?;
        if node.is_root() {
            return Err(StoreError::InvalidTarget("the root cannot be renamed".to_string()));
        }
        let name = new_name.trim();
        if name.is_empty() {
            return Err(StoreError::EmptyName);
        }
        if let Some(parent) = &node.parent {
            if let Some(other) = self.nodes.find_child_by_name(parent, name) {
                if other.id != *id {
                    return Err(StoreError::NameCollision {
                        name: name.to_string(),
                    });
                }
            }
        }

        let mut next = self.nodes.clone();
        if let Some(node) = next.get_mut(id) {
            node.name = name.to_string();
        }
        debug!(id = %id, name = %name, "Renamed node");
        self.nodes = next.clone();
        Ok(next)
    }

    /// Commit a rename coming from the UI, applying the placeholder convention:
    /// a failed commit removes a fresh placeholder and leaves an existing node as it was.
    pub fn commit_rename(&mut self, id: &NodeId, new_name: &str) -> RenameOutcome {
        let fresh = matches!(&self.rename, Some(t) if t.id == *id && t.fresh);
        self.rename = None;

        match self.rename(id, new_name) {
            Ok(_) => RenameOutcome::Renamed,
            Err(err) if fresh => {
                // Abandoned creation: the placeholder never becomes a real node.
                let _ = self.delete(id);
                debug!(id = %id, error = %err, "Abandoned placeholder node");
                RenameOutcome::Abandoned(err)
            }
            Err(err) => RenameOutcome::Reverted(err),
        }
    }

    /// Remove a node.
    ///
    /// Descendants are not removed or reparented; deleting a non-empty folder leaves them
    /// orphaned (see `NodeCollection::orphans`).
    pub fn delete(&mut self, id: &NodeId) -> Result<NodeCollection, StoreError> {
        let node = self
            .nodes
            .get(id)
            .ok_or_else(|| StoreError::NodeNotFound(id.clone()))?;
        if node.is_root() {
            return Err(StoreError::InvalidTarget("the root cannot be deleted".to_string()));
        }

        let mut next = self.nodes.clone();
        next.remove(id);
        let orphaned = next.orphans().len();
        debug!(id = %id, orphaned, "Deleted node");

        if matches!(&self.rename, Some(t) if t.id == *id) {
            self.rename = None;
        }
        self.nodes = next.clone();
        Ok(next)
    }

    /// Reparent `dragged` under `target`.
    ///
    /// Dropping onto a file, onto itself, or onto the current parent is `InvalidTarget`.
    /// A folder can never be dropped into its own subtree (`CyclicMove`).
    pub fn move_node(
        &mut self,
        dragged: &NodeId,
        target: &NodeId,
    ) -> Result<NodeCollection, StoreError> {
        let dragged_node = self
            .nodes
            .get(dragged)
            .ok_or_else(|| StoreError::NodeNotFound(dragged.clone()))?;
        let target_node = self
            .nodes
            .get(target)
            .ok_or_else(|| StoreError::NodeNotFound(target.clone()))?;

        if !target_node.is_folder() {
            return Err(StoreError::InvalidTarget(format!(
                "'{}' is not a folder",
                target_node.name
            )));
        }
        if dragged == target {
            return Err(StoreError::InvalidTarget("cannot drop onto itself".to_string()));
        }
        if dragged_node.parent.as_ref() == Some(target) {
            return Err(StoreError::InvalidTarget(format!(
                "already inside '{}'",
                target_node.name
            )));
        }
        if dragged_node.is_folder() && self.nodes.is_ancestor(dragged, target) {
            return Err(StoreError::CyclicMove);
        }
        if self.nodes.find_child_by_name(target, &dragged_node.name).is_some() {
            return Err(StoreError::NameCollision {
                name: dragged_node.name.clone(),
            });
        }

        let mut next = self.nodes.clone();
        if let Some(node) = next.get_mut(dragged) {
            node.parent = Some(target.clone());
        }
        debug!(id = %dragged, target = %target, "Moved node");
        self.nodes = next.clone();
        Ok(next)
    }

    fn allocate_id(&mut self) -> NodeId {
        loop {
            let id = NodeId::new(format!("node-{}", self.next_id));
            self.next_id += 1;
            if !self.nodes.contains(&id) {
                return id;
            }
        }
    }
}

/// Placeholder name unique among the children of `parent`
pub fn unique_name(nodes: &NodeCollection, parent: &NodeId, base: &str) -> String {
    let taken = |candidate: &str| {
        nodes
            .list_children(parent)
            .iter()
            .any(|n| names_match(&n.name, candidate))
    };
    if !taken(base) {
        return base.to_string();
    }
    let mut counter = 2u32;
    loop {
        let candidate = format!("{} ({})", base, counter);
        if !taken(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}
