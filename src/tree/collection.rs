//! NodeCollection: the id -> node mapping handed around as a snapshot value.

use super::names::{name_key, names_match};
use super::node::Node;
use crate::error::ApiError;
use crate::types::NodeId;
use std::collections::{BTreeMap, HashSet};

/// Snapshot of the whole tree.
///
/// Cloning is the intended way to derive a new state: the store never hands out a
/// mutable reference, so two snapshots can always be compared structurally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeCollection {
    root: NodeId,
    nodes: BTreeMap<NodeId, Node>,
}

impl NodeCollection {
    /// Build a collection from an authored list of nodes, checking every tree invariant.
    pub fn from_nodes(nodes: Vec<Node>) -> Result<Self, ApiError> {
        let mut map = BTreeMap::new();
        let mut root = None;

        for node in nodes {
            if node.parent.is_none() {
                if !node.is_folder() {
                    return Err(ApiError::InvalidSnapshot(format!(
                        "root '{}' must be a folder",
                        node.id
                    )));
                }
                if let Some(existing) = &root {
                    return Err(ApiError::InvalidSnapshot(format!(
                        "more than one root: '{}' and '{}'",
                        existing, node.id
                    )));
                }
                root = Some(node.id.clone());
            }
            if map.contains_key(&node.id) {
                return Err(ApiError::InvalidSnapshot(format!(
                    "duplicate node id '{}'",
                    node.id
                )));
            }
            map.insert(node.id.clone(), node);
        }

        let root =
            root.ok_or_else(|| ApiError::InvalidSnapshot("no root folder".to_string()))?;
        let collection = Self { root, nodes: map };
        collection.validate()?;
        Ok(collection)
    }

    fn validate(&self) -> Result<(), ApiError> {
        let mut sibling_keys = HashSet::new();
        for node in self.nodes.values() {
            let Some(parent_id) = &node.parent else {
                continue;
            };
            match self.nodes.get(parent_id) {
                None => {
                    return Err(ApiError::InvalidSnapshot(format!(
                        "'{}' references missing parent '{}'",
                        node.id, parent_id
                    )))
                }
                Some(parent) if !parent.is_folder() => {
                    return Err(ApiError::InvalidSnapshot(format!(
                        "'{}' is inside file '{}'",
                        node.id, parent_id
                    )))
                }
                Some(_) => {}
            }
            if !sibling_keys.insert((parent_id.clone(), name_key(&node.name))) {
                return Err(ApiError::InvalidSnapshot(format!(
                    "duplicate name '{}' in '{}'",
                    node.name, parent_id
                )));
            }
            if self.is_ancestor(&node.id, &node.id) {
                return Err(ApiError::InvalidSnapshot(format!(
                    "'{}' is its own ancestor",
                    node.id
                )));
            }
        }
        Ok(())
    }

    pub fn root_id(&self) -> &NodeId {
        &self.root
    }

    pub fn get(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Whether `id` names an existing folder
    pub fn is_folder(&self, id: &NodeId) -> bool {
        self.get(id).map(Node::is_folder).unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// All nodes whose parent is `folder_id`, folders first, then by name.
    pub fn list_children(&self, folder_id: &NodeId) -> Vec<&Node> {
        let mut children: Vec<&Node> = self
            .nodes
            .values()
            .filter(|n| n.parent.as_ref() == Some(folder_id))
            .collect();
        children.sort_by(|a, b| {
            b.is_folder()
                .cmp(&a.is_folder())
                .then_with(|| name_key(&a.name).cmp(&name_key(&b.name)))
                .then_with(|| a.id.cmp(&b.id))
        });
        children
    }

    /// Child of `parent` whose name matches case-insensitively
    pub fn find_child_by_name(&self, parent: &NodeId, name: &str) -> Option<&Node> {
        self.nodes
            .values()
            .find(|n| n.parent.as_ref() == Some(parent) && names_match(&n.name, name))
    }

    /// First node (in id order) whose name matches case-insensitively
    pub fn find_by_name(&self, name: &str) -> Option<&Node> {
        self.nodes.values().find(|n| names_match(&n.name, name))
    }

    /// Ids from the parent of `id` up to the root.
    ///
    /// Stops early at a missing parent (orphaned subtree) and never yields more than
    /// `len()` ids, so a corrupted parent chain cannot loop.
    pub fn ancestors(&self, id: &NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut current = self.nodes.get(id).and_then(|n| n.parent.clone());
        while let Some(parent_id) = current {
            if out.len() > self.nodes.len() {
                break;
            }
            current = self.nodes.get(&parent_id).and_then(|n| n.parent.clone());
            out.push(parent_id);
        }
        out
    }

    /// Whether `ancestor` appears on the parent chain of `id`
    pub fn is_ancestor(&self, ancestor: &NodeId, id: &NodeId) -> bool {
        self.ancestors(id).iter().any(|a| a == ancestor)
    }

    /// Names from the root down to `id`, for a location readout like `Desktop/Documents/Work`.
    /// Empty when `id` is unknown.
    pub fn path_of(&self, id: &NodeId) -> Vec<String> {
        let Some(node) = self.nodes.get(id) else {
            return Vec::new();
        };
        let mut names: Vec<String> = self
            .ancestors(id)
            .iter()
            .filter_map(|a| self.nodes.get(a).map(|n| n.name.clone()))
            .collect();
        names.reverse();
        names.push(node.name.clone());
        names
    }

    /// Nodes whose parent no longer exists (left behind by a non-cascading delete)
    pub fn orphans(&self) -> Vec<&Node> {
        self.nodes
            .values()
            .filter(|n| matches!(&n.parent, Some(p) if !self.nodes.contains_key(p)))
            .collect()
    }

    pub(crate) fn insert(&mut self, node: Node) {
        self.nodes.insert(node.id.clone(), node);
    }

    pub(crate) fn remove(&mut self, id: &NodeId) -> Option<Node> {
        self.nodes.remove(id)
    }

    pub(crate) fn get_mut(&mut self, id: &NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }
}
