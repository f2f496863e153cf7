//! Folder and file nodes

use crate::types::{NodeId, NodeKind};
use serde::{Deserialize, Serialize};

/// A folder or file in the simulated tree.
///
/// Files are opaque named leaves; nothing about their content is modeled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub kind: NodeKind,
    /// Owning folder; `None` only for the root
    pub parent: Option<NodeId>,
}

impl Node {
    pub fn new(
        id: impl Into<NodeId>,
        name: impl Into<String>,
        kind: NodeKind,
        parent: Option<NodeId>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            parent,
        }
    }

    /// The single parentless folder
    pub fn root(id: impl Into<NodeId>, name: impl Into<String>) -> Self {
        Self::new(id, name, NodeKind::Folder, None)
    }

    pub fn folder(id: impl Into<NodeId>, name: impl Into<String>, parent: impl Into<NodeId>) -> Self {
        Self::new(id, name, NodeKind::Folder, Some(parent.into()))
    }

    pub fn file(id: impl Into<NodeId>, name: impl Into<String>, parent: impl Into<NodeId>) -> Self {
        Self::new(id, name, NodeKind::File, Some(parent.into()))
    }

    pub fn is_folder(&self) -> bool {
        self.kind == NodeKind::Folder
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}
