//! Reusable step predicates.
//!
//! Nodes created by the learner get runtime ids, so goals about them match by name;
//! goals about authored nodes match by id.

use super::{StepContext, StepPredicate};
use crate::tree::names_match;
use crate::types::{NodeId, NodeKind};
use std::sync::Arc;

/// Viewing the folder with this id
pub fn in_folder(id: &str) -> impl Fn(&StepContext<'_>) -> bool + Send + Sync + 'static {
    let id = NodeId::from(id);
    move |ctx| *ctx.current_folder == id
}

/// Viewing a folder with this name
pub fn in_folder_named(name: &str) -> impl Fn(&StepContext<'_>) -> bool + Send + Sync + 'static {
    let name = name.to_string();
    move |ctx| {
        ctx.nodes
            .get(ctx.current_folder)
            .map(|n| names_match(&n.name, &name))
            .unwrap_or(false)
    }
}

/// Back at the top of the tree
pub fn at_root() -> impl Fn(&StepContext<'_>) -> bool + Send + Sync + 'static {
    |ctx| ctx.path.len() == 1
}

/// The folders entered below the root carry exactly these names, in order
pub fn path_is(names: &[&str]) -> impl Fn(&StepContext<'_>) -> bool + Send + Sync + 'static {
    let names: Vec<String> = names.iter().map(|s| s.to_string()).collect();
    move |ctx| {
        let below_root = ctx.path.get(1..).unwrap_or(&[]);
        below_root.len() == names.len()
            && below_root.iter().zip(&names).all(|(id, expected)| {
                ctx.nodes
                    .get(id)
                    .map(|n| names_match(&n.name, expected))
                    .unwrap_or(false)
            })
    }
}

/// `parent` has a child of `kind` called `name`
pub fn child_named(
    parent: &str,
    name: &str,
    kind: NodeKind,
) -> impl Fn(&StepContext<'_>) -> bool + Send + Sync + 'static {
    let parent = NodeId::from(parent);
    let name = name.to_string();
    move |ctx| {
        ctx.nodes
            .find_child_by_name(&parent, &name)
            .map(|n| n.kind == kind)
            .unwrap_or(false)
    }
}

/// Some folder called `name` sits inside a folder called `parent_name`
pub fn folder_named_inside(
    name: &str,
    parent_name: &str,
) -> impl Fn(&StepContext<'_>) -> bool + Send + Sync + 'static {
    let name = name.to_string();
    let parent_name = parent_name.to_string();
    move |ctx| {
        ctx.nodes.iter().any(|n| {
            n.is_folder()
                && names_match(&n.name, &name)
                && n
                    .parent
                    .as_ref()
                    .and_then(|p| ctx.nodes.get(p))
                    .map(|p| names_match(&p.name, &parent_name))
                    .unwrap_or(false)
        })
    }
}

/// `parent` holds at least `count` children
pub fn child_count_at_least(
    parent: &str,
    count: usize,
) -> impl Fn(&StepContext<'_>) -> bool + Send + Sync + 'static {
    let parent = NodeId::from(parent);
    move |ctx| ctx.nodes.list_children(&parent).len() >= count
}

/// The node with this id no longer exists
pub fn node_absent(id: &str) -> impl Fn(&StepContext<'_>) -> bool + Send + Sync + 'static {
    let id = NodeId::from(id);
    move |ctx| !ctx.nodes.contains(&id)
}

/// Node `id` is a direct child of `parent`
pub fn node_inside(
    id: &str,
    parent: &str,
) -> impl Fn(&StepContext<'_>) -> bool + Send + Sync + 'static {
    let id = NodeId::from(id);
    let parent = NodeId::from(parent);
    move |ctx| {
        ctx.nodes
            .get(&id)
            .map(|n| n.parent.as_ref() == Some(&parent))
            .unwrap_or(false)
    }
}

/// Node `id` is directly inside a folder called `parent_name`
pub fn node_inside_named(
    id: &str,
    parent_name: &str,
) -> impl Fn(&StepContext<'_>) -> bool + Send + Sync + 'static {
    let id = NodeId::from(id);
    let parent_name = parent_name.to_string();
    move |ctx| {
        ctx.nodes
            .get(&id)
            .and_then(|n| n.parent.as_ref())
            .and_then(|p| ctx.nodes.get(p))
            .map(|p| names_match(&p.name, &parent_name))
            .unwrap_or(false)
    }
}

/// Node `id` is currently called `name`
pub fn node_named(
    id: &str,
    name: &str,
) -> impl Fn(&StepContext<'_>) -> bool + Send + Sync + 'static {
    let id = NodeId::from(id);
    let name = name.to_string();
    move |ctx| {
        ctx.nodes
            .get(&id)
            .map(|n| names_match(&n.name, &name))
            .unwrap_or(false)
    }
}

/// Every predicate holds
pub fn all_of(predicates: Vec<StepPredicate>) -> impl Fn(&StepContext<'_>) -> bool + Send + Sync + 'static {
    move |ctx| predicates.iter().all(|p| p(ctx))
}

/// Box a goal so it can be combined with `all_of`
pub fn boxed<F>(predicate: F) -> StepPredicate
where
    F: Fn(&StepContext<'_>) -> bool + Send + Sync + 'static,
{
    Arc::new(predicate)
}
