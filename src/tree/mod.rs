//! Simulated File Tree
//!
//! Folder and file nodes linked by parent references, and the snapshot value
//! (`NodeCollection`) that the store, the navigation stack and the step predicates share.

pub mod collection;
pub mod names;
pub mod node;

pub use collection::NodeCollection;
pub use names::{name_key, names_match};
pub use node::Node;
