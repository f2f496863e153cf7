//! fsdrill: guided practice for folder and file management
//!
//! A simulated file tree the learner navigates and edits, a catalog of levels made of
//! steps, and a progression engine that checks each step against the current tree and
//! moves the learner forward.

pub mod config;
pub mod engine;
pub mod error;
pub mod level;
pub mod logging;
pub mod navigation;
pub mod session;
pub mod store;
pub mod tooling;
pub mod tree;
pub mod types;

pub use engine::{Feedback, FeedbackKind, Phase, ProgressionEngine, ProgressionState, Timings};
pub use error::{ApiError, StoreError};
pub use level::{Curriculum, Level, LevelCatalog, Step, StepContext};
pub use navigation::NavigationStack;
pub use session::{Session, SessionView};
pub use store::NodeStore;
pub use tree::{Node, NodeCollection};
pub use types::{NodeId, NodeKind};
