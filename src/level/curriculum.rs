//! Built-in curricula.
//!
//! Both curricula run on the same engine; they differ only in level content. Each catalog
//! is built once per process and shared read-only afterwards.

use super::goals::{
    at_root, child_count_at_least, child_named, folder_named_inside, in_folder,
    in_folder_named, node_absent, node_inside, node_inside_named, node_named, path_is,
};
use super::{Level, LevelCatalog, Step};
use crate::error::ApiError;
use crate::tree::{Node, NodeCollection};
use crate::types::NodeKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, OnceLock};

/// Which built-in level set to play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Curriculum {
    /// Four levels: navigating, creating, tidying, organising
    #[default]
    Standard,
    /// Two short levels
    Quick,
}

impl Curriculum {
    pub const ALL: [Curriculum; 2] = [Curriculum::Standard, Curriculum::Quick];

    pub fn name(self) -> &'static str {
        match self {
            Curriculum::Standard => "standard",
            Curriculum::Quick => "quick",
        }
    }

    /// The shared, read-only catalog for this curriculum
    pub fn catalog(self) -> Result<Arc<LevelCatalog>, ApiError> {
        static STANDARD: OnceLock<Result<Arc<LevelCatalog>, String>> = OnceLock::new();
        static QUICK: OnceLock<Result<Arc<LevelCatalog>, String>> = OnceLock::new();

        let cell = match self {
            Curriculum::Standard => &STANDARD,
            Curriculum::Quick => &QUICK,
        };
        cell.get_or_init(|| {
            let built = match self {
                Curriculum::Standard => standard_levels(),
                Curriculum::Quick => quick_levels(),
            };
            built
                .and_then(LevelCatalog::new)
                .map(Arc::new)
                .map_err(|e| e.to_string())
        })
        .clone()
        .map_err(ApiError::InvalidCatalog)
    }
}

impl fmt::Display for Curriculum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Curriculum {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(Curriculum::Standard),
            "quick" => Ok(Curriculum::Quick),
            other => Err(ApiError::ConfigError(format!(
                "Unknown curriculum: {} (must be 'standard' or 'quick')",
                other
            ))),
        }
    }
}

fn standard_levels() -> Result<Vec<Level>, ApiError> {
    let navigate = Level::new(
        "navigate",
        "Finding your way",
        NodeCollection::from_nodes(vec![
            Node::root("root", "Desktop"),
            Node::folder("docs", "Documents", "root"),
            Node::folder("pics", "Pictures", "root"),
            Node::folder("holiday", "Holiday", "pics"),
            Node::file("beach", "beach.jpg", "holiday"),
            Node::file("readme", "readme.txt", "root"),
        ])?,
        vec![
            Step::new(
                "open-documents",
                "Double-click the Documents folder to open it",
                in_folder("docs"),
            ),
            Step::new(
                "back-to-desktop",
                "Go back to the Desktop",
                at_root(),
            ),
            Step::new(
                "open-holiday",
                "Open Pictures, then open the Holiday folder inside it",
                in_folder("holiday"),
            ),
        ],
    );

    let create = Level::new(
        "create",
        "Making folders",
        NodeCollection::from_nodes(vec![
            Node::root("root", "Desktop"),
            Node::folder("docs", "Documents", "root"),
        ])?,
        vec![
            Step::new(
                "make-folder",
                "Create a new folder on the Desktop",
                child_count_at_least("root", 2),
            ),
            Step::new(
                "name-school",
                "Rename the new folder to School",
                child_named("root", "School", NodeKind::Folder),
            ),
            Step::new("open-school", "Open the School folder", in_folder_named("School")),
            Step::new(
                "make-maths",
                "Inside School, create a folder called Maths",
                folder_named_inside("Maths", "School"),
            ),
        ],
    );

    let tidy = Level::new(
        "tidy",
        "Tidying up",
        NodeCollection::from_nodes(vec![
            Node::root("root", "Desktop"),
            Node::folder("docs", "Documents", "root"),
            Node::folder("pics", "Pictures", "root"),
            Node::file("essay", "essay.docx", "root"),
            Node::file("photo", "photo.jpg", "root"),
            Node::file("notes", "old-notes.txt", "root"),
        ])?,
        vec![
            Step::new(
                "file-essay",
                "Drag essay.docx into the Documents folder",
                node_inside("essay", "docs"),
            ),
            Step::new(
                "file-photo",
                "Drag photo.jpg into the Pictures folder",
                node_inside("photo", "pics"),
            ),
            Step::new(
                "delete-notes",
                "Delete old-notes.txt, you no longer need it",
                node_absent("notes"),
            ),
        ],
    );

    let organise = Level::new(
        "organise",
        "Organising folders",
        NodeCollection::from_nodes(vec![
            Node::root("root", "Desktop"),
            Node::folder("projects", "Projects", "root"),
            Node::folder("archive", "Archive", "root"),
            Node::folder("y2023", "2023", "projects"),
            Node::file("budget", "budget.xlsx", "y2023"),
            Node::file("plan", "plan.docx", "projects"),
        ])?,
        vec![
            Step::new(
                "archive-2023",
                "Move the 2023 folder from Projects into Archive",
                node_inside("y2023", "archive"),
            ),
            Step::new(
                "open-archived",
                "Open Archive, then open 2023",
                path_is(&["Archive", "2023"]),
            ),
            Step::new(
                "rename-budget",
                "Rename budget.xlsx to budget-final.xlsx",
                node_named("budget", "budget-final.xlsx"),
            ),
            Step::new(
                "file-plan",
                "Create a folder called Current in Projects and move plan.docx into it",
                node_inside_named("plan", "Current"),
            ),
        ],
    );

    Ok(vec![navigate, create, tidy, organise])
}

fn quick_levels() -> Result<Vec<Level>, ApiError> {
    let basics = Level::new(
        "quick-basics",
        "The basics",
        NodeCollection::from_nodes(vec![
            Node::root("root", "Desktop"),
            Node::folder("docs", "Documents", "root"),
        ])?,
        vec![
            Step::new("open-documents", "Open the Documents folder", in_folder("docs")),
            Step::new(
                "make-folder",
                "Create a new folder inside Documents",
                child_count_at_least("docs", 1),
            ),
            Step::new("back-to-desktop", "Go back to the Desktop", at_root()),
        ],
    );

    let cleanup = Level::new(
        "quick-cleanup",
        "Quick cleanup",
        NodeCollection::from_nodes(vec![
            Node::root("root", "Desktop"),
            Node::folder("inbox", "Inbox", "root"),
            Node::file("letter", "letter.txt", "root"),
            Node::file("junk", "junk.tmp", "root"),
        ])?,
        vec![
            Step::new(
                "file-letter",
                "Drag letter.txt into Inbox",
                node_inside("letter", "inbox"),
            ),
            Step::new("delete-junk", "Delete junk.tmp", node_absent("junk")),
        ],
    );

    Ok(vec![basics, cleanup])
}
