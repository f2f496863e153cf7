use fsdrill::level::goals::{at_root, in_folder, node_inside};
use fsdrill::{Level, LevelCatalog, Node, NodeCollection, NodeId, Step};
use std::sync::Arc;
use std::time::Duration;

pub const AUTO_ADVANCE: Duration = Duration::from_millis(1500);
pub const FEEDBACK_TTL: Duration = Duration::from_millis(3000);
pub const MARGIN: Duration = Duration::from_millis(1);

pub fn id(s: &str) -> NodeId {
    NodeId::from(s)
}

pub fn desktop_with_docs() -> NodeCollection {
    NodeCollection::from_nodes(vec![
        Node::root("root", "Desktop"),
        Node::folder("docs", "Documents", "root"),
        Node::folder("pics", "Pictures", "root"),
        Node::file("letter", "letter.txt", "root"),
    ])
    .unwrap()
}

/// Two levels. The first has a single step, "reach docs"; the second has three.
pub fn two_level_catalog() -> Arc<LevelCatalog> {
    let reach = Level::new(
        "reach",
        "Reach documents",
        desktop_with_docs(),
        vec![Step::new("reach-docs", "Open Documents", in_folder("docs"))],
    );
    let walk = Level::new(
        "walk",
        "Walk around",
        desktop_with_docs(),
        vec![
            Step::new("open-docs", "Open Documents", in_folder("docs")),
            Step::new("go-home", "Go back to the Desktop", at_root()),
            Step::new("file-letter", "Move letter.txt into Documents", node_inside("letter", "docs")),
        ],
    );
    Arc::new(LevelCatalog::new(vec![reach, walk]).unwrap())
}

/// A→B→C nested folders plus an unrelated D
pub fn nested_catalog() -> Arc<LevelCatalog> {
    let nodes = NodeCollection::from_nodes(vec![
        Node::root("root", "Desktop"),
        Node::folder("a", "A", "root"),
        Node::folder("b", "B", "a"),
        Node::folder("c", "C", "b"),
        Node::folder("d", "D", "root"),
    ])
    .unwrap();
    let level = Level::new(
        "nest",
        "Nesting",
        nodes,
        vec![Step::new("a-into-d", "Move A into D", node_inside("a", "d"))],
    );
    Arc::new(LevelCatalog::new(vec![level]).unwrap())
}

pub async fn wait(duration: Duration) {
    tokio::time::sleep(duration).await;
}
