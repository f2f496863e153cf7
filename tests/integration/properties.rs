use fsdrill::store::NodeStore;
use fsdrill::tree::names_match;
use fsdrill::{Node, NodeCollection, NodeId, NodeKind, StoreError};
use proptest::prelude::*;

fn seed() -> NodeCollection {
    NodeCollection::from_nodes(vec![
        Node::root("root", "Desktop"),
        Node::folder("f1", "One", "root"),
        Node::folder("f2", "Two", "f1"),
        Node::folder("f3", "Three", "f2"),
        Node::folder("f4", "Four", "root"),
        Node::file("x", "x.txt", "f2"),
    ])
    .unwrap()
}

#[derive(Debug, Clone)]
enum Op {
    Create(usize, bool),
    Rename(usize, String),
    Move(usize, usize),
    Delete(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..16, any::<bool>()).prop_map(|(p, folder)| Op::Create(p, folder)),
        (0usize..16, prop::sample::select(vec!["new folder", "NEW FOLDER", "One", "a", "A", " b "]))
            .prop_map(|(n, name)| Op::Rename(n, name.to_string())),
        (0usize..16, 0usize..16).prop_map(|(a, b)| Op::Move(a, b)),
        (1usize..16).prop_map(Op::Delete),
    ]
}

fn pick(nodes: &NodeCollection, index: usize) -> NodeId {
    let ids: Vec<NodeId> = nodes.iter().map(|n| n.id.clone()).collect();
    ids[index % ids.len()].clone()
}

fn assert_unique_siblings(nodes: &NodeCollection) {
    for a in nodes.iter() {
        for b in nodes.iter() {
            if a.id != b.id && a.parent.is_some() && a.parent == b.parent {
                assert!(
                    !names_match(&a.name, &b.name),
                    "siblings {:?} and {:?} share a name",
                    a,
                    b
                );
            }
        }
    }
}

fn assert_acyclic(nodes: &NodeCollection) {
    for node in nodes.iter() {
        assert!(
            !nodes.ancestors(&node.id).contains(&node.id),
            "{} is its own ancestor",
            node.id
        );
    }
}

proptest! {
    #[test]
    fn creates_in_one_parent_stay_unique(count in 1usize..24, folders in any::<bool>()) {
        let mut store = NodeStore::new(seed());
        let parent = NodeId::from("f4");
        let kind = if folders { NodeKind::Folder } else { NodeKind::File };
        for _ in 0..count {
            store.create(&parent, kind).unwrap();
        }
        let children = store.nodes().list_children(&parent);
        prop_assert_eq!(children.len(), count);
        assert_unique_siblings(store.nodes());
    }

    #[test]
    fn moving_into_a_descendant_is_rejected(pick_a in 0usize..4, pick_b in 0usize..4) {
        let mut store = NodeStore::new(seed());
        let before = store.nodes().clone();
        let folders = ["f1", "f2", "f3", "f4"];
        let a = NodeId::from(folders[pick_a]);
        let b = NodeId::from(folders[pick_b]);
        if before.is_ancestor(&a, &b) {
            prop_assert_eq!(store.move_node(&a, &b), Err(StoreError::CyclicMove));
            prop_assert_eq!(store.nodes(), &before);
        }
    }

    #[test]
    fn random_edits_keep_invariants(ops in prop::collection::vec(op(), 1..40)) {
        let mut store = NodeStore::new(seed());
        for op in ops {
            let before = store.nodes().clone();
            let result = match op {
                Op::Create(p, folder) => {
                    let parent = pick(&before, p);
                    let kind = if folder { NodeKind::Folder } else { NodeKind::File };
                    store.create(&parent, kind).map(|_| ())
                }
                Op::Rename(n, name) => store.rename(&pick(&before, n), &name).map(|_| ()),
                Op::Move(a, b) => store.move_node(&pick(&before, a), &pick(&before, b)).map(|_| ()),
                Op::Delete(n) => store.delete(&pick(&before, n)).map(|_| ()),
            };
            if result.is_err() {
                prop_assert_eq!(store.nodes(), &before);
            }
            assert_unique_siblings(store.nodes());
            assert_acyclic(store.nodes());
        }
    }
}
