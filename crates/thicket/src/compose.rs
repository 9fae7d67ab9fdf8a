//! Tree to graph composition.
//!
//! [`compose`] walks a mind-map tree depth-first in pre-order and emits one
//! graph node per tree node and one edge from every non-root node's parent.
//! The walk uses an explicit stack, so deep trees cannot exhaust the call
//! stack. No I/O happens here.

use log::{debug, trace};

use thicket_core::{
    graph::{GraphAttributes, GraphDescription, GraphNode},
    identifier::{IdAllocator, NodeId},
    label::LabelFormatter,
    style::{EdgeStyle, StyleProfile},
    tree::TreeNode,
};

use crate::ThicketError;

/// A pending visit: the node, its parent's id, its depth and its child-index
/// path from the root.
struct Frame<'a> {
    node: &'a TreeNode,
    parent: Option<NodeId>,
    depth: usize,
    path: Vec<usize>,
}

/// Composes `root` into a graph description styled by `profile`.
///
/// # Arguments
///
/// * `root` - The root topic; it gets the root tier and no incoming edge.
/// * `profile` - Colors, font, direction and wrap width for this render.
/// * `dpi` - Output resolution recorded in the graph attributes.
///
/// # Errors
///
/// Returns [`ThicketError::Compose`] if any node has a blank title.
///
/// # Examples
///
/// ```
/// use thicket::compose::compose;
/// use thicket_core::{style::StyleProfile, tree::TreeNode};
///
/// let tree = TreeNode::new("A").with_child(TreeNode::new("B").with_content("short"));
/// let graph = compose(&tree, &StyleProfile::default(), 300).unwrap();
///
/// assert_eq!(graph.nodes().len(), 2);
/// assert_eq!(graph.edges().len(), 1);
/// assert_eq!(graph.nodes()[1].label(), "B\nshort");
/// ```
pub fn compose(
    root: &TreeNode,
    profile: &StyleProfile,
    dpi: u32,
) -> Result<GraphDescription, ThicketError> {
    let formatter = LabelFormatter::new(profile.wrap_width());
    let edge_style = EdgeStyle::for_profile(profile);
    let mut ids = IdAllocator::new();
    let mut graph = GraphDescription::new(GraphAttributes::new(root.title(), profile, dpi));

    let mut stack = vec![Frame {
        node: root,
        parent: None,
        depth: 0,
        path: Vec::new(),
    }];

    while let Some(Frame {
        node,
        parent,
        depth,
        path,
    }) = stack.pop()
    {
        if node.title().trim().is_empty() {
            return Err(ThicketError::Compose(format!(
                "node at {} has an empty title",
                describe_path(&path)
            )));
        }

        let id = ids.allocate();
        let style = profile.resolve(depth, node.style_overrides());
        let label = formatter.format(node.title(), node.content());
        trace!(id:% = id, depth; "Emitting node");
        graph.add_node(GraphNode::new(id.clone(), label, depth, style))?;

        if let Some(parent) = parent {
            graph.add_edge(parent, id.clone(), edge_style.clone())?;
        }

        // Reverse so the first child is popped, and emitted, first
        for (idx, child) in node.children().iter().enumerate().rev() {
            let mut child_path = path.clone();
            child_path.push(idx);
            stack.push(Frame {
                node: child,
                parent: Some(id.clone()),
                depth: depth + 1,
                path: child_path,
            });
        }
    }

    debug!(
        nodes = graph.nodes().len(),
        edges = graph.edges().len();
        "Graph composed"
    );
    Ok(graph)
}

fn describe_path(path: &[usize]) -> String {
    if path.is_empty() {
        return String::from("root");
    }
    let indices: Vec<String> = path.iter().map(usize::to_string).collect();
    format!("root/{}", indices.join("/"))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;
    use thicket_core::style::{Direction, StyleOverrides, StyleTier};

    use super::*;

    fn compose_default(root: &TreeNode) -> GraphDescription {
        compose(root, &StyleProfile::default(), 300).unwrap()
    }

    #[test]
    fn test_two_node_scenario() {
        let tree = TreeNode::new("A").with_child(TreeNode::new("B").with_content("short"));
        let graph = compose_default(&tree);

        assert_eq!(graph.nodes().len(), 2);
        assert_eq!(graph.edges().len(), 1);

        let root = &graph.nodes()[0];
        let child = &graph.nodes()[1];
        assert_ne!(root.id(), child.id());
        assert_eq!(root.label(), "A");
        assert_eq!(child.label(), "B\nshort");

        let edge = &graph.edges()[0];
        assert_eq!(edge.source(), root.id());
        assert_eq!(edge.target(), child.id());
    }

    #[test]
    fn test_single_root_has_no_edges() {
        let graph = compose_default(&TreeNode::new("alone"));

        assert_eq!(graph.nodes().len(), 1);
        assert!(graph.edges().is_empty());
        assert_eq!(graph.nodes()[0].style().tier(), StyleTier::Root);
    }

    #[test]
    fn test_preorder_and_sibling_order() {
        let tree = TreeNode::new("root")
            .with_child(
                TreeNode::new("a")
                    .with_child(TreeNode::new("a1"))
                    .with_child(TreeNode::new("a2")),
            )
            .with_child(TreeNode::new("b"))
            .with_child(TreeNode::new("c").with_child(TreeNode::new("c1")));
        let graph = compose_default(&tree);

        let labels: Vec<_> = graph.nodes().iter().map(GraphNode::label).collect();
        assert_eq!(labels, ["root", "a", "a1", "a2", "b", "c", "c1"]);
    }

    #[test]
    fn test_duplicate_titles_get_distinct_ids() {
        let tree = TreeNode::new("same")
            .with_child(TreeNode::new("same"))
            .with_child(TreeNode::new("same").with_child(TreeNode::new("same")));
        let graph = compose_default(&tree);

        let ids: HashSet<_> = graph.nodes().iter().map(GraphNode::id).collect();
        assert_eq!(ids.len(), 4);
        assert_eq!(graph.edges().len(), 3);
    }

    #[test]
    fn test_tiers_follow_depth() {
        let tree = TreeNode::new("r").with_child(
            TreeNode::new("m").with_child(TreeNode::new("s").with_child(TreeNode::new("deep"))),
        );
        let graph = compose_default(&tree);

        let tiers: Vec<_> = graph.nodes().iter().map(|n| n.style().tier()).collect();
        assert_eq!(
            tiers,
            [
                StyleTier::Root,
                StyleTier::Main,
                StyleTier::Sub,
                StyleTier::Sub
            ]
        );
        assert_eq!(graph.nodes()[2].style(), graph.nodes()[3].style());
        assert_eq!(graph.nodes()[3].depth(), 3);
    }

    #[test]
    fn test_overrides_reach_the_node() {
        let overrides = StyleOverrides {
            fontsize: Some(30.0),
            ..StyleOverrides::default()
        };
        let tree = TreeNode::new("r").with_child(TreeNode::new("x").with_style_overrides(overrides));
        let graph = compose_default(&tree);

        assert_eq!(graph.nodes()[1].style().font_size(), 30.0);
        assert_eq!(graph.nodes()[0].style().font_size(), 18.0);
    }

    #[test]
    fn test_profile_reaches_graph_attributes() {
        let profile = StyleProfile::default().with_direction(Direction::LR);
        let graph = compose(&TreeNode::new("Plan"), &profile, 96).unwrap();

        assert_eq!(graph.attributes().direction(), Direction::LR);
        assert_eq!(graph.attributes().dpi(), 96);
        assert_eq!(graph.attributes().comment(), "Mind Map - Plan");
    }

    #[test]
    fn test_wrap_width_comes_from_profile() {
        let profile = StyleProfile::default().with_wrap_width(5);
        let tree = TreeNode::new("t").with_content("aaa bbb");
        let graph = compose(&tree, &profile, 300).unwrap();

        assert_eq!(graph.nodes()[0].label(), "t\naaa\nbbb");
    }

    #[test]
    fn test_blank_title_is_compose_error() {
        let tree = TreeNode::new("root")
            .with_child(TreeNode::new("ok"))
            .with_child(TreeNode::new("ok").with_child(TreeNode::new("  ")));

        let err = compose(&tree, &StyleProfile::default(), 300).unwrap_err();
        match err {
            ThicketError::Compose(message) => assert!(message.contains("root/1/0")),
            other => panic!("Expected Compose error, got {other:?}"),
        }
    }

    #[test]
    fn test_deep_chain_does_not_overflow() {
        let mut tree = TreeNode::new("leaf");
        for depth in (0..20_000).rev() {
            tree = TreeNode::new(format!("n{depth}")).with_child(tree);
        }
        let graph = compose_default(&tree);

        assert_eq!(graph.nodes().len(), 20_001);
        assert_eq!(graph.edges().len(), 20_000);

        // Dropping a deep owned tree recurses, so unwind it iteratively
        let mut stack = vec![tree];
        while let Some(node) = stack.pop() {
            stack.extend(node.into_children());
        }
    }

    fn arb_tree() -> impl Strategy<Value = TreeNode> {
        let leaf = "[a-z]{1,8}".prop_map(|title: String| TreeNode::new(title));
        leaf.prop_recursive(5, 64, 6, |inner| {
            ("[a-z]{1,8}", "[a-z ]{0,30}", prop::collection::vec(inner, 0..6)).prop_map(
                |(title, content, children)| {
                    TreeNode::new(title)
                        .with_content(content)
                        .with_children(children)
                },
            )
        })
    }

    proptest! {
        #[test]
        fn prop_edges_are_nodes_minus_one(tree in arb_tree()) {
            let graph = compose_default(&tree);

            prop_assert_eq!(graph.nodes().len(), tree.node_count());
            prop_assert_eq!(graph.edges().len(), graph.nodes().len() - 1);
        }

        #[test]
        fn prop_edges_reference_emitted_nodes(tree in arb_tree()) {
            let graph = compose_default(&tree);
            let ids: HashSet<_> = graph.nodes().iter().map(GraphNode::id).collect();

            for edge in graph.edges() {
                prop_assert!(ids.contains(edge.source()));
                prop_assert!(ids.contains(edge.target()));
            }
            // Every node but the root has exactly one incoming edge
            let targets: HashSet<_> = graph.edges().iter().map(|e| e.target()).collect();
            prop_assert_eq!(targets.len(), graph.edges().len());
            prop_assert!(!targets.contains(graph.nodes()[0].id()));
        }

        #[test]
        fn prop_root_is_root_tier(tree in arb_tree()) {
            let graph = compose_default(&tree);
            prop_assert_eq!(graph.nodes()[0].style().tier(), StyleTier::Root);
        }
    }
}
