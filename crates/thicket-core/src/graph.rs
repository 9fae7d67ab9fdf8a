//! Graph descriptions.
//!
//! A [`GraphDescription`] is the intermediate form between a mind-map tree
//! and the layout engine: ordered nodes, ordered directed edges and the
//! graph-level attributes that steer layout and rasterization. It holds no
//! positions; placement is left to the engine.
//!
//! Insertion order is kept for both nodes and edges, since it decides
//! sibling order in the final layout.

use std::collections::HashMap;

use thiserror::Error;

use crate::{
    color::Color,
    identifier::NodeId,
    style::{Direction, EdgeStyle, LineStyle, NodeStyle, StyleProfile},
};

/// Structural errors raised while building a [`GraphDescription`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("node `{0}` is already part of the graph")]
    DuplicateNode(NodeId),

    #[error("edge endpoint `{0}` is not part of the graph")]
    UnknownNode(NodeId),
}

/// Graph-level layout and output attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphAttributes {
    comment: String,
    direction: Direction,
    splines: LineStyle,
    rank_sep: f32,
    node_sep: f32,
    dpi: u32,
    background: Color,
    size: (f32, f32),
}

impl GraphAttributes {
    /// Builds the attributes for a diagram titled `title` drawn with `profile`.
    ///
    /// Spacing is fixed at 0.8in between ranks and 0.5in between siblings,
    /// the canvas is capped at 11×11 inches on a white background.
    pub fn new(title: &str, profile: &StyleProfile, dpi: u32) -> Self {
        Self {
            comment: format!("Mind Map - {title}"),
            direction: profile.direction(),
            splines: profile.line_style(),
            rank_sep: 0.8,
            node_sep: 0.5,
            dpi,
            background: Color::new("white").expect("'white' is a valid CSS color"),
            size: (11.0, 11.0),
        }
    }

    /// Returns the graph comment, `Mind Map - <title>`.
    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Returns the rank direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the edge routing style.
    pub fn splines(&self) -> LineStyle {
        self.splines
    }

    /// Returns the separation between ranks in inches.
    pub fn rank_sep(&self) -> f32 {
        self.rank_sep
    }

    /// Returns the separation between nodes of one rank in inches.
    pub fn node_sep(&self) -> f32 {
        self.node_sep
    }

    /// Raster resolution in dots per inch.
    pub fn dpi(&self) -> u32 {
        self.dpi
    }

    /// Returns the canvas color.
    pub fn background(&self) -> Color {
        self.background
    }

    /// Maximum drawing size in inches, as (width, height).
    pub fn size(&self) -> (f32, f32) {
        self.size
    }
}

/// A node of the composed graph.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode {
    id: NodeId,
    label: String,
    depth: usize,
    style: NodeStyle,
}

impl GraphNode {
    /// Creates a node with an already formatted label and resolved style.
    pub fn new(id: NodeId, label: String, depth: usize, style: NodeStyle) -> Self {
        Self {
            id,
            label,
            depth,
            style,
        }
    }

    /// Returns the node's identifier.
    pub fn id(&self) -> &NodeId {
        &self.id
    }

    /// The display label; lines are separated by `\n`.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the distance from the root.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the resolved node style.
    pub fn style(&self) -> &NodeStyle {
        &self.style
    }
}

/// A directed parent-to-child edge.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphEdge {
    source: NodeId,
    target: NodeId,
    style: EdgeStyle,
}

impl GraphEdge {
    /// Returns the parent endpoint.
    pub fn source(&self) -> &NodeId {
        &self.source
    }

    /// Returns the child endpoint.
    pub fn target(&self) -> &NodeId {
        &self.target
    }

    /// Returns the edge style.
    pub fn style(&self) -> &EdgeStyle {
        &self.style
    }
}

/// Ordered nodes and edges plus graph-level attributes.
#[derive(Debug, Clone)]
pub struct GraphDescription {
    attributes: GraphAttributes,
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
    index: HashMap<NodeId, usize>,
}

impl GraphDescription {
    /// Creates an empty description with the given graph attributes.
    pub fn new(attributes: GraphAttributes) -> Self {
        Self {
            attributes,
            nodes: Vec::new(),
            edges: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Returns the graph-level attributes.
    pub fn attributes(&self) -> &GraphAttributes {
        &self.attributes
    }

    /// Returns the nodes in emission order.
    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    /// Returns the edges in emission order.
    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    /// Looks a node up by id.
    pub fn node(&self, id: &NodeId) -> Option<&GraphNode> {
        self.index.get(id).map(|&idx| &self.nodes[idx])
    }

    /// Appends a node.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicateNode`] if a node with the same id exists.
    pub fn add_node(&mut self, node: GraphNode) -> Result<(), GraphError> {
        if self.index.contains_key(node.id()) {
            return Err(GraphError::DuplicateNode(node.id().clone()));
        }
        self.index.insert(node.id().clone(), self.nodes.len());
        self.nodes.push(node);
        Ok(())
    }

    /// Appends an edge from `source` to `target`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownNode`] unless both endpoints were added
    /// before.
    pub fn add_edge(
        &mut self,
        source: NodeId,
        target: NodeId,
        style: EdgeStyle,
    ) -> Result<(), GraphError> {
        for endpoint in [&source, &target] {
            if !self.index.contains_key(endpoint) {
                return Err(GraphError::UnknownNode(endpoint.clone()));
            }
        }
        self.edges.push(GraphEdge {
            source,
            target,
            style,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn description() -> (GraphDescription, StyleProfile) {
        let profile = StyleProfile::default();
        let attributes = GraphAttributes::new("Test", &profile, 300);
        (GraphDescription::new(attributes), profile)
    }

    #[test]
    fn test_attributes_from_profile() {
        let profile = StyleProfile::default().with_direction(Direction::LR);
        let attributes = GraphAttributes::new("Plan", &profile, 150);

        assert_eq!(attributes.comment(), "Mind Map - Plan");
        assert_eq!(attributes.direction(), Direction::LR);
        assert_eq!(attributes.splines(), LineStyle::Curved);
        assert_eq!(attributes.dpi(), 150);
        assert_eq!(attributes.background().to_hex(), "#ffffff");
    }

    #[test]
    fn test_add_and_lookup() {
        let (mut graph, profile) = description();
        let id = NodeId::from_index(0);
        graph
            .add_node(GraphNode::new(
                id.clone(),
                "Root".to_string(),
                0,
                profile.resolve(0, None),
            ))
            .unwrap();

        assert_eq!(graph.nodes().len(), 1);
        assert_eq!(graph.node(&id).map(GraphNode::label), Some("Root"));
        assert!(graph.node(&NodeId::from_index(9)).is_none());
    }

    #[test]
    fn test_duplicate_node_rejected() {
        let (mut graph, profile) = description();
        let node = GraphNode::new(NodeId::from_index(0), "A".into(), 0, profile.resolve(0, None));

        graph.add_node(node.clone()).unwrap();
        assert_eq!(
            graph.add_node(node),
            Err(GraphError::DuplicateNode(NodeId::from_index(0)))
        );
    }

    #[test]
    fn test_edge_requires_known_endpoints() {
        let (mut graph, profile) = description();
        graph
            .add_node(GraphNode::new(
                NodeId::from_index(0),
                "A".into(),
                0,
                profile.resolve(0, None),
            ))
            .unwrap();

        let result = graph.add_edge(
            NodeId::from_index(0),
            NodeId::from_index(1),
            EdgeStyle::for_profile(&profile),
        );

        assert_eq!(result, Err(GraphError::UnknownNode(NodeId::from_index(1))));
        assert!(graph.edges().is_empty());
    }
}
