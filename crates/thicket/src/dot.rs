//! DOT translation.
//!
//! Converts a [`GraphDescription`] into the Graphviz DOT language. The graph
//! is first built as a [`dot_structures::Graph`] and then printed with the
//! `graphviz-rust` printer, so the syntax is never assembled by hand. Every
//! attribute value is emitted as a quoted string with backslashes, quotes and
//! newlines escaped, which keeps arbitrary titles and body text from breaking
//! out of the label.

use dot_structures::{
    Attribute, Edge, EdgeTy, Graph, GraphAttributes as DotGraphAttributes, Id, Node,
    NodeId as DotNodeId, Stmt, Vertex,
};
use graphviz_rust::printer::{DotPrinter, PrinterContext};

use thicket_core::{
    graph::{GraphAttributes, GraphDescription, GraphEdge, GraphNode},
    identifier::NodeId,
};

/// Name given to every emitted digraph.
const GRAPH_NAME: &str = "mindmap";

/// Builds the DOT syntax tree for `graph`.
pub fn to_graph(graph: &GraphDescription) -> Graph {
    let mut stmts = Vec::with_capacity(graph.nodes().len() + graph.edges().len() + 1);
    stmts.push(Stmt::GAttribute(DotGraphAttributes::Graph(graph_attributes(
        graph.attributes(),
    ))));
    stmts.extend(graph.nodes().iter().map(|node| Stmt::Node(dot_node(node))));
    stmts.extend(graph.edges().iter().map(|edge| Stmt::Edge(dot_edge(edge))));

    Graph::DiGraph {
        id: Id::Plain(GRAPH_NAME.to_string()),
        strict: false,
        stmts,
    }
}

/// Prints `graph` as DOT source.
///
/// # Examples
///
/// ```
/// use thicket::{compose::compose, dot::to_dot};
/// use thicket_core::{style::StyleProfile, tree::TreeNode};
///
/// let tree = TreeNode::new("Plan").with_child(TreeNode::new("Ship"));
/// let graph = compose(&tree, &StyleProfile::default(), 300).unwrap();
/// let source = to_dot(&graph);
///
/// assert!(source.starts_with("digraph mindmap"));
/// assert!(source.contains("node_0"));
/// ```
pub fn to_dot(graph: &GraphDescription) -> String {
    to_graph(graph).print(&mut PrinterContext::default())
}

// ============================================================================
// Statements
// ============================================================================

fn graph_attributes(attributes: &GraphAttributes) -> Vec<Attribute> {
    let (width, height) = attributes.size();
    vec![
        attr("layout", "dot"),
        attr("rankdir", attributes.direction().as_str()),
        attr("splines", attributes.splines().as_str()),
        attr("ranksep", number(attributes.rank_sep())),
        attr("nodesep", number(attributes.node_sep())),
        attr("dpi", attributes.dpi().to_string()),
        attr("bgcolor", attributes.background().to_hex()),
        attr("overlap", "scale"),
        attr("size", format!("{},{}", number(width), number(height))),
        attr("charset", "UTF-8"),
        attr("comment", attributes.comment()),
    ]
}

fn dot_node(node: &GraphNode) -> Node {
    let style = node.style();
    let mut attributes = vec![
        attr("label", node.label()),
        attr("shape", style.shape().as_str()),
        attr("style", style.fill_style()),
        attr("fillcolor", style.fill_color().to_hex()),
        attr("color", style.border_color().to_hex()),
        attr("fontname", style.font_name()),
        attr("fontsize", number(style.font_size())),
        attr("width", number(style.width())),
        attr("height", number(style.height())),
        attr("penwidth", number(style.pen_width())),
    ];
    if let Some(font_color) = style.font_color() {
        attributes.push(attr("fontcolor", font_color.to_hex()));
    }
    Node::new(node_id(node.id()), attributes)
}

fn dot_edge(edge: &GraphEdge) -> Edge {
    let style = edge.style();
    Edge {
        ty: EdgeTy::Pair(
            Vertex::N(node_id(edge.source())),
            Vertex::N(node_id(edge.target())),
        ),
        attributes: vec![
            attr("color", style.color().to_hex()),
            attr("penwidth", number(style.pen_width())),
            attr("arrowhead", style.arrow_head()),
            attr("arrowsize", number(style.arrow_size())),
        ],
    }
}

// ============================================================================
// Values
// ============================================================================

fn node_id(id: &NodeId) -> DotNodeId {
    DotNodeId(Id::Plain(id.as_str().to_string()), None)
}

fn attr(key: &str, value: impl AsRef<str>) -> Attribute {
    Attribute(Id::Plain(key.to_string()), quoted(value.as_ref()))
}

fn number(value: f32) -> String {
    value.to_string()
}

/// Wraps `value` in double quotes, escaping what DOT would otherwise read as
/// string syntax.
fn quoted(value: &str) -> Id {
    let mut escaped = String::with_capacity(value.len() + 2);
    escaped.push('"');
    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => {}
            other => escaped.push(other),
        }
    }
    escaped.push('"');
    Id::Escaped(escaped)
}
