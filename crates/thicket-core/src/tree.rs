//! Mind-map trees.
//!
//! A [`TreeNode`] owns its children, so every tree is finite and acyclic by
//! construction. Children keep the order they were given in; that order
//! decides sibling placement in the rendered diagram.

use serde::Deserialize;

use crate::style::StyleOverrides;

/// One topic of a mind map.
///
/// # Examples
///
/// ```
/// use thicket_core::tree::TreeNode;
///
/// let tree = TreeNode::new("Rust")
///     .with_child(TreeNode::new("Ownership").with_content("one owner per value"))
///     .with_child(TreeNode::new("Traits"));
///
/// assert_eq!(tree.node_count(), 3);
/// assert_eq!(tree.max_depth(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TreeNode {
    title: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    children: Vec<TreeNode>,
    #[serde(default, rename = "style", alias = "style_overrides")]
    style_overrides: Option<StyleOverrides>,
}

impl TreeNode {
    /// Creates a leaf node with the given title and no body.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Sets the body text shown under the title.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Appends `child` after the existing children.
    pub fn with_child(mut self, child: TreeNode) -> Self {
        self.children.push(child);
        self
    }

    /// Appends all of `children` after the existing children, in order.
    pub fn with_children(mut self, children: impl IntoIterator<Item = TreeNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Sets per-node style overrides.
    pub fn with_style_overrides(mut self, overrides: StyleOverrides) -> Self {
        self.style_overrides = Some(overrides);
        self
    }

    /// Returns the title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the body text, possibly empty.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the children in order.
    pub fn children(&self) -> &[TreeNode] {
        &self.children
    }

    /// Consumes the node, returning its children.
    pub fn into_children(self) -> Vec<TreeNode> {
        self.children
    }

    /// Returns the overrides, treating an empty record as absent.
    pub fn style_overrides(&self) -> Option<&StyleOverrides> {
        self.style_overrides
            .as_ref()
            .filter(|overrides| !overrides.is_empty())
    }

    /// Counts this node and all of its descendants.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }

    /// Returns the depth of the deepest descendant, `0` for a leaf.
    pub fn max_depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 0)];
        while let Some((node, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            stack.extend(node.children.iter().map(|child| (child, depth + 1)));
        }
        deepest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_preserves_child_order() {
        let tree = TreeNode::new("root")
            .with_child(TreeNode::new("first"))
            .with_children([TreeNode::new("second"), TreeNode::new("third")]);

        let titles: Vec<_> = tree.children().iter().map(TreeNode::title).collect();
        assert_eq!(titles, ["first", "second", "third"]);
    }

    #[test]
    fn test_counts_and_depth() {
        let tree = TreeNode::new("a").with_child(
            TreeNode::new("b").with_child(TreeNode::new("c").with_child(TreeNode::new("d"))),
        );

        assert_eq!(tree.node_count(), 4);
        assert_eq!(tree.max_depth(), 3);
        assert_eq!(TreeNode::new("leaf").max_depth(), 0);
    }

    #[test]
    fn test_deserialize_minimal() {
        let tree: TreeNode = serde_json::from_str(r#"{"title": "A"}"#).unwrap();

        assert_eq!(tree.title(), "A");
        assert_eq!(tree.content(), "");
        assert!(tree.children().is_empty());
        assert!(tree.style_overrides().is_none());
    }

    #[test]
    fn test_deserialize_nested_with_style() {
        let json = r#"{
            "title": "A",
            "children": [
                {"title": "B", "content": "short", "style": {"fillcolor": "red"}},
                {"title": "C", "style": null}
            ]
        }"#;
        let tree: TreeNode = serde_json::from_str(json).unwrap();

        assert_eq!(tree.node_count(), 3);
        let b = &tree.children()[0];
        assert_eq!(b.content(), "short");
        assert_eq!(
            b.style_overrides().and_then(|o| o.fillcolor).map(|c| c.to_hex()),
            Some("#ff0000".to_string())
        );
        assert!(tree.children()[1].style_overrides().is_none());
    }

    #[test]
    fn test_empty_overrides_are_absent() {
        let tree: TreeNode = serde_json::from_str(r#"{"title": "A", "style": {}}"#).unwrap();
        assert!(tree.style_overrides().is_none());
    }

    #[test]
    fn test_deserialize_rejects_unknown_style_attribute() {
        let result = serde_json::from_str::<TreeNode>(r#"{"title": "A", "style": {"glow": "1"}}"#);
        assert!(result.is_err());
    }
}
