//! Render requests.
//!
//! A [`MindMapRequest`] is the document a caller submits: the root topic's
//! title and body, its top-level topics, an optional style profile and the
//! formats to export.
//!
//! ```json
//! {
//!   "title": "Project",
//!   "content": "Q3 plan",
//!   "nodes": [{"title": "Design", "children": [{"title": "Review"}]}],
//!   "style": {"direction": "LR"},
//!   "output_format": "both"
//! }
//! ```

use std::{fmt, str::FromStr};

use serde::Deserialize;

use crate::{style::StyleProfile, tree::TreeNode};

/// Which artifacts a render should produce.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Image only
    Png,
    /// Document only; the image is still rendered as an intermediate
    Pdf,
    /// Image and document (default)
    #[default]
    Both,
}

impl OutputFormat {
    /// Returns `true` if the caller asked for the image itself.
    pub fn wants_image(self) -> bool {
        matches!(self, Self::Png | Self::Both)
    }

    /// Returns `true` if the caller asked for a document.
    pub fn wants_document(self) -> bool {
        matches!(self, Self::Pdf | Self::Both)
    }

    /// Returns the wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Pdf => "pdf",
            Self::Both => "both",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "png" => Ok(Self::Png),
            "pdf" => Ok(Self::Pdf),
            "both" => Ok(Self::Both),
            _ => Err(format!(
                "invalid output format `{s}`, valid values: png, pdf, both"
            )),
        }
    }
}

/// A mind-map render request.
#[derive(Debug, Clone, Deserialize)]
pub struct MindMapRequest {
    title: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    nodes: Vec<TreeNode>,
    #[serde(default)]
    style: Option<StyleProfile>,
    #[serde(default)]
    output_format: OutputFormat,
}

impl MindMapRequest {
    /// Creates a request whose root is `root`.
    pub fn new(root: TreeNode) -> Self {
        Self {
            title: root.title().to_string(),
            content: root.content().to_string(),
            nodes: root.children().to_vec(),
            style: None,
            output_format: OutputFormat::default(),
        }
    }

    /// Attaches a style profile that replaces the configured default.
    pub fn with_style(mut self, style: StyleProfile) -> Self {
        self.style = Some(style);
        self
    }

    /// Selects which files the render produces.
    pub fn with_output_format(mut self, output_format: OutputFormat) -> Self {
        self.output_format = output_format;
        self
    }

    /// Returns the root topic's title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the request's own profile, if any.
    pub fn style(&self) -> Option<&StyleProfile> {
        self.style.as_ref()
    }

    /// Returns the requested output format.
    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    /// Builds the root topic: the request's title and content with the
    /// request's nodes as its children.
    pub fn root(&self) -> TreeNode {
        TreeNode::new(&self.title)
            .with_content(&self.content)
            .with_children(self.nodes.iter().cloned())
    }
}
