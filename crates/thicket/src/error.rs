//! Error types for Thicket operations.
//!
//! This module provides the main error type [`ThicketError`] which wraps
//! the conditions that can stop or degrade a render.

use std::io;

use thiserror::Error;

use thicket_core::graph::GraphError;

use crate::engine::EngineError;

/// The main error type for Thicket operations.
///
/// # Propagation
///
/// [`DependencyMissing`](Self::DependencyMissing) and [`Compose`](Self::Compose)
/// are raised before anything touches the filesystem. The engine variants are
/// carried inside a [`RenderReport`](crate::RenderReport) so the caller still
/// learns which files were produced.
#[derive(Debug, Error)]
pub enum ThicketError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid request: {0}")]
    Request(String),

    #[error("Dependency missing: `{tool}` is not available: {detail}")]
    DependencyMissing { tool: String, detail: String },

    #[error("Compose error: {0}")]
    Compose(String),

    #[error("Image rendering failed in `{tool}`: {source}")]
    ImageRender { tool: String, source: EngineError },

    #[error("Document conversion failed in `{tool}`: {source}")]
    DocumentConvert { tool: String, source: EngineError },
}

impl From<GraphError> for ThicketError {
    fn from(error: GraphError) -> Self {
        Self::Compose(error.to_string())
    }
}

impl ThicketError {
    /// Returns the name of the external tool involved, if any.
    pub fn tool(&self) -> Option<&str> {
        match self {
            Self::DependencyMissing { tool, .. }
            | Self::ImageRender { tool, .. }
            | Self::DocumentConvert { tool, .. } => Some(tool),
            Self::Io(_) | Self::Config(_) | Self::Request(_) | Self::Compose(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use thicket_core::identifier::NodeId;

    use super::*;

    #[test]
    fn test_graph_error_becomes_compose_error() {
        let err = ThicketError::from(GraphError::UnknownNode(NodeId::from_index(4)));

        assert!(matches!(err, ThicketError::Compose(_)));
        assert!(err.to_string().contains("node_4"));
        assert_eq!(err.tool(), None);
    }

    #[test]
    fn test_tool_is_reported() {
        let err = ThicketError::DependencyMissing {
            tool: "dot".to_string(),
            detail: "not found".to_string(),
        };

        assert_eq!(err.tool(), Some("dot"));
        assert_eq!(
            err.to_string(),
            "Dependency missing: `dot` is not available: not found"
        );
    }
}
