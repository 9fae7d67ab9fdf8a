//! Thicket - Mind-map diagrams rendered through Graphviz.
//!
//! Thicket turns a tree of topics into a styled Graphviz graph description,
//! rasterizes it with `dot` and optionally packages the image as a PDF with
//! ImageMagick. Partial failures are reported rather than raised: when the
//! image renders but the document conversion fails, the caller still gets the
//! image.

pub mod compose;
pub mod config;
pub mod dot;
pub mod engine;
pub mod preflight;

mod error;
mod export;

pub use thicket_core::{color, graph, identifier, label, request, style, tree};

pub use error::ThicketError;
pub use export::{
    ArtifactKind, Exporter, FailureStage, PipelineState, RenderReport, RenderStatus,
};

use log::{debug, info, trace};

use config::AppConfig;
use engine::{GraphvizEngine, ImageMagickConverter};
use graph::GraphDescription;
use request::MindMapRequest;
use style::StyleProfile;

/// Builder for composing and rendering mind-map requests.
///
/// This ties a configuration to the composition and export stages.
///
/// # Examples
///
/// ```rust,no_run
/// use thicket::{MindMapBuilder, config::AppConfig, request::MindMapRequest, tree::TreeNode};
///
/// let request = MindMapRequest::new(
///     TreeNode::new("Rust").with_child(TreeNode::new("Ownership")),
/// );
///
/// // With custom config
/// let builder = MindMapBuilder::new(AppConfig::default().with_output_directory("maps"));
///
/// // Inspect the DOT source
/// let source = builder.render_dot(&request).expect("Failed to compose");
///
/// // Or render the files
/// let report = builder.render(&request).expect("Failed to render");
/// println!("{}", report.message());
///
/// // Or use default config
/// let builder = MindMapBuilder::default();
/// ```
#[derive(Debug, Default)]
pub struct MindMapBuilder {
    config: AppConfig,
}

impl MindMapBuilder {
    /// Create a new builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Output location, engine settings and default style profile
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Returns the profile a request renders with: its own when present,
    /// the configured default otherwise.
    pub fn profile_for<'a>(&'a self, request: &'a MindMapRequest) -> &'a StyleProfile {
        request.style().unwrap_or_else(|| self.config.style())
    }

    /// Compose a request into a graph description without running any engine.
    ///
    /// # Errors
    ///
    /// Returns [`ThicketError::Compose`] when a topic has a blank title.
    ///
    /// # Examples
    ///
    /// ```
    /// use thicket::{MindMapBuilder, request::MindMapRequest, tree::TreeNode};
    ///
    /// let request = MindMapRequest::new(
    ///     TreeNode::new("A").with_child(TreeNode::new("B").with_content("short")),
    /// );
    /// let graph = MindMapBuilder::default().compose(&request).unwrap();
    ///
    /// assert_eq!(graph.nodes().len(), 2);
    /// assert_eq!(graph.edges().len(), 1);
    /// ```
    pub fn compose(&self, request: &MindMapRequest) -> Result<GraphDescription, ThicketError> {
        info!(title = request.title(); "Composing mind map");
        let graph = compose::compose(
            &request.root(),
            self.profile_for(request),
            self.config.engines().dpi(),
        )?;
        trace!(graph:?; "Composed graph description");
        Ok(graph)
    }

    /// Compose a request and print it as DOT source.
    ///
    /// # Errors
    ///
    /// Returns [`ThicketError::Compose`] when a topic has a blank title.
    pub fn render_dot(&self, request: &MindMapRequest) -> Result<String, ThicketError> {
        let graph = self.compose(request)?;
        let source = dot::to_dot(&graph);
        debug!(bytes = source.len(); "DOT source generated");
        Ok(source)
    }

    /// Create an exporter running the configured Graphviz and ImageMagick
    /// binaries.
    pub fn exporter(&self) -> Exporter<GraphvizEngine, ImageMagickConverter> {
        Exporter::from_config(&self.config)
    }

    /// Render a request into the files its output format asks for.
    ///
    /// # Errors
    ///
    /// Returns `ThicketError` when an engine is missing, the tree cannot be
    /// composed or the output directory cannot be created. Engine failures
    /// come back inside the [`RenderReport`].
    pub fn render(&self, request: &MindMapRequest) -> Result<RenderReport, ThicketError> {
        render_with(&self.exporter(), request, self.config.style())
    }
}

/// Render `request` with `exporter`, falling back to `default_style` when the
/// request carries no profile of its own.
///
/// # Errors
///
/// See [`Exporter::export`].
pub fn render_with<L, C>(
    exporter: &Exporter<L, C>,
    request: &MindMapRequest,
    default_style: &StyleProfile,
) -> Result<RenderReport, ThicketError>
where
    L: engine::LayoutEngine,
    C: engine::DocumentConverter,
{
    let profile = request.style().unwrap_or(default_style);
    exporter.export(&request.root(), profile, request.output_format())
}
