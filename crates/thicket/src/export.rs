//! Export pipeline.
//!
//! An [`Exporter`] owns a layout engine, a document converter and the output
//! location. [`Exporter::export`] runs one render through the states listed
//! on [`PipelineState`]:
//!
//! 1. Preflight both engines, then compose the tree. Either failure returns
//!    `Err` before the output directory is touched.
//! 2. Render the image. A failure ends the render with
//!    [`RenderStatus::Failure`]; the converter is never called.
//! 3. Convert the image to a document when one was requested. A failure is a
//!    [`RenderStatus::Partial`] when the image was requested too, and a
//!    [`RenderStatus::Failure`] otherwise.
//!
//! Every path listed in the returned [`RenderReport`] exists on disk.

mod naming;
mod report;

pub use report::{ArtifactKind, FailureStage, PipelineState, RenderReport, RenderStatus};

use std::{fs, io, path::Path};

use indexmap::IndexMap;
use log::{debug, error, info, warn};

use thicket_core::{request::OutputFormat, style::StyleProfile, tree::TreeNode};

use crate::{
    ThicketError,
    compose::compose,
    config::{AppConfig, OutputConfig},
    engine::{
        DocumentConverter, EngineError, GraphvizEngine, ImageMagickConverter, LayoutEngine,
        ensure_output,
    },
    preflight,
};

/// Drives renders through a layout engine and a document converter.
///
/// The exporter holds no per-render state, so one instance can serve many
/// threads when its engines are `Sync`.
///
/// # Examples
///
/// ```rust,no_run
/// use thicket::{Exporter, RenderStatus, config::AppConfig};
/// use thicket_core::{request::OutputFormat, style::StyleProfile, tree::TreeNode};
///
/// let exporter = Exporter::from_config(&AppConfig::default());
/// let tree = TreeNode::new("Plan").with_child(TreeNode::new("Ship"));
///
/// let report = exporter
///     .export(&tree, &StyleProfile::default(), OutputFormat::Both)
///     .expect("Graphviz and ImageMagick are installed");
/// assert_eq!(report.status(), RenderStatus::Success);
/// ```
#[derive(Debug)]
pub struct Exporter<L, C> {
    layout: L,
    converter: C,
    output: OutputConfig,
    dpi: u32,
}

impl Exporter<GraphvizEngine, ImageMagickConverter> {
    /// Creates an exporter running Graphviz and ImageMagick as configured.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            GraphvizEngine::from_config(config.engines()),
            ImageMagickConverter::from_config(config.engines()),
            config.output().clone(),
        )
        .with_dpi(config.engines().dpi())
    }
}

impl<L, C> Exporter<L, C>
where
    L: LayoutEngine,
    C: DocumentConverter,
{
    /// Creates an exporter rendering at 300 dpi.
    ///
    /// # Arguments
    ///
    /// * `layout` - Engine that turns graph descriptions into images.
    /// * `converter` - Converter that turns images into documents.
    /// * `output` - Directory and file stem for produced files.
    pub fn new(layout: L, converter: C, output: OutputConfig) -> Self {
        Self {
            layout,
            converter,
            output,
            dpi: 300,
        }
    }

    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn layout(&self) -> &L {
        &self.layout
    }

    pub fn converter(&self) -> &C {
        &self.converter
    }

    pub fn output(&self) -> &OutputConfig {
        &self.output
    }

    /// Renders `root` styled by `profile` into the files `format` asks for.
    ///
    /// # Errors
    ///
    /// Returns [`ThicketError::DependencyMissing`] or [`ThicketError::Compose`]
    /// before any file is written, and [`ThicketError::Io`] when the output
    /// directory cannot be created. Engine failures are reported inside the
    /// returned [`RenderReport`].
    pub fn export(
        &self,
        root: &TreeNode,
        profile: &StyleProfile,
        format: OutputFormat,
    ) -> Result<RenderReport, ThicketError> {
        let mut progress = Progress::new();

        preflight::verify(&self.layout, &self.converter)?;
        let graph = compose(root, profile, self.dpi)?;
        progress.advance(PipelineState::Composed);

        let directory = self.output.directory();
        fs::create_dir_all(directory)?;
        let base = naming::unique_base_name(self.output.file_stem());
        let image_path = directory.join(format!("{base}.png"));
        info!(
            title = root.title(),
            format:% = format,
            image = image_path.display().to_string();
            "Rendering mind map"
        );

        let rendered = self
            .layout
            .render_graph(&graph, &image_path)
            .and_then(|()| ensure_output(self.layout.name(), &image_path));
        if let Err(source) = rendered {
            discard(&image_path);
            let error = ThicketError::ImageRender {
                tool: self.layout.name().to_string(),
                source,
            };
            error!(err:% = error; "Image rendering failed");
            progress.advance(PipelineState::Failed(FailureStage::ImageRender));
            return Ok(RenderReport::new(
                RenderStatus::Failure,
                "Image rendering failed",
                IndexMap::new(),
                Some(error),
                progress.finish(),
            ));
        }
        progress.advance(PipelineState::ImageRendered);

        let mut files = IndexMap::new();
        if format.wants_image() {
            files.insert(ArtifactKind::Image, image_path.clone());
        }

        if !format.wants_document() {
            progress.advance(PipelineState::Done);
            info!(image = image_path.display().to_string(); "Mind map rendered");
            return Ok(RenderReport::new(
                RenderStatus::Success,
                "Mind map rendered",
                files,
                None,
                progress.finish(),
            ));
        }

        let document_path = directory.join(format!("{base}.pdf"));
        let converted = self.convert(&image_path, &document_path);
        if !format.wants_image() {
            // The image was only an intermediate
            discard(&image_path);
        }

        match converted {
            Ok(()) => {
                progress.advance(PipelineState::DocumentConverted);
                files.insert(ArtifactKind::Document, document_path);
                progress.advance(PipelineState::Done);
                info!(files = files.len(); "Mind map rendered");
                Ok(RenderReport::new(
                    RenderStatus::Success,
                    "Mind map rendered",
                    files,
                    None,
                    progress.finish(),
                ))
            }
            Err(source) => {
                discard(&document_path);
                let error = ThicketError::DocumentConvert {
                    tool: self.converter.name().to_string(),
                    source,
                };
                progress.advance(PipelineState::Failed(FailureStage::DocumentConvert));
                let (status, message) = if files.is_empty() {
                    error!(err:% = error; "Document conversion failed");
                    (RenderStatus::Failure, "Document conversion failed")
                } else {
                    warn!(err:% = error; "Document conversion failed, keeping the image");
                    (
                        RenderStatus::Partial,
                        "Image rendered, document conversion failed",
                    )
                };
                Ok(RenderReport::new(
                    status,
                    message,
                    files,
                    Some(error),
                    progress.finish(),
                ))
            }
        }
    }

    fn convert(&self, image: &Path, document: &Path) -> Result<(), EngineError> {
        // The layout engine may have been slow; make sure its file survived
        ensure_output(self.layout.name(), image)?;
        self.converter.convert_to_document(image, document)?;
        ensure_output(self.converter.name(), document)
    }
}

/// Records the states an export enters.
struct Progress {
    states: Vec<PipelineState>,
}

impl Progress {
    fn new() -> Self {
        Self {
            states: vec![PipelineState::Idle],
        }
    }

    fn advance(&mut self, state: PipelineState) {
        if let Some(from) = self.states.last() {
            debug!(from:%, to:% = state; "Pipeline transition");
        }
        self.states.push(state);
    }

    fn finish(self) -> Vec<PipelineState> {
        self.states
    }
}

/// Removes a file the pipeline will not report. A file that is already gone
/// is fine.
fn discard(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => debug!(path = path.display().to_string(); "Removed unreported file"),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => warn!(
            path = path.display().to_string(),
            err:%;
            "Failed to remove unreported file"
        ),
    }
}
