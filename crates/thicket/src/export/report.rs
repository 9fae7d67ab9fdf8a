//! Render outcomes.

use std::{fmt, path::PathBuf};

use indexmap::IndexMap;
use serde::Serialize;

use crate::ThicketError;

/// Overall outcome of one render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderStatus {
    /// Every requested file was produced.
    Success,
    /// The image was produced but the document conversion failed.
    Partial,
    /// No requested file was produced.
    Failure,
}

impl RenderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Partial => "partial",
            Self::Failure => "failure",
        }
    }

    /// Returns `true` for [`Success`](Self::Success) and
    /// [`Partial`](Self::Partial).
    pub fn produced_output(self) -> bool {
        !matches!(self, Self::Failure)
    }
}

impl fmt::Display for RenderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of file a render produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    /// The PNG from the layout engine.
    Image,
    /// The PDF from the document converter.
    Document,
}

/// The stage a failed render stopped in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureStage {
    ImageRender,
    DocumentConvert,
}

/// States an export passes through.
///
/// ```text
/// Idle -> Composed -> ImageRendered -> DocumentConverted -> Done
///   \________\______________\________________\-> Failed(stage)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Composed,
    ImageRendered,
    DocumentConverted,
    Done,
    Failed(FailureStage),
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::Composed => f.write_str("composed"),
            Self::ImageRendered => f.write_str("image-rendered"),
            Self::DocumentConverted => f.write_str("document-converted"),
            Self::Done => f.write_str("done"),
            Self::Failed(FailureStage::ImageRender) => f.write_str("failed(image-render)"),
            Self::Failed(FailureStage::DocumentConvert) => {
                f.write_str("failed(document-convert)")
            }
        }
    }
}

/// The result of one export.
///
/// Serializes as `{"status", "message", "files", "detail"?}`; `files` maps
/// `"image"` and `"document"` to paths that exist on disk. The error and
/// the visited states are kept for the caller but not serialized.
#[derive(Debug, Serialize)]
pub struct RenderReport {
    status: RenderStatus,
    message: String,
    files: IndexMap<ArtifactKind, PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
    #[serde(skip)]
    error: Option<ThicketError>,
    #[serde(skip)]
    states: Vec<PipelineState>,
}

impl RenderReport {
    pub(crate) fn new(
        status: RenderStatus,
        message: impl Into<String>,
        files: IndexMap<ArtifactKind, PathBuf>,
        error: Option<ThicketError>,
        states: Vec<PipelineState>,
    ) -> Self {
        Self {
            status,
            message: message.into(),
            files,
            detail: error.as_ref().map(ToString::to_string),
            error,
            states,
        }
    }

    pub fn status(&self) -> RenderStatus {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the produced files in production order.
    pub fn files(&self) -> &IndexMap<ArtifactKind, PathBuf> {
        &self.files
    }

    pub fn file(&self, kind: ArtifactKind) -> Option<&PathBuf> {
        self.files.get(&kind)
    }

    /// Returns the error behind a partial or failed render.
    pub fn error(&self) -> Option<&ThicketError> {
        self.error.as_ref()
    }

    /// Returns the pipeline states in the order they were entered.
    pub fn states(&self) -> &[PipelineState] {
        &self.states
    }

    /// Returns the state the pipeline finished in.
    pub fn final_state(&self) -> PipelineState {
        self.states.last().copied().unwrap_or(PipelineState::Idle)
    }
}
