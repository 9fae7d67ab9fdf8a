//! External engines.
//!
//! The pipeline talks to the outside world through two narrow traits:
//! [`LayoutEngine`] turns a graph description into a raster image and
//! [`DocumentConverter`] turns that image into a paginated document. Both
//! also expose a `probe` used by the dependency preflight.
//!
//! The production implementations drive Graphviz ([`GraphvizEngine`]) and
//! ImageMagick ([`ImageMagickConverter`]) as child processes. Tests substitute
//! in-process fakes.

mod graphviz;
mod imagemagick;
pub(crate) mod process;

pub use graphviz::GraphvizEngine;
pub use imagemagick::ImageMagickConverter;

use std::{
    fs, io,
    path::{Path, PathBuf},
    process::ExitStatus,
    time::Duration,
};

use thiserror::Error;

use thicket_core::graph::GraphDescription;

/// Failure of a single external-engine invocation.
///
/// Process failures keep the child's stderr verbatim.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to launch `{program}`: {source}")]
    Spawn { program: String, source: io::Error },

    #[error("`{program}` exited with {status}: {stderr}")]
    Exit {
        program: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("`{program}` did not finish within {}s", timeout.as_secs_f64())]
    Timeout { program: String, timeout: Duration },

    #[error("`{program}` reported success but produced no file at {}", path.display())]
    MissingOutput { program: String, path: PathBuf },

    #[error("I/O error while running `{program}`: {source}")]
    Io { program: String, source: io::Error },

    #[error("{0}")]
    Other(String),
}

/// Positions a graph description and rasterizes it.
pub trait LayoutEngine {
    /// Short tool name used in logs and error reports.
    fn name(&self) -> &str;

    /// Checks that the engine can be invoked at all.
    fn probe(&self) -> Result<(), EngineError>;

    /// Renders `graph` into an image at `output`.
    ///
    /// Implementations must only return `Ok` once the file exists.
    fn render_graph(&self, graph: &GraphDescription, output: &Path) -> Result<(), EngineError>;
}

/// Packages a raster image as a paginated document.
pub trait DocumentConverter {
    /// Short tool name used in logs and error reports.
    fn name(&self) -> &str;

    /// Checks that the converter can be invoked at all.
    fn probe(&self) -> Result<(), EngineError>;

    /// Converts the image at `image` into a document at `output`.
    fn convert_to_document(&self, image: &Path, output: &Path) -> Result<(), EngineError>;
}

/// Confirms that `program` left a non-empty file at `path`.
pub(crate) fn ensure_output(program: &str, path: &Path) -> Result<(), EngineError> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_file() && meta.len() > 0 => Ok(()),
        _ => Err(EngineError::MissingOutput {
            program: program.to_string(),
            path: path.to_path_buf(),
        }),
    }
}

/// Derives a tool name from a binary path, e.g. `/usr/bin/dot` → `dot`.
pub(crate) fn tool_name(binary: &Path) -> String {
    binary
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| binary.display().to_string())
}
