//! Graphviz `dot` layout engine.

use std::{
    io::Write,
    path::{Path, PathBuf},
    process::Command,
    time::Duration,
};

use log::{debug, info};

use thicket_core::graph::GraphDescription;

use super::{EngineError, LayoutEngine, ensure_output, process, tool_name};
use crate::{config::EngineConfig, dot};

/// Lays out and rasterizes graphs with the Graphviz `dot` binary.
///
/// The DOT source is written to a temporary file which is removed once the
/// engine returns; the PNG lands at the requested output path.
///
/// # Examples
///
/// ```rust,no_run
/// use std::time::Duration;
/// use thicket::engine::{GraphvizEngine, LayoutEngine};
///
/// let engine = GraphvizEngine::new("dot").with_timeout(Duration::from_secs(30));
/// engine.probe().expect("Graphviz is not installed");
/// ```
#[derive(Debug, Clone)]
pub struct GraphvizEngine {
    binary: PathBuf,
    name: String,
    timeout: Duration,
}

impl GraphvizEngine {
    /// Creates an engine invoking `binary` with a 60 second timeout.
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        let binary = binary.into();
        Self {
            name: tool_name(&binary),
            binary,
            timeout: Duration::from_secs(60),
        }
    }

    /// Creates an engine from the `engines` configuration section.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.layout_binary()).with_timeout(config.timeout())
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn io_error(&self, source: std::io::Error) -> EngineError {
        EngineError::Io {
            program: self.name.clone(),
            source,
        }
    }
}

impl LayoutEngine for GraphvizEngine {
    fn name(&self) -> &str {
        &self.name
    }

    fn probe(&self) -> Result<(), EngineError> {
        let mut command = Command::new(&self.binary);
        command.arg("-V");
        let output = process::run(command, self.timeout)?;
        // dot prints its version banner on stderr
        debug!(tool = self.name, version = output.stderr.trim(); "Graphviz check passed");
        Ok(())
    }

    fn render_graph(&self, graph: &GraphDescription, output: &Path) -> Result<(), EngineError> {
        let source = dot::to_dot(graph);

        let mut file = tempfile::Builder::new()
            .prefix("thicket-")
            .suffix(".dot")
            .tempfile()
            .map_err(|err| self.io_error(err))?;
        file.write_all(source.as_bytes())
            .and_then(|()| file.flush())
            .map_err(|err| self.io_error(err))?;

        let mut command = Command::new(&self.binary);
        command
            .arg("-Tpng")
            .arg("-o")
            .arg(output)
            .arg(file.path());
        process::run(command, self.timeout)?;

        ensure_output(&self.name, output)?;
        info!(tool = self.name, output = output.display().to_string(); "Image rendered");
        Ok(())
    }
}
