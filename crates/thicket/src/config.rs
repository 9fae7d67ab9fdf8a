//! Configuration types for Thicket rendering.
//!
//! This module provides configuration structures that control where output
//! is written, how the external engines are invoked and which style profile
//! applies when a request brings none. All types implement
//! [`serde::Deserialize`] for loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`OutputConfig`] - Output directory and file name stem.
//! - [`EngineConfig`] - Engine binaries, timeout and conversion settings.
//! - [`StyleProfile`] - The default style profile.
//!
//! # Example
//!
//! ```
//! # use thicket::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.validate().is_ok());
//! assert_eq!(config.engines().dpi(), 300);
//! ```

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;

use thicket_core::style::StyleProfile;

use crate::ThicketError;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Output configuration section.
    #[serde(default)]
    output: OutputConfig,

    /// Engine configuration section.
    #[serde(default)]
    engines: EngineConfig,

    /// Default style profile.
    #[serde(default)]
    style: StyleProfile,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    ///
    /// # Arguments
    ///
    /// * `output` - Output location settings.
    /// * `engines` - External engine settings.
    /// * `style` - Default style profile.
    pub fn new(output: OutputConfig, engines: EngineConfig, style: StyleProfile) -> Self {
        Self {
            output,
            engines,
            style,
        }
    }

    /// Returns the output configuration.
    pub fn output(&self) -> &OutputConfig {
        &self.output
    }

    /// Returns the engine configuration.
    pub fn engines(&self) -> &EngineConfig {
        &self.engines
    }

    /// Returns the default style profile.
    pub fn style(&self) -> &StyleProfile {
        &self.style
    }

    /// Replaces the output directory, keeping every other setting.
    pub fn with_output_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.output.directory = directory.into();
        self
    }

    /// Checks the values serde cannot.
    ///
    /// # Errors
    ///
    /// Returns [`ThicketError::Config`] for a zero timeout or resolution, a
    /// quality above 100, or a file stem that is empty or contains a path
    /// separator.
    pub fn validate(&self) -> Result<(), ThicketError> {
        let stem = &self.output.file_stem;
        if stem.trim().is_empty() {
            return Err(ThicketError::Config(
                "output.file_stem must not be empty".to_string(),
            ));
        }
        if stem.contains(['/', '\\']) {
            return Err(ThicketError::Config(format!(
                "output.file_stem `{stem}` must not contain path separators"
            )));
        }
        if self.engines.timeout_secs == 0 {
            return Err(ThicketError::Config(
                "engines.timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.engines.dpi == 0 {
            return Err(ThicketError::Config(
                "engines.dpi must be greater than zero".to_string(),
            ));
        }
        if self.engines.quality > 100 {
            return Err(ThicketError::Config(format!(
                "engines.quality must be at most 100, got {}",
                self.engines.quality
            )));
        }
        Ok(())
    }
}

/// Where rendered files are written.
///
/// Every render derives a unique base name from `file_stem`, so concurrent
/// renders can share one directory.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output directory, created on demand (default `output`).
    directory: PathBuf,

    /// Leading part of every output file name (default `mindmap`).
    file_stem: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("output"),
            file_stem: String::from("mindmap"),
        }
    }
}

impl OutputConfig {
    pub fn new(directory: impl Into<PathBuf>, file_stem: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            file_stem: file_stem.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn file_stem(&self) -> &str {
        &self.file_stem
    }
}

/// External engine settings.
///
/// | Field | Default |
/// |-------|---------|
/// | `layout_binary` | `dot` |
/// | `converter_binary` | `convert` |
/// | `timeout_secs` | `60` |
/// | `dpi` | `300` |
/// | `quality` | `100` |
/// | `compression` | `lzw` |
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    layout_binary: PathBuf,
    converter_binary: PathBuf,
    timeout_secs: u64,
    dpi: u32,
    quality: u8,
    compression: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            layout_binary: PathBuf::from("dot"),
            converter_binary: PathBuf::from("convert"),
            timeout_secs: 60,
            dpi: 300,
            quality: 100,
            compression: String::from("lzw"),
        }
    }
}

impl EngineConfig {
    /// Returns the Graphviz binary to invoke.
    pub fn layout_binary(&self) -> &Path {
        &self.layout_binary
    }

    /// Returns the ImageMagick binary to invoke.
    pub fn converter_binary(&self) -> &Path {
        &self.converter_binary
    }

    /// Returns the per-invocation timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Returns the raster and document resolution in dots per inch.
    pub fn dpi(&self) -> u32 {
        self.dpi
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }

    pub fn compression(&self) -> &str {
        &self.compression
    }

    pub fn with_layout_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.layout_binary = binary.into();
        self
    }

    pub fn with_converter_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.converter_binary = binary.into();
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

#[cfg(test)]
mod tests {
    use thicket_core::style::Direction;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.output().directory(), Path::new("output"));
        assert_eq!(config.output().file_stem(), "mindmap");
        assert_eq!(config.engines().layout_binary(), Path::new("dot"));
        assert_eq!(config.engines().converter_binary(), Path::new("convert"));
        assert_eq!(config.engines().timeout(), Duration::from_secs(60));
        assert_eq!(config.engines().compression(), "lzw");
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config: AppConfig = serde_json::from_str(
            r#"{"engines": {"timeout_secs": 5}, "style": {"direction": "LR"}}"#,
        )
        .unwrap();

        assert_eq!(config.engines().timeout(), Duration::from_secs(5));
        assert_eq!(config.engines().dpi(), 300);
        assert_eq!(config.style().direction(), Direction::LR);
        assert_eq!(config.output().file_stem(), "mindmap");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let zero_timeout = AppConfig::new(
            OutputConfig::default(),
            EngineConfig::default().with_timeout_secs(0),
            StyleProfile::default(),
        );
        assert!(matches!(
            zero_timeout.validate(),
            Err(ThicketError::Config(_))
        ));

        let bad_stem = AppConfig::new(
            OutputConfig::new("out", "../escape"),
            EngineConfig::default(),
            StyleProfile::default(),
        );
        assert!(bad_stem.validate().is_err());

        let blank_stem = AppConfig::new(
            OutputConfig::new("out", "  "),
            EngineConfig::default(),
            StyleProfile::default(),
        );
        assert!(blank_stem.validate().is_err());
    }

    #[test]
    fn test_with_output_directory() {
        let config = AppConfig::default().with_output_directory("/tmp/maps");
        assert_eq!(config.output().directory(), Path::new("/tmp/maps"));
    }
}
