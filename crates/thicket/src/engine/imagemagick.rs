//! ImageMagick document converter.

use std::{
    path::{Path, PathBuf},
    process::Command,
    time::Duration,
};

use log::{debug, info};

use super::{DocumentConverter, EngineError, ensure_output, process, tool_name};
use crate::config::EngineConfig;

/// Converts images to PDF with ImageMagick's `convert`.
///
/// The invocation is
/// `convert -density <dpi> -quality <q> <image> -compress <scheme> <document>`,
/// defaulting to 300 dpi, quality 100 and lossless LZW compression.
#[derive(Debug, Clone)]
pub struct ImageMagickConverter {
    binary: PathBuf,
    name: String,
    timeout: Duration,
    density: u32,
    quality: u8,
    compression: String,
}

impl ImageMagickConverter {
    /// Creates a converter invoking `binary` with the default settings.
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        let binary = binary.into();
        Self {
            name: tool_name(&binary),
            binary,
            timeout: Duration::from_secs(60),
            density: 300,
            quality: 100,
            compression: String::from("lzw"),
        }
    }

    /// Creates a converter from the `engines` configuration section.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.converter_binary())
            .with_timeout(config.timeout())
            .with_density(config.dpi())
            .with_quality(config.quality())
            .with_compression(config.compression())
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_density(mut self, density: u32) -> Self {
        self.density = density;
        self
    }

    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality;
        self
    }

    pub fn with_compression(mut self, compression: impl Into<String>) -> Self {
        self.compression = compression.into();
        self
    }

    fn command(&self, image: &Path, output: &Path) -> Command {
        let mut command = Command::new(&self.binary);
        command
            .arg("-density")
            .arg(self.density.to_string())
            .arg("-quality")
            .arg(self.quality.to_string())
            .arg(image)
            .arg("-compress")
            .arg(&self.compression)
            .arg(output);
        command
    }
}

impl DocumentConverter for ImageMagickConverter {
    fn name(&self) -> &str {
        &self.name
    }

    fn probe(&self) -> Result<(), EngineError> {
        let mut command = Command::new(&self.binary);
        command.arg("-version");
        let output = process::run(command, self.timeout)?;
        let banner = String::from_utf8_lossy(&output.stdout);
        debug!(
            tool = self.name,
            version = banner.lines().next().unwrap_or_default();
            "ImageMagick check passed"
        );
        Ok(())
    }

    fn convert_to_document(&self, image: &Path, output: &Path) -> Result<(), EngineError> {
        process::run(self.command(image, output), self.timeout)?;

        ensure_output(&self.name, output)?;
        info!(tool = self.name, output = output.display().to_string(); "Document converted");
        Ok(())
    }
}
