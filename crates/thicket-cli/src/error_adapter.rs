//! Error adapter for converting ThicketError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, GraphicalReportHandler};

use thicket::ThicketError;

/// Adapter giving a [`ThicketError`] a diagnostic code and help text.
pub struct ErrorAdapter<'a>(pub &'a ThicketError);

impl ErrorAdapter<'_> {
    fn code_str(&self) -> &'static str {
        match self.0 {
            ThicketError::Io(_) => "thicket::io",
            ThicketError::Config(_) => "thicket::config",
            ThicketError::Request(_) => "thicket::request",
            ThicketError::DependencyMissing { .. } => "thicket::dependency",
            ThicketError::Compose(_) => "thicket::compose",
            ThicketError::ImageRender { .. } => "thicket::image",
            ThicketError::DocumentConvert { .. } => "thicket::document",
        }
    }

    fn help_text(&self) -> Option<String> {
        match self.0 {
            ThicketError::DependencyMissing { tool, .. } => Some(format!(
                "install Graphviz and ImageMagick, or set `engines.layout_binary` and \
                 `engines.converter_binary` so `{tool}` can be found"
            )),
            ThicketError::Config(_) => {
                Some("check the configuration file selected with `--config`".to_string())
            }
            ThicketError::Request(_) => Some(
                "a request needs a `title` and may carry `content`, `nodes`, `style` \
                 and `output_format`"
                    .to_string(),
            ),
            ThicketError::Compose(_) => Some("every topic needs a non-empty title".to_string()),
            ThicketError::ImageRender { .. } | ThicketError::DocumentConvert { .. } => Some(
                "raise `engines.timeout_secs` if the tool timed out on a large map".to_string(),
            ),
            ThicketError::Io(_) => None,
        }
    }
}

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.code_str()))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.help_text()
            .map(|help| Box::new(help) as Box<dyn fmt::Display>)
    }
}

/// Render `err` as a miette report.
pub fn render_report(err: &ThicketError) -> String {
    let reporter = GraphicalReportHandler::new();
    let mut writer = String::new();
    if reporter
        .render_report(&mut writer, &ErrorAdapter(err))
        .is_err()
    {
        // Fall back to the plain message if formatting fails
        return err.to_string();
    }
    writer
}
