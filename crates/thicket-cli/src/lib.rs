//! Thicket CLI library
//!
//! This module contains the core CLI logic for the Thicket mind-map
//! renderer: loading configuration, reading request files and rendering
//! them concurrently with one shared exporter.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{
    fs,
    path::{Path, PathBuf},
    thread,
};

use log::{error, info};
use serde::Serialize;

use thicket::{
    Exporter, RenderReport, ThicketError,
    config::AppConfig,
    render_with,
    request::{MindMapRequest, OutputFormat},
};

/// The outcome of rendering one input file.
#[derive(Debug)]
pub struct Rendered {
    input: PathBuf,
    outcome: Result<RenderReport, ThicketError>,
}

impl Rendered {
    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn outcome(&self) -> &Result<RenderReport, ThicketError> {
        &self.outcome
    }

    /// Returns `true` when the render produced at least one requested file.
    pub fn succeeded(&self) -> bool {
        self.outcome
            .as_ref()
            .is_ok_and(|report| report.status().produced_output())
    }

    /// Serializes the outcome as one JSON object tagged with the input path.
    ///
    /// # Errors
    ///
    /// Returns the serializer's error if the report cannot be encoded.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        match &self.outcome {
            Ok(report) => serde_json::to_string(&ReportLine {
                input: &self.input,
                report,
            }),
            Err(err) => serde_json::to_string(&serde_json::json!({
                "input": self.input,
                "status": "failure",
                "message": "Request could not be rendered",
                "files": {},
                "detail": err.to_string(),
            })),
        }
    }
}

#[derive(Serialize)]
struct ReportLine<'a> {
    input: &'a Path,
    #[serde(flatten)]
    report: &'a RenderReport,
}

/// Run the Thicket CLI application
///
/// Every input is read as a [`MindMapRequest`] and rendered on its own scoped
/// thread. Results come back in input order.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `ThicketError` when the configuration cannot be loaded or is
/// invalid. Failures of individual inputs are reported in their [`Rendered`].
pub fn run(args: &Args) -> Result<Vec<Rendered>, ThicketError> {
    let mut app_config = config::load_config(args.config.as_ref())?;
    if let Some(dir) = &args.output_dir {
        app_config = app_config.with_output_directory(dir);
    }
    info!(
        inputs = args.inputs.len(),
        output_dir = app_config.output().directory().display().to_string();
        "Rendering mind maps"
    );

    let exporter = Exporter::from_config(&app_config);
    let rendered: Vec<Rendered> = thread::scope(|scope| {
        let handles: Vec<_> = args
            .inputs
            .iter()
            .map(|input| {
                let exporter = &exporter;
                let app_config = &app_config;
                let input = PathBuf::from(input);
                scope.spawn(move || {
                    let outcome = render_file(exporter, app_config, &input, args.format);
                    Rendered { input, outcome }
                })
            })
            .collect();

        handles
            .into_iter()
            .zip(&args.inputs)
            .map(|(handle, input)| {
                handle.join().unwrap_or_else(|_| {
                    error!(input; "Render thread panicked");
                    Rendered {
                        input: PathBuf::from(input),
                        outcome: Err(ThicketError::Request(format!(
                            "rendering `{input}` panicked"
                        ))),
                    }
                })
            })
            .collect()
    });

    Ok(rendered)
}

fn render_file<L, C>(
    exporter: &Exporter<L, C>,
    app_config: &AppConfig,
    input: &Path,
    format: Option<OutputFormat>,
) -> Result<RenderReport, ThicketError>
where
    L: thicket::engine::LayoutEngine,
    C: thicket::engine::DocumentConverter,
{
    let source = fs::read_to_string(input)
        .map_err(|err| ThicketError::Request(format!("{}: {err}", input.display())))?;
    let mut request = parse_request(&source)
        .map_err(|err| ThicketError::Request(format!("{}: {err}", input.display())))?;
    if let Some(format) = format {
        request = request.with_output_format(format);
    }

    info!(input = input.display().to_string(), title = request.title(); "Processing request");
    render_with(exporter, &request, app_config.style())
}

/// Parse a mind-map request from its JSON form.
///
/// # Errors
///
/// Returns the JSON error, which carries the line and column of the problem.
pub fn parse_request(source: &str) -> Result<MindMapRequest, serde_json::Error> {
    serde_json::from_str(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_request() {
        let request = parse_request(
            r#"{
                "title": "Project",
                "content": "Q3 plan",
                "nodes": [
                    {"title": "Design", "children": [{"title": "Review"}]},
                    {"title": "Build", "style": {"fillcolor": "orange"}}
                ],
                "style": {"direction": "LR"},
                "output_format": "png"
            }"#,
        )
        .unwrap();

        assert_eq!(request.title(), "Project");
        assert_eq!(request.output_format(), OutputFormat::Png);
        assert_eq!(request.root().node_count(), 4);
        assert!(request.style().is_some());
    }

    #[test]
    fn test_parse_request_rejects_missing_title() {
        let err = parse_request(r#"{"nodes": []}"#).unwrap_err();
        assert!(err.to_string().contains("title"));
    }

    #[test]
    fn test_unreadable_input_is_request_error() {
        let app_config = AppConfig::default();
        let exporter = Exporter::from_config(&app_config);
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.json");

        let err = render_file(&exporter, &app_config, &missing, None).unwrap_err();

        assert!(matches!(err, ThicketError::Request(_)));
        assert!(err.to_string().contains("absent.json"));
    }

    #[test]
    fn test_error_line_json() {
        let rendered = Rendered {
            input: PathBuf::from("maps/plan.json"),
            outcome: Err(ThicketError::Request("bad".to_string())),
        };

        let json: serde_json::Value = serde_json::from_str(&rendered.to_json().unwrap()).unwrap();
        assert_eq!(json["input"], "maps/plan.json");
        assert_eq!(json["status"], "failure");
        assert_eq!(json["detail"], "Invalid request: bad");
        assert!(!rendered.succeeded());
    }
}
