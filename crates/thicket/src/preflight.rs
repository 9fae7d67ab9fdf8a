//! Dependency preflight.
//!
//! Both external engines are probed before a render touches the filesystem,
//! so a missing tool is reported up front instead of halfway through.

use log::{debug, error};

use crate::{
    ThicketError,
    engine::{DocumentConverter, LayoutEngine},
};

/// Probes the layout engine and then the document converter.
///
/// # Errors
///
/// Returns [`ThicketError::DependencyMissing`] naming the first tool whose
/// probe failed, with the probe failure as detail.
pub fn verify<L, C>(layout: &L, converter: &C) -> Result<(), ThicketError>
where
    L: LayoutEngine + ?Sized,
    C: DocumentConverter + ?Sized,
{
    layout
        .probe()
        .map_err(|err| missing(layout.name(), err.to_string()))?;
    converter
        .probe()
        .map_err(|err| missing(converter.name(), err.to_string()))?;

    debug!(layout = layout.name(), converter = converter.name(); "Dependencies available");
    Ok(())
}

fn missing(tool: &str, detail: String) -> ThicketError {
    error!(tool, detail; "Required tool is not available");
    ThicketError::DependencyMissing {
        tool: tool.to_string(),
        detail,
    }
}
