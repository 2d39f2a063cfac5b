//! Reading and writing plot documents.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::asset::{get_asset_text, Asset};
use crate::error::{EditorError, EditorResult};
use crate::platform;
use crate::plot::official::OfficialPlots;
use crate::plot::Plot;

/// Serializes a plot and hands it to the platform: a file in `save_dir` on desktop, a download in the browser.
///
/// Returns where the document ended up.
pub fn export_plot(plot: &Plot, save_dir: &Path) -> EditorResult<PathBuf> {
    let json = plot.to_json()?;
    let file_name = plot.file_name();
    debug!(file_name = %file_name, bytes = json.len(), "Exporting plot");
    platform::export_file(save_dir, &file_name, json.as_bytes()).map_err(EditorError::from)
}

/// Loads a plot document from disk.
pub fn load_plot_file(path: &Path) -> EditorResult<Plot> {
    let json = fs::read_to_string(path)?;
    Ok(Plot::from_json(&json)?)
}

/// Loads the official plots index. A missing or malformed index yields an empty one.
pub fn load_official_index() -> OfficialPlots {
    let result = get_asset_text(Asset::OfficialIndex)
        .map_err(EditorError::from)
        .and_then(|json| OfficialPlots::from_json(&json).map_err(EditorError::from));

    match result {
        Ok(index) => {
            debug!(regions = index.regions().len(), "Loaded official plots index");
            index
        }
        Err(e) => {
            warn!(error = %e, "Official plots are unavailable");
            OfficialPlots::default()
        }
    }
}

pub fn load_official_plot(region: &str, plot: &str) -> EditorResult<Plot> {
    let json = get_asset_text(Asset::OfficialPlot { region, plot })?;
    Ok(Plot::from_json(&json)?)
}
