//! Cross-platform asset loading abstraction.
//! On desktop, assets are embedded into the binary; on Emscripten, they are read from the preloaded filesystem.

use std::borrow::Cow;

use crate::error::AssetError;
use crate::plot::official::official_plot_path;

/// Path of the official plots index, relative to the asset root.
pub const OFFICIAL_INDEX_PATH: &str = "officialPlots/officialPlotsConfig.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Asset<'a> {
    /// The region to plot names index.
    OfficialIndex,
    /// One shipped plot document.
    OfficialPlot { region: &'a str, plot: &'a str },
}

impl Asset<'_> {
    /// Path relative to the asset root.
    pub fn path(&self) -> Cow<'static, str> {
        match self {
            Asset::OfficialIndex => Cow::Borrowed(OFFICIAL_INDEX_PATH),
            Asset::OfficialPlot { region, plot } => Cow::Owned(official_plot_path(region, plot)),
        }
    }
}

pub use crate::platform::get_asset_bytes;

/// Reads an asset as UTF-8 text.
pub fn get_asset_text(asset: Asset) -> Result<String, AssetError> {
    let bytes = get_asset_bytes(asset)?;
    String::from_utf8(bytes.into_owned())
        .map_err(|e| AssetError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}
