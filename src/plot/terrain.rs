//! Terrain tags and the brush palette.

use phf::phf_map;
use serde::{Deserialize, Serialize};
use strum_macros::{EnumCount, EnumIter, IntoStaticStr};
use tracing::debug;

use crate::error::PlotError;

/// How a terrain cell outlines itself on top of the regular cell stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    Dashed,
    Solid,
}

/// A terrain tag that can be painted into a grid cell.
///
/// Variants are declared in palette order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumCount, EnumIter, IntoStaticStr, Serialize, Deserialize)]
#[serde(try_from = "TerrainRecord", into = "TerrainRecord")]
pub enum Terrain {
    #[strum(serialize = "Road")]
    Road,
    #[strum(serialize = "Higher Unbuildable")]
    HigherUnbuildable,
    #[strum(serialize = "Unbuildable")]
    Unbuildable,
    #[strum(serialize = "Water")]
    Water,
    #[strum(serialize = "Platform")]
    Platform,
    #[strum(serialize = "Slopes / Stairs")]
    SlopesStairs,
    #[strum(serialize = "Bridge")]
    Bridge,
    #[strum(serialize = "Overhang Platform")]
    OverhangPlatform,
}

static TERRAIN_BY_NAME: phf::Map<&'static str, Terrain> = phf_map! {
    "Road" => Terrain::Road,
    "Higher Unbuildable" => Terrain::HigherUnbuildable,
    "Unbuildable" => Terrain::Unbuildable,
    "Water" => Terrain::Water,
    "Platform" => Terrain::Platform,
    "Slopes / Stairs" => Terrain::SlopesStairs,
    "Bridge" => Terrain::Bridge,
    "Overhang Platform" => Terrain::OverhangPlatform,
};

impl Terrain {
    /// Looks a terrain up by its display name. Matching is exact.
    pub fn from_name(name: &str) -> Option<Terrain> {
        TERRAIN_BY_NAME.get(name).copied()
    }

    pub fn name(self) -> &'static str {
        self.into()
    }

    /// The fill color as an RGB triple.
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Terrain::Road => (0x80, 0x80, 0x80),
            Terrain::HigherUnbuildable => (0x4B, 0x36, 0x21),
            Terrain::Unbuildable => (0x8B, 0x45, 0x13),
            Terrain::Water => (0xAD, 0xD8, 0xE6),
            Terrain::Platform => (0x90, 0xEE, 0x90),
            Terrain::SlopesStairs | Terrain::Bridge | Terrain::OverhangPlatform => (0xFF, 0xFF, 0xFF),
        }
    }

    /// The fill color in `#RRGGBB` form, as written to plot documents.
    pub fn color(self) -> String {
        hex_color(self.rgb())
    }

    /// The symbol drawn centered in the cell; empty for plain fills.
    pub fn symbol(self) -> &'static str {
        match self {
            Terrain::SlopesStairs => "S",
            Terrain::Bridge => "B",
            Terrain::OverhangPlatform => "□",
            _ => "",
        }
    }

    pub fn border_style(self) -> Option<BorderStyle> {
        match self {
            Terrain::SlopesStairs | Terrain::Bridge => Some(BorderStyle::Dashed),
            Terrain::OverhangPlatform => Some(BorderStyle::Solid),
            _ => None,
        }
    }
}

/// Formats an RGB triple as `#RRGGBB`.
pub fn hex_color((r, g, b): (u8, u8, u8)) -> String {
    format!("#{r:02X}{g:02X}{b:02X}")
}

/// Parses `#RRGGBB` (case-insensitive) into an RGB triple.
pub fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

/// The on-disk shape of a painted cell.
///
/// Only `name` is authoritative when reading; the remaining fields are informational copies of the terrain's attributes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TerrainRecord {
    name: String,
    #[serde(default)]
    color: String,
    #[serde(default)]
    symbol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    border_style: Option<BorderStyle>,
}

impl From<Terrain> for TerrainRecord {
    fn from(terrain: Terrain) -> Self {
        TerrainRecord {
            name: terrain.name().to_string(),
            color: terrain.color(),
            symbol: terrain.symbol().to_string(),
            border_style: terrain.border_style(),
        }
    }
}

impl TryFrom<TerrainRecord> for Terrain {
    type Error = PlotError;

    fn try_from(record: TerrainRecord) -> Result<Self, Self::Error> {
        let terrain = Terrain::from_name(&record.name).ok_or_else(|| PlotError::UnknownTerrain(record.name.clone()))?;
        if parse_hex_color(&record.color).is_some_and(|rgb| rgb != terrain.rgb()) {
            debug!(terrain = terrain.name(), color = %record.color, "Ignoring stored color");
        }
        Ok(terrain)
    }
}

/// The active palette entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Brush {
    Paint(Terrain),
    Erase,
}

impl Default for Brush {
    fn default() -> Self {
        Brush::Paint(Terrain::Road)
    }
}

/// Every selectable brush, in toolbar order: the terrains followed by the eraser.
pub const PALETTE: [Brush; 9] = [
    Brush::Paint(Terrain::Road),
    Brush::Paint(Terrain::HigherUnbuildable),
    Brush::Paint(Terrain::Unbuildable),
    Brush::Paint(Terrain::Water),
    Brush::Paint(Terrain::Platform),
    Brush::Paint(Terrain::SlopesStairs),
    Brush::Paint(Terrain::Bridge),
    Brush::Paint(Terrain::OverhangPlatform),
    Brush::Erase,
];

impl Brush {
    /// The value a cell receives when painted with this brush.
    pub fn apply(self) -> Option<Terrain> {
        match self {
            Brush::Paint(terrain) => Some(terrain),
            Brush::Erase => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Brush::Paint(terrain) => terrain.name(),
            Brush::Erase => "Eraser",
        }
    }

    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Brush::Paint(terrain) => terrain.rgb(),
            Brush::Erase => (0xFF, 0xFF, 0xFF),
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Brush::Paint(terrain) => terrain.symbol(),
            Brush::Erase => "⌫",
        }
    }

    /// Position of this brush within [`PALETTE`].
    pub fn palette_index(self) -> usize {
        PALETTE.iter().position(|b| *b == self).unwrap_or(0)
    }
}
