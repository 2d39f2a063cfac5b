//! The plot document: the unit that is saved, downloaded and loaded.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{EnumCount, EnumIter, IntoStaticStr};
use tracing::debug;

use crate::config::MAX_GRID_SIDE;
use crate::error::PlotError;
use crate::plot::grid::Grid;
use crate::plot::layout::Layout;
use crate::plot::level::Level;

/// The map region a plot belongs to.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, EnumCount, EnumIter, IntoStaticStr, Serialize, Deserialize)]
pub enum MapArea {
    #[default]
    #[strum(serialize = "Farbane Woods")]
    #[serde(rename = "Farbane Woods")]
    FarbaneWoods,
    #[strum(serialize = "Dunley Farmlands")]
    #[serde(rename = "Dunley Farmlands")]
    DunleyFarmlands,
    #[strum(serialize = "Hallowed Mountains")]
    #[serde(rename = "Hallowed Mountains")]
    HallowedMountains,
    #[strum(serialize = "Silverlight Hills")]
    #[serde(rename = "Silverlight Hills")]
    SilverlightHills,
}

impl MapArea {
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// The next area in selection order, wrapping around.
    pub fn next(self) -> MapArea {
        MapArea::iter().cycle().skip_while(|area| *area != self).nth(1).unwrap_or_default()
    }

    /// The previous area in selection order, wrapping around.
    pub fn previous(self) -> MapArea {
        MapArea::iter().rev().cycle().skip_while(|area| *area != self).nth(1).unwrap_or_default()
    }
}

/// A named, placed layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plot {
    pub name: String,
    pub map_area: MapArea,
    pub layout: Layout,
}

/// The JSON shape of a plot document.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlotDocument {
    name: String,
    map_area: MapArea,
    width: usize,
    height: usize,
    grids: BTreeMap<Level, Grid>,
}

impl Plot {
    pub fn new(name: impl Into<String>, map_area: MapArea, layout: Layout) -> Self {
        Plot {
            name: name.into(),
            map_area,
            layout,
        }
    }

    /// Serializes the plot as a pretty-printed JSON document.
    pub fn to_json(&self) -> Result<String, PlotError> {
        let document = PlotDocument {
            name: self.name.clone(),
            map_area: self.map_area,
            width: self.layout.width(),
            height: self.layout.height(),
            grids: self.layout.grids().clone(),
        };
        Ok(serde_json::to_string_pretty(&document)?)
    }

    /// Parses and validates a plot document.
    ///
    /// Every grid present must match the declared dimensions. Levels absent from the document are filled with empty grids.
    pub fn from_json(json: &str) -> Result<Plot, PlotError> {
        let document: PlotDocument = serde_json::from_str(json)?;

        let max = MAX_GRID_SIDE as usize;
        if document.width > max || document.height > max {
            return Err(PlotError::TooLarge {
                width: document.width,
                height: document.height,
            });
        }

        for (level, grid) in &document.grids {
            if grid.width() != document.width || grid.height() != document.height {
                return Err(PlotError::DimensionMismatch {
                    level: level.to_string(),
                    width: document.width,
                    height: document.height,
                    found_width: grid.width(),
                    found_height: grid.height(),
                });
            }
        }

        if document.width == 0 || document.height == 0 {
            return Err(PlotError::EmptyGrid);
        }

        debug!(
            name = %document.name,
            area = document.map_area.name(),
            levels = document.grids.len(),
            "Parsed plot document"
        );

        Ok(Plot {
            name: document.name,
            map_area: document.map_area,
            layout: Layout::from_grids(document.width, document.height, document.grids)?,
        })
    }

    /// The download/save file name: whitespace runs collapse into a single underscore.
    pub fn file_name(&self) -> String {
        file_name_for(&self.name)
    }
}

/// Builds a `.json` file name from a plot name, replacing each run of whitespace with `_`.
pub fn file_name_for(name: &str) -> String {
    let mut file_name = String::with_capacity(name.len() + 5);
    let mut in_whitespace = false;
    for c in name.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                file_name.push('_');
            }
            in_whitespace = true;
        } else {
            file_name.push(c);
            in_whitespace = false;
        }
    }
    file_name.push_str(".json");
    file_name
}

/// Rejects names that are blank once trimmed.
pub fn validate_plot_name(name: &str) -> Result<(), PlotError> {
    if name.trim().is_empty() {
        return Err(PlotError::MissingName);
    }
    Ok(())
}
