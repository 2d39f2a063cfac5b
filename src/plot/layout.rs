use std::collections::BTreeMap;

use glam::UVec2;
use strum::IntoEnumIterator;

use crate::error::PlotError;
use crate::plot::grid::Grid;
use crate::plot::level::Level;
use crate::plot::terrain::Brush;

/// Every level's grid, all sharing the same dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    width: usize,
    height: usize,
    grids: BTreeMap<Level, Grid>,
}

impl Layout {
    /// Creates a layout with an empty grid on every level.
    pub fn new(width: usize, height: usize) -> Self {
        Layout {
            width,
            height,
            grids: Level::iter().map(|level| (level, Grid::new(width, height))).collect(),
        }
    }

    /// Builds a layout from already-validated grids, filling any missing level with an empty grid.
    pub(crate) fn from_grids(
        width: usize,
        height: usize,
        mut grids: BTreeMap<Level, Grid>,
    ) -> Result<Self, PlotError> {
        for level in Level::iter() {
            if !grids.contains_key(&level) {
                grids.insert(level, Grid::try_new(width, height)?);
            }
        }
        Ok(Layout { width, height, grids })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn size(&self) -> UVec2 {
        UVec2::new(self.width as u32, self.height as u32)
    }

    pub fn grid(&self, level: Level) -> &Grid {
        &self.grids[&level]
    }

    pub fn grid_mut(&mut self, level: Level) -> &mut Grid {
        self.grids
            .entry(level)
            .or_insert_with(|| Grid::new(self.width, self.height))
    }

    pub fn grids(&self) -> &BTreeMap<Level, Grid> {
        &self.grids
    }

    /// Paints one cell of a level with the brush, returning whether anything changed.
    pub fn paint(&mut self, level: Level, cell: UVec2, brush: Brush) -> bool {
        self.grid_mut(level).set(cell, brush.apply())
    }

    /// Resets every level to empty cells.
    pub fn clear_all(&mut self) {
        self.grids.values_mut().for_each(Grid::clear);
    }

    pub fn is_empty(&self) -> bool {
        self.grids.values().all(|grid| grid.painted_count() == 0)
    }
}
