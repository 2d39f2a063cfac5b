//! A single level's cells.

use glam::{IVec2, UVec2};
use serde::{Deserialize, Serialize};

use crate::error::PlotError;
use crate::plot::terrain::Terrain;

/// A rectangular grid of optional terrain tags, stored row-major.
///
/// Cell coordinates are `UVec2 { x: column, y: row }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Option<Terrain>>>", into = "Vec<Vec<Option<Terrain>>>")]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Option<Terrain>>,
}

impl Grid {
    /// Creates a grid with every cell empty.
    pub fn new(width: usize, height: usize) -> Self {
        Grid {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    /// Like [`Grid::new`], for sizes read from untrusted input.
    pub fn try_new(width: usize, height: usize) -> Result<Self, PlotError> {
        let len = width
            .checked_mul(height)
            .ok_or(PlotError::TooLarge { width, height })?;
        Ok(Grid {
            width,
            height,
            cells: vec![None; len],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The grid size in cells.
    pub fn size(&self) -> UVec2 {
        UVec2::new(self.width as u32, self.height as u32)
    }

    pub fn contains(&self, cell: UVec2) -> bool {
        (cell.x as usize) < self.width && (cell.y as usize) < self.height
    }

    fn index(&self, cell: UVec2) -> Option<usize> {
        self.contains(cell).then(|| cell.y as usize * self.width + cell.x as usize)
    }

    pub fn get(&self, cell: UVec2) -> Option<Terrain> {
        self.index(cell).and_then(|i| self.cells[i])
    }

    /// Writes a cell, returning whether its value changed.
    ///
    /// Writes outside the grid are ignored.
    pub fn set(&mut self, cell: UVec2, value: Option<Terrain>) -> bool {
        match self.index(cell) {
            Some(i) if self.cells[i] != value => {
                self.cells[i] = value;
                true
            }
            _ => false,
        }
    }

    /// Resets every cell to empty.
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Option<Terrain>]> {
        self.cells.chunks(self.width.max(1))
    }

    /// Iterates the painted cells with their coordinates.
    pub fn painted(&self) -> impl Iterator<Item = (UVec2, Terrain)> + '_ {
        self.cells.iter().enumerate().filter_map(|(i, cell)| {
            cell.map(|terrain| (UVec2::new((i % self.width) as u32, (i / self.width) as u32), terrain))
        })
    }

    pub fn painted_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }
}

impl TryFrom<Vec<Vec<Option<Terrain>>>> for Grid {
    type Error = PlotError;

    fn try_from(rows: Vec<Vec<Option<Terrain>>>) -> Result<Self, Self::Error> {
        let height = rows.len();
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if width == 0 || height == 0 {
            return Err(PlotError::EmptyGrid);
        }

        let mut cells = Vec::with_capacity(width * height);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != width {
                return Err(PlotError::RaggedRow {
                    row,
                    expected: width,
                    found: values.len(),
                });
            }
            cells.extend(values);
        }

        Ok(Grid { width, height, cells })
    }
}

impl From<Grid> for Vec<Vec<Option<Terrain>>> {
    fn from(grid: Grid) -> Self {
        grid.rows().map(<[Option<Terrain>]>::to_vec).collect()
    }
}

/// The cells on the straight line between two cells, both ends included (Bresenham).
pub fn cells_between(from: UVec2, to: UVec2) -> Vec<UVec2> {
    let (from, to) = (from.as_ivec2(), to.as_ivec2());
    let delta = IVec2::new((to.x - from.x).abs(), -(to.y - from.y).abs());
    let step = IVec2::new(if from.x < to.x { 1 } else { -1 }, if from.y < to.y { 1 } else { -1 });
    let mut err = delta.x + delta.y;
    let mut current = from;
    let mut cells = Vec::with_capacity((delta.x.max(-delta.y) + 1) as usize);

    loop {
        cells.push(current.as_uvec2());
        if current == to {
            break;
        }

        let e2 = 2 * err;
        if e2 >= delta.y {
            err += delta.y;
            current.x += step.x;
        }
        if e2 <= delta.x {
            err += delta.x;
            current.y += step.y;
        }
    }

    cells
}
