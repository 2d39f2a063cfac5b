//! The plot model: terrain tags, levels, grids and the saved document format.

pub mod file;
pub mod grid;
pub mod layout;
pub mod level;
pub mod official;
pub mod terrain;

pub use file::{MapArea, Plot};
pub use grid::Grid;
pub use layout::Layout;
pub use level::Level;
pub use terrain::{Brush, Terrain, PALETTE};
