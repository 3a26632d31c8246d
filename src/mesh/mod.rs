mod cell;
mod clip;
mod generate;
mod grid;
mod mesh;

pub use cell::{CellId, CellShape, MeshCell};
pub use clip::{ClipResult, Clipper, OverlayClipper};
pub use generate::{generate_mesh, generate_mesh_with};
pub use grid::GridSpec;
pub use mesh::{select_cell_at_point, select_cells_in_bounds, DegenerateClip, MeshResult, PlotSelection};
