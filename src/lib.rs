#![doc = "Grid meshing and cell selection for farm field boundaries"]
mod error;
mod geom;
mod io;
mod mesh;
mod options;
mod stats;

#[doc(inline)]
pub use error::{MeshError, Result};

#[doc(inline)]
pub use geom::{FieldPolygon, Location, MetersPerDegree, METERS_PER_DEGREE_LAT, METERS_PER_DEGREE_LNG};

#[doc(inline)]
pub use mesh::{
    generate_mesh, generate_mesh_with, select_cell_at_point, select_cells_in_bounds,
    CellId, CellShape, ClipResult, Clipper, DegenerateClip, GridSpec, MeshCell, MeshResult,
    OverlayClipper, PlotSelection,
};

#[doc(inline)]
pub use io::{cell_to_feature, cells_to_geojson, field_from_geojson, field_from_geojson_str, multipolygon_to_geojson};

#[doc(inline)]
pub use options::{MeshOptions, DEFAULT_MAX_CELLS, DEFAULT_MIN_RETAIN_FRACTION};

#[doc(inline)]
pub use stats::{hectares, summarize, MeshStatistics, M2_PER_HECTARE};
