mod geojson;

pub use geojson::{cell_to_feature, cells_to_geojson, field_from_geojson, field_from_geojson_str, multipolygon_to_geojson};
