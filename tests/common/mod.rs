#![allow(dead_code)]

use fieldmesh::{FieldPolygon, MeshCell, METERS_PER_DEGREE_LAT, METERS_PER_DEGREE_LNG};
use geo::{Coord, InteriorPoint};

/// Build a field from offsets in meters around (lng0, lat0).
pub fn field_m(lng0: f64, lat0: f64, points: &[(f64, f64)]) -> FieldPolygon {
    let lng_factor = METERS_PER_DEGREE_LNG * lat0.to_radians().cos();
    let ring = points.iter()
        .map(|&(east, north)| [lng0 + east / lng_factor, lat0 + north / METERS_PER_DEGREE_LAT])
        .collect::<Vec<_>>();
    FieldPolygon::from_lng_lat(&ring).unwrap()
}

/// A `w` by `h` meter rectangle centred on (lng0, lat0).
pub fn rect_field(lng0: f64, lat0: f64, w: f64, h: f64) -> FieldPolygon {
    let (hw, hh) = (w / 2.0, h / 2.0);
    field_m(lng0, lat0, &[(-hw, -hh), (hw, -hh), (hw, hh), (-hw, hh)])
}

/// A right triangle with legs of `size` meters, inscribed in a `size` square.
pub fn triangle_field(lng0: f64, lat0: f64, size: f64) -> FieldPolygon {
    field_m(lng0, lat0, &[(0.0, 0.0), (size, 0.0), (0.0, size)])
}

/// An irregular concave field roughly 240 m across.
pub fn concave_field(lng0: f64, lat0: f64) -> FieldPolygon {
    field_m(lng0, lat0, &[
        (0.0, 0.0), (240.0, 12.0), (231.0, 160.0), (150.0, 95.0),
        (117.0, 210.0), (43.0, 188.0), (61.0, 96.0), (-8.0, 70.0),
    ])
}

/// A point strictly inside the cell's geometry.
pub fn inside_point(cell: &MeshCell) -> Coord<f64> {
    cell.geometry().interior_point().expect("cell geometry has an interior").0
}
