mod bbox;
mod polygon;
mod proj;
mod ring;

pub(crate) use bbox::{envelope, BoundingBox};
pub(crate) use ring::locate;
pub use polygon::FieldPolygon;
pub use proj::{MetersPerDegree, METERS_PER_DEGREE_LAT, METERS_PER_DEGREE_LNG};
pub use ring::Location;
