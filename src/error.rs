use thiserror::Error;

/// Errors raised while normalizing a field boundary or generating its mesh.
///
/// Every variant is structural: when one is returned no partial mesh exists.
/// Degenerate slivers found during clipping are not errors, see
/// [`DegenerateClip`](crate::DegenerateClip).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeshError {
    #[error("Invalid coordinate: lng={lng}, lat={lat}")]
    InvalidCoordinate { lng: f64, lat: f64 },

    #[error("Invalid polygon: {0}")]
    InvalidPolygon(String),

    #[error("Mesh too large: {cells} cells exceeds the maximum of {max}")]
    MeshTooLarge { cells: u64, max: u64 },

    #[error("Invalid mesh options: {0}")]
    InvalidOptions(String),

    #[error("Invalid GeoJSON: {0}")]
    InvalidGeoJson(String),
}

pub type Result<T, E = MeshError> = std::result::Result<T, E>;
