use serde::{Deserialize, Serialize};

use crate::error::{MeshError, Result};

/// Default upper bound on `rows * cols` for a single mesh.
pub const DEFAULT_MAX_CELLS: u64 = 100_000;

/// Default fraction of the nominal cell area below which clipped slivers are dropped.
pub const DEFAULT_MIN_RETAIN_FRACTION: f64 = 0.01;

/// Options controlling mesh generation.
///
/// Deserializes from camelCase JSON; missing keys take their defaults.
///
/// ```rust
/// use fieldmesh::MeshOptions;
///
/// let options = MeshOptions::new(25.0)
///     .with_statistics(true)
///     .with_max_cells(50_000);
/// assert_eq!(options.cell_size_meters, 25.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MeshOptions {
    /// Edge length of a square cell in meters.
    pub cell_size_meters: f64,
    /// Clip cells to the field boundary; when false, overlapping cells are kept whole.
    pub crop_to_polygon: bool,
    /// Compute and maintain area statistics on the result.
    pub generate_statistics: bool,
    /// Maximum number of candidate cells (`rows * cols`).
    pub max_cells: u64,
    /// Clipped cells smaller than this fraction of a full cell are discarded.
    pub min_retain_fraction: f64,
}

impl Default for MeshOptions {
    fn default() -> Self {
        Self {
            cell_size_meters: 10.0,
            crop_to_polygon: true,
            generate_statistics: true,
            max_cells: DEFAULT_MAX_CELLS,
            min_retain_fraction: DEFAULT_MIN_RETAIN_FRACTION,
        }
    }
}

impl MeshOptions {
    pub fn new(cell_size_meters: f64) -> Self {
        Self { cell_size_meters, ..Self::default() }
    }

    pub fn with_crop(mut self, crop_to_polygon: bool) -> Self {
        self.crop_to_polygon = crop_to_polygon;
        self
    }

    pub fn with_statistics(mut self, generate_statistics: bool) -> Self {
        self.generate_statistics = generate_statistics;
        self
    }

    pub fn with_max_cells(mut self, max_cells: u64) -> Self {
        self.max_cells = max_cells;
        self
    }

    pub fn with_min_retain_fraction(mut self, fraction: f64) -> Self {
        self.min_retain_fraction = fraction;
        self
    }

    /// Check that the options describe a meshable grid.
    pub fn validate(&self) -> Result<()> {
        if !self.cell_size_meters.is_finite() || self.cell_size_meters <= 0.0 {
            return Err(MeshError::InvalidOptions(
                format!("cellSizeMeters must be positive, got {}", self.cell_size_meters)
            ));
        }
        if !(0.0..1.0).contains(&self.min_retain_fraction) {
            return Err(MeshError::InvalidOptions(
                format!("minRetainFraction must be in [0, 1), got {}", self.min_retain_fraction)
            ));
        }
        if self.max_cells == 0 {
            return Err(MeshError::InvalidOptions("maxCells must be at least 1".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_take_defaults() {
        let options: MeshOptions = serde_json::from_str(r#"{"cellSizeMeters": 5}"#).unwrap();
        assert_eq!(options.cell_size_meters, 5.0);
        assert!(options.crop_to_polygon);
        assert_eq!(options.max_cells, DEFAULT_MAX_CELLS);
        assert_eq!(options.min_retain_fraction, DEFAULT_MIN_RETAIN_FRACTION);
    }

    #[test]
    fn camel_case_keys() {
        let options: MeshOptions = serde_json::from_str(
            r#"{"cellSizeMeters": 20, "cropToPolygon": false, "generateStatistics": false, "maxCells": 10}"#
        ).unwrap();
        assert_eq!(options, MeshOptions::new(20.0).with_crop(false).with_statistics(false).with_max_cells(10));
    }

    #[test]
    fn validate_rejects_bad_values() {
        assert!(MeshOptions::new(10.0).validate().is_ok());
        assert!(MeshOptions::new(0.0).validate().is_err());
        assert!(MeshOptions::new(-1.0).validate().is_err());
        assert!(MeshOptions::new(f64::INFINITY).validate().is_err());
        assert!(MeshOptions::new(10.0).with_min_retain_fraction(1.0).validate().is_err());
        assert!(MeshOptions::new(10.0).with_max_cells(0).validate().is_err());
    }
}
