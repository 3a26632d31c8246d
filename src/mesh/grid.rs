use geo::{Coord, Rect};

use crate::error::{MeshError, Result};
use crate::geom::FieldPolygon;
use crate::mesh::CellId;

/// Relative slack (in cells) so that a span that is an exact multiple of the
/// step does not gain an empty trailing row or column from rounding.
const SPAN_EPS: f64 = 1e-9;

/// A uniform lon/lat grid anchored at the field's bounding-box min corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    origin: Coord<f64>,
    d_lng: f64,
    d_lat: f64,
    rows: u32,
    cols: u32,
    cell_area: f64,
}

/// Number of steps needed to cover `span`, at least one.
#[inline]
fn step_count(span: f64, step: f64) -> f64 {
    (span / step - SPAN_EPS).ceil().max(1.0)
}

impl GridSpec {
    /// Lay out square cells of `cell_size_m` meters over the field's bounding box.
    ///
    /// Degree deltas come from the planar scale at the field's centroid
    /// latitude. Fails with `MeshTooLarge` when `rows * cols > max_cells`;
    /// nothing is allocated before that check.
    pub fn new(field: &FieldPolygon, cell_size_m: f64, max_cells: u64) -> Result<Self> {
        if !cell_size_m.is_finite() || cell_size_m <= 0.0 {
            return Err(MeshError::InvalidOptions(format!("cell size must be positive, got {cell_size_m}")));
        }

        let scale = field.scale();
        let (d_lng, d_lat) = scale.degrees_for(cell_size_m);
        let bounds = field.bounds();

        let cols = step_count(bounds.width(), d_lng);
        let rows = step_count(bounds.height(), d_lat);
        let total = rows * cols;

        if total > max_cells as f64 || rows > u32::MAX as f64 || cols > u32::MAX as f64 {
            return Err(MeshError::MeshTooLarge {
                cells: if total >= u64::MAX as f64 { u64::MAX } else { total as u64 },
                max: max_cells,
            });
        }

        Ok(Self {
            origin: bounds.min(),
            d_lng,
            d_lat,
            rows: rows as u32,
            cols: cols as u32,
            cell_area: scale.area_m2(d_lng * d_lat),
        })
    }

    #[inline] pub fn rows(&self) -> u32 { self.rows }

    #[inline] pub fn cols(&self) -> u32 { self.cols }

    /// Number of candidate cells (`rows * cols`).
    #[inline] pub fn len(&self) -> u64 { self.rows as u64 * self.cols as u64 }

    #[inline] pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// South-west corner of cell (0, 0).
    #[inline] pub fn origin(&self) -> Coord<f64> { self.origin }

    /// Cell extent in degrees, `(d_lng, d_lat)`.
    #[inline] pub fn cell_size_deg(&self) -> (f64, f64) { (self.d_lng, self.d_lat) }

    /// Nominal planar area of one cell in degree².
    #[inline] pub fn cell_area_deg(&self) -> f64 { self.d_lng * self.d_lat }

    /// Nominal area of one cell in m².
    #[inline] pub fn cell_area_m2(&self) -> f64 { self.cell_area }

    /// Full extent of the grid; may overhang the field bounds on the north and east.
    pub fn extent(&self) -> Rect<f64> {
        Rect::new(self.origin, self.corner(self.cols, self.rows))
    }

    /// Coordinate of grid line `(col, row)`; neighbouring cells share these bit-for-bit.
    #[inline]
    fn corner(&self, col: u32, row: u32) -> Coord<f64> {
        Coord {
            x: self.origin.x + col as f64 * self.d_lng,
            y: self.origin.y + row as f64 * self.d_lat,
        }
    }

    /// Rectangle of the cell at `(row, col)`.
    pub fn cell_rect(&self, id: CellId) -> Rect<f64> {
        Rect::new(self.corner(id.col, id.row), self.corner(id.col + 1, id.row + 1))
    }

    /// Iterate over every candidate cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (CellId, Rect<f64>)> + '_ {
        (0..self.rows)
            .flat_map(move |row| (0..self.cols).map(move |col| CellId::new(row, col)))
            .map(|id| (id, self.cell_rect(id)))
    }
}
