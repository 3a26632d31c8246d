use std::fmt;

use geo::{Centroid, Coord, MultiPolygon, Rect};
use serde::{Deserialize, Serialize};

use crate::geom::{self, Location};

/// Identifies a cell by its row and column in the generating grid.
///
/// Rows grow northwards from the grid's southern edge and columns grow
/// eastwards from its western edge. Ids are only meaningful within the mesh
/// that produced them; regenerating invalidates them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellId {
    pub row: u32,
    pub col: u32,
}

impl CellId {
    #[inline] pub fn new(row: u32, col: u32) -> Self { Self { row, col } }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.row, self.col)
    }
}

/// Geometry of a retained cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellShape {
    /// The unclipped grid rectangle.
    Full,
    /// The part of the rectangle inside the field (possibly several pieces).
    Clipped(MultiPolygon<f64>),
}

/// One retained grid tile, possibly cropped to the field boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshCell {
    id: CellId,
    bounds: Rect<f64>,
    shape: CellShape,
    area: f64,
    centroid: Coord<f64>,
    pub(crate) selected: bool,
    pub(crate) occupied: bool,
}

impl MeshCell {
    pub(crate) fn new(id: CellId, bounds: Rect<f64>, shape: CellShape, area: f64) -> Self {
        let centroid = match &shape {
            CellShape::Full => bounds.center(),
            CellShape::Clipped(mp) => mp.centroid().map(|p| p.0).unwrap_or_else(|| bounds.center()),
        };
        Self { id, bounds, shape, area, centroid, selected: false, occupied: false }
    }

    #[inline] pub fn id(&self) -> CellId { self.id }

    /// Bounding box of the grid rectangle in lon/lat.
    #[inline] pub fn bounds(&self) -> Rect<f64> { self.bounds }

    #[inline] pub fn shape(&self) -> &CellShape { &self.shape }

    #[inline] pub fn is_full(&self) -> bool { matches!(self.shape, CellShape::Full) }

    /// Area in m².
    #[inline] pub fn area_m2(&self) -> f64 { self.area }

    /// Centroid of the cell geometry in lon/lat.
    #[inline] pub fn centroid(&self) -> Coord<f64> { self.centroid }

    #[inline] pub fn is_selected(&self) -> bool { self.selected }

    /// True once the cell has been registered to a plot.
    #[inline] pub fn is_occupied(&self) -> bool { self.occupied }

    /// The cell geometry as a MultiPolygon (the full rectangle for `Full` cells).
    pub fn geometry(&self) -> MultiPolygon<f64> {
        match &self.shape {
            CellShape::Full => MultiPolygon(vec![self.bounds.to_polygon()]),
            CellShape::Clipped(mp) => mp.clone(),
        }
    }

    /// Returns true if `p` lies in the cell (boundary included).
    pub fn contains(&self, p: Coord<f64>) -> bool {
        let (min, max) = (self.bounds.min(), self.bounds.max());
        if p.x < min.x || p.x > max.x || p.y < min.y || p.y > max.y { return false }

        match &self.shape {
            CellShape::Full => true,
            CellShape::Clipped(mp) => {
                let rings = mp.0.iter()
                    .flat_map(|poly| std::iter::once(poly.exterior()).chain(poly.interiors()))
                    .map(|ls| ls.0.as_slice());
                geom::locate(p, rings) != Location::Outside
            }
        }
    }
}
