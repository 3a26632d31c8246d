use geo::{Coord, Rect};
use rstar::{RTreeObject, AABB};

/// A mesh cell's bounding box in an R-tree, associated with the cell by index.
#[derive(Debug, Clone)]
pub(crate) struct BoundingBox {
    idx: usize, // Index of the corresponding cell in the mesh
    bbox: Rect<f64>,
}

impl BoundingBox {
    pub(crate) fn new(idx: usize, bbox: Rect<f64>) -> Self {
        Self { idx, bbox }
    }

    /// Get the index of the corresponding cell.
    #[inline] pub(crate) fn idx(&self) -> usize { self.idx }

    /// Returns true if `p` lies in the closed box.
    #[inline]
    pub(crate) fn contains(&self, p: Coord<f64>) -> bool {
        let (min, max) = (self.bbox.min(), self.bbox.max());
        min.x <= p.x && p.x <= max.x && min.y <= p.y && p.y <= max.y
    }
}

impl RTreeObject for BoundingBox {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.bbox.min().into(), self.bbox.max().into())
    }
}

/// Envelope of a lon/lat rectangle.
#[inline]
pub(crate) fn envelope(rect: &Rect<f64>) -> AABB<[f64; 2]> {
    AABB::from_corners(rect.min().into(), rect.max().into())
}
