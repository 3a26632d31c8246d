use geo::{Area, BooleanOps, Coord, MultiPolygon, Rect};

use crate::geom::{FieldPolygon, Location};

/// Outcome of intersecting one grid rectangle with the field.
#[derive(Debug, Clone, PartialEq)]
pub enum ClipResult {
    /// The rectangle lies entirely inside the field.
    Full,
    /// The rectangle straddles the boundary; `area` is planar (degree²).
    Partial { geometry: MultiPolygon<f64>, area: f64 },
    /// No overlap of positive area.
    Empty,
}

/// Strategy for intersecting grid rectangles with a field boundary.
pub trait Clipper {
    fn clip(&self, cell: &Rect<f64>, field: &FieldPolygon) -> ClipResult;
}

/// Default clipper for arbitrary (including concave or holed) fields.
///
/// Corners and centre are classified by ray casting first. A rectangle whose
/// interior no boundary edge passes through is wholly inside or wholly
/// outside, and its centre decides which. Only rectangles the boundary
/// actually crosses pay for a general polygon overlay.
#[derive(Debug, Clone, Copy, Default)]
pub struct OverlayClipper;

impl OverlayClipper {
    /// Classify the four corners (counter-clockwise from the south-west) and
    /// then the centre of `cell`.
    fn sample(cell: &Rect<f64>, field: &FieldPolygon) -> [Location; 5] {
        let (min, max) = (cell.min(), cell.max());
        [
            min,
            Coord { x: max.x, y: min.y },
            max,
            Coord { x: min.x, y: max.y },
            cell.center(),
        ]
        .map(|p| field.locate(p))
    }

    fn overlay(cell: &Rect<f64>, field: &FieldPolygon) -> ClipResult {
        let geometry = field.as_polygon().intersection(&cell.to_polygon());
        let area = geometry.unsigned_area();
        if area > 0.0 {
            ClipResult::Partial { geometry, area }
        } else {
            ClipResult::Empty
        }
    }
}

impl Clipper for OverlayClipper {
    fn clip(&self, cell: &Rect<f64>, field: &FieldPolygon) -> ClipResult {
        let samples = Self::sample(cell, field);
        let any_inside = samples.contains(&Location::Inside);
        let any_outside = samples.contains(&Location::Outside);

        // Mixed samples: the boundary must cross the cell.
        if any_inside && any_outside { return Self::overlay(cell, field) }

        if !field.crosses_interior(cell) {
            match samples[4] {
                Location::Inside => return ClipResult::Full,
                Location::Outside => return ClipResult::Empty,
                Location::Boundary => {}
            }
        }

        Self::overlay(cell, field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use geo::coord;

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Rect<f64> {
        Rect::new(coord! { x: x0, y: y0 }, coord! { x: x1, y: y1 })
    }

    fn square() -> FieldPolygon {
        FieldPolygon::from_lng_lat(&[[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0]]).unwrap()
    }

    /// A "U" shaped field: 0..3 x 0..3 with a notch 1..2 x 1..3 cut from the top.
    fn u_shape() -> FieldPolygon {
        FieldPolygon::from_lng_lat(&[
            [0.0, 0.0], [3.0, 0.0], [3.0, 3.0], [2.0, 3.0], [2.0, 1.0], [1.0, 1.0], [1.0, 3.0], [0.0, 3.0],
        ]).unwrap()
    }

    #[test]
    fn samples_corners_then_centre() {
        // Only the south-west corner of this cell reaches the field's north-east corner.
        let samples = OverlayClipper::sample(&rect(4.0, 4.0, 6.0, 6.0), &square());
        assert_eq!(samples[0], Location::Boundary);
        assert!(samples[1..].iter().all(|&l| l == Location::Outside));

        let samples = OverlayClipper::sample(&rect(1.0, 1.0, 2.0, 2.0), &square());
        assert_eq!(samples, [Location::Inside; 5]);
    }

    #[test]
    fn interior_cell_is_full() {
        assert_eq!(OverlayClipper.clip(&rect(1.0, 1.0, 2.0, 2.0), &square()), ClipResult::Full);
    }

    #[test]
    fn cell_sharing_boundary_is_full() {
        // Corners lie exactly on the field boundary.
        assert_eq!(OverlayClipper.clip(&rect(0.0, 0.0, 2.0, 2.0), &square()), ClipResult::Full);
        assert_eq!(OverlayClipper.clip(&rect(0.0, 0.0, 4.0, 4.0), &square()), ClipResult::Full);
    }

    #[test]
    fn distant_cell_is_empty() {
        assert_eq!(OverlayClipper.clip(&rect(10.0, 10.0, 11.0, 11.0), &square()), ClipResult::Empty);
    }

    #[test]
    fn edge_touching_cell_is_empty() {
        assert_eq!(OverlayClipper.clip(&rect(4.0, 0.0, 5.0, 1.0), &square()), ClipResult::Empty);
        // Shares only a vertex.
        assert_eq!(OverlayClipper.clip(&rect(4.0, 4.0, 5.0, 5.0), &square()), ClipResult::Empty);
    }

    #[test]
    fn straddling_cell_is_partial() {
        match OverlayClipper.clip(&rect(3.0, 1.0, 5.0, 2.0), &square()) {
            ClipResult::Partial { area, .. } => assert_relative_eq!(area, 1.0, epsilon = 1e-9),
            other => panic!("expected partial, got {other:?}"),
        }
    }

    #[test]
    fn boundary_spike_inside_cell_is_detected() {
        // All samples are inside, but a concave notch enters the cell interior.
        let field = FieldPolygon::from_lng_lat(&[
            [0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [2.2, 4.0], [2.0, 2.7], [1.8, 4.0], [0.0, 4.0],
        ]).unwrap();
        match OverlayClipper.clip(&rect(1.0, 2.0, 3.0, 3.0), &field) {
            ClipResult::Partial { area, .. } => assert!(area < 2.0 && area > 1.5),
            other => panic!("expected partial, got {other:?}"),
        }
    }

    #[test]
    fn concave_notch_splits_cell_into_pieces() {
        match OverlayClipper.clip(&rect(0.0, 2.0, 3.0, 3.0), &u_shape()) {
            ClipResult::Partial { geometry, area } => {
                assert_eq!(geometry.0.len(), 2);
                assert_relative_eq!(area, 2.0, epsilon = 1e-9);
            }
            other => panic!("expected partial, got {other:?}"),
        }
    }

    #[test]
    fn cell_inside_notch_is_empty() {
        assert_eq!(OverlayClipper.clip(&rect(1.0, 1.0, 2.0, 3.0), &u_shape()), ClipResult::Empty);
    }

    #[test]
    fn cell_over_hole_is_partial() {
        let outer = [[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0]].map(|[x, y]| Coord { x, y });
        let hole = [[1.5, 1.5], [2.5, 1.5], [2.5, 2.5], [1.5, 2.5]].map(|[x, y]| Coord { x, y }).to_vec();
        let field = FieldPolygon::with_holes(&outer, &[hole]).unwrap();
        match OverlayClipper.clip(&rect(1.0, 1.0, 3.0, 3.0), &field) {
            ClipResult::Partial { area, .. } => assert_relative_eq!(area, 3.0, epsilon = 1e-9),
            other => panic!("expected partial, got {other:?}"),
        }
    }
}
