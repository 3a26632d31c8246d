use geo::{Coord, Rect};

/// Distance (in degrees) under which a point is considered to lie on a ring edge.
pub(crate) const BOUNDARY_EPS: f64 = 1e-10;

/// Where a point lies relative to a set of closed rings under the even-odd rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Inside,
    Boundary,
    Outside,
}

impl Location {
    /// True for `Inside` and `Boundary` (closed-set membership).
    #[inline] pub fn is_covered(self) -> bool { self != Location::Outside }
}

/// Signed shoelace area of a closed ring (positive for counter-clockwise).
///
/// Coordinates are taken relative to the first vertex; raw lon/lat cross
/// products are far larger than a field's area and cancel catastrophically.
pub(crate) fn signed_area(ring: &[Coord<f64>]) -> f64 {
    let Some(&origin) = ring.first() else { return 0.0 };
    let mut a = 0.0;
    for w in ring.windows(2) {
        let (p, q) = (w[0] - origin, w[1] - origin);
        a += p.x * q.y - q.x * p.y;
    }
    a / 2.0
}

/// Accumulate the first moments of a closed ring about `origin`:
/// (Σ cross·(x₀+x₁), Σ cross·(y₀+y₁)) with every vertex shifted by `origin`.
/// Dividing the totals over all rings by 6·A and adding `origin` back gives the centroid.
pub(crate) fn first_moments(ring: &[Coord<f64>], origin: Coord<f64>) -> (f64, f64) {
    ring.windows(2).fold((0.0, 0.0), |(mx, my), w| {
        let (p, q) = (w[0] - origin, w[1] - origin);
        let cross = p.x * q.y - q.x * p.y;
        (mx + cross * (p.x + q.x), my + cross * (p.y + q.y))
    })
}

/// Squared distance from `p` to the segment `a`-`b`.
fn segment_distance_sq(p: Coord<f64>, a: Coord<f64>, b: Coord<f64>) -> f64 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq > 0.0 {
        (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let (ex, ey) = (a.x + t * dx - p.x, a.y + t * dy - p.y);
    ex * ex + ey * ey
}

/// Locate `p` against closed rings using ray casting (even-odd rule).
/// Points within `BOUNDARY_EPS` of any edge are reported as `Boundary`.
pub(crate) fn locate<'a>(p: Coord<f64>, rings: impl IntoIterator<Item = &'a [Coord<f64>]>) -> Location {
    let eps_sq = BOUNDARY_EPS * BOUNDARY_EPS;
    let mut inside = false;

    for ring in rings {
        for w in ring.windows(2) {
            let (a, b) = (w[0], w[1]);
            if segment_distance_sq(p, a, b) <= eps_sq { return Location::Boundary }

            // Cast a ray towards +x and count the edges it crosses.
            if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
                inside = !inside;
            }
        }
    }

    if inside { Location::Inside } else { Location::Outside }
}

/// Returns true if the segment `a`-`b` reaches into `rect` shrunk by `BOUNDARY_EPS`
/// on every side, i.e. passes through the rectangle's interior (Liang-Barsky).
pub(crate) fn segment_enters(a: Coord<f64>, b: Coord<f64>, rect: &Rect<f64>) -> bool {
    let (min, max) = (rect.min(), rect.max());
    let (x0, x1) = (min.x + BOUNDARY_EPS, max.x - BOUNDARY_EPS);
    let (y0, y1) = (min.y + BOUNDARY_EPS, max.y - BOUNDARY_EPS);
    if x0 >= x1 || y0 >= y1 { return false }

    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);

    for (p, q) in [(-dx, a.x - x0), (dx, x1 - a.x), (-dy, a.y - y0), (dy, y1 - a.y)] {
        if p == 0.0 {
            if q < 0.0 { return false }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 { return false }
            t0 = t0.max(r);
        } else {
            if r < t0 { return false }
            t1 = t1.min(r);
        }
    }

    t0 <= t1
}
