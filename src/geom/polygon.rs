use ahash::AHashSet;
use geo::{Coord, LineString, Polygon, Rect};

use crate::error::{MeshError, Result};
use crate::geom::proj::MetersPerDegree;
use crate::geom::ring::{self, Location};

/// Planar area (degree²) at or below which a ring is treated as degenerate.
const MIN_RING_AREA: f64 = 1e-18;

/// A validated, closed field boundary in lon/lat.
///
/// The exterior ring is stored counter-clockwise and holes clockwise, each
/// closed (first coordinate repeated at the end). The caller's input is
/// never modified; normalization works on a copy.
#[derive(Debug, Clone)]
pub struct FieldPolygon {
    exterior: Vec<Coord<f64>>,
    interiors: Vec<Vec<Coord<f64>>>,
    bounds: Rect<f64>,
    signed_area: f64,
    area: f64,
    centroid: Coord<f64>,
    scale: MetersPerDegree,
    polygon: Polygon<f64>,
}

/// Check coordinates, drop consecutive duplicates, and close the ring.
fn clean_ring(points: &[Coord<f64>]) -> Result<Vec<Coord<f64>>> {
    if let Some(bad) = points.iter().find(|c| {
        !c.x.is_finite() || !c.y.is_finite() || c.x.abs() > 180.0 || c.y.abs() > 90.0
    }) {
        return Err(MeshError::InvalidCoordinate { lng: bad.x, lat: bad.y });
    }

    let mut ring = points.to_vec();
    ring.dedup();
    if ring.len() > 1 && ring.first() == ring.last() { ring.pop(); }

    let distinct = ring.iter()
        .map(|c| (c.x.to_bits(), c.y.to_bits()))
        .collect::<AHashSet<_>>()
        .len();
    if distinct < 3 {
        return Err(MeshError::InvalidPolygon(
            format!("ring has {distinct} distinct vertices, at least 3 are required")
        ));
    }

    ring.push(ring[0]);

    if ring::signed_area(&ring).abs() <= MIN_RING_AREA {
        return Err(MeshError::InvalidPolygon("ring encloses zero area".to_string()));
    }

    Ok(ring)
}

impl FieldPolygon {
    /// Normalize a single boundary ring given as (lng, lat) coordinates.
    pub fn normalize(ring: &[Coord<f64>]) -> Result<Self> {
        Self::with_holes(ring, &[])
    }

    /// Normalize a boundary ring given as `[lng, lat]` pairs.
    pub fn from_lng_lat(points: &[[f64; 2]]) -> Result<Self> {
        let ring = points.iter().map(|&[x, y]| Coord { x, y }).collect::<Vec<_>>();
        Self::normalize(&ring)
    }

    /// Normalize an exterior ring together with interior rings (holes).
    /// Holes are assumed to lie inside the exterior; self-intersections are not detected.
    pub fn with_holes(exterior: &[Coord<f64>], holes: &[Vec<Coord<f64>>]) -> Result<Self> {
        let mut exterior = clean_ring(exterior)?;
        let signed_area = ring::signed_area(&exterior);
        if signed_area < 0.0 { exterior.reverse(); }

        let interiors = holes.iter()
            .map(|hole| {
                let mut hole = clean_ring(hole)?;
                if ring::signed_area(&hole) > 0.0 { hole.reverse(); }
                Ok(hole)
            })
            .collect::<Result<Vec<_>>>()?;

        // Holes are clockwise, so their signed areas subtract from the exterior.
        let area = std::iter::once(&exterior).chain(&interiors)
            .map(|r| ring::signed_area(r))
            .sum::<f64>();
        if area <= MIN_RING_AREA {
            return Err(MeshError::InvalidPolygon("holes cover the whole exterior".to_string()));
        }

        let origin = exterior[0];
        let (mx, my) = std::iter::once(&exterior).chain(&interiors)
            .map(|r| ring::first_moments(r, origin))
            .fold((0.0, 0.0), |(ax, ay), (x, y)| (ax + x, ay + y));
        let centroid = Coord { x: origin.x + mx / (6.0 * area), y: origin.y + my / (6.0 * area) };

        let (mut min, mut max) = (exterior[0], exterior[0]);
        for c in &exterior {
            min.x = min.x.min(c.x);
            min.y = min.y.min(c.y);
            max.x = max.x.max(c.x);
            max.y = max.y.max(c.y);
        }

        let polygon = Polygon::new(
            LineString(exterior.clone()),
            interiors.iter().cloned().map(LineString).collect(),
        );

        Ok(Self {
            scale: MetersPerDegree::at(centroid.y)?,
            bounds: Rect::new(min, max),
            exterior,
            interiors,
            signed_area,
            area,
            centroid,
            polygon,
        })
    }

    /// Closed exterior ring, counter-clockwise.
    #[inline] pub fn exterior(&self) -> &[Coord<f64>] { &self.exterior }

    /// Closed interior rings, clockwise.
    #[inline] pub fn interiors(&self) -> &[Vec<Coord<f64>>] { &self.interiors }

    /// Axis-aligned bounding box in lon/lat.
    #[inline] pub fn bounds(&self) -> Rect<f64> { self.bounds }

    /// Signed planar area (degree²) of the exterior ring in its input orientation;
    /// positive when the caller supplied it counter-clockwise.
    #[inline] pub fn signed_area(&self) -> f64 { self.signed_area }

    /// Net planar area in degree² (exterior minus holes).
    #[inline] pub fn planar_area(&self) -> f64 { self.area }

    /// Area-weighted centroid in lon/lat.
    #[inline] pub fn centroid(&self) -> Coord<f64> { self.centroid }

    /// Metric scale factors at the centroid latitude.
    #[inline] pub fn scale(&self) -> MetersPerDegree { self.scale }

    /// Net area in m².
    #[inline] pub fn area_m2(&self) -> f64 { self.scale.area_m2(self.area) }

    /// The boundary as a `geo::Polygon`.
    #[inline] pub fn as_polygon(&self) -> &Polygon<f64> { &self.polygon }

    /// Iterate over all rings, exterior first.
    pub(crate) fn rings(&self) -> impl Iterator<Item = &[Coord<f64>]> + '_ {
        std::iter::once(self.exterior.as_slice())
            .chain(self.interiors.iter().map(Vec::as_slice))
    }

    /// Locate a point against the boundary (even-odd rule).
    #[inline] pub fn locate(&self, p: Coord<f64>) -> Location { ring::locate(p, self.rings()) }

    /// Returns true if any boundary edge passes through the interior of `rect`.
    pub(crate) fn crosses_interior(&self, rect: &Rect<f64>) -> bool {
        self.rings()
            .flat_map(|ring| ring.windows(2))
            .any(|w| ring::segment_enters(w[0], w[1], rect))
    }
}
