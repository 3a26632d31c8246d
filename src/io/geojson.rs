use geo::{Coord, LineString, MultiPolygon, Polygon};
use serde_json::{json, Map, Value};

use crate::error::{MeshError, Result};
use crate::geom::FieldPolygon;
use crate::mesh::{MeshCell, MeshResult};

/// Coordinates of a ring as `[[x, y], ...]`.
fn ring_to_json(ring: &LineString<f64>) -> Value {
    Value::Array(ring.coords().map(|c| json!([c.x, c.y])).collect())
}

/// Coordinates of a polygon as `[exterior, hole, ...]`.
fn polygon_coords(polygon: &Polygon<f64>) -> Value {
    Value::Array(
        std::iter::once(polygon.exterior())
            .chain(polygon.interiors())
            .map(ring_to_json)
            .collect()
    )
}

/// GeoJSON geometry for a MultiPolygon; a single piece is written as a `Polygon`.
pub fn multipolygon_to_geojson(mp: &MultiPolygon<f64>) -> Value {
    match mp.0.as_slice() {
        [polygon] => json!({ "type": "Polygon", "coordinates": polygon_coords(polygon) }),
        polygons => json!({
            "type": "MultiPolygon",
            "coordinates": polygons.iter().map(polygon_coords).collect::<Vec<_>>(),
        }),
    }
}

/// GeoJSON Feature for one cell.
pub fn cell_to_feature(cell: &MeshCell) -> Value {
    let id = cell.id();
    let mut properties = Map::new();
    properties.insert("id".to_string(), json!(id.to_string()));
    properties.insert("row".to_string(), json!(id.row));
    properties.insert("col".to_string(), json!(id.col));
    properties.insert("selected".to_string(), json!(cell.is_selected()));
    properties.insert("occupied".to_string(), json!(cell.is_occupied()));
    properties.insert("clip".to_string(), json!(if cell.is_full() { "full" } else { "partial" }));
    properties.insert("areaSquareMeters".to_string(), json!(cell.area_m2()));

    json!({
        "type": "Feature",
        "id": id.to_string(),
        "geometry": multipolygon_to_geojson(&cell.geometry()),
        "properties": properties,
    })
}

/// Convert cells to a GeoJSON FeatureCollection, one feature per cell.
pub fn cells_to_geojson<'a>(cells: impl IntoIterator<Item = &'a MeshCell>) -> Value {
    let features = cells.into_iter().map(cell_to_feature).collect::<Vec<_>>();
    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}

impl MeshResult {
    /// Export all retained cells as a GeoJSON FeatureCollection.
    pub fn to_geojson(&self) -> Value {
        cells_to_geojson(self.cells())
    }
}

/// Parse a ring from GeoJSON coordinates: `[[x, y], [x, y], ...]`.
fn parse_ring(value: &Value) -> Result<Vec<Coord<f64>>> {
    let points = value.as_array()
        .ok_or_else(|| MeshError::InvalidGeoJson("ring must be an array of positions".to_string()))?;

    points.iter()
        .map(|position| {
            let xy = position.as_array()
                .filter(|a| a.len() >= 2)
                .ok_or_else(|| MeshError::InvalidGeoJson("position must have at least two numbers".to_string()))?;
            match (xy[0].as_f64(), xy[1].as_f64()) {
                (Some(x), Some(y)) => Ok(Coord { x, y }),
                _ => Err(MeshError::InvalidGeoJson("position coordinates must be numbers".to_string())),
            }
        })
        .collect()
}

/// Parse Polygon coordinates `[exterior, hole, ...]` into a normalized field.
fn parse_polygon(coords: &Value) -> Result<FieldPolygon> {
    let rings = coords.as_array()
        .ok_or_else(|| MeshError::InvalidGeoJson("polygon coordinates must be an array of rings".to_string()))?;
    let (exterior, holes) = rings.split_first()
        .ok_or_else(|| MeshError::InvalidGeoJson("polygon has no exterior ring".to_string()))?;

    let exterior = parse_ring(exterior)?;
    let holes = holes.iter().map(parse_ring).collect::<Result<Vec<_>>>()?;
    FieldPolygon::with_holes(&exterior, &holes)
}

/// Parse a GeoJSON geometry object. MultiPolygons contribute their first polygon.
fn parse_geometry(geometry: &Value) -> Result<FieldPolygon> {
    let coords = &geometry["coordinates"];
    match geometry["type"].as_str() {
        Some("Polygon") => parse_polygon(coords),
        Some("MultiPolygon") => {
            let polygons = coords.as_array()
                .ok_or_else(|| MeshError::InvalidGeoJson("multipolygon coordinates must be an array".to_string()))?;
            if polygons.len() > 1 {
                log::warn!("multipolygon field has {} parts, meshing only the first", polygons.len());
            }
            let first = polygons.first()
                .ok_or_else(|| MeshError::InvalidGeoJson("multipolygon has no polygons".to_string()))?;
            parse_polygon(first)
        }
        Some(other) => Err(MeshError::InvalidGeoJson(format!("unsupported geometry type {other}"))),
        None => Err(MeshError::InvalidGeoJson("geometry has no type".to_string())),
    }
}

/// Read a field boundary from a GeoJSON value.
///
/// Accepts a `Polygon` or `MultiPolygon` geometry, a `Feature` wrapping one,
/// or a `FeatureCollection` (the first polygonal feature is used).
pub fn field_from_geojson(value: &Value) -> Result<FieldPolygon> {
    match value["type"].as_str() {
        Some("FeatureCollection") => {
            let features = value["features"].as_array()
                .ok_or_else(|| MeshError::InvalidGeoJson("feature collection has no features array".to_string()))?;
            let feature = features.iter()
                .find(|f| matches!(f["geometry"]["type"].as_str(), Some("Polygon" | "MultiPolygon")))
                .ok_or_else(|| MeshError::InvalidGeoJson("no polygon feature in collection".to_string()))?;
            parse_geometry(&feature["geometry"])
        }
        Some("Feature") => parse_geometry(&value["geometry"]),
        Some(_) => parse_geometry(value),
        None => Err(MeshError::InvalidGeoJson("object has no type".to_string())),
    }
}

/// Read a field boundary from GeoJSON text.
pub fn field_from_geojson_str(text: &str) -> Result<FieldPolygon> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| MeshError::InvalidGeoJson(e.to_string()))?;
    field_from_geojson(&value)
}
