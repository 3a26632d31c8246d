use serde::{Deserialize, Serialize};

use crate::mesh::MeshCell;

/// Square meters per hectare.
pub const M2_PER_HECTARE: f64 = 10_000.0;

/// Convert m² to hectares.
#[inline] pub fn hectares(m2: f64) -> f64 { m2 / M2_PER_HECTARE }

/// Area accounting over a cell collection. All areas are in m².
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeshStatistics {
    pub total_cells: usize,
    pub full_cells: usize,
    pub partial_cells: usize,
    pub selected_cells: usize,
    pub occupied_cells: usize,
    pub total_area: f64,
    pub selected_area: f64,
    pub occupied_area: f64,
    pub field_area: f64,
    /// Retained cell area divided by the field area.
    pub coverage_ratio: f64,
}

impl MeshStatistics {
    #[inline] pub fn total_hectares(&self) -> f64 { hectares(self.total_area) }

    #[inline] pub fn selected_hectares(&self) -> f64 { hectares(self.selected_area) }

    #[inline] pub fn occupied_hectares(&self) -> f64 { hectares(self.occupied_area) }

    /// Area neither selected nor occupied.
    #[inline]
    pub fn available_area(&self) -> f64 {
        (self.total_area - self.selected_area - self.occupied_area).max(0.0)
    }
}

/// Summarize `cells` against a field of `field_area` m².
///
/// A cell that is both selected and occupied counts towards both areas.
/// `coverage_ratio` is zero for a non-positive field area.
pub fn summarize<'a>(cells: impl IntoIterator<Item = &'a MeshCell>, field_area: f64) -> MeshStatistics {
    let mut stats = cells.into_iter().fold(MeshStatistics::default(), |mut s, cell| {
        s.total_cells += 1;
        s.total_area += cell.area_m2();
        if cell.is_full() { s.full_cells += 1 } else { s.partial_cells += 1 }
        if cell.is_selected() {
            s.selected_cells += 1;
            s.selected_area += cell.area_m2();
        }
        if cell.is_occupied() {
            s.occupied_cells += 1;
            s.occupied_area += cell.area_m2();
        }
        s
    });

    stats.field_area = field_area;
    stats.coverage_ratio = if field_area > 0.0 { stats.total_area / field_area } else { 0.0 };
    stats
}
