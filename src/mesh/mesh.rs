use ahash::AHashMap;
use geo::{BooleanOps, Coord, MultiPolygon, Rect};
use rstar::{RTree, AABB};
use serde::{Deserialize, Serialize};

use crate::geom::{envelope, BoundingBox, FieldPolygon};
use crate::mesh::{CellId, GridSpec, MeshCell};
use crate::stats::{self, MeshStatistics};

/// A clipped cell that was dropped for falling below the retain threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DegenerateClip {
    pub id: CellId,
    pub area_m2: f64,
}

/// The cells chosen for a plot, as handed to plot registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotSelection {
    pub cell_ids: Vec<CellId>,
    pub area_m2: f64,
    pub area_hectares: f64,
}

/// The output of one mesh generation: the retained cells and their selection state.
///
/// A `MeshResult` is an independent owned value. Selection state lives only
/// here; regenerating the mesh produces a fresh result with fresh ids.
#[derive(Debug, Clone)]
pub struct MeshResult {
    field: FieldPolygon,
    grid: GridSpec,
    cells: Vec<MeshCell>,
    index: AHashMap<CellId, usize>,
    rtree: RTree<BoundingBox>,
    discarded: Vec<DegenerateClip>,
    statistics: Option<MeshStatistics>,
}

impl MeshResult {
    pub(crate) fn new(
        field: FieldPolygon,
        grid: GridSpec,
        cells: Vec<MeshCell>,
        discarded: Vec<DegenerateClip>,
        with_statistics: bool,
    ) -> Self {
        let mut mesh = Self {
            index: cells.iter().enumerate().map(|(i, cell)| (cell.id(), i)).collect(),
            rtree: RTree::bulk_load(
                cells.iter().enumerate()
                    .map(|(i, cell)| BoundingBox::new(i, cell.bounds()))
                    .collect()
            ),
            statistics: None,
            field,
            grid,
            cells,
            discarded,
        };
        if with_statistics { mesh.statistics = Some(mesh.summarize()); }
        mesh
    }

    /// The normalized field this mesh was generated from.
    #[inline] pub fn field(&self) -> &FieldPolygon { &self.field }

    /// The grid layout used for generation.
    #[inline] pub fn grid(&self) -> &GridSpec { &self.grid }

    /// Retained cells in row-major order.
    #[inline] pub fn cells(&self) -> &[MeshCell] { &self.cells }

    /// Number of retained cells.
    #[inline] pub fn total_cells(&self) -> usize { self.cells.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.cells.is_empty() }

    /// Slivers dropped during clipping.
    #[inline] pub fn discarded(&self) -> &[DegenerateClip] { &self.discarded }

    /// Statistics kept current after every mutation, if requested at generation.
    #[inline] pub fn statistics(&self) -> Option<&MeshStatistics> { self.statistics.as_ref() }

    /// Look up a cell by id.
    #[inline]
    pub fn cell(&self, id: CellId) -> Option<&MeshCell> {
        self.index.get(&id).map(|&i| &self.cells[i])
    }

    /// Compute statistics for the current state.
    pub fn summarize(&self) -> MeshStatistics {
        stats::summarize(&self.cells, self.field.area_m2())
    }

    fn refresh(&mut self) {
        if self.statistics.is_some() { self.statistics = Some(self.summarize()); }
    }

    /// Indices of cells whose bounding box intersects `bounds` (closed).
    fn query(&self, bounds: &Rect<f64>) -> Vec<usize> {
        self.rtree.locate_in_envelope_intersecting(&envelope(bounds))
            .map(|bb| bb.idx())
            .collect()
    }

    /// The cell containing the point, if any. A point on an edge shared by
    /// several cells resolves to the lowest id in row-major order.
    pub fn cell_at(&self, lng: f64, lat: f64) -> Option<CellId> {
        let p = Coord { x: lng, y: lat };
        self.rtree.locate_in_envelope_intersecting(&AABB::from_point([lng, lat]))
            .filter(|bb| bb.contains(p))
            .map(|bb| &self.cells[bb.idx()])
            .filter(|cell| cell.contains(p))
            .map(|cell| cell.id())
            .min()
    }

    /// Toggle the selection of the cell containing the point.
    /// Returns the toggled cell, or `None` (and changes nothing) if no cell contains it.
    pub fn select_at_point(&mut self, lng: f64, lat: f64) -> Option<CellId> {
        let id = self.cell_at(lng, lat)?;
        let i = self.index[&id];
        self.cells[i].selected = !self.cells[i].selected;
        self.refresh();
        Some(id)
    }

    /// Select every cell whose bounding box intersects `bounds`.
    ///
    /// Selection is additive: cells outside `bounds` keep their state and no
    /// cell is ever deselected. Returns the number of newly selected cells.
    pub fn select_in_bounds(&mut self, bounds: &Rect<f64>) -> usize {
        self.set_in_bounds(bounds, true)
    }

    /// Deselect every cell whose bounding box intersects `bounds`.
    /// Returns the number of cells that were deselected.
    pub fn deselect_in_bounds(&mut self, bounds: &Rect<f64>) -> usize {
        self.set_in_bounds(bounds, false)
    }

    fn set_in_bounds(&mut self, bounds: &Rect<f64>, selected: bool) -> usize {
        let mut changed = 0;
        for i in self.query(bounds) {
            if self.cells[i].selected != selected {
                self.cells[i].selected = selected;
                changed += 1;
            }
        }
        if changed > 0 { self.refresh(); }
        changed
    }

    /// Set the selection of one cell. Returns false if the id is unknown.
    pub fn set_selected(&mut self, id: CellId, selected: bool) -> bool {
        let Some(&i) = self.index.get(&id) else { return false };
        if self.cells[i].selected != selected {
            self.cells[i].selected = selected;
            self.refresh();
        }
        true
    }

    /// Deselect all cells.
    pub fn clear_selection(&mut self) {
        self.cells.iter_mut().for_each(|cell| cell.selected = false);
        self.refresh();
    }

    /// Iterate over the selected cells in row-major order.
    pub fn selected_cells(&self) -> impl Iterator<Item = &MeshCell> + '_ {
        self.cells.iter().filter(|cell| cell.selected)
    }

    /// Ids and area of the current selection.
    pub fn plot_selection(&self) -> PlotSelection {
        let (cell_ids, area_m2) = self.selected_cells()
            .fold((Vec::new(), 0.0), |(mut ids, area), cell| {
                ids.push(cell.id());
                (ids, area + cell.area_m2())
            });
        PlotSelection { cell_ids, area_m2, area_hectares: stats::hectares(area_m2) }
    }

    /// Union of the selected cells' geometries.
    /// This may be slow for large selections of clipped cells.
    pub fn selected_geometry(&self) -> MultiPolygon<f64> {
        self.selected_cells()
            .map(MeshCell::geometry)
            .reduce(|a, b| a.union(&b))
            .unwrap_or_else(|| MultiPolygon(vec![]))
    }

    /// Mark the selected cells as occupied by a registered plot and clear the
    /// selection. Returns the number of cells newly occupied.
    pub fn mark_selected_occupied(&mut self) -> usize {
        let mut marked = 0;
        for cell in self.cells.iter_mut().filter(|cell| cell.selected) {
            if !cell.occupied { marked += 1; }
            cell.occupied = true;
            cell.selected = false;
        }
        self.refresh();
        marked
    }

    /// Release all occupied cells.
    pub fn clear_occupied(&mut self) {
        self.cells.iter_mut().for_each(|cell| cell.occupied = false);
        self.refresh();
    }
}

/// Toggle the cell at (`lng`, `lat`) and hand the mesh back.
pub fn select_cell_at_point(mut mesh: MeshResult, lng: f64, lat: f64) -> MeshResult {
    mesh.select_at_point(lng, lat);
    mesh
}

/// Additively select the cells intersecting `bounds` and hand the mesh back.
pub fn select_cells_in_bounds(mut mesh: MeshResult, bounds: Rect<f64>) -> MeshResult {
    mesh.select_in_bounds(&bounds);
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::CellShape;
    use geo::coord;

    /// A 3 x 2 mesh of unit cells over the field 0..3 x 0..2 (degrees), all full.
    fn mesh(with_statistics: bool) -> MeshResult {
        let field = FieldPolygon::from_lng_lat(&[[0.0, 0.0], [3.0, 0.0], [3.0, 2.0], [0.0, 2.0]]).unwrap();
        let grid = GridSpec::new(&field, field.scale().lat, 100).unwrap();
        let cells = (0..2u32)
            .flat_map(|row| (0..3u32).map(move |col| CellId::new(row, col)))
            .map(|id| {
                let min = coord! { x: id.col as f64, y: id.row as f64 };
                let rect = Rect::new(min, coord! { x: min.x + 1.0, y: min.y + 1.0 });
                MeshCell::new(id, rect, CellShape::Full, 100.0)
            })
            .collect();
        MeshResult::new(field, grid, cells, vec![], with_statistics)
    }

    #[test]
    fn point_selection_toggles() {
        let mut mesh = mesh(false);
        assert_eq!(mesh.select_at_point(1.5, 0.5), Some(CellId::new(0, 1)));
        assert!(mesh.cell(CellId::new(0, 1)).unwrap().is_selected());
        assert_eq!(mesh.select_at_point(1.5, 0.5), Some(CellId::new(0, 1)));
        assert!(!mesh.cell(CellId::new(0, 1)).unwrap().is_selected());
    }

    #[test]
    fn point_outside_is_noop() {
        let mut mesh = mesh(false);
        assert_eq!(mesh.select_at_point(10.0, 10.0), None);
        assert_eq!(mesh.selected_cells().count(), 0);
    }

    #[test]
    fn shared_edge_resolves_to_lowest_id() {
        let mesh = mesh(false);
        assert_eq!(mesh.cell_at(1.0, 1.0), Some(CellId::new(0, 0)));
        assert_eq!(mesh.cell_at(2.0, 1.5), Some(CellId::new(1, 1)));
    }

    #[test]
    fn bounds_selection_is_additive() {
        let mut mesh = mesh(false);
        mesh.set_selected(CellId::new(1, 2), true);

        let bounds = Rect::new(coord! { x: 0.2, y: 0.2 }, coord! { x: 0.8, y: 0.8 });
        assert_eq!(mesh.select_in_bounds(&bounds), 1);
        assert!(mesh.cell(CellId::new(0, 0)).unwrap().is_selected());
        assert!(mesh.cell(CellId::new(1, 2)).unwrap().is_selected());

        // Re-selecting already selected cells changes nothing.
        assert_eq!(mesh.select_in_bounds(&bounds), 0);
        assert_eq!(mesh.selected_cells().count(), 2);
    }

    #[test]
    fn bounds_deselection() {
        let mut mesh = mesh(false);
        let all = Rect::new(coord! { x: 0.0, y: 0.0 }, coord! { x: 3.0, y: 2.0 });
        assert_eq!(mesh.select_in_bounds(&all), 6);
        let left = Rect::new(coord! { x: 0.1, y: 0.1 }, coord! { x: 0.9, y: 1.9 });
        assert_eq!(mesh.deselect_in_bounds(&left), 2);
        assert_eq!(mesh.selected_cells().count(), 4);
    }

    #[test]
    fn clear_selection_resets_all() {
        let mut mesh = mesh(false);
        mesh.select_in_bounds(&Rect::new(coord! { x: 0.0, y: 0.0 }, coord! { x: 3.0, y: 2.0 }));
        mesh.clear_selection();
        assert!(mesh.cells().iter().all(|cell| !cell.is_selected()));
    }

    #[test]
    fn statistics_follow_selection() {
        let mut mesh = mesh(true);
        assert_eq!(mesh.statistics().unwrap().selected_cells, 0);
        mesh.select_at_point(0.5, 0.5);
        mesh.select_at_point(2.5, 1.5);
        let stats = mesh.statistics().unwrap();
        assert_eq!(stats.selected_cells, 2);
        assert_eq!(stats.selected_area, 200.0);

        assert!(self::mesh(false).statistics().is_none());
    }

    #[test]
    fn occupying_selected_cells() {
        let mut mesh = mesh(true);
        mesh.select_at_point(0.5, 0.5);
        mesh.select_at_point(1.5, 0.5);
        let plot = mesh.plot_selection();
        assert_eq!(plot.cell_ids, vec![CellId::new(0, 0), CellId::new(0, 1)]);
        assert_eq!(plot.area_m2, 200.0);
        assert_eq!(plot.area_hectares, 0.02);

        assert_eq!(mesh.mark_selected_occupied(), 2);
        assert_eq!(mesh.selected_cells().count(), 0);
        assert_eq!(mesh.statistics().unwrap().occupied_cells, 2);

        mesh.clear_occupied();
        assert_eq!(mesh.statistics().unwrap().occupied_cells, 0);
    }

    #[test]
    fn selected_geometry_merges_neighbours() {
        let mut mesh = mesh(false);
        assert!(mesh.selected_geometry().0.is_empty());
        mesh.select_at_point(0.5, 0.5);
        mesh.select_at_point(1.5, 0.5);
        let merged = mesh.selected_geometry();
        assert_eq!(merged.0.len(), 1);
        assert!((geo::Area::unsigned_area(&merged) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn unknown_id_is_rejected() {
        let mut mesh = mesh(false);
        assert!(!mesh.set_selected(CellId::new(9, 9), true));
    }
}
