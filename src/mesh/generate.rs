use crate::error::Result;
use crate::geom::FieldPolygon;
use crate::mesh::{CellShape, Clipper, ClipResult, DegenerateClip, GridSpec, MeshCell, MeshResult, OverlayClipper};
use crate::options::MeshOptions;

/// Generate a mesh over `field` with the default [`OverlayClipper`].
pub fn generate_mesh(field: &FieldPolygon, options: &MeshOptions) -> Result<MeshResult> {
    generate_mesh_with(field, options, &OverlayClipper)
}

/// Generate a mesh over `field`, clipping each candidate cell with `clipper`.
///
/// Options are validated and the candidate count is bounded before any cell
/// is allocated or clipped. Clipped pieces smaller than
/// `min_retain_fraction` of a full cell are dropped and reported through
/// [`MeshResult::discarded`]. With `crop_to_polygon` off, every cell that
/// survives that test is kept as its full rectangle.
pub fn generate_mesh_with<C: Clipper + ?Sized>(field: &FieldPolygon, options: &MeshOptions, clipper: &C) -> Result<MeshResult> {
    options.validate()?;
    let grid = GridSpec::new(field, options.cell_size_meters, options.max_cells)?;

    log::debug!(
        "grid {} x {} ({} candidates), cell {:.8}° x {:.8}°",
        grid.rows(), grid.cols(), grid.len(), grid.cell_size_deg().0, grid.cell_size_deg().1
    );

    let scale = field.scale();
    let full_area = grid.cell_area_deg();
    let min_area = full_area * options.min_retain_fraction;

    let mut cells = Vec::new();
    let mut discarded = Vec::new();

    for (id, rect) in grid.cells() {
        let (shape, area) = match clipper.clip(&rect, field) {
            ClipResult::Empty => continue,
            ClipResult::Full => (CellShape::Full, full_area),
            ClipResult::Partial { area, .. } if area < min_area => {
                log::debug!("discarding cell {id}: clipped area {:.4} m² below threshold", scale.area_m2(area));
                discarded.push(DegenerateClip { id, area_m2: scale.area_m2(area) });
                continue;
            }
            ClipResult::Partial { .. } if !options.crop_to_polygon => (CellShape::Full, full_area),
            ClipResult::Partial { geometry, area } => (CellShape::Clipped(geometry), area.min(full_area)),
        };
        cells.push(MeshCell::new(id, rect, shape, scale.area_m2(area)));
    }

    if !discarded.is_empty() {
        log::warn!(
            "discarded {} degenerate cells below {:.1}% of the cell area",
            discarded.len(), options.min_retain_fraction * 100.0
        );
    }

    let mesh = MeshResult::new(field.clone(), grid, cells, discarded, options.generate_statistics);

    log::info!(
        "meshed field of {:.1} m² into {} cells of {} m",
        field.area_m2(), mesh.total_cells(), options.cell_size_meters
    );

    Ok(mesh)
}
