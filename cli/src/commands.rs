pub mod mesh;
pub mod stats;

use anyhow::{Context, Result};
use fieldmesh::{field_from_geojson_str, generate_mesh, MeshOptions, MeshResult};
use geo::{Coord, Rect};

use crate::cli::MeshFlags;

/// Resolve mesh options: options file (or defaults), then command-line overrides.
fn resolve_options(flags: &MeshFlags) -> Result<MeshOptions> {
    let mut options = match &flags.options {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read options file {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("failed to parse options file {}", path.display()))?
        }
        None => MeshOptions::default(),
    };

    if let Some(cell_size) = flags.cell_size { options.cell_size_meters = cell_size; }
    if let Some(max_cells) = flags.max_cells { options.max_cells = max_cells; }
    if flags.no_crop { options.crop_to_polygon = false; }

    Ok(options)
}

/// Load the field, generate its mesh and apply the requested selections in order:
/// rectangles first, then point toggles.
pub(crate) fn build_mesh(flags: &MeshFlags) -> Result<MeshResult> {
    let options = resolve_options(flags)?;

    log::info!("loading field from {}", flags.field.display());
    let text = std::fs::read_to_string(&flags.field)
        .with_context(|| format!("failed to read field {}", flags.field.display()))?;
    let field = field_from_geojson_str(&text)
        .with_context(|| format!("invalid field boundary in {}", flags.field.display()))?;

    log::info!("meshing {:.1} m² with {} m cells", field.area_m2(), options.cell_size_meters);
    let mut mesh = generate_mesh(&field, &options).context("failed to generate mesh")?;

    for &[west, south, east, north] in &flags.select_bounds {
        let bounds = Rect::new(Coord { x: west, y: south }, Coord { x: east, y: north });
        let count = mesh.select_in_bounds(&bounds);
        log::info!("selected {count} cells in [{west}, {south}, {east}, {north}]");
    }

    for &[lng, lat] in &flags.select_point {
        match mesh.select_at_point(lng, lat) {
            Some(id) => log::info!("toggled cell {id} at ({lng}, {lat})"),
            None => log::warn!("no cell at ({lng}, {lat})"),
        }
    }

    Ok(mesh)
}
