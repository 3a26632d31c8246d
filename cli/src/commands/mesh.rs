use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::commands::build_mesh;

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::MeshArgs) -> Result<()> {
    let out_path: PathBuf = args.output.clone().unwrap_or("./cells.geojson".into());

    let mesh = build_mesh(&args.mesh)?;

    log::info!("writing {} cells to {}", mesh.total_cells(), out_path.display());
    let bytes = serde_json::to_vec(&mesh.to_geojson()).context("failed to serialize cells")?;
    std::fs::write(&out_path, bytes)
        .with_context(|| format!("failed to write {}", out_path.display()))?;

    Ok(())
}
