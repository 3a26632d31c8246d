use anyhow::{Context, Result};
use serde_json::json;

use crate::commands::build_mesh;

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::StatsArgs) -> Result<()> {
    let mesh = build_mesh(&args.mesh)?;
    let stats = mesh.statistics().copied().unwrap_or_else(|| mesh.summarize());

    let report = json!({
        "grid": { "rows": mesh.grid().rows(), "cols": mesh.grid().cols() },
        "statistics": stats,
        "selection": mesh.plot_selection(),
        "discarded": mesh.discarded(),
    });

    println!("{}", serde_json::to_string_pretty(&report).context("failed to serialize statistics")?);

    Ok(())
}
