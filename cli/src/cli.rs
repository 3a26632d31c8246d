use std::path::PathBuf;

/// Field meshing CLI (argument schema only)
#[derive(clap::Parser, Debug)]
#[command(name = "fieldmesh", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Mesh a field boundary and write the cells as GeoJSON
    Mesh(MeshArgs),

    /// Mesh a field boundary and print area statistics as JSON
    Stats(StatsArgs),
}

/// Options shared by every command that builds a mesh.
#[derive(clap::Args, Debug)]
pub struct MeshFlags {
    /// Field boundary (GeoJSON Polygon, Feature or FeatureCollection)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub field: PathBuf,

    /// Mesh options file (JSON, camelCase keys)
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub options: Option<PathBuf>,

    /// Cell edge length in meters, overrides the options file
    #[arg(short, long)]
    pub cell_size: Option<f64>,

    /// Maximum number of candidate cells, overrides the options file
    #[arg(long)]
    pub max_cells: Option<u64>,

    /// Keep boundary cells as whole squares instead of clipping them
    #[arg(long)]
    pub no_crop: bool,

    /// Select cells intersecting a rectangle (repeatable)
    #[arg(long, value_name = "W,S,E,N", value_parser = parse_bounds, allow_hyphen_values = true)]
    pub select_bounds: Vec<[f64; 4]>,

    /// Toggle the cell containing a point (repeatable)
    #[arg(long, value_name = "LNG,LAT", value_parser = parse_point, allow_hyphen_values = true)]
    pub select_point: Vec<[f64; 2]>,
}

#[derive(clap::Args, Debug)]
pub struct MeshArgs {
    #[command(flatten)]
    pub mesh: MeshFlags,

    /// Output GeoJSON file, defaults to "./cells.geojson"
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct StatsArgs {
    #[command(flatten)]
    pub mesh: MeshFlags,
}

/// Parse `N` comma-separated numbers.
fn parse_numbers<const N: usize>(s: &str) -> Result<[f64; N], String> {
    let values = s.split(',')
        .map(|v| v.trim().parse::<f64>().map_err(|e| format!("invalid number {v:?}: {e}")))
        .collect::<Result<Vec<_>, _>>()?;
    values.try_into()
        .map_err(|v: Vec<f64>| format!("expected {N} comma-separated numbers, got {}", v.len()))
}

fn parse_bounds(s: &str) -> Result<[f64; 4], String> { parse_numbers::<4>(s) }

fn parse_point(s: &str) -> Result<[f64; 2], String> { parse_numbers::<2>(s) }
