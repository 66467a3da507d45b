use std::fs;

use anyhow::{Context, Result};
use lanskarta::{config::Level, geometry::read_county_geojson, merge};

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::MergeArgs) -> Result<()> {
    let level = args.level.parse::<Level>()?;
    let groups = args.groups.as_deref().map(super::load_groups).transpose()?;
    let grouping = super::grouping_for(level, groups.as_ref())?;

    let bytes = fs::read(&args.input)
        .with_context(|| format!("[merge] Failed to read {}", args.input.display()))?;
    let (source, mut diagnostics) = read_county_geojson(&bytes)?;
    if cli.verbose > 0 {
        eprintln!("[merge] {} county boundaries in EPSG:{} (fingerprint {})", source.len(), source.epsg(), &source.fingerprint()[..12]);
    }

    let outcome = merge(&source, grouping);
    diagnostics.extend(outcome.diagnostics);
    super::report(&diagnostics);

    let boundaries = match args.epsg {
        Some(epsg) => {
            if cli.verbose > 0 { eprintln!("[merge] reprojecting EPSG:{} -> EPSG:{epsg}", outcome.boundaries.epsg()); }
            outcome.boundaries.reproject(epsg)?
        }
        None => outcome.boundaries,
    };
    if cli.verbose > 0 {
        eprintln!("[merge] {} {} boundaries", boundaries.len(), level.to_str());
    }

    let json = serde_json::to_string(&boundaries.to_geojson())
        .context("[merge] Failed to serialize GeoJSON")?;
    super::emit(args.output.as_deref(), &json)
}
