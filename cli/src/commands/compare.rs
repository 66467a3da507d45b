use std::fs;

use anyhow::{Context, Result};
use lanskarta::{
    geometry::{compare_boundaries, read_county_geojson, read_nuts_geojson},
    merge, NUTS2,
};

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::CompareArgs) -> Result<()> {
    let read = |path: &std::path::Path| fs::read(path)
        .with_context(|| format!("[compare] Failed to read {}", path.display()));

    let (counties, mut diagnostics) = read_county_geojson(&read(&args.counties)?)?;
    let (authoritative, nuts_diagnostics) = read_nuts_geojson(&read(&args.nuts)?)?;
    diagnostics.extend(nuts_diagnostics);

    let outcome = merge(&counties, &NUTS2);
    diagnostics.extend(outcome.diagnostics);
    super::report(&diagnostics);

    if cli.verbose > 0 {
        eprintln!("[compare] {} NUTS-2 regions from GISCO, {} merged from counties; comparing in EPSG:{}",
            authoritative.len(), outcome.boundaries.len(), args.epsg);
    }
    let authoritative = authoritative.reproject(args.epsg)?;
    let synthesized = outcome.boundaries.reproject(args.epsg)?;

    let comparison = compare_boundaries(&authoritative, &synthesized)?;
    for matched in &comparison.matches {
        println!("{}\t{:.4}", matched.label, matched.iou);
    }
    for label in &comparison.only_left {
        eprintln!("[warn] '{label}' only in the NUTS feed");
    }
    for label in &comparison.only_right {
        eprintln!("[warn] '{label}' only in the merged counties");
    }
    if cli.verbose > 0 {
        if let Some(worst) = comparison.worst() {
            eprintln!("[compare] lowest overlap: {} ({:.4})", worst.label, worst.iou);
        }
    }

    Ok(())
}
