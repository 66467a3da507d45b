use anyhow::{bail, Context, Result};
use lanskarta::{
    analyze,
    config::Level,
    table::{numeric_columns, read_csv, region_column_candidates, write_csv, write_csv_string},
    AnalysisConfig,
};

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::AggregateArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => AnalysisConfig::from_json_file(path)?,
        None => AnalysisConfig::default(),
    };
    if let Some(column) = &args.region_column { config.region_column = Some(column.clone()) }
    if let Some(column) = &args.value_column { config.value_column = Some(column.clone()) }
    if let Some(level) = &args.level { config.level = level.parse::<Level>()? }
    if let Some(path) = &args.groups { config.groups = Some(super::load_groups(path)?) }
    config.validate()?;

    if cli.verbose > 0 { eprintln!("[aggregate] reading {}", args.input.display()); }
    let df = read_csv(&args.input)?;

    let region_column = match config.region_column {
        Some(column) => column,
        None => match region_column_candidates(&df).into_iter().next() {
            Some(column) => column,
            None => bail!("[aggregate] Table has no columns"),
        },
    };
    let value_column = match config.value_column {
        Some(column) => column,
        None => match numeric_columns(&df).into_iter().find(|column| *column != region_column) {
            Some(column) => column,
            None => bail!("[aggregate] No numeric value column found; pass --value-column"),
        },
    };
    if cli.verbose > 0 {
        eprintln!("[aggregate] region column '{region_column}', value column '{value_column}', level {}", config.level.to_str());
    }

    let analysis = analyze(&df, &region_column, &value_column)?;
    super::report(&analysis.diagnostics);

    let aggregate = match analysis.get(config.level) {
        Some(aggregate) => aggregate.clone(),
        None => analysis.custom(config.groups.as_ref().context("[aggregate] Level 'custom' requires groups")?),
    };

    if aggregate.is_empty() {
        eprintln!("[warn] no rows could be aggregated");
    }
    if cli.verbose > 0 {
        eprintln!("[aggregate] {} groups from {} records", aggregate.len(), analysis.records.len());
        if let Some(summary) = aggregate.summary() {
            eprintln!("[aggregate] max {} = {}, min {} = {}, mean {}",
                summary.max.0, summary.max.1, summary.min.0, summary.min.1, summary.mean);
        }
    }

    let mut frame = aggregate.to_frame()?;
    match &args.output {
        Some(path) => {
            write_csv(&mut frame, path)?;
            if cli.verbose > 0 { eprintln!("[aggregate] wrote {}", path.display()); }
            Ok(())
        }
        None => super::emit(None, &write_csv_string(&mut frame)?),
    }
}
