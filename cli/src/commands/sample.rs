use anyhow::{bail, Result};
use lanskarta::table::{sample_codes, sample_names, write_csv, write_csv_string};

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::SampleArgs) -> Result<()> {
    let mut df = match args.table.as_str() {
        "codes" => sample_codes()?,
        "names" => sample_names()?,
        other => bail!("[sample] Unknown sample table '{other}', expected 'codes' or 'names'"),
    };
    if cli.verbose > 0 { eprintln!("[sample] {} table, {} rows", args.table, df.height()); }

    match &args.output {
        Some(path) => write_csv(&mut df, path),
        None => super::emit(None, &write_csv_string(&mut df)?),
    }
}
