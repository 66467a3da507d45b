pub mod aggregate;
pub mod compare;
pub mod groups;
pub mod merge;
pub mod resolve;
pub mod sample;

use std::{fs, path::Path};

use anyhow::{Context, Result};
use lanskarta::{
    config::Level,
    Counties, CustomGrouping, Diagnostics, Grouping, NUTS2, TRANSPORT,
};

/// Read a custom grouping from a JSON file.
pub(crate) fn load_groups(path: &Path) -> Result<CustomGrouping> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("[groups] Failed to read groups file: {}", path.display()))?;
    CustomGrouping::from_json_str(&json)
}

/// The grouping behind a level; `Level::Custom` needs caller-defined groups.
pub(crate) fn grouping_for<'a>(level: Level, groups: Option<&'a CustomGrouping>) -> Result<&'a dyn Grouping> {
    Ok(match level {
        Level::County => &Counties,
        Level::Nuts2 => &NUTS2,
        Level::Transport => &TRANSPORT,
        Level::Custom => groups.context("[groups] Level 'custom' requires --groups")?,
    })
}

/// Non-fatal warnings are always shown.
pub(crate) fn report(diagnostics: &Diagnostics) {
    for warning in diagnostics.iter() {
        eprintln!("[warn] {warning}");
    }
}

/// Write to a file, or to stdout when no path is given.
pub(crate) fn emit(output: Option<&Path>, contents: &str) -> Result<()> {
    match output {
        Some(path) => fs::write(path, contents)
            .with_context(|| format!("[output] Failed to write {}", path.display())),
        None => {
            print!("{contents}");
            Ok(())
        }
    }
}
