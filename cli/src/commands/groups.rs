use anyhow::{Context, Result};
use lanskarta::{random_groups, Grouping};

use crate::cli::GroupsCommand;

pub fn run(cli: &crate::cli::Cli, command: &GroupsCommand) -> Result<()> {
    match command {
        GroupsCommand::Random { seed } => {
            let grouping = random_groups(*seed);
            if cli.verbose > 0 {
                eprintln!("[groups] seed {seed}, fingerprint {}", &grouping.fingerprint()[..12]);
            }
            let json = serde_json::to_string_pretty(&grouping)
                .context("[groups] Failed to serialize grouping")?;
            println!("{json}");
        }
        GroupsCommand::Check { groups } => {
            let grouping = super::load_groups(groups)?;
            let coverage = grouping.coverage();
            super::report(&coverage.diagnostics);

            let names = |regions: &[&lanskarta::BaseRegion]| {
                regions.iter().map(|region| region.name).collect::<Vec<_>>().join(", ")
            };
            println!("groups: {}", grouping.len());
            println!("unassigned: {}", names(&coverage.unassigned));
            println!("overlapping: {}", names(&coverage.overlapping));
            println!("empty: {}", coverage.empty_groups.join(", "));
            println!("complete partition: {}", coverage.is_complete_partition());
        }
    }

    Ok(())
}
