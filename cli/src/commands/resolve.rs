use anyhow::Result;
use lanskarta::{Resolution, Resolver};

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::ResolveArgs) -> Result<()> {
    let resolver = Resolver::default();
    if cli.verbose > 0 {
        eprintln!("[resolve] strategies: {}", resolver.strategy_names().join(", "));
    }

    for identifier in &args.identifiers {
        match resolver.resolve(identifier) {
            Resolution::Resolved(region) => println!("{identifier}\t{}\t{}", region.code, region.name),
            Resolution::Unresolved(_) => {
                eprintln!("[warn] '{identifier}' does not match any county");
                println!("{identifier}\t-\t-");
            }
        }
    }

    Ok(())
}
