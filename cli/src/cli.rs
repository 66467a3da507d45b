use std::path::PathBuf;

/// Swedish county statistics at county, NUTS-2, transport and custom level
#[derive(clap::Parser, Debug)]
#[command(name = "lanskarta", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Match region identifiers (codes or names) to counties
    Resolve(ResolveArgs),

    /// Aggregate a CSV table to one level and write the result as CSV
    Aggregate(AggregateArgs),

    /// Merge a county GeoJSON feed into region boundaries
    Merge(MergeArgs),

    /// Compare merged county boundaries with a GISCO NUTS-2 feed
    Compare(CompareArgs),

    /// Build or check custom groupings
    #[command(subcommand)]
    Groups(GroupsCommand),

    /// Write one of the bundled sample tables as CSV
    Sample(SampleArgs),
}

#[derive(clap::Args, Debug)]
pub struct ResolveArgs {
    /// County codes ("01", "1") or names ("Skåne", "skåne län")
    #[arg(required = true)]
    pub identifiers: Vec<String>,
}

#[derive(clap::Args, Debug)]
pub struct AggregateArgs {
    /// Input CSV table
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub input: PathBuf,

    /// Analysis config (JSON); flags below take precedence
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Column holding county codes or names, detected if omitted
    #[arg(long)]
    pub region_column: Option<String>,

    /// Numeric column to average, first numeric column if omitted
    #[arg(long)]
    pub value_column: Option<String>,

    /// county, nuts2, transport or custom
    #[arg(short, long)]
    pub level: Option<String>,

    /// Custom grouping (JSON object of label -> county names)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub groups: Option<PathBuf>,

    /// Output CSV file, defaults to stdout
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct MergeArgs {
    /// County GeoJSON feed (one feature per county, `name` property)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub input: PathBuf,

    /// nuts2, transport or custom
    #[arg(short, long, default_value = "transport")]
    pub level: String,

    /// Custom grouping (JSON object of label -> county names)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub groups: Option<PathBuf>,

    /// Reproject the result to this EPSG code
    #[arg(long)]
    pub epsg: Option<u32>,

    /// Output GeoJSON file, defaults to stdout
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct CompareArgs {
    /// County GeoJSON feed
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub counties: PathBuf,

    /// GISCO NUTS-2 GeoJSON feed
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub nuts: PathBuf,

    /// Common reference system for the comparison
    #[arg(long, default_value_t = lanskarta::config::NUTS2_EPSG)]
    pub epsg: u32,
}

#[derive(clap::Subcommand, Debug)]
pub enum GroupsCommand {
    /// Four random groups covering all counties
    Random {
        #[arg(short, long, default_value_t = 0)]
        seed: u64,
    },

    /// Report unassigned, overlapping and unknown counties of a grouping
    Check {
        #[arg(value_hint = clap::ValueHint::FilePath)]
        groups: PathBuf,
    },
}

#[derive(clap::Args, Debug)]
pub struct SampleArgs {
    /// "codes" (lan_kod, befolkning, bnp_per_capita) or "names" (lan_namn, arbetslöshet)
    #[arg(default_value = "codes")]
    pub table: String,

    /// Output CSV file, defaults to stdout
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}
