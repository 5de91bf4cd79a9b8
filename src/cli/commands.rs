use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "itin", about = concat!("itinerary v", env!("CARGO_PKG_VERSION"), " - plan items into day and activity views"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Path to an itin.toml config file
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Group items by activity type
    ByType(ByTypeArgs),
    /// Group items day by day with time-of-day slots
    ByDate(ByDateArgs),
    /// Validate an item list
    Check(CheckArgs),
}

// ---------------------------------------------------------------------------
// Command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ByTypeArgs {
    /// Items file (JSON array; `-` for stdin)
    pub file: String,
    /// Drop unreachable children instead of listing them as orphans
    #[arg(long)]
    pub no_orphans: bool,
}

#[derive(Args)]
pub struct ByDateArgs {
    /// Items file (JSON array; `-` for stdin)
    pub file: String,
}

#[derive(Args)]
pub struct CheckArgs {
    /// Items file (JSON array; `-` for stdin)
    pub file: String,
}
