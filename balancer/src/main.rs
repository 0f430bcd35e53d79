//! Main entry point for the balancer binary
//!
//! Parses command line arguments, wires the real services into the session
//! runner, and surfaces failures as one-line user-legible errors.

use std::path::PathBuf;

use clap::Parser;

use balancer::runner::{RunConfig, SessionRunner};
use balancer::services::{FileRosterSource, JsonStateStore, Reporter};
use balancer::BalancerResult;
use shared::logging;

/// Generate balanced groups with minimal overlap across sessions
#[derive(Parser)]
#[command(name = "balancer")]
#[command(about = "Partitions a roster into fixed-size groups while minimizing repeated pairings")]
pub struct Args {
    /// Text file with participant names (one per line)
    pub participants_file: PathBuf,

    /// Number of sessions to generate
    #[arg(short, long, default_value_t = 1)]
    pub sessions: u32,

    /// Size of each group
    #[arg(short, long, default_value_t = 4)]
    pub group_size: usize,

    /// Number of groups per session (default: as many full groups as the roster allows)
    #[arg(short = 'n', long)]
    pub num_groups: Option<usize>,

    /// Save session history to a JSON state file
    #[arg(long, value_name = "FILE")]
    pub save_state: Option<PathBuf>,

    /// Load previous session history from a JSON state file
    #[arg(long, value_name = "FILE")]
    pub load_state: Option<PathBuf>,

    /// Show overlap statistics after generation
    #[arg(long)]
    pub show_stats: bool,

    /// Show the pairwise overlap matrix after generation
    #[arg(long)]
    pub show_matrix: bool,

    /// Only show statistics, don't generate new sessions
    #[arg(long)]
    pub stats_only: bool,

    /// Random seed for reproducible results
    #[arg(long)]
    pub seed: Option<u64>,

    /// Only output the groups, no headers or stats
    #[arg(short, long)]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

fn main() {
    let args = Args::parse();
    logging::init_tracing(Some(&args.log_level));
    logging::log_startup("balancer");

    if let Err(error) = run(args) {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> BalancerResult<()> {
    let config = RunConfig {
        participants_file: args.participants_file,
        sessions: args.sessions,
        group_size: args.group_size,
        num_groups: args.num_groups,
        save_state: args.save_state,
        load_state: args.load_state,
        show_stats: args.show_stats,
        show_matrix: args.show_matrix,
        stats_only: args.stats_only,
        seed: args.seed,
        quiet: args.quiet,
    };

    let reporter = Reporter::new(config.quiet);
    let runner = SessionRunner::new(JsonStateStore::new(), FileRosterSource::new(), reporter);
    runner.run(&config)?;

    Ok(())
}
