//! Command-line argument definitions.

use clap::{Parser, Subcommand};

use crate::validation::{ThinkRange, parse_think_range};

#[derive(Parser, Debug)]
#[command(
    name = "cincuentazo",
    version,
    about = "Cincuentazo: keep the running sum at or below 50 and outlast the machines"
)]
pub struct CincuentazoCli {
    /// Emit diagnostic logs on stderr (RUST_LOG overrides the filter)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play a match against 1-3 machine players
    Play {
        /// Number of machine opponents (1-3)
        #[arg(long)]
        machines: Option<usize>,
        /// Deck seed for a reproducible deal
        #[arg(long)]
        seed: Option<u64>,
        /// Machine strategy (first-legal, random)
        #[arg(long)]
        strategy: Option<String>,
        /// How often machine players check for their turn, in milliseconds
        #[arg(long = "poll-ms")]
        poll_ms: Option<u64>,
        /// Machine thinking pause in milliseconds: MIN or MIN-MAX
        #[arg(long = "think-ms", value_parser = parse_think_range)]
        think_ms: Option<ThinkRange>,
        /// Let the configured strategy play the human seat as well
        #[arg(long)]
        autopilot: bool,
    },
    /// Play complete matches without pacing and report the results
    Sim {
        /// Number of matches to play
        #[arg(long)]
        matches: u64,
        /// Number of machine seats besides the autopiloted human seat (1-3)
        #[arg(long)]
        machines: Option<usize>,
        /// Base seed; match i uses seed + i
        #[arg(long)]
        seed: Option<u64>,
        /// Strategy driving every seat
        #[arg(long)]
        strategy: Option<String>,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
}
