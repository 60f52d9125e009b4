//! # Cincuentazo CLI Library
//!
//! Terminal front end for the Cincuentazo engine: play a match against the
//! machines, simulate batches of matches, or inspect the configuration.
//!
//! ## Main Entry Point
//!
//! The primary entry point is the [`run`] function, which parses command-line arguments
//! and executes the appropriate subcommand. [`run_with_input`] does the same
//! with an explicit input stream for the interactive command.
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::io;
//! let args = vec!["cincuentazo", "play", "--machines", "2"];
//! let code = cincuentazo_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `play`: Play a match against 1-3 machine players
//! - `sim`: Play complete matches without pacing and report the results
//! - `cfg`: Display current configuration settings

use clap::Parser;
use std::io::{BufRead, Write};
pub mod cli;
pub mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod ui;
pub mod validation;

use cli::{CincuentazoCli, Commands};
use commands::{PlayOptions, handle_cfg_command, handle_play_command, handle_sim_command};
use config::CliOverrides;

pub use error::CliError;

const COMMANDS: &[&str] = &["play", "sim", "cfg"];

/// Main entry point for the CLI application.
///
/// Parses command-line arguments and dispatches to the appropriate subcommand
/// handler. The interactive `play` command reads the process's stdin.
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors, `130` for interruptions
///
/// # Example
///
/// ```
/// use std::io;
/// let args = vec!["cincuentazo", "sim", "--matches", "3", "--seed", "42"];
/// let code = cincuentazo_cli::run(args, &mut io::stdout(), &mut io::stderr());
/// assert_eq!(code, 0);
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    // Use stdin for real input (supports both TTY and piped stdin)
    let stdin = std::io::stdin();
    let mut stdin_lock = stdin.lock();
    run_with_input(args, out, err, &mut stdin_lock)
}

/// [`run`] with the human's commands read from `input`.
pub fn run_with_input<I, S>(
    args: I,
    out: &mut dyn Write,
    err: &mut dyn Write,
    input: &mut dyn BufRead,
) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match CincuentazoCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => return usage_error(e, out, err),
    };

    if cli.verbose || std::env::var_os("RUST_LOG").is_some() {
        // Fails when run is called more than once in a process.
        if let Err(e) = cincuentazo_session::logging::init_logging() {
            tracing::debug!(error = %e, "logging already initialized");
        }
    }

    let result = match cli.cmd {
        Commands::Cfg => handle_cfg_command(out, err),
        Commands::Play {
            machines,
            seed,
            strategy,
            poll_ms,
            think_ms,
            autopilot,
        } => {
            let options = PlayOptions {
                overrides: CliOverrides {
                    machines,
                    seed,
                    strategy,
                    poll_interval_ms: poll_ms,
                    think_ms: think_ms.map(|t| (t.min_ms, t.max_ms)),
                },
                autopilot,
            };
            handle_play_command(&options, out, err, input)
        }
        Commands::Sim {
            matches,
            machines,
            seed,
            strategy,
        } => {
            let overrides = CliOverrides {
                machines,
                seed,
                strategy,
                ..CliOverrides::default()
            };
            handle_sim_command(matches, &overrides, out, err)
        }
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(CliError::Interrupted(_)) => exit_code::INTERRUPTED,
        Err(e) => {
            if writeln!(err, "Error: {}", e).is_err() {
                return exit_code::ERROR;
            }
            exit_code::ERROR
        }
    }
}

fn usage_error(e: clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    use clap::error::ErrorKind;

    // Help and version should print to stdout and exit 0
    match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            if write!(out, "{}", e).is_err() {
                return exit_code::ERROR;
            }
            exit_code::SUCCESS
        }
        _ => {
            // Print clap error first
            if writeln!(err, "{}", e).is_err()
                || writeln!(err).is_err()
                || writeln!(err, "Cincuentazo CLI").is_err()
                || writeln!(err, "Usage: cincuentazo <command> [options]\n").is_err()
                || writeln!(err, "Commands:").is_err()
            {
                return exit_code::ERROR;
            }
            for c in COMMANDS {
                if writeln!(err, "  {}", c).is_err() {
                    return exit_code::ERROR;
                }
            }
            if writeln!(err, "\nFor full help, run: cincuentazo --help").is_err() {
                return exit_code::ERROR;
            }
            exit_code::ERROR
        }
    }
}
