//! Simulation command handler for batch matches.
//!
//! Plays complete matches synchronously, every seat (the human one included)
//! driven by the configured strategy, and reports how they ended. No session
//! or runtime is involved: each match is a bare [`Engine`] advanced turn by
//! turn with [`play_machine_turn`].
//!
//! # Environment Variables
//!
//! - `CINCUENTAZO_SIM_BREAK_AFTER`: Stop after N matches and report them as
//!   an interrupted run (for testing)
//!
//! # Examples
//!
//! ```no_run
//! use cincuentazo_cli::commands::sim::handle_sim_command;
//! use cincuentazo_cli::config::CliOverrides;
//! use std::io;
//!
//! let mut out = io::stdout();
//! let mut err = io::stderr();
//!
//! // 100 matches against two machines, reproducible from seed 42
//! let overrides = CliOverrides { machines: Some(2), seed: Some(42), ..Default::default() };
//! handle_sim_command(100, &overrides, &mut out, &mut err).unwrap();
//! ```

use std::collections::BTreeMap;
use std::io::Write;

use crate::config::{self, CliOverrides};
use crate::error::CliError;
use crate::ui;
use cincuentazo_ai::random::RandomLegal;
use cincuentazo_ai::{MachineStrategy, create_ai, play_machine_turn};
use cincuentazo_engine::engine::Engine;
use cincuentazo_engine::player::PlayerId;

/// Turns after which a match is abandoned as stalled.
pub const TURN_GUARD: usize = 10_000;

/// How one simulated match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    Won { winner: PlayerId, turns: usize },
    NoWinner { turns: usize },
    Stalled,
}

#[derive(Debug, Default)]
struct SimTally {
    wins: BTreeMap<PlayerId, u64>,
    no_winner: u64,
    stalled: u64,
    finished_turns: u64,
    finished: u64,
}

impl SimTally {
    fn record(&mut self, result: MatchResult) {
        match result {
            MatchResult::Won { winner, turns } => {
                *self.wins.entry(winner).or_default() += 1;
                self.finished += 1;
                self.finished_turns += turns as u64;
            }
            MatchResult::NoWinner { turns } => {
                self.no_winner += 1;
                self.finished += 1;
                self.finished_turns += turns as u64;
            }
            MatchResult::Stalled => self.stalled += 1,
        }
    }

    fn write(&self, seats: &[PlayerId], out: &mut dyn Write) -> std::io::Result<()> {
        for seat in seats {
            let wins = self.wins.get(seat).copied().unwrap_or(0);
            writeln!(out, "  {}: {} wins", seat, wins)?;
        }
        if self.no_winner > 0 {
            writeln!(out, "  No winner: {}", self.no_winner)?;
        }
        if self.finished > 0 {
            writeln!(
                out,
                "Average turns: {:.1}",
                self.finished_turns as f64 / self.finished as f64
            )?;
        }
        writeln!(out, "Stalled: {}", self.stalled)
    }
}

/// Handle the sim command: play `matches` complete matches and report the
/// results per seat.
///
/// Match `i` is dealt from `seed + i`; without a seed one base seed is drawn
/// and printed so the run can be repeated.
///
/// # Errors
///
/// `CliError::InvalidInput` for zero matches, `CliError::Config` for an
/// invalid configuration and `CliError::Interrupted` when
/// `CINCUENTAZO_SIM_BREAK_AFTER` stops the run early.
pub fn handle_sim_command(
    matches: u64,
    overrides: &CliOverrides,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if matches == 0 {
        ui::write_error(err, "matches must be >= 1")?;
        return Err(CliError::InvalidInput("matches must be >= 1".to_string()));
    }
    let resolved = match config::resolve(overrides) {
        Ok(r) => r,
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            return Err(e.into());
        }
    };
    let cfg = resolved.config;

    let base_seed = cfg.seed.unwrap_or_else(rand::random);
    let strategy = sim_strategy(&cfg.strategy, base_seed).ok_or_else(|| {
        CliError::Config(format!("unknown strategy '{}'", cfg.strategy))
    })?;
    let break_after = std::env::var("CINCUENTAZO_SIM_BREAK_AFTER")
        .ok()
        .and_then(|v| v.parse::<u64>().ok());

    writeln!(
        out,
        "Simulating {} matches: {} machines, strategy {}, seed {}",
        matches,
        cfg.machines,
        strategy.name(),
        base_seed
    )?;

    let seats: Vec<PlayerId> = (0..=cfg.machines).map(PlayerId::from_seat).collect();
    let mut tally = SimTally::default();
    let mut completed = 0u64;

    for i in 0..matches {
        let seed = base_seed.wrapping_add(i);
        let result = play_match(cfg.machines, seed, strategy.as_ref())?;
        tracing::debug!(seed, ?result, "simulated match");
        tally.record(result);
        completed += 1;

        if let Some(b) = break_after
            && completed == b
            && completed < matches
        {
            writeln!(out, "Interrupted: completed {}/{}", completed, matches)?;
            tally.write(&seats, out)?;
            return Err(CliError::Interrupted(format!(
                "completed {}/{}",
                completed, matches
            )));
        }
    }

    writeln!(out, "Simulated: {} matches", completed)?;
    tally.write(&seats, out)?;
    Ok(())
}

/// Seeds the random strategy from the run's base seed so a seeded run is
/// fully reproducible.
fn sim_strategy(name: &str, seed: u64) -> Option<Box<dyn MachineStrategy>> {
    let strategy = create_ai(name)?;
    if strategy.name() == "random" {
        return Some(Box::new(RandomLegal::with_seed(seed)));
    }
    Some(strategy)
}

/// Plays one match to the end (or to [`TURN_GUARD`] turns).
///
/// A failed turn is skipped with `advance_turn`, the same recovery the
/// session coordinators apply.
pub fn play_match(
    machines: usize,
    seed: u64,
    strategy: &dyn MachineStrategy,
) -> Result<MatchResult, CliError> {
    let mut engine = Engine::new(machines, Some(seed))?;
    engine.start_game()?;

    for turn in 1..=TURN_GUARD {
        let player = engine.current_player();
        if let Err(e) = play_machine_turn(&mut engine, player, strategy) {
            tracing::warn!(%player, error = %e, "simulated turn failed, forcing turn advance");
            if !engine.is_over() {
                engine.advance_turn()?;
            }
        }
        engine.take_events();
        if engine.is_over() {
            return Ok(match engine.winner() {
                Some(winner) => MatchResult::Won { winner, turns: turn },
                None => MatchResult::NoWinner { turns: turn },
            });
        }
    }
    Ok(MatchResult::Stalled)
}
