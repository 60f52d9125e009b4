//! # Play Command
//!
//! Interactive Cincuentazo match: the human seat against 1-3 machine seats.
//!
//! Machine seats are driven by session coordinators running on a tokio
//! runtime owned by this command; the human seat is driven from `stdin` on
//! the calling thread. Both go through the same serialized session
//! operations, so the display loop only has to watch notifications and wait
//! for the human's turn.
//!
//! ## Features
//!
//! - Notifications printed as they arrive
//! - Numbered hand with `p <n>` / `<n>` to play, `d` to draw, `h`, `q`
//! - Illegal moves are explained and do not consume the turn
//! - EOF on input counts as quitting
//! - `--autopilot` lets the configured strategy play the human seat too
//! - Winner and match clock at the end

use std::io::{BufRead, Write};
use std::time::Duration;

use crate::config::{self, CliOverrides};
use crate::error::CliError;
use crate::formatters::{format_card, format_hand, format_players, format_table};
use crate::io_utils::read_stdin_line;
use crate::ui;
use crate::validation::{ParseResult, parse_human_move};
use cincuentazo_engine::cards::Card;
use cincuentazo_engine::engine::{Engine, TurnOutcome};
use cincuentazo_engine::game::{GamePhase, GameSnapshot};
use cincuentazo_engine::player::PlayerId;
use cincuentazo_session::{EventSubscription, GameSession, SessionError};

// Upper bound on how long the display waits between checks while machines
// are playing.
const DISPLAY_REFRESH: Duration = Duration::from_millis(100);

/// Options of the play command beyond the configuration layers.
#[derive(Debug, Clone, Default)]
pub struct PlayOptions {
    pub overrides: CliOverrides,
    pub autopilot: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopEnd {
    Finished,
    Quit,
}

/// Handle the play command.
///
/// # Arguments
///
/// * `options` - Flag overrides and autopilot switch
/// * `out` - Output stream for game display
/// * `err` - Error stream for warnings and rejected moves
/// * `stdin` - Input stream for the human's commands
///
/// # Returns
///
/// * `Ok(())` when the match finished or the human quit
/// * `Err(CliError)` for configuration, runtime or session failures
pub fn handle_play_command(
    options: &PlayOptions,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    let resolved = match config::resolve(&options.overrides) {
        Ok(r) => r,
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            return Err(e.into());
        }
    };
    let session_config = resolved.config.to_session_config();
    let refresh = session_config.poll_interval.min(DISPLAY_REFRESH);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_time()
        .build()?;
    let _guard = runtime.enter();

    let mut session = GameSession::new(session_config)?;
    let mut events = session.subscribe();
    session.start()?;

    writeln!(
        out,
        "Cincuentazo: you against {} machine(s) [{}], seed {}",
        session.config().machines,
        session.strategy_name(),
        session.state().read(Engine::seed)?
    )?;
    if options.autopilot {
        writeln!(out, "Autopilot is playing your seat.")?;
    } else {
        writeln!(out, "Commands: p <n> or <n> play card n, d draw, h hand, q quit")?;
    }

    let ended = play_loop(&session, &mut events, options.autopilot, refresh, out, err, stdin);
    let turns = runtime.block_on(session.shutdown());
    tracing::debug!(session_id = session.id(), ?turns, "machine turns taken");
    print_notifications(&mut events, out)?;

    match ended? {
        LoopEnd::Finished => match session.winner()? {
            Some(PlayerId::Human) => writeln!(out, "You win!")?,
            Some(winner) => writeln!(out, "Winner: {}", winner)?,
            None => writeln!(out, "No winner: every player was eliminated")?,
        },
        LoopEnd::Quit => writeln!(out, "You left the match.")?,
    }
    let clock = session.clock()?;
    writeln!(
        out,
        "Started {} | {}",
        clock
            .started_at()
            .with_timezone(&chrono::Local)
            .format("%H:%M:%S"),
        clock.display()
    )?;
    Ok(())
}

fn play_loop(
    session: &GameSession,
    events: &mut EventSubscription,
    autopilot: bool,
    refresh: Duration,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<LoopEnd, CliError> {
    let mut prompted = false;
    let mut announced_out = false;

    loop {
        print_notifications(events, out)?;
        let snapshot = session.snapshot()?;
        if snapshot.phase == GamePhase::Over {
            return Ok(LoopEnd::Finished);
        }
        if !snapshot.is_human_turn() {
            prompted = false;
            if !announced_out && snapshot.is_eliminated(PlayerId::Human) {
                writeln!(out, "You are out; the machines play on.")?;
                announced_out = true;
            }
            std::thread::sleep(refresh);
            continue;
        }

        if autopilot {
            if let Err(e) = session.autopilot_turn() {
                ui::display_warning(err, &format!("autopilot turn failed: {}", e))?;
                recover(session)?;
            }
            continue;
        }

        if !prompted {
            show_turn(&snapshot, out)?;
            prompted = true;
        }
        write!(out, "> ")?;
        out.flush()?;
        let Some(line) = read_stdin_line(stdin) else {
            return Ok(LoopEnd::Quit);
        };

        match parse_human_move(&line, snapshot.human_hand.len()) {
            ParseResult::Play(n) => {
                let card = snapshot.human_hand[n - 1];
                if let Err(e) = session.play_card(card) {
                    reject(err, e)?;
                    continue;
                }
                finish_turn(session, err)?;
            }
            ParseResult::Draw => finish_turn(session, err)?,
            ParseResult::Hand => show_turn(&snapshot, out)?,
            ParseResult::Quit => return Ok(LoopEnd::Quit),
            ParseResult::Invalid(msg) => ui::write_error(err, &msg)?,
        }
    }
}

fn show_turn(snapshot: &GameSnapshot, out: &mut dyn Write) -> std::io::Result<()> {
    writeln!(out, "{}", format_players(snapshot))?;
    writeln!(out, "{}", format_table(snapshot))?;
    writeln!(out, "Your hand: {}", format_hand(&snapshot.human_hand))
}

/// Draw, then hand the turn over or get eliminated.
fn finish_turn(session: &GameSession, err: &mut dyn Write) -> Result<(), CliError> {
    let result = session.draw_card().and_then(|card: Card| {
        tracing::debug!(card = %format_card(&card), "human drew");
        session.end_turn()
    });
    match result {
        Ok(TurnOutcome::Advanced(_)) | Ok(TurnOutcome::Eliminated) => Ok(()),
        Err(e) => {
            reject(err, e)?;
            recover(session)
        }
    }
}

/// Engine refusals are shown to the player; anything else ends the command.
fn reject(err: &mut dyn Write, error: SessionError) -> Result<(), CliError> {
    match error {
        SessionError::Game(game_error) => {
            ui::write_error(err, &game_error.to_string())?;
            Ok(())
        }
        other => Err(other.into()),
    }
}

/// Skips a turn that could not be completed so the match keeps moving.
fn recover(session: &GameSession) -> Result<(), CliError> {
    match session.advance_turn() {
        Ok(()) => Ok(()),
        Err(SessionError::Game(e)) => {
            tracing::warn!(error = %e, "could not force turn advance");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn print_notifications(
    events: &mut EventSubscription,
    out: &mut dyn Write,
) -> std::io::Result<()> {
    for notification in events.drain() {
        writeln!(out, "{}", notification.message)?;
    }
    Ok(())
}
