//! The machine turn sequence shared by coordinators, autopilot and
//! simulation.

use std::fmt;

use crate::MachineStrategy;
use cincuentazo_engine::cards::Card;
use cincuentazo_engine::engine::{Engine, TurnOutcome};
use cincuentazo_engine::errors::GameError;
use cincuentazo_engine::player::PlayerId;

/// What happened during one machine turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnReport {
    pub player: PlayerId,
    /// Card played and the value it applied.
    pub played: Option<(Card, i32)>,
    pub drawn: Card,
    pub outcome: TurnOutcome,
}

impl fmt::Display for TurnReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.played {
            Some((card, value)) => write!(f, "{} played {} ({:+})", self.player, card, value)?,
            None => write!(f, "{} had no legal card", self.player)?,
        }
        match self.outcome {
            TurnOutcome::Advanced(next) => write!(f, ", drew a card; {} to act", next),
            TurnOutcome::Eliminated => write!(f, ", drew a card and was eliminated"),
        }
    }
}

/// Plays one full turn for `player`: the strategy's card (if any), one draw,
/// then [`Engine::end_turn`].
///
/// The first engine error aborts the sequence and is returned; whatever was
/// applied before it stays applied.
pub fn play_machine_turn(
    engine: &mut Engine,
    player: PlayerId,
    strategy: &dyn MachineStrategy,
) -> Result<TurnReport, GameError> {
    let played = match strategy.choose_card(engine, player) {
        Some(card) => {
            let value = engine.play_card(player, card)?;
            Some((card, value))
        }
        None => None,
    };
    let drawn = engine.draw_card(player)?;
    let outcome = engine.end_turn(player)?;
    Ok(TurnReport {
        player,
        played,
        drawn,
        outcome,
    })
}
