use crate::cards::Card;
use crate::game::GamePhase;
use crate::player::PlayerId;
use std::fmt;
use thiserror::Error;

/// Why a proposed card was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IllegalMoveReason {
    /// Playing the card would push the running sum above the ceiling.
    ExceedsLimit { current_sum: i32, value: i32 },
    /// The acting player does not hold the card.
    NotInHand,
}

impl fmt::Display for IllegalMoveReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IllegalMoveReason::ExceedsLimit { current_sum, value } => write!(
                f,
                "current sum {} + card value {} = {} exceeds {}",
                current_sum,
                value,
                current_sum + value,
                crate::rules::MAX_SUM
            ),
            IllegalMoveReason::NotInHand => write!(f, "card is not in the player's hand"),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("It's not {actual}'s turn (current player: {expected})")]
    NotPlayersTurn { expected: PlayerId, actual: PlayerId },
    #[error("{0} has been eliminated")]
    PlayerEliminated(PlayerId),
    #[error("Illegal move with {card}: {reason}")]
    IllegalMove {
        card: Card,
        reason: IllegalMoveReason,
    },
    #[error("Deck is empty and there are no table cards to recycle")]
    EmptyDeck,
    #[error("Invalid number of machine players: {machines} (expected 1-3)")]
    InvalidConstruction { machines: usize },
    #[error("Unknown player: {0}")]
    UnknownPlayer(PlayerId),
    #[error("Operation not allowed while the game is {phase}")]
    WrongPhase { phase: GamePhase },
    #[error("Invalid layout: {0}")]
    InvalidLayout(String),
}
