use crate::cards::Card;
use crate::player::PlayerId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of a match: `Initialized → InProgress → Over`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    Initialized,
    InProgress,
    Over,
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GamePhase::Initialized => "initialized",
            GamePhase::InProgress => "in progress",
            GamePhase::Over => "over",
        };
        f.write_str(s)
    }
}

/// Explicit card arrangement used to build a match that is already under way.
///
/// `deck` is listed bottom to top (the last card is drawn first), `hands` has
/// one entry per seat starting with the human, and `played` is the table
/// history oldest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchLayout {
    pub machines: usize,
    pub deck: Vec<Card>,
    pub hands: Vec<Vec<Card>>,
    pub played: Vec<Card>,
    pub seed: u64,
}

/// What a seat looks like from the outside.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub cards: usize,
    pub eliminated: bool,
}

/// Consistent read-only picture of a match for presentation layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub phase: GamePhase,
    pub current_player: PlayerId,
    pub current_sum: i32,
    pub top_card: Option<Card>,
    pub table_cards: usize,
    pub deck_remaining: usize,
    pub players: Vec<PlayerView>,
    pub human_hand: Vec<Card>,
    pub winner: Option<PlayerId>,
    pub status: String,
    pub total_cards: usize,
}

impl GameSnapshot {
    pub fn is_human_turn(&self) -> bool {
        self.phase == GamePhase::InProgress
            && self.current_player.is_human()
            && !self.is_eliminated(PlayerId::Human)
    }

    pub fn is_eliminated(&self, player: PlayerId) -> bool {
        self.players
            .iter()
            .any(|p| p.id == player && p.eliminated)
    }

    pub fn active_players(&self) -> usize {
        self.players.iter().filter(|p| !p.eliminated).count()
    }
}
