use crate::cards::Card;
use crate::player::PlayerId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// State change emitted by the engine.
///
/// Programmatic consumers match on the variant; displays use the `Display`
/// rendering, which is also what the engine keeps as its status line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    GameStarted {
        players: usize,
    },
    InitialCard {
        card: Card,
        sum: i32,
    },
    CardPlayed {
        player: PlayerId,
        card: Card,
        value: i32,
        sum: i32,
    },
    CardDrawn {
        player: PlayerId,
        deck_remaining: usize,
    },
    DeckRecycled {
        cards: usize,
    },
    PlayerEliminated {
        player: PlayerId,
        cards_returned: usize,
        sum: i32,
    },
    TurnChanged {
        player: PlayerId,
    },
    GameOver {
        winner: Option<PlayerId>,
    },
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::GameStarted { players } => {
                write!(f, "Game started with {} players", players)
            }
            GameEvent::InitialCard { card, sum } => {
                write!(f, "Initial card: {} (sum {})", card, sum)
            }
            GameEvent::CardPlayed {
                player,
                card,
                value,
                sum,
            } => write!(
                f,
                "{} played {} ({:+}), new sum: {}",
                player, card, value, sum
            ),
            GameEvent::CardDrawn {
                player,
                deck_remaining,
            } => write!(
                f,
                "{} took a card from the deck ({} left)",
                player, deck_remaining
            ),
            GameEvent::DeckRecycled { cards } => {
                write!(f, "Deck recycled with {} cards", cards)
            }
            GameEvent::PlayerEliminated {
                player,
                cards_returned,
                sum,
            } => write!(
                f,
                "{} eliminated with {} cards, sum: {}",
                player, cards_returned, sum
            ),
            GameEvent::TurnChanged { player } => write!(f, "Turn changed to: {}", player),
            GameEvent::GameOver {
                winner: Some(winner),
            } => write!(f, "Game over - winner: {}", winner),
            GameEvent::GameOver { winner: None } => write!(f, "Game over - no active players"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    #[test]
    fn played_event_shows_signed_value() {
        let ev = GameEvent::CardPlayed {
            player: PlayerId::Machine(1),
            card: Card::new(Rank::King, Suit::Hearts),
            value: -10,
            sum: 28,
        };
        assert_eq!(ev.to_string(), "Machine 1 played K♥ (-10), new sum: 28");
    }

    #[test]
    fn events_serialize_with_type_tag() {
        let ev = GameEvent::TurnChanged {
            player: PlayerId::Human,
        };
        let json = serde_json::to_value(&ev).expect("serialize");
        assert_eq!(json["type"], "turn_changed");
        assert_eq!(json["player"], "human");
    }
}
