use crate::cards::Card;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identity of a seat. Seat order is the human first, then machines
/// in creation order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerId {
    Human,
    /// Machine seat, numbered from 1.
    Machine(u8),
}

impl PlayerId {
    /// Index into the seat order.
    pub fn seat(self) -> usize {
        match self {
            PlayerId::Human => 0,
            PlayerId::Machine(n) => n as usize,
        }
    }

    pub fn from_seat(seat: usize) -> Self {
        match seat {
            0 => PlayerId::Human,
            n => PlayerId::Machine(n as u8),
        }
    }

    pub fn is_human(self) -> bool {
        matches!(self, PlayerId::Human)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerId::Human => write!(f, "Human"),
            PlayerId::Machine(n) => write!(f, "Machine {}", n),
        }
    }
}

/// A seat and the cards it holds. Hand order is display order only.
#[derive(Debug, Clone)]
pub struct Player {
    id: PlayerId,
    hand: Vec<Card>,
}

impl Player {
    pub fn new(id: PlayerId) -> Self {
        Self {
            id,
            hand: Vec::new(),
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    pub fn give_card(&mut self, card: Card) {
        self.hand.push(card);
    }

    pub fn holds(&self, card: Card) -> bool {
        self.hand.contains(&card)
    }

    /// Removes the first instance of `card`; `false` if it was not held.
    pub fn remove_card(&mut self, card: Card) -> bool {
        match self.hand.iter().position(|&c| c == card) {
            Some(idx) => {
                self.hand.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Empties the hand, returning its cards in hand order.
    pub fn take_hand(&mut self) -> Vec<Card> {
        std::mem::take(&mut self.hand)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    #[test]
    fn seat_round_trips_through_player_id() {
        for seat in 0..4 {
            assert_eq!(PlayerId::from_seat(seat).seat(), seat);
        }
        assert!(PlayerId::from_seat(0).is_human());
        assert_eq!(PlayerId::Machine(2).to_string(), "Machine 2");
    }

    #[test]
    fn remove_card_reports_missing_cards() {
        let ace = Card::new(Rank::Ace, Suit::Spades);
        let mut p = Player::new(PlayerId::Human);
        assert!(!p.remove_card(ace));
        p.give_card(ace);
        assert!(p.holds(ace));
        assert!(p.remove_card(ace));
        assert!(p.hand().is_empty());
    }
}
