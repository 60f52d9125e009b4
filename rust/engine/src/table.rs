use crate::cards::Card;
use crate::errors::GameError;
use crate::rules::{contextual_value, is_legal_play};

/// Played cards plus the running sum they produced.
#[derive(Debug, Clone, Default)]
pub struct Table {
    cards: Vec<Card>,
    current_sum: i32,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a table by replaying `history` in order. Every card must have
    /// been legal on the sum it was played on.
    pub fn from_history(history: &[Card]) -> Result<Self, GameError> {
        let mut table = Self::new();
        for &card in history {
            if !is_legal_play(card, table.current_sum) {
                return Err(GameError::InvalidLayout(format!(
                    "played history is not legal: {} on sum {}",
                    card, table.current_sum
                )));
            }
            table.play(card);
        }
        Ok(table)
    }

    /// Appends `card` and applies its contextual value, flooring the sum at 0.
    /// Returns the value that was applied. Legality is the caller's concern.
    pub fn play(&mut self, card: Card) -> i32 {
        let applied = contextual_value(card, self.current_sum);
        self.cards.push(card);
        self.current_sum = (self.current_sum + applied).max(0);
        applied
    }

    /// Removes every played card except the top one and returns them, oldest
    /// first. The sum is left untouched.
    pub fn recycle(&mut self) -> Vec<Card> {
        if self.cards.len() <= 1 {
            return Vec::new();
        }
        let keep_from = self.cards.len() - 1;
        self.cards.drain(..keep_from).collect()
    }

    pub fn current_sum(&self) -> i32 {
        self.current_sum
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    pub fn top_card(&self) -> Option<Card> {
        self.cards.last().copied()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    fn card(rank: Rank) -> Card {
        Card::new(rank, Suit::Spades)
    }

    #[test]
    fn sum_is_floored_at_zero() {
        let mut table = Table::new();
        table.play(card(Rank::Three));
        let applied = table.play(card(Rank::King));
        assert_eq!(applied, -10);
        assert_eq!(table.current_sum(), 0);
    }

    #[test]
    fn recycle_keeps_only_the_top_card() {
        let mut table = Table::new();
        for rank in [Rank::Two, Rank::Three, Rank::Four] {
            table.play(card(rank));
        }
        let recycled = table.recycle();
        assert_eq!(recycled, vec![card(Rank::Two), card(Rank::Three)]);
        assert_eq!(table.card_count(), 1);
        assert_eq!(table.top_card(), Some(card(Rank::Four)));
        assert_eq!(table.current_sum(), 9);
    }

    #[test]
    fn recycle_with_one_card_returns_nothing() {
        let mut table = Table::new();
        assert!(table.recycle().is_empty());
        table.play(card(Rank::Five));
        assert!(table.recycle().is_empty());
        assert_eq!(table.card_count(), 1);
    }

    #[test]
    fn history_that_busts_is_rejected() {
        let mut history: Vec<Card> = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades]
            .into_iter()
            .map(|s| Card::new(Rank::Ten, s))
            .collect();
        history.push(Card::new(Rank::Eight, Suit::Clubs));
        history.push(Card::new(Rank::Seven, Suit::Clubs));
        assert!(matches!(
            Table::from_history(&history),
            Err(GameError::InvalidLayout(_))
        ));
    }
}
