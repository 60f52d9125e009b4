//! Default machine strategy.

use crate::MachineStrategy;
use cincuentazo_engine::cards::Card;
use cincuentazo_engine::engine::Engine;
use cincuentazo_engine::player::PlayerId;

/// Plays the first card in hand order that keeps the sum within the ceiling.
///
/// No look-ahead and no preference between cards: this is exactly
/// [`Engine::find_legal_card`], which keeps machine play reproducible for a
/// given seed.
///
/// # Example
///
/// ```rust
/// use cincuentazo_ai::MachineStrategy;
/// use cincuentazo_ai::baseline::FirstLegal;
/// use cincuentazo_engine::engine::Engine;
/// use cincuentazo_engine::player::PlayerId;
///
/// let mut engine = Engine::new(1, Some(42)).unwrap();
/// engine.start_game().unwrap();
///
/// let pick = FirstLegal.choose_card(&engine, PlayerId::Human);
/// assert_eq!(pick, engine.find_legal_card(PlayerId::Human));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstLegal;

impl MachineStrategy for FirstLegal {
    fn choose_card(&self, engine: &Engine, player: PlayerId) -> Option<Card> {
        engine.find_legal_card(player)
    }

    fn name(&self) -> &str {
        "first-legal"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cincuentazo_engine::cards::{Rank, Suit, full_deck};
    use cincuentazo_engine::game::MatchLayout;

    fn layout_at_45(human: Vec<Card>) -> MatchLayout {
        let played = vec![
            Card::new(Rank::Ten, Suit::Clubs),
            Card::new(Rank::Ten, Suit::Diamonds),
            Card::new(Rank::Ten, Suit::Hearts),
            Card::new(Rank::Eight, Suit::Clubs),
            Card::new(Rank::Seven, Suit::Clubs),
        ];
        let machine = vec![Card::new(Rank::Two, Suit::Clubs)];
        let used: Vec<Card> = human
            .iter()
            .chain(machine.iter())
            .chain(played.iter())
            .copied()
            .collect();
        MatchLayout {
            machines: 1,
            deck: full_deck().into_iter().filter(|c| !used.contains(c)).collect(),
            hands: vec![human, machine],
            played,
            seed: 1,
        }
    }

    #[test]
    fn skips_cards_that_would_bust() {
        let hand = vec![
            Card::new(Rank::Ten, Suit::Spades),
            Card::new(Rank::Queen, Suit::Spades),
            Card::new(Rank::Three, Suit::Spades),
        ];
        let engine = Engine::from_layout(layout_at_45(hand)).unwrap();
        assert_eq!(
            FirstLegal.choose_card(&engine, PlayerId::Human),
            Some(Card::new(Rank::Queen, Suit::Spades))
        );
    }

    #[test]
    fn nothing_legal_means_no_card() {
        let hand = vec![
            Card::new(Rank::Ten, Suit::Spades),
            Card::new(Rank::Six, Suit::Spades),
        ];
        let engine = Engine::from_layout(layout_at_45(hand)).unwrap();
        assert_eq!(FirstLegal.choose_card(&engine, PlayerId::Human), None);
    }
}
