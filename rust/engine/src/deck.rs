use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};
use crate::errors::GameError;

/// Pool of undealt cards. The top of the pool is the end of the vector.
#[derive(Debug)]
pub struct Deck {
    cards: Vec<Card>,
    rng: ChaCha20Rng,
}

impl Deck {
    /// Full 52-card deck, shuffled with a ChaCha20 stream seeded from `seed`.
    pub fn new_with_seed(seed: u64) -> Self {
        let mut deck = Self::from_cards(full_deck(), seed);
        deck.shuffle();
        deck
    }

    /// Deck holding exactly `cards` in the given order (last card drawn first).
    /// The seed only drives later reshuffles.
    pub fn from_cards(cards: Vec<Card>, seed: u64) -> Self {
        Self {
            cards,
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    pub fn shuffle(&mut self) {
        self.cards.shuffle(&mut self.rng);
    }

    pub fn draw(&mut self) -> Result<Card, GameError> {
        self.cards.pop().ok_or(GameError::EmptyDeck)
    }

    /// Adds `cards` to the pool and reshuffles the whole pool.
    pub fn recycle(&mut self, cards: Vec<Card>) {
        self.cards.extend(cards);
        self.shuffle();
    }

    /// Puts `cards` underneath the pool without shuffling. They come back into
    /// play only after everything above them has been drawn, or after the
    /// next recycle.
    pub fn return_cards(&mut self, cards: Vec<Card>) {
        self.cards.splice(0..0, cards);
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}
