#![allow(dead_code)]

use cincuentazo_engine::cards::{full_deck, Card, Rank, Suit};
use cincuentazo_engine::game::MatchLayout;

pub fn c(rank: Rank, suit: Suit) -> Card {
    Card::new(rank, suit)
}

/// Four tens and an eight: a table sitting at 38.
pub fn history_38() -> Vec<Card> {
    vec![
        c(Rank::Ten, Suit::Clubs),
        c(Rank::Ten, Suit::Diamonds),
        c(Rank::Ten, Suit::Hearts),
        c(Rank::Eight, Suit::Clubs),
    ]
}

/// `history_38` plus a seven: a table sitting at 45.
pub fn history_45() -> Vec<Card> {
    let mut h = history_38();
    h.push(c(Rank::Seven, Suit::Clubs));
    h
}

/// Layout with the given hands and table history; every other card goes to
/// the deck in `full_deck` order.
pub fn layout(machines: usize, hands: Vec<Vec<Card>>, played: Vec<Card>) -> MatchLayout {
    let used: Vec<Card> = hands.iter().flatten().chain(played.iter()).copied().collect();
    let deck = full_deck()
        .into_iter()
        .filter(|card| !used.contains(card))
        .collect();
    MatchLayout {
        machines,
        deck,
        hands,
        played,
        seed: 7,
    }
}

/// Layout with an empty deck: every card not on the table is split across
/// the hands, human first.
pub fn layout_without_deck(machines: usize, played: Vec<Card>) -> MatchLayout {
    let rest: Vec<Card> = full_deck()
        .into_iter()
        .filter(|card| !played.contains(card))
        .collect();
    let seats = machines + 1;
    let mut hands = vec![Vec::new(); seats];
    for (i, card) in rest.into_iter().enumerate() {
        hands[i % seats].push(card);
    }
    MatchLayout {
        machines,
        deck: Vec::new(),
        hands,
        played,
        seed: 7,
    }
}
