use std::collections::HashSet;

use cincuentazo_engine::engine::Engine;
use cincuentazo_engine::errors::GameError;
use cincuentazo_engine::game::GamePhase;
use cincuentazo_engine::player::PlayerId;

#[test]
fn two_player_deal_leaves_43_cards_in_deck() {
    let mut eng = Engine::new(1, Some(3)).expect("1 machine is valid");
    assert_eq!(eng.phase(), GamePhase::Initialized);
    eng.start_game().expect("start");

    assert_eq!(eng.phase(), GamePhase::InProgress);
    assert_eq!(eng.hand(PlayerId::Human).unwrap().len(), 4);
    assert_eq!(eng.hand(PlayerId::Machine(1)).unwrap().len(), 4);
    assert_eq!(eng.deck_remaining(), 43);
    assert_eq!(eng.table().card_count(), 1);
    assert_eq!(eng.total_cards(), 52);
    assert_eq!(eng.current_player(), PlayerId::Human);
}

#[test]
fn four_player_deal_uses_seventeen_cards() {
    let mut eng = Engine::new(3, Some(21)).unwrap();
    eng.start_game().unwrap();
    let players: Vec<PlayerId> = eng.players().collect();
    assert_eq!(
        players,
        vec![
            PlayerId::Human,
            PlayerId::Machine(1),
            PlayerId::Machine(2),
            PlayerId::Machine(3)
        ]
    );
    for p in players {
        assert_eq!(eng.hand(p).unwrap().len(), 4, "{} hand size", p);
    }
    assert_eq!(eng.deck_remaining(), 52 - 16 - 1);
}

#[test]
fn dealt_cards_are_unique() {
    let mut eng = Engine::new(3, Some(99)).unwrap();
    eng.start_game().unwrap();
    let mut seen = HashSet::new();
    for p in eng.players().collect::<Vec<_>>() {
        for card in eng.hand(p).unwrap() {
            assert!(seen.insert(*card), "{} dealt twice", card);
        }
    }
    for card in eng.table().cards() {
        assert!(seen.insert(*card), "{} dealt twice", card);
    }
}

#[test]
fn opening_card_sets_the_sum() {
    let mut eng = Engine::new(1, Some(5)).unwrap();
    eng.start_game().unwrap();
    let top = eng.table().top_card().expect("opening card");
    let expected = cincuentazo_engine::rules::contextual_value(top, 0).max(0);
    assert_eq!(eng.current_sum(), expected);
}

#[test]
fn same_seed_deals_the_same_match() {
    let mut a = Engine::new(2, Some(12345)).unwrap();
    let mut b = Engine::new(2, Some(12345)).unwrap();
    a.start_game().unwrap();
    b.start_game().unwrap();
    assert_eq!(a.seed(), 12345);
    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn different_seeds_deal_differently() {
    let mut a = Engine::new(2, Some(1)).unwrap();
    let mut b = Engine::new(2, Some(2)).unwrap();
    a.start_game().unwrap();
    b.start_game().unwrap();
    assert_ne!(
        a.hand(PlayerId::Human).unwrap(),
        b.hand(PlayerId::Human).unwrap(),
        "different seeds should deal different hands (high probability)"
    );
}

#[test]
fn construction_rejects_bad_machine_counts() {
    for machines in [0, 4, 10] {
        assert_eq!(
            Engine::new(machines, None).unwrap_err(),
            GameError::InvalidConstruction { machines }
        );
    }
}

#[test]
fn snapshot_reflects_fresh_match() {
    let mut eng = Engine::new(2, Some(8)).unwrap();
    eng.start_game().unwrap();
    let snap = eng.snapshot();
    assert!(snap.is_human_turn());
    assert_eq!(snap.active_players(), 3);
    assert_eq!(snap.human_hand.len(), 4);
    assert_eq!(snap.deck_remaining, 52 - 12 - 1);
    assert_eq!(snap.total_cards, 52);
    assert_eq!(snap.winner, None);
    assert_eq!(snap.top_card, eng.table().top_card());
}
