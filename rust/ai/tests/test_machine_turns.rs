use cincuentazo_ai::baseline::FirstLegal;
use cincuentazo_ai::random::RandomLegal;
use cincuentazo_ai::{MachineStrategy, play_machine_turn};
use cincuentazo_engine::engine::{Engine, TurnOutcome};
use cincuentazo_engine::game::GamePhase;
use cincuentazo_engine::rules::MAX_SUM;

const TURN_GUARD: usize = 20_000;

fn run_match(machines: usize, seed: u64, strategy: &dyn MachineStrategy) -> (Engine, usize) {
    let mut engine = Engine::new(machines, Some(seed)).unwrap();
    engine.start_game().unwrap();
    let mut turns = 0;
    while !engine.is_over() && turns < TURN_GUARD {
        let me = engine.current_player();
        let report = play_machine_turn(&mut engine, me, strategy).expect("seat on turn");
        turns += 1;

        assert!((0..=MAX_SUM).contains(&engine.current_sum()));
        assert_eq!(engine.total_cards(), 52);
        if report.outcome == TurnOutcome::Eliminated {
            assert!(engine.is_eliminated(me));
            assert!(engine.hand(me).unwrap().is_empty());
        }
    }
    (engine, turns)
}

#[test]
fn first_legal_matches_keep_invariants() {
    for machines in 1..=3 {
        for seed in 0..25 {
            let (engine, turns) = run_match(machines, seed, &FirstLegal);
            assert!(turns > 0);
            assert_eq!(engine.phase(), GamePhase::Over, "seed {} stalled", seed);
            assert!(engine.winner().is_some());
            assert_eq!(engine.active_players().len(), 1);
        }
    }
}

#[test]
fn random_matches_keep_invariants() {
    let strategy = RandomLegal::with_seed(9);
    for seed in 0..25 {
        run_match(3, seed, &strategy);
    }
}

#[test]
fn first_legal_is_reproducible() {
    let (a, turns_a) = run_match(2, 2024, &FirstLegal);
    let (b, turns_b) = run_match(2, 2024, &FirstLegal);
    assert_eq!(turns_a, turns_b);
    assert_eq!(a.snapshot(), b.snapshot());
}
