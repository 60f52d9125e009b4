//! Random machine strategy.

use std::sync::Mutex;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

use crate::MachineStrategy;
use cincuentazo_engine::cards::Card;
use cincuentazo_engine::engine::Engine;
use cincuentazo_engine::player::PlayerId;
use cincuentazo_engine::rules::is_legal_play;

/// Picks uniformly among the legal cards in hand.
///
/// The generator sits behind a mutex so one instance can be shared by
/// several coordinator tasks.
#[derive(Debug)]
pub struct RandomLegal {
    rng: Mutex<StdRng>,
}

impl RandomLegal {
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// Reproducible picks for a given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomLegal {
    fn default() -> Self {
        Self::new()
    }
}

impl MachineStrategy for RandomLegal {
    fn choose_card(&self, engine: &Engine, player: PlayerId) -> Option<Card> {
        if engine.is_eliminated(player) {
            return None;
        }
        let sum = engine.current_sum();
        let legal: Vec<Card> = engine
            .hand(player)
            .ok()?
            .iter()
            .copied()
            .filter(|&c| is_legal_play(c, sum))
            .collect();
        // A poisoned generator is still a usable generator.
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        legal.choose(&mut *rng).copied()
    }

    fn name(&self) -> &str {
        "random"
    }
}
