//! # cincuentazo-ai: Machine Players for Cincuentazo
//!
//! Move selection for machine-controlled seats plus the turn sequence every
//! machine seat follows: play the chosen card (if any), draw a replacement,
//! then either give up the turn or be eliminated when no legal card is left.
//!
//! ## Core Components
//!
//! - [`MachineStrategy`] - Trait for choosing the card a seat plays
//! - [`baseline`] - First-legal-card strategy (the default)
//! - [`random`] - Uniform choice among legal cards
//! - [`turn`] - The machine turn sequence ([`play_machine_turn`])
//! - [`create_ai`] - Factory function for strategies by name
//!
//! ## Quick Start
//!
//! ```rust
//! use cincuentazo_ai::{create_ai, play_machine_turn};
//! use cincuentazo_engine::engine::Engine;
//! use cincuentazo_engine::player::PlayerId;
//!
//! let strategy = create_ai("first-legal").expect("known strategy");
//!
//! let mut engine = Engine::new(1, Some(42)).expect("valid match");
//! engine.start_game().expect("fresh match");
//!
//! let report = play_machine_turn(&mut engine, PlayerId::Human, strategy.as_ref())
//!     .expect("human seat is on turn");
//! println!("{}", report);
//! ```
//!
//! ## Strategies
//!
//! - `"first-legal"` (also `"baseline"` and `""`) - first legal card in hand order
//! - `"random"` - any legal card, uniformly

use cincuentazo_engine::cards::Card;
use cincuentazo_engine::engine::Engine;
use cincuentazo_engine::player::PlayerId;

pub mod baseline;
pub mod random;
pub mod turn;

pub use turn::{TurnReport, play_machine_turn};

/// Names accepted by [`create_ai`], canonical spelling first.
pub const STRATEGY_NAMES: &[&str] = &["first-legal", "random"];

/// Interface for choosing which card a seat plays.
///
/// Implementations only read the engine; [`play_machine_turn`] applies the
/// choice. Returning a card that is not legal makes the turn fail with the
/// engine's error.
///
/// # Example Implementation
///
/// ```rust
/// use cincuentazo_ai::MachineStrategy;
/// use cincuentazo_engine::cards::Card;
/// use cincuentazo_engine::engine::Engine;
/// use cincuentazo_engine::player::PlayerId;
///
/// /// Never plays; just draws every turn.
/// struct Hoarder;
///
/// impl MachineStrategy for Hoarder {
///     fn choose_card(&self, _engine: &Engine, _player: PlayerId) -> Option<Card> {
///         None
///     }
///
///     fn name(&self) -> &str {
///         "hoarder"
///     }
/// }
/// ```
pub trait MachineStrategy: Send + Sync {
    /// Card `player` should play on the current sum, or `None` to only draw.
    fn choose_card(&self, engine: &Engine, player: PlayerId) -> Option<Card>;

    fn name(&self) -> &str;
}

/// Builds a strategy by name. Returns `None` for unknown names.
///
/// # Example
///
/// ```rust
/// use cincuentazo_ai::create_ai;
///
/// assert_eq!(create_ai("baseline").unwrap().name(), "first-legal");
/// assert_eq!(create_ai("random").unwrap().name(), "random");
/// assert!(create_ai("clairvoyant").is_none());
/// ```
pub fn create_ai(name: &str) -> Option<Box<dyn MachineStrategy>> {
    match name.trim().to_ascii_lowercase().as_str() {
        "" | "baseline" | "first-legal" => Some(Box::new(baseline::FirstLegal)),
        "random" => Some(Box::new(random::RandomLegal::new())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_name_resolves() {
        for name in STRATEGY_NAMES {
            let ai = create_ai(name).expect("listed strategy");
            assert_eq!(ai.name(), *name);
        }
    }

    #[test]
    fn empty_and_baseline_alias_first_legal() {
        assert_eq!(create_ai("").unwrap().name(), "first-legal");
        assert_eq!(create_ai(" Baseline ").unwrap().name(), "first-legal");
    }

    #[test]
    fn unknown_strategy_is_none() {
        assert!(create_ai("minimax").is_none());
    }

    #[test]
    fn strategies_are_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<Box<dyn MachineStrategy>>();
    }
}
