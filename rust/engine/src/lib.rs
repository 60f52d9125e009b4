//! # cincuentazo-engine: Cincuentazo Game Engine Core
//!
//! Rules and state machine for Cincuentazo, a card-elimination game played
//! around a running sum that may never exceed 50. One human seat plays
//! against one to three machine seats; a player who cannot play legally is
//! eliminated and the last active player wins.
//!
//! The engine is synchronous and deterministic for a given seed. It does not
//! lock or schedule anything itself; concurrent access is layered on top by
//! the session crate.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and deck construction
//! - [`deck`] - Seeded deck shuffling with ChaCha20 RNG
//! - [`table`] - Played cards and the running sum
//! - [`rules`] - Card values, Ace resolution and play legality
//! - [`player`] - Seat identities and hands
//! - [`engine`] - The game state machine
//! - [`game`] - Phases, layouts and snapshots
//! - [`events`] - State-change events emitted by the engine
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use cincuentazo_engine::engine::{Engine, TurnOutcome};
//! use cincuentazo_engine::player::PlayerId;
//!
//! let mut engine = Engine::new(2, Some(42)).expect("2 machines is valid");
//! engine.start_game().expect("fresh match");
//!
//! let me = PlayerId::Human;
//! if let Some(card) = engine.find_legal_card(me) {
//!     engine.play_card(me, card).expect("legal play");
//! }
//! engine.draw_card(me).expect("deck has cards");
//!
//! match engine.end_turn(me).expect("it was my turn") {
//!     TurnOutcome::Advanced(next) => println!("{} to act", next),
//!     TurnOutcome::Eliminated => println!("out of the game"),
//! }
//!
//! for event in engine.take_events() {
//!     println!("{}", event);
//! }
//! ```
//!
//! ## Card Values
//!
//! Number cards count their face value, except 9 which counts zero. Face
//! cards count -10. The Ace counts 10 while that keeps the sum at or below
//! 50, and 1 otherwise:
//!
//! ```rust
//! use cincuentazo_engine::cards::{Card, Rank, Suit};
//! use cincuentazo_engine::rules::{contextual_value, is_legal_play};
//!
//! let ace = Card::new(Rank::Ace, Suit::Spades);
//! assert_eq!(contextual_value(ace, 38), 10);
//! assert_eq!(contextual_value(ace, 45), 1);
//! assert!(!is_legal_play(Card::new(Rank::Ten, Suit::Hearts), 45));
//! ```

pub mod cards;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod events;
pub mod game;
pub mod player;
pub mod rules;
pub mod table;
