//! # cincuentazo-session: Concurrent Match Runtime
//!
//! Runs a Cincuentazo match with one externally driven human seat and one
//! tokio task per machine seat, all mutating a single [`Engine`] through a
//! serialized path.
//!
//! ## Core Modules
//!
//! - [`state`] - [`MatchState`], the lock-guarded owner of the engine
//! - [`events`] - [`EventBus`] fan-out of numbered notifications
//! - [`coordinator`] - Machine seat drivers
//! - [`session`] - [`GameSession`], lifecycle and human actions
//! - [`clock`] - Match and turn timers
//! - [`config`] - [`SessionConfig`] and pacing defaults
//! - [`logging`] - tracing setup and log capture for tests
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cincuentazo_session::{GameSession, SessionConfig};
//!
//! # async fn demo() -> Result<(), cincuentazo_session::SessionError> {
//! let mut session = GameSession::new(SessionConfig::default())?;
//! let mut events = session.subscribe();
//! session.start()?;
//!
//! while let Some(note) = events.receiver().recv().await {
//!     println!("{}", note.message);
//!     if session.is_over()? {
//!         break;
//!     }
//! }
//! session.shutdown().await;
//! # Ok(())
//! # }
//! ```
//!
//! [`Engine`]: cincuentazo_engine::engine::Engine

pub mod clock;
pub mod config;
pub mod coordinator;
pub mod errors;
pub mod events;
pub mod logging;
pub mod session;
pub mod state;

pub use clock::MatchClock;
pub use config::SessionConfig;
pub use errors::SessionError;
pub use events::{EventBus, EventSubscription, Notification};
pub use session::GameSession;
pub use state::MatchState;
