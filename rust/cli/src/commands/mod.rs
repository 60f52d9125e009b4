//! Command handlers, one module per subcommand.
//!
//! Handlers write to the `out`/`err` streams they are given rather than to
//! the process streams so tests can capture everything.

pub mod cfg;
pub mod play;
pub mod sim;

pub use cfg::handle_cfg_command;
pub use play::{PlayOptions, handle_play_command};
pub use sim::handle_sim_command;
