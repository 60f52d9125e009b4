//! Error types for the CLI application.
//!
//! Every command handler returns [`CliError`]; [`crate::run`] maps it to an
//! exit code.

use std::fmt;

use cincuentazo_engine::errors::GameError;
use cincuentazo_session::SessionError;

use crate::config::ConfigError;

/// Custom error type for CLI operations.
///
/// This enum encompasses all error types that can occur during CLI execution,
/// allowing for proper error propagation using the `?` operator.
#[derive(Debug)]
pub enum CliError {
    /// I/O error (stdout/stderr writes, runtime construction, etc.)
    Io(std::io::Error),

    /// Invalid user input or command-line arguments
    InvalidInput(String),

    /// Configuration error
    Config(String),

    /// Rule violation reported by the engine
    Engine(GameError),

    /// Session failure (poisoned state, missing runtime, etc.)
    Session(SessionError),

    /// Operation stopped before completion
    Interrupted(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Engine(e) => write!(f, "Engine error: {}", e),
            CliError::Session(e) => write!(f, "Session error: {}", e),
            CliError::Interrupted(msg) => write!(f, "Interrupted: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            CliError::Engine(e) => Some(e),
            CliError::Session(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        CliError::Io(error)
    }
}

impl From<GameError> for CliError {
    fn from(error: GameError) -> Self {
        CliError::Engine(error)
    }
}

// Rule violations keep their engine classification; everything else is a
// session failure.
impl From<SessionError> for CliError {
    fn from(error: SessionError) -> Self {
        match error {
            SessionError::Game(e) => CliError::Engine(e),
            SessionError::InvalidConfig(msg) => CliError::Config(msg),
            SessionError::UnknownStrategy(name) => {
                CliError::Config(format!("unknown strategy '{}'", name))
            }
            other => CliError::Session(other),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(error: ConfigError) -> Self {
        CliError::Config(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cincuentazo_engine::player::PlayerId;

    #[test]
    fn game_errors_inside_session_errors_stay_engine_errors() {
        let err: CliError = SessionError::Game(GameError::EmptyDeck).into();
        assert!(matches!(err, CliError::Engine(GameError::EmptyDeck)));
    }

    #[test]
    fn unknown_strategy_is_a_configuration_problem() {
        let err: CliError = SessionError::UnknownStrategy("mcts".into()).into();
        assert_eq!(
            err.to_string(),
            "Configuration error: unknown strategy 'mcts'"
        );
    }

    #[test]
    fn engine_error_exposes_source() {
        use std::error::Error;
        let err = CliError::Engine(GameError::PlayerEliminated(PlayerId::Machine(2)));
        assert_eq!(err.to_string(), "Engine error: Machine 2 has been eliminated");
        assert!(err.source().is_some());
    }

    #[test]
    fn poisoned_state_is_a_session_error() {
        let err: CliError = SessionError::StatePoisoned.into();
        assert!(matches!(err, CliError::Session(SessionError::StatePoisoned)));
    }
}
