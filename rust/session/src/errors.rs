use cincuentazo_engine::errors::GameError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Game(#[from] GameError),
    #[error("Match state poisoned")]
    StatePoisoned,
    #[error("Invalid session config: {0}")]
    InvalidConfig(String),
    #[error("Unknown machine strategy: {0}")]
    UnknownStrategy(String),
    #[error("No tokio runtime available to run machine players")]
    NoRuntime,
    #[error("Session already started")]
    AlreadyStarted,
}

impl SessionError {
    /// The engine error behind this failure, if any.
    pub fn game_error(&self) -> Option<&GameError> {
        match self {
            SessionError::Game(err) => Some(err),
            _ => None,
        }
    }
}
