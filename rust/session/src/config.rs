use std::time::Duration;

use cincuentazo_ai::{create_ai, MachineStrategy};
use cincuentazo_engine::rules::{MAX_MACHINES, MIN_MACHINES};
use serde::{Deserialize, Serialize};

use crate::errors::SessionError;

/// Match settings a [`GameSession`](crate::session::GameSession) is built from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionConfig {
    /// Number of machine seats (1-3).
    pub machines: usize,
    /// Deck seed; `None` picks a fresh one per match.
    pub seed: Option<u64>,
    /// Strategy name understood by [`create_ai`].
    pub strategy: String,
    /// How often coordinators check whose turn it is.
    pub poll_interval: Duration,
    /// Lower bound of the machine "thinking" pause.
    pub think_min: Duration,
    /// Upper bound of the machine "thinking" pause.
    pub think_max: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            machines: 1,
            seed: None,
            strategy: "first-legal".to_string(),
            poll_interval: Duration::from_millis(1000),
            think_min: Duration::from_millis(2000),
            think_max: Duration::from_millis(4000),
        }
    }
}

impl SessionConfig {
    /// Settings for tests and batch runs: no pacing delays worth waiting for.
    pub fn instant(machines: usize, seed: Option<u64>) -> Self {
        Self {
            machines,
            seed,
            poll_interval: Duration::from_millis(1),
            think_min: Duration::ZERO,
            think_max: Duration::from_millis(1),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), SessionError> {
        if !(MIN_MACHINES..=MAX_MACHINES).contains(&self.machines) {
            return Err(SessionError::InvalidConfig(format!(
                "machines must be between {} and {}",
                MIN_MACHINES, MAX_MACHINES
            )));
        }
        if self.poll_interval.is_zero() {
            return Err(SessionError::InvalidConfig(
                "poll_interval must be greater than 0".to_string(),
            ));
        }
        if self.think_min > self.think_max {
            return Err(SessionError::InvalidConfig(
                "think_min must not exceed think_max".to_string(),
            ));
        }
        self.strategy()?;
        Ok(())
    }

    /// Instantiates the configured strategy.
    pub fn strategy(&self) -> Result<Box<dyn MachineStrategy>, SessionError> {
        create_ai(&self.strategy).ok_or_else(|| SessionError::UnknownStrategy(self.strategy.clone()))
    }

    /// Random pause within the think range. Collapses to `think_min` when the
    /// range is empty.
    pub fn think_delay(&self) -> Duration {
        if self.think_min >= self.think_max {
            return self.think_min;
        }
        let min = self.think_min.as_millis() as u64;
        let max = self.think_max.as_millis() as u64;
        Duration::from_millis(rand::random_range(min..=max))
    }
}
