use std::sync::Mutex;

use cincuentazo_engine::engine::Engine;
use cincuentazo_engine::errors::GameError;
use cincuentazo_engine::game::{GamePhase, GameSnapshot};
use cincuentazo_engine::player::PlayerId;

use crate::clock::MatchClock;
use crate::errors::SessionError;
use crate::events::{EventBus, Notification};

#[derive(Debug)]
struct Shared {
    engine: Engine,
    clock: MatchClock,
}

/// The single owner of a match's [`Engine`].
///
/// Every mutation, whichever seat or task it comes from, runs under one lock
/// through [`MatchState::mutate`]. Events a mutation produces are published
/// before the lock is released, so subscribers see them in commit order.
/// Closures must not block or await.
#[derive(Debug)]
pub struct MatchState {
    shared: Mutex<Shared>,
    bus: EventBus,
}

impl MatchState {
    pub fn new(engine: Engine, bus: EventBus) -> Self {
        Self {
            shared: Mutex::new(Shared {
                engine,
                clock: MatchClock::new(),
            }),
            bus,
        }
    }

    /// Runs `f` with exclusive access to the engine, then publishes the
    /// events it queued.
    pub fn mutate<R>(&self, f: impl FnOnce(&mut Engine) -> R) -> Result<R, SessionError> {
        let mut guard = self.shared.lock().map_err(|_| SessionError::StatePoisoned)?;
        let out = f(&mut guard.engine);
        let events = guard.engine.take_events();
        for event in events {
            guard.clock.observe(&event);
            self.bus.publish(event);
        }
        Ok(out)
    }

    /// [`mutate`](Self::mutate) for closures that return an engine result.
    pub fn apply<R>(
        &self,
        f: impl FnOnce(&mut Engine) -> Result<R, GameError>,
    ) -> Result<R, SessionError> {
        self.mutate(f)?.map_err(SessionError::from)
    }

    pub fn read<R>(&self, f: impl FnOnce(&Engine) -> R) -> Result<R, SessionError> {
        let guard = self.shared.lock().map_err(|_| SessionError::StatePoisoned)?;
        Ok(f(&guard.engine))
    }

    pub fn snapshot(&self) -> Result<GameSnapshot, SessionError> {
        self.read(Engine::snapshot)
    }

    pub fn clock(&self) -> Result<MatchClock, SessionError> {
        let guard = self.shared.lock().map_err(|_| SessionError::StatePoisoned)?;
        Ok(guard.clock.clone())
    }

    pub fn phase(&self) -> Result<GamePhase, SessionError> {
        self.read(Engine::phase)
    }

    pub fn is_over(&self) -> Result<bool, SessionError> {
        self.read(Engine::is_over)
    }

    /// `true` if `player` holds the turn and is still in the match.
    pub fn is_turn_of(&self, player: PlayerId) -> Result<bool, SessionError> {
        self.read(|e| {
            e.phase() == GamePhase::InProgress
                && e.current_player() == player
                && !e.is_eliminated(player)
        })
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }
}
