use std::sync::Arc;

use cincuentazo_ai::{play_machine_turn, MachineStrategy, TurnReport};
use cincuentazo_engine::cards::Card;
use cincuentazo_engine::engine::{Engine, TurnOutcome};
use cincuentazo_engine::game::GameSnapshot;
use cincuentazo_engine::player::PlayerId;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::clock::MatchClock;
use crate::config::SessionConfig;
use crate::coordinator::Coordinator;
use crate::errors::SessionError;
use crate::events::{EventBus, EventSubscription};
use crate::state::MatchState;

pub type SessionId = String;

/// One match with its machine coordinators.
///
/// Human actions are thin wrappers over the serialized mutation path and act
/// as [`PlayerId::Human`]. Machine seats are driven by [`Coordinator`] tasks
/// spawned on the tokio runtime that is current when [`GameSession::start`]
/// runs.
pub struct GameSession {
    id: SessionId,
    config: SessionConfig,
    bus: EventBus,
    state: Arc<MatchState>,
    strategy: Arc<dyn MachineStrategy>,
    stop_tx: watch::Sender<bool>,
    coordinators: Vec<(PlayerId, JoinHandle<usize>)>,
    started: bool,
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("id", &self.id)
            .field("config", &self.config)
            .field("strategy", &self.strategy.name())
            .field("coordinators", &self.coordinators.len())
            .field("started", &self.started)
            .finish()
    }
}

impl GameSession {
    pub fn new(config: SessionConfig) -> Result<Self, SessionError> {
        config.validate()?;
        let strategy: Arc<dyn MachineStrategy> = Arc::from(config.strategy()?);
        let id = Uuid::new_v4().to_string();
        let bus = EventBus::new();
        let state = Arc::new(Self::fresh_state(&config, &bus)?);
        let (stop_tx, _) = watch::channel(false);

        tracing::info!(
            session_id = %id,
            machines = config.machines,
            seed = state.read(Engine::seed)?,
            strategy = strategy.name(),
            "creating match session"
        );

        Ok(Self {
            id,
            config,
            bus,
            state,
            strategy,
            stop_tx,
            coordinators: Vec::new(),
            started: false,
        })
    }

    fn fresh_state(config: &SessionConfig, bus: &EventBus) -> Result<MatchState, SessionError> {
        let engine = Engine::new(config.machines, config.seed)?;
        Ok(MatchState::new(engine, bus.clone()))
    }

    /// Deals, publishes the opening events and spawns one coordinator per
    /// machine seat.
    ///
    /// # Errors
    ///
    /// [`SessionError::NoRuntime`] outside a tokio runtime and
    /// [`SessionError::AlreadyStarted`] on a second call.
    pub fn start(&mut self) -> Result<(), SessionError> {
        if self.started {
            return Err(SessionError::AlreadyStarted);
        }
        let runtime = Handle::try_current().map_err(|_| SessionError::NoRuntime)?;
        self.state.apply(|e| e.start_game())?;
        self.started = true;

        let machines: Vec<PlayerId> = self
            .state
            .read(|e| e.players().filter(|p| !p.is_human()).collect())?;
        for player in machines {
            let coordinator = Coordinator::new(
                player,
                Arc::clone(&self.state),
                Arc::clone(&self.strategy),
                self.config.clone(),
                self.stop_tx.subscribe(),
            );
            self.coordinators
                .push((player, runtime.spawn(coordinator.run())));
        }

        tracing::info!(
            session_id = %self.id,
            coordinators = self.coordinators.len(),
            "match started"
        );
        Ok(())
    }

    pub fn play_card(&self, card: Card) -> Result<i32, SessionError> {
        self.state.apply(|e| e.play_card(PlayerId::Human, card))
    }

    pub fn draw_card(&self) -> Result<Card, SessionError> {
        self.state.apply(|e| e.draw_card(PlayerId::Human))
    }

    pub fn end_turn(&self) -> Result<TurnOutcome, SessionError> {
        self.state.apply(|e| e.end_turn(PlayerId::Human))
    }

    pub fn eliminate(&self, player: PlayerId) -> Result<(), SessionError> {
        self.state.apply(|e| e.eliminate(player))
    }

    pub fn advance_turn(&self) -> Result<(), SessionError> {
        self.state.apply(|e| e.advance_turn())
    }

    /// Plays the human seat's turn with the session strategy.
    pub fn autopilot_turn(&self) -> Result<TurnReport, SessionError> {
        let strategy = self.strategy.as_ref();
        self.state
            .apply(|e| play_machine_turn(e, PlayerId::Human, strategy))
    }

    pub fn subscribe(&self) -> EventSubscription {
        self.bus.subscribe()
    }

    pub fn snapshot(&self) -> Result<GameSnapshot, SessionError> {
        self.state.snapshot()
    }

    pub fn clock(&self) -> Result<MatchClock, SessionError> {
        self.state.clock()
    }

    pub fn is_over(&self) -> Result<bool, SessionError> {
        self.state.is_over()
    }

    pub fn winner(&self) -> Result<Option<PlayerId>, SessionError> {
        self.state.read(Engine::winner)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn strategy_name(&self) -> &str {
        self.strategy.name()
    }

    pub fn state(&self) -> &Arc<MatchState> {
        &self.state
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// Number of coordinators that have not finished yet.
    pub fn running_coordinators(&self) -> usize {
        self.coordinators
            .iter()
            .filter(|(_, handle)| !handle.is_finished())
            .count()
    }

    /// Signals every coordinator to stop. Sleeping coordinators wake up
    /// immediately.
    pub fn stop(&self) {
        self.stop_tx.send_replace(true);
    }

    /// Stops and joins every coordinator. Returns the number of turns each
    /// machine seat took.
    pub async fn shutdown(&mut self) -> Vec<(PlayerId, usize)> {
        self.stop();
        let mut turns = Vec::with_capacity(self.coordinators.len());
        for (player, handle) in self.coordinators.drain(..) {
            match handle.await {
                Ok(n) => turns.push((player, n)),
                Err(err) => {
                    tracing::warn!(
                        session_id = %self.id,
                        player = %player,
                        error = %err,
                        "coordinator task failed"
                    );
                }
            }
        }
        tracing::info!(session_id = %self.id, "match session shut down");
        turns
    }

    /// Shuts the current match down and starts a new one with the same
    /// configuration. Subscribers stay attached.
    pub async fn restart(&mut self) -> Result<(), SessionError> {
        self.shutdown().await;
        self.state = Arc::new(Self::fresh_state(&self.config, &self.bus)?);
        self.stop_tx = watch::channel(false).0;
        self.started = false;
        tracing::info!(session_id = %self.id, "restarting match");
        self.start()
    }
}

impl Drop for GameSession {
    fn drop(&mut self) {
        self.stop_tx.send_replace(true);
        for (_, handle) in self.coordinators.drain(..) {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_needs_a_runtime() {
        let mut session = GameSession::new(SessionConfig::instant(1, Some(1))).unwrap();
        assert!(matches!(session.start(), Err(SessionError::NoRuntime)));
        assert!(session.snapshot().unwrap().phase == cincuentazo_engine::game::GamePhase::Initialized);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let cfg = SessionConfig {
            machines: 0,
            ..SessionConfig::default()
        };
        assert!(matches!(
            GameSession::new(cfg),
            Err(SessionError::InvalidConfig(_))
        ));
    }

    #[tokio::test]
    async fn second_start_is_rejected() {
        let mut session = GameSession::new(SessionConfig::instant(1, Some(1))).unwrap();
        session.start().unwrap();
        assert!(matches!(session.start(), Err(SessionError::AlreadyStarted)));
        session.shutdown().await;
    }
}
