use std::sync::Arc;
use std::time::Duration;

use cincuentazo_ai::{play_machine_turn, MachineStrategy, TurnReport};
use cincuentazo_engine::errors::GameError;
use cincuentazo_engine::game::GamePhase;
use cincuentazo_engine::player::PlayerId;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::config::SessionConfig;
use crate::state::MatchState;

enum TurnAttempt {
    /// The turn moved on while this seat was thinking.
    Skipped,
    Played(TurnReport),
    /// The turn sequence failed; the turn was forced forward.
    Forced {
        error: GameError,
        advance: Result<(), GameError>,
    },
}

/// Drives one machine seat for the lifetime of a match.
///
/// The coordinator polls the shared state, and when its seat is on turn it
/// pauses for a think delay, re-checks ownership under the lock and plays a
/// full turn. It never holds the lock while sleeping.
pub struct Coordinator {
    player: PlayerId,
    state: Arc<MatchState>,
    strategy: Arc<dyn MachineStrategy>,
    config: SessionConfig,
    stop: watch::Receiver<bool>,
}

impl Coordinator {
    pub fn new(
        player: PlayerId,
        state: Arc<MatchState>,
        strategy: Arc<dyn MachineStrategy>,
        config: SessionConfig,
        stop: watch::Receiver<bool>,
    ) -> Self {
        Self {
            player,
            state,
            strategy,
            config,
            stop,
        }
    }

    pub fn player(&self) -> PlayerId {
        self.player
    }

    /// Runs the coordinator on the current tokio runtime. The handle yields
    /// the number of turns the seat took.
    pub fn spawn(self) -> JoinHandle<usize> {
        tokio::spawn(self.run())
    }

    /// Polls until stopped or the match is over. Returns the number of turns
    /// taken.
    pub async fn run(mut self) -> usize {
        let mut turns = 0;
        tracing::debug!(player = %self.player, "machine coordinator started");

        loop {
            let my_turn = match self.state.read(|e| {
                (
                    e.is_over(),
                    e.phase() == GamePhase::InProgress
                        && e.current_player() == self.player
                        && !e.is_eliminated(self.player),
                )
            }) {
                Ok((true, _)) => break,
                Ok((false, mine)) => mine,
                Err(err) => {
                    tracing::warn!(player = %self.player, error = %err, "match state unavailable");
                    break;
                }
            };

            if my_turn {
                let delay = self.config.think_delay();
                if !self.pause(delay).await {
                    break;
                }
                if self.take_turn() {
                    turns += 1;
                }
            } else if !self.pause(self.config.poll_interval).await {
                break;
            }
        }

        tracing::debug!(player = %self.player, turns, "machine coordinator stopped");
        turns
    }

    /// Sleeps for `duration` unless a stop arrives first. `false` means stop.
    async fn pause(&mut self, duration: Duration) -> bool {
        if *self.stop.borrow() {
            return false;
        }
        tokio::select! {
            _ = tokio::time::sleep(duration) => !*self.stop.borrow(),
            changed = self.stop.changed() => match changed {
                Ok(()) => !*self.stop.borrow(),
                // Sender gone: the session was dropped.
                Err(_) => false,
            },
        }
    }

    /// Plays one turn if the seat still owns it. Returns whether a turn was
    /// consumed.
    fn take_turn(&self) -> bool {
        let player = self.player;
        let strategy = self.strategy.as_ref();
        let attempt = self.state.mutate(|engine| {
            if engine.phase() != GamePhase::InProgress
                || engine.current_player() != player
                || engine.is_eliminated(player)
            {
                return TurnAttempt::Skipped;
            }
            match play_machine_turn(engine, player, strategy) {
                Ok(report) => TurnAttempt::Played(report),
                Err(error) => TurnAttempt::Forced {
                    error,
                    advance: engine.advance_turn(),
                },
            }
        });

        match attempt {
            Ok(TurnAttempt::Skipped) => {
                tracing::debug!(player = %player, "turn moved on during think delay");
                false
            }
            Ok(TurnAttempt::Played(report)) => {
                tracing::debug!(player = %player, turn = %report, "machine turn played");
                true
            }
            Ok(TurnAttempt::Forced { error, advance }) => {
                tracing::warn!(
                    player = %player,
                    error = %error,
                    "machine turn failed, forcing turn advance"
                );
                if let Err(err) = advance {
                    tracing::warn!(player = %player, error = %err, "forced turn advance failed");
                }
                true
            }
            Err(err) => {
                tracing::warn!(player = %player, error = %err, "machine turn could not run");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventBus;
    use cincuentazo_ai::baseline::FirstLegal;
    use cincuentazo_engine::cards::Card;
    use cincuentazo_engine::engine::Engine;

    /// Always proposes a card the seat does not hold.
    struct Cheater;

    impl MachineStrategy for Cheater {
        fn choose_card(&self, engine: &Engine, _player: PlayerId) -> Option<Card> {
            engine.table().top_card()
        }

        fn name(&self) -> &str {
            "cheater"
        }
    }

    fn machine_on_turn() -> Arc<MatchState> {
        let mut engine = Engine::new(1, Some(10)).unwrap();
        engine.start_game().unwrap();
        engine.advance_turn().unwrap();
        engine.take_events();
        Arc::new(MatchState::new(engine, EventBus::new()))
    }

    fn coordinator(state: Arc<MatchState>, strategy: Arc<dyn MachineStrategy>) -> Coordinator {
        let (_tx, rx) = watch::channel(false);
        Coordinator::new(
            PlayerId::Machine(1),
            state,
            strategy,
            SessionConfig::instant(1, None),
            rx,
        )
    }

    #[test]
    fn take_turn_plays_and_hands_over() {
        let state = machine_on_turn();
        let coord = coordinator(Arc::clone(&state), Arc::new(FirstLegal));
        assert!(coord.take_turn());
        let snap = state.snapshot().unwrap();
        assert!(snap.current_player == PlayerId::Human || snap.is_eliminated(PlayerId::Machine(1)));
    }

    #[test]
    fn take_turn_skips_when_not_on_turn() {
        let state = machine_on_turn();
        state.apply(|e| e.advance_turn()).unwrap();
        let before = state.snapshot().unwrap();

        let coord = coordinator(Arc::clone(&state), Arc::new(FirstLegal));
        assert!(!coord.take_turn());
        assert_eq!(state.snapshot().unwrap(), before);
    }

    #[test]
    fn failed_turn_forces_advance() {
        let state = machine_on_turn();
        let coord = coordinator(Arc::clone(&state), Arc::new(Cheater));
        assert!(coord.take_turn());
        assert_eq!(state.snapshot().unwrap().current_player, PlayerId::Human);
    }
}
