use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use cincuentazo_engine::events::GameEvent;

/// Wall-clock bookkeeping for a match: total elapsed time and the time spent
/// on the current turn.
///
/// The clock is fed the same events the bus publishes. `GameStarted` restarts
/// both readings at the deal, a `TurnChanged` restarts the turn timer, and
/// `GameOver` freezes both readings.
#[derive(Debug, Clone)]
pub struct MatchClock {
    started_at: DateTime<Utc>,
    started: Instant,
    turn_started: Instant,
    stopped: Option<Instant>,
}

impl Default for MatchClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            started_at: Utc::now(),
            started: now,
            turn_started: now,
            stopped: None,
        }
    }

    pub fn observe(&mut self, event: &GameEvent) {
        self.observe_at(event, Instant::now());
    }

    fn observe_at(&mut self, event: &GameEvent, now: Instant) {
        if self.stopped.is_some() {
            return;
        }
        match event {
            GameEvent::GameStarted { .. } => {
                self.started_at = Utc::now();
                self.started = now;
                self.turn_started = now;
            }
            GameEvent::TurnChanged { .. } => self.turn_started = now,
            GameEvent::GameOver { .. } => self.stopped = Some(now),
            _ => {}
        }
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.is_some()
    }

    pub fn elapsed(&self) -> Duration {
        self.reading().saturating_duration_since(self.started)
    }

    pub fn turn_elapsed(&self) -> Duration {
        self.reading().saturating_duration_since(self.turn_started)
    }

    /// `Time: MM:SS | Turn: SSs`
    pub fn display(&self) -> String {
        let total = self.elapsed().as_secs();
        format!(
            "Time: {} | Turn: {:02}s",
            format_mm_ss(total),
            self.turn_elapsed().as_secs()
        )
    }

    fn reading(&self) -> Instant {
        self.stopped.unwrap_or_else(Instant::now)
    }
}

/// `MM:SS` rendering of a number of seconds.
pub fn format_mm_ss(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
