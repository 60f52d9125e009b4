use std::collections::{BTreeSet, HashSet};

use crate::cards::Card;
use crate::deck::Deck;
use crate::errors::{GameError, IllegalMoveReason};
use crate::events::GameEvent;
use crate::game::{GamePhase, GameSnapshot, MatchLayout, PlayerView};
use crate::player::{Player, PlayerId};
use crate::rules::{is_legal_play, validate_play, HAND_SIZE, MAX_MACHINES, MIN_MACHINES};
use crate::table::Table;

const TOTAL_CARDS: usize = 52;

/// Result of closing a player's turn with [`Engine::end_turn`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The player can still act; the turn moved on to the given seat.
    Advanced(PlayerId),
    /// The player had no legal card left and was eliminated.
    Eliminated,
}

/// The game state machine and the only mutation surface of a match.
///
/// The engine is synchronous and single-owner. Callers that share it between
/// concurrent actors must serialize every `&mut self` call (see the session
/// crate). Each mutation queues [`GameEvent`]s that the owner drains with
/// [`Engine::take_events`].
///
/// # Examples
///
/// ```
/// use cincuentazo_engine::engine::Engine;
/// use cincuentazo_engine::player::PlayerId;
///
/// let mut engine = Engine::new(1, Some(7)).expect("valid machine count");
/// engine.start_game().expect("fresh match");
///
/// assert_eq!(engine.current_player(), PlayerId::Human);
/// assert_eq!(engine.hand(PlayerId::Human).unwrap().len(), 4);
/// assert_eq!(engine.deck_remaining(), 43);
///
/// if let Some(card) = engine.find_legal_card(PlayerId::Human) {
///     engine.play_card(PlayerId::Human, card).expect("legal card");
/// }
/// engine.draw_card(PlayerId::Human).expect("deck has cards");
/// engine.end_turn(PlayerId::Human).expect("human is acting");
/// ```
#[derive(Debug)]
pub struct Engine {
    deck: Deck,
    table: Table,
    players: Vec<Player>,
    eliminated: BTreeSet<PlayerId>,
    cursor: usize,
    phase: GamePhase,
    winner: Option<PlayerId>,
    status: String,
    events: Vec<GameEvent>,
    seed: u64,
}

impl Engine {
    /// Creates a match with one human and `machines` machine players.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidConstruction`] unless `machines` is in 1..=3.
    pub fn new(machines: usize, seed: Option<u64>) -> Result<Self, GameError> {
        check_machine_count(machines)?;
        let seed = seed.unwrap_or_else(rand::random);
        Ok(Self {
            deck: Deck::new_with_seed(seed),
            table: Table::new(),
            players: seats(machines),
            eliminated: BTreeSet::new(),
            cursor: 0,
            phase: GamePhase::Initialized,
            winner: None,
            status: "Game initialized".to_string(),
            events: Vec::new(),
            seed,
        })
    }

    /// Builds an in-progress match from an explicit arrangement, with the
    /// human to act.
    pub fn from_layout(layout: MatchLayout) -> Result<Self, GameError> {
        check_machine_count(layout.machines)?;
        let MatchLayout {
            machines,
            deck,
            hands,
            played,
            seed,
        } = layout;

        if hands.len() != machines + 1 {
            return Err(GameError::InvalidLayout(format!(
                "expected {} hands, got {}",
                machines + 1,
                hands.len()
            )));
        }

        let mut seen = HashSet::with_capacity(TOTAL_CARDS);
        for &card in deck.iter().chain(hands.iter().flatten()).chain(played.iter()) {
            if !seen.insert(card) {
                return Err(GameError::InvalidLayout(format!("duplicate card {}", card)));
            }
        }
        if seen.len() != TOTAL_CARDS {
            return Err(GameError::InvalidLayout(format!(
                "layout holds {} cards, expected {}",
                seen.len(),
                TOTAL_CARDS
            )));
        }

        let table = Table::from_history(&played)?;
        let mut players = seats(machines);
        for (player, hand) in players.iter_mut().zip(hands) {
            for card in hand {
                player.give_card(card);
            }
        }

        Ok(Self {
            deck: Deck::from_cards(deck, seed),
            table,
            players,
            eliminated: BTreeSet::new(),
            cursor: 0,
            phase: GamePhase::InProgress,
            winner: None,
            status: "Game resumed".to_string(),
            events: Vec::new(),
            seed,
        })
    }

    /// Deals [`HAND_SIZE`] cards to every seat round-robin, then flips the
    /// opening card onto the table.
    ///
    /// Does nothing if the deck cannot cover the deal.
    pub fn start_game(&mut self) -> Result<(), GameError> {
        if self.phase != GamePhase::Initialized {
            return Err(GameError::WrongPhase { phase: self.phase });
        }
        let needed = HAND_SIZE * self.players.len() + 1;
        if self.deck.remaining() < needed {
            return Ok(());
        }

        for _ in 0..HAND_SIZE {
            for p in &mut self.players {
                let c = self.deck.draw()?;
                p.give_card(c);
            }
        }
        let opening = self.deck.draw()?;
        self.table.play(opening);
        self.phase = GamePhase::InProgress;

        self.emit(GameEvent::GameStarted {
            players: self.players.len(),
        });
        self.emit(GameEvent::InitialCard {
            card: opening,
            sum: self.table.current_sum(),
        });
        Ok(())
    }

    /// Plays `card` from `player`'s hand onto the table. Returns the value
    /// that was applied to the sum.
    ///
    /// A rejected card leaves the state untouched and does not consume the
    /// turn.
    pub fn play_card(&mut self, player: PlayerId, card: Card) -> Result<i32, GameError> {
        let seat = self.validate_actor(player)?;
        if !self.players[seat].holds(card) {
            return Err(GameError::IllegalMove {
                card,
                reason: IllegalMoveReason::NotInHand,
            });
        }
        validate_play(card, self.table.current_sum())?;

        let applied = self.table.play(card);
        self.players[seat].remove_card(card);
        self.emit(GameEvent::CardPlayed {
            player,
            card,
            value: applied,
            sum: self.table.current_sum(),
        });
        Ok(applied)
    }

    /// Draws one card into `player`'s hand, recycling the table first when
    /// the deck is empty.
    pub fn draw_card(&mut self, player: PlayerId) -> Result<Card, GameError> {
        let seat = self.validate_actor(player)?;
        if self.deck.is_empty() {
            self.recycle_table();
        }
        let card = self.deck.draw()?;
        self.players[seat].give_card(card);
        self.emit(GameEvent::CardDrawn {
            player,
            deck_remaining: self.deck.remaining(),
        });
        Ok(card)
    }

    /// `true` if `player` is still in the match and holds a legal card.
    pub fn can_act(&self, player: PlayerId) -> bool {
        !self.is_eliminated(player) && self.find_legal_card(player).is_some()
    }

    /// First card in hand order that is legal on the current sum.
    pub fn find_legal_card(&self, player: PlayerId) -> Option<Card> {
        if self.is_eliminated(player) {
            return None;
        }
        let sum = self.table.current_sum();
        self.player(player)?
            .hand()
            .iter()
            .copied()
            .find(|&c| is_legal_play(c, sum))
    }

    /// Removes `player` from the match. Their hand goes underneath the deck
    /// without a reshuffle. Idempotent: eliminating an eliminated player is a
    /// no-op.
    ///
    /// If the player held the turn, the turn advances immediately.
    pub fn eliminate(&mut self, player: PlayerId) -> Result<(), GameError> {
        let seat = self.seat_of(player)?;
        if self.eliminated.contains(&player) {
            return Ok(());
        }
        if self.phase != GamePhase::InProgress {
            return Err(GameError::WrongPhase { phase: self.phase });
        }

        let cards = self.players[seat].take_hand();
        let cards_returned = cards.len();
        self.deck.return_cards(cards);
        self.eliminated.insert(player);
        self.emit(GameEvent::PlayerEliminated {
            player,
            cards_returned,
            sum: self.table.current_sum(),
        });

        if self.cursor == seat {
            self.rotate();
        }
        self.check_game_over();
        Ok(())
    }

    /// Moves the turn to the next seat that is still in the match.
    pub fn advance_turn(&mut self) -> Result<(), GameError> {
        if self.phase != GamePhase::InProgress {
            return Err(GameError::WrongPhase { phase: self.phase });
        }
        self.rotate();
        self.check_game_over();
        Ok(())
    }

    /// Closes `player`'s turn: eliminates them if they can no longer act,
    /// otherwise advances the turn.
    pub fn end_turn(&mut self, player: PlayerId) -> Result<TurnOutcome, GameError> {
        self.validate_actor(player)?;
        if self.can_act(player) {
            self.advance_turn()?;
            Ok(TurnOutcome::Advanced(self.current_player()))
        } else {
            self.eliminate(player)?;
            Ok(TurnOutcome::Eliminated)
        }
    }

    /// `true` once at most one player remains active.
    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::Over || self.active_count() <= 1
    }

    /// The sole remaining player, checked human first.
    pub fn winner(&self) -> Option<PlayerId> {
        if self.phase == GamePhase::Over {
            return self.winner;
        }
        if self.active_count() == 1 {
            self.determine_winner()
        } else {
            None
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn current_player(&self) -> PlayerId {
        self.players[self.cursor].id()
    }

    pub fn current_sum(&self) -> i32 {
        self.table.current_sum()
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn deck_remaining(&self) -> usize {
        self.deck.remaining()
    }

    pub fn players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.players.iter().map(Player::id)
    }

    pub fn machine_count(&self) -> usize {
        self.players.len() - 1
    }

    pub fn hand(&self, player: PlayerId) -> Result<&[Card], GameError> {
        self.player(player)
            .map(Player::hand)
            .ok_or(GameError::UnknownPlayer(player))
    }

    pub fn is_eliminated(&self, player: PlayerId) -> bool {
        self.eliminated.contains(&player)
    }

    pub fn active_players(&self) -> Vec<PlayerId> {
        self.players()
            .filter(|p| !self.is_eliminated(*p))
            .collect()
    }

    /// Cards across deck, table and every hand. 52 for any well-formed match.
    pub fn total_cards(&self) -> usize {
        self.deck.remaining()
            + self.table.card_count()
            + self.players.iter().map(|p| p.hand().len()).sum::<usize>()
    }

    /// Description of the most recent state change.
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Drains the events queued since the last call, oldest first.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            phase: self.phase,
            current_player: self.current_player(),
            current_sum: self.table.current_sum(),
            top_card: self.table.top_card(),
            table_cards: self.table.card_count(),
            deck_remaining: self.deck.remaining(),
            players: self
                .players
                .iter()
                .map(|p| PlayerView {
                    id: p.id(),
                    cards: p.hand().len(),
                    eliminated: self.is_eliminated(p.id()),
                })
                .collect(),
            human_hand: self.players[0].hand().to_vec(),
            winner: self.winner(),
            status: self.status.clone(),
            total_cards: self.total_cards(),
        }
    }

    fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.seat()).filter(|p| p.id() == id)
    }

    fn seat_of(&self, id: PlayerId) -> Result<usize, GameError> {
        self.player(id)
            .map(|_| id.seat())
            .ok_or(GameError::UnknownPlayer(id))
    }

    /// Checks phase, membership, elimination and turn ownership, in that
    /// order, and returns the seat index.
    fn validate_actor(&self, player: PlayerId) -> Result<usize, GameError> {
        if self.phase != GamePhase::InProgress {
            return Err(GameError::WrongPhase { phase: self.phase });
        }
        let seat = self.seat_of(player)?;
        if self.is_eliminated(player) {
            return Err(GameError::PlayerEliminated(player));
        }
        if seat != self.cursor {
            return Err(GameError::NotPlayersTurn {
                expected: self.current_player(),
                actual: player,
            });
        }
        Ok(seat)
    }

    fn recycle_table(&mut self) {
        let recycled = self.table.recycle();
        if recycled.is_empty() {
            return;
        }
        let cards = recycled.len();
        self.deck.recycle(recycled);
        self.emit(GameEvent::DeckRecycled { cards });
    }

    /// Steps the cursor to the next active seat. Gives up after two full
    /// rotations and ends the match without a winner.
    fn rotate(&mut self) {
        let total = self.players.len();
        let mut attempts = 0;
        loop {
            self.cursor = (self.cursor + 1) % total;
            attempts += 1;
            if attempts >= total * 2 {
                self.phase = GamePhase::Over;
                self.winner = None;
                self.emit(GameEvent::GameOver { winner: None });
                return;
            }
            if !self.is_eliminated(self.current_player()) {
                break;
            }
        }
        self.emit(GameEvent::TurnChanged {
            player: self.current_player(),
        });
    }

    fn check_game_over(&mut self) {
        if self.phase != GamePhase::InProgress || self.active_count() > 1 {
            return;
        }
        self.phase = GamePhase::Over;
        self.winner = self.determine_winner();
        self.emit(GameEvent::GameOver {
            winner: self.winner,
        });
    }

    fn determine_winner(&self) -> Option<PlayerId> {
        self.players().find(|p| !self.is_eliminated(*p))
    }

    fn active_count(&self) -> usize {
        self.players.len() - self.eliminated.len()
    }

    fn emit(&mut self, event: GameEvent) {
        self.status = event.to_string();
        self.events.push(event);
    }
}

fn check_machine_count(machines: usize) -> Result<(), GameError> {
    if (MIN_MACHINES..=MAX_MACHINES).contains(&machines) {
        Ok(())
    } else {
        Err(GameError::InvalidConstruction { machines })
    }
}

fn seats(machines: usize) -> Vec<Player> {
    (0..=machines)
        .map(|seat| Player::new(PlayerId::from_seat(seat)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_machine_counts() {
        assert_eq!(
            Engine::new(0, Some(1)).unwrap_err(),
            GameError::InvalidConstruction { machines: 0 }
        );
        assert_eq!(
            Engine::new(4, Some(1)).unwrap_err(),
            GameError::InvalidConstruction { machines: 4 }
        );
        assert!(Engine::new(3, Some(1)).is_ok());
    }

    #[test]
    fn mutations_before_start_report_wrong_phase() {
        let mut engine = Engine::new(1, Some(1)).unwrap();
        assert_eq!(
            engine.draw_card(PlayerId::Human),
            Err(GameError::WrongPhase {
                phase: GamePhase::Initialized
            })
        );
        assert!(engine.advance_turn().is_err());
    }

    #[test]
    fn start_game_twice_is_rejected() {
        let mut engine = Engine::new(2, Some(9)).unwrap();
        engine.start_game().unwrap();
        assert_eq!(
            engine.start_game(),
            Err(GameError::WrongPhase {
                phase: GamePhase::InProgress
            })
        );
    }

    #[test]
    fn unknown_machine_seat_is_reported() {
        let mut engine = Engine::new(1, Some(2)).unwrap();
        engine.start_game().unwrap();
        assert_eq!(
            engine.eliminate(PlayerId::Machine(3)),
            Err(GameError::UnknownPlayer(PlayerId::Machine(3)))
        );
    }

    #[test]
    fn status_tracks_latest_event() {
        let mut engine = Engine::new(1, Some(5)).unwrap();
        engine.start_game().unwrap();
        assert!(engine.status().starts_with("Initial card: "));
        let events = engine.take_events();
        assert_eq!(events[0], GameEvent::GameStarted { players: 2 });
        assert!(matches!(events[1], GameEvent::InitialCard { .. }));
        assert!(engine.take_events().is_empty());
    }
}
