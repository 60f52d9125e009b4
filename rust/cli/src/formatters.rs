//! Card, hand and table formatters for terminal display.
//!
//! Pure functions turning engine values into terminal text. Suits use
//! Unicode symbols with an ASCII fallback for terminals that cannot render
//! them.
//!
//! ## Unicode vs ASCII Fallback
//!
//! The module detects Unicode support by checking environment variables on
//! Windows (WT_SESSION, TERM_PROGRAM, VSCODE_INJECTION) and assumes support
//! on Unix-like systems.
//!
//! - **Unicode mode**: Uses ♥ ♦ ♣ ♠ symbols
//! - **ASCII mode**: Uses h d c s letters
//!
//! ## Example
//!
//! ```rust
//! use cincuentazo_engine::cards::{Card, Rank, Suit};
//! use cincuentazo_cli::formatters::{format_card, format_hand};
//!
//! let ace_spades = Card::new(Rank::Ace, Suit::Spades);
//! assert!(format_card(&ace_spades) == "A♠" || format_card(&ace_spades) == "As");
//! assert!(format_hand(&[ace_spades]).starts_with("1) A"));
//! ```

use cincuentazo_engine::cards::{Card, Suit};
use cincuentazo_engine::game::GameSnapshot;
use cincuentazo_engine::rules::MAX_SUM;

/// Check if the terminal supports Unicode card symbols by detecting modern terminal environments.
///
/// On Windows, checks for Windows Terminal (WT_SESSION), modern terminals (TERM_PROGRAM),
/// or VS Code (VSCODE_INJECTION). On Unix-like systems, assumes Unicode support.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

pub fn format_suit(suit: &Suit) -> String {
    if supports_unicode() {
        suit.symbol().to_string()
    } else {
        match suit {
            Suit::Hearts => "h",
            Suit::Diamonds => "d",
            Suit::Clubs => "c",
            Suit::Spades => "s",
        }
        .to_string()
    }
}

/// Format a Card as rank label plus suit, e.g. "10♥" or "10h".
pub fn format_card(card: &Card) -> String {
    format!("{}{}", card.rank.label(), format_suit(&card.suit))
}

/// Numbered hand as typed by the `p <n>` command: "1) A♠  2) 10♥".
pub fn format_hand(cards: &[Card]) -> String {
    if cards.is_empty() {
        return "(empty)".to_string();
    }
    cards
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{}) {}", i + 1, format_card(c)))
        .collect::<Vec<_>>()
        .join("  ")
}

/// One-line table summary: sum, top card and deck size.
pub fn format_table(snapshot: &GameSnapshot) -> String {
    let top = snapshot
        .top_card
        .as_ref()
        .map(format_card)
        .unwrap_or_else(|| "-".to_string());
    format!(
        "Sum: {}/{} | Top card: {} | Deck: {}",
        snapshot.current_sum, MAX_SUM, top, snapshot.deck_remaining
    )
}

/// Card counts per seat, marking eliminated players and the player to act.
pub fn format_players(snapshot: &GameSnapshot) -> String {
    snapshot
        .players
        .iter()
        .map(|p| {
            let marker = if p.id == snapshot.current_player { "*" } else { "" };
            if p.eliminated {
                format!("{}{}: out", marker, p.id)
            } else {
                format!("{}{}: {} cards", marker, p.id, p.cards)
            }
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use cincuentazo_engine::cards::Rank;
    use cincuentazo_engine::game::{GamePhase, PlayerView};
    use cincuentazo_engine::player::PlayerId;

    fn snapshot() -> GameSnapshot {
        GameSnapshot {
            phase: GamePhase::InProgress,
            current_player: PlayerId::Machine(1),
            current_sum: 38,
            top_card: Some(Card::new(Rank::Eight, Suit::Clubs)),
            table_cards: 6,
            deck_remaining: 34,
            players: vec![
                PlayerView {
                    id: PlayerId::Human,
                    cards: 4,
                    eliminated: false,
                },
                PlayerView {
                    id: PlayerId::Machine(1),
                    cards: 4,
                    eliminated: false,
                },
                PlayerView {
                    id: PlayerId::Machine(2),
                    cards: 0,
                    eliminated: true,
                },
            ],
            human_hand: Vec::new(),
            winner: None,
            status: String::new(),
            total_cards: 52,
        }
    }

    #[test]
    fn ten_keeps_two_digit_label() {
        let formatted = format_card(&Card::new(Rank::Ten, Suit::Hearts));
        assert!(formatted == "10♥" || formatted == "10h");
    }

    #[test]
    fn hand_is_numbered_from_one() {
        let hand = [
            Card::new(Rank::King, Suit::Clubs),
            Card::new(Rank::Two, Suit::Diamonds),
        ];
        let formatted = format_hand(&hand);
        assert!(formatted.starts_with("1) K"));
        assert!(formatted.contains("2) 2"));
        assert_eq!(format_hand(&[]), "(empty)");
    }

    #[test]
    fn table_line_shows_sum_against_ceiling() {
        let line = format_table(&snapshot());
        assert!(line.starts_with("Sum: 38/50 | Top card: 8"));
        assert!(line.ends_with("Deck: 34"));
    }

    #[test]
    fn players_line_marks_turn_and_eliminations() {
        assert_eq!(
            format_players(&snapshot()),
            "Human: 4 cards | *Machine 1: 4 cards | Machine 2: out"
        );
    }
}
