//! Input parsing and validation for interactive commands.
//!
//! This module provides functions for parsing and validating user input in
//! the interactive `play` command and in command-line values clap cannot
//! check on its own:
//! - Human move parsing (play card n, draw, show hand, quit)
//! - Think-range parsing for `--think-ms`
//!
//! ## Error Handling
//!
//! Parsing functions return custom enums (like `ParseResult`) or `Result`
//! types carrying a message that can be shown to the user as is.

/// Result type for parsing user input into a human move.
#[derive(Debug, PartialEq, Eq)]
pub enum ParseResult {
    /// Play the card at this 1-based position in the hand, then draw and end the turn
    Play(usize),
    /// Draw and end the turn without playing
    Draw,
    /// Show the hand again
    Hand,
    /// User entered quit command (q or quit)
    Quit,
    /// Invalid input with error message
    Invalid(String),
}

/// Parse user input string into a human move.
///
/// Accepts the following input formats (case-insensitive):
/// - "p N", "play N" or just "N" → play card N (1-based)
/// - "d" or "draw" → draw without playing
/// - "h" or "hand" → show hand
/// - "q" or "quit" → quit
///
/// `hand_size` bounds the accepted card positions.
///
/// # Example
///
/// ```rust
/// # use cincuentazo_cli::validation::{parse_human_move, ParseResult};
/// assert_eq!(parse_human_move("p 2", 4), ParseResult::Play(2));
/// assert_eq!(parse_human_move("3", 4), ParseResult::Play(3));
/// assert_eq!(parse_human_move("D", 4), ParseResult::Draw);
/// assert_eq!(parse_human_move("q", 4), ParseResult::Quit);
///
/// match parse_human_move("p 9", 4) {
///     ParseResult::Invalid(msg) => assert!(msg.contains("between 1 and 4")),
///     _ => panic!("Expected Invalid"),
/// }
/// ```
pub fn parse_human_move(input: &str, hand_size: usize) -> ParseResult {
    let input = input.trim().to_lowercase();
    let parts: Vec<&str> = input.split_whitespace().collect();

    if parts.is_empty() {
        return ParseResult::Invalid("Empty input".to_string());
    }

    match parts[0] {
        "q" | "quit" => ParseResult::Quit,
        "d" | "draw" => ParseResult::Draw,
        "h" | "hand" => ParseResult::Hand,
        "p" | "play" => match parts.get(1) {
            Some(n) => parse_position(n, hand_size),
            None => ParseResult::Invalid("Play requires a card number (e.g., 'p 1')".to_string()),
        },
        other if other.chars().all(|c| c.is_ascii_digit()) => parse_position(other, hand_size),
        other => ParseResult::Invalid(format!(
            "Unrecognized command '{}'. Valid commands: p <n>, <n>, d, h, q",
            other
        )),
    }
}

fn parse_position(raw: &str, hand_size: usize) -> ParseResult {
    match raw.parse::<usize>() {
        Ok(n) if (1..=hand_size).contains(&n) => ParseResult::Play(n),
        Ok(_) if hand_size == 0 => ParseResult::Invalid("Your hand is empty".to_string()),
        Ok(_) => ParseResult::Invalid(format!(
            "Card number must be between 1 and {}",
            hand_size
        )),
        Err(_) => ParseResult::Invalid(format!("Invalid card number '{}'", raw)),
    }
}

/// Machine thinking pause bounds in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThinkRange {
    pub min_ms: u64,
    pub max_ms: u64,
}

/// Parse a `--think-ms` value: either `MIN` (fixed pause) or `MIN-MAX`.
///
/// ```rust
/// # use cincuentazo_cli::validation::{parse_think_range, ThinkRange};
/// assert_eq!(parse_think_range("250").unwrap(), ThinkRange { min_ms: 250, max_ms: 250 });
/// assert_eq!(parse_think_range("100-400").unwrap(), ThinkRange { min_ms: 100, max_ms: 400 });
/// assert!(parse_think_range("400-100").is_err());
/// ```
pub fn parse_think_range(raw: &str) -> Result<ThinkRange, String> {
    let number = |s: &str| {
        s.trim()
            .parse::<u64>()
            .map_err(|_| format!("'{}' is not a number of milliseconds", s.trim()))
    };
    let (min_ms, max_ms) = match raw.split_once('-') {
        Some((min, max)) => (number(min)?, number(max)?),
        None => {
            let fixed = number(raw)?;
            (fixed, fixed)
        }
    };
    if min_ms > max_ms {
        return Err(format!("minimum {} exceeds maximum {}", min_ms, max_ms));
    }
    Ok(ThinkRange { min_ms, max_ms })
}
