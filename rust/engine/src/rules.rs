use crate::cards::{Card, Rank};
use crate::errors::{GameError, IllegalMoveReason};

/// Ceiling the running sum may never exceed.
pub const MAX_SUM: i32 = 50;
/// Cards dealt to each player at the start of a match.
pub const HAND_SIZE: usize = 4;
pub const MIN_MACHINES: usize = 1;
pub const MAX_MACHINES: usize = 3;

const ACE_LOW: i32 = 1;
const ACE_HIGH: i32 = 10;

/// Context-free point value of a rank.
///
/// 2–8 and 10 count their face value, 9 counts 0, J/Q/K count −10 and the Ace
/// has a base value of 1 (see [`optimal_ace_value`] for its played value).
pub fn value(rank: Rank) -> i32 {
    match rank {
        Rank::Two => 2,
        Rank::Three => 3,
        Rank::Four => 4,
        Rank::Five => 5,
        Rank::Six => 6,
        Rank::Seven => 7,
        Rank::Eight => 8,
        Rank::Nine => 0,
        Rank::Ten => 10,
        Rank::Jack | Rank::Queen | Rank::King => -10,
        Rank::Ace => ACE_LOW,
    }
}

/// Value applied to an Ace played on `current_sum`: 10 whenever that keeps the
/// sum within the ceiling, otherwise 1.
///
/// Always greedy: the low value is never held back to leave room for later
/// plays.
pub fn optimal_ace_value(current_sum: i32) -> i32 {
    if current_sum + ACE_HIGH <= MAX_SUM {
        ACE_HIGH
    } else {
        ACE_LOW
    }
}

/// Value a card contributes when played on `current_sum`.
pub fn contextual_value(card: Card, current_sum: i32) -> i32 {
    match card.rank {
        Rank::Ace => optimal_ace_value(current_sum),
        rank => value(rank),
    }
}

/// A card is legal if some interpretation of it keeps the sum within
/// [`MAX_SUM`]. For the Ace either the low or the high value suffices.
pub fn is_legal_play(card: Card, current_sum: i32) -> bool {
    match card.rank {
        Rank::Ace => current_sum + ACE_LOW <= MAX_SUM || current_sum + ACE_HIGH <= MAX_SUM,
        rank => current_sum + value(rank) <= MAX_SUM,
    }
}

/// Validates a proposed play and returns the value that will be applied.
///
/// # Errors
///
/// Returns [`GameError::IllegalMove`] with [`IllegalMoveReason::ExceedsLimit`]
/// when the card would push the sum above [`MAX_SUM`].
///
/// # Examples
///
/// ```
/// use cincuentazo_engine::cards::{Card, Rank, Suit};
/// use cincuentazo_engine::rules::validate_play;
///
/// let ace = Card::new(Rank::Ace, Suit::Hearts);
/// assert_eq!(validate_play(ace, 38), Ok(10));
/// assert_eq!(validate_play(ace, 45), Ok(1));
///
/// let ten = Card::new(Rank::Ten, Suit::Clubs);
/// assert!(validate_play(ten, 45).is_err());
/// ```
pub fn validate_play(card: Card, current_sum: i32) -> Result<i32, GameError> {
    let applied = contextual_value(card, current_sum);
    if is_legal_play(card, current_sum) {
        Ok(applied)
    } else {
        Err(GameError::IllegalMove {
            card,
            reason: IllegalMoveReason::ExceedsLimit {
                current_sum,
                value: applied,
            },
        })
    }
}
