//! This is the core module. It exports the cards, the card sets, and the
//! hand rank types that every evaluator shares.

/// card.rs has value and suit.
mod card;
/// Re-export Card, Value, and Suit
pub use self::card::{Card, Suit, Value, parse_cards};

/// 52 bit card set
mod card_bit_set;
/// Export `CardBitSet` and its iterator
pub use self::card_bit_set::{CardBitSet, CardBitSetIter};

/// Flattened deck
mod flat_deck;
/// Export `FlatDeck`
pub use self::flat_deck::FlatDeck;

/// Errors for the table and for caller input.
mod error;
/// Export the error types.
pub use self::error::{InputError, TableError};

/// Category and sub rank of a finished hand.
mod hand_rank;
/// Export the rank types.
pub use self::hand_rank::{HandCategory, HandRank};

/// Running state of a hand being folded into the lookup table.
mod handle;
/// Export `HandHandle`
pub use self::handle::HandHandle;
