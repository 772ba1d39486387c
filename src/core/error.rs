use thiserror::Error;

use super::Card;

/// The lookup table couldn't be turned into an evaluator.
///
/// The table is a static asset, so any of these means the evaluator was
/// misconfigured. Nothing is retried and no evaluator is built.
#[derive(Error, Debug)]
pub enum TableError {
    #[error("Lookup table must hold {expected} entries, found {found}")]
    WrongLength { expected: usize, found: usize },
    #[error("Lookup table byte length {0} is not a multiple of 4")]
    MisalignedBytes(usize),
    #[error("Unable to read the lookup table")]
    Io(#[from] std::io::Error),
}

/// The caller handed over something the calculator can't work with.
///
/// These are caller bugs and are reported before any work is done.
#[derive(Error, Debug, Hash, PartialEq, Eq)]
pub enum InputError {
    #[error("Unable to parse value from '{0}'")]
    UnexpectedValueChar(char),
    #[error("Unable to parse suit from '{0}'")]
    UnexpectedSuitChar(char),
    #[error("Error reading characters while parsing")]
    TooFewChars,
    #[error("Extra un-used characters found after parsing")]
    UnparsedCharsRemaining,
    #[error("Holdem hands must have exactly 2 cards, found {0}")]
    HeroHandSize(usize),
    #[error("Holdem boards can have 0 to 5 cards, found {0}")]
    BoardSize(usize),
    #[error("Opponent hand {index} must have exactly 2 cards, found {size}")]
    OpponentHandSize { index: usize, size: usize },
    #[error("At least one opponent is needed to calculate equity")]
    NoOpponents,
    #[error("Card {0} appears more than once")]
    DuplicateCard(Card),
    #[error("Need {needed} unknown cards but only {available} are left in the deck")]
    NotEnoughCards { needed: usize, available: usize },
}
