use std::fmt;

use super::InputError;

/// Card rank or value.
/// This is basically the face value - 2
#[derive(PartialEq, PartialOrd, Eq, Ord, Debug, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum Value {
    /// 2
    Two = 0,
    /// 3
    Three = 1,
    /// 4
    Four = 2,
    /// 5
    Five = 3,
    /// 6
    Six = 4,
    /// 7
    Seven = 5,
    /// 8
    Eight = 6,
    /// 9
    Nine = 7,
    /// T
    Ten = 8,
    /// J
    Jack = 9,
    /// Q
    Queen = 10,
    /// K
    King = 11,
    /// A
    Ace = 12,
}

/// Constant of all the values.
/// This is what `Value::values()` returns
const VALUES: [Value; 13] = [
    Value::Two,
    Value::Three,
    Value::Four,
    Value::Five,
    Value::Six,
    Value::Seven,
    Value::Eight,
    Value::Nine,
    Value::Ten,
    Value::Jack,
    Value::Queen,
    Value::King,
    Value::Ace,
];

impl Value {
    /// Take a u8 ordinal and convert it to a value.
    /// Anything past the ace is `None`.
    pub fn from_u8(v: u8) -> Option<Self> {
        VALUES.get(v as usize).copied()
    }

    /// Get all of the `Value`'s that are possible, from two up to ace.
    pub const fn values() -> [Self; 13] {
        VALUES
    }

    /// Parse the usual single character notation.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'A' => Some(Self::Ace),
            'K' => Some(Self::King),
            'Q' => Some(Self::Queen),
            'J' => Some(Self::Jack),
            'T' => Some(Self::Ten),
            '9' => Some(Self::Nine),
            '8' => Some(Self::Eight),
            '7' => Some(Self::Seven),
            '6' => Some(Self::Six),
            '5' => Some(Self::Five),
            '4' => Some(Self::Four),
            '3' => Some(Self::Three),
            '2' => Some(Self::Two),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Self::Ace => 'A',
            Self::King => 'K',
            Self::Queen => 'Q',
            Self::Jack => 'J',
            Self::Ten => 'T',
            Self::Nine => '9',
            Self::Eight => '8',
            Self::Seven => '7',
            Self::Six => '6',
            Self::Five => '5',
            Self::Four => '4',
            Self::Three => '3',
            Self::Two => '2',
        }
    }
}

/// Enum for the four different suits.
/// While this has support for ordering it's not
/// sensical. The sorting is only there to allow sorting cards.
#[derive(PartialEq, PartialOrd, Eq, Ord, Debug, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum Suit {
    /// Clubs
    Club = 0,
    /// Diamonds
    Diamond = 1,
    /// Hearts
    Heart = 2,
    /// Spades
    Spade = 3,
}

/// All of the `Suit`'s. This is what `Suit::suits()` returns.
const SUITS: [Suit; 4] = [Suit::Club, Suit::Diamond, Suit::Heart, Suit::Spade];

impl Suit {
    /// Provide all the Suit's that there are.
    pub const fn suits() -> [Self; 4] {
        SUITS
    }

    pub fn from_u8(s: u8) -> Option<Self> {
        SUITS.get(s as usize).copied()
    }

    pub fn from_char(s: char) -> Option<Self> {
        match s {
            'c' => Some(Self::Club),
            'd' => Some(Self::Diamond),
            'h' => Some(Self::Heart),
            's' => Some(Self::Spade),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Self::Club => 'c',
            Self::Diamond => 'd',
            Self::Heart => 'h',
            Self::Spade => 's',
        }
    }
}

/// The main struct of this library.
/// This is a carrier for Suit and Value combined.
#[derive(PartialEq, PartialOrd, Eq, Ord, Debug, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct Card {
    /// The face value of this card.
    pub value: Value,
    /// The suit of this card.
    pub suit: Suit,
}

impl Card {
    pub const fn new(value: Value, suit: Suit) -> Self {
        Self { value, suit }
    }

    /// Dense id in `1..=52`, `1 + suit + 4 * value`.
    ///
    /// This is the offset the lookup table adds to a handle's index, so
    /// it has to stay exactly this formula.
    ///
    /// ```
    /// use holdem_equity::core::{Card, Suit, Value};
    ///
    /// assert_eq!(1, Card::new(Value::Two, Suit::Club).id());
    /// assert_eq!(52, Card::new(Value::Ace, Suit::Spade).id());
    /// ```
    #[inline]
    pub const fn id(self) -> u8 {
        1 + self.suit as u8 + 4 * self.value as u8
    }

    /// Inverse of [`Card::id`].
    pub fn from_id(id: u8) -> Option<Self> {
        if !(1..=52).contains(&id) {
            return None;
        }
        let idx = id - 1;
        Some(Self {
            value: Value::from_u8(idx / 4)?,
            suit: Suit::from_u8(idx % 4)?,
        })
    }

    /// All 52 cards in id order.
    pub fn all() -> impl Iterator<Item = Card> {
        (1..=52).filter_map(Card::from_id)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value.to_char(), self.suit.to_char())
    }
}

impl TryFrom<&str> for Card {
    type Error = InputError;

    /// Parse a two character card like `"Ac"` or `"Td"`.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let cards = parse_cards(value)?;
        match cards.as_slice() {
            [card] => Ok(*card),
            [] => Err(InputError::TooFewChars),
            _ => Err(InputError::UnparsedCharsRemaining),
        }
    }
}

/// Parse a run of cards such as `"AcKd"` or `"Qc Jc Tc"`.
///
/// Whitespace between cards is skipped. Duplicates are not rejected here;
/// the equity calculator checks that when it validates its input.
///
/// ```
/// use holdem_equity::core::{Card, Suit, Value, parse_cards};
///
/// let cards = parse_cards("Ac Kd").unwrap();
/// assert_eq!(
///     vec![
///         Card::new(Value::Ace, Suit::Club),
///         Card::new(Value::King, Suit::Diamond)
///     ],
///     cards
/// );
/// ```
pub fn parse_cards(s: &str) -> Result<Vec<Card>, InputError> {
    let mut chars = s.chars().filter(|c| !c.is_whitespace());
    let mut cards = Vec::new();
    while let Some(vc) = chars.next() {
        let value = Value::from_char(vc).ok_or(InputError::UnexpectedValueChar(vc))?;
        let sc = chars.next().ok_or(InputError::TooFewChars)?;
        let suit = Suit::from_char(sc).ok_or(InputError::UnexpectedSuitChar(sc))?;
        cards.push(Card { value, suit });
    }
    Ok(cards)
}
