use std::fmt;

/// All the different possible hand categories, weakest first.
///
/// The discriminants are the category numbers stored in the top bits of an
/// encoded rank, which is why they start at one: a zero category is what an
/// unfinished table entry decodes to.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum HandCategory {
    /// The lowest rank.
    /// No matches
    HighCard = 1,
    /// One Card matches another.
    OnePair = 2,
    /// Two different pair of matching cards.
    TwoPair = 3,
    /// Three of the same value.
    ThreeOfAKind = 4,
    /// Five cards in a sequence
    Straight = 5,
    /// Five cards of the same suit
    Flush = 6,
    /// Three of one value and two of another value
    FullHouse = 7,
    /// Four of the same value.
    FourOfAKind = 8,
    /// Five cards in a sequence all of the same suit.
    StraightFlush = 9,
}

impl HandCategory {
    /// Every category from weakest to strongest.
    pub const ALL: [HandCategory; 9] = [
        HandCategory::HighCard,
        HandCategory::OnePair,
        HandCategory::TwoPair,
        HandCategory::ThreeOfAKind,
        HandCategory::Straight,
        HandCategory::Flush,
        HandCategory::FullHouse,
        HandCategory::FourOfAKind,
        HandCategory::StraightFlush,
    ];

    pub fn from_u16(v: u16) -> Option<Self> {
        Self::ALL.get((v as usize).checked_sub(1)?).copied()
    }
}

/// Strength of a finished 5 to 7 card hand.
///
/// Ranks compare category first and then sub rank, so a higher category
/// always wins no matter the sub rank. Two ranks are equal only when both
/// parts match, which is what decides a split pot.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HandRank {
    category: HandCategory,
    sub_rank: u16,
}

impl HandRank {
    /// Sub ranks are 12 bits wide.
    pub const SUB_RANK_MASK: u16 = 0xFFF;

    /// Build a rank from its parts. `None` if the sub rank doesn't fit in
    /// 12 bits.
    pub fn new(category: HandCategory, sub_rank: u16) -> Option<Self> {
        (sub_rank <= Self::SUB_RANK_MASK).then_some(Self { category, sub_rank })
    }

    /// Decode `category << 12 | sub_rank`.
    ///
    /// Anything whose category isn't one of the nine known ones, including
    /// negative values and values past 16 bits, is not a rank. That's what
    /// a handle finalized at the wrong card count looks like, so it's
    /// reported as `None` rather than as an error.
    ///
    /// ```
    /// use holdem_equity::core::{HandCategory, HandRank};
    ///
    /// let rank = HandRank::from_value(9 * 4096 + 10).unwrap();
    /// assert_eq!(HandCategory::StraightFlush, rank.category());
    /// assert_eq!(10, rank.sub_rank());
    ///
    /// assert!(HandRank::from_value(0).is_none());
    /// assert!(HandRank::from_value(10 * 4096).is_none());
    /// ```
    pub fn from_value(value: i32) -> Option<Self> {
        let value = u16::try_from(value).ok()?;
        let category = HandCategory::from_u16(value >> 12)?;
        Some(Self {
            category,
            sub_rank: value & Self::SUB_RANK_MASK,
        })
    }

    /// The packed `category << 12 | sub_rank` form.
    pub fn value(&self) -> u16 {
        ((self.category as u16) << 12) | self.sub_rank
    }

    pub fn category(&self) -> HandCategory {
        self.category
    }

    pub fn sub_rank(&self) -> u16 {
        self.sub_rank
    }
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self.category, self.sub_rank)
    }
}
