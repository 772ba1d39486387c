use std::fmt::Debug;
use std::ops::{BitAnd, BitOr, BitOrAssign, Not};

use super::{Card, Suit, Value};

/// This struct is a bitset for cards
/// Each card is represented by a bit in a 64 bit integer
///
/// The bit for a card is `card.id() - 1`, so walking the set from the
/// lowest bit visits cards in id order.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CardBitSet {
    // The bitset
    cards: u64,
}

const FIFTY_TWO_ONES: u64 = (1 << 52) - 1;

#[inline]
const fn bit(card: Card) -> u64 {
    1 << (card.id() - 1)
}

impl CardBitSet {
    /// Create a new empty bitset
    ///
    /// ```
    /// use holdem_equity::core::CardBitSet;
    /// let cards = CardBitSet::new();
    /// assert!(cards.is_empty());
    /// ```
    pub const fn new() -> Self {
        Self { cards: 0 }
    }

    /// Insert a card, returning `false` if it was already there.
    ///
    /// ```
    /// use holdem_equity::core::{Card, CardBitSet, Suit, Value};
    /// let mut cards = CardBitSet::new();
    ///
    /// assert!(cards.insert(Card::new(Value::Six, Suit::Club)));
    /// assert!(!cards.insert(Card::new(Value::Six, Suit::Club)));
    /// assert_eq!(1, cards.count());
    /// ```
    pub fn insert(&mut self, card: Card) -> bool {
        let present = self.contains(card);
        self.cards |= bit(card);
        !present
    }

    /// Remove a card from the bitset
    pub fn remove(&mut self, card: Card) {
        self.cards &= !bit(card);
    }

    /// Is the card in the bitset ?
    #[inline]
    pub const fn contains(&self, card: Card) -> bool {
        (self.cards & bit(card)) != 0
    }

    /// Is the bitset empty ?
    pub const fn is_empty(&self) -> bool {
        self.cards == 0
    }

    /// How many cards are in the bitset ?
    pub const fn count(&self) -> usize {
        self.cards.count_ones() as usize
    }

    /// 13 bit mask of the values held in one suit. Bit `n` is set when the
    /// card with value ordinal `n` is present.
    pub fn suit_mask(&self, suit: Suit) -> u16 {
        Value::values()
            .iter()
            .filter(|v| self.contains(Card::new(**v, suit)))
            .fold(0, |mask, v| mask | (1 << *v as u16))
    }

    /// How many cards of each value are in the set, indexed by value ordinal.
    pub fn value_counts(&self) -> [u8; 13] {
        let mut counts = [0u8; 13];
        for card in *self {
            counts[card.value as usize] += 1;
        }
        counts
    }
}

impl Default for CardBitSet {
    /// Create a new bitset with all the cards in it
    /// ```
    /// use holdem_equity::core::CardBitSet;
    ///
    /// let cards = CardBitSet::default();
    ///
    /// assert_eq!(52, cards.count());
    /// assert!(!cards.is_empty());
    /// ```
    fn default() -> Self {
        Self {
            cards: FIFTY_TWO_ONES,
        }
    }
}

impl Debug for CardBitSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(*self).finish()
    }
}

impl BitOr for CardBitSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self {
            cards: self.cards | rhs.cards,
        }
    }
}

impl BitOr<Card> for CardBitSet {
    type Output = Self;

    fn bitor(self, rhs: Card) -> Self::Output {
        Self {
            cards: self.cards | bit(rhs),
        }
    }
}

impl BitOrAssign<Card> for CardBitSet {
    fn bitor_assign(&mut self, rhs: Card) {
        self.cards |= bit(rhs);
    }
}

impl BitAnd for CardBitSet {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self {
            cards: self.cards & rhs.cards,
        }
    }
}

impl Not for CardBitSet {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self {
            cards: !self.cards & FIFTY_TWO_ONES, // Ensure we only keep the first 52 bits
        }
    }
}

impl FromIterator<Card> for CardBitSet {
    fn from_iter<T: IntoIterator<Item = Card>>(iter: T) -> Self {
        let mut set = Self::new();
        for card in iter {
            set.insert(card);
        }
        set
    }
}

/// The iterator for the CardBitSet
/// It iterates over the cards in the bitset in id order
pub struct CardBitSetIter(u64);

impl IntoIterator for CardBitSet {
    type Item = Card;
    type IntoIter = CardBitSetIter;

    fn into_iter(self) -> Self::IntoIter {
        CardBitSetIter(self.cards)
    }
}

impl Iterator for CardBitSetIter {
    type Item = Card;

    fn next(&mut self) -> Option<Self::Item> {
        if self.0 == 0 {
            return None;
        }

        let idx = self.0.trailing_zeros();
        self.0 &= !(1 << idx);

        Card::from_id(idx as u8 + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let cards = CardBitSet::new();
        assert!(cards.is_empty());
        assert_eq!(0, cards.into_iter().count());
    }

    #[test]
    fn test_insert_all() {
        let mut all_cards = CardBitSet::new();
        for card in Card::all() {
            let mut single_card = CardBitSet::new();

            assert!(single_card.insert(card));
            all_cards |= card;

            assert!(single_card.contains(card));
        }

        assert_eq!(all_cards.count(), 52);
        assert_eq!(CardBitSet::default(), all_cards);
    }

    #[test]
    fn test_iter_is_id_order() {
        let ids: Vec<u8> = CardBitSet::default().into_iter().map(Card::id).collect();
        let expected: Vec<u8> = (1..=52).collect();
        assert_eq!(expected, ids);
    }

    #[test]
    fn test_not_is_remaining_deck() {
        let dead: CardBitSet = [
            Card::new(Value::Ace, Suit::Club),
            Card::new(Value::King, Suit::Heart),
        ]
        .into_iter()
        .collect();
        let live = !dead;

        assert_eq!(50, live.count());
        assert!((live & dead).is_empty());
        assert_eq!(CardBitSet::default(), live | dead);
    }

    #[test]
    fn test_remove() {
        let mut cards = CardBitSet::default();
        let c = Card::new(Value::Nine, Suit::Spade);
        cards.remove(c);
        assert!(!cards.contains(c));
        assert_eq!(51, cards.count());
    }

    #[test]
    fn test_suit_mask_and_counts() {
        let cards: CardBitSet = [
            Card::new(Value::Two, Suit::Heart),
            Card::new(Value::Ace, Suit::Heart),
            Card::new(Value::Ace, Suit::Spade),
        ]
        .into_iter()
        .collect();

        assert_eq!(1 | (1 << 12), cards.suit_mask(Suit::Heart));
        assert_eq!(1 << 12, cards.suit_mask(Suit::Spade));
        assert_eq!(0, cards.suit_mask(Suit::Club));

        let counts = cards.value_counts();
        assert_eq!(2, counts[Value::Ace as usize]);
        assert_eq!(1, counts[Value::Two as usize]);
        assert_eq!(3, counts.iter().map(|c| *c as usize).sum::<usize>());
    }
}
