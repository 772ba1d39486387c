use std::ops::{Deref, Index};

use rand::Rng;
use rand::seq::SliceRandom;

use super::{Card, CardBitSet};

/// `FlatDeck` is a deck of cards that allows easy
/// indexing into the cards. It does not provide
/// contains methods.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatDeck {
    /// Card storage.
    cards: Vec<Card>,
}

impl FlatDeck {
    /// Every card that isn't in `dead`, in id order.
    ///
    /// ```
    /// use holdem_equity::core::{CardBitSet, FlatDeck, parse_cards};
    ///
    /// let dead: CardBitSet = parse_cards("AcAd").unwrap().into_iter().collect();
    /// let deck = FlatDeck::without(dead);
    /// assert_eq!(50, deck.len());
    /// ```
    pub fn without(dead: CardBitSet) -> Self {
        (!dead).into()
    }

    /// How many cards are there in the deck ?
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Have all cards been dealt ?
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Choose `amount` cards uniformly without replacement, in random order.
    ///
    /// The cards are shuffled in place, so the deck stays a permutation of
    /// the same cards and can be sampled from again without being rebuilt.
    pub fn sample_in_place<R: Rng>(&mut self, rng: &mut R, amount: usize) -> &[Card] {
        let (chosen, _) = self.cards.partial_shuffle(rng, amount);
        chosen
    }
}

impl Deref for FlatDeck {
    type Target = [Card];

    fn deref(&self) -> &[Card] {
        &self.cards
    }
}

impl Index<usize> for FlatDeck {
    type Output = Card;
    fn index(&self, index: usize) -> &Card {
        &self.cards[index]
    }
}

impl From<Vec<Card>> for FlatDeck {
    fn from(value: Vec<Card>) -> Self {
        Self { cards: value }
    }
}

// Trait for converting a CardBitSet into a FlatDeck
// The bitset iterates in id order so the deck always starts out the same.
impl From<CardBitSet> for FlatDeck {
    fn from(value: CardBitSet) -> Self {
        value.into_iter().collect::<Vec<Card>>().into()
    }
}
