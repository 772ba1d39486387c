use crate::core::{Card, HandRank};

/// The precomputed perfect hash automaton.
mod lookup_table;
/// Export the table evaluator and its expected size.
pub use self::lookup_table::{LookupTableEvaluator, TABLE_LEN};

/// Ranking straight from the cards, no table needed.
mod direct;
/// Export `DirectEvaluator`
pub use self::direct::DirectEvaluator;

/// Something that can rank a hand one card at a time.
///
/// A hand starts as [`HandEvaluator::empty`], every card is folded in once
/// with [`HandEvaluator::add_card`], and [`HandEvaluator::finalize`] turns
/// the result into a rank once there are 5, 6, or 7 cards. The order the
/// cards are added in never changes the final rank.
///
/// Handles are `Copy`, so a partial hand (a board, say) can be extended in
/// several directions without one extension seeing another.
pub trait HandEvaluator: Send + Sync {
    /// Running state of a partial hand.
    type Handle: Copy + Send + Sync;

    /// Handle for a hand without any cards.
    fn empty(&self) -> Self::Handle;

    /// Fold one more card into the hand. Each card may only be added once.
    fn add_card(&self, handle: Self::Handle, card: Card) -> Self::Handle;

    /// Rank of the hand so far, `None` unless it holds 5, 6, or 7 cards.
    fn finalize(&self, handle: Self::Handle) -> Option<HandRank>;

    /// Fold a run of cards into the hand.
    fn add_cards(&self, handle: Self::Handle, cards: &[Card]) -> Self::Handle {
        cards
            .iter()
            .fold(handle, |handle, card| self.add_card(handle, *card))
    }

    /// Rank a whole hand at once.
    fn evaluate(&self, cards: &[Card]) -> Option<HandRank> {
        self.finalize(self.add_cards(self.empty(), cards))
    }
}

impl<E: HandEvaluator + ?Sized> HandEvaluator for &E {
    type Handle = E::Handle;

    fn empty(&self) -> Self::Handle {
        (**self).empty()
    }

    fn add_card(&self, handle: Self::Handle, card: Card) -> Self::Handle {
        (**self).add_card(handle, card)
    }

    fn finalize(&self, handle: Self::Handle) -> Option<HandRank> {
        (**self).finalize(handle)
    }
}
