use super::HandEvaluator;
use crate::core::{Card, CardBitSet, HandCategory, HandRank, Suit};

/// Ranks hands straight from the cards without any lookup table.
///
/// The handle is just the set of cards seen so far, and all the work
/// happens in [`HandEvaluator::finalize`]. That makes it a lot slower than
/// [`super::LookupTableEvaluator`] per hand, but it needs no asset and
/// produces ranks in the same `category << 12 | sub_rank` encoding.
///
/// Sub ranks are dense within each category. Kickers are ranked through the
/// combinatorial number system, which orders sets of values by their highest
/// value first, then the next, and so on: exactly how poker kickers compare.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectEvaluator;

impl HandEvaluator for DirectEvaluator {
    type Handle = CardBitSet;

    fn empty(&self) -> CardBitSet {
        CardBitSet::new()
    }

    #[inline]
    fn add_card(&self, handle: CardBitSet, card: Card) -> CardBitSet {
        handle | card
    }

    fn finalize(&self, handle: CardBitSet) -> Option<HandRank> {
        match handle.count() {
            5..=7 => rank_cards(handle),
            _ => None,
        }
    }
}

/// Value ordinal of the five in a wheel, which plays as the high card.
const WHEEL_HIGH: u16 = 3;
/// A, 2, 3, 4, 5
const WHEEL: u16 = (1 << 12) | 0b1111;

/// Binomial coefficient for the small numbers kicker ranking needs.
const fn choose(n: u16, k: u16) -> u16 {
    if k > n {
        return 0;
    }
    let mut result: u32 = 1;
    let mut i = 0;
    while i < k {
        result = result * (n - i) as u32 / (i + 1) as u32;
        i += 1;
    }
    result as u16
}

/// Position of a set of distinct values (highest first) in colex order.
fn colex(desc: &[u16]) -> u16 {
    let k = desc.len() as u16;
    desc.iter()
        .zip((1..=k).rev())
        .map(|(v, slots)| choose(*v, slots))
        .sum()
}

/// The top `n` values in a 13 bit value mask, highest first.
fn top_values(mask: u16, n: usize) -> Vec<u16> {
    (0..13u16)
        .rev()
        .filter(|v| mask & (1 << v) != 0)
        .take(n)
        .collect()
}

/// High card of the best straight in a value mask.
fn straight_high(mask: u16) -> Option<u16> {
    (4..=12u16)
        .rev()
        .find(|high| {
            let run = 0x1F << (high - 4);
            mask & run == run
        })
        .or_else(|| (mask & WHEEL == WHEEL).then_some(WHEEL_HIGH))
}

fn rank(category: HandCategory, sub_rank: u16) -> Option<HandRank> {
    HandRank::new(category, sub_rank)
}

/// Best five card rank out of 5 to 7 cards.
fn rank_cards(cards: CardBitSet) -> Option<HandRank> {
    // At most one suit can hold five of seven cards.
    if let Some(flush) = Suit::suits()
        .into_iter()
        .map(|s| cards.suit_mask(s))
        .find(|mask| mask.count_ones() >= 5)
    {
        // Nothing that can share seven cards with a flush beats one except
        // a straight flush.
        return match straight_high(flush) {
            Some(high) => rank(HandCategory::StraightFlush, high),
            None => rank(HandCategory::Flush, colex(&top_values(flush, 5))),
        };
    }

    let counts = cards.value_counts();
    let with_count = |n: u8| -> Vec<u16> {
        (0..13u16)
            .rev()
            .filter(|v| counts[*v as usize] == n)
            .collect()
    };
    let value_mask = (0..13u16)
        .filter(|v| counts[*v as usize] > 0)
        .fold(0u16, |m, v| m | (1 << v));
    // Highest value present that isn't one of `skip`.
    let best_other = |skip: &[u16]| -> u16 {
        top_values(value_mask, 5)
            .into_iter()
            .find(|v| !skip.contains(v))
            .unwrap_or(0)
    };

    let quads = with_count(4);
    let trips = with_count(3);
    let pairs = with_count(2);
    let singles = with_count(1);

    if let Some(&q) = quads.first() {
        return rank(HandCategory::FourOfAKind, q * 13 + best_other(&[q]));
    }

    if let Some(&t) = trips.first() {
        // A second set of trips plays as the pair.
        let pair = trips.get(1).copied().max(pairs.first().copied());
        if let Some(p) = pair {
            return rank(HandCategory::FullHouse, t * 13 + p);
        }
    }

    if let Some(high) = straight_high(value_mask) {
        return rank(HandCategory::Straight, high);
    }

    if let Some(&t) = trips.first() {
        return rank(
            HandCategory::ThreeOfAKind,
            t * 78 + colex(&singles[..2.min(singles.len())]),
        );
    }

    match pairs.as_slice() {
        [high, low, ..] => rank(
            HandCategory::TwoPair,
            colex(&[*high, *low]) * 13 + best_other(&[*high, *low]),
        ),
        [p] => rank(
            HandCategory::OnePair,
            p * 286 + colex(&singles[..3.min(singles.len())]),
        ),
        [] => rank(
            HandCategory::HighCard,
            colex(&singles[..5.min(singles.len())]),
        ),
    }
}
