#![no_main]

extern crate arbitrary;
extern crate holdem_equity;
extern crate libfuzzer_sys;

use holdem_equity::core::{Card, CardBitSet};
use holdem_equity::evaluator::{DirectEvaluator, HandEvaluator};

use libfuzzer_sys::fuzz_target;

#[derive(Debug, Clone, arbitrary::Arbitrary)]
struct Input {
    pub cards: Vec<Card>,
    pub rotate: usize,
}

fuzz_target!(|input: Input| {
    // Only distinct cards make a real hand.
    let mut seen = CardBitSet::new();
    let cards: Vec<Card> = input
        .cards
        .into_iter()
        .filter(|c| seen.insert(*c))
        .take(7)
        .collect();

    let rank = DirectEvaluator.evaluate(&cards);
    assert_eq!(rank.is_some(), (5..=7).contains(&cards.len()));

    let mut reordered = cards.clone();
    if !reordered.is_empty() {
        let by = input.rotate % reordered.len();
        reordered.rotate_left(by);
    }
    reordered.reverse();
    assert_eq!(rank, DirectEvaluator.evaluate(&reordered));
});
