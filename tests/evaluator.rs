use std::sync::OnceLock;

use holdem_equity::core::{Card, HandCategory, HandRank, parse_cards};
use holdem_equity::evaluator::{DirectEvaluator, HandEvaluator, LookupTableEvaluator};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// The real table is big, so tests against it only run when
/// `HAND_RANKS_PATH` points at a copy.
fn table() -> Option<&'static LookupTableEvaluator> {
    static TABLE: OnceLock<Option<LookupTableEvaluator>> = OnceLock::new();
    TABLE
        .get_or_init(|| {
            let path = std::env::var_os("HAND_RANKS_PATH")?;
            Some(LookupTableEvaluator::open(path).expect("HAND_RANKS_PATH should be a valid table"))
        })
        .as_ref()
}

const CATEGORY_HANDS: [(&str, HandCategory, HandCategory); 9] = [
    ("2c 4c 6d 8d Th Qh As", HandCategory::HighCard, HandCategory::HighCard),
    ("2c 4c 6d Td Th Qh As", HandCategory::OnePair, HandCategory::OnePair),
    ("2c 2d Qd Td Th Qh As", HandCategory::TwoPair, HandCategory::TwoPair),
    ("2c 2d 2h 8d Th Qh As", HandCategory::ThreeOfAKind, HandCategory::ThreeOfAKind),
    ("Ac 2c 3d 4d 5h 6h 7s", HandCategory::Straight, HandCategory::Straight),
    ("2s 4s 6s 8s Ts Qs As", HandCategory::Flush, HandCategory::Flush),
    // Two pair until the third two shows up.
    ("2c 2d 8h 8d Th 2h 8s", HandCategory::TwoPair, HandCategory::FullHouse),
    ("2c 2d 2h 2s Th Qh As", HandCategory::FourOfAKind, HandCategory::FourOfAKind),
    ("8c 9c Tc Jc Qc Kc Ac", HandCategory::StraightFlush, HandCategory::StraightFlush),
];

/// Fold the cards in one at a time and check the rank at 5, 6 and 7 cards.
fn check_categories<E: HandEvaluator>(eval: &E) {
    for (hand, at_five, after) in CATEGORY_HANDS {
        let cards = parse_cards(hand).unwrap();
        let mut handle = eval.empty();
        for card in &cards[..5] {
            handle = eval.add_card(handle, *card);
        }
        let rank5 = eval.finalize(handle).unwrap();
        assert_eq!(at_five, rank5.category(), "{hand}");

        handle = eval.add_card(handle, cards[5]);
        let rank6 = eval.finalize(handle).unwrap();
        assert_eq!(after, rank6.category(), "{hand}");
        assert!(rank6 > rank5, "{hand}");

        handle = eval.add_card(handle, cards[6]);
        let rank7 = eval.finalize(handle).unwrap();
        assert_eq!(after, rank7.category(), "{hand}");
        assert!(rank7 > rank6, "{hand}");
    }
}

fn check_order_independence<E: HandEvaluator>(eval: &E) {
    let mut rng = StdRng::seed_from_u64(3);
    let mut deck: Vec<Card> = Card::all().collect();
    for _ in 0..2_000 {
        deck.shuffle(&mut rng);
        let mut hand = deck[..7].to_vec();
        let rank = eval.evaluate(&hand);
        assert!(rank.is_some());
        hand.shuffle(&mut rng);
        assert_eq!(rank, eval.evaluate(&hand), "{hand:?}");
        hand.reverse();
        assert_eq!(rank, eval.evaluate(&hand), "{hand:?}");
    }
}

fn check_no_rank_boundary<E: HandEvaluator>(eval: &E) {
    let cards = parse_cards("As Kd 9h 7c 4s 3d 2h").unwrap();
    let mut handle = eval.empty();
    assert_eq!(None, eval.finalize(handle));
    for (i, card) in cards.iter().enumerate() {
        handle = eval.add_card(handle, *card);
        let ranked = eval.finalize(handle).is_some();
        assert_eq!(i >= 4, ranked, "{} cards", i + 1);
    }
}

fn check_ordering<E: HandEvaluator>(eval: &E) {
    let rank = |s: &str| -> HandRank { eval.evaluate(&parse_cards(s).unwrap()).unwrap() };
    let ladder = [
        "7h 5d 4c 3s 2h",
        "Ah Kd Qc Js 9h",
        "2h 2d 3c 4s 5h 9c",
        "Ah Ad Kc Qs Jh",
        "3h 3d 2c 2s 4h",
        "Ah Ad Kc Ks Qh",
        "2h 2d 2c 3s 4h",
        "Ah Ad Ac Ks Qh",
        "Ah 2d 3c 4s 5h",
        "Ah Kd Qc Js Th",
        "2h 4h 5h 6h 7h",
        "Ah Kh Qh Jh 9h",
        "2h 2d 2c 3s 3h",
        "Ah Ad Ac Ks Kh",
        "2h 2d 2c 2s 3h",
        "Ah Ad Ac As Kh",
        "Ah 2h 3h 4h 5h",
        "Ah Kh Qh Jh Th",
    ];
    for pair in ladder.windows(2) {
        assert!(rank(pair[1]) > rank(pair[0]), "{} should beat {}", pair[1], pair[0]);
    }

    // Same hand in different suits.
    assert_eq!(rank("Ah Kh Qh Jh Th"), rank("As Ks Qs Js Ts"));
    assert_eq!(rank("Ah Ad 7c 5s 2h"), rank("As Ac 7d 5h 2c"));
}

#[test]
fn test_direct_categories() {
    check_categories(&DirectEvaluator);
}

#[test]
fn test_direct_order_independence() {
    check_order_independence(&DirectEvaluator);
}

#[test]
fn test_direct_no_rank_boundary() {
    check_no_rank_boundary(&DirectEvaluator);
}

#[test]
fn test_direct_ordering() {
    check_ordering(&DirectEvaluator);
}

#[test]
fn test_table_categories() {
    let Some(eval) = table() else {
        eprintln!("HAND_RANKS_PATH not set, skipping");
        return;
    };
    check_categories(eval);
    check_no_rank_boundary(eval);
    check_ordering(eval);
}

#[test]
fn test_table_order_independence() {
    let Some(eval) = table() else {
        eprintln!("HAND_RANKS_PATH not set, skipping");
        return;
    };
    check_order_independence(eval);
}

#[test]
fn test_table_agrees_with_direct() {
    let Some(eval) = table() else {
        eprintln!("HAND_RANKS_PATH not set, skipping");
        return;
    };
    let mut rng = StdRng::seed_from_u64(11);
    let mut deck: Vec<Card> = Card::all().collect();
    let hands: Vec<Vec<Card>> = (0..5_000)
        .map(|i| {
            deck.shuffle(&mut rng);
            deck[..5 + i % 3].to_vec()
        })
        .collect();

    for hand in &hands {
        let table_rank = eval.evaluate(hand).unwrap();
        let direct_rank = DirectEvaluator.evaluate(hand).unwrap();
        assert_eq!(direct_rank.category(), table_rank.category(), "{hand:?}");
    }
    // Both evaluators have to order every pair of hands the same way.
    for pair in hands.windows(2) {
        let by_table = eval.evaluate(&pair[0]).cmp(&eval.evaluate(&pair[1]));
        let by_direct = DirectEvaluator
            .evaluate(&pair[0])
            .cmp(&DirectEvaluator.evaluate(&pair[1]));
        assert_eq!(by_direct, by_table, "{:?} vs {:?}", pair[0], pair[1]);
    }
}
