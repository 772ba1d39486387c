//! # holdem_equity
//!
//! Hand ranking and equity estimation for Texas hold'em.
//!
//! Hands are ranked incrementally: every card is folded into a small
//! [`core::HandHandle`] with one array read against a precomputed
//! perfect-hash transition table, and the handle is finalized into a
//! [`core::HandRank`] once it holds 5, 6, or 7 cards. Because handles are
//! plain values, a board prefix can be folded once and then extended by
//! every player that shares it.
//!
//! On top of the evaluator sits [`holdem::EquityCalculator`], which averages
//! the hero's share of the pot over every way the unknown cards can fall,
//! switching to Monte Carlo sampling once the exact enumeration would grow
//! past a configurable threshold.
//!
//! ```no_run
//! use holdem_equity::core::parse_cards;
//! use holdem_equity::evaluator::LookupTableEvaluator;
//! use holdem_equity::holdem::EquityCalculator;
//!
//! let evaluator = LookupTableEvaluator::open("HandRanks.dat").unwrap();
//! let calculator = EquityCalculator::new(evaluator);
//!
//! let hero = parse_cards("AcAd").unwrap();
//! let equity = calculator.equity_vs_random(&hero, &[], 1).unwrap();
//! assert!(equity > 0.8);
//! ```
//!
//! When the table asset isn't around, [`evaluator::DirectEvaluator`] ranks
//! hands straight from the cards with the same rank encoding.

/// Cards, card sets, hand ranks and evaluation handles. Everything in here
/// is agnostic to how a hand gets ranked.
pub mod core;
/// Hand evaluators: the lookup table automaton and a table free fallback.
pub mod evaluator;
/// Holdem equity estimation.
pub mod holdem;
