use std::iter::Sum;
use std::ops::Add;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::{Level, event};

use super::config::{EquityConfig, OpponentPairing, Strategy, n_choose_k};
use super::draws::{CardIter, RandomDraws, for_each_partition};
use crate::core::{Card, CardBitSet, FlatDeck, InputError};
use crate::evaluator::HandEvaluator;

/// Random draws handed to one worker at a time.
const SAMPLES_PER_CHUNK: usize = 10_000;
const BOARD_SIZE: usize = 5;

/// The result of an equity calculation along with how it was reached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    /// Hero's expected share of the pot, in `[0, 1]`.
    pub equity: f64,
    /// How many draws were scored.
    pub instances: u64,
    /// `true` when every possible draw was scored, `false` when sampled.
    pub exact: bool,
}

/// Running total of pot shares.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Tally {
    share: f64,
    instances: u64,
}

impl Tally {
    fn of<I, F>(draws: I, score: &F) -> Self
    where
        I: Iterator<Item = Vec<Card>>,
        F: Fn(&[Card]) -> f64,
    {
        draws.fold(Tally::default(), |tally, draw| Tally {
            share: tally.share + score(&draw),
            instances: tally.instances + 1,
        })
    }

    fn estimate(self, exact: bool) -> Estimate {
        let equity = if self.instances == 0 {
            0.0
        } else {
            self.share / self.instances as f64
        };
        Estimate {
            equity,
            instances: self.instances,
            exact,
        }
    }
}

impl Add for Tally {
    type Output = Tally;

    fn add(self, other: Tally) -> Tally {
        Tally {
            share: self.share + other.share,
            instances: self.instances + other.instances,
        }
    }
}

impl Sum for Tally {
    fn sum<I: Iterator<Item = Tally>>(iter: I) -> Tally {
        iter.fold(Tally::default(), Add::add)
    }
}

/// Hero's share of the pot once every card is known.
///
/// Each player's hand is folded onto the same `board` handle. Players whose
/// hand doesn't rank are left out, and a hero without a rank gets nothing.
fn showdown<'a, E, I>(evaluator: &E, board: E::Handle, hero: &[Card], opponents: I) -> f64
where
    E: HandEvaluator,
    I: IntoIterator<Item = &'a [Card]>,
{
    let Some(hero_rank) = evaluator.finalize(evaluator.add_cards(board, hero)) else {
        return 0.0;
    };
    let mut tied = 0u32;
    for hand in opponents {
        match evaluator.finalize(evaluator.add_cards(board, hand)) {
            Some(rank) if rank > hero_rank => return 0.0,
            Some(rank) if rank == hero_rank => tied += 1,
            _ => {}
        }
    }
    1.0 / f64::from(tied + 1)
}

/// Checks that the hands and board are a legal deal and returns every
/// card that is already taken.
fn validate<H: AsRef<[Card]>>(
    hero: &[Card],
    board: &[Card],
    opponents: &[H],
) -> Result<CardBitSet, InputError> {
    if hero.len() != 2 {
        return Err(InputError::HeroHandSize(hero.len()));
    }
    if board.len() > BOARD_SIZE {
        return Err(InputError::BoardSize(board.len()));
    }
    for (index, hand) in opponents.iter().enumerate() {
        let size = hand.as_ref().len();
        if size != 2 {
            return Err(InputError::OpponentHandSize { index, size });
        }
    }

    let mut dead = CardBitSet::new();
    let known = hero
        .iter()
        .chain(board)
        .chain(opponents.iter().flat_map(|h| h.as_ref()));
    for card in known {
        if !dead.insert(*card) {
            return Err(InputError::DuplicateCard(*card));
        }
    }
    Ok(dead)
}

fn ensure_deck(deck: &FlatDeck, needed: usize) -> Result<(), InputError> {
    if needed > deck.len() {
        return Err(InputError::NotEnoughCards {
            needed,
            available: deck.len(),
        });
    }
    Ok(())
}

fn rejected<T>(result: Result<T, InputError>) -> Result<T, InputError> {
    if let Err(error) = &result {
        event!(Level::DEBUG, %error, "rejected_equity_input");
    }
    result
}

/// Estimates how much of the pot a holdem hand wins on average.
///
/// The calculator owns an evaluator and an [`EquityConfig`]. Every unknown
/// card (the rest of the board and any unknown hole cards) is drawn from the
/// deck left after removing every known card. Small inputs are enumerated
/// exactly, bigger ones are sampled, and the work is spread over the rayon
/// thread pool either way.
///
/// ```
/// use holdem_equity::core::parse_cards;
/// use holdem_equity::evaluator::DirectEvaluator;
/// use holdem_equity::holdem::EquityCalculator;
///
/// let calculator = EquityCalculator::new(DirectEvaluator);
/// let hero = parse_cards("2c3c").unwrap();
/// let villain = parse_cards("AcAd").unwrap();
/// let board = parse_cards("AsAhKsKhQs").unwrap();
///
/// let equity = calculator.equity_vs_hands(&hero, &board, &[villain]).unwrap();
/// assert_eq!(0.0, equity);
/// ```
#[derive(Debug, Clone)]
pub struct EquityCalculator<E> {
    evaluator: E,
    config: EquityConfig,
}

impl<E: HandEvaluator> EquityCalculator<E> {
    /// A calculator with the default config.
    pub fn new(evaluator: E) -> Self {
        Self::with_config(evaluator, EquityConfig::default())
    }

    pub fn with_config(evaluator: E, config: EquityConfig) -> Self {
        Self { evaluator, config }
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    pub fn config(&self) -> &EquityConfig {
        &self.config
    }

    /// Hero's equity against `num_opponents` players holding unknown
    /// random hands.
    pub fn equity_vs_random(
        &self,
        hero: &[Card],
        board: &[Card],
        num_opponents: usize,
    ) -> Result<f64, InputError> {
        self.estimate_vs_random(hero, board, num_opponents)
            .map(|e| e.equity)
    }

    /// Hero's equity against opponents whose hole cards are known.
    pub fn equity_vs_hands<H>(
        &self,
        hero: &[Card],
        board: &[Card],
        opponent_hands: &[H],
    ) -> Result<f64, InputError>
    where
        H: AsRef<[Card]> + Sync,
    {
        self.estimate_vs_hands(hero, board, opponent_hands)
            .map(|e| e.equity)
    }

    /// Like [`Self::equity_vs_random`], but also says how many draws went
    /// into the answer and whether it is exact.
    pub fn estimate_vs_random(
        &self,
        hero: &[Card],
        board: &[Card],
        num_opponents: usize,
    ) -> Result<Estimate, InputError> {
        let (deck, draw_size) = rejected(self.random_deck(hero, board, num_opponents))?;

        let board_needed = BOARD_SIZE - board.len();
        let holes_needed = draw_size - board_needed;
        let strategy = self.strategy(&deck, draw_size);
        // Sampled draws come in random order, so dealing them in order is
        // already a uniform deal.
        let pairing = match strategy {
            Strategy::Exhaustive { .. } => self.config.opponent_pairing,
            Strategy::MonteCarlo { .. } => OpponentPairing::Sequential,
        };

        let evaluator = &self.evaluator;
        let base = evaluator.add_cards(evaluator.empty(), board);
        let estimate = self.run(strategy, &deck, draw_size, |draw: &[Card]| match pairing {
            OpponentPairing::Sequential => {
                let (holes, rest) = draw.split_at(holes_needed);
                let board = evaluator.add_cards(base, rest);
                showdown(evaluator, board, hero, holes.chunks_exact(2))
            }
            OpponentPairing::AllPartitions => {
                let mut share = 0.0;
                let mut deals = 0u32;
                for_each_partition(draw, board_needed, |rest, pairs| {
                    let board = evaluator.add_cards(base, rest);
                    share += showdown(evaluator, board, hero, pairs.iter().map(|p| &p[..]));
                    deals += 1;
                });
                if deals == 0 {
                    0.0
                } else {
                    share / f64::from(deals)
                }
            }
        });
        Ok(estimate)
    }

    /// Like [`Self::equity_vs_hands`], but also says how many board
    /// completions went into the answer and whether it is exact.
    pub fn estimate_vs_hands<H>(
        &self,
        hero: &[Card],
        board: &[Card],
        opponent_hands: &[H],
    ) -> Result<Estimate, InputError>
    where
        H: AsRef<[Card]> + Sync,
    {
        let deck = rejected(self.known_deck(hero, board, opponent_hands))?;

        let evaluator = &self.evaluator;
        let base = evaluator.add_cards(evaluator.empty(), board);
        let opponents = || opponent_hands.iter().map(|h| h.as_ref());

        let board_needed = BOARD_SIZE - board.len();
        if board_needed == 0 {
            let equity = showdown(evaluator, base, hero, opponents());
            return Ok(Estimate {
                equity,
                instances: 1,
                exact: true,
            });
        }

        let strategy = self.strategy(&deck, board_needed);
        Ok(self.run(strategy, &deck, board_needed, |draw: &[Card]| {
            let board = evaluator.add_cards(base, draw);
            showdown(evaluator, board, hero, opponents())
        }))
    }

    /// The live deck and how many unknown cards each draw takes.
    fn random_deck(
        &self,
        hero: &[Card],
        board: &[Card],
        num_opponents: usize,
    ) -> Result<(FlatDeck, usize), InputError> {
        let dead = validate::<[Card; 2]>(hero, board, &[])?;
        if num_opponents == 0 {
            return Err(InputError::NoOpponents);
        }
        let deck = FlatDeck::without(dead);
        // Overflow means more cards than any deck holds.
        let draw_size = num_opponents
            .checked_mul(2)
            .and_then(|holes| holes.checked_add(BOARD_SIZE - board.len()))
            .unwrap_or(usize::MAX);
        ensure_deck(&deck, draw_size)?;
        Ok((deck, draw_size))
    }

    fn known_deck<H: AsRef<[Card]>>(
        &self,
        hero: &[Card],
        board: &[Card],
        opponent_hands: &[H],
    ) -> Result<FlatDeck, InputError> {
        let dead = validate(hero, board, opponent_hands)?;
        if opponent_hands.is_empty() {
            return Err(InputError::NoOpponents);
        }
        let deck = FlatDeck::without(dead);
        ensure_deck(&deck, BOARD_SIZE - board.len())?;
        Ok(deck)
    }

    fn strategy(&self, deck: &FlatDeck, draw_size: usize) -> Strategy {
        let combinations = n_choose_k(deck.len(), draw_size);
        let strategy = Strategy::choose(combinations, &self.config);
        match strategy {
            Strategy::Exhaustive { combinations } => event!(
                Level::DEBUG,
                combinations,
                threshold = self.config.max_combinations,
                draw_size,
                "exhaustive_equity"
            ),
            Strategy::MonteCarlo { samples } => event!(
                Level::DEBUG,
                combinations,
                threshold = self.config.max_combinations,
                samples,
                draw_size,
                "monte_carlo_equity"
            ),
        }
        strategy
    }

    /// Score draws of `draw_size` cards from `deck` and average them.
    ///
    /// Chunks are tallied on the rayon pool but added up in chunk order, so
    /// a seeded run gives the same answer on any number of threads.
    fn run<F>(&self, strategy: Strategy, deck: &FlatDeck, draw_size: usize, score: F) -> Estimate
    where
        F: Fn(&[Card]) -> f64 + Sync,
    {
        match strategy {
            Strategy::Exhaustive { .. } => {
                let tally = if draw_size == 0 {
                    Tally::of(CardIter::new(deck, 0), &score)
                } else {
                    let tallies: Vec<Tally> = (0..deck.len())
                        .into_par_iter()
                        .map(|lead| Tally::of(CardIter::led_by(deck, draw_size, lead), &score))
                        .collect();
                    tallies.into_iter().sum()
                };
                tally.estimate(true)
            }
            Strategy::MonteCarlo { samples } => {
                let seed = self.config.seed.unwrap_or_else(|| rand::rng().random());
                event!(Level::TRACE, seed, samples, "sampling_draws");
                let chunks = samples.div_ceil(SAMPLES_PER_CHUNK);
                let tallies: Vec<Tally> = (0..chunks)
                    .into_par_iter()
                    .map(|chunk| {
                        let size = SAMPLES_PER_CHUNK.min(samples - chunk * SAMPLES_PER_CHUNK);
                        let rng = StdRng::seed_from_u64(seed.wrapping_add(chunk as u64));
                        let draws = RandomDraws::new(deck.clone(), draw_size, size, rng);
                        Tally::of(draws, &score)
                    })
                    .collect();
                tallies.into_iter().sum::<Tally>().estimate(false)
            }
        }
    }
}
