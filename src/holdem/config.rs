/// Most combinations that are enumerated exactly before switching to
/// Monte Carlo sampling.
pub const DEFAULT_MAX_COMBINATIONS: u64 = 1_000_000;
/// Samples drawn once an input is too big to enumerate.
pub const DEFAULT_MONTE_CARLO_SAMPLES: usize = 1_000_000;

/// How a draw of unknown cards is dealt out to unknown opponents and the
/// board when enumerating exactly.
///
/// Monte Carlo draws are in random order already, so they are always split
/// sequentially.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OpponentPairing {
    /// Score every way the drawn cards can be split into board cards and
    /// opponent pairs, and average them. Each deal of the unknown cards is
    /// counted exactly once.
    #[default]
    AllPartitions,
    /// Deal the drawn cards in deck order: the first two to the first
    /// opponent, the next two to the second, and whatever is left to the
    /// board. Only one split of every draw is scored.
    ///
    /// Pick this to reproduce exact numbers from calculators that deal each
    /// draw this fixed way. Since the deck is in id order, opponents always
    /// get the lowest cards of each draw, which skews the result.
    Sequential,
}

/// Knobs for [`super::EquityCalculator`].
///
/// ```
/// use holdem_equity::holdem::EquityConfig;
///
/// let config = EquityConfig::default()
///     .with_monte_carlo_samples(50_000)
///     .with_seed(42);
/// assert_eq!(1_000_000, config.max_combinations);
/// assert_eq!(Some(42), config.seed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct EquityConfig {
    /// Inputs with at most this many combinations of unknown cards are
    /// enumerated exactly.
    pub max_combinations: u64,
    /// How many random draws to average once enumeration is too big.
    pub monte_carlo_samples: usize,
    /// Seed for the sampling. `None` picks a fresh one every estimate.
    pub seed: Option<u64>,
    /// Splitting rule for exact enumeration against unknown opponents.
    pub opponent_pairing: OpponentPairing,
}

impl Default for EquityConfig {
    fn default() -> Self {
        Self {
            max_combinations: DEFAULT_MAX_COMBINATIONS,
            monte_carlo_samples: DEFAULT_MONTE_CARLO_SAMPLES,
            seed: None,
            opponent_pairing: OpponentPairing::default(),
        }
    }
}

impl EquityConfig {
    pub fn with_max_combinations(mut self, max_combinations: u64) -> Self {
        self.max_combinations = max_combinations;
        self
    }

    pub fn with_monte_carlo_samples(mut self, samples: usize) -> Self {
        self.monte_carlo_samples = samples;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_opponent_pairing(mut self, pairing: OpponentPairing) -> Self {
        self.opponent_pairing = pairing;
        self
    }

    /// Read a config from JSON. Missing fields keep their defaults.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Which of the two estimation paths an input takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Every combination is scored.
    Exhaustive { combinations: u64 },
    /// A fixed number of random draws are scored.
    MonteCarlo { samples: usize },
}

impl Strategy {
    /// Exhaustive up to and including `config.max_combinations`, sampling
    /// past that.
    ///
    /// ```
    /// use holdem_equity::holdem::{EquityConfig, Strategy};
    ///
    /// let config = EquityConfig::default();
    /// assert_eq!(
    ///     Strategy::Exhaustive { combinations: 1_000_000 },
    ///     Strategy::choose(1_000_000, &config)
    /// );
    /// assert_eq!(
    ///     Strategy::MonteCarlo { samples: 1_000_000 },
    ///     Strategy::choose(1_000_001, &config)
    /// );
    /// ```
    pub fn choose(combinations: u64, config: &EquityConfig) -> Self {
        if combinations <= config.max_combinations {
            Strategy::Exhaustive { combinations }
        } else {
            Strategy::MonteCarlo {
                samples: config.monte_carlo_samples,
            }
        }
    }
}

/// `n` choose `k`, saturating at `u64::MAX`.
///
/// ```
/// use holdem_equity::holdem::n_choose_k;
///
/// assert_eq!(178_365, n_choose_k(47, 4));
/// assert_eq!(99_884_400, n_choose_k(50, 7));
/// assert_eq!(0, n_choose_k(3, 4));
/// ```
pub fn n_choose_k(n: usize, k: usize) -> u64 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut result: u128 = 1;
    for i in 0..k {
        result = result * (n - i) as u128 / (i + 1) as u128;
        if result > u64::MAX as u128 {
            return u64::MAX;
        }
    }
    result as u64
}
