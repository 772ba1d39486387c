/// Knobs for the equity calculator and the exact vs sampled decision.
mod config;
/// Export the config types
pub use self::config::{
    DEFAULT_MAX_COMBINATIONS, DEFAULT_MONTE_CARLO_SAMPLES, EquityConfig, OpponentPairing,
    Strategy, n_choose_k,
};

/// Producers of candidate draws of unknown cards.
mod draws;
/// Export `CardIter` and the other draw helpers
pub use self::draws::{CardIter, RandomDraws, for_each_pairing, for_each_partition};

/// Module for the equity calculation itself.
mod equity;
/// Export `EquityCalculator`
pub use self::equity::{Estimate, EquityCalculator};
