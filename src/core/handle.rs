/// Where a partial hand is in the lookup table automaton.
///
/// Handles are values. Folding a card in produces a new handle and leaves
/// the old one untouched, so one board handle can seed every player's hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandHandle {
    index: i32,
    count: u8,
}

impl HandHandle {
    /// Index of the automaton's starting state.
    pub const ROOT_INDEX: i32 = 53;

    /// The handle for a hand with no cards in it.
    pub const fn empty() -> Self {
        Self {
            index: Self::ROOT_INDEX,
            count: 0,
        }
    }

    pub(crate) const fn new(index: i32, count: u8) -> Self {
        Self { index, count }
    }

    /// Current table index. Once seven cards are in, this is the encoded
    /// rank itself.
    pub const fn index(&self) -> i32 {
        self.index
    }

    /// How many cards have been folded in so far.
    pub const fn count(&self) -> u8 {
        self.count
    }
}

impl Default for HandHandle {
    fn default() -> Self {
        Self::empty()
    }
}
