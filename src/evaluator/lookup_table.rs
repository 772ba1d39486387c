use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::Arc;

use tracing::{Level, event};

use super::HandEvaluator;
use crate::core::{Card, HandHandle, HandRank, TableError};

/// Exact number of entries in the transition table.
pub const TABLE_LEN: usize = 32_487_834;

/// Index given to a handle whose transition fell outside the table. It
/// never decodes to a rank and every transition from it stays dead.
const DEAD_INDEX: i32 = -1;

/// Hand evaluator backed by a precomputed perfect hash transition table.
///
/// Each card costs a single read: `table[handle.index + card.id]` is the
/// next state. A handle holding 5 or 6 cards finds its rank at
/// `table[handle.index]`, while after the seventh card the index already is
/// the encoded rank of the best five card hand.
///
/// The table is shared behind an `Arc`. Cloning the evaluator to hand it to
/// other threads doesn't copy the ~124MB of entries.
#[derive(Clone)]
pub struct LookupTableEvaluator {
    table: Arc<[i32]>,
}

impl LookupTableEvaluator {
    /// Build an evaluator from already decoded table entries.
    ///
    /// Fails unless there are exactly [`TABLE_LEN`] entries.
    pub fn new(table: Vec<i32>) -> Result<Self, TableError> {
        if table.len() != TABLE_LEN {
            return Err(TableError::WrongLength {
                expected: TABLE_LEN,
                found: table.len(),
            });
        }
        event!(Level::DEBUG, entries = table.len(), "lookup_table_ready");
        Ok(Self {
            table: table.into(),
        })
    }

    /// Decode a raw table blob of little endian `i32`s.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TableError> {
        if bytes.len() % 4 != 0 {
            return Err(TableError::MisalignedBytes(bytes.len()));
        }
        // Check before decoding so a bad asset doesn't cost a big allocation.
        if bytes.len() / 4 != TABLE_LEN {
            return Err(TableError::WrongLength {
                expected: TABLE_LEN,
                found: bytes.len() / 4,
            });
        }
        let table = bytes
            .chunks_exact(4)
            .map(|b| i32::from_le_bytes([b[0], b[1], b[2], b[3]]))
            .collect();
        Self::new(table)
    }

    /// Read the whole table blob from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, TableError> {
        let mut bytes = Vec::with_capacity(TABLE_LEN * 4);
        reader.read_to_end(&mut bytes)?;
        Self::from_bytes(&bytes)
    }

    /// Load the table from a file such as `HandRanks.dat`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, TableError> {
        let path = path.as_ref();
        event!(Level::INFO, path = %path.display(), "loading_lookup_table");
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    #[inline]
    fn entry(&self, index: i32, offset: u8) -> Option<i32> {
        let index = usize::try_from(index).ok()?;
        self.table.get(index + offset as usize).copied()
    }
}

impl HandEvaluator for LookupTableEvaluator {
    type Handle = HandHandle;

    fn empty(&self) -> HandHandle {
        HandHandle::empty()
    }

    #[inline]
    fn add_card(&self, handle: HandHandle, card: Card) -> HandHandle {
        let next = self.entry(handle.index(), card.id()).unwrap_or(DEAD_INDEX);
        HandHandle::new(next, handle.count().saturating_add(1))
    }

    #[inline]
    fn finalize(&self, handle: HandHandle) -> Option<HandRank> {
        match handle.count() {
            5 | 6 => HandRank::from_value(self.entry(handle.index(), 0)?),
            7 => HandRank::from_value(handle.index()),
            _ => None,
        }
    }
}

impl fmt::Debug for LookupTableEvaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LookupTableEvaluator")
            .field("entries", &self.table.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::OnceLock;

    use super::*;
    use crate::core::{HandCategory, Suit, Value, parse_cards};

    /// Indexes the hand-built states below are placed at.
    const STATES: [i32; 6] = [1_000, 2_000, 3_000, 4_000, 5_000, 6_000];

    fn hand() -> Vec<Card> {
        parse_cards("2c 5d 9h Js Ks Ac 3d").unwrap()
    }

    // An all zero table with one seven card path wired through it. Shared
    // between tests since every table is ~124MB.
    fn synthetic() -> &'static LookupTableEvaluator {
        static TABLE: OnceLock<LookupTableEvaluator> = OnceLock::new();
        TABLE.get_or_init(|| {
            let mut table = vec![0i32; TABLE_LEN];
            let cards = hand();
            let mut index = HandHandle::ROOT_INDEX;
            for (i, card) in cards.iter().enumerate().take(6) {
                table[(index + card.id() as i32) as usize] = STATES[i];
                index = STATES[i];
            }
            // Ranks read at five and six cards.
            table[STATES[4] as usize] = (1 << 12) | 100;
            table[STATES[5] as usize] = (1 << 12) | 200;
            // The seventh transition lands on the encoded rank itself.
            table[(STATES[5] + cards[6].id() as i32) as usize] = (2 << 12) | 7;
            LookupTableEvaluator::new(table).unwrap()
        })
    }

    #[test]
    fn test_wrong_length_is_rejected() {
        let err = LookupTableEvaluator::new(vec![0; 10]).unwrap_err();
        assert!(matches!(
            err,
            TableError::WrongLength {
                expected: TABLE_LEN,
                found: 10
            }
        ));

        let err = LookupTableEvaluator::new(vec![0; TABLE_LEN + 1]).unwrap_err();
        assert!(matches!(err, TableError::WrongLength { found, .. } if found == TABLE_LEN + 1));
    }

    #[test]
    fn test_bytes_must_be_whole_entries() {
        assert!(matches!(
            LookupTableEvaluator::from_bytes(&[0u8; 7]),
            Err(TableError::MisalignedBytes(7))
        ));
        assert!(matches!(
            LookupTableEvaluator::from_bytes(&[0u8; 8]),
            Err(TableError::WrongLength { found: 2, .. })
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = LookupTableEvaluator::open(dir.path().join("HandRanks.dat")).unwrap_err();
        assert!(matches!(err, TableError::Io(_)));
    }

    #[test]
    fn test_short_file_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[1, 0, 0, 0, 2, 0, 0, 0]).unwrap();
        let err = LookupTableEvaluator::open(file.path()).unwrap_err();
        assert!(matches!(err, TableError::WrongLength { found: 2, .. }));
    }

    #[test]
    fn test_add_card_follows_transitions() {
        let eval = synthetic();
        let mut handle = eval.empty();
        for (i, card) in hand().iter().enumerate().take(6) {
            handle = eval.add_card(handle, *card);
            assert_eq!(STATES[i], handle.index());
            assert_eq!(i as u8 + 1, handle.count());
        }
    }

    #[test]
    fn test_finalize_reads_table_then_index() {
        let eval = synthetic();
        let cards = hand();

        let five = eval.add_cards(eval.empty(), &cards[..5]);
        let rank = eval.finalize(five).unwrap();
        assert_eq!(HandCategory::HighCard, rank.category());
        assert_eq!(100, rank.sub_rank());

        let six = eval.add_card(five, cards[5]);
        assert_eq!(200, eval.finalize(six).unwrap().sub_rank());

        let seven = eval.add_card(six, cards[6]);
        assert_eq!((2 << 12) | 7, seven.index());
        let rank = eval.finalize(seven).unwrap();
        assert_eq!(HandCategory::OnePair, rank.category());
        assert_eq!(7, rank.sub_rank());
    }

    #[test]
    fn test_no_rank_outside_five_to_seven() {
        let eval = synthetic();
        let cards = hand();
        let mut handle = eval.empty();
        assert_eq!(None, eval.finalize(handle));
        for card in &cards[..4] {
            handle = eval.add_card(handle, *card);
            assert_eq!(None, eval.finalize(handle));
        }

        let seven = eval.add_cards(eval.empty(), &cards);
        let eight = eval.add_card(seven, Card::new(Value::Queen, Suit::Heart));
        assert_eq!(8, eight.count());
        assert_eq!(None, eval.finalize(eight));
    }

    #[test]
    fn test_unknown_category_is_no_rank() {
        let eval = synthetic();
        // Every other five card path hits zero entries.
        let other = parse_cards("2d 3d 4d 5d 7h").unwrap();
        assert_eq!(None, eval.evaluate(&other));
    }

    #[test]
    fn test_shared_prefix_is_not_mutated() {
        let eval = synthetic();
        let cards = hand();
        let board = eval.add_cards(eval.empty(), &cards[..4]);

        let on_path = eval.add_card(board, cards[4]);
        let off_path = eval.add_card(board, Card::new(Value::Queen, Suit::Heart));

        assert_eq!(STATES[3], board.index());
        assert_eq!(4, board.count());
        assert!(eval.finalize(on_path).is_some());
        assert!(eval.finalize(off_path).is_none());
    }

    #[test]
    fn test_dead_handle_stays_dead() {
        let eval = synthetic();
        let dead = HandHandle::new(DEAD_INDEX, 5);
        assert_eq!(None, eval.finalize(dead));
        let next = eval.add_card(dead, Card::new(Value::Two, Suit::Club));
        assert_eq!(DEAD_INDEX, next.index());
        assert_eq!(None, eval.finalize(next));
    }
}
