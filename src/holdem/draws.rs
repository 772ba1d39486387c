use rand::Rng;

use crate::core::{Card, FlatDeck};

/// Every way to choose `num_cards` out of a slice of cards, in
/// lexicographic order of their positions.
///
/// ```
/// use holdem_equity::core::parse_cards;
/// use holdem_equity::holdem::CardIter;
///
/// let cards = parse_cards("2s 3s 4s 5s").unwrap();
/// assert_eq!(6, CardIter::new(&cards, 2).count());
/// // Choosing nothing is a single empty draw.
/// assert_eq!(vec![Vec::<holdem_equity::core::Card>::new()], CardIter::new(&cards, 0).collect::<Vec<_>>());
/// ```
#[derive(Debug, Clone)]
pub struct CardIter<'a> {
    // All the possible cards that can be dealt
    possible_cards: &'a [Card],
    // Offsets of the current combination.
    idx: Vec<usize>,
    started: bool,
    done: bool,
}

impl<'a> CardIter<'a> {
    pub fn new(possible_cards: &'a [Card], num_cards: usize) -> Self {
        Self {
            possible_cards,
            idx: (0..num_cards).collect(),
            started: false,
            done: num_cards > possible_cards.len(),
        }
    }

    /// The combinations whose first card is `possible_cards[lead]`.
    ///
    /// Running this for every `lead` covers each combination exactly once,
    /// which is how enumeration gets split into independent chunks.
    pub fn led_by(
        possible_cards: &'a [Card],
        num_cards: usize,
        lead: usize,
    ) -> impl Iterator<Item = Vec<Card>> + 'a {
        let first = possible_cards.get(lead).copied();
        let rest = if first.is_some() && num_cards > 0 {
            CardIter::new(&possible_cards[lead + 1..], num_cards - 1)
        } else {
            CardIter::exhausted()
        };
        rest.filter_map(move |rest| {
            let mut draw = Vec::with_capacity(num_cards);
            draw.push(first?);
            draw.extend(rest);
            Some(draw)
        })
    }

    fn exhausted() -> Self {
        Self {
            possible_cards: &[],
            idx: Vec::new(),
            started: true,
            done: true,
        }
    }
}

impl Iterator for CardIter<'_> {
    type Item = Vec<Card>;

    fn next(&mut self) -> Option<Vec<Card>> {
        if self.done {
            return None;
        }
        if self.started {
            let n = self.possible_cards.len();
            let k = self.idx.len();
            // Right most offset that still has room to move forward.
            let Some(level) = (0..k).rev().find(|&i| self.idx[i] < n - k + i) else {
                self.done = true;
                return None;
            };
            self.idx[level] += 1;
            for i in level + 1..k {
                self.idx[i] = self.idx[i - 1] + 1;
            }
        }
        self.started = true;
        Some(self.idx.iter().map(|&i| self.possible_cards[i]).collect())
    }
}

/// A fixed number of uniform random draws from a deck.
///
/// Cards within one draw are distinct. Separate draws are independent.
#[derive(Debug)]
pub struct RandomDraws<R> {
    deck: FlatDeck,
    rng: R,
    draw_size: usize,
    remaining: usize,
}

impl<R: Rng> RandomDraws<R> {
    pub fn new(deck: FlatDeck, draw_size: usize, samples: usize, rng: R) -> Self {
        // A draw bigger than the deck can't be dealt.
        let remaining = if draw_size > deck.len() { 0 } else { samples };
        Self {
            deck,
            rng,
            draw_size,
            remaining,
        }
    }
}

impl<R: Rng> Iterator for RandomDraws<R> {
    type Item = Vec<Card>;

    fn next(&mut self) -> Option<Vec<Card>> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(
            self.deck
                .sample_in_place(&mut self.rng, self.draw_size)
                .to_vec(),
        )
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

/// Call `f` with every way of splitting an even number of cards into
/// unordered pairs.
///
/// Four cards pair up three ways, six cards fifteen ways.
pub fn for_each_pairing<F>(cards: &[Card], f: &mut F)
where
    F: FnMut(&[[Card; 2]]),
{
    let mut pairs = Vec::with_capacity(cards.len() / 2);
    pair_up(cards, &mut pairs, f);
}

fn pair_up<F>(rest: &[Card], pairs: &mut Vec<[Card; 2]>, f: &mut F)
where
    F: FnMut(&[[Card; 2]]),
{
    let [first, others @ ..] = rest else {
        f(pairs);
        return;
    };
    // The first card left has to go with someone.
    for (j, partner) in others.iter().enumerate() {
        let remaining: Vec<Card> = others
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != j)
            .map(|(_, c)| *c)
            .collect();
        pairs.push([*first, *partner]);
        pair_up(&remaining, pairs, f);
        pairs.pop();
    }
}

/// Call `f` with every way a draw can be dealt as `board_size` board cards
/// plus hole card pairs for the rest.
pub fn for_each_partition<F>(draw: &[Card], board_size: usize, mut f: F)
where
    F: FnMut(&[Card], &[[Card; 2]]),
{
    for board in CardIter::new(draw, board_size) {
        let holes: Vec<Card> = draw
            .iter()
            .filter(|c| !board.contains(c))
            .copied()
            .collect();
        for_each_pairing(&holes, &mut |pairs| f(&board, pairs));
    }
}
