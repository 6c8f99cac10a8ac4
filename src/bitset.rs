//! Fixed-capacity vertex sets packed into `u64` words.
//!
//! [`Bitset`] is the one set type used by the whole engine: adjacency rows,
//! color classes, the repair pool, and the used-vertex tracker of crossover.
//! The universe is `0..capacity` and never grows; every operation between two
//! sets assumes both were created with the same capacity.
//!
//! Bits past `capacity` in the last word are always zero, so word-level
//! population counts never need masking.

const WORD_BITS: usize = u64::BITS as usize;

/// A set of vertex indices in `0..capacity`, one bit per vertex.
///
/// # Examples
///
/// ```
/// use u_bitea::bitset::Bitset;
///
/// let mut set = Bitset::new(100);
/// set.insert(3);
/// set.insert(64);
/// assert!(set.contains(64));
/// assert_eq!(set.count(), 2);
/// assert_eq!(set.iter().collect::<Vec<_>>(), vec![3, 64]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bitset {
    capacity: usize,
    words: Vec<u64>,
}

impl Bitset {
    /// Creates an empty set over `0..capacity`.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            words: vec![0; capacity.div_ceil(WORD_BITS)],
        }
    }

    /// Creates a set containing every vertex in `0..capacity`.
    pub fn full(capacity: usize) -> Self {
        let mut set = Self {
            capacity,
            words: vec![u64::MAX; capacity.div_ceil(WORD_BITS)],
        };
        set.clear_tail();
        set
    }

    /// Creates a set from a list of members.
    ///
    /// # Panics
    /// Panics if any member is `>= capacity`.
    pub fn from_indices<I: IntoIterator<Item = usize>>(capacity: usize, members: I) -> Self {
        let mut set = Self::new(capacity);
        for v in members {
            set.insert(v);
        }
        set
    }

    /// Size of the universe this set ranges over.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Backing words, lowest vertices first.
    #[inline]
    pub fn words(&self) -> &[u64] {
        &self.words
    }

    #[inline]
    pub fn contains(&self, v: usize) -> bool {
        debug_assert!(v < self.capacity, "vertex {v} out of range {}", self.capacity);
        let (w, mask) = location(v);
        self.words[w] & mask != 0
    }

    /// Inserts `v`. Returns `true` if it was not already present.
    ///
    /// # Panics
    /// Panics if `v >= capacity`.
    #[inline]
    pub fn insert(&mut self, v: usize) -> bool {
        assert!(v < self.capacity, "vertex {v} out of range {}", self.capacity);
        let (w, mask) = location(v);
        let before = self.words[w];
        self.words[w] = before | mask;
        before & mask == 0
    }

    /// Removes `v`. Returns `true` if it was present.
    #[inline]
    pub fn remove(&mut self, v: usize) -> bool {
        assert!(v < self.capacity, "vertex {v} out of range {}", self.capacity);
        let (w, mask) = location(v);
        let before = self.words[w];
        self.words[w] = before & !mask;
        before & mask != 0
    }

    /// Number of members (population count).
    #[inline]
    pub fn count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    pub fn clear(&mut self) {
        self.words.iter_mut().for_each(|w| *w = 0);
    }

    /// `self ∪= other`.
    pub fn union_with(&mut self, other: &Bitset) {
        self.check_same_universe(other);
        for (a, b) in self.words.iter_mut().zip(&other.words) {
            *a |= b;
        }
    }

    /// `self ∩= other`.
    pub fn intersect_with(&mut self, other: &Bitset) {
        self.check_same_universe(other);
        for (a, b) in self.words.iter_mut().zip(&other.words) {
            *a &= b;
        }
    }

    /// `self \= other`.
    pub fn difference_with(&mut self, other: &Bitset) {
        self.check_same_universe(other);
        for (a, b) in self.words.iter_mut().zip(&other.words) {
            *a &= !b;
        }
    }

    /// `|self ∩ other|` without allocating.
    #[inline]
    pub fn intersection_count(&self, other: &Bitset) -> usize {
        self.check_same_universe(other);
        self.words
            .iter()
            .zip(&other.words)
            .map(|(a, b)| (a & b).count_ones() as usize)
            .sum()
    }

    /// `|self \ other|` without allocating.
    #[inline]
    pub fn difference_count(&self, other: &Bitset) -> usize {
        self.check_same_universe(other);
        self.words
            .iter()
            .zip(&other.words)
            .map(|(a, b)| (a & !b).count_ones() as usize)
            .sum()
    }

    /// Returns `true` if the two sets share at least one member.
    #[inline]
    pub fn intersects(&self, other: &Bitset) -> bool {
        self.check_same_universe(other);
        self.words.iter().zip(&other.words).any(|(a, b)| a & b != 0)
    }

    /// Iterates over members in increasing order.
    pub fn iter(&self) -> Ones<'_> {
        Ones {
            words: &self.words,
            index: 0,
            current: self.words.first().copied().unwrap_or(0),
        }
    }

    /// Iterates over members of `self ∩ other` in increasing order.
    pub fn iter_intersection<'a>(&'a self, other: &'a Bitset) -> impl Iterator<Item = usize> + 'a {
        self.check_same_universe(other);
        self.words
            .iter()
            .zip(&other.words)
            .enumerate()
            .flat_map(|(i, (a, b))| WordBits(a & b).map(move |bit| i * WORD_BITS + bit))
    }

    fn clear_tail(&mut self) {
        let used = self.capacity % WORD_BITS;
        if used != 0 {
            if let Some(last) = self.words.last_mut() {
                *last &= (1u64 << used) - 1;
            }
        }
    }

    #[inline]
    fn check_same_universe(&self, other: &Bitset) {
        debug_assert_eq!(
            self.capacity, other.capacity,
            "bitsets over different universes"
        );
    }
}

impl<'a> IntoIterator for &'a Bitset {
    type Item = usize;
    type IntoIter = Ones<'a>;

    fn into_iter(self) -> Ones<'a> {
        self.iter()
    }
}

/// Iterator over the members of a [`Bitset`].
pub struct Ones<'a> {
    words: &'a [u64],
    index: usize,
    current: u64,
}

impl Iterator for Ones<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        loop {
            if self.current != 0 {
                let bit = self.current.trailing_zeros() as usize;
                self.current &= self.current - 1;
                return Some(self.index * WORD_BITS + bit);
            }
            self.index += 1;
            if self.index >= self.words.len() {
                return None;
            }
            self.current = self.words[self.index];
        }
    }
}

struct WordBits(u64);

impl Iterator for WordBits {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.0 == 0 {
            return None;
        }
        let bit = self.0.trailing_zeros() as usize;
        self.0 &= self.0 - 1;
        Some(bit)
    }
}

#[inline]
fn location(v: usize) -> (usize, u64) {
    (v / WORD_BITS, 1u64 << (v % WORD_BITS))
}
