//! Core trait definitions for the evolutionary loop.
//!
//! [`Individual`] and [`Fitness`] are the contract between the generic
//! population machinery (selection, worst-slot replacement, best tracking)
//! and the concrete coloring representation.

/// Marker trait for fitness values.
///
/// Fitness must support comparison and be cheaply copyable.
/// Lower fitness is considered better (minimization).
pub trait Fitness: PartialOrd + Copy + Send + Sync + std::fmt::Debug + 'static {}

/// Ranking key of a coloring.
///
/// Ordered lexicographically: fewer uncolored vertices first, then lower
/// total conflict weight, then fewer colors. A proper coloring with `k`
/// colors therefore beats any conflicting coloring, and among proper
/// colorings the one with fewer colors wins.
///
/// ```
/// use u_bitea::bitea::Score;
///
/// let proper_4 = Score { uncolored: 0, conflicts: 0, colors: 4 };
/// let proper_3 = Score { uncolored: 0, conflicts: 0, colors: 3 };
/// let conflicting_2 = Score { uncolored: 0, conflicts: 6, colors: 2 };
/// assert!(proper_3 < proper_4);
/// assert!(proper_4 < conflicting_2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Score {
    /// Vertices in no color class.
    pub uncolored: usize,
    /// Total weighted conflict (the coloring's fitness).
    pub conflicts: u64,
    /// Number of color classes.
    pub colors: usize,
}

impl Score {
    /// `true` when the coloring is complete and conflict-free.
    pub fn is_proper(&self) -> bool {
        self.uncolored == 0 && self.conflicts == 0
    }
}

impl Fitness for Score {}

/// A candidate solution in the population.
///
/// Individuals carry their own cached fitness; operators keep it current.
pub trait Individual: Clone + Send + Sync {
    /// The fitness type. Must implement [`Fitness`].
    type Fitness: Fitness;

    /// Returns the current fitness of this individual.
    fn fitness(&self) -> Self::Fitness;
}
