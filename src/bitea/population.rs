//! The shared population and its steady-state replacement rule.

use crate::coloring::Coloring;

/// A fixed-size set of colorings.
///
/// Replacement is steady-state: a child only ever displaces the current
/// worst member, and only when it scores strictly better.
#[derive(Debug, Clone)]
pub struct Population {
    members: Vec<Coloring>,
}

impl Population {
    pub fn new(members: Vec<Coloring>) -> Self {
        Self { members }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn get(&self, i: usize) -> &Coloring {
        &self.members[i]
    }

    pub fn individuals(&self) -> &[Coloring] {
        &self.members
    }

    /// Index of the best member (lowest score, lowest index on ties).
    pub fn best_index(&self) -> Option<usize> {
        self.members
            .iter()
            .enumerate()
            .min_by_key(|(i, c)| (c.score(), *i))
            .map(|(i, _)| i)
    }

    /// Index of the worst member (highest score, highest index on ties).
    pub fn worst_index(&self) -> Option<usize> {
        self.members
            .iter()
            .enumerate()
            .max_by_key(|(i, c)| (c.score(), *i))
            .map(|(i, _)| i)
    }

    pub fn best(&self) -> Option<&Coloring> {
        self.best_index().map(|i| &self.members[i])
    }

    /// Replaces the worst member with `child` if the child scores strictly
    /// better. Returns the replaced slot, or hands the child back.
    pub fn try_replace_worst(&mut self, child: Coloring) -> Result<usize, Coloring> {
        let Some(worst) = self.worst_index() else {
            return Err(child);
        };
        if child.score() < self.members[worst].score() {
            self.members[worst] = child;
            Ok(worst)
        } else {
            Err(child)
        }
    }
}
