//! Color-count reduction.

use crate::coloring::{Coloring, Pool};
use crate::graph::Graph;

/// Removes one color class and redistributes its members.
///
/// The victim is the class with the fewest members; among equally small
/// classes the one with the highest index. Its members are re-placed
/// heaviest first into the first remaining class where they add no conflict;
/// members with no such class go to `pool` for
/// [`fix_conflicts`](super::fix_conflicts) to absorb.
///
/// Returns the index of the removed class, or `None` if the coloring has
/// fewer than two classes. Deciding whether the reduction is worth keeping
/// is left to the caller.
pub fn search_back(graph: &Graph, coloring: &mut Coloring, pool: &mut Pool) -> Option<usize> {
    if coloring.color_count() < 2 {
        return None;
    }

    let victim = coloring
        .classes()
        .iter()
        .enumerate()
        .min_by_key(|&(c, class)| (class.count(), std::cmp::Reverse(c)))
        .map(|(c, _)| c)?;

    let members = coloring.remove_class(graph, victim);
    let mut order: Vec<usize> = members.iter().collect();
    order.sort_by(|&a, &b| graph.weight(b).cmp(&graph.weight(a)).then(a.cmp(&b)));

    for v in order {
        let target = (0..coloring.color_count())
            .find(|&c| !graph.neighbors(v).intersects(coloring.class(c)));
        match target {
            Some(c) => {
                coloring.assign(graph, v, c);
            }
            None => {
                pool.insert(v);
            }
        }
    }

    log::trace!(
        "search_back removed class {victim} ({} members, {} pooled)",
        members.count(),
        pool.count()
    );
    Some(victim)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singleton_class_is_absorbed() {
        // path 0-1-2-3 colored with three colors, vertex 3 alone in class 2
        let g = Graph::from_edges(4, &[(0, 1), (1, 2), (2, 3)]).unwrap();
        let mut c = Coloring::from_assignment(&g, &[Some(0), Some(1), Some(0), Some(2)], 3).unwrap();
        assert_eq!(c.fitness(), 0);

        let mut pool = Pool::new(4);
        assert_eq!(search_back(&g, &mut c, &mut pool), Some(2));
        assert!(pool.is_empty());
        assert_eq!(c.color_count(), 2);
        assert_eq!(c.fitness(), 0);
        assert_eq!(c.uncolored(), 0);
        assert!(c.is_proper(&g));
        assert_eq!(c.color_of(3), Some(1));
    }

    #[test]
    fn test_unplaceable_members_are_pooled() {
        let g = Graph::complete(3).unwrap();
        let mut c = Coloring::from_assignment(&g, &[Some(0), Some(1), Some(2)], 3).unwrap();
        let mut pool = Pool::new(3);
        assert_eq!(search_back(&g, &mut c, &mut pool), Some(2));
        assert_eq!(pool.members().iter().collect::<Vec<_>>(), vec![2]);
        assert_eq!(c.uncolored(), 1);
        assert_eq!(c.color_count(), 2);
    }

    #[test]
    fn test_smallest_class_is_chosen() {
        let g = Graph::from_edges(5, &[]).unwrap();
        let mut c = Coloring::from_assignment(
            &g,
            &[Some(0), Some(1), Some(1), Some(2), Some(2)],
            3,
        )
        .unwrap();
        let mut pool = Pool::new(5);
        assert_eq!(search_back(&g, &mut c, &mut pool), Some(0));
        assert_eq!(c.color_of(0), Some(0), "vertex 0 moved into the first free class");
    }

    #[test]
    fn test_empty_class_is_dropped() {
        let g = Graph::cycle(4).unwrap();
        let mut c = Coloring::from_assignment(&g, &[Some(0), Some(2), Some(0), Some(2)], 3).unwrap();
        let mut pool = Pool::new(4);
        assert_eq!(search_back(&g, &mut c, &mut pool), Some(1));
        assert_eq!(c.color_count(), 2);
        assert!(c.is_proper(&g));
    }

    #[test]
    fn test_single_class_is_left_alone() {
        let g = Graph::from_edges(2, &[]).unwrap();
        let mut c = Coloring::from_assignment(&g, &[Some(0), Some(0)], 1).unwrap();
        let mut pool = Pool::new(2);
        assert_eq!(search_back(&g, &mut c, &mut pool), None);
        assert_eq!(c.color_count(), 1);
    }
}
