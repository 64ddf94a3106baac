//! Generator sequences and the facelet-change map that can replace replaying
//! them move-by-move (§4.2).

use std::fmt;

/// One entry of a facelet-change map: the facelet originally at `from` ends
/// up at `to` after the formula is applied to a labeled reference state.
/// Positions are flattened to a single `usize` by whichever puzzle state
/// owns them (see `cube::state::Cube::flatten`, `wreath::Wreath::flatten`,
/// `globe::Globe::flatten`).
pub type FaceletChange = (usize, usize);

/// A finite sequence of generators of type `M`, optionally augmented with a
/// precomputed facelet-change map (§4.2). `M` is one of `CubeMove`,
/// `WreathMove`, `GlobeMove`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formula<M> {
    pub moves: Vec<M>,
    pub facelet_changes: Option<Vec<FaceletChange>>,
}

impl<M> Formula<M> {
    pub fn new(moves: Vec<M>) -> Self {
        Self {
            moves,
            facelet_changes: None,
        }
    }

    pub fn with_facelet_changes(moves: Vec<M>, changes: Vec<FaceletChange>) -> Self {
        Self {
            moves,
            facelet_changes: Some(changes),
        }
    }

    /// Cost of the formula, equal to its move count (§3 Formula, §4.5).
    pub fn cost(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn n_changes(&self) -> usize {
        self.facelet_changes.as_ref().map_or(0, |c| c.len())
    }
}

impl<M: Clone> Formula<M> {
    /// `g · self · g⁻¹`-style prepend/append used by conjugation
    /// augmentation (§4.3). Does not touch `facelet_changes`: callers must
    /// recompute the map on the conjugated move sequence.
    pub fn conjugate_with(&self, prefix: &[M], suffix: &[M]) -> Formula<M> {
        let mut moves = Vec::with_capacity(prefix.len() + self.moves.len() + suffix.len());
        moves.extend_from_slice(prefix);
        moves.extend_from_slice(&self.moves);
        moves.extend_from_slice(suffix);
        Formula::new(moves)
    }
}

impl<M: fmt::Display> fmt::Display for Formula<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self
            .moves
            .iter()
            .map(|m| m.to_string())
            .collect::<Vec<_>>()
            .join(".");
        write!(f, "{s}")
    }
}

/// Predicate filters applied to a candidate formula's facelet-change map
/// (§4.2). `same_face` / `is_corner_or_center` are supplied by the owning
/// puzzle state since the meaning of "same face"/"corner" is puzzle-
/// specific.
pub struct ChangeFilters<'a> {
    pub same_face: &'a dyn Fn(usize, usize) -> bool,
    pub is_corner_or_center: &'a dyn Fn(usize) -> bool,
}

impl<'a> ChangeFilters<'a> {
    /// `true` if the change should be dropped.
    pub fn reject(&self, from: usize, to: usize) -> bool {
        (self.same_face)(from, to) || (self.is_corner_or_center)(to)
    }
}

/// Drops changes rejected by `filters`, then drops the whole map (and
/// returns `None`) if it ends up empty ("no-op" filter, §4.2).
pub fn filter_facelet_changes(
    changes: Vec<FaceletChange>,
    filters: &ChangeFilters,
) -> Option<Vec<FaceletChange>> {
    let kept: Vec<FaceletChange> = changes
        .into_iter()
        .filter(|&(from, to)| !filters.reject(from, to))
        .collect();
    if kept.is_empty() {
        None
    } else {
        Some(kept)
    }
}

/// Shared cost-efficiency ceiling used by every searcher (cube, edge,
/// globe): a formula is only worth keeping if its cost isn't wildly out of
/// proportion to how much it actually changes.
pub fn is_cost_effective(n_changes: usize, cost: usize, max_cost: usize) -> bool {
    n_changes != 0 && n_changes * cost <= max_cost
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct M(i32);
    impl fmt::Display for M {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "m{}", self.0)
        }
    }

    #[test]
    fn test_cost_is_move_count() {
        let formula = Formula::new(vec![M(1), M(2), M(3)]);
        assert_eq!(formula.cost(), 3);
    }

    #[test]
    fn test_display_dot_separated() {
        let formula = Formula::new(vec![M(1), M(2)]);
        assert_eq!(formula.to_string(), "m1.m2");
    }

    #[test]
    fn test_filter_drops_same_face_and_empties_map() {
        let filters = ChangeFilters {
            same_face: &|from, to| from / 10 == to / 10,
            is_corner_or_center: &|_| false,
        };
        let changes = vec![(0, 5), (10, 11)];
        assert_eq!(filter_facelet_changes(changes, &filters), None);
    }

    #[test]
    fn test_cost_effective_ceiling() {
        assert!(is_cost_effective(4, 6, 30));
        assert!(!is_cost_effective(0, 6, 30));
        assert!(!is_cost_effective(10, 10, 30));
    }
}
