//! Slice-map remapper: specializes a formula (and its facelet-change map)
//! found on a small reference-order cube onto a larger target-order cube
//! by injecting reference interior depths into target interior depths
//! (§4.4). Grounded on `face_cube.cpp`'s `SliceMap` / `SliceMapInv` /
//! `DfsSliceMaps` / `ConvertFaceActionMoveWithSliceMap` /
//! `ConvertFaceActionFaceletChangeWithSliceMap`.

use super::state::{Cube, CubeMove, FaceId};
use crate::formula::Formula;

/// An injective map from reference-cube interior depths `1..ref_order-1` to
/// target-cube interior depths `1..target_order-1`. Caps (depth 0 and
/// `order-1`) always map to themselves; only interior slices are permuted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliceMap {
    pub ref_order: usize,
    pub target_order: usize,
    /// `forward[d - 1]` is the target depth reference depth `d` maps to.
    forward: Vec<usize>,
}

impl SliceMap {
    /// Builds the identity-style injection `d ↦ d` when both cubes share
    /// the same order; otherwise `new_with` must be used to supply an
    /// explicit injection (§4.4 "partial injection").
    pub fn identity(order: usize) -> Self {
        Self {
            ref_order: order,
            target_order: order,
            forward: (1..order - 1).collect(),
        }
    }

    /// `forward[i]` is the target depth that reference interior depth
    /// `i + 1` maps to; must be strictly increasing and land within
    /// `1..target_order - 1`.
    pub fn new_with(ref_order: usize, target_order: usize, forward: Vec<usize>) -> Self {
        debug_assert_eq!(forward.len(), ref_order.saturating_sub(2));
        debug_assert!(forward.windows(2).all(|w| w[0] < w[1]));
        debug_assert!(forward.iter().all(|&d| d >= 1 && d < target_order - 1));
        Self {
            ref_order,
            target_order,
            forward,
        }
    }

    fn map_depth(&self, depth: usize) -> usize {
        if depth == 0 {
            0
        } else if depth == self.ref_order - 1 {
            self.target_order - 1
        } else {
            self.forward[depth - 1]
        }
    }

    /// Whether this map is "scale-stable": applying it to a reference move
    /// sequence and replaying on the target cube produces exactly the same
    /// facelet-change map shape as translating the reference map's
    /// positions directly (§4.4). True exactly when `ref_order ==
    /// target_order`, since only then does every interior depth already
    /// have a canonical identity image.
    pub fn is_scale_stable(&self) -> bool {
        self.ref_order == self.target_order
    }

    /// Remaps a single move from the reference cube's depth space into the
    /// target cube's (`ConvertFaceActionMoveWithSliceMap`).
    pub fn map_move(&self, mv: CubeMove) -> CubeMove {
        CubeMove::new(mv.axis, mv.sign, self.map_depth(mv.depth))
    }

    /// Remaps an entire formula's moves; the target's own facelet-change
    /// map must be recomputed afterward since flattened positions depend on
    /// `target_order` (callers typically use `remap_formula`, which does
    /// this).
    pub fn map_moves(&self, moves: &[CubeMove]) -> Vec<CubeMove> {
        moves.iter().map(|&mv| self.map_move(mv)).collect()
    }

    /// Remaps a formula found on the reference cube onto the target cube:
    /// moves are translated via `map_move`, and the facelet-change map is
    /// recomputed by replaying the remapped moves on a target-sized labeled
    /// reference cube (`ConvertFaceActionFaceletChangeWithSliceMap`).
    pub fn remap_formula(&self, formula: &Formula<CubeMove>) -> Formula<CubeMove> {
        let moves = self.map_moves(&formula.moves);
        let labeled = Cube::labeled(self.target_order);
        let mut applied = labeled.clone();
        for &mv in &moves {
            applied.apply_move(mv);
        }
        let per_face = self.target_order * self.target_order;
        let changes: Vec<(usize, usize)> = (0..6 * per_face)
            .filter_map(|from| {
                let to = applied.get_flat(from) as usize;
                (to != from).then_some((from, to))
            })
            .collect();
        Formula::with_facelet_changes(moves, changes)
    }
}

/// Enumerates every valid injection of `ref_order`'s interior depths into
/// `target_order`'s, via DFS (`DfsSliceMaps`). Mirror-paired: reference
/// depths `i` and `ref_order-1-i` (reflections of each other about the
/// cube's center) must jointly map to a target pair `j` and
/// `target_order-1-j`, matching `DfsSliceMaps`'s practice of assigning
/// `slice_map_inv[depth]` and `slice_map_inv[OrderFormula-3-depth]` together
/// in the same recursive step rather than choosing them independently. A
/// reference depth that is its own mirror (only possible when `ref_order` is
/// odd) forces the target's own self-mirrored depth, which only exists when
/// `target_order` is also odd; otherwise no map exists for that order pair.
pub fn enumerate_slice_maps(ref_order: usize, target_order: usize) -> Vec<SliceMap> {
    let ref_interior = ref_order.saturating_sub(2);
    if ref_interior == 0 {
        return vec![SliceMap::new_with(ref_order, target_order, Vec::new())];
    }

    // The first half of each order's interior depths: those strictly closer
    // to the low cap than to the high one. Exactly the depths a DFS needs to
    // choose freely; their mirrors are determined once these are chosen.
    let ref_first_half: Vec<usize> = (1..ref_order - 1).filter(|&d| d * 2 < ref_order - 1).collect();
    let target_first_half: Vec<usize> = (1..target_order - 1).filter(|&d| d * 2 < target_order - 1).collect();

    let ref_interior_is_odd = ref_interior % 2 == 1;
    let target_interior_is_odd = target_order.saturating_sub(2) % 2 == 1;
    if ref_interior_is_odd != target_interior_is_odd {
        return Vec::new(); // a fixed self-mirrored reference slice has nowhere to land.
    }

    let half = ref_first_half.len();
    if half > target_first_half.len() {
        return Vec::new();
    }

    let mut results = Vec::new();
    let mut chosen = Vec::with_capacity(half);
    dfs_choose_half(&target_first_half, half, 0, &mut chosen, &mut results);

    results
        .into_iter()
        .map(|choice| {
            let mut forward = vec![0usize; ref_interior];
            for (i, &ref_depth) in ref_first_half.iter().enumerate() {
                let target_depth = choice[i];
                forward[ref_depth - 1] = target_depth;
                let ref_mirror = ref_order - 1 - ref_depth;
                let target_mirror = target_order - 1 - target_depth;
                forward[ref_mirror - 1] = target_mirror;
            }
            if ref_interior_is_odd {
                let ref_center = (ref_order - 1) / 2;
                let target_center = (target_order - 1) / 2;
                forward[ref_center - 1] = target_center;
            }
            SliceMap::new_with(ref_order, target_order, forward)
        })
        .collect()
}

/// Chooses `remaining` strictly-increasing values out of `pool` (a
/// combination, not a permutation), feeding the mirror-pairing construction
/// above.
fn dfs_choose_half(pool: &[usize], remaining: usize, start: usize, chosen: &mut Vec<usize>, results: &mut Vec<Vec<usize>>) {
    if remaining == 0 {
        results.push(chosen.clone());
        return;
    }
    for i in start..pool.len() {
        if pool.len() - i < remaining {
            break;
        }
        chosen.push(pool[i]);
        dfs_choose_half(pool, remaining - 1, i + 1, chosen, results);
        chosen.pop();
    }
}

/// Whether `face` participates at all in a slice map with only-cap moves
/// (kept for symmetry with the original's per-face slice bookkeeping; a
/// slice map never changes which face a capped move rotates).
pub fn face_unaffected_by_slice_map(_face: FaceId) -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube::state::Axis;

    #[test]
    fn test_identity_map_preserves_depth() {
        let map = SliceMap::identity(5);
        assert!(map.is_scale_stable());
        let mv = CubeMove::new(Axis::F, 1, 2);
        assert_eq!(map.map_move(mv), mv);
    }

    #[test]
    fn test_enumerate_slice_maps_identity_count() {
        let maps = enumerate_slice_maps(5, 5);
        assert_eq!(maps.len(), 1);
    }

    #[test]
    fn test_enumerate_slice_maps_into_larger_target() {
        let maps = enumerate_slice_maps(4, 6);
        // ref order 4's interior depths {1,2} form one mirror pair; target
        // order 6's interior {1,2,3,4} pairs as {1,4} and {2,3} — only two
        // mirror-consistent placements exist, not every C(4,2) combination.
        assert_eq!(maps.len(), 2);
        for map in &maps {
            assert!(!map.is_scale_stable());
        }
        let mut pairs: Vec<(usize, usize)> = maps
            .iter()
            .map(|m| {
                let a = m.map_depth(1);
                let b = m.map_depth(2);
                if a < b { (a, b) } else { (b, a) }
            })
            .collect();
        pairs.sort_unstable();
        assert_eq!(pairs, vec![(1, 4), (2, 3)]);
    }

    #[test]
    fn test_enumerate_slice_maps_rejects_parity_mismatch() {
        // order 5 has an odd (self-mirrored) interior depth; order 6 doesn't.
        assert!(enumerate_slice_maps(5, 6).is_empty());
    }

    #[test]
    fn test_remap_formula_preserves_move_count() {
        let map = SliceMap::identity(5);
        let formula = Formula::new(vec![CubeMove::new(Axis::F, 1, 2)]);
        let remapped = map.remap_formula(&formula);
        assert_eq!(remapped.cost(), 1);
    }
}
