//! Bounded-depth cube formula searcher (§4.3).
//!
//! DFS over move sequences, pruned by an axis-run ordering rule, a
//! face-rotation "closure" requirement, and an inner-rotation budget
//! (grounded on `cube.cpp`'s `InnerRotationCounts` and
//! `search_face_formula.cpp`'s `CheckValid`/`Dfs`).

use super::slice_map::enumerate_slice_maps;
use super::state::{Axis, Cube, CubeMove, Palette, ALL_FACES};
use crate::formula::{is_cost_effective, ChangeFilters, Formula};
use std::collections::HashMap;

const AXES: [Axis; 3] = [Axis::F, Axis::D, Axis::R];

/// Tracks, for each (axis, depth) with depth not extremal, the signed
/// turn count modulo 4 applied so far (§4.3 "Inner-rotation budget").
#[derive(Debug, Clone, Default)]
struct InnerRotationCounts {
    counts: HashMap<(usize, usize), i32>,
    distance_from_all_zero: i32,
}

impl InnerRotationCounts {
    fn axis_index(axis: Axis) -> usize {
        match axis {
            Axis::F => 0,
            Axis::D => 1,
            Axis::R => 2,
        }
    }

    /// Applies `mv`, returning the signed change in `distance_from_all_zero`
    /// so the caller can undo it cheaply on backtrack.
    fn add(&mut self, mv: CubeMove, order: usize) -> i32 {
        if mv.is_face_rotation(order) {
            return 0;
        }
        let key = (Self::axis_index(mv.axis), mv.depth);
        let before = *self.counts.get(&key).unwrap_or(&0);
        let after = (before + mv.sign as i32).rem_euclid(4);
        self.counts.insert(key, after);
        let delta = distance(after) - distance(before);
        self.distance_from_all_zero += delta;
        delta
    }

    fn undo(&mut self, mv: CubeMove, order: usize, delta: i32) {
        if mv.is_face_rotation(order) {
            return;
        }
        self.distance_from_all_zero -= delta;
        let key = (Self::axis_index(mv.axis), mv.depth);
        let cur = *self.counts.get(&key).unwrap_or(&0);
        self.counts.insert(key, (cur - mv.sign as i32).rem_euclid(4));
    }
}

fn distance(count: i32) -> i32 {
    let c = count.rem_euclid(4);
    c.min(4 - c)
}

/// Config for `CubeFormulaSearcher` (§4.3, §9.1 ambient-config section).
#[derive(Debug, Clone)]
pub struct CubeSearchConfig {
    pub max_depth: usize,
    pub max_inner_budget: i32,
    pub max_conjugate_depth: usize,
    pub max_cost: usize,
}

impl Default for CubeSearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 6,
            max_inner_budget: 3,
            max_conjugate_depth: 1,
            max_cost: 30,
        }
    }
}

/// Output of `CubeFormulaSearcher::search` (§4.3): `rainbow ⊆ normal`.
#[derive(Debug, Default)]
pub struct CubeFormulaLibrary {
    pub normal: Vec<Formula<CubeMove>>,
    pub rainbow: Vec<Formula<CubeMove>>,
}

pub struct CubeFormulaSearcher {
    pub order: usize,
    pub config: CubeSearchConfig,
}

impl CubeFormulaSearcher {
    pub fn new(order: usize, config: CubeSearchConfig) -> Self {
        Self { order, config }
    }

    fn candidate_moves(&self) -> Vec<CubeMove> {
        let mut moves = Vec::new();
        for &axis in &AXES {
            for depth in 0..self.order {
                for sign in [1i8, -1] {
                    moves.push(CubeMove::new(axis, sign, depth));
                }
            }
        }
        moves
    }

    /// Runs the DFS and returns the deduplicated normal/rainbow libraries.
    pub fn search(&self) -> CubeFormulaLibrary {
        let solved_six = Cube::new(self.order, Palette::Six);
        let solved_rainbow = Cube::new(self.order, Palette::Rainbow);
        let labeled_ref = Cube::labeled(self.order);

        let mut raw_normal: Vec<Formula<CubeMove>> = Vec::new();
        let mut raw_rainbow: Vec<Formula<CubeMove>> = Vec::new();

        let moves = self.candidate_moves();
        let mut path: Vec<CubeMove> = Vec::new();
        let mut counts = InnerRotationCounts::default();

        self.dfs(
            &moves,
            &mut path,
            &mut counts,
            &solved_six,
            &solved_rainbow,
            &labeled_ref,
            &mut raw_normal,
            &mut raw_rainbow,
        );

        let mut normal = dedup_by_permutation(raw_normal);
        let mut rainbow = dedup_by_permutation(raw_rainbow);

        self.augment_by_conjugation(&mut normal, &mut rainbow, &solved_six, &solved_rainbow, &labeled_ref);
        self.augment_by_symmetry(&mut normal, &mut rainbow, &solved_six, &solved_rainbow, &labeled_ref);

        CubeFormulaLibrary {
            normal: dedup_by_permutation(normal),
            rainbow: dedup_by_permutation(rainbow),
        }
    }

    /// For each existing formula `F` and each generator `g`, constructs
    /// `g·F·g⁻¹` and re-validates it through the same acceptance gate as the
    /// original search (§4.3 conjugation augmentation), for
    /// `max_conjugate_depth` rounds.
    #[allow(clippy::too_many_arguments)]
    fn augment_by_conjugation(
        &self,
        normal: &mut Vec<Formula<CubeMove>>,
        rainbow: &mut Vec<Formula<CubeMove>>,
        solved_six: &Cube,
        solved_rainbow: &Cube,
        labeled_ref: &Cube,
    ) {
        if self.config.max_conjugate_depth == 0 {
            return;
        }
        let generators = self.candidate_moves();
        let mut frontier = normal.clone();
        for _ in 0..self.config.max_conjugate_depth {
            let mut additions_normal = Vec::new();
            let mut additions_rainbow = Vec::new();
            for formula in &frontier {
                for &g in &generators {
                    let conjugated = formula.conjugate_with(&[g], &[g.inverse()]);
                    self.try_accept(
                        &conjugated.moves,
                        solved_six,
                        solved_rainbow,
                        labeled_ref,
                        &mut additions_normal,
                        &mut additions_rainbow,
                    );
                }
            }
            normal.extend(additions_normal.iter().cloned());
            rainbow.extend(additions_rainbow.iter().cloned());
            frontier = additions_normal;
        }
    }

    /// Relabels axes (permuting F/D/R) and mirrors depth through the cube's
    /// center to produce isotopes of each formula (§4.3 symmetry
    /// augmentation), re-validated through the same acceptance gate.
    #[allow(clippy::too_many_arguments)]
    fn augment_by_symmetry(
        &self,
        normal: &mut Vec<Formula<CubeMove>>,
        rainbow: &mut Vec<Formula<CubeMove>>,
        solved_six: &Cube,
        solved_rainbow: &Cube,
        labeled_ref: &Cube,
    ) {
        let base = normal.clone();
        let mut additions_normal = Vec::new();
        let mut additions_rainbow = Vec::new();
        for formula in &base {
            for variant in isotopes(formula, self.order) {
                self.try_accept(
                    &variant,
                    solved_six,
                    solved_rainbow,
                    labeled_ref,
                    &mut additions_normal,
                    &mut additions_rainbow,
                );
            }
        }
        normal.extend(additions_normal);
        rainbow.extend(additions_rainbow);
    }

    #[allow(clippy::too_many_arguments)]
    fn dfs(
        &self,
        moves: &[CubeMove],
        path: &mut Vec<CubeMove>,
        counts: &mut InnerRotationCounts,
        solved_six: &Cube,
        solved_rainbow: &Cube,
        labeled_ref: &Cube,
        raw_normal: &mut Vec<Formula<CubeMove>>,
        raw_rainbow: &mut Vec<Formula<CubeMove>>,
    ) {
        if !path.is_empty() {
            self.try_accept(path, solved_six, solved_rainbow, labeled_ref, raw_normal, raw_rainbow);
        }
        if path.len() >= self.config.max_depth {
            return;
        }
        for &mv in moves {
            if !self.ordering_ok(path, mv) {
                continue;
            }
            let delta = counts.add(mv, self.order);
            let within_budget = counts.distance_from_all_zero <= self.config.max_inner_budget;
            if within_budget {
                path.push(mv);
                self.dfs(
                    moves,
                    path,
                    counts,
                    solved_six,
                    solved_rainbow,
                    labeled_ref,
                    raw_normal,
                    raw_rainbow,
                );
                path.pop();
            }
            counts.undo(mv, self.order, delta);
        }
    }

    /// Ordering rule (§4.3): within a same-axis run, depth must be
    /// non-decreasing; an immediate inverse at equal depth is forbidden (a
    /// no-op); and a run may not reach 3 same-sign turns or 2 same-negative-
    /// sign turns. Moving to a different axis always starts a fresh run.
    fn ordering_ok(&self, path: &[CubeMove], mv: CubeMove) -> bool {
        let Some(&last) = path.last() else {
            return true;
        };
        if last.axis as u8 != mv.axis as u8 {
            return true;
        }
        if mv.depth < last.depth {
            return false;
        }
        if mv.depth == last.depth && mv == last.inverse() {
            return false;
        }
        let same_sign_run = path
            .iter()
            .rev()
            .take_while(|m| m.axis as u8 == mv.axis as u8 && m.sign == mv.sign)
            .count();
        let max_run = if mv.sign < 0 { 1 } else { 2 };
        same_sign_run < max_run
    }

    #[allow(clippy::too_many_arguments)]
    fn try_accept(
        &self,
        path: &[CubeMove],
        solved_six: &Cube,
        solved_rainbow: &Cube,
        labeled_ref: &Cube,
        raw_normal: &mut Vec<Formula<CubeMove>>,
        raw_rainbow: &mut Vec<Formula<CubeMove>>,
    ) {
        let last = *path.last().unwrap();
        if last.is_face_rotation(self.order) {
            return; // must close on a non-face-rotation move (§4.3).
        }

        let mut six = solved_six.clone();
        for &mv in path {
            six.apply_move(mv);
        }
        if !faces_match(&six, solved_six, 1, self.order - 1) {
            return; // breaks the 6-color class structure.
        }

        let mut rainbow = solved_rainbow.clone();
        for &mv in path {
            rainbow.apply_move(mv);
        }
        let is_rainbow_valid = faces_match(&rainbow, solved_rainbow, 0, self.order);

        let mut labeled = labeled_ref.clone();
        for &mv in path {
            labeled.apply_move(mv);
        }
        let changes: Vec<(usize, usize)> = (0..6 * self.order * self.order)
            .filter_map(|from| {
                let to = labeled.get_flat(from) as usize;
                if to != from {
                    Some((from, to))
                } else {
                    None
                }
            })
            .collect();

        let per_face = self.order * self.order;
        let filters = ChangeFilters {
            same_face: &|from, to| from / per_face == to / per_face,
            is_corner_or_center: &|pos| is_corner_or_center(self.order, pos),
        };
        let Some(changes) = crate::formula::filter_facelet_changes(changes, &filters) else {
            return;
        };

        if !is_cost_effective(changes.len(), path.len(), self.config.max_cost) {
            return;
        }

        let formula = Formula::with_facelet_changes(path.to_vec(), changes);
        if is_rainbow_valid {
            raw_rainbow.push(formula.clone());
        }
        raw_normal.push(formula);
    }
}

/// Builds a formula library for `target_order` by exhaustively searching a
/// smaller, cheaper `reference_order` cube and specializing every hit onto
/// `target_order` via every valid mirror-paired slice map (§4.4). This is
/// the up-front substitute for re-expanding every beam-search node by slice
/// remapping (§4.5's "critical move"): one search investment at the
/// reference order ends up covering every valid interior-depth placement a
/// node-local reexpansion would otherwise have to rediscover.
pub fn build_specialized_library(reference_order: usize, target_order: usize, reference_config: CubeSearchConfig) -> CubeFormulaLibrary {
    let base = CubeFormulaSearcher::new(reference_order, reference_config).search();
    if reference_order == target_order {
        return base;
    }

    let maps = enumerate_slice_maps(reference_order, target_order);
    let mut normal = Vec::new();
    let mut rainbow = Vec::new();
    for map in &maps {
        normal.extend(base.normal.iter().map(|f| map.remap_formula(f)));
        rainbow.extend(base.rainbow.iter().map(|f| map.remap_formula(f)));
    }

    CubeFormulaLibrary {
        normal: dedup_by_permutation(normal),
        rainbow: dedup_by_permutation(rainbow),
    }
}

/// The 6 permutations of `[F, D, R]`, used to relabel a formula's axes.
fn axis_permutations() -> [[Axis; 3]; 6] {
    use Axis::{D, F, R};
    [[F, D, R], [F, R, D], [D, F, R], [D, R, F], [R, F, D], [R, D, F]]
}

fn relabel_axis(axis: Axis, perm: [Axis; 3]) -> Axis {
    match axis {
        Axis::F => perm[0],
        Axis::D => perm[1],
        Axis::R => perm[2],
    }
}

/// Every nontrivial isotope of `formula`: one per nonidentity axis
/// permutation, plus the depth-mirrored variant (reflecting every move's
/// depth through the cube's center) (§4.3 "Relabel axes and mirror depths to
/// produce isotopes").
fn isotopes(formula: &Formula<CubeMove>, order: usize) -> Vec<Vec<CubeMove>> {
    let mut out = Vec::new();
    for perm in axis_permutations() {
        if perm == [Axis::F, Axis::D, Axis::R] {
            continue;
        }
        out.push(
            formula
                .moves
                .iter()
                .map(|mv| CubeMove::new(relabel_axis(mv.axis, perm), mv.sign, mv.depth))
                .collect(),
        );
    }
    out.push(
        formula
            .moves
            .iter()
            .map(|mv| CubeMove::new(mv.axis, mv.sign, order - 1 - mv.depth))
            .collect(),
    );
    out
}

/// Whether `a` and `b` agree on every cell in `[lo, hi)` × `[lo, hi)` of
/// every face (§4.3 validity: interior-only for "normal", full-board for
/// "rainbow").
fn faces_match(a: &Cube, b: &Cube, lo: usize, hi: usize) -> bool {
    for &face in &ALL_FACES {
        for y in lo..hi {
            for x in lo..hi {
                if a.get(face, y, x) != b.get(face, y, x) {
                    return false;
                }
            }
        }
    }
    true
}

fn is_corner_or_center(order: usize, pos: usize) -> bool {
    let per_face = order * order;
    let rem = pos % per_face;
    let y = rem / order;
    let x = rem % order;
    let is_corner = (y == 0 || y == order - 1) && (x == 0 || x == order - 1);
    let is_center = order % 2 == 1 && y == order / 2 && x == order / 2;
    is_corner || is_center
}

/// Deduplicates by induced-permutation, keeping the cheapest formula per
/// distinct permutation (§4.3 Deduplication).
fn dedup_by_permutation(formulas: Vec<Formula<CubeMove>>) -> Vec<Formula<CubeMove>> {
    let mut best: HashMap<Vec<(usize, usize)>, Formula<CubeMove>> = HashMap::new();
    for formula in formulas {
        let mut key = formula.facelet_changes.clone().unwrap_or_default();
        key.sort_unstable();
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
    fn test_search_finds_some_normal_formulas_at_small_depth() {
        let searcher = CubeFormulaSearcher::new(
            5,
            CubeSearchConfig {
                max_depth: 3,
                max_inner_budget: 2,
                max_conjugate_depth: 0,
                max_cost: 50,
            },
        );
        let library = searcher.search();
        assert!(library.rainbow.len() <= library.normal.len());
    }

    #[test]
    fn test_dedup_keeps_cheapest() {
        let mut a = Formula::with_facelet_changes(vec![], vec![(0, 1), (1, 0)]);
        a.moves = vec![CubeMove::new(Axis::F, 1, 1), CubeMove::new(Axis::F, -1, 1)];
        let b = Formula::with_facelet_changes(vec![], vec![(1, 0), (0, 1)]);
        let deduped = dedup_by_permutation(vec![a, b.clone()]);
        assert_eq!(deduped.len(), 1);
        assert_eq!(deduped[0].cost(), b.cost());
    }
}
