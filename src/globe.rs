//! Globe state kernel (§4.7): a cylindrical grid of row-bands, each
//! independently rotatable, plus a "flip" that folds a north/south row
//! pair through the poles. Grounded on `globe.cpp`'s rotate/flip state
//! transitions and its flip-depth-bounded formula search.

use crate::error::Error;
use crate::formula::{is_cost_effective, Formula};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// A move on one row-band (`Rotate`) or on a north/south pair of bands
/// (`Flip`), addressed by unit index (§4.7 `GlobeMove`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlobeMove {
    Rotate { unit: usize, sign: i8 },
    Flip { unit: usize },
}

impl GlobeMove {
    pub fn inverse(&self) -> Self {
        match *self {
            GlobeMove::Rotate { unit, sign } => GlobeMove::Rotate { unit, sign: -sign },
            GlobeMove::Flip { unit } => GlobeMove::Flip { unit },
        }
    }
}

impl fmt::Display for GlobeMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GlobeMove::Rotate { unit, sign } if *sign < 0 => write!(f, "-g{unit}"),
            GlobeMove::Rotate { unit, .. } => write!(f, "g{unit}"),
            GlobeMove::Flip { unit } => write!(f, "flip{unit}"),
        }
    }
}

impl FromStr for GlobeMove {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(rest) = s.strip_prefix("flip") {
            let unit: usize = rest.parse().map_err(|_| Error::InvalidMoveToken(s.to_string()))?;
            return Ok(GlobeMove::Flip { unit });
        }
        let (sign, rest) = match s.strip_prefix('-') {
            Some(rest) => (-1, rest),
            None => (1, s),
        };
        let rest = rest.strip_prefix('g').ok_or_else(|| Error::InvalidMoveToken(s.to_string()))?;
        let unit: usize = rest.parse().map_err(|_| Error::InvalidMoveToken(s.to_string()))?;
        Ok(GlobeMove::Rotate { unit, sign })
    }
}

/// A cylindrical grid of `rows` row-bands (`rows` even: each unit `u <
/// rows/2` pairs with its antipodal band `rows - 1 - u`) of `cols` beads
/// each (§4.7).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Globe {
    pub rows: usize,
    pub cols: usize,
    bands: Vec<Vec<u8>>,
}

impl Globe {
    pub fn new(rows: usize, cols: usize) -> Self {
        debug_assert!(rows % 2 == 0, "globe rows must pair north/south bands");
        let mut globe = Globe {
            rows,
            cols,
            bands: vec![vec![0; cols]; rows],
        };
        globe.reset();
        globe
    }

    pub fn reset(&mut self) {
        for (r, band) in self.bands.iter_mut().enumerate() {
            band.fill(r as u8);
        }
    }

    pub fn flatten(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    pub fn unflatten(&self, pos: usize) -> (usize, usize) {
        (pos / self.cols, pos % self.cols)
    }

    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.bands[row][col]
    }

    pub fn set(&mut self, row: usize, col: usize, color: u8) {
        self.bands[row][col] = color;
    }

    pub(crate) fn get_flat(&self, pos: usize) -> u8 {
        let (row, col) = self.unflatten(pos);
        self.get(row, col)
    }

    fn set_flat(&mut self, pos: usize, color: u8) {
        let (row, col) = self.unflatten(pos);
        self.set(row, col, color);
    }

    pub fn apply_move(&mut self, mv: GlobeMove) {
        match mv {
            GlobeMove::Rotate { unit, sign } => {
                if sign > 0 {
                    self.bands[unit].rotate_right(1);
                } else {
                    self.bands[unit].rotate_left(1);
                }
            }
            GlobeMove::Flip { unit } => {
                let partner = self.rows - 1 - unit;
                let top = self.bands[unit].clone();
                let bottom = self.bands[partner].clone();
                for c in 0..self.cols {
                    self.bands[unit][c] = bottom[self.cols - 1 - c];
                    self.bands[partner][c] = top[self.cols - 1 - c];
                }
            }
        }
    }

    pub fn apply_formula(&mut self, formula: &Formula<GlobeMove>) {
        match &formula.facelet_changes {
            Some(changes) => {
                let gathered: Vec<u8> = changes.iter().map(|&(from, _)| self.get_flat(from)).collect();
                for (&(_, to), &color) in changes.iter().zip(gathered.iter()) {
                    self.set_flat(to, color);
                }
            }
            None => {
                for &mv in &formula.moves {
                    self.apply_move(mv);
                }
            }
        }
    }

    pub fn diff(&self, other: &Globe) -> usize {
        debug_assert_eq!((self.rows, self.cols), (other.rows, other.cols));
        (0..self.rows * self.cols).filter(|&p| self.get_flat(p) != other.get_flat(p)).count()
    }
}

/// Builds a labeled reference globe (every cell carrying a unique label)
/// for computing a formula's facelet-change map (§4.2).
pub fn labeled(rows: usize, cols: usize) -> Globe {
    let mut globe = Globe::new(rows, cols);
    for row in 0..rows {
        for col in 0..cols {
            let label = globe.flatten(row, col);
            globe.set(row, col, label as u8);
        }
    }
    globe
}

/// Bounded-depth formula searcher for the globe (§4.7), pruned by a
/// flip-depth ceiling: flips are comparatively expensive/disruptive moves,
/// so the search caps how many may appear in one formula independent of
/// the overall depth cap (grounded on `globe.cpp`'s flip-depth-bounded
/// `Dfs`).
pub struct GlobeSearchConfig {
    pub max_depth: usize,
    pub max_flip_depth: usize,
    pub max_cost: usize,
    /// Rounds of conjugation augmentation to run after the base search
    /// (§4.3 "For each existing formula F and each generator g, construct
    /// g·F·g⁻¹").
    pub max_conjugate_depth: usize,
}

impl Default for GlobeSearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 5,
            max_flip_depth: 4,
            max_cost: 30,
            max_conjugate_depth: 1,
        }
    }
}

pub struct GlobeFormulaSearcher {
    pub rows: usize,
    pub cols: usize,
    pub config: GlobeSearchConfig,
}

impl GlobeFormulaSearcher {
    pub fn new(rows: usize, cols: usize, config: GlobeSearchConfig) -> Self {
        Self { rows, cols, config }
    }

    fn candidate_moves(&self) -> Vec<GlobeMove> {
        let mut moves = Vec::new();
        for unit in 0..self.rows {
            for sign in [1i8, -1] {
                moves.push(GlobeMove::Rotate { unit, sign });
            }
        }
        for unit in 0..self.rows / 2 {
            moves.push(GlobeMove::Flip { unit });
        }
        moves
    }

    pub fn search(&self) -> Vec<Formula<GlobeMove>> {
        let reference = labeled(self.rows, self.cols);
        let moves = self.candidate_moves();
        let mut path = Vec::new();
        let mut found = Vec::new();
        self.dfs(&moves, &mut path, 0, &reference, &mut found);
        self.augment_by_conjugation(&mut found, &reference);
        self.augment_by_symmetry(&mut found, &reference);
        dedup_by_facelet_changes(found)
    }

    /// For each existing formula `F` and each single-unit rotate generator
    /// `g`, constructs `g·F·g⁻¹` (§4.3 conjugation augmentation).
    fn augment_by_conjugation(&self, formulas: &mut Vec<Formula<GlobeMove>>, reference: &Globe) {
        if self.config.max_conjugate_depth == 0 {
            return;
        }
        let generators: Vec<GlobeMove> = (0..self.rows)
            .flat_map(|unit| [GlobeMove::Rotate { unit, sign: 1 }, GlobeMove::Rotate { unit, sign: -1 }])
            .collect();
        let mut frontier = formulas.clone();
        for _ in 0..self.config.max_conjugate_depth {
            let mut additions = Vec::new();
            for formula in &frontier {
                for &g in &generators {
                    let conjugated = formula.conjugate_with(&[g], &[g.inverse()]);
                    self.try_accept(&conjugated.moves, reference, &mut additions);
                }
            }
            formulas.extend(additions.iter().cloned());
            frontier = additions;
        }
    }

    /// Three concrete symmetries of the globe (§4.3 "Relabel axes and mirror
    /// depths to produce isotopes", generalized to this puzzle's own
    /// geometry): a left/right mirror (reversing every rotate's direction),
    /// an up/down mirror (swapping antipodal bands), and a whole-cylinder
    /// one-column shift (conjugation by simultaneously rotating every band).
    fn augment_by_symmetry(&self, formulas: &mut Vec<Formula<GlobeMove>>, reference: &Globe) {
        let base = formulas.clone();
        let mut additions = Vec::new();
        let shift_forward: Vec<GlobeMove> = (0..self.rows).map(|unit| GlobeMove::Rotate { unit, sign: 1 }).collect();
        let shift_backward: Vec<GlobeMove> = (0..self.rows).map(|unit| GlobeMove::Rotate { unit, sign: -1 }).collect();
        for formula in &base {
            let mirrored_lr: Vec<GlobeMove> = formula.moves.iter().map(|&mv| mirror_lr(mv)).collect();
            let mirrored_ud: Vec<GlobeMove> = formula.moves.iter().map(|&mv| mirror_ud(mv, self.rows)).collect();
            let shifted = formula.conjugate_with(&shift_forward, &shift_backward);
            for variant in [mirrored_lr, mirrored_ud, shifted.moves] {
                self.try_accept(&variant, reference, &mut additions);
            }
        }
        formulas.extend(additions);
    }

    fn dfs(
        &self,
        moves: &[GlobeMove],
        path: &mut Vec<GlobeMove>,
        flip_depth: usize,
        reference: &Globe,
        found: &mut Vec<Formula<GlobeMove>>,
    ) {
        if !path.is_empty() {
            self.try_accept(path, reference, found);
        }
        if path.len() >= self.config.max_depth {
            return;
        }
        for &mv in moves {
            if path.last().is_some_and(|&last| last == mv.inverse()) {
                continue;
            }
            let next_flip_depth = flip_depth + matches!(mv, GlobeMove::Flip { .. }) as usize;
            if next_flip_depth > self.config.max_flip_depth {
                continue;
            }
            path.push(mv);
            self.dfs(moves, path, next_flip_depth, reference, found);
            path.pop();
        }
    }

    fn try_accept(&self, path: &[GlobeMove], reference: &Globe, found: &mut Vec<Formula<GlobeMove>>) {
        let mut applied = reference.clone();
        for &mv in path {
            applied.apply_move(mv);
        }
        let total = self.rows * self.cols;
        let changes: Vec<(usize, usize)> = (0..total)
            .filter_map(|from| {
                let to = applied.get_flat(from) as usize;
                (to != from).then_some((from, to))
            })
            .collect();
        if changes.is_empty() {
            return;
        }
        if !is_cost_effective(changes.len(), path.len(), self.config.max_cost) {
            return;
        }
        found.push(Formula::with_facelet_changes(path.to_vec(), changes));
    }
}

/// Reverses a rotate's apparent handedness; flips are unaffected since a
/// north/south fold through the poles looks the same mirrored left-right.
fn mirror_lr(mv: GlobeMove) -> GlobeMove {
    match mv {
        GlobeMove::Rotate { unit, sign } => GlobeMove::Rotate { unit, sign: -sign },
        GlobeMove::Flip { unit } => GlobeMove::Flip { unit },
    }
}

/// Swaps each band/flip-pair with its antipodal counterpart.
fn mirror_ud(mv: GlobeMove, rows: usize) -> GlobeMove {
    match mv {
        GlobeMove::Rotate { unit, sign } => GlobeMove::Rotate { unit: rows - 1 - unit, sign },
        GlobeMove::Flip { unit } => GlobeMove::Flip { unit: rows / 2 - 1 - unit },
    }
}

/// Deduplicates by facelet-change map, keeping the cheapest formula per
/// distinct effect (§4.3 Deduplication).
fn dedup_by_facelet_changes(formulas: Vec<Formula<GlobeMove>>) -> Vec<Formula<GlobeMove>> {
    let mut best: HashMap<Vec<(usize, usize)>, Formula<GlobeMove>> = HashMap::new();
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
    fn test_move_parse_roundtrip() {
        for s in ["g0", "-g0", "g3", "flip1"] {
            let mv = GlobeMove::from_str(s).unwrap();
            assert_eq!(mv.to_string(), s);
        }
    }

    #[test]
    fn test_flip_is_self_inverse() {
        let mut globe = Globe::new(4, 6);
        globe.apply_move(GlobeMove::Rotate { unit: 0, sign: 1 });
        let before = globe.clone();
        globe.apply_move(GlobeMove::Flip { unit: 0 });
        globe.apply_move(GlobeMove::Flip { unit: 0 });
        assert_eq!(globe, before);
    }

    #[test]
    fn test_rotate_then_inverse_is_identity() {
        let mut globe = Globe::new(4, 6);
        let solved = globe.clone();
        globe.apply_move(GlobeMove::Rotate { unit: 2, sign: 1 });
        globe.apply_move(GlobeMove::Rotate { unit: 2, sign: -1 });
        assert_eq!(globe, solved);
    }

    #[test]
    fn test_flip_swaps_antipodal_bands() {
        let mut globe = Globe::new(4, 6);
        globe.apply_move(GlobeMove::Flip { unit: 0 });
        let solved = Globe::new(4, 6);
        assert!(globe.diff(&solved) > 0);
    }

    #[test]
    fn test_searcher_respects_flip_depth_budget() {
        let searcher = GlobeFormulaSearcher::new(
            4,
            6,
            GlobeSearchConfig {
                max_depth: 3,
                max_flip_depth: 1,
                max_cost: 40,
                max_conjugate_depth: 1,
            },
        );
        let formulas = searcher.search();
        for formula in &formulas {
            let flip_count = formula.moves.iter().filter(|m| matches!(m, GlobeMove::Flip { .. })).count();
            assert!(flip_count <= 1);
        }
    }
}
