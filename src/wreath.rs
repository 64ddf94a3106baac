//! Wreath state kernel (§4.6): two interlocking rings of beads sharing two
//! junction positions, each ring sized `size` and split into an inside arc
//! and an outside arc around its two junctions. Grounded on `wreath.cpp`'s
//! `Wreath<siz>` ring-rotation logic, generalized here to the crate's
//! `Formula`/error conventions.

use crate::error::Error;
use crate::formula::Formula;
use std::fmt;
use std::str::FromStr;

/// Which ring a move turns, and in which direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WreathMove {
    A,
    Ap,
    B,
    Bp,
}

impl WreathMove {
    pub fn inverse(&self) -> Self {
        match self {
            WreathMove::A => WreathMove::Ap,
            WreathMove::Ap => WreathMove::A,
            WreathMove::B => WreathMove::Bp,
            WreathMove::Bp => WreathMove::B,
        }
    }
}

impl fmt::Display for WreathMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WreathMove::A => "a",
            WreathMove::Ap => "-a",
            WreathMove::B => "b",
            WreathMove::Bp => "-b",
        };
        write!(f, "{s}")
    }
}

impl FromStr for WreathMove {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "a" => Ok(WreathMove::A),
            "-a" => Ok(WreathMove::Ap),
            "b" => Ok(WreathMove::B),
            "-b" => Ok(WreathMove::Bp),
            _ => Err(Error::InvalidMoveToken(s.to_string())),
        }
    }
}

fn rotate_vec(v: &mut [u8], sign: i8) {
    if sign > 0 {
        v.rotate_right(1);
    } else {
        v.rotate_left(1);
    }
}

/// Non-junction bead colors, one per ring.
pub const BEAD_A: u8 = 0;
pub const BEAD_B: u8 = 1;
/// The two junction beads. Kept distinguishable (rather than a single shared
/// color) so a solver can tell whether the junction pair has been swapped,
/// which is itself part of the puzzle's solved condition.
pub const BEAD_C0: u8 = 2;
pub const BEAD_C1: u8 = 3;

/// Where one of the two junction beads currently sits: which ring (`0` = A,
/// `1` = B) and which index within that ring's own sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WreathPosition {
    pub ring: usize,
    pub index: usize,
}

/// Two rings of beads sharing two physical junction positions (§4.6). Both
/// rings are built from a single `size`: each splits into an inside arc and
/// an outside arc around its two junctions, with ring B's inside arc always
/// one bead longer than ring A's (`wreath.cpp`'s `Wreath<siz>` layout):
///
/// ```text
/// inside_a  = (size - 1) / 4
/// outside_a = size - inside_a - 2
/// inside_b  = inside_a + 1
/// outside_b = size - inside_b - 2
/// ```
///
/// Within each ring's own sequence, index `0` and index `inside_<ring> + 1`
/// are its two junction slots; the inside arc occupies the indices between
/// them, the outside arc the rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wreath {
    pub size: usize,
    pub inside_a: usize,
    pub outside_a: usize,
    pub inside_b: usize,
    pub outside_b: usize,
    ring_a: Vec<u8>,
    ring_b: Vec<u8>,
    c_positions: [WreathPosition; 2],
}

impl Wreath {
    pub fn new(size: usize) -> Self {
        debug_assert!(size >= 6, "wreath needs room for two junctions and both arcs");
        let inside_a = (size - 1) / 4;
        let outside_a = size - inside_a - 2;
        let inside_b = inside_a + 1;
        let outside_b = size - inside_b - 2;
        let mut wreath = Wreath {
            size,
            inside_a,
            outside_a,
            inside_b,
            outside_b,
            ring_a: vec![BEAD_A; size],
            ring_b: vec![BEAD_B; size],
            c_positions: [WreathPosition { ring: 0, index: 0 }; 2],
        };
        wreath.reset();
        wreath
    }

    /// The two junction indices within `ring`'s own sequence (`0` = A, `1` =
    /// B): index `0` and index `inside_<ring> + 1`.
    fn junction_indices(&self, ring: usize) -> [usize; 2] {
        if ring == 0 {
            [0, self.inside_a + 1]
        } else {
            [0, self.inside_b + 1]
        }
    }

    pub fn reset(&mut self) {
        self.ring_a.fill(BEAD_A);
        self.ring_b.fill(BEAD_B);
        let [j0a, j1a] = self.junction_indices(0);
        let [j0b, j1b] = self.junction_indices(1);
        self.ring_a[j0a] = BEAD_C0;
        self.ring_a[j1a] = BEAD_C1;
        self.ring_b[j0b] = BEAD_C0;
        self.ring_b[j1b] = BEAD_C1;
        self.recompute_c_positions();
    }

    /// Full scan for the two junction beads' current locations
    /// (`c_positions`), run after every structural change rather than
    /// tracked incrementally, since a single ring rotation can move a
    /// junction bead to any index within that ring.
    fn recompute_c_positions(&mut self) {
        let mut found: [Option<WreathPosition>; 2] = [None, None];
        for (ring, beads) in [&self.ring_a, &self.ring_b].into_iter().enumerate() {
            for (index, &bead) in beads.iter().enumerate() {
                if bead == BEAD_C0 {
                    found[0] = Some(WreathPosition { ring, index });
                } else if bead == BEAD_C1 {
                    found[1] = Some(WreathPosition { ring, index });
                }
            }
        }
        self.c_positions = [
            found[0].expect("BEAD_C0 must be present in exactly one ring slot"),
            found[1].expect("BEAD_C1 must be present in exactly one ring slot"),
        ];
    }

    /// After `moved_ring` turns, copies whatever beads now sit at its
    /// junction indices into the other ring's junction indices, since the
    /// two rings physically share those bead positions.
    fn sync_junctions(&mut self, moved_ring: usize) {
        let moved_idx = self.junction_indices(moved_ring);
        let other_ring = 1 - moved_ring;
        let other_idx = self.junction_indices(other_ring);
        let vals = if moved_ring == 0 {
            [self.ring_a[moved_idx[0]], self.ring_a[moved_idx[1]]]
        } else {
            [self.ring_b[moved_idx[0]], self.ring_b[moved_idx[1]]]
        };
        if other_ring == 0 {
            self.ring_a[other_idx[0]] = vals[0];
            self.ring_a[other_idx[1]] = vals[1];
        } else {
            self.ring_b[other_idx[0]] = vals[0];
            self.ring_b[other_idx[1]] = vals[1];
        }
        self.recompute_c_positions();
    }

    pub fn apply_move(&mut self, mv: WreathMove) {
        match mv {
            WreathMove::A => {
                rotate_vec(&mut self.ring_a, 1);
                self.sync_junctions(0);
            }
            WreathMove::Ap => {
                rotate_vec(&mut self.ring_a, -1);
                self.sync_junctions(0);
            }
            WreathMove::B => {
                rotate_vec(&mut self.ring_b, 1);
                self.sync_junctions(1);
            }
            WreathMove::Bp => {
                rotate_vec(&mut self.ring_b, -1);
                self.sync_junctions(1);
            }
        }
    }

    pub fn apply_formula(&mut self, formula: &Formula<WreathMove>) {
        match &formula.facelet_changes {
            Some(changes) => {
                let gathered: Vec<u8> = changes.iter().map(|&(from, _)| self.get_flat(from)).collect();
                for (&(_, to), &color) in changes.iter().zip(gathered.iter()) {
                    self.set_flat(to, color);
                }
                self.recompute_c_positions();
            }
            None => {
                for &mv in &formula.moves {
                    self.apply_move(mv);
                }
            }
        }
    }

    /// Flattens a position to `0..size` for ring A, `size..2*size` for ring
    /// B (§4.2 flattening convention; the two junction indices of each ring
    /// occupy distinct flattened slots kept equal by `sync_junctions`).
    pub fn flatten_a(&self, index: usize) -> usize {
        index
    }

    pub fn flatten_b(&self, index: usize) -> usize {
        self.size + index
    }

    pub(crate) fn get_flat(&self, pos: usize) -> u8 {
        if pos < self.size {
            self.ring_a[pos]
        } else {
            self.ring_b[pos - self.size]
        }
    }

    fn set_flat(&mut self, pos: usize, color: u8) {
        if pos < self.size {
            self.ring_a[pos] = color;
        } else {
            self.ring_b[pos - self.size] = color;
        }
    }

    pub fn total_len(&self) -> usize {
        self.size * 2
    }

    /// Where each of the two distinguishable junction beads currently sits.
    pub fn c_positions(&self) -> [WreathPosition; 2] {
        self.c_positions
    }

    /// Count of differing beads across both rings (§4.5 scoring).
    pub fn diff(&self, other: &Wreath) -> usize {
        debug_assert_eq!(self.size, other.size);
        (0..self.total_len()).filter(|&p| self.get_flat(p) != other.get_flat(p)).count()
    }
}

/// Builds a labeled reference wreath (each flattened position carrying a
/// unique label) for computing a formula's facelet-change map (§4.2).
pub fn labeled(size: usize) -> Wreath {
    let mut wreath = Wreath::new(size);
    for i in 0..size {
        wreath.ring_a[i] = i as u8;
    }
    for i in 0..size {
        wreath.ring_b[i] = (size + i) as u8;
    }
    wreath
}

/// Bounded-depth formula searcher for the wreath (§4.3 generalized to
/// wreath's much smaller move alphabet — just the four `WreathMove`
/// variants, no axis/depth product).
pub struct WreathFormulaSearcher {
    pub size: usize,
    pub max_depth: usize,
    pub max_cost: usize,
}

impl WreathFormulaSearcher {
    pub fn new(size: usize, max_depth: usize, max_cost: usize) -> Self {
        Self { size, max_depth, max_cost }
    }

    pub fn search(&self) -> Vec<Formula<WreathMove>> {
        let reference = labeled(self.size);
        let moves = [WreathMove::A, WreathMove::Ap, WreathMove::B, WreathMove::Bp];
        let mut found = Vec::new();
        let mut path = Vec::new();
        self.dfs(&moves, &mut path, &reference, &mut found);
        found
    }

    fn dfs(&self, moves: &[WreathMove; 4], path: &mut Vec<WreathMove>, reference: &Wreath, found: &mut Vec<Formula<WreathMove>>) {
        if !path.is_empty() {
            self.try_accept(path, reference, found);
        }
        if path.len() >= self.max_depth {
            return;
        }
        for &mv in moves {
            if path.last().is_some_and(|&last| last == mv.inverse()) {
                continue;
            }
            path.push(mv);
            self.dfs(moves, path, reference, found);
            path.pop();
        }
    }

    fn try_accept(&self, path: &[WreathMove], reference: &Wreath, found: &mut Vec<Formula<WreathMove>>) {
        let mut applied = reference.clone();
        for &mv in path {
            applied.apply_move(mv);
        }
        let total = applied.total_len();
        let changes: Vec<(usize, usize)> = (0..total)
            .filter_map(|from| {
                let to = applied.get_flat(from) as usize;
                (to != from).then_some((from, to))
            })
            .collect();
        if changes.is_empty() {
            return;
        }
        if !crate::formula::is_cost_effective(changes.len(), path.len(), self.max_cost) {
            return;
        }
        found.push(Formula::with_facelet_changes(path.to_vec(), changes));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_then_inverse_is_identity() {
        let mut wreath = Wreath::new(10);
        let solved = wreath.clone();
        for mv in [WreathMove::A, WreathMove::B, WreathMove::Ap, WreathMove::Bp] {
            wreath.apply_move(mv);
            wreath.apply_move(mv.inverse());
            assert_eq!(wreath, solved);
        }
    }

    #[test]
    fn test_shared_junction_stays_synced_after_either_ring_moves() {
        let mut wreath = Wreath::new(12);
        wreath.apply_move(WreathMove::A);
        for ring in [0usize, 1] {
            let [j0, j1] = wreath.junction_indices(ring);
            let other = 1 - ring;
            let [o0, o1] = wreath.junction_indices(other);
            let (this_ring, other_ring) = if ring == 0 { (&wreath.ring_a, &wreath.ring_b) } else { (&wreath.ring_b, &wreath.ring_a) };
            assert_eq!(this_ring[j0], other_ring[o0]);
            assert_eq!(this_ring[j1], other_ring[o1]);
        }
        wreath.apply_move(WreathMove::B);
        assert_eq!(wreath.ring_a[wreath.junction_indices(0)[0]], wreath.ring_b[wreath.junction_indices(1)[0]]);
    }

    #[test]
    fn test_arc_lengths_follow_single_size_formula() {
        let wreath = Wreath::new(13);
        assert_eq!(wreath.inside_a, (13 - 1) / 4);
        assert_eq!(wreath.outside_a, 13 - wreath.inside_a - 2);
        assert_eq!(wreath.inside_b, wreath.inside_a + 1);
        assert_eq!(wreath.outside_b, 13 - wreath.inside_b - 2);
    }

    #[test]
    fn test_junction_beads_stay_distinguishable_and_locatable() {
        let mut wreath = Wreath::new(10);
        wreath.apply_move(WreathMove::A);
        wreath.apply_move(WreathMove::B);
        wreath.apply_move(WreathMove::Ap);
        let positions = wreath.c_positions();
        assert_ne!(positions[0], positions[1]);
        assert_eq!(wreath.get_flat(if positions[0].ring == 0 { positions[0].index } else { wreath.size + positions[0].index }), BEAD_C0);
        assert_eq!(wreath.get_flat(if positions[1].ring == 0 { positions[1].index } else { wreath.size + positions[1].index }), BEAD_C1);
    }

    #[test]
    fn test_move_parse_roundtrip() {
        for s in ["a", "-a", "b", "-b"] {
            let mv = WreathMove::from_str(s).unwrap();
            assert_eq!(mv.to_string(), s);
        }
    }

    #[test]
    fn test_rotation_changes_diff_from_solved() {
        let mut wreath = Wreath::new(10);
        let solved = wreath.clone();
        wreath.apply_move(WreathMove::A);
        assert!(wreath.diff(&solved) > 0);
    }

    #[test]
    fn test_searcher_finds_nonempty_formulas() {
        let searcher = WreathFormulaSearcher::new(10, 2, 20);
        let formulas = searcher.search();
        assert!(formulas.iter().all(|f| f.n_changes() > 0));
    }
}
