//! The core N×N×N cube state kernel (§3, §4.1).
//!
//! Six faces, each an `order`×`order` grid of colors, connected by a fixed
//! adjacency convention (§6): three axes (F, D, R), each pairing two
//! "cap" faces (which physically rotate under an extremal turn) with four
//! "side" faces (whose border-adjacent line cycles under any turn on that
//! axis, extremal or interior).

use crate::error::Error;
use std::fmt;

/// One of the three turning axes (§3 Move (cube)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    F,
    D,
    R,
}

/// Face identifiers in the order the source enumerates them: top, front,
/// right, back, left, bottom (§6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum FaceId {
    D1 = 0,
    F0 = 1,
    R0 = 2,
    F1 = 3,
    R1 = 4,
    D0 = 5,
}

pub const ALL_FACES: [FaceId; 6] = [
    FaceId::D1,
    FaceId::F0,
    FaceId::R0,
    FaceId::F1,
    FaceId::R1,
    FaceId::D0,
];

/// (axis, sign, depth) generator (§3 Move (cube)). `sign` is `1` for
/// clockwise (viewed from the positive-axis side) and `-1` for
/// counterclockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CubeMove {
    pub axis: Axis,
    pub sign: i8,
    pub depth: usize,
}

impl CubeMove {
    pub fn new(axis: Axis, sign: i8, depth: usize) -> Self {
        debug_assert!(sign == 1 || sign == -1);
        Self { axis, sign, depth }
    }

    /// Inverse flips the sign (§3).
    pub fn inverse(&self) -> Self {
        Self {
            axis: self.axis,
            sign: -self.sign,
            depth: self.depth,
        }
    }

    /// A face rotation is depth ∈ {0, order−1} (§3, GLOSSARY).
    pub fn is_face_rotation(&self, order: usize) -> bool {
        self.depth == 0 || self.depth == order - 1
    }
}

impl fmt::Display for CubeMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self.axis {
            Axis::F => 'f',
            Axis::D => 'd',
            Axis::R => 'r',
        };
        if self.sign < 0 {
            write!(f, "-{letter}{}", self.depth)
        } else {
            write!(f, "{letter}{}", self.depth)
        }
    }
}

impl std::str::FromStr for CubeMove {
    type Err = Error;

    /// Parses the `f0` / `-f0` / `d1` / `-d1` syntax of §6.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (sign, rest) = match s.strip_prefix('-') {
            Some(rest) => (-1, rest),
            None => (1, s),
        };
        let mut chars = rest.chars();
        let letter = chars.next().ok_or_else(|| Error::InvalidMoveToken(s.to_string()))?;
        let axis = match letter {
            'f' => Axis::F,
            'd' => Axis::D,
            'r' => Axis::R,
            _ => return Err(Error::InvalidMoveToken(s.to_string())),
        };
        let depth: usize = chars
            .as_str()
            .parse()
            .map_err(|_| Error::InvalidMoveToken(s.to_string()))?;
        Ok(CubeMove::new(axis, sign, depth))
    }
}

/// A single `order`×`order` grid of colors with a lazily-applied 90°
/// orientation (§4.1). Reads/writes for the two extremal rows/columns are
/// never needed here directly; `orientation` only ever changes under a
/// cap-face rotation (`rotate_cw`), which is O(1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Face {
    order: usize,
    cells: Vec<u8>,
    orientation: u8,
}

impl Face {
    pub fn new(order: usize, fill: u8) -> Self {
        Self {
            order,
            cells: vec![fill; order * order],
            orientation: 0,
        }
    }

    /// Translates logical (row, col) through the current orientation to a
    /// physical index.
    fn physical(&self, row: usize, col: usize) -> (usize, usize) {
        let n = self.order;
        match self.orientation % 4 {
            0 => (row, col),
            1 => (col, n - 1 - row),
            2 => (n - 1 - row, n - 1 - col),
            _ => (n - 1 - col, row),
        }
    }

    pub fn get(&self, row: usize, col: usize) -> u8 {
        let (r, c) = self.physical(row, col);
        self.cells[r * self.order + c]
    }

    pub fn set(&mut self, row: usize, col: usize, color: u8) {
        let (r, c) = self.physical(row, col);
        self.cells[r * self.order + c] = color;
    }

    /// O(1) 90° rotation: extremal-slice turns only touch this counter
    /// (§4.1 Face-orientation optimization).
    pub fn rotate_cw(&mut self, steps: i32) {
        self.orientation = ((self.orientation as i32 + steps).rem_euclid(4)) as u8;
    }

    pub fn order(&self) -> usize {
        self.order
    }
}

/// A line of `order` cells read from or written to a face: either a full
/// row or a full column at the given index.
#[derive(Debug, Clone, Copy)]
enum Line {
    Row(usize),
    Col(usize),
}

impl Line {
    fn get(self, face: &Face) -> Vec<u8> {
        let n = face.order();
        match self {
            Line::Row(r) => (0..n).map(|c| face.get(r, c)).collect(),
            Line::Col(c) => (0..n).map(|r| face.get(r, c)).collect(),
        }
    }

    fn set(self, face: &mut Face, values: &[u8]) {
        let n = face.order();
        match self {
            Line::Row(r) => {
                for c in 0..n {
                    face.set(r, c, values[c]);
                }
            }
            Line::Col(c) => {
                for (r, &v) in values.iter().enumerate().take(n) {
                    face.set(r, c, v);
                }
            }
        }
    }
}

/// For `axis`, the two cap faces (rotated at extremal depth) and the four
/// side faces in cyclic order, each paired with the `Line` that slice
/// `depth` reads/writes on it (§6's "F: R1 → D0 → R0 → D1 → R1" convention,
/// generalized analogously to D and R).
fn axis_topology(axis: Axis) -> ([FaceId; 2], [FaceId; 4]) {
    match axis {
        Axis::F => ([FaceId::F0, FaceId::F1], [FaceId::R1, FaceId::D0, FaceId::R0, FaceId::D1]),
        Axis::D => ([FaceId::D1, FaceId::D0], [FaceId::F0, FaceId::R0, FaceId::F1, FaceId::R1]),
        Axis::R => ([FaceId::R0, FaceId::R1], [FaceId::D1, FaceId::F0, FaceId::D0, FaceId::F1]),
    }
}

fn side_line(position_in_cycle: usize, depth: usize, order: usize) -> Line {
    match position_in_cycle % 4 {
        0 => Line::Row(depth),
        1 => Line::Col(depth),
        2 => Line::Row(order - 1 - depth),
        _ => Line::Col(order - 1 - depth),
    }
}

/// Which 24-valued "rainbow" palette facelets live at `(y, x)` of an
/// `order`-sized face: one class per face × 2×2 quadrant (§3 Color).
fn rainbow_quadrant(order: usize, y: usize, x: usize) -> usize {
    let half = order / 2;
    let qy = if y < half { 0 } else { 1 };
    let qx = if x < half { 0 } else { 1 };
    qy * 2 + qx
}

/// Palette in effect for a `Cube` (§3 Color).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Palette {
    /// One class per face.
    Six,
    /// One class per face × 2×2 quadrant.
    Rainbow,
}

/// The N×N×N cube state (§3, §4.1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cube {
    pub order: usize,
    pub palette: Palette,
    faces: [Face; 6],
}

impl Cube {
    pub fn new(order: usize, palette: Palette) -> Self {
        let mut cube = Cube {
            order,
            palette,
            faces: std::array::from_fn(|_| Face::new(order, 0)),
        };
        cube.reset();
        cube
    }

    fn face(&self, id: FaceId) -> &Face {
        &self.faces[id as usize]
    }

    fn face_mut(&mut self, id: FaceId) -> &mut Face {
        &mut self.faces[id as usize]
    }

    /// Resets to the solved state (§4.1 `reset()`).
    pub fn reset(&mut self) {
        for (i, id) in ALL_FACES.iter().enumerate() {
            let face = self.face_mut(*id);
            *face = Face::new(self.order, 0);
            for y in 0..self.order {
                for x in 0..self.order {
                    let color = match self.palette {
                        Palette::Six => i as u8,
                        Palette::Rainbow => (i * 4 + rainbow_quadrant(self.order, y, x)) as u8,
                    };
                    face.set(y, x, color);
                }
            }
        }
    }

    pub fn get(&self, face: FaceId, y: usize, x: usize) -> u8 {
        self.face(face).get(y, x)
    }

    pub fn set(&mut self, face: FaceId, y: usize, x: usize, color: u8) {
        self.face_mut(face).set(y, x, color);
    }

    /// Flattens a facelet position to a single index for facelet-change
    /// maps (§4.2).
    pub fn flatten(&self, face: FaceId, y: usize, x: usize) -> usize {
        (face as usize) * self.order * self.order + y * self.order + x
    }

    pub fn unflatten(&self, pos: usize) -> (FaceId, usize, usize) {
        let per_face = self.order * self.order;
        let face = ALL_FACES[pos / per_face];
        let rem = pos % per_face;
        (face, rem / self.order, rem % self.order)
    }

    pub(crate) fn get_flat(&self, pos: usize) -> u8 {
        let (face, y, x) = self.unflatten(pos);
        self.get(face, y, x)
    }

    fn set_flat(&mut self, pos: usize, color: u8) {
        let (face, y, x) = self.unflatten(pos);
        self.set(face, y, x, color);
    }

    /// Applies a single 90° slice turn in-place (§4.1 `apply(move)`).
    pub fn apply_move(&mut self, mv: CubeMove) {
        let (caps, side_cycle) = axis_topology(mv.axis);
        let lines: Vec<Line> = (0..4)
            .map(|i| side_line(i, mv.depth, self.order))
            .collect();

        let gathered: Vec<Vec<u8>> = side_cycle
            .iter()
            .zip(lines.iter())
            .map(|(&face, &line)| line.get(self.face(face)))
            .collect();

        // Positive sign cycles position i's old contents into position i+1;
        // negative sign is the inverse (into position i-1).
        for i in 0..4 {
            let dest = if mv.sign > 0 { (i + 1) % 4 } else { (i + 3) % 4 };
            let values = &gathered[i];
            lines[dest].set(self.face_mut(side_cycle[dest]), values);
        }

        if mv.depth == 0 {
            self.face_mut(caps[0]).rotate_cw(mv.sign as i32);
        } else if mv.depth == self.order - 1 {
            self.face_mut(caps[1]).rotate_cw(-mv.sign as i32);
        }
    }

    /// Applies a formula: via its facelet-change map if present (O(changes)
    /// gather/scatter), otherwise by replaying moves in order (§4.1).
    pub fn apply_formula(&mut self, formula: &crate::formula::Formula<CubeMove>) {
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

    pub fn apply_move_inv(&mut self, mv: CubeMove) {
        self.apply_move(mv.inverse());
    }

    /// Count of differing facelets, restricted to interior (non-border)
    /// cells (§4.1 `face_diff`). Corners/edges of a 6-palette cube are
    /// allowed to vary within their color class.
    pub fn face_diff(&self, other: &Cube) -> usize {
        debug_assert_eq!(self.order, other.order);
        let n = self.order;
        let mut diff = 0;
        for &id in &ALL_FACES {
            for y in 1..n - 1 {
                for x in 1..n - 1 {
                    if self.get(id, y, x) != other.get(id, y, x) {
                        diff += 1;
                    }
                }
            }
        }
        diff
    }

    /// Whether `mv` is a face rotation at this cube's order.
    pub fn is_face_rotation(&self, mv: CubeMove) -> bool {
        mv.is_face_rotation(self.order)
    }

    /// Builds a labeled reference cube (every facelet carrying a unique
    /// label `0..6*order*order`) used to compute a formula's
    /// facelet-change map (§4.2).
    pub fn labeled(order: usize) -> Cube {
        let mut cube = Cube::new(order, Palette::Six);
        for &id in &ALL_FACES {
            for y in 0..order {
                for x in 0..order {
                    let label = cube.flatten(id, y, x);
                    cube.set(id, y, x, label as u8);
                }
            }
        }
        cube
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_move_parse_roundtrip() {
        for s in ["f0", "-f0", "d1", "-d1", "r2"] {
            let mv = CubeMove::from_str(s).unwrap();
            assert_eq!(mv.to_string(), s);
        }
    }

    #[test]
    fn test_face_rotation_classification() {
        let order = 5;
        assert!(CubeMove::new(Axis::F, 1, 0).is_face_rotation(order));
        assert!(CubeMove::new(Axis::F, 1, order - 1).is_face_rotation(order));
        assert!(!CubeMove::new(Axis::F, 1, 2).is_face_rotation(order));
    }

    #[test]
    fn test_move_then_inverse_is_identity() {
        let mut cube = Cube::new(4, Palette::Six);
        let solved = cube.clone();
        for mv in [
            CubeMove::new(Axis::F, 1, 0),
            CubeMove::new(Axis::D, 1, 1),
            CubeMove::new(Axis::R, -1, 2),
        ] {
            cube.apply_move(mv);
            cube.apply_move(mv.inverse());
            assert_eq!(cube, solved);
        }
    }

    #[test]
    fn test_face_rotation_preserves_color_classes_on_solved_cube() {
        let mut cube = Cube::new(3, Palette::Six);
        let solved = cube.clone();
        cube.apply_move(CubeMove::new(Axis::R, 1, 0));
        // every facelet must still belong to some face's original class
        // multiset (face rotation alone cannot introduce a new class).
        let mut classes_before: Vec<u8> = ALL_FACES
            .iter()
            .flat_map(|&f| (0..3).flat_map(move |y| (0..3).map(move |x| (f, y, x))))
            .map(|(f, y, x)| solved.get(f, y, x))
            .collect();
        let mut classes_after: Vec<u8> = ALL_FACES
            .iter()
            .flat_map(|&f| (0..3).flat_map(move |y| (0..3).map(move |x| (f, y, x))))
            .map(|(f, y, x)| cube.get(f, y, x))
            .collect();
        classes_before.sort_unstable();
        classes_after.sort_unstable();
        assert_eq!(classes_before, classes_after);
    }

    #[test]
    fn test_interior_move_changes_interior_cells() {
        let mut cube = Cube::new(5, Palette::Six);
        let solved = cube.clone();
        cube.apply_move(CubeMove::new(Axis::F, 1, 2));
        assert!(cube.face_diff(&solved) > 0);
    }

    #[test]
    fn test_flatten_unflatten_roundtrip() {
        let cube = Cube::new(4, Palette::Six);
        for &face in &ALL_FACES {
            for y in 0..4 {
                for x in 0..4 {
                    let pos = cube.flatten(face, y, x);
                    assert_eq!(cube.unflatten(pos), (face, y, x));
                }
            }
        }
    }
}
