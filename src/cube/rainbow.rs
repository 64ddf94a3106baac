//! `RainbowCube`: a 24-palette view over `Cube` scored on *every* facelet,
//! not just the interior ones (§0.1 SPEC_FULL, grounded on
//! `rainbow_cube.cpp`'s `RainbowCube::ComputeScore`).

use super::state::{Cube, Palette, ALL_FACES};

/// Thin wrapper asserting the rainbow (24-class) palette and exposing the
/// full-facelet score used by the rainbow beam solver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RainbowCube {
    pub cube: Cube,
}

impl RainbowCube {
    pub fn new(order: usize) -> Self {
        Self {
            cube: Cube::new(order, Palette::Rainbow),
        }
    }

    pub fn from_cube(cube: Cube) -> Self {
        debug_assert_eq!(cube.palette, Palette::Rainbow);
        Self { cube }
    }

    /// Counts every facelet that differs from `target`, unlike
    /// `Cube::face_diff` which only inspects interior cells. Every
    /// facelet is individually labeled under the rainbow palette, so
    /// corners/edges matter too.
    pub fn score(&self, target: &RainbowCube) -> usize {
        let n = self.cube.order;
        let mut score = 0;
        for &face in &ALL_FACES {
            for y in 0..n {
                for x in 0..n {
                    if self.cube.get(face, y, x) != target.cube.get(face, y, x) {
                        score += 1;
                    }
                }
            }
        }
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube::state::{Axis, CubeMove};

    #[test]
    fn test_solved_rainbow_scores_zero_against_itself() {
        let rc = RainbowCube::new(4);
        assert_eq!(rc.score(&rc), 0);
    }

    #[test]
    fn test_move_increases_rainbow_score() {
        let target = RainbowCube::new(4);
        let mut rc = RainbowCube::new(4);
        rc.cube.apply_move(CubeMove::new(Axis::F, 1, 1));
        assert!(rc.score(&target) > 0);
    }
}
