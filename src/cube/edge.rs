//! `EdgeCube`: a view over `Cube` storing only the non-corner, non-center
//! border strips of each face, scored on edge-strip self-consistency
//! (§3 EdgeCube / FaceCube views, §8).

use super::state::{Cube, FaceId, ALL_FACES};

/// The four non-corner border strips of one face, each of length
/// `order - 2`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct EdgeFace {
    top: Vec<u8>,
    bottom: Vec<u8>,
    left: Vec<u8>,
    right: Vec<u8>,
}

impl EdgeFace {
    fn strips(&self) -> [&Vec<u8>; 4] {
        [&self.top, &self.bottom, &self.left, &self.right]
    }
}

/// Edge-strip-only view of a cube, used for the edge-alignment subgoal
/// (§3, §4.5 `edge_score`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeCube {
    order: usize,
    faces: [EdgeFace; 6],
}

impl EdgeCube {
    /// Extracts the edge strips from a full `Cube` (§3 "alternate storage
    /// layouts of the same logical cube").
    pub fn from_cube(cube: &Cube) -> Self {
        let n = cube.order;
        let extract = |face: FaceId| -> EdgeFace {
            EdgeFace {
                top: (1..n - 1).map(|x| cube.get(face, 0, x)).collect(),
                bottom: (1..n - 1).map(|x| cube.get(face, n - 1, x)).collect(),
                left: (1..n - 1).map(|y| cube.get(face, y, 0)).collect(),
                right: (1..n - 1).map(|y| cube.get(face, y, n - 1)).collect(),
            }
        };
        EdgeCube {
            order: n,
            faces: std::array::from_fn(|i| extract(ALL_FACES[i])),
        }
    }

    /// Count of facelets, within each edge strip, that differ from that
    /// strip's own center cell (§8 "EdgeCube.edge_score == 0 ⇔ every edge
    /// strip is monochromatic within itself").
    pub fn edge_score(&self) -> usize {
        if self.order <= 3 {
            // a strip of length order-2 <= 1 is trivially self-consistent.
            return 0;
        }
        let center = (self.order - 2) / 2;
        let mut score = 0;
        for face in &self.faces {
            for strip in face.strips() {
                let reference = strip[center];
                score += strip.iter().filter(|&&c| c != reference).count();
            }
        }
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube::state::{Axis, CubeMove, Palette};

    #[test]
    fn test_solved_edge_score_is_zero() {
        let cube = Cube::new(5, Palette::Six);
        let edge = EdgeCube::from_cube(&cube);
        assert_eq!(edge.edge_score(), 0);
    }

    #[test]
    fn test_interior_move_can_raise_edge_score() {
        let mut cube = Cube::new(5, Palette::Six);
        cube.apply_move(CubeMove::new(Axis::F, 1, 2));
        let edge = EdgeCube::from_cube(&cube);
        assert!(edge.edge_score() > 0);
    }
}
