//! `FaceView`: stores only the interior (non-border) cells of each face for
//! face-monochromatic scoring (§3 FaceCube views, grounded on
//! `face_cube.cpp`'s `FaceCube::ComputeFaceScore`).
//!
//! Named `FaceView`, not `FaceCube`, to avoid colliding with the
//! cubie/facelet `FaceCube` type this crate's teacher already used for a
//! fixed 3×3×3 corner/edge/center conversion — an unrelated concept.

use super::state::{Cube, FaceId, ALL_FACES};

/// One face's interior (non-border) cells, row-major, `(order-2)^2` of
/// them.
#[derive(Debug, Clone, PartialEq, Eq)]
struct InteriorFace {
    order: usize,
    cells: Vec<u8>,
}

impl InteriorFace {
    fn get(&self, y: usize, x: usize) -> u8 {
        self.cells[y * (self.order - 2) + x]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaceView {
    order: usize,
    faces: [InteriorFace; 6],
}

impl FaceView {
    pub fn from_cube(cube: &Cube) -> Self {
        let n = cube.order;
        let extract = |face: FaceId| -> InteriorFace {
            let mut cells = Vec::with_capacity((n - 2) * (n - 2));
            for y in 1..n - 1 {
                for x in 1..n - 1 {
                    cells.push(cube.get(face, y, x));
                }
            }
            InteriorFace { order: n, cells }
        };
        FaceView {
            order: n,
            faces: std::array::from_fn(|i| extract(ALL_FACES[i])),
        }
    }

    /// Weighted face-monochromaticity score against `target` (§4.5
    /// `face_score`): interior-cell mismatches, with the center cell
    /// weighted ×100 when `order` is odd, since it alone fixes the
    /// face's identity and must not be sacrificed to cheapen the count
    /// (grounded on `face_cube.cpp`'s `ComputeFaceScore`).
    pub fn face_score(&self, target: &FaceView) -> usize {
        debug_assert_eq!(self.order, target.order);
        let m = self.order - 2;
        let center = if self.order % 2 == 1 { Some(m / 2) } else { None };
        let mut score = 0;
        for (face, target_face) in self.faces.iter().zip(target.faces.iter()) {
            for y in 0..m {
                for x in 0..m {
                    if face.get(y, x) != target_face.get(y, x) {
                        let weight = if center == Some(y) && center == Some(x) { 100 } else { 1 };
                        score += weight;
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
    use crate::cube::state::{Axis, CubeMove, Palette};

    #[test]
    fn test_solved_face_score_is_zero() {
        let cube = Cube::new(5, Palette::Six);
        let view = FaceView::from_cube(&cube);
        assert_eq!(view.face_score(&view), 0);
    }

    #[test]
    fn test_odd_order_center_mismatch_weighs_more() {
        let cube = Cube::new(5, Palette::Six);
        let target = FaceView::from_cube(&cube);
        let mut off_center = cube.clone();
        // flip a non-center interior cell.
        off_center.set(FaceId::F0, 1, 1, 99);
        let off_center_score = FaceView::from_cube(&off_center).face_score(&target);

        let mut off_middle = cube;
        off_middle.set(FaceId::F0, 2, 2, 99);
        let off_middle_score = FaceView::from_cube(&off_middle).face_score(&target);

        assert!(off_middle_score > off_center_score);
    }
}
