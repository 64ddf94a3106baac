//! Random scramble generation (§9 ambient test-tooling section), used to
//! build test fixtures and benchmark inputs rather than anything the solver
//! itself depends on. Grounded on `generator.rs`'s `random::<T>() % n`
//! idiom for picking a uniformly random index into a fixed move alphabet.

use crate::cube::{Axis, Cube, CubeMove};
use crate::globe::{Globe, GlobeMove};
use crate::wreath::{Wreath, WreathMove};
use rand::random;

const AXES: [Axis; 3] = [Axis::F, Axis::D, Axis::R];

/// Applies `count` random moves to a fresh solved cube of the given order
/// and returns the scrambled result.
pub fn scramble_cube(order: usize, count: usize) -> Cube {
    let mut cube = Cube::new(order, crate::cube::Palette::Six);
    for _ in 0..count {
        let axis = AXES[random::<usize>() % AXES.len()];
        let depth = random::<usize>() % order;
        let sign = if random::<u8>() % 2 == 0 { 1 } else { -1 };
        cube.apply_move(CubeMove::new(axis, sign, depth));
    }
    cube
}

/// Applies `count` random moves to a fresh solved wreath of the given size.
pub fn scramble_wreath(size: usize, count: usize) -> Wreath {
    const MOVES: [WreathMove; 4] = [WreathMove::A, WreathMove::Ap, WreathMove::B, WreathMove::Bp];
    let mut wreath = Wreath::new(size);
    for _ in 0..count {
        wreath.apply_move(MOVES[random::<usize>() % MOVES.len()]);
    }
    wreath
}

/// Applies `count` random moves to a fresh solved globe of the given shape.
/// Each step is a rotate with probability proportional to `rows` bands
/// versus a flip with probability proportional to `rows / 2` flip pairs, so
/// an all-rotate globe never spuriously picks a flip with no pairs to fold.
pub fn scramble_globe(rows: usize, cols: usize, count: usize) -> Globe {
    let mut globe = Globe::new(rows, cols);
    let flip_pairs = rows / 2;
    for _ in 0..count {
        let total = rows + flip_pairs;
        let pick = random::<usize>() % total;
        let mv = if pick < rows {
            let sign = if random::<u8>() % 2 == 0 { 1 } else { -1 };
            GlobeMove::Rotate { unit: pick, sign }
        } else {
            GlobeMove::Flip { unit: pick - rows }
        };
        globe.apply_move(mv);
    }
    globe
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scramble_cube_produces_same_shape_cube() {
        let scrambled = scramble_cube(4, 20);
        assert_eq!(scrambled.order, 4);
    }

    #[test]
    fn test_scramble_wreath_produces_valid_wreath() {
        let wreath = scramble_wreath(10, 15);
        assert_eq!(wreath.size, 10);
    }

    #[test]
    fn test_scramble_globe_produces_valid_globe() {
        let globe = scramble_globe(4, 6, 15);
        assert_eq!((globe.rows, globe.cols), (4, 6));
    }
}
