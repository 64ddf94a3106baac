//! The fixed border-adjacency convention between faces (§6), used to
//! resolve which neighboring face a border cell belongs to. Grounded on
//! `edge_cube.cpp`'s `GetAdjacentPosition` switch statement; re-derived
//! here from the same axis/cap/side topology `cube::state` uses for move
//! application, so the two stay consistent by construction.

use super::state::FaceId;

/// One of the four borders of a face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

/// The face bordering `face`'s `side` edge (§6's fixed adjacency
/// convention).
pub fn adjacent_face(face: FaceId, side: Side) -> FaceId {
    use FaceId::*;
    use Side::*;
    match (face, side) {
        (F0, Top) => D1,
        (F0, Bottom) => D0,
        (F0, Left) => R0,
        (F0, Right) => R1,

        (R0, Top) => F1,
        (R0, Bottom) => F0,
        (R0, Left) => D1,
        (R0, Right) => D0,

        (F1, Top) => D0,
        (F1, Bottom) => D1,
        (F1, Left) => R1,
        (F1, Right) => R0,

        (R1, Top) => F0,
        (R1, Bottom) => F1,
        (R1, Left) => D0,
        (R1, Right) => D1,

        (D1, Top) => R0,
        (D1, Bottom) => R1,
        (D1, Left) => F1,
        (D1, Right) => F0,

        (D0, Top) => R1,
        (D0, Bottom) => R0,
        (D0, Left) => F0,
        (D0, Right) => F1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opposite(side: Side) -> Side {
        match side {
            Side::Top => Side::Bottom,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    #[test]
    fn test_adjacency_is_reciprocal() {
        for &face in &super::super::state::ALL_FACES {
            for &side in &[Side::Top, Side::Bottom, Side::Left, Side::Right] {
                let neighbor = adjacent_face(face, side);
                // there must be some side of `neighbor` that borders `face`
                // back (not necessarily the opposite label, but it must
                // exist).
                let back = [Side::Top, Side::Bottom, Side::Left, Side::Right]
                    .into_iter()
                    .any(|s| adjacent_face(neighbor, s) == face);
                assert!(back, "{face:?}/{side:?} -> {neighbor:?} has no way back");
                let _ = opposite(side);
            }
        }
    }
}
