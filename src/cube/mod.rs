/// State kernel: faces, moves, move application (§3, §4.1).
pub mod state;
/// RainbowCube view and full-facelet scoring (§0.1 SPEC_FULL).
pub mod rainbow;
/// EdgeCube view and edge-alignment scoring (§3, §8).
pub mod edge;
/// Fixed border-adjacency convention between faces (§6, §0.1 SPEC_FULL).
pub mod adjacency;
/// FaceView (interior-only) and face-monochromaticity scoring (§3).
pub mod face_view;
/// Bounded-depth formula searcher for the cube (§4.3).
pub mod search;
/// Two-stage formula searcher specialized for edge alignment (§4.3, §0.1).
pub mod edge_search;
/// Slice-map remapper for specializing reference-order formulas (§4.4).
pub mod slice_map;

pub use state::{Axis, Cube, CubeMove, FaceId, Palette};
