//! Typed puzzle shape (§0.1 SPEC_FULL Kaggle supplement) and the
//! `SearchState` goal wrappers that let `beam::BeamSearchSolver` drive each
//! puzzle family. Parser-agnostic: no CSV I/O lives here, only the shape a
//! parser would produce and the glue needed to search it.

use crate::beam::SearchState;
use crate::cube::edge::EdgeCube;
use crate::cube::rainbow::RainbowCube;
use crate::cube::{Cube, CubeMove};
use crate::formula::Formula;
use crate::globe::{Globe, GlobeMove};
use crate::wreath::{Wreath, WreathMove};

/// The puzzle families in the Kaggle Santa 2023 suite (§0.1), with just
/// enough shape to construct the matching state kernel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PuzzleKind {
    Cube { order: usize },
    RainbowCube { order: usize },
    Wreath { size: usize },
    Globe { rows: usize, cols: usize },
}

/// One puzzle record's typed shape: an identifier plus its kind (§0.1
/// `PuzzleSpec`). A CSV/JSON parser elsewhere is expected to produce this;
/// this crate's scope stops at the typed shape and the solving glue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleSpec {
    pub id: String,
    pub kind: PuzzleKind,
}

impl PuzzleSpec {
    pub fn new(id: impl Into<String>, kind: PuzzleKind) -> Self {
        Self { id: id.into(), kind }
    }
}

/// A 6-color cube paired with its target, searched via interior `face_diff`
/// (§4.1, §4.5).
#[derive(Debug, Clone)]
pub struct CubeGoal {
    pub current: Cube,
    pub target: Cube,
}

impl SearchState for CubeGoal {
    type Move = CubeMove;

    fn is_solved(&self) -> bool {
        self.current.face_diff(&self.target) == 0
    }

    fn apply_formula(&self, formula: &Formula<CubeMove>) -> Self {
        let mut current = self.current.clone();
        current.apply_formula(formula);
        CubeGoal {
            current,
            target: self.target.clone(),
        }
    }
}

/// A 24-color rainbow cube paired with its target, searched via full-board
/// `score` (§0.1 supplement).
#[derive(Debug, Clone)]
pub struct RainbowGoal {
    pub current: RainbowCube,
    pub target: RainbowCube,
}

impl SearchState for RainbowGoal {
    type Move = CubeMove;

    fn is_solved(&self) -> bool {
        self.current.score(&self.target) == 0
    }

    fn apply_formula(&self, formula: &Formula<CubeMove>) -> Self {
        let mut current = self.current.cube.clone();
        current.apply_formula(formula);
        RainbowGoal {
            current: RainbowCube::from_cube(current),
            target: self.target.clone(),
        }
    }
}

/// Edge-alignment subgoal over a cube (§3, §8): driven independently before
/// handing off to `CubeGoal`/`RainbowGoal` for the final polish.
#[derive(Debug, Clone)]
pub struct EdgeGoal {
    pub current: Cube,
}

impl SearchState for EdgeGoal {
    type Move = CubeMove;

    fn is_solved(&self) -> bool {
        EdgeCube::from_cube(&self.current).edge_score() == 0
    }

    fn apply_formula(&self, formula: &Formula<CubeMove>) -> Self {
        let mut current = self.current.clone();
        current.apply_formula(formula);
        EdgeGoal { current }
    }
}

#[derive(Debug, Clone)]
pub struct WreathGoal {
    pub current: Wreath,
    pub target: Wreath,
}

impl SearchState for WreathGoal {
    type Move = WreathMove;

    fn is_solved(&self) -> bool {
        self.current.diff(&self.target) == 0
    }

    fn apply_formula(&self, formula: &Formula<WreathMove>) -> Self {
        let mut current = self.current.clone();
        current.apply_formula(formula);
        WreathGoal {
            current,
            target: self.target.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GlobeGoal {
    pub current: Globe,
    pub target: Globe,
}

impl SearchState for GlobeGoal {
    type Move = GlobeMove;

    fn is_solved(&self) -> bool {
        self.current.diff(&self.target) == 0
    }

    fn apply_formula(&self, formula: &Formula<GlobeMove>) -> Self {
        let mut current = self.current.clone();
        current.apply_formula(formula);
        GlobeGoal {
            current,
            target: self.target.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube::Palette;

    #[test]
    fn test_cube_goal_solved_when_equal() {
        let cube = Cube::new(4, Palette::Six);
        let goal = CubeGoal {
            current: cube.clone(),
            target: cube,
        };
        assert!(goal.is_solved());
    }

    #[test]
    fn test_puzzle_spec_holds_kind() {
        let spec = PuzzleSpec::new("cube_3/3/3", PuzzleKind::Cube { order: 3 });
        assert_eq!(spec.kind, PuzzleKind::Cube { order: 3 });
    }

    #[test]
    fn test_wreath_goal_not_solved_after_move() {
        let wreath = Wreath::new(10);
        let mut current = wreath.clone();
        current.apply_move(WreathMove::A);
        let goal = WreathGoal { current, target: wreath };
        assert!(!goal.is_solved());
    }
}
