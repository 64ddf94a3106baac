use santa23_solver::beam::BeamSearchSolver;
use santa23_solver::cube::search::{CubeFormulaSearcher, CubeSearchConfig};
use santa23_solver::cube::{Axis, Cube, CubeMove, Palette};
use santa23_solver::puzzle::CubeGoal;

fn main() {
    let order = 4;
    let target = Cube::new(order, Palette::Six);
    let mut scrambled = target.clone();
    for mv in [
        CubeMove::new(Axis::F, 1, 0),
        CubeMove::new(Axis::R, 1, 1),
        CubeMove::new(Axis::D, -1, order - 1),
    ] {
        scrambled.apply_move(mv);
    }

    let library = CubeFormulaSearcher::new(order, CubeSearchConfig::default()).search();
    println!("found {} normal formulas", library.normal.len());

    let goal = CubeGoal {
        current: scrambled,
        target,
    };
    let mut solver = BeamSearchSolver::new(32, 12, 0x1234_5678);
    match solver.solve(goal, &library.normal) {
        Ok(path) => println!("solved in {} formula steps", path.len()),
        Err(err) => println!("search did not find a solution: {err}"),
    }
}
