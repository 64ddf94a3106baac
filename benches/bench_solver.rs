use criterion::{criterion_group, criterion_main, Criterion};
use santa23_solver::beam::BeamSearchSolver;
use santa23_solver::cube::search::{CubeFormulaSearcher, CubeSearchConfig};
use santa23_solver::cube::{Axis, Cube, CubeMove, Palette};
use santa23_solver::puzzle::CubeGoal;

fn search_formula_library() -> usize {
    let searcher = CubeFormulaSearcher::new(
        4,
        CubeSearchConfig {
            max_depth: 3,
            max_inner_budget: 2,
            max_conjugate_depth: 0,
            max_cost: 30,
        },
    );
    searcher.search().normal.len()
}

fn beam_solve_small_scramble() {
    let order = 3;
    let target = Cube::new(order, Palette::Six);
    let mut scrambled = target.clone();
    scrambled.apply_move(CubeMove::new(Axis::F, 1, 0));
    scrambled.apply_move(CubeMove::new(Axis::R, 1, order - 1));

    let library = CubeFormulaSearcher::new(
        order,
        CubeSearchConfig {
            max_depth: 2,
            max_inner_budget: 2,
            max_conjugate_depth: 0,
            max_cost: 30,
        },
    )
    .search();

    let goal = CubeGoal {
        current: scrambled,
        target,
    };
    let mut solver = BeamSearchSolver::new(16, 8, 42);
    let _ = solver.solve(goal, &library.normal);
}

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("cube formula search", |b| b.iter(search_formula_library));
    c.bench_function("beam solve small scramble", |b| b.iter(beam_solve_small_scramble));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
