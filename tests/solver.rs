use nonogram_solver::{Grid, Hints, Puzzle, Solver, SolveError, LineId, CellState};
use nonogram_solver::solver::{enumerate, count_placements};

fn solve_picture(picture: &str) -> (Grid, Solver) {
    let solution = Grid::from_picture(picture).unwrap();
    let puzzle = Puzzle::from_grid(&solution);
    let mut solver = Solver::new(puzzle.grid, puzzle.hints, None).unwrap();
    solver.solve().unwrap();
    (solution, solver)
}

#[test]
fn line_solvable_pictures_round_trip() {
    let pictures = [
        "
        .#.
        ###
        .#.
        ",
        "
        #####
        #....
        ###..
        #....
        #####
        ",
        "
        #...#
        #...#
        #####
        #...#
        #...#
        ",
    ];
    for picture in &pictures {
        let (solution, solver) = solve_picture(picture);
        assert!(solver.grid.is_complete(), "unsolved:\n{}", solver.grid);
        assert_eq!(solver.grid, solution);
        let lines = solution.width() + solution.height();
        assert!(solver.iterations <= 3 * lines,
                "{} iterations for {} lines", solver.iterations, lines);
    }
}

#[test]
fn ten_by_ten_puzzle_solves_completely() {
    let puzzle = Puzzle::from_yaml_str("
rows:
    - 5
    - 1 4
    - 1 1 1
    - 1 1 1 1
    - 1 1 1 1
    - 1 1 3 1
    - 1 1 1
    - 1 1 1
    - 3 4 1
    - 3 3
cols:
    - 8
    - 1 1
    - 1 1 5
    - 1 1
    - 1 2 2
    - 2 1 1
    - 5 1
    - 1 2
    - 1 1
    - 8
").unwrap();
    let hints = puzzle.hints.clone();
    let mut solver = Solver::new(puzzle.grid, puzzle.hints, None).unwrap();
    let iterations = solver.solve().unwrap();
    assert!(iterations >= 10 && iterations <= 3 * 20, "{} iterations", iterations);
    assert!(solver.grid.is_complete());
    assert_eq!(Hints::from_grid(&solver.grid), hints);
    assert_eq!(LineId::row(9).read(&solver.grid)[..3], [CellState::Empty, CellState::Empty, CellState::Filled]);
}

#[test]
fn fresh_enumeration_counts_compositions() {
    for length in 0..12 {
        for hints in &[vec![], vec![1], vec![2, 1], vec![1, 1, 1], vec![3, 3]] {
            let placements = enumerate(length, hints);
            assert_eq!(placements.len() as u128, count_placements(length, hints));
            let needed = hints.iter().sum::<usize>() + hints.len().saturating_sub(1);
            if needed > length {
                assert!(placements.is_empty());
            }
        }
    }
}

#[test]
fn unsatisfiable_line_fails_on_first_visit() {
    let hints = Hints::new(vec![vec![1], vec![2, 2]], vec![vec![1], vec![1], vec![1]]);
    let mut solver = Solver::new(Grid::new(3, 2), hints, None).unwrap();
    let first = solver.next().unwrap();
    assert!(first.is_ok());
    let second = solver.next().unwrap();
    assert_eq!(second, Err(SolveError::Contradiction { line: LineId::row(1) }));
    assert_eq!(solver.iterations, 2);
    assert!(solver.next().is_none());
}

#[test]
fn candidate_sets_never_grow() {
    let puzzle = Puzzle::from_picture("
        ##.##
        #...#
        .###.
        #.#.#
        ##.##
    ").unwrap();
    let mut solver = Solver::new(puzzle.grid, puzzle.hints, None).unwrap();
    let mut seen = std::collections::HashMap::new();
    while let Some(scan) = solver.next() {
        let line = scan.unwrap().line;
        if let Some(count) = solver.candidate_count(line) {
            if let Some(&previous) = seen.get(&line) {
                assert!(count <= previous, "{} grew from {} to {}", line, previous, count);
            }
            seen.insert(line, count);
        }
    }
}

#[test]
fn fixpoint_is_not_an_error() {
    // two diagonal solutions; single-line logic cannot choose
    let hints = Hints::new(vec![vec![1], vec![1]], vec![vec![1], vec![1]]);
    let mut solver = Solver::new(Grid::new(2, 2), hints, None).unwrap();
    assert!(solver.solve().is_ok());
    assert_eq!(solver.grid.count(CellState::Unset), 4);
    assert!(solver.status.all_settled());
}

#[test]
fn resumes_from_partially_committed_grid() {
    // the caller commits one square of the ambiguous 2x2 and solves again
    let hints = Hints::new(vec![vec![1], vec![1]], vec![vec![1], vec![1]]);
    let mut grid = Grid::new(2, 2);
    *grid.get_square_mut(0, 0) = CellState::Filled;
    let mut solver = Solver::new(grid, hints, None).unwrap();
    solver.solve().unwrap();
    assert_eq!(solver.grid, Grid::from_picture("
        #.
        .#
    ").unwrap());
}
