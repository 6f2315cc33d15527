#![cfg(test)] // workaround for https://github.com/rust-lang/rust-clippy/issues/11024

use tenner_solver::models::tenner;
use tenner_solver::models::tenner::TennerBoard;
use tenner_solver::models::tenner::TennerModel;
use tenner_solver::models::tenner::COLUMNS;
use tenner_solver::propagation::Backtracking;
use tenner_solver::propagation::ForwardChecking;
use tenner_solver::propagation::GeneralisedArcConsistency;
use tenner_solver::propagation::Propagator;
use tenner_solver::search::solve;
use tenner_solver::search::SearchResult;
use tenner_solver::Solution;

const SOLVABLE: &str = "\
    0 . 2 3 4 . 6 7 8 9\n\
    . 3 4 5 6 7 . 9 0 1\n\
    4 5 6 . 8 9 0 1 2 .\n\
    6 9 12 15 18 21 14 17 10 13\n";

const UNSATISFIABLE: &str = "\
    0 1 2 3 4 5 6 7 8 9\n\
    2 3 4 5 6 7 8 9 0 1\n\
    4 5 6 7 8 9 0 1 2 .\n\
    6 9 12 15 18 21 14 17 10 50\n";

fn propagators() -> [&'static dyn Propagator; 3] {
    [&Backtracking, &ForwardChecking, &GeneralisedArcConsistency]
}

/// Check a search solution against the puzzle rules and the fixed cells of
/// the board it came from.
fn assert_solves_board(board: &TennerBoard, model: &TennerModel, solution: &Solution) {
    let values: Vec<Vec<i32>> = model
        .grid
        .iter()
        .map(|row| row.iter().map(|&cell| solution.value(cell)).collect())
        .collect();

    for (row, cells) in board.rows().iter().enumerate() {
        for (column, cell) in cells.iter().enumerate() {
            if let Some(fixed) = cell {
                assert_eq!(values[row][column], *fixed, "fixed cell was reassigned");
            }
        }
    }

    for row in &values {
        let mut sorted = row.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), COLUMNS, "row repeats a digit");
    }

    for row in 0..values.len() - 1 {
        for column in 0..COLUMNS {
            for neighbour in column.saturating_sub(1)..=usize::min(column + 1, COLUMNS - 1) {
                assert_ne!(
                    values[row][column],
                    values[row + 1][neighbour],
                    "adjacent cells ({row},{column}) and ({},{neighbour}) coincide",
                    row + 1
                );
            }
        }
    }

    for (column, &target) in board.column_sums().iter().enumerate() {
        let sum: i32 = values.iter().map(|row| row[column]).sum();
        assert_eq!(sum, target, "column {column} misses its sum");
    }
}

#[test]
fn every_propagator_solves_the_binary_model() {
    let board: TennerBoard = SOLVABLE.parse().expect("well-formed board");
    for propagator in propagators() {
        let mut model = tenner::binary_model(&board);
        match solve(&mut model.csp, propagator) {
            SearchResult::Satisfiable(solution) => {
                assert_solves_board(&board, &model, &solution)
            }
            SearchResult::Unsatisfiable => {
                panic!("{} failed to solve a solvable board", propagator.name())
            }
        }
    }
}

#[test]
fn every_propagator_solves_the_all_different_model() {
    let board: TennerBoard = SOLVABLE.parse().expect("well-formed board");
    for propagator in propagators() {
        let mut model = tenner::all_different_model(&board);
        match solve(&mut model.csp, propagator) {
            SearchResult::Satisfiable(solution) => {
                assert_solves_board(&board, &model, &solution)
            }
            SearchResult::Unsatisfiable => {
                panic!("{} failed to solve a solvable board", propagator.name())
            }
        }
    }
}

#[test]
fn an_unreachable_column_sum_is_reported_unsatisfiable() {
    let board: TennerBoard = UNSATISFIABLE.parse().expect("well-formed board");
    for propagator in propagators() {
        let mut model = tenner::binary_model(&board);
        assert!(
            matches!(
                solve(&mut model.csp, propagator),
                SearchResult::Unsatisfiable
            ),
            "{} accepted an unsatisfiable board",
            propagator.name()
        );
    }
}

#[test]
fn both_models_agree_on_the_solved_grid() {
    let board: TennerBoard = SOLVABLE.parse().expect("well-formed board");

    let mut binary = tenner::binary_model(&board);
    let binary_solution = match solve(&mut binary.csp, &GeneralisedArcConsistency) {
        SearchResult::Satisfiable(solution) => solution,
        SearchResult::Unsatisfiable => panic!("solvable board"),
    };

    // Replaying the binary-model solution onto the all-different model
    // satisfies every constraint there as well.
    let all_different = tenner::all_different_model(&board);
    let mut csp = all_different.csp;
    for (row, cells) in all_different.grid.iter().enumerate() {
        for (column, &cell) in cells.iter().enumerate() {
            let value = binary_solution.value(binary.grid[row][column]);
            if !csp.variable(cell).is_assigned() {
                csp.variable_mut(cell).assign(value);
            }
        }
    }
    for constraint in csp.constraint_ids() {
        assert!(
            csp.is_currently_satisfied(constraint),
            "{} rejects the binary-model solution",
            csp.constraint(constraint).name()
        );
    }
}
