//! CSP models of the Tenner Grid puzzle.
//!
//! A Tenner Grid is a 3 to 8 row grid of 10 columns. Every row holds the
//! digits 0 through 9 exactly once, grid-adjacent cells (including
//! diagonally adjacent ones) hold different digits, and every column adds up
//! to a required sum. Some cells are fixed up front.
//!
//! Two encodings of the same puzzle are provided:
//! [`binary_model`] decomposes the distinctness rules into binary not-equal
//! constraints, while [`all_different_model`] uses n-ary all-different
//! constraints whose satisfying tuples are built by permuting the digits not
//! claimed by fixed cells. Both share the per-column n-ary sum constraints.
//!
//! Contradictory boards (duplicate fixed digits next to each other, sums no
//! column can reach) are deliberately not rejected here: they produce
//! constraints with empty satisfying-tuple tables, which the first
//! propagation run against the model reports as inconsistent.

use std::str::FromStr;

use itertools::Itertools;
use thiserror::Error;

use crate::engine::Constraint;
use crate::engine::Csp;
use crate::engine::VariableId;

/// Every Tenner Grid is 10 columns wide, one per digit.
pub const COLUMNS: usize = 10;

const DIGITS: std::ops::RangeInclusive<i32> = 0..=9;

/// A Tenner Grid instance: the partially filled grid plus the required
/// column sums.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TennerBoard {
    rows: Vec<[Option<i32>; COLUMNS]>,
    column_sums: [i32; COLUMNS],
}

impl TennerBoard {
    /// Create a board from its rows (`None` marks an empty cell) and column
    /// sums. The cell values themselves are not validated; see the module
    /// documentation.
    pub fn new(rows: Vec<[Option<i32>; COLUMNS]>, column_sums: [i32; COLUMNS]) -> TennerBoard {
        TennerBoard { rows, column_sums }
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[[Option<i32>; COLUMNS]] {
        &self.rows
    }

    pub fn column_sums(&self) -> &[i32; COLUMNS] {
        &self.column_sums
    }
}

/// A structural problem with the textual form of a [`TennerBoard`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TennerBoardError {
    #[error("a board consists of 3 to 8 grid rows plus a row of column sums, found {0} rows")]
    WrongRowCount(usize),
    #[error("row {row} has {found} cells instead of {COLUMNS}")]
    WrongRowLength { row: usize, found: usize },
    #[error("row {row} contains invalid cell '{token}': cells are 0-9, '.' or -1")]
    InvalidCell { row: usize, token: String },
    #[error("invalid column sum '{0}'")]
    InvalidColumnSum(String),
}

impl FromStr for TennerBoard {
    type Err = TennerBoardError;

    /// Parse a board from whitespace-separated text: one line per grid row
    /// with `.` or `-1` marking empty cells, followed by one line of column
    /// sums.
    fn from_str(text: &str) -> Result<TennerBoard, TennerBoardError> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let Some((&sum_line, grid_lines)) = lines.split_last() else {
            return Err(TennerBoardError::WrongRowCount(0));
        };
        if !(3..=8).contains(&grid_lines.len()) {
            return Err(TennerBoardError::WrongRowCount(grid_lines.len()));
        }

        let mut rows = Vec::with_capacity(grid_lines.len());
        for (row, line) in grid_lines.iter().enumerate() {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.len() != COLUMNS {
                return Err(TennerBoardError::WrongRowLength {
                    row,
                    found: tokens.len(),
                });
            }

            let mut cells = [None; COLUMNS];
            for (column, token) in tokens.iter().enumerate() {
                cells[column] = parse_cell(token).ok_or_else(|| TennerBoardError::InvalidCell {
                    row,
                    token: (*token).to_owned(),
                })?;
            }
            rows.push(cells);
        }

        let sums: Vec<i32> = sum_line
            .split_whitespace()
            .map(|token| {
                token
                    .parse()
                    .map_err(|_| TennerBoardError::InvalidColumnSum(token.to_owned()))
            })
            .collect::<Result<_, _>>()?;
        let column_sums: [i32; COLUMNS] = sums
            .try_into()
            .map_err(|_| TennerBoardError::InvalidColumnSum(sum_line.to_owned()))?;

        Ok(TennerBoard::new(rows, column_sums))
    }
}

/// `Some(None)` for an empty-cell marker, `Some(Some(digit))` for a digit,
/// `None` for an invalid token.
fn parse_cell(token: &str) -> Option<Option<i32>> {
    if token == "." || token == "-1" {
        return Some(None);
    }
    match token.parse::<i32>() {
        Ok(digit) if DIGITS.contains(&digit) => Some(Some(digit)),
        _ => None,
    }
}

/// A built Tenner CSP together with the variable grid mirroring the board
/// shape: `grid[row][column]` is the variable of that cell.
#[derive(Debug)]
pub struct TennerModel {
    pub csp: Csp,
    pub grid: Vec<Vec<VariableId>>,
}

/// Build the binary encoding of `board`.
///
/// Constraints: a binary not-equal for every pair of distinct cells in the
/// same row; a binary not-equal for every vertically or diagonally adjacent
/// pair (each unordered adjacent pair is constrained exactly once, with the
/// horizontally adjacent pairs already covered by the row pairs); and one
/// n-ary sum constraint per column.
pub fn binary_model(board: &TennerBoard) -> TennerModel {
    let mut csp = Csp::new("tenner_binary");
    let grid = grid_variables(&mut csp, board);

    for row in &grid {
        for i in 0..COLUMNS {
            for j in (i + 1)..COLUMNS {
                let constraint = not_equal(&csp, row[i], row[j]);
                let _ = csp.add_constraint(constraint);
            }
        }
    }

    for (above, below) in grid.iter().tuple_windows() {
        for column in 0..COLUMNS {
            for neighbour in adjacent_columns(column) {
                let constraint = not_equal(&csp, above[column], below[neighbour]);
                let _ = csp.add_constraint(constraint);
            }
        }
    }

    add_column_sums(&mut csp, &grid, board.column_sums());

    TennerModel { csp, grid }
}

/// Build the all-different encoding of `board`.
///
/// Constraints: one n-ary all-different per row; one n-ary all-different per
/// cell over the cell and its adjacent cells in the row below (the strongest
/// all-different implied by the adjacency rule: a wider neighbourhood would
/// also force apart cells at grid distance two, which the puzzle permits);
/// and the same per-column sum constraints as the binary encoding.
pub fn all_different_model(board: &TennerBoard) -> TennerModel {
    let mut csp = Csp::new("tenner_all_different");
    let grid = grid_variables(&mut csp, board);

    for (row, variables) in grid.iter().enumerate() {
        let constraint = all_different(&csp, format!("all_diff(row_{row})"), variables.clone());
        let _ = csp.add_constraint(constraint);
    }

    for (row, (above, below)) in grid.iter().tuple_windows().enumerate() {
        for column in 0..COLUMNS {
            let mut scope = vec![above[column]];
            scope.extend(adjacent_columns(column).map(|neighbour| below[neighbour]));

            let constraint =
                all_different(&csp, format!("all_diff(block_{row}_{column})"), scope);
            let _ = csp.add_constraint(constraint);
        }
    }

    add_column_sums(&mut csp, &grid, board.column_sums());

    TennerModel { csp, grid }
}

/// Create one variable per cell: fixed cells get a singleton domain and are
/// assigned up front, empty cells get the full digit domain.
fn grid_variables(csp: &mut Csp, board: &TennerBoard) -> Vec<Vec<VariableId>> {
    board
        .rows()
        .iter()
        .enumerate()
        .map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(|(column, cell)| {
                    let name = format!("cell_{row}_{column}");
                    match *cell {
                        Some(digit) => {
                            let id = csp.new_variable(name, vec![digit]);
                            csp.variable_mut(id).assign(digit);
                            id
                        }
                        None => csp.new_variable(name, DIGITS.collect()),
                    }
                })
                .collect()
        })
        .collect()
}

/// The columns adjacent to `column`, including `column` itself.
fn adjacent_columns(column: usize) -> impl Iterator<Item = usize> {
    column.saturating_sub(1)..=usize::min(column + 1, COLUMNS - 1)
}

/// A binary not-equal constraint: the cross product of the two original
/// domains minus the equal pairs.
fn not_equal(csp: &Csp, a: VariableId, b: VariableId) -> Constraint {
    let name = format!(
        "ne({},{})",
        csp.variable(a).name(),
        csp.variable(b).name()
    );
    let mut constraint = Constraint::new(name, vec![a, b]);

    let tuples: Vec<Vec<i32>> = csp
        .variable(a)
        .original_domain()
        .iter()
        .cartesian_product(csp.variable(b).original_domain().iter())
        .filter(|(left, right)| left != right)
        .map(|(&left, &right)| vec![left, right])
        .collect();
    constraint.add_satisfying_tuples(tuples);

    constraint
}

/// An n-ary all-different constraint. The values of fixed (singleton-domain)
/// scope variables anchor their positions; the digits not claimed by an
/// anchor are permuted over the open positions, and only permutations
/// yielding pairwise-distinct tuples are kept. This bounds the table by the
/// factorial of the number of open positions instead of the full cross
/// product.
fn all_different(csp: &Csp, name: String, scope: Vec<VariableId>) -> Constraint {
    let mut constraint = Constraint::new(name, scope.clone());

    let template: Vec<Option<i32>> = scope
        .iter()
        .map(|&variable| {
            let domain = csp.variable(variable).original_domain();
            (domain.len() == 1).then(|| domain[0])
        })
        .collect();
    let anchored: Vec<i32> = template.iter().flatten().copied().collect();
    let open: Vec<usize> = template
        .iter()
        .positions(|anchor| anchor.is_none())
        .collect();
    let unused: Vec<i32> = DIGITS.filter(|digit| !anchored.contains(digit)).collect();

    let tuples: Vec<Vec<i32>> = unused
        .into_iter()
        .permutations(open.len())
        .map(|permutation| {
            let mut tuple: Vec<i32> = template
                .iter()
                .map(|anchor| anchor.unwrap_or_default())
                .collect();
            for (&position, value) in open.iter().zip(permutation) {
                tuple[position] = value;
            }
            tuple
        })
        .filter(|tuple| (0..tuple.len()).all(|i| !tuple[i + 1..].contains(&tuple[i])))
        .collect();
    constraint.add_satisfying_tuples(tuples);

    constraint
}

/// One n-ary sum constraint per column: the satisfying tuples are exactly
/// the combinations of the cells' domain values adding up to the required
/// sum.
fn add_column_sums(csp: &mut Csp, grid: &[Vec<VariableId>], column_sums: &[i32; COLUMNS]) {
    for (column, &target) in column_sums.iter().enumerate() {
        let scope: Vec<VariableId> = grid.iter().map(|row| row[column]).collect();

        let mut constraint = Constraint::new(format!("sum(col_{column})"), scope.clone());
        let tuples: Vec<Vec<i32>> = scope
            .iter()
            .map(|&variable| csp.variable(variable).original_domain().to_vec())
            .multi_cartesian_product()
            .filter(|tuple| tuple.iter().sum::<i32>() == target)
            .collect();
        constraint.add_satisfying_tuples(tuples);

        let _ = csp.add_constraint(constraint);
    }
}
