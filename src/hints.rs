// vim: set ai et ts=4 sw=4 sts=4:
use std::ops::Range;
use serde::{Serialize, Deserialize};

use super::util::{Direction, Direction::*};
use super::grid::{Grid, CellState, CellState::Filled};
use super::line::LineId;

/// The run lengths of every row and column; the rules of one puzzle.
#[derive(PartialEq, Eq, Clone, Debug, Default, Serialize, Deserialize)]
pub struct Hints {
    pub row:    Vec<Vec<usize>>,
    pub column: Vec<Vec<usize>>,
}

impl Hints {
    pub fn new(row: Vec<Vec<usize>>, column: Vec<Vec<usize>>) -> Self {
        let mut hints = Hints { row, column };
        hints.remove_empty_runs();
        hints
    }

    /// Derives the hints a committed grid satisfies.
    pub fn from_grid(grid: &Grid) -> Self {
        let row = (0..grid.height()).map(|y| runs(&LineId::row(y).read(grid))).collect();
        let column = (0..grid.width()).map(|x| runs(&LineId::column(x).read(grid))).collect();
        Hints { row, column }
    }

    /// Zero-length runs carry no information; a line written as `0` has no runs at all.
    pub fn remove_empty_runs(&mut self) {
        for runs in self.row.iter_mut().chain(self.column.iter_mut()) {
            runs.retain(|&len| len > 0);
        }
    }

    pub fn lines(&self, direction: Direction) -> &[Vec<usize>] {
        match direction {
            Row    => &self.row,
            Column => &self.column,
        }
    }
    pub fn line(&self, id: LineId) -> &[usize] {
        &self.lines(id.direction)[id.index]
    }
}

// -------------------------------------------------------------

/// Solver bookkeeping for one line.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Default, Serialize, Deserialize)]
pub struct LineStatus {
    /// The committed line matches its hints exactly.
    pub is_correct: bool,
    /// No square of the line was modified since it was last scanned.
    pub unchanged:  bool,
}
impl LineStatus {
    pub fn is_settled(&self) -> bool {
        self.is_correct || self.unchanged
    }
}

/// Per-line status table, parallel to `Hints`.
#[derive(PartialEq, Eq, Clone, Debug, Default, Serialize, Deserialize)]
pub struct LineStatuses {
    pub row:    Vec<LineStatus>,
    pub column: Vec<LineStatus>,
}
impl LineStatuses {
    pub fn for_hints(hints: &Hints) -> Self {
        LineStatuses {
            row:    vec![LineStatus::default(); hints.row.len()],
            column: vec![LineStatus::default(); hints.column.len()],
        }
    }
    pub fn matches(&self, hints: &Hints) -> bool {
        self.row.len() == hints.row.len() && self.column.len() == hints.column.len()
    }
    pub fn get(&self, id: LineId) -> &LineStatus {
        match id.direction {
            Row    => &self.row[id.index],
            Column => &self.column[id.index],
        }
    }
    pub fn get_mut(&mut self, id: LineId) -> &mut LineStatus {
        match id.direction {
            Row    => &mut self.row[id.index],
            Column => &mut self.column[id.index],
        }
    }
    pub fn all_settled(&self) -> bool {
        self.row.iter().chain(self.column.iter()).all(LineStatus::is_settled)
    }
    /// Reopens both lines through square (col, row) after it was edited outside the solver.
    pub fn touch(&mut self, row: usize, col: usize) {
        for id in &[LineId::row(row), LineId::column(col)] {
            *self.get_mut(*id) = LineStatus::default();
        }
    }
    /// Forget all bookkeeping, e.g. after the caller edited the grid.
    pub fn reset(&mut self) {
        for status in self.row.iter_mut().chain(self.column.iter_mut()) {
            *status = LineStatus::default();
        }
    }
}

// -------------------------------------------------------------

fn ranges_of<P>(line: &[CellState], pred: P) -> Vec<Range<usize>>
    where P: Fn(CellState) -> bool
{
    // mutually exclusive ranges of contiguous squares for which the predicate holds
    let mut result = Vec::<Range<usize>>::new();
    let mut x: usize = 0;
    while x < line.len() {
        while x < line.len() && !pred(line[x]) {
            x += 1;
        }
        if x >= line.len() { break; }

        let range_start = x;
        while x < line.len() && pred(line[x]) {
            x += 1;
        }
        result.push(range_start..x);
    }
    result
}

/// Lengths of the runs of filled squares in a line; anything else counts as a gap.
pub fn runs(line: &[CellState]) -> Vec<usize> {
    ranges_of(line, |s| s == Filled).into_iter()
                                    .map(|range| range.len())
                                    .collect()
}

/// Run lengths of a fully committed line, or `None` while any square is undetermined.
pub fn committed_runs(line: &[CellState]) -> Option<Vec<usize>> {
    if line.iter().all(|s| s.is_committed()) {
        Some(runs(line))
    } else {
        None
    }
}

/// A line is correct when it is fully committed and its runs equal its hints.
pub fn is_line_correct(line: &[CellState], hints: &[usize]) -> bool {
    committed_runs(line).map_or(false, |found| found == hints)
}
