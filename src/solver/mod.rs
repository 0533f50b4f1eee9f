// vim: set ai et ts=4 sw=4 sts=4:
mod enumerate;
mod merge;

pub use self::enumerate::{enumerate, count_placements, Placement};
pub use self::merge::{merge, Merge};

use log::{debug, trace, info, warn};

use super::util::Direction::*;
use super::grid::{Grid, Changes};
use super::hints::{Hints, LineStatuses, is_line_correct};
use super::line::LineId;
use super::error::{SolveError, RequestError};

/// Result of visiting a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scan {
    pub line:    LineId,
    pub changes: Changes,
    pub derived: bool,
    pub correct: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SolverState {
    Scanning,
    Finished,
    Failed(LineId),
}

/// Surviving placements per line, enumerated on first visit.
#[derive(Debug, Default)]
struct PlacementCache {
    row:    Vec<Option<Vec<Placement>>>,
    column: Vec<Option<Vec<Placement>>>,
}
impl PlacementCache {
    fn new(rows: usize, columns: usize) -> Self {
        PlacementCache {
            row:    vec![None; rows],
            column: vec![None; columns],
        }
    }
    fn get(&self, id: LineId) -> Option<&Vec<Placement>> {
        match id.direction {
            Row    => self.row[id.index].as_ref(),
            Column => self.column[id.index].as_ref(),
        }
    }
    fn get_or_enumerate(&mut self, id: LineId, length: usize, hints: &[usize]) -> &mut Vec<Placement> {
        let slot = match id.direction {
            Row    => &mut self.row[id.index],
            Column => &mut self.column[id.index],
        };
        slot.get_or_insert_with(|| {
            debug!("enumerating {} placements of {:?} for {}", count_placements(length, hints), hints, id);
            enumerate(length, hints)
        })
    }
}

/// Round-robin single-line solver.
///
/// Iterating yields one item per visited line. Iteration ends once every
/// line is settled (the fixpoint) or right after the first contradiction.
#[derive(Debug)]
pub struct Solver {
    pub grid:       Grid,
    pub hints:      Hints,
    pub status:     LineStatuses,
    pub iterations: usize,
    cursor:         Option<LineId>,
    state:          SolverState,
    cache:          PlacementCache,
}

impl Solver {
    pub fn new(grid: Grid, mut hints: Hints, status: Option<LineStatuses>) -> Result<Self, RequestError> {
        hints.remove_empty_runs();
        if !grid.is_rectangular() {
            return Err(RequestError::RaggedGrid);
        }
        if grid.width() != hints.column.len() || grid.height() != hints.row.len() {
            return Err(RequestError::DimensionMismatch {
                width:   grid.width(),
                height:  grid.height(),
                columns: hints.column.len(),
                rows:    hints.row.len(),
            });
        }
        for (y, row) in grid.squares.iter().enumerate() {
            if let Some((x, &state)) = row.iter().enumerate().find(|(_, s)| !s.is_at_rest()) {
                return Err(RequestError::UnsettledSquare { row: y, col: x, state });
            }
        }
        let status = match status {
            Some(status) if !status.matches(&hints) => return Err(RequestError::StatusMismatch),
            Some(status) => status,
            None         => LineStatuses::for_hints(&hints),
        };

        Ok(Solver {
            cache: PlacementCache::new(hints.row.len(), hints.column.len()),
            grid,
            hints,
            status,
            iterations: 0,
            cursor: None,
            state: SolverState::Scanning,
        })
    }

    pub fn state(&self) -> SolverState { self.state }
    /// The line most recently visited, if any.
    pub fn scanner(&self) -> Option<LineId> { self.cursor }
    pub fn candidate_count(&self, id: LineId) -> Option<usize> {
        self.cache.get(id).map(Vec::len)
    }
    pub fn into_parts(self) -> (Grid, Hints, LineStatuses) {
        (self.grid, self.hints, self.status)
    }

    /// Runs to the fixpoint, returning the number of lines visited.
    pub fn solve(&mut self) -> Result<usize, SolveError> {
        while let Some(scan) = self.next() {
            scan?;
        }
        Ok(self.iterations)
    }

    fn advance(&mut self) -> Option<LineId> {
        if self.status.all_settled() {
            return None;
        }
        // at least one line is unsettled, so this terminates within one lap
        loop {
            let mut next = match self.cursor {
                None       => LineId::row(0),
                Some(line) => LineId::new(line.direction, line.index + 1),
            };
            while next.index >= self.hints.lines(next.direction).len() {
                next = LineId::new(next.direction.orthogonal(), 0);
            }
            self.cursor = Some(next);
            if !self.status.get(next).is_settled() {
                return Some(next);
            }
        }
    }

    fn refresh_correctness(&mut self, id: LineId) -> bool {
        let correct = is_line_correct(&id.read(&self.grid), self.hints.line(id));
        if correct {
            self.status.get_mut(id).is_correct = true;
        }
        correct
    }

    fn scan(&mut self, line: LineId) -> Result<Scan, SolveError> {
        self.iterations += 1;
        self.status.get_mut(line).unchanged = true;

        let snapshot = line.read(&self.grid);
        let determined = snapshot.iter().all(|s| s.is_committed());
        let mut consistent = true;
        let mut derived = false;
        let mut changes = Changes::new();

        if !determined {
            let hints = self.hints.line(line);
            let candidates = self.cache.get_or_enumerate(line, snapshot.len(), hints);
            let merged = merge(&snapshot, hints, candidates);
            consistent = !candidates.is_empty();
            derived = merged.derived_any;
            if derived {
                changes = line.write(&mut self.grid, &merged.line);
            }
        }

        for change in &changes {
            trace!("{}", change);
            let crossing = line.crossing(match line.direction {
                Row    => change.col,
                Column => change.row,
            });
            self.status.get_mut(crossing).unchanged = false;
            self.refresh_correctness(crossing);
        }

        let correct = self.refresh_correctness(line);
        if !correct && (determined || !consistent) {
            warn!("contradiction in {} after {} iterations", line, self.iterations);
            self.state = SolverState::Failed(line);
            return Err(SolveError::Contradiction { line });
        }

        debug!("scanned {}: {} squares derived{}",
               line, changes.len(), if correct { ", line complete" } else { "" });
        Ok(Scan { line, changes, derived, correct })
    }
}

impl Iterator for Solver {
    type Item = Result<Scan, SolveError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.state != SolverState::Scanning {
            return None;
        }
        match self.advance() {
            Some(line) => Some(self.scan(line)),
            None => {
                info!("fixpoint reached after {} iterations ({} of {} squares unset)",
                      self.iterations,
                      self.grid.count(super::grid::CellState::Unset),
                      self.grid.width() * self.grid.height());
                self.state = SolverState::Finished;
                None
            }
        }
    }
}
