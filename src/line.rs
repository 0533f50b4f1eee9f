// vim: set ai et ts=4 sw=4 sts=4:
use std::fmt;
use serde::{Serialize, Deserialize};

use super::util::{Direction, Direction::*};
use super::grid::{Grid, CellState, CellChange, Changes};

pub trait DirectionalSequence
{
    fn get_index(&self) -> usize;
    fn get_direction(&self) -> Direction;

    fn square_index(&self, at: usize) -> (usize, usize) {
        match self.get_direction() {
            Row    => (at, self.get_index()),
            Column => (self.get_index(), at),
        }
    }
    fn length_in(&self, grid: &Grid) -> usize {
        match self.get_direction() {
            Row    => grid.width(),
            Column => grid.height(),
        }
    }
    fn get_square(&self, grid: &Grid, at: usize) -> CellState {
        let (x,y) = self.square_index(at);
        grid.get_square(x, y)
    }
}

/// A single row or column of the grid; doubles as the scanner cursor position.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug, Serialize, Deserialize)]
pub struct LineId {
    pub direction: Direction,
    pub index:     usize,
}

impl LineId {
    pub fn new(direction: Direction, index: usize) -> Self {
        LineId { direction, index }
    }
    pub fn row(index: usize) -> Self { Self::new(Row, index) }
    pub fn column(index: usize) -> Self { Self::new(Column, index) }

    /// The orthogonal line passing through position `at` of this one.
    pub fn crossing(&self, at: usize) -> LineId {
        LineId::new(self.direction.orthogonal(), at)
    }

    pub fn read(&self, grid: &Grid) -> Vec<CellState> {
        (0..self.length_in(grid)).map(|at| self.get_square(grid, at))
                                 .collect()
    }

    /// Writes a line back into the grid, resolving working values first.
    ///
    /// Returns the squares whose state actually changed.
    pub fn write(&self, grid: &mut Grid, line: &[CellState]) -> Changes {
        let mut changes = Changes::new();
        for (at, state) in line.iter().enumerate() {
            let new = state.resolved();
            let (x,y) = self.square_index(at);
            let square = grid.get_square_mut(x, y);
            if *square != new {
                changes.push(CellChange::new(y, x, *square, new));
                *square = new;
            }
        }
        changes
    }
}
impl DirectionalSequence for LineId {
    fn get_index(&self) -> usize { self.index }
    fn get_direction(&self) -> Direction { self.direction }
}
impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // 1-based, as a person would count
        write!(f, "{} {}", self.direction, self.index + 1)
    }
}
