// vim: set ai et ts=4 sw=4 sts=4:
use std::fmt;
use std::convert::TryFrom;
use serde::{Serialize, Deserialize};

pub trait HasGridLocation {
    fn get_row(&self) -> usize;
    fn get_col(&self) -> usize;
    fn fmt_location(&self) -> String {
        format!("(col={:-2}, row={:-2})", self.get_col(), self.get_row())
    }
}

/// State of a single square.
///
/// Only `Empty`, `Filled` and `Unset` are found in a grid between line passes;
/// the remaining states are working values used while merging the candidate
/// placements of one line.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellState {
    Empty,
    Filled,
    Unset,
    TentativeFilled,
    TentativeEmpty,
    Conflicting,
}
impl CellState {
    pub fn is_committed(self) -> bool {
        self == CellState::Empty || self == CellState::Filled
    }
    pub fn is_at_rest(self) -> bool {
        self.is_committed() || self == CellState::Unset
    }
    /// Maps a working value back onto the at-rest state it stands for.
    pub fn resolved(self) -> CellState {
        match self {
            CellState::TentativeFilled => CellState::Filled,
            CellState::TentativeEmpty  => CellState::Empty,
            CellState::Conflicting     => CellState::Unset,
            other                      => other,
        }
    }
    pub fn fmt_visual(&self) -> &str {
        match self {
            CellState::Empty           => " ",
            CellState::Filled          => "\u{25A0}",
            CellState::Unset           => ".",
            CellState::TentativeFilled => "+",
            CellState::TentativeEmpty  => "-",
            CellState::Conflicting     => "?",
        }
    }
}
impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", match *self {
            CellState::Empty           => "Empty",
            CellState::Filled          => "Filled",
            CellState::Unset           => "Unset",
            CellState::TentativeFilled => "TentativeFilled",
            CellState::TentativeEmpty  => "TentativeEmpty",
            CellState::Conflicting     => "Conflicting",
        })
    }
}
impl TryFrom<char> for CellState {
    type Error = char;
    fn try_from(value: char) -> Result<Self, Self::Error> {
        // picture notation used by Grid::from_picture
        match value {
            '#' | 'X' | '\u{25A0}' => Ok(CellState::Filled),
            '.' | ' '              => Ok(CellState::Empty),
            '?'                    => Ok(CellState::Unset),
            other                  => Err(other),
        }
    }
}

// ------------------------------------------------

#[derive(PartialEq, Eq, Debug, Clone)]
pub struct CellChange {
    pub row: usize,
    pub col: usize,
    pub old: CellState,
    pub new: CellState,
}
impl CellChange {
    pub fn new(row: usize, col: usize, old: CellState, new: CellState) -> Self {
        Self { row, col, old, new }
    }
}
impl HasGridLocation for CellChange {
    fn get_row(&self) -> usize { self.row }
    fn get_col(&self) -> usize { self.col }
}
impl fmt::Display for CellChange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Change: in square {}, state was changed from {} to {}",
            self.fmt_location(),
            self.old,
            self.new)
    }
}
pub type Changes = Vec<CellChange>;

// ------------------------------------------------

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid {
    pub squares: Vec<Vec<CellState>>,
}
impl Grid {
    pub fn new(width: usize, height: usize)
        -> Self
    {
        Grid {
            squares: vec![vec![CellState::Unset; width]; height],
        }
    }

    /// Builds a committed grid from text, one line per row.
    ///
    /// `#` (or `X`) is a filled square, `.` an empty one and `?` an unset one.
    pub fn from_picture(picture: &str) -> Result<Self, char> {
        let squares = picture.lines()
                             .map(str::trim)
                             .filter(|line| !line.is_empty())
                             .map(|line| line.chars()
                                             .map(CellState::try_from)
                                             .collect::<Result<Vec<_>, _>>())
                             .collect::<Result<Vec<_>, _>>()?;
        Ok(Grid { squares })
    }

    pub fn width(&self) -> usize { self.squares.first().map_or(0, Vec::len) }
    pub fn height(&self) -> usize { self.squares.len() }
    pub fn get_square(&self, x: usize, y: usize) -> CellState {
        self.squares[y][x]
    }
    pub fn get_square_mut(&mut self, x: usize, y: usize) -> &mut CellState {
        &mut self.squares[y][x]
    }

    pub fn is_rectangular(&self) -> bool {
        let width = self.width();
        self.squares.iter().all(|row| row.len() == width)
    }
    /// True when no square is left undetermined.
    pub fn is_complete(&self) -> bool {
        self.squares.iter().flatten().all(|s| s.is_committed())
    }
    pub fn count(&self, state: CellState) -> usize {
        self.squares.iter().flatten().filter(|&&s| s == state).count()
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Grid(w={}, h={})", self.width(), self.height())
    }
}
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.squares {
            for square in row {
                write!(f, "{}", match square {
                    CellState::Filled => '#',
                    CellState::Empty  => '.',
                    _                 => '?',
                })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
