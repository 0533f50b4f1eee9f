// vim: set ai et ts=4 sw=4 sts=4:
use super::util::Direction;
use super::grid::CellState;
use super::line::LineId;

/// A line whose hints admit no placement consistent with the committed squares.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SolveError {
    #[error("bad hints at {line}")]
    Contradiction { line: LineId },
}
impl SolveError {
    pub fn line(&self) -> LineId {
        match self {
            SolveError::Contradiction { line } => *line,
        }
    }
}

/// A solve request whose shape the solver cannot work with.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    #[error("grid rows have different lengths")]
    RaggedGrid,
    #[error("grid is {width}x{height}, but hints describe {columns} columns and {rows} rows")]
    DimensionMismatch { width: usize, height: usize, columns: usize, rows: usize },
    #[error("square (col={col}, row={row}) holds working state {state}")]
    UnsettledSquare { row: usize, col: usize, state: CellState },
    #[error("line status table does not match the hints")]
    StatusMismatch,
}

#[derive(Debug, thiserror::Error)]
pub enum PuzzleError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] yaml_rust::ScanError),
    #[error("puzzle document is empty")]
    EmptyDocument,
    #[error("puzzle has no \"{0}\" list")]
    MissingKey(&'static str),
    #[error("invalid runs for {direction} {index}: {message}")]
    InvalidRuns { direction: Direction, index: usize, message: String },
    #[error("unexpected character {0:?} in picture")]
    Picture(char),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorkerError {
    #[error("solver worker disconnected before sending a final message")]
    Disconnected,
    #[error("no solve in progress")]
    Idle,
}
