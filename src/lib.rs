// vim: set ai et ts=4 sw=4 sts=4:
//! Nonogram solving by single-line deduction.
//!
//! Every row and column is solved on its own: all placements of its runs are
//! enumerated, those contradicting known squares are discarded, and squares on
//! which all survivors agree are committed. Lines are visited round-robin until
//! none of them changes any more. Puzzles that need reasoning across lines end
//! at that fixpoint with some squares still unset.
pub mod util;
pub mod grid;
pub mod line;
pub mod hints;
pub mod solver;
pub mod puzzle;
pub mod worker;
pub mod error;

pub use self::grid::{Grid, CellState};
pub use self::hints::{Hints, LineStatus, LineStatuses};
pub use self::line::LineId;
pub use self::puzzle::Puzzle;
pub use self::solver::{Solver, SolverState, Scan};
pub use self::util::Direction;
pub use self::worker::{Request, Response, Envelope, Worker, Dispatcher};
pub use self::error::{SolveError, RequestError, PuzzleError, WorkerError};
