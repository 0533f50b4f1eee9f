// vim: set ai et ts=4 sw=4 sts=4:
//! Runs a solve on its own thread and streams its progress back over a channel.
//!
//! The caller moves the grid, hints and line status into a [`Request`] and gets
//! them back in every [`Response`]: zero or more `Update`s (only when a delay
//! is configured) followed by exactly one `Finish` or `Error`.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender, RecvTimeoutError};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use log::{debug, info};
use serde::{Serialize, Deserialize};

use super::grid::{Grid, CellState};
use super::hints::{Hints, LineStatuses};
use super::line::LineId;
use super::solver::Solver;
use super::error::{RequestError, WorkerError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub grid:   Grid,
    pub hints:  Hints,
    #[serde(default)]
    pub status: Option<LineStatuses>,
    /// Milliseconds to pause after each line; enables `Update` messages.
    #[serde(default)]
    pub delay:  Option<u64>,
}

impl Request {
    /// Sets square (col, row) by hand before solving on.
    ///
    /// A carried status table would otherwise still call both crossing lines
    /// settled, so they are reopened.
    pub fn commit(&mut self, row: usize, col: usize, state: CellState) {
        *self.grid.get_square_mut(col, row) = state;
        if let Some(status) = self.status.as_mut() {
            status.touch(row, col);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Response {
    Update {
        grid:    Grid,
        scanner: LineId,
        hints:   Hints,
        status:  LineStatuses,
    },
    Error {
        grid:    Grid,
        scanner: LineId,
        hints:   Hints,
        status:  LineStatuses,
    },
    Finish {
        grid:       Grid,
        hints:      Hints,
        status:     LineStatuses,
        iterations: usize,
    },
}
impl Response {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Response::Update { .. })
    }
    pub fn grid(&self) -> &Grid {
        match self {
            Response::Update { grid, .. } => grid,
            Response::Error  { grid, .. } => grid,
            Response::Finish { grid, .. } => grid,
        }
    }
}

/// A response stamped with the generation of the solve that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub generation: u64,
    pub response:   Response,
}

/// Validates the request on the calling thread, then starts the solve.
fn start(request: Request, generation: u64, sender: Sender<Envelope>)
    -> Result<(JoinHandle<()>, Arc<AtomicBool>), RequestError>
{
    let delay = request.delay.filter(|&ms| ms > 0).map(Duration::from_millis);
    let solver = Solver::new(request.grid, request.hints, request.status)?;
    let cancelled = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&cancelled);
    let handle = thread::spawn(move || run(solver, delay, generation, sender, flag));
    Ok((handle, cancelled))
}

fn run(mut solver: Solver, delay: Option<Duration>, generation: u64,
       sender: Sender<Envelope>, cancelled: Arc<AtomicBool>)
{
    let send = |response: Response| sender.send(Envelope { generation, response }).is_ok();
    let abandoned = || {
        let gone = cancelled.load(Ordering::Relaxed);
        if gone {
            debug!("solve {} abandoned by its caller", generation);
        }
        gone
    };

    while let Some(scan) = solver.next() {
        match scan {
            Ok(scan) => {
                if let Some(delay) = delay {
                    let update = Response::Update {
                        grid:    solver.grid.clone(),
                        scanner: scan.line,
                        hints:   solver.hints.clone(),
                        status:  solver.status.clone(),
                    };
                    if abandoned() || !send(update) {
                        return;
                    }
                    thread::sleep(delay);
                }
                if abandoned() {
                    return;
                }
            }
            Err(error) => {
                let (grid, hints, status) = solver.into_parts();
                send(Response::Error { grid, scanner: error.line(), hints, status });
                return;
            }
        }
    }

    let iterations = solver.iterations;
    info!("solve {} finished after {} iterations", generation, iterations);
    let (grid, hints, status) = solver.into_parts();
    send(Response::Finish { grid, hints, status, iterations });
}

/// Handle on one running solve with a channel of its own.
///
/// Dropping it abandons the solve.
#[derive(Debug)]
pub struct Worker {
    pub generation: u64,
    receiver:       Receiver<Envelope>,
    handle:         Option<JoinHandle<()>>,
    cancelled:      Arc<AtomicBool>,
}

impl Worker {
    pub fn spawn(request: Request, generation: u64) -> Result<Worker, RequestError> {
        let (sender, receiver) = mpsc::channel();
        let (handle, cancelled) = start(request, generation, sender)?;
        Ok(Worker { generation, receiver, handle: Some(handle), cancelled })
    }

    /// Blocks for the next response; `None` once the worker has hung up.
    pub fn recv(&self) -> Option<Response> {
        self.receiver.recv().ok().map(|envelope| envelope.response)
    }

    /// Collects every response up to and including the terminal one.
    pub fn wait(mut self) -> Result<Vec<Response>, WorkerError> {
        let mut responses = Vec::new();
        while let Some(response) = self.recv() {
            let terminal = response.is_terminal();
            responses.push(response);
            if terminal {
                if let Some(handle) = self.handle.take() {
                    let _ = handle.join();
                }
                return Ok(responses);
            }
        }
        Err(WorkerError::Disconnected)
    }
}
impl Drop for Worker {
    fn drop(&mut self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }
}

// -------------------------------------------------------------

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// The solve a `Dispatcher` currently waits on.
#[derive(Debug)]
struct Running {
    generation: u64,
    handle:     JoinHandle<()>,
    cancelled:  Arc<AtomicBool>,
}
impl Drop for Running {
    fn drop(&mut self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }
}

/// Caller-side owner of at most one solve at a time.
///
/// Every solve reports on the same channel. Submitting a new request
/// abandons the running one; whatever it already sent is recognized by its
/// generation and discarded rather than applied.
#[derive(Debug)]
pub struct Dispatcher {
    generation: u64,
    sender:     Sender<Envelope>,
    receiver:   Receiver<Envelope>,
    active:     Option<Running>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Dispatcher { generation: 0, sender, receiver, active: None }
    }

    pub fn generation(&self) -> u64 { self.generation }
    pub fn is_busy(&self) -> bool { self.active.is_some() }

    pub fn submit(&mut self, request: Request) -> Result<u64, RequestError> {
        let generation = self.generation + 1;
        let (handle, cancelled) = start(request, generation, self.sender.clone())?;
        if let Some(previous) = self.active.replace(Running { generation, handle, cancelled }) {
            debug!("solve {} superseded by {}", previous.generation, generation);
        }
        self.generation = generation;
        Ok(generation)
    }

    /// Whether a response belongs to the solve currently in progress.
    pub fn accepts(&self, envelope: &Envelope) -> bool {
        envelope.generation == self.generation
    }

    /// Blocks for the next response of the current solve.
    pub fn recv(&mut self) -> Result<Response, WorkerError> {
        loop {
            // checked before receiving: a finished thread has sent everything it ever will
            let finished = match &self.active {
                Some(running) => running.handle.is_finished(),
                None          => return Err(WorkerError::Idle),
            };
            let envelope = match self.receiver.recv_timeout(POLL_INTERVAL) {
                Ok(envelope) => envelope,
                Err(RecvTimeoutError::Timeout) if !finished => continue,
                Err(_) => {
                    self.active = None;
                    return Err(WorkerError::Disconnected);
                }
            };
            if !self.accepts(&envelope) {
                debug!("dropping stale response from solve {}", envelope.generation);
                continue;
            }
            if envelope.response.is_terminal() {
                self.active = None;
            }
            return Ok(envelope.response);
        }
    }
}
