//! Observation of a running search.
//!
//! The search engine reports every status change of a cell to an [Observer] as a [Visit]. The
//! observer is invoked synchronously and may take as long as it likes, e.g. to render a frame and
//! sleep. Between two visits it can ask the engine to stop through
//! [cancel_requested](Observer::cancel_requested); [Cancellable] wires that up to a
//! [CancelToken] that may be triggered from anywhere, including other threads.
use crate::Cell;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// What happened to a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VisitKind {
    /// The cell entered the open set.
    Opened,
    /// All neighbours of the cell have been examined. Never reported for the start.
    Closed,
    /// The cell is part of the final path.
    Path,
}

/// Scores of a cell at the moment of the visit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Scores {
    /// Cost of the best known path from the start.
    pub g: i32,
    /// `g` plus the heuristic estimate to the goal.
    pub f: i32,
}

impl Scores {
    /// The heuristic part of the score.
    pub fn h(&self) -> i32 {
        self.f - self.g
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Visit {
    pub kind: VisitKind,
    pub cell: Cell,
    pub scores: Scores,
}

/// Receives the visitation events of a search.
pub trait Observer {
    fn on_visit(&mut self, visit: &Visit);

    /// Polled by the engine before every expansion. Returning [true] ends the search with
    /// [SearchOutcome::Cancelled](crate::SearchOutcome::Cancelled).
    fn cancel_requested(&self) -> bool {
        false
    }
}

impl<F> Observer for F
where
    F: FnMut(&Visit),
{
    fn on_visit(&mut self, visit: &Visit) {
        self(visit)
    }
}

/// Ignores all visits.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl Observer for NoopObserver {
    fn on_visit(&mut self, _visit: &Visit) {}
}

/// Shared cancellation flag. Clones refer to the same flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> CancelToken {
        CancelToken::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Clears the flag so the token can be reused for another search.
    pub fn reset(&self) {
        self.cancelled.store(false, Ordering::SeqCst);
    }
}

/// Forwards visits to the wrapped observer and requests cancellation once the token is triggered.
#[derive(Debug)]
pub struct Cancellable<O> {
    inner: O,
    token: CancelToken,
}

impl<O: Observer> Cancellable<O> {
    pub fn new(inner: O, token: CancelToken) -> Cancellable<O> {
        Cancellable { inner, token }
    }

    pub fn token(&self) -> &CancelToken {
        &self.token
    }

    pub fn into_inner(self) -> O {
        self.inner
    }
}

impl<O: Observer> Observer for Cancellable<O> {
    fn on_visit(&mut self, visit: &Visit) {
        self.inner.on_visit(visit);
    }

    fn cancel_requested(&self) -> bool {
        self.token.is_cancelled() || self.inner.cancel_requested()
    }
}

/// Records every visit in order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VisitLog {
    pub visits: Vec<Visit>,
}

impl VisitLog {
    pub fn new() -> VisitLog {
        VisitLog::default()
    }

    /// The cells of all visits of the given kind, in the order they were reported.
    pub fn cells(&self, kind: VisitKind) -> Vec<Cell> {
        self.visits
            .iter()
            .filter(|v| v.kind == kind)
            .map(|v| v.cell)
            .collect()
    }

    pub fn count(&self, kind: VisitKind) -> usize {
        self.visits.iter().filter(|v| v.kind == kind).count()
    }

    pub fn len(&self) -> usize {
        self.visits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }
}

impl Observer for VisitLog {
    fn on_visit(&mut self, visit: &Visit) {
        self.visits.push(*visit);
    }
}
