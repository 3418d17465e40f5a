//! A* over a [Grid] with unit step costs.
//!
//! The open set is a [BinaryHeap] ordered by `(f, insertion order)`, so cells of equal priority
//! are expanded first-in first-out regardless of the heap's own tie behaviour. A cell is never
//! pushed twice while it is open: when its score improves the existing entry keeps its old
//! priority, and the scores are always re-read from [SearchState] when the cell is expanded.
use crate::grid::Grid;
use crate::observer::{NoopObserver, Observer, Scores, Visit, VisitKind};
use crate::{heuristic, Cell, STEP_COST, UNREACHED};
use fxhash::{FxHashMap, FxHashSet};
use itertools::Itertools;
use log::{debug, trace};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Terminal result of a search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A shortest path, ordered from start to goal, both inclusive.
    Found { path: Vec<Cell> },
    /// The open set ran empty before the goal was reached.
    NotFound,
    /// The observer requested cancellation before the search finished.
    Cancelled,
}

impl SearchOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found { .. })
    }

    pub fn path(&self) -> Option<&[Cell]> {
        match self {
            SearchOutcome::Found { path } => Some(path),
            _ => None,
        }
    }

    pub fn into_path(self) -> Option<Vec<Cell>> {
        match self {
            SearchOutcome::Found { path } => Some(path),
            _ => None,
        }
    }
}

struct OpenEntry {
    estimated_cost: i32,
    order: usize,
    index: usize,
}

impl Eq for OpenEntry {}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.estimated_cost == other.estimated_cost && self.order == other.order
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for the max-heap: smallest estimate first, then earliest insertion.
        other
            .estimated_cost
            .cmp(&self.estimated_cost)
            .then_with(|| other.order.cmp(&self.order))
    }
}

/// Bookkeeping of a single search, keyed by the grid's row-major cell index.
struct SearchState {
    g_score: Vec<i32>,
    f_score: Vec<i32>,
    came_from: FxHashMap<usize, usize>,
    open: BinaryHeap<OpenEntry>,
    open_members: FxHashSet<usize>,
    inserted: usize,
}

impl SearchState {
    fn new(n_cells: usize) -> SearchState {
        SearchState {
            g_score: vec![UNREACHED; n_cells],
            f_score: vec![UNREACHED; n_cells],
            came_from: FxHashMap::default(),
            open: BinaryHeap::new(),
            open_members: FxHashSet::default(),
            inserted: 0,
        }
    }

    fn scores(&self, index: usize) -> Scores {
        Scores {
            g: self.g_score[index],
            f: self.f_score[index],
        }
    }

    fn push(&mut self, index: usize) {
        debug_assert!(!self.open_members.contains(&index));
        self.open.push(OpenEntry {
            estimated_cost: self.f_score[index],
            order: self.inserted,
            index,
        });
        self.inserted += 1;
        self.open_members.insert(index);
    }

    fn pop(&mut self) -> Option<usize> {
        let OpenEntry { index, .. } = self.open.pop()?;
        let was_open = self.open_members.remove(&index);
        debug_assert!(was_open, "open set entry without membership");
        Some(index)
    }

    /// Follows the predecessors from `goal` back to the start, yielding the goal first.
    fn reverse_path(&self, goal: usize) -> Vec<usize> {
        std::iter::successors(Some(goal), |ix| self.came_from.get(ix).copied()).collect()
    }
}

/// Searches a shortest path from `start` to `goal`, reporting every opened and closed cell and,
/// on success, every cell of the path to `observer`.
///
/// Path visits are reported while walking back from the goal, so the goal comes first and the
/// start last. The start is never reported as opened or closed.
///
/// Panics if `start` or `goal` lies outside the grid.
pub fn search<O>(grid: &Grid, start: Cell, goal: Cell, observer: &mut O) -> SearchOutcome
where
    O: Observer + ?Sized,
{
    let start_ix = grid.index(&start);
    let goal_ix = grid.index(&goal);
    debug!("Searching path from {} to {}", start, goal);

    let mut state = SearchState::new(grid.len());
    state.g_score[start_ix] = 0;
    state.f_score[start_ix] = heuristic(&start, &goal);
    state.push(start_ix);

    let mut expansions = 0usize;
    loop {
        if observer.cancel_requested() {
            debug!("Search from {} to {} cancelled after {} expansions", start, goal, expansions);
            return SearchOutcome::Cancelled;
        }
        let current = match state.pop() {
            Some(current) => current,
            None => break,
        };

        if current == goal_ix {
            let reversed = state.reverse_path(goal_ix);
            for &ix in &reversed {
                observer.on_visit(&Visit {
                    kind: VisitKind::Path,
                    cell: grid.cell_at(ix),
                    scores: state.scores(ix),
                });
            }
            let path: Vec<Cell> = reversed.into_iter().rev().map(|ix| grid.cell_at(ix)).collect();
            debug!(
                "Reached {} from {} in {} steps after {} expansions",
                goal,
                start,
                path.len() - 1,
                expansions
            );
            return SearchOutcome::Found { path };
        }

        expansions += 1;
        let current_cell = grid.cell_at(current);
        let current_g = state.g_score[current];
        trace!(
            "Expanding {} with g = {}, f = {}",
            current_cell,
            current_g,
            state.f_score[current]
        );
        for neighbor in grid.neighbors(&current_cell) {
            let n = grid.index(&neighbor);
            let tentative_g = current_g + STEP_COST;
            if tentative_g >= state.g_score[n] {
                continue;
            }
            let h = heuristic(&neighbor, &goal);
            state.came_from.insert(n, current);
            state.g_score[n] = tentative_g;
            state.f_score[n] = tentative_g + h;
            if !state.open_members.contains(&n) {
                state.push(n);
                trace!("Opened {}: f = {} = g {} + h {}", neighbor, tentative_g + h, tentative_g, h);
                observer.on_visit(&Visit {
                    kind: VisitKind::Opened,
                    cell: neighbor,
                    scores: state.scores(n),
                });
            }
        }

        if current != start_ix {
            trace!("Closed {}", current_cell);
            observer.on_visit(&Visit {
                kind: VisitKind::Closed,
                cell: current_cell,
                scores: state.scores(current),
            });
        }
    }

    debug!(
        "{} is not reachable from {} ({} expansions)",
        goal, start, expansions
    );
    SearchOutcome::NotFound
}

/// Shortest path from `start` to `goal` without observation.
pub fn find_path(grid: &Grid, start: Cell, goal: Cell) -> Option<Vec<Cell>> {
    search(grid, start, goal, &mut NoopObserver).into_path()
}

/// Number of unit steps along a path, scaled by [STEP_COST]. An empty or single-cell path costs
/// nothing.
pub fn path_cost(path: &[Cell]) -> i32 {
    debug_assert!(path.iter().tuple_windows().all(|(a, b)| a.is_adjacent(b)));
    path.len().saturating_sub(1) as i32 * STEP_COST
}
