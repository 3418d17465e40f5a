//! # grid_astar
//!
//! Shortest-path search on a 4-connected grid with unit step costs, using
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) guided by the
//! [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry).
//!
//! The search is fully deterministic: neighbours are always enumerated in the
//! order down, up, right, left and cells of equal priority are expanded in the
//! order they were discovered. Every status change of a cell (opened, closed,
//! part of the final path) can be observed through an [Observer], which makes
//! the crate suitable for driving visualisations of the algorithm. A search can
//! be cancelled cooperatively through a [CancelToken].
//!
//! ```
//! use grid_astar::{find_path, Cell, Grid};
//!
//! let blocked = [(0, 0), (1, 0), (1, 1), (3, 0)].map(Cell::from);
//! let grid = Grid::from_blocked(4, 4, blocked);
//! let path = find_path(&grid, Cell::new(2, 2), Cell::new(0, 2)).unwrap();
//! assert_eq!(path, vec![Cell::new(2, 2), Cell::new(1, 2), Cell::new(0, 2)]);
//! ```
pub mod grid;
pub mod observer;
pub mod scenario;
pub mod search;

use core::fmt;

pub use grid::Grid;
pub use observer::{
    CancelToken, Cancellable, NoopObserver, Observer, Scores, Visit, VisitKind, VisitLog,
};
pub use scenario::{reference_scenarios, ParseScenarioError, Scenario};
pub use search::{find_path, path_cost, search, SearchOutcome};

/// Cost of a single step between two adjacent cells.
pub const STEP_COST: i32 = 1;

/// Score of a cell the search has not reached (yet).
pub const UNREACHED: i32 = i32::MAX;

/// Row and column offsets of the von Neumann neighbourhood in the order in
/// which neighbours are enumerated: down, up, right, left. Tie-breaking in the
/// open set depends on this order.
pub const NEUMANN_ORDER: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// A position on the grid, addressed by row and column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    pub const fn new(row: i32, col: i32) -> Cell {
        Cell { row, col }
    }

    /// The cell `dr` rows and `dc` columns away. May lie outside any grid.
    pub const fn step(&self, dr: i32, dc: i32) -> Cell {
        Cell::new(self.row + dr, self.col + dc)
    }

    pub fn manhattan_distance(&self, other: &Cell) -> i32 {
        (self.row - other.row).abs() + (self.col - other.col).abs()
    }

    /// Whether `other` is exactly one horizontal or vertical step away.
    pub fn is_adjacent(&self, other: &Cell) -> bool {
        self.manhattan_distance(other) == 1
    }
}

impl From<(i32, i32)> for Cell {
    fn from((row, col): (i32, i32)) -> Cell {
        Cell::new(row, col)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Heuristic used by the search: the Manhattan distance scaled by [STEP_COST].
/// Admissible and consistent for unit-cost 4-directional movement.
pub fn heuristic(a: &Cell, b: &Cell) -> i32 {
    a.manhattan_distance(b) * STEP_COST
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_distance_is_symmetric() {
        let a = Cell::new(2, 2);
        let b = Cell::new(0, 3);
        assert_eq!(a.manhattan_distance(&b), 3);
        assert_eq!(b.manhattan_distance(&a), 3);
        assert_eq!(heuristic(&a, &a), 0);
    }

    #[test]
    fn neighbour_order_is_down_up_right_left() {
        let c = Cell::new(1, 1);
        let order: Vec<Cell> = NEUMANN_ORDER.iter().map(|&(dr, dc)| c.step(dr, dc)).collect();
        assert_eq!(
            order,
            vec![Cell::new(2, 1), Cell::new(0, 1), Cell::new(1, 2), Cell::new(1, 0)]
        );
        assert!(order.iter().all(|n| n.is_adjacent(&c)));
    }

    #[test]
    fn display_and_conversion() {
        let c: Cell = (3, 0).into();
        assert_eq!(c.to_string(), "(3, 0)");
    }
}
