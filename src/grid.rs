use crate::{Cell, NEUMANN_ORDER};
use core::fmt;
use grid_util::grid::{BoolGrid, Grid as ValueGrid};
use log::{info, warn};
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

/// [Grid] stores the passability of a fixed-size rectangle of cells in a [BoolGrid], where
/// [true] marks a blocked cell, and maintains a [UnionFind] of connected components over the
/// passable cells. Cells are addressed by [Cell] (row, column); the backing [BoolGrid] uses the
/// column as `x` and the row as `y`.
///
/// The grid carries no search state, so the same grid can be searched any number of times.
#[derive(Clone, Debug)]
pub struct Grid {
    blocked: BoolGrid,
    rows: usize,
    cols: usize,
    components: UnionFind<usize>,
    components_dirty: bool,
}

impl Grid {
    /// Creates a grid of the given dimensions in which every cell is passable.
    pub fn new(rows: usize, cols: usize) -> Grid {
        let mut grid = Grid {
            blocked: BoolGrid::new(cols, rows, false),
            rows,
            cols,
            components: UnionFind::new(rows * cols),
            components_dirty: false,
        };
        grid.generate_components();
        grid
    }

    /// Creates a grid with the given cells blocked and fresh components.
    pub fn from_blocked<I>(rows: usize, cols: usize, blocked: I) -> Grid
    where
        I: IntoIterator<Item = Cell>,
    {
        let mut grid = Grid::new(rows, cols);
        for cell in blocked {
            grid.set_blocked(cell, true);
        }
        grid.update();
        grid
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of cells, blocked or not.
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn in_bounds(&self, cell: &Cell) -> bool {
        cell.row >= 0
            && cell.col >= 0
            && (cell.row as usize) < self.rows
            && (cell.col as usize) < self.cols
    }

    fn assert_in_bounds(&self, cell: &Cell) {
        assert!(
            self.in_bounds(cell),
            "{} lies outside the {}x{} grid",
            cell,
            self.rows,
            self.cols
        );
    }

    /// Row-major arena index of a cell. Panics if the cell is out of bounds.
    pub fn index(&self, cell: &Cell) -> usize {
        self.assert_in_bounds(cell);
        cell.row as usize * self.cols + cell.col as usize
    }

    /// Inverse of [index](Self::index).
    pub fn cell_at(&self, index: usize) -> Cell {
        debug_assert!(index < self.len());
        Cell::new((index / self.cols) as i32, (index % self.cols) as i32)
    }

    /// Iterates over all cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.len()).map(move |ix| self.cell_at(ix))
    }

    /// Panics if the cell is out of bounds.
    pub fn is_blocked(&self, cell: &Cell) -> bool {
        self.assert_in_bounds(cell);
        self.blocked.get(cell.col as usize, cell.row as usize)
    }

    /// A cell can be entered if it lies on the grid and is not blocked.
    pub fn can_move_to(&self, cell: &Cell) -> bool {
        self.in_bounds(cell) && !self.blocked.get(cell.col as usize, cell.row as usize)
    }

    /// The traversable neighbours of `cell` in the fixed order down, up, right, left. Only
    /// bounds and passability are considered.
    pub fn neighbors(&self, cell: &Cell) -> SmallVec<[Cell; 4]> {
        NEUMANN_ORDER
            .iter()
            .map(|&(dr, dc)| cell.step(dr, dc))
            .filter(|n| self.can_move_to(n))
            .collect()
    }

    /// Updates the passability of a cell. Unblocking joins the cell with its passable neighbours;
    /// blocking a passable cell may split a component, so the components are flagged as dirty.
    /// Not to be called while a search over this grid is running.
    pub fn set_blocked(&mut self, cell: Cell, blocked: bool) {
        self.assert_in_bounds(&cell);
        let was_blocked = self.blocked.get(cell.col as usize, cell.row as usize);
        self.blocked.set(cell.col as usize, cell.row as usize, blocked);
        if blocked {
            if !was_blocked {
                self.components_dirty = true;
            }
        } else {
            let ix = self.index(&cell);
            for n in self.neighbors(&cell) {
                let n_ix = self.index(&n);
                self.components.union(ix, n_ix);
            }
        }
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            info!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up passable neighbours. Looking down and
    /// right from every cell covers every edge once.
    pub fn generate_components(&mut self) {
        self.components = UnionFind::new(self.len());
        self.components_dirty = false;
        for ix in 0..self.len() {
            let cell = self.cell_at(ix);
            if self.blocked.get(cell.col as usize, cell.row as usize) {
                continue;
            }
            for n in [cell.step(1, 0), cell.step(0, 1)] {
                if self.can_move_to(&n) {
                    let n_ix = self.index(&n);
                    self.components.union(ix, n_ix);
                }
            }
        }
    }

    /// Retrieves the component id a given [Cell] belongs to.
    pub fn component(&self, cell: &Cell) -> usize {
        self.components.find(self.index(cell))
    }

    /// Checks if start and goal are on the same component. Out-of-bounds cells are never
    /// reachable. Components should be up to date, see [update](Self::update).
    pub fn reachable(&self, start: &Cell, goal: &Cell) -> bool {
        if self.components_dirty {
            warn!("Reachability of {} from {} queried on dirty components", goal, start);
        }
        self.in_bounds(start)
            && self.in_bounds(goal)
            && self.components.equiv(self.index(start), self.index(goal))
    }

    /// Checks if start and goal are not on the same component.
    pub fn unreachable(&self, start: &Cell, goal: &Cell) -> bool {
        !self.reachable(start, goal)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..self.rows as i32 {
            let line = (0..self.cols as i32)
                .map(|col| if self.blocked.get(col as usize, row as usize) { '#' } else { '.' })
                .collect::<String>();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_grid() -> Grid {
        // |#...|
        // |##..|
        // |....|
        // |#...|
        Grid::from_blocked(
            4,
            4,
            [Cell::new(0, 0), Cell::new(1, 0), Cell::new(1, 1), Cell::new(3, 0)],
        )
    }

    #[test]
    fn neighbours_follow_fixed_order() {
        let grid = Grid::new(3, 3);
        let n = grid.neighbors(&Cell::new(1, 1));
        assert_eq!(
            n.as_slice(),
            &[Cell::new(2, 1), Cell::new(0, 1), Cell::new(1, 2), Cell::new(1, 0)]
        );
    }

    #[test]
    fn neighbours_skip_blocked_and_out_of_bounds() {
        let grid = reference_grid();
        // Corner: only down and right lie on the grid, (1,0) is blocked.
        assert_eq!(grid.neighbors(&Cell::new(0, 1)).as_slice(), &[Cell::new(0, 2)]);
        assert_eq!(
            grid.neighbors(&Cell::new(2, 0)).as_slice(),
            &[Cell::new(2, 1)]
        );
        // A blocked cell still reports its passable neighbours.
        assert_eq!(
            grid.neighbors(&Cell::new(1, 1)).as_slice(),
            &[Cell::new(2, 1), Cell::new(0, 1), Cell::new(1, 2)]
        );
    }

    #[test]
    fn index_is_row_major() {
        let grid = Grid::new(3, 5);
        assert_eq!(grid.index(&Cell::new(0, 4)), 4);
        assert_eq!(grid.index(&Cell::new(2, 1)), 11);
        for ix in 0..grid.len() {
            assert_eq!(grid.index(&grid.cell_at(ix)), ix);
        }
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn out_of_bounds_index_panics() {
        let grid = Grid::new(2, 2);
        grid.index(&Cell::new(2, 0));
    }

    /// Tests whether cells are correctly mapped to different connected components
    #[test]
    fn component_generation() {
        // |.#.|
        // |.#.|
        let grid = Grid::from_blocked(2, 3, [Cell::new(0, 1), Cell::new(1, 1)]);
        assert!(grid.reachable(&Cell::new(0, 0), &Cell::new(1, 0)));
        assert!(grid.unreachable(&Cell::new(0, 0), &Cell::new(0, 2)));
        assert!(grid.unreachable(&Cell::new(0, 0), &Cell::new(0, 1)));
        assert!(grid.unreachable(&Cell::new(0, 0), &Cell::new(5, 5)));
    }

    #[test]
    fn unblocking_joins_components() {
        let mut grid = Grid::from_blocked(1, 3, [Cell::new(0, 1)]);
        assert!(grid.unreachable(&Cell::new(0, 0), &Cell::new(0, 2)));
        grid.set_blocked(Cell::new(0, 1), false);
        assert!(grid.reachable(&Cell::new(0, 0), &Cell::new(0, 2)));
    }

    #[test]
    fn blocking_marks_components_dirty() {
        let mut grid = Grid::new(1, 3);
        grid.set_blocked(Cell::new(0, 1), true);
        // Stale until regenerated.
        assert!(grid.reachable(&Cell::new(0, 0), &Cell::new(0, 2)));
        grid.update();
        assert!(grid.unreachable(&Cell::new(0, 0), &Cell::new(0, 2)));
    }

    #[test]
    fn display_renders_blocked_cells() {
        assert_eq!(reference_grid().to_string(), "#...\n##..\n....\n#...\n");
    }
}
