use grid_astar::{find_path, Cell, Grid};

// In this example a path is found on a 3x3 grid with shape
//  ___
// |S  |
// | # |
// |  E|
//  ___
// where
// - # marks an obstacle
// - S marks the start
// - E marks the end
//
// Nodes have a 4-neighborhood

fn main() {
    let grid = Grid::from_blocked(3, 3, [Cell::new(1, 1)]);
    println!("{}", grid);
    let start = Cell::new(0, 0);
    let end = Cell::new(2, 2);
    let path = find_path(&grid, start, end).unwrap();
    println!("Path:");
    for p in path {
        println!("{}", p);
    }
}
