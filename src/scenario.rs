//! Search problems: a grid together with a start and a goal.
//!
//! Scenarios can be written as text maps, one line per row:
//!
//! ```text
//! #...
//! ##G.
//! ..S.
//! #...
//! ```
//!
//! where `.` is passable, `#` is blocked and `S`/`G` mark the (passable) start and goal.
use crate::grid::Grid;
use crate::observer::Observer;
use crate::search::{search, SearchOutcome};
use crate::Cell;
use core::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseScenarioError {
    #[error("map contains no rows")]
    Empty,
    #[error("row {row} has width {found}, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown tile {tile:?} at {cell}")]
    UnknownTile { tile: char, cell: Cell },
    #[error("map has no start tile 'S'")]
    MissingStart,
    #[error("map has no goal tile 'G'")]
    MissingGoal,
    #[error("second {tile:?} tile at {cell}")]
    Duplicate { tile: char, cell: Cell },
}

/// A grid with a start and a goal, both on the grid.
#[derive(Clone, Debug)]
pub struct Scenario {
    pub name: String,
    pub grid: Grid,
    pub start: Cell,
    pub goal: Cell,
}

impl Scenario {
    /// Panics if start or goal lies outside the grid.
    pub fn new(name: impl Into<String>, grid: Grid, start: Cell, goal: Cell) -> Scenario {
        assert!(grid.in_bounds(&start), "start {} lies outside the grid", start);
        assert!(grid.in_bounds(&goal), "goal {} lies outside the grid", goal);
        Scenario {
            name: name.into(),
            grid,
            start,
            goal,
        }
    }

    /// Searches this scenario, see [search].
    pub fn run<O>(&self, observer: &mut O) -> SearchOutcome
    where
        O: Observer + ?Sized,
    {
        search(&self.grid, self.start, self.goal, observer)
    }

    /// Parses a text map and names the scenario.
    pub fn parse_named(name: impl Into<String>, map: &str) -> Result<Scenario, ParseScenarioError> {
        let mut scenario: Scenario = map.parse()?;
        scenario.name = name.into();
        Ok(scenario)
    }
}

impl FromStr for Scenario {
    type Err = ParseScenarioError;

    fn from_str(map: &str) -> Result<Scenario, ParseScenarioError> {
        let rows: Vec<&str> = map
            .lines()
            .map(str::trim)
            .skip_while(|line| line.is_empty())
            .collect();
        let n_rows = rows.iter().rposition(|line| !line.is_empty()).map_or(0, |last| last + 1);
        let rows = &rows[..n_rows];
        let width = rows.first().ok_or(ParseScenarioError::Empty)?.chars().count();

        let mut grid = Grid::new(n_rows, width);
        let mut start = None;
        let mut goal = None;
        for (r, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(ParseScenarioError::RaggedRow {
                    row: r,
                    expected: width,
                    found,
                });
            }
            for (c, tile) in line.chars().enumerate() {
                let cell = Cell::new(r as i32, c as i32);
                match tile {
                    '.' => {}
                    '#' => grid.set_blocked(cell, true),
                    'S' | 'G' => {
                        let slot = if tile == 'S' { &mut start } else { &mut goal };
                        if slot.replace(cell).is_some() {
                            return Err(ParseScenarioError::Duplicate { tile, cell });
                        }
                    }
                    _ => return Err(ParseScenarioError::UnknownTile { tile, cell }),
                }
            }
        }
        grid.update();
        Ok(Scenario {
            name: String::new(),
            grid,
            start: start.ok_or(ParseScenarioError::MissingStart)?,
            goal: goal.ok_or(ParseScenarioError::MissingGoal)?,
        })
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..self.grid.rows() as i32 {
            let line = (0..self.grid.cols() as i32)
                .map(|col| {
                    let cell = Cell::new(row, col);
                    if cell == self.start {
                        'S'
                    } else if cell == self.goal {
                        'G'
                    } else if self.grid.is_blocked(&cell) {
                        '#'
                    } else {
                        '.'
                    }
                })
                .collect::<String>();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// The six subproblems on a 4×4 grid: each starts where the previous one ended, with the
/// obstacles rearranged between runs.
pub fn reference_scenarios() -> Vec<Scenario> {
    const PROBLEMS: [((i32, i32), (i32, i32), &[(i32, i32)]); 6] = [
        ((2, 2), (0, 2), &[(0, 0), (1, 0), (1, 1), (3, 0)]),
        ((0, 2), (2, 3), &[(0, 0), (1, 0), (1, 1), (3, 0)]),
        ((2, 3), (0, 0), &[(1, 0), (1, 1), (3, 0)]),
        ((0, 0), (3, 3), &[(1, 0), (1, 1), (2, 3), (3, 0)]),
        ((3, 3), (3, 0), &[(1, 0), (1, 1), (2, 3)]),
        ((3, 0), (1, 3), &[(1, 0), (1, 1), (2, 3), (3, 3)]),
    ];
    PROBLEMS
        .iter()
        .enumerate()
        .map(|(i, &(start, goal, blocked))| {
            let grid = Grid::from_blocked(4, 4, blocked.iter().map(|&c| Cell::from(c)));
            Scenario::new(format!("subproblem {}", i), grid, start.into(), goal.into())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIRST: &str = "
        #.G.
        ##..
        ..S.
        #...
    ";

    #[test]
    fn parses_text_map() {
        let scenario: Scenario = FIRST.parse().unwrap();
        assert_eq!(scenario.start, Cell::new(2, 2));
        assert_eq!(scenario.goal, Cell::new(0, 2));
        assert_eq!(scenario.grid.rows(), 4);
        assert_eq!(scenario.grid.cols(), 4);
        assert!(scenario.grid.is_blocked(&Cell::new(1, 1)));
        assert!(!scenario.grid.is_blocked(&scenario.start));
    }

    #[test]
    fn display_is_inverse_of_parsing() {
        let scenario = &reference_scenarios()[0];
        assert_eq!(scenario.to_string(), "#.G.\n##..\n..S.\n#...\n");
        let reparsed: Scenario = scenario.to_string().parse().unwrap();
        assert_eq!(reparsed.to_string(), scenario.to_string());
    }

    #[test]
    fn rejects_malformed_maps() {
        assert_eq!("\n  \n".parse::<Scenario>().unwrap_err(), ParseScenarioError::Empty);
        assert_eq!(
            "S..\nG.".parse::<Scenario>().unwrap_err(),
            ParseScenarioError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            }
        );
        assert_eq!(
            "S.x\nG..".parse::<Scenario>().unwrap_err(),
            ParseScenarioError::UnknownTile {
                tile: 'x',
                cell: Cell::new(0, 2)
            }
        );
        assert_eq!("S..".parse::<Scenario>().unwrap_err(), ParseScenarioError::MissingGoal);
        assert_eq!("..G".parse::<Scenario>().unwrap_err(), ParseScenarioError::MissingStart);
        assert_eq!(
            "SGS".parse::<Scenario>().unwrap_err(),
            ParseScenarioError::Duplicate {
                tile: 'S',
                cell: Cell::new(0, 2)
            }
        );
    }

    #[test]
    fn error_messages_name_the_cell() {
        let err = "S.?\nG..".parse::<Scenario>().unwrap_err();
        assert_eq!(err.to_string(), "unknown tile '?' at (0, 2)");
    }

    #[test]
    fn reference_scenarios_chain_goals_to_starts() {
        let scenarios = reference_scenarios();
        assert_eq!(scenarios.len(), 6);
        for (prev, next) in scenarios.iter().zip(scenarios.iter().skip(1)) {
            assert_eq!(prev.goal, next.start);
        }
        assert_eq!(scenarios[5].name, "subproblem 5");
    }
}
