use grid_astar::{reference_scenarios, Cell, Observer, Scenario, SearchOutcome, Visit, VisitKind};
use std::collections::HashMap;
use std::env;
use std::thread;
use std::time::Duration;

// Replays the six reference subproblems in the terminal, drawing the grid after every visit.
// The optional first argument is the delay between frames in milliseconds.
//
//   cargo run --example reference_scenarios -- 100
//
// Legend: S start, G goal, # obstacle, o open, x closed, * path

struct Renderer<'a> {
    scenario: &'a Scenario,
    marks: HashMap<Cell, char>,
    delay: Duration,
}

impl<'a> Renderer<'a> {
    fn new(scenario: &'a Scenario, delay: Duration) -> Renderer<'a> {
        Renderer {
            scenario,
            marks: HashMap::new(),
            delay,
        }
    }

    fn draw(&self) {
        for cell in self.scenario.grid.cells() {
            let tile = if cell == self.scenario.start {
                'S'
            } else if cell == self.scenario.goal {
                'G'
            } else if self.scenario.grid.is_blocked(&cell) {
                '#'
            } else {
                self.marks.get(&cell).copied().unwrap_or('.')
            };
            print!("{}", tile);
            if cell.col as usize == self.scenario.grid.cols() - 1 {
                println!();
            }
        }
        println!();
    }
}

impl Observer for Renderer<'_> {
    fn on_visit(&mut self, visit: &Visit) {
        let mark = match visit.kind {
            VisitKind::Opened => 'o',
            VisitKind::Closed => 'x',
            VisitKind::Path => '*',
        };
        self.marks.insert(visit.cell, mark);
        println!(
            "{:?} {}: f = {} = g {} + h {}",
            visit.kind,
            visit.cell,
            visit.scores.f,
            visit.scores.g,
            visit.scores.h()
        );
        self.draw();
        thread::sleep(self.delay);
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    let delay = env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .map(Duration::from_millis)
        .unwrap_or(Duration::from_millis(200));

    for scenario in reference_scenarios() {
        println!("** {}: {} -> {}", scenario.name, scenario.start, scenario.goal);
        let mut renderer = Renderer::new(&scenario, delay);
        renderer.draw();
        match scenario.run(&mut renderer) {
            SearchOutcome::Found { path } => {
                let route = path.iter().map(|c| c.to_string()).collect::<Vec<_>>();
                println!("Path: {}\n", route.join(" -> "));
            }
            SearchOutcome::NotFound => println!("No path\n"),
            SearchOutcome::Cancelled => println!("Cancelled\n"),
        }
    }
}
