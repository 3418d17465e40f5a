use grid_astar::{search, CancelToken, Cancellable, Cell, Grid, SearchOutcome, Visit, VisitKind};
use std::thread;
use std::time::Duration;

// A slow observer paces the search on a large empty grid while another thread plays the part
// of a user pressing quit: it cancels the search after half a second.

fn main() {
    env_logger::init();
    let grid = Grid::new(64, 64);
    let token = CancelToken::new();

    let quit = token.clone();
    let quitter = thread::spawn(move || {
        thread::sleep(Duration::from_millis(500));
        quit.cancel();
    });

    let mut closed = 0;
    let mut observer = Cancellable::new(
        |visit: &Visit| {
            if visit.kind == VisitKind::Closed {
                closed += 1;
            }
            thread::sleep(Duration::from_millis(5));
        },
        token,
    );
    let outcome = search(&grid, Cell::new(0, 0), Cell::new(63, 63), &mut observer);
    drop(observer);
    quitter.join().unwrap();

    match outcome {
        SearchOutcome::Cancelled => println!("Cancelled after closing {} cells", closed),
        other => println!("Finished before the quit signal: {:?}", other),
    }
}
