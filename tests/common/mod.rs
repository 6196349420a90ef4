#![allow(dead_code)]

use astar_grid::{Coord, Grid, Membership, SearchState, StepOutcome};
use std::collections::HashSet;

/// Parse a hand-drawn layout ('#' walls, anything else free)
pub fn board(rows: &[&str]) -> Grid {
    let text = rows.join("\n");
    Grid::from_layout_text(&text).expect("test layout should parse")
}

/// Assert the four sets cover every coordinate exactly once
pub fn assert_partition(grid: &Grid) {
    let size = grid.size();
    let mut seen = HashSet::new();
    for view in grid.cells() {
        assert!(grid.contains(view.coord), "cell {} out of range", view.coord);
        assert!(seen.insert(view.coord), "cell {} reported twice", view.coord);
    }
    assert_eq!(seen.len(), (size * size) as usize);

    let counts = grid.membership_counts();
    assert_eq!(counts.total(), (size * size) as usize);

    let open: HashSet<Coord> = grid.open_coords().into_iter().collect();
    let open_cells: HashSet<Coord> = grid
        .cells()
        .filter(|v| v.membership == Membership::Open)
        .map(|v| v.coord)
        .collect();
    assert_eq!(open, open_cells, "frontier out of sync with Open cells");

    assert!(!grid.is_blocked(grid.start()));
    assert!(!grid.is_blocked(grid.goal()));
}

/// Step until terminal, checking the partition after every step
pub fn run_checked(grid: &mut Grid) -> SearchState {
    if grid.is_placement() {
        grid.toggle_placement();
    }
    let limit = (grid.size() * grid.size()) as usize + 2;
    for _ in 0..limit {
        let outcome = grid.step();
        assert_partition(grid);
        if outcome.is_terminal() {
            break;
        }
        assert_ne!(outcome, StepOutcome::Idle, "search stalled");
    }
    grid.state()
}

/// Exact shortest path cost by exhaustive relaxation, for comparison
pub fn reference_cost(grid: &Grid) -> Option<u32> {
    let size = grid.size();
    let n = (size * size) as usize;
    let idx = |c: Coord| (c.x + c.y * size) as usize;
    let mut best = vec![u32::MAX; n];
    best[idx(grid.start())] = 0;

    let mut changed = true;
    while changed {
        changed = false;
        for y in 0..size {
            for x in 0..size {
                let c = Coord::new(x, y);
                if grid.is_blocked(c) || best[idx(c)] == u32::MAX {
                    continue;
                }
                for dy in -1..=1 {
                    for dx in -1..=1 {
                        let n = c.offset(dx, dy);
                        if (dx == 0 && dy == 0) || !grid.contains(n) || grid.is_blocked(n) {
                            continue;
                        }
                        let cost = best[idx(c)] + c.distance(&n);
                        if cost < best[idx(n)] {
                            best[idx(n)] = cost;
                            changed = true;
                        }
                    }
                }
            }
        }
    }

    let goal = best[idx(grid.goal())];
    if goal == u32::MAX {
        None
    } else {
        Some(goal)
    }
}
