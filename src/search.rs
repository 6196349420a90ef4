use crate::cell::{CellTag, Coord, Membership};
use crate::grid::{cell_index, rank_by_f_cost, Grid};
use crate::error::FrontierError;
use tracing::{debug, info, trace};

/// Terminal outcome of the search, independent of placement mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    InProgress,
    PathFound,
    /// The frontier ran dry before reaching the goal
    Unreachable,
}

/// Externally visible state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    /// Editing; stepping suppressed
    Placement,
    Searching,
    PathFound,
    Unreachable,
}

/// Result of a single call to [`Grid::step`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Nothing happened: placement mode or already finished
    Idle,
    /// A cell was closed and its neighbours relaxed
    Expanded(Coord),
    PathFound,
    Unreachable,
}

impl StepOutcome {
    pub fn is_terminal(&self) -> bool {
        matches!(self, StepOutcome::PathFound | StepOutcome::Unreachable)
    }
}

/// The eight directions around a cell
const NEIGHBOUR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

impl Grid {
    pub fn status(&self) -> SearchStatus {
        self.status
    }

    pub fn state(&self) -> SearchState {
        match self.status {
            SearchStatus::PathFound => SearchState::PathFound,
            SearchStatus::Unreachable => SearchState::Unreachable,
            SearchStatus::InProgress if self.placement => SearchState::Placement,
            SearchStatus::InProgress => SearchState::Searching,
        }
    }

    /// Perform one A* expansion.
    ///
    /// Pops the cheapest frontier cell, closes it, and either finishes (goal
    /// reached) or discovers/relaxes its open and empty neighbours.
    pub fn step(&mut self) -> StepOutcome {
        if self.placement || self.status != SearchStatus::InProgress {
            return StepOutcome::Idle;
        }

        let size = self.size;
        let popped = {
            let cells = &self.cells;
            self.frontier.pop(rank_by_f_cost(cells, size))
        };
        let current = match popped {
            Ok(coord) => coord,
            Err(FrontierError::Empty) => {
                self.status = SearchStatus::Unreachable;
                info!(steps = self.steps, "frontier exhausted, goal unreachable");
                return StepOutcome::Unreachable;
            }
        };

        self.steps += 1;
        let current_g = {
            let cell = &mut self.cells[cell_index(size, current)];
            cell.membership = Membership::Closed;
            cell.tag = CellTag::Closed;
            cell.g_cost.unwrap_or(0)
        };
        trace!(%current, g = current_g, step = self.steps, "expanding");

        let goal = self.goal();
        if current == goal {
            self.status = SearchStatus::PathFound;
            self.mark_path();
            info!(steps = self.steps, cost = current_g, "path found");
            return StepOutcome::PathFound;
        }

        for neighbour in self.neighbours(current) {
            let tentative = current_g + current.distance(&neighbour);
            let index = cell_index(size, neighbour);
            let cell = &mut self.cells[index];

            if !cell.is_discovered() {
                cell.g_cost = Some(tentative);
                cell.h_cost = neighbour.distance(&goal);
                cell.parent = Some(current);
                cell.membership = Membership::Open;
                cell.tag = CellTag::Open;
                trace!(%neighbour, g = tentative, h = cell.h_cost, "discovered");

                let cells = &self.cells;
                self.frontier.push(neighbour, rank_by_f_cost(cells, size));
            } else if tentative + cell.h_cost < cell.f_cost() {
                // Heap position is left alone; the next pop reads the new cost
                trace!(%neighbour, old = cell.f_cost(), new = tentative + cell.h_cost, "relaxed");
                cell.g_cost = Some(tentative);
                cell.parent = Some(current);
            }
        }

        StepOutcome::Expanded(current)
    }

    /// In-range neighbours still eligible for discovery or relaxation
    fn neighbours(&self, coord: Coord) -> Vec<Coord> {
        NEIGHBOUR_OFFSETS
            .iter()
            .map(|&(dx, dy)| coord.offset(dx, dy))
            .filter(|&n| {
                matches!(
                    self.membership(n),
                    Some(Membership::Open) | Some(Membership::Empty)
                )
            })
            .collect()
    }

    /// Tag every cell on the parent chain from the goal back to the start
    fn mark_path(&mut self) {
        for coord in self.walk_parents(self.goal()) {
            let index = cell_index(self.size, coord);
            self.cells[index].tag = CellTag::Path;
        }
    }

    /// Goal-to-start chain. Bounded by the cell count so a corrupt parent
    /// link can never loop forever.
    fn walk_parents(&self, from: Coord) -> Vec<Coord> {
        let mut chain = Vec::new();
        let mut next = Some(from);
        while let Some(coord) = next {
            if chain.len() >= self.cells.len() {
                break;
            }
            chain.push(coord);
            next = self.cell(coord).and_then(|c| c.parent);
        }
        chain
    }

    /// Reconstructed path from start to goal, empty until one is found
    pub fn path(&self) -> Vec<Coord> {
        if self.status != SearchStatus::PathFound {
            return Vec::new();
        }
        let mut path = self.walk_parents(self.goal());
        path.reverse();
        path
    }

    /// Cost of the found path
    pub fn path_cost(&self) -> Option<u32> {
        if self.status != SearchStatus::PathFound {
            return None;
        }
        self.cell(self.goal()).and_then(|c| c.g_cost)
    }
}

/// Leave placement mode and step until the search finishes or `max_steps`
/// expansions have run. Returns the final state.
pub fn solve(grid: &mut Grid, max_steps: usize) -> SearchState {
    if grid.is_placement() {
        grid.toggle_placement();
    }
    for _ in 0..max_steps {
        if grid.step().is_terminal() {
            break;
        }
    }
    debug!(steps = grid.steps(), state = ?grid.state(), "solve finished");
    grid.state()
}

/// Format path for display
pub fn format_path(path: &[Coord]) -> String {
    if path.is_empty() {
        return "No path".to_string();
    }

    path.iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}
