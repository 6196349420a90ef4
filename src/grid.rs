use crate::cell::{Cell, CellTag, Coord, Membership};
use crate::error::{AstarError, Result};
use crate::frontier::Frontier;
use crate::search::SearchStatus;
use tracing::{debug, info};

/// Smallest board that still has distinct start and goal cells
pub const MIN_SIZE: i32 = 2;

/// Largest board accepted; keeps cell counts well inside `i32` and memory sane
pub const MAX_SIZE: i32 = 256;

/// What the renderer gets for each cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellView {
    pub coord: Coord,
    pub membership: Membership,
    pub tag: CellTag,
}

/// Number of cells in each of the four sets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MembershipCounts {
    pub empty: usize,
    pub blocked: usize,
    pub open: usize,
    pub closed: usize,
}

impl MembershipCounts {
    pub fn total(&self) -> usize {
        self.empty + self.blocked + self.open + self.closed
    }
}

/// Square board holding every cell in a single store keyed by coordinate.
/// The start is always (0, 0) and the goal (size-1, size-1).
#[derive(Debug, Clone)]
pub struct Grid {
    pub(crate) size: i32,
    pub(crate) cells: Vec<Cell>,
    pub(crate) frontier: Frontier<Coord>,
    pub(crate) placement: bool,
    pub(crate) status: SearchStatus,
    pub(crate) steps: usize,
    /// Revision number - incremented whenever the blocked layout changes
    revision: u64,
}

/// Row-major index of an in-range coordinate
pub(crate) fn cell_index(size: i32, coord: Coord) -> usize {
    coord.x as usize + coord.y as usize * size as usize
}

/// Ranking closure for the frontier, reading live costs from the store
pub(crate) fn rank_by_f_cost(cells: &[Cell], size: i32) -> impl Fn(&Coord) -> u32 + '_ {
    move |coord: &Coord| cells[cell_index(size, *coord)].f_cost()
}

impl Grid {
    /// Create a fresh board in placement mode.
    /// Sizes outside [`MIN_SIZE`]..=[`MAX_SIZE`] are clamped into range.
    pub fn new(size: i32) -> Self {
        let mut grid = Grid {
            size: size.clamp(MIN_SIZE, MAX_SIZE),
            cells: Vec::new(),
            frontier: Frontier::new(),
            placement: true,
            status: SearchStatus::InProgress,
            steps: 0,
            revision: 0,
        };
        grid.reset();
        grid
    }

    /// Like [`Grid::new`] but rejects out-of-range sizes
    pub fn try_new(size: i32) -> Result<Self> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
            return Err(AstarError::InvalidSize(size));
        }
        Ok(Self::new(size))
    }

    /// Create a board with specific blocked cells. Checkpoints and
    /// out-of-range coordinates are skipped.
    pub fn with_blocked(size: i32, blocked: &[Coord]) -> Self {
        let mut grid = Self::new(size);
        for &coord in blocked {
            grid.set_blocked(coord);
        }
        grid
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn start(&self) -> Coord {
        Coord::new(0, 0)
    }

    pub fn goal(&self) -> Coord {
        Coord::new(self.size - 1, self.size - 1)
    }

    pub fn is_checkpoint(&self, coord: Coord) -> bool {
        coord == self.start() || coord == self.goal()
    }

    pub fn contains(&self, coord: Coord) -> bool {
        coord.x >= 0 && coord.x < self.size && coord.y >= 0 && coord.y < self.size
    }

    pub fn cell(&self, coord: Coord) -> Option<&Cell> {
        if !self.contains(coord) {
            return None;
        }
        self.cells.get(cell_index(self.size, coord))
    }

    pub(crate) fn cell_mut(&mut self, coord: Coord) -> Option<&mut Cell> {
        if !self.contains(coord) {
            return None;
        }
        let index = cell_index(self.size, coord);
        self.cells.get_mut(index)
    }

    /// Out-of-range coordinates report `None`
    pub fn membership(&self, coord: Coord) -> Option<Membership> {
        self.cell(coord).map(|c| c.membership)
    }

    pub fn is_blocked(&self, coord: Coord) -> bool {
        self.membership(coord) == Some(Membership::Blocked)
    }

    pub fn is_placement(&self) -> bool {
        self.placement
    }

    /// Number of expansions performed since the last reset
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Get current layout revision number
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Coordinates currently on the frontier (copy)
    pub fn open_coords(&self) -> Vec<Coord> {
        self.frontier.snapshot()
    }

    /// Rebuild the initial partition: everything Empty except the start,
    /// which is seeded onto the frontier. Returns to placement mode.
    pub fn reset(&mut self) {
        let size = self.size;
        let start = self.start();
        let goal = self.goal();

        self.cells.clear();
        self.cells.reserve(size as usize * size as usize);
        for y in 0..size {
            for x in 0..size {
                let coord = Coord::new(x, y);
                let tag = if coord == start || coord == goal {
                    CellTag::Checkpoint
                } else {
                    CellTag::Empty
                };
                self.cells.push(Cell::new(coord, tag));
            }
        }

        self.frontier.clear();
        let start_index = cell_index(size, start);
        {
            let cell = &mut self.cells[start_index];
            cell.g_cost = Some(0);
            cell.h_cost = start.distance(&goal);
            cell.membership = Membership::Open;
        }
        let cells = &self.cells;
        self.frontier.push(start, rank_by_f_cost(cells, size));

        self.placement = true;
        self.status = SearchStatus::InProgress;
        self.steps = 0;
        self.revision += 1;
        debug!(size, "board reset");
    }

    /// Flip placement mode. Returns the new value.
    pub fn toggle_placement(&mut self) -> bool {
        self.placement = !self.placement;
        info!(placement = self.placement, steps = self.steps, "placement mode toggled");
        self.placement
    }

    /// Reset the board, only honoured in placement mode
    pub fn clear(&mut self) -> bool {
        if !self.placement {
            debug!("clear ignored outside placement mode");
            return false;
        }
        self.reset();
        true
    }

    /// Move an Empty cell into the Blocked set. Ignored outside placement
    /// mode, for checkpoints, for cells the search already touched, and once
    /// the search has finished (clear first).
    pub fn set_blocked(&mut self, coord: Coord) -> bool {
        self.edit(coord, Membership::Empty, Membership::Blocked, CellTag::Blocked)
    }

    /// Move a Blocked cell back into the Empty set
    pub fn set_empty(&mut self, coord: Coord) -> bool {
        self.edit(coord, Membership::Blocked, Membership::Empty, CellTag::Empty)
    }

    /// Interactive edit: block an empty cell or clear a blocked one
    pub fn toggle_cell(&mut self, coord: Coord) -> bool {
        match self.membership(coord) {
            Some(Membership::Empty) => self.set_blocked(coord),
            Some(Membership::Blocked) => self.set_empty(coord),
            _ => false,
        }
    }

    fn edit(&mut self, coord: Coord, from: Membership, to: Membership, tag: CellTag) -> bool {
        if !self.placement || self.status != SearchStatus::InProgress || self.is_checkpoint(coord) {
            debug!(%coord, placement = self.placement, status = ?self.status, "edit ignored");
            return false;
        }
        let Some(cell) = self.cell_mut(coord) else {
            return false;
        };
        if cell.membership != from {
            return false;
        }
        cell.membership = to;
        cell.tag = tag;
        cell.forget();
        self.revision += 1;
        true
    }

    /// Lazy pass over every cell in row-major order. Call again for a new pass.
    pub fn cells(&self) -> impl Iterator<Item = CellView> + '_ {
        self.cells.iter().map(|cell| CellView {
            coord: cell.coord,
            membership: cell.membership,
            tag: cell.tag,
        })
    }

    pub fn membership_counts(&self) -> MembershipCounts {
        let mut counts = MembershipCounts::default();
        for cell in &self.cells {
            match cell.membership {
                Membership::Empty => counts.empty += 1,
                Membership::Blocked => counts.blocked += 1,
                Membership::Open => counts.open += 1,
                Membership::Closed => counts.closed += 1,
            }
        }
        counts
    }

    /// Blocked coordinates in row-major order
    pub fn blocked_coords(&self) -> Vec<Coord> {
        self.cells
            .iter()
            .filter(|c| c.membership == Membership::Blocked)
            .map(|c| c.coord)
            .collect()
    }

    /// Reset, then block every listed coordinate
    pub fn load_blocked(&mut self, blocked: &[Coord]) {
        self.reset();
        for &coord in blocked {
            self.set_blocked(coord);
        }
        info!(blocked = self.membership_counts().blocked, "layout loaded");
    }

    /// Render the board as text, one row per line.
    ///
    /// `S` start, `G` goal, `#` blocked, `.` empty, `o` open, `x` closed,
    /// `*` path. Checkpoints keep their letter whatever their state.
    pub fn to_layout_text(&self) -> String {
        let mut result = String::with_capacity(((self.size + 1) * self.size) as usize);
        for y in 0..self.size {
            for x in 0..self.size {
                let coord = Coord::new(x, y);
                let cell = &self.cells[cell_index(self.size, coord)];
                let symbol = if coord == self.start() {
                    'S'
                } else if coord == self.goal() {
                    'G'
                } else {
                    match (cell.tag, cell.membership) {
                        (CellTag::Path, _) => '*',
                        (_, Membership::Blocked) => '#',
                        (_, Membership::Open) => 'o',
                        (_, Membership::Closed) => 'x',
                        (_, Membership::Empty) => '.',
                    }
                };
                result.push(symbol);
            }
            result.push('\n');
        }
        result
    }

    /// Parse a layout produced by [`Grid::to_layout_text`] or typed by hand.
    /// Only `#` marks a blocked cell; search markers are read as empty.
    pub fn from_layout_text(text: &str) -> Result<Self> {
        let blocked = parse_layout(text)?;
        let mut grid = Self::try_new(blocked.size)?;
        grid.load_blocked(&blocked.coords);
        Ok(grid)
    }

    /// Replace the current layout with a parsed one of the same size
    pub fn apply_layout_text(&mut self, text: &str) -> Result<()> {
        let layout = parse_layout(text)?;
        if layout.size != self.size {
            return Err(AstarError::SizeMismatch {
                expected: self.size,
                found: layout.size,
            });
        }
        self.load_blocked(&layout.coords);
        Ok(())
    }
}

struct ParsedLayout {
    size: i32,
    coords: Vec<Coord>,
}

fn parse_layout(text: &str) -> Result<ParsedLayout> {
    let rows: Vec<(usize, &str)> = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim_end()))
        .filter(|(_, line)| !line.is_empty())
        .collect();

    let size = i32::try_from(rows.len()).unwrap_or(i32::MAX);
    if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
        return Err(AstarError::InvalidSize(size));
    }

    let mut coords = Vec::new();
    for (y, (line_no, line)) in rows.iter().enumerate() {
        let width = line.chars().count() as i32;
        if width != size {
            return Err(AstarError::Layout {
                line: *line_no,
                message: format!("expected {} cells, found {}", size, width),
            });
        }
        for (x, ch) in line.chars().enumerate() {
            match ch {
                '#' => coords.push(Coord::new(x as i32, y as i32)),
                '.' | 'S' | 'G' | 'o' | 'x' | '*' => {}
                other => {
                    return Err(AstarError::Layout {
                        line: *line_no,
                        message: format!("unexpected character '{}'", other),
                    })
                }
            }
        }
    }

    Ok(ParsedLayout { size, coords })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_partition() {
        let grid = Grid::new(10);
        let counts = grid.membership_counts();
        assert_eq!(counts.total(), 100);
        assert_eq!(counts.open, 1);
        assert_eq!(counts.empty, 99);
        assert_eq!(counts.blocked, 0);
        assert_eq!(counts.closed, 0);

        let start = grid.cell(grid.start()).unwrap();
        assert_eq!(start.membership, Membership::Open);
        assert_eq!(start.tag, CellTag::Checkpoint);
        assert_eq!(start.g_cost, Some(0));
        assert_eq!(start.h_cost, 126);

        let goal = grid.cell(grid.goal()).unwrap();
        assert_eq!(goal.membership, Membership::Empty);
        assert_eq!(goal.tag, CellTag::Checkpoint);
        assert!(grid.is_placement());
    }

    #[test]
    fn test_try_new_rejects_small_boards() {
        assert!(matches!(Grid::try_new(1), Err(AstarError::InvalidSize(1))));
        assert!(Grid::try_new(2).is_ok());
        assert_eq!(Grid::new(0).size(), MIN_SIZE);
    }

    #[test]
    fn test_huge_sizes_are_capped() {
        assert!(matches!(Grid::try_new(50_000), Err(AstarError::InvalidSize(50_000))));
        assert!(Grid::try_new(MAX_SIZE).is_ok());

        let grid = Grid::new(50_000);
        assert_eq!(grid.size(), MAX_SIZE);
        assert_eq!(grid.membership_counts().total(), (MAX_SIZE * MAX_SIZE) as usize);
        assert_eq!(grid.goal(), Coord::new(MAX_SIZE - 1, MAX_SIZE - 1));

        let rows = vec![".".repeat(300); 300].join("\n");
        assert!(matches!(Grid::from_layout_text(&rows), Err(AstarError::InvalidSize(300))));
    }

    #[test]
    fn test_toggle_cell() {
        let mut grid = Grid::new(5);
        let c = Coord::new(2, 3);
        let rev = grid.revision();

        assert!(grid.toggle_cell(c));
        assert!(grid.is_blocked(c));
        assert_eq!(grid.cell(c).unwrap().tag, CellTag::Blocked);
        assert!(grid.revision() > rev);

        assert!(grid.toggle_cell(c));
        assert!(!grid.is_blocked(c));
        assert_eq!(grid.cell(c).unwrap().tag, CellTag::Empty);
    }

    #[test]
    fn test_checkpoints_cannot_be_blocked() {
        let mut grid = Grid::new(5);
        assert!(!grid.set_blocked(grid.start()));
        assert!(!grid.set_blocked(grid.goal()));
        assert!(!grid.toggle_cell(grid.goal()));
        assert_eq!(grid.membership_counts().blocked, 0);
    }

    #[test]
    fn test_edits_ignored_outside_placement() {
        let mut grid = Grid::new(5);
        grid.toggle_placement();
        assert!(!grid.set_blocked(Coord::new(1, 1)));
        assert!(!grid.is_blocked(Coord::new(1, 1)));
        assert!(!grid.clear());
    }

    #[test]
    fn test_edits_locked_after_search_finishes() {
        let mut grid = Grid::new(5);
        crate::search::solve(&mut grid, 100);
        assert!(!grid.is_placement());

        // Back in placement the finished board stays frozen until cleared
        grid.toggle_placement();
        let before: Vec<CellView> = grid.cells().collect();
        assert_eq!(grid.membership(Coord::new(3, 0)), Some(Membership::Empty));
        assert!(!grid.set_blocked(Coord::new(3, 0)));
        assert!(!grid.toggle_cell(Coord::new(0, 4)));
        assert_eq!(grid.cells().collect::<Vec<_>>(), before);

        assert!(grid.clear());
        assert!(grid.set_blocked(Coord::new(3, 0)));
    }

    #[test]
    fn test_out_of_range_edit_is_noop() {
        let mut grid = Grid::new(5);
        assert!(!grid.set_blocked(Coord::new(-1, 2)));
        assert!(!grid.set_blocked(Coord::new(5, 0)));
        assert_eq!(grid.membership(Coord::new(5, 0)), None);
    }

    #[test]
    fn test_cells_iterator_is_restartable() {
        let grid = Grid::with_blocked(4, &[Coord::new(1, 2)]);
        let first: Vec<CellView> = grid.cells().collect();
        let second: Vec<CellView> = grid.cells().collect();
        assert_eq!(first.len(), 16);
        assert_eq!(first, second);
        assert_eq!(first.iter().filter(|v| v.tag == CellTag::Blocked).count(), 1);
    }

    #[test]
    fn test_layout_text() {
        let grid = Grid::with_blocked(4, &[Coord::new(1, 0), Coord::new(2, 2)]);
        let text = grid.to_layout_text();
        assert_eq!(text, "S#..\n....\n..#.\n...G\n");

        let parsed = Grid::from_layout_text(&text).unwrap();
        assert_eq!(parsed.blocked_coords(), grid.blocked_coords());
    }

    #[test]
    fn test_layout_text_errors() {
        assert!(matches!(
            Grid::from_layout_text("S..\n...\n..\n"),
            Err(AstarError::Layout { line: 3, .. })
        ));
        assert!(matches!(
            Grid::from_layout_text("S?\n.G\n"),
            Err(AstarError::Layout { line: 1, .. })
        ));
        assert!(matches!(Grid::from_layout_text("S\n"), Err(AstarError::InvalidSize(1))));

        let mut grid = Grid::new(4);
        assert!(matches!(
            grid.apply_layout_text("S.\n.G\n"),
            Err(AstarError::SizeMismatch { expected: 4, found: 2 })
        ));
    }

    #[test]
    fn test_layout_ignores_blocked_checkpoints() {
        let grid = Grid::from_layout_text("##.\n...\n..#\n").unwrap();
        assert_eq!(grid.blocked_coords(), vec![Coord::new(1, 0)]);
    }
}
