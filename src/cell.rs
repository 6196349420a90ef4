use serde::{Deserialize, Serialize};

/// Cost of an orthogonal step
pub const STRAIGHT_COST: u32 = 10;
/// Cost of a diagonal step (10 * sqrt(2), rounded)
pub const DIAGONAL_COST: u32 = 14;

/// A position on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub fn new(x: i32, y: i32) -> Self {
        Coord { x, y }
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Coord {
        Coord::new(self.x + dx, self.y + dy)
    }

    /// Octile distance scaled by 10/14 so everything stays integral.
    /// An orthogonal neighbour is 10 away, a diagonal neighbour 14.
    pub fn distance(&self, other: &Coord) -> u32 {
        let dx = (self.x - other.x).unsigned_abs();
        let dy = (self.y - other.y).unsigned_abs();
        let dmin = dx.min(dy);
        let dmax = dx.max(dy);
        DIAGONAL_COST * dmin + STRAIGHT_COST * (dmax - dmin)
    }

    /// Chebyshev distance 1, excluding the coordinate itself
    pub fn is_adjacent(&self, other: &Coord) -> bool {
        self != other && (self.x - other.x).abs() <= 1 && (self.y - other.y).abs() <= 1
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Which of the four disjoint sets a cell currently belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Membership {
    Empty,
    Blocked,
    /// On the search frontier
    Open,
    /// Expanded, cost from start is final
    Closed,
}

/// Display classification, drives the renderer's palette only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellTag {
    Empty,
    Blocked,
    Checkpoint,
    Open,
    Closed,
    Path,
}

/// A single grid cell with its search bookkeeping
#[derive(Debug, Clone)]
pub struct Cell {
    pub coord: Coord,
    /// Best known cost from the start; `None` until first discovered
    pub g_cost: Option<u32>,
    /// Heuristic estimate to the goal, valid once `g_cost` is set
    pub h_cost: u32,
    /// Predecessor on the best known path
    pub parent: Option<Coord>,
    pub membership: Membership,
    pub tag: CellTag,
}

impl Cell {
    pub fn new(coord: Coord, tag: CellTag) -> Self {
        Cell {
            coord,
            g_cost: None,
            h_cost: 0,
            parent: None,
            membership: Membership::Empty,
            tag,
        }
    }

    pub fn is_discovered(&self) -> bool {
        self.g_cost.is_some()
    }

    /// Total estimated cost through this cell. Undiscovered cells rank last.
    pub fn f_cost(&self) -> u32 {
        match self.g_cost {
            Some(g) => g + self.h_cost,
            None => u32::MAX,
        }
    }

    /// Forget any search state, keeping position and membership
    pub fn forget(&mut self) {
        self.g_cost = None;
        self.h_cost = 0;
        self.parent = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_straight_and_diagonal() {
        let origin = Coord::new(3, 3);
        assert_eq!(origin.distance(&Coord::new(4, 3)), 10);
        assert_eq!(origin.distance(&Coord::new(3, 2)), 10);
        assert_eq!(origin.distance(&Coord::new(4, 4)), 14);
        assert_eq!(origin.distance(&Coord::new(2, 4)), 14);
        assert_eq!(origin.distance(&origin), 0);
    }

    #[test]
    fn test_distance_corner_to_corner() {
        let start = Coord::new(0, 0);
        let goal = Coord::new(9, 9);
        assert_eq!(start.distance(&goal), 126);
        assert_eq!(goal.distance(&start), 126);
    }

    #[test]
    fn test_distance_mixed() {
        // 2 diagonal steps then 3 straight
        assert_eq!(Coord::new(0, 0).distance(&Coord::new(5, 2)), 2 * 14 + 3 * 10);
        assert_eq!(Coord::new(5, 2).distance(&Coord::new(0, 0)), 58);
    }

    #[test]
    fn test_adjacency() {
        let c = Coord::new(1, 1);
        assert!(c.is_adjacent(&Coord::new(0, 0)));
        assert!(c.is_adjacent(&Coord::new(2, 1)));
        assert!(!c.is_adjacent(&c));
        assert!(!c.is_adjacent(&Coord::new(3, 1)));
    }

    #[test]
    fn test_undiscovered_cell_ranks_last() {
        let mut cell = Cell::new(Coord::new(2, 2), CellTag::Empty);
        assert!(!cell.is_discovered());
        assert_eq!(cell.f_cost(), u32::MAX);

        cell.g_cost = Some(20);
        cell.h_cost = 70;
        assert_eq!(cell.f_cost(), 90);

        cell.forget();
        assert_eq!(cell.g_cost, None);
        assert_eq!(cell.parent, None);
    }
}
