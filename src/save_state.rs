use crate::cell::Coord;
use crate::error::{AstarError, Result};
use crate::grid::Grid;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Saved board layout: size and blocked cells only, never search progress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveState {
    /// Layout revision at the time of saving
    pub grid_revision: u64,
    pub grid_size: i32,
    pub blocked_cells: Vec<Coord>,
}

impl SaveState {
    pub fn from_grid(grid: &Grid) -> Self {
        SaveState {
            grid_revision: grid.revision(),
            grid_size: grid.size(),
            blocked_cells: grid.blocked_coords(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Build a fresh board from the snapshot
    pub fn restore_grid(&self) -> Result<Grid> {
        let mut grid = Grid::try_new(self.grid_size)?;
        grid.load_blocked(&self.blocked_cells);
        Ok(grid)
    }

    /// Replace the layout of an existing board of the same size
    pub fn restore_into(&self, grid: &mut Grid) -> Result<()> {
        if self.grid_size != grid.size() {
            return Err(AstarError::SizeMismatch {
                expected: grid.size(),
                found: self.grid_size,
            });
        }
        grid.load_blocked(&self.blocked_cells);
        Ok(())
    }
}
