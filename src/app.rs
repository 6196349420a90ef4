use crate::action_log::{Action, ActionLog};
use crate::config::Config;
use crate::error::Result;
use crate::grid::Grid;
use crate::layout::BoardLayout;
use crate::save_state::SaveState;
use crate::search::{SearchState, StepOutcome};
use std::path::Path;
use tracing::{debug, info, warn};

/// Edge-triggered input gathered by the frame driver before `update`
#[derive(Debug, Clone, Copy, Default)]
pub struct InputFrame {
    pub toggle_placement: bool,
    pub clear: bool,
    /// Edit the cell under `pointer`
    pub edit: bool,
    pub save_layout: bool,
    pub load_layout: bool,
    /// Pointer position in window pixels
    pub pointer: (f32, f32),
}

/// Frame-driven controller around the board
pub struct App {
    pub config: Config,
    grid: Grid,
    action_log: ActionLog,
}

impl App {
    pub fn new(config: Config) -> Self {
        let grid = Grid::new(config.grid.size);
        if grid.size() != config.grid.size {
            warn!(requested = config.grid.size, used = grid.size(), "grid size clamped to supported range");
        }
        App {
            config,
            grid,
            action_log: ActionLog::new(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn action_log(&self) -> &ActionLog {
        &self.action_log
    }

    /// Apply this frame's input events. Illegal edits are silently dropped.
    pub fn handle_input(&mut self, input: &InputFrame, layout: &BoardLayout) {
        if input.toggle_placement {
            let placement = self.grid.toggle_placement();
            self.action_log.log(Action::TogglePlacement { placement });
        }

        if input.clear && self.grid.clear() {
            info!("board cleared");
            self.action_log.log(Action::ClearBoard);
        }

        if input.edit {
            self.edit_at(input.pointer, layout);
        }

        if input.save_layout {
            if let Err(e) = self.save_layout() {
                warn!(error = %e, "failed to save layout");
            }
        }

        if input.load_layout {
            if let Err(e) = self.load_layout() {
                warn!(error = %e, "failed to load layout");
            }
        }
    }

    fn edit_at(&mut self, pointer: (f32, f32), layout: &BoardLayout) {
        let Some(coord) = layout.editable_cell_at(pointer.0, pointer.1) else {
            debug!(x = pointer.0, y = pointer.1, "click outside editable cells");
            return;
        };
        let was_blocked = self.grid.is_blocked(coord);
        if self.grid.toggle_cell(coord) {
            let action = if was_blocked {
                Action::SetEmpty { x: coord.x, y: coord.y }
            } else {
                Action::SetBlocked { x: coord.x, y: coord.y }
            };
            self.action_log.log(action);
        }
    }

    /// One frame tick: a single expansion while searching, nothing otherwise
    pub fn update(&mut self) {
        if self.grid.state() != SearchState::Searching {
            return;
        }

        match self.grid.step() {
            StepOutcome::PathFound => {
                let cost = self.grid.path_cost().unwrap_or(0);
                self.action_log.log(Action::PathFound { steps: self.grid.steps(), cost });
            }
            StepOutcome::Unreachable => {
                self.action_log.log(Action::Unreachable { steps: self.grid.steps() });
            }
            StepOutcome::Idle | StepOutcome::Expanded(_) => {}
        }
    }

    /// Current board as text, for the clipboard
    pub fn copy_layout_text(&mut self) -> String {
        self.action_log.log(Action::CopyLayout);
        self.grid.to_layout_text()
    }

    /// Replace the layout from text. Ignored outside placement mode.
    pub fn paste_layout_text(&mut self, text: &str) -> Result<bool> {
        if !self.grid.is_placement() {
            debug!("paste ignored outside placement mode");
            return Ok(false);
        }
        self.grid.apply_layout_text(text)?;
        self.action_log.log(Action::PasteLayout { size: self.grid.size() });
        Ok(true)
    }

    pub fn save_layout(&mut self) -> Result<()> {
        let path = self.config.files.layout_path.clone();
        SaveState::from_grid(&self.grid).save_to_file(Path::new(&path))?;
        info!(path = %path, "layout saved");
        self.action_log.log(Action::SaveLayout);
        Ok(())
    }

    /// Load the saved layout. Ignored outside placement mode.
    pub fn load_layout(&mut self) -> Result<bool> {
        if !self.grid.is_placement() {
            debug!("load ignored outside placement mode");
            return Ok(false);
        }
        let path = self.config.files.layout_path.clone();
        let state = SaveState::load_from_file(Path::new(&path))?;
        state.restore_into(&mut self.grid)?;
        self.action_log.log(Action::LoadLayout { size: state.grid_size });
        Ok(true)
    }

    /// Write the action log if enabled. Called once on exit.
    pub fn finish(&self) {
        info!("{}", self.action_log.summary().replace('\n', "; "));
        if !self.config.logging.enable_action_log {
            return;
        }
        let path = &self.config.logging.action_log_path;
        match self.action_log.save_to_file(Path::new(path)) {
            Ok(()) => info!(path = %path, "action log saved"),
            Err(e) => warn!(path = %path, error = %e, "failed to save action log"),
        }
    }
}
