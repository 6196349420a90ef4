use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;

/// User actions and search milestones worth replaying later
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Placement mode switched; carries the new value
    TogglePlacement { placement: bool },
    ClearBoard,
    SetBlocked { x: i32, y: i32 },
    SetEmpty { x: i32, y: i32 },
    CopyLayout,
    PasteLayout { size: i32 },
    SaveLayout,
    LoadLayout { size: i32 },
    PathFound { steps: usize, cost: u32 },
    Unreachable { steps: usize },
}

/// Logged action with timestamp
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoggedAction {
    /// Milliseconds since start
    pub timestamp_ms: u64,
    pub action: Action,
}

/// Action logger
pub struct ActionLog {
    start_time: Instant,
    actions: Vec<LoggedAction>,
}

impl Default for ActionLog {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionLog {
    pub fn new() -> Self {
        ActionLog {
            start_time: Instant::now(),
            actions: Vec::new(),
        }
    }

    /// Log an action with current timestamp
    pub fn log(&mut self, action: Action) {
        let timestamp_ms = self.start_time.elapsed().as_millis() as u64;
        self.actions.push(LoggedAction {
            timestamp_ms,
            action,
        });
    }

    pub fn actions(&self) -> &[LoggedAction] {
        &self.actions
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Save log to JSON file
    pub fn save_to_file(&self, path: &Path) -> crate::error::Result<()> {
        let json = serde_json::to_string_pretty(&self.actions)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Get summary statistics
    pub fn summary(&self) -> String {
        let mut blocked_count = 0;
        let mut freed_count = 0;
        let mut clears = 0;
        let mut toggles = 0;
        let mut layout_ops = 0;
        let mut found = 0;
        let mut unreachable = 0;

        for logged in &self.actions {
            match &logged.action {
                Action::SetBlocked { .. } => blocked_count += 1,
                Action::SetEmpty { .. } => freed_count += 1,
                Action::ClearBoard => clears += 1,
                Action::TogglePlacement { .. } => toggles += 1,
                Action::CopyLayout
                | Action::PasteLayout { .. }
                | Action::SaveLayout
                | Action::LoadLayout { .. } => layout_ops += 1,
                Action::PathFound { .. } => found += 1,
                Action::Unreachable { .. } => unreachable += 1,
            }
        }

        let duration = self.actions.last().map(|a| a.timestamp_ms).unwrap_or(0);

        format!(
            "Session Duration: {}ms\n\
             Total Events: {}\n\
             Grid Modifications: {} blocked, {} freed, {} clears\n\
             Mode Toggles: {}, Layout Operations: {}\n\
             Searches: {} found, {} unreachable",
            duration,
            self.actions.len(),
            blocked_count,
            freed_count,
            clears,
            toggles,
            layout_ops,
            found,
            unreachable
        )
    }
}
