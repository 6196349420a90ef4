pub mod action_log;
pub mod app;
pub mod cell;
pub mod config;
pub mod error;
pub mod frontier;
pub mod grid;
pub mod layout;
pub mod save_state;
pub mod search;

pub use app::{App, InputFrame};
pub use cell::{Cell, CellTag, Coord, Membership};
pub use config::Config;
pub use error::{AstarError, FrontierError, Result};
pub use frontier::Frontier;
pub use grid::{CellView, Grid, MembershipCounts};
pub use layout::BoardLayout;
pub use search::{solve, SearchState, StepOutcome};
