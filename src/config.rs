use crate::cell::CellTag;
use crate::error::Result;
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{info, warn};

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub palette: PaletteConfig,
    #[serde(default)]
    pub visual: VisualConfig,
    #[serde(default)]
    pub files: FilesConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GridConfig {
    #[serde(default = "default_size")]
    pub size: i32,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct WindowConfig {
    #[serde(default = "default_window_title")]
    pub title: String,
    #[serde(default = "default_window_width")]
    pub width: i32,
    #[serde(default = "default_window_height")]
    pub height: i32,
}

/// RGB triples for each display classification
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PaletteConfig {
    #[serde(default = "default_empty_colour")]
    pub empty: [u8; 3],
    #[serde(default = "default_blocked_colour")]
    pub blocked: [u8; 3],
    #[serde(default = "default_checkpoint_colour")]
    pub checkpoint: [u8; 3],
    #[serde(default = "default_open_colour")]
    pub open: [u8; 3],
    #[serde(default = "default_closed_colour")]
    pub closed: [u8; 3],
    #[serde(default = "default_path_colour")]
    pub path: [u8; 3],
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct VisualConfig {
    #[serde(default = "default_background")]
    pub background: [u8; 3],
    /// Gap between cells while editing
    #[serde(default = "default_show_borders")]
    pub show_borders_in_placement: bool,
    #[serde(default = "default_show_hud")]
    pub show_hud: bool,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FilesConfig {
    #[serde(default = "default_layout_path")]
    pub layout_path: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Used when RUST_LOG is not set
    #[serde(default = "default_filter")]
    pub filter: String,
    #[serde(default = "default_enable_action_log")]
    pub enable_action_log: bool,
    #[serde(default = "default_action_log_path")]
    pub action_log_path: String,
}

// Default values
fn default_size() -> i32 { 10 }
fn default_window_title() -> String { "A* Pathfinding".to_string() }
fn default_window_width() -> i32 { 1280 }
fn default_window_height() -> i32 { 720 }
fn default_empty_colour() -> [u8; 3] { [255, 255, 255] }
fn default_blocked_colour() -> [u8; 3] { [0, 0, 0] }
fn default_checkpoint_colour() -> [u8; 3] { [191, 0, 191] }
fn default_open_colour() -> [u8; 3] { [0, 0, 191] }
fn default_closed_colour() -> [u8; 3] { [191, 0, 0] }
fn default_path_colour() -> [u8; 3] { [0, 191, 0] }
fn default_background() -> [u8; 3] { [128, 128, 128] }
fn default_show_borders() -> bool { true }
fn default_show_hud() -> bool { true }
fn default_layout_path() -> String { "layout.json".to_string() }
fn default_filter() -> String { "astar_grid=info".to_string() }
fn default_enable_action_log() -> bool { false }
fn default_action_log_path() -> String { "action_log.json".to_string() }

impl Default for GridConfig {
    fn default() -> Self {
        Self { size: default_size() }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: default_window_title(),
            width: default_window_width(),
            height: default_window_height(),
        }
    }
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            empty: default_empty_colour(),
            blocked: default_blocked_colour(),
            checkpoint: default_checkpoint_colour(),
            open: default_open_colour(),
            closed: default_closed_colour(),
            path: default_path_colour(),
        }
    }
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            background: default_background(),
            show_borders_in_placement: default_show_borders(),
            show_hud: default_show_hud(),
        }
    }
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            layout_path: default_layout_path(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            enable_action_log: default_enable_action_log(),
            action_log_path: default_action_log_path(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            window: WindowConfig::default(),
            palette: PaletteConfig::default(),
            visual: VisualConfig::default(),
            files: FilesConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl PaletteConfig {
    pub fn colour(&self, tag: CellTag) -> [u8; 3] {
        match tag {
            CellTag::Empty => self.empty,
            CellTag::Blocked => self.blocked,
            CellTag::Checkpoint => self.checkpoint,
            CellTag::Open => self.open,
            CellTag::Closed => self.closed,
            CellTag::Path => self.path,
        }
    }
}

impl Config {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Read configuration without logging. A missing file gives defaults.
    pub fn read(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => Self::from_toml_str(&contents),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Config::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Load configuration from file, or use defaults if file doesn't exist
    /// or can't be parsed
    pub fn load_from(path: &Path) -> Self {
        match Self::read(path) {
            Ok(config) => {
                info!(path = %path.display(), "loaded configuration");
                config
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read configuration, using defaults");
                Config::default()
            }
        }
    }
}
