use thiserror::Error;

/// Failure popping from an empty frontier
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontierError {
    #[error("frontier is empty")]
    Empty,
}

/// Crate error type
#[derive(Error, Debug)]
pub enum AstarError {
    #[error("grid size must be between 2 and 256, got {0}")]
    InvalidSize(i32),

    #[error(transparent)]
    Frontier(#[from] FrontierError),

    #[error("layout parse error on line {line}: {message}")]
    Layout { line: usize, message: String },

    #[error("layout is {found}x{found} but the board is {expected}x{expected}")]
    SizeMismatch { expected: i32, found: i32 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("save state error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("clipboard error: {0}")]
    Clipboard(String),
}

impl From<arboard::Error> for AstarError {
    fn from(e: arboard::Error) -> Self {
        AstarError::Clipboard(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AstarError>;
