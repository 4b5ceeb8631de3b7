use thiserror::Error;

/// Errors surfaced by grid access and engine mutations.
///
/// A call that returns one of these has left the grid untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LifeError {
    /// Direct `(row, column)` access outside the grid.
    #[error("cell ({row}, {column}) is outside a {width}x{height} grid")]
    OutOfBounds {
        row: u32,
        column: u32,
        width: u32,
        height: u32,
    },

    /// A supplied coordinate does not name a cell of the grid.
    #[error("coordinate (column {column}, row {row}) is outside a {width}x{height} grid")]
    InvalidCoordinate {
        column: u32,
        row: u32,
        width: u32,
        height: u32,
    },

    /// A flattened coordinate list that cannot be split into pairs.
    #[error("flattened coordinate list has odd length {len}")]
    MalformedInput { len: usize },
}

/// Errors raised while loading or validating [`crate::config::Params`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("grid dimensions must be positive, got {width}x{height}")]
    Dimensions { width: u32, height: u32 },

    #[error(transparent)]
    Stamp(#[from] LifeError),

    #[error("a {width}x{height} grid is too large to render")]
    CanvasTooLarge { width: u32, height: u32 },

    #[error("unknown pattern: {0}")]
    UnknownPattern(String),
}
