use thiserror::Error;

/// Errors raised by the WEO pipeline.
#[derive(Debug, Error)]
pub enum WeoError {
    /// A caller passed an argument that does not fit the data schema.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A mandatory value (subject selection, dataset, ...) is missing.
    #[error("required value is missing: {0}")]
    PreconditionViolation(String),

    /// An input file lacks one of the fixed column names.
    #[error("{file}: missing required column '{column}'")]
    MissingColumn { file: String, column: String },

    /// The layout engine was handed an empty or inverted year window.
    #[error("invalid year window {from}..={to}")]
    InvalidWindow { from: i32, to: i32 },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("render failed: {0}")]
    Render(String),
}

pub type Result<T, E = WeoError> = std::result::Result<T, E>;
