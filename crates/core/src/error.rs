use thiserror::Error;

/// Top-level error type used across the entire workspace.
#[derive(Debug, Error)]
pub enum ButtonsError {
    #[error("config error: {0}")]
    Config(String),

    /// A saved-state parcel was handed to a restorer that did not produce it.
    #[error("invalid state snapshot kind: expected '{expected}', found '{found}'")]
    InvalidStateSnapshotKind { expected: String, found: String },

    #[error("parcel error: {0}")]
    Parcel(String),

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

pub type Result<T, E = ButtonsError> = std::result::Result<T, E>;
