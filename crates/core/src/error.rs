use std::{path::PathBuf, process::ExitStatus};

/// Result alias that carries the custom [`AssetGenError`] type.
pub type Result<T> = std::result::Result<T, AssetGenError>;

/// Common error type for the core crate.
///
/// Every variant is fatal for a generation run. Recoverable filesystem
/// hiccups (folder creation, transient frame cleanup) are logged where they
/// happen and never surface as an error.
#[derive(Debug, thiserror::Error)]
pub enum AssetGenError {
    /// Free-form message for checks that have no dedicated variant.
    #[error("{0}")]
    Message(String),
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("failed to read configuration `{}`: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration `{}`: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("unknown size preset `{0}`")]
    UnknownSize(String),
    /// The external tool could not be started at all.
    #[error("failed to launch `{program}` (is it installed and on PATH?): {source}")]
    ToolLaunch {
        program: String,
        #[source]
        source: std::io::Error,
    },
    /// The external tool ran but reported failure.
    #[error("`{program}` exited with {status}: {stderr}")]
    ToolFailed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },
}

impl AssetGenError {
    /// Creates a new error that simply wraps the provided message.
    pub fn msg<T: Into<String>>(msg: T) -> Self {
        Self::Message(msg.into())
    }
}
