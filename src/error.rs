use std::path::PathBuf;

pub const EXIT_OK: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_CONFIG: i32 = 2;
pub const EXIT_RESOLUTION: i32 = 3;

/// Every failure joltic reports to the user. None of them are retried.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed, missing or unwritable configuration.
    #[error("{0}")]
    Config(String),

    /// Unknown environment or category, or nothing to pick from.
    #[error("{0}")]
    Resolution(String),

    /// A server entry that cannot be turned into an ssh invocation.
    #[error("{0}")]
    Validation(String),

    /// The user aborted an interactive prompt.
    #[error("{0}")]
    Cancelled(String),

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn resolution(msg: impl Into<String>) -> Self {
        Self::Resolution(msg.into())
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Config(_) | Error::Io { .. } => EXIT_CONFIG,
            Error::Resolution(_) | Error::Validation(_) => EXIT_RESOLUTION,
            // A cancelled prompt is not a resolution failure, so 1 rather than 3.
            Error::Cancelled(_) => EXIT_FAILURE,
        }
    }
}
