use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("script not found: {0}")]
    ScriptNotFound(String),

    #[error("quota not found: {0}")]
    QuotaNotFound(String),

    #[error("quota exceeded for {owner}: {used} bytes used, {requested} requested, limit {limit}")]
    QuotaExceeded {
        owner: String,
        used: u64,
        requested: u64,
        limit: u64,
    },

    #[error("script already exists: {0}")]
    Duplicate(String),

    #[error("script is active: {0}")]
    IsActive(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// True when the failure came from the backing store rather than a domain rule.
    #[must_use]
    pub fn is_storage(&self) -> bool {
        matches!(self, Error::Storage(_) | Error::Io(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
