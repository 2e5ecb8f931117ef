//! Error types for configuration composition.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ComposeError>;

#[derive(Debug, Error)]
pub enum ComposeError {
    /// A declaration slot that must produce an entry produced none.
    #[error("no entry found")]
    NoEntry,

    #[error("invalid output pattern `{pattern}`: {source}")]
    BadPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("failed to read glob match: {0}")]
    Glob(#[from] glob::GlobError),

    #[error(transparent)]
    Config(#[from] packplan_config::ConfigError),
}
