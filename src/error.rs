use thiserror::Error;

/// Errors at the fallible outer edges of the crate. The parsers never
/// produce these: a malformed row is skipped and an empty source yields an
/// empty result, per the recovery rules in [`crate::parse`].
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("failed to spawn {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("counter stream error: {0}")]
    Stream(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
