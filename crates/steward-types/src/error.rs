use thiserror::Error;

/// Errors from settings storage adapters.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record matched the row selector.
    #[error("record not found")]
    NotFound,

    #[error("query error: {0}")]
    Query(String),
}

/// Errors from the outbound transport.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("send failed: {0}")]
    Send(String),

    #[error("edit failed: {0}")]
    Edit(String),

    #[error("follow-up failed: {0}")]
    FollowUp(String),

    #[error("modal failed: {0}")]
    Modal(String),
}

/// Errors raised while building a configuration manifest.
///
/// These are programmer errors caught at startup, not runtime
/// user-facing failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ManifestError {
    #[error("manifest must contain at least one option")]
    Empty,

    #[error("duplicate column '{0}' in manifest")]
    DuplicateColumn(String),
}

/// Errors from a configuration session.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The backing record for the resolved row selector does not exist.
    /// The engine never creates rows; the owning feature must.
    #[error("no configuration record for this scope")]
    MissingRecord,

    /// A collected event's correlation token matched no manifest option.
    /// Indicates the rendered UI and the manifest are out of sync.
    #[error("component id '{0}' does not match any manifest option")]
    UnknownToken(String),

    /// The option kind has no prompt flow yet.
    #[error("option type '{0}' is not supported yet")]
    Unsupported(&'static str),

    #[error("storage error: {0}")]
    Store(StoreError),

    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
}

impl From<StoreError> for ConfigError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => ConfigError::MissingRecord,
            other => ConfigError::Store(other),
        }
    }
}
