use thiserror::Error;

/// pagestats error types
#[derive(Error, Debug)]
pub enum PagestatsError {
    /// File I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// No usable service-account key from either source
    #[error("credentials error: {0}")]
    Credentials(String),

    /// JWT signing or token exchange failed
    #[error("auth error: {0}")]
    Auth(String),

    /// Transport failure or non-success status from the reporting API
    #[error("http error: {0}")]
    Http(String),

    /// Malformed report row
    #[error("parse error: {0}")]
    Parse(String),

    /// Row carries a different number of metrics than the rest of its query
    #[error("row has {found} metrics, expected {expected}")]
    MetricArity { expected: usize, found: usize },

    /// Account → property → view chain produced no view
    #[error("no analytics view (profile) available for these credentials")]
    NoProfile,

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),
}

/// Result type alias for pagestats
pub type Result<T> = std::result::Result<T, PagestatsError>;
