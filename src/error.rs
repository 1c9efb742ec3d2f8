use thiserror::Error;

/// Errors that can occur during bend analysis.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum BendError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("no positive bend distances to classify")]
    EmptyDistribution,

    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config file error: {0}")]
    Toml(#[from] toml::de::Error),
}
