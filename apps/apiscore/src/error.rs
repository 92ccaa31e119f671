use std::path::PathBuf;

/// Failures of the layers around the scoring core (loading, validation,
/// configuration, export). Rules themselves never fail.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to fetch {url}: {message}")]
    Http { url: String, message: String },

    #[error("spec content is empty: {0}")]
    EmptyContent(String),

    #[error("invalid YAML/JSON format: {0}")]
    Parse(String),

    #[error("loaded spec is not a valid object")]
    NotAnObject,

    #[error("OpenAPI validation failed: {0}")]
    Validation(String),

    #[error("config error in {path}: {message}")]
    Config { path: PathBuf, message: String },

    #[error("rule weights must sum to 100, got {0}")]
    WeightSum(u64),

    #[error("unknown rule id: {0}")]
    UnknownRule(String),

    #[error("failed to serialize report: {0}")]
    Serialize(String),

    #[error("unknown format '{0}'")]
    UnknownFormat(String),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
