use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OpcliError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("path does not exist: {}", .0.display())]
    PathNotFound(PathBuf),

    #[error("task {task} failed: {message}")]
    TaskFailed { task: String, message: String },

    #[error("task {task} still pending after {}s", .waited.as_secs())]
    PollTimeout { task: String, waited: Duration },

    #[error("Failed to get {resource}: {source}")]
    Lookup {
        resource: &'static str,
        source: Box<OpcliError>,
    },

    #[error("missing {0}")]
    Incomplete(&'static str),

    #[error("Terminal error: {0}")]
    Terminal(String),
}

pub type Result<T> = std::result::Result<T, OpcliError>;
