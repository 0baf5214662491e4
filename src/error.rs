use thiserror::Error;

#[derive(Error, Debug)]
pub enum StageViewError {
    #[error("API request failed with status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON deserialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Node {0} has no base URL; resolve it through a linked run before fetching its log")]
    MissingBaseUrl(String),

    #[error("Run {0} is not attached to a job")]
    DetachedRun(String),
}

pub type Result<T> = std::result::Result<T, StageViewError>;
