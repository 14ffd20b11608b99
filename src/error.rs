use thiserror::Error;

#[derive(Error, Debug)]
pub enum Sc010Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Connection timeout")]
    Timeout,
    #[error("Protocol error: {0}")]
    Protocol(String),
    #[error("Controller error: {0}")]
    Controller(String),
    #[error("Invalid address: {0}")]
    InvalidAddress(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
