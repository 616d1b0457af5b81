use thiserror::Error;

#[derive(Error, Debug)]
pub enum CampusError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// Any failed backend call: network error, non-2xx status or a body
    /// that does not decode. Causes are not distinguished.
    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CampusError>;
