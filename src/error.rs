/// Error types for the character gallery

use thiserror::Error;

/// Failure of a single outbound GET
#[derive(Error, Debug)]
pub enum FetchError {
    /// The server answered with a non-success status
    #[error("Unexpected HTTP status: {0}")]
    Status(reqwest::StatusCode),

    /// Connection, TLS, timeout or body decoding failure
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Failure to turn an image URL into a displayable portrait
#[derive(Error, Debug)]
pub enum PortraitError {
    #[error("Portrait download failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Portrait could not be decoded: {0}")]
    Decode(#[from] image::ImageError),

    /// The blocking decode task panicked or was cancelled
    #[error("Task join error: {0}")]
    Task(String),
}

/// Failure to read the optional config file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
