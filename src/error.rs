//! Error types for the design bridge

use thiserror::Error;

/// Result type alias for bridge operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Missing or invalid startup configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The outbound call never produced a response body
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The model endpoint answered with something that is not JSON
    #[error("Invalid model response: {0}")]
    InvalidResponse(String),

    /// The model endpoint reported an error object
    #[error("Model API error: {0}")]
    Api(String),

    /// Socket or file failure outside the model call
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
