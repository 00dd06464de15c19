use thiserror::Error;

/// Failures from configuration loading and the terminal layer.
///
/// The simulation engine itself has no error surface.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unable to parse config file: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
