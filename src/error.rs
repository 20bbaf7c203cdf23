use thiserror::Error;

use crate::config::ConfigError;

/// Failures of the host program.  The simulation itself has no error paths.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("cannot set up logging: {0}")]
    Logging(String),
}
