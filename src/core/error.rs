/*!
Error handling for the PQC runtime.
*/

use std::io;
use thiserror::Error;

/// Result type for the PQC runtime
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the PQC runtime
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Operation attempted in a state that does not allow it
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// The initialization self-test battery reported a failure
    #[error("Self-test failure: {0}")]
    SelfTestFailure(String),

    /// Alias resolution revisited a name it had already substituted
    #[error("Alias cycle detected at '{0}'")]
    AliasCycle(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<Error> for io::Error {
    fn from(error: Error) -> Self {
        match error {
            Error::Io(io_error) => io_error,
            Error::InvalidState(msg) => io::Error::new(io::ErrorKind::Other, msg),
            Error::SelfTestFailure(msg) => io::Error::new(io::ErrorKind::PermissionDenied, msg),
            Error::AliasCycle(key) => io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Alias cycle detected at '{}'", key),
            ),
            Error::Config(msg) => io::Error::new(io::ErrorKind::InvalidInput, msg),
        }
    }
}

/// Convert a string to an Error::InvalidState
pub fn invalid_state_err<T, S: Into<String>>(msg: S) -> Result<T> {
    Err(Error::InvalidState(msg.into()))
}

/// Convert a string to an Error::SelfTestFailure
pub fn self_test_err<T, S: Into<String>>(msg: S) -> Result<T> {
    Err(Error::SelfTestFailure(msg.into()))
}

/// Convert a string to an Error::Config
pub fn config_err<T, S: Into<String>>(msg: S) -> Result<T> {
    Err(Error::Config(msg.into()))
}
