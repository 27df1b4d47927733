//! Error handling for the `iox` CLI.
//!
//! Wraps the interpreter's own diagnostics (`iox_util::IoxError`) together
//! with the errors that only the CLI shell itself can produce: a script
//! that can't be opened, a broken config file, a line editor that fails
//! to start.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("could not open script '{path}': {source}")]
    OpenScript {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Runtime(#[from] iox_util::IoxError),

    #[error("failed to initialize logging: {0}")]
    Logging(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("could not start the line editor: {0}")]
    LineEditor(String),
}

pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runtime_error_displays_through() {
        let err: CliError = iox_util::IoxError::DivideByZero.into();
        assert_eq!(err.to_string(), "divide by zero");
    }

    #[test]
    fn open_script_error_names_the_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "not found");
        let err = CliError::OpenScript {
            path: PathBuf::from("missing.iox"),
            source: io_err,
        };
        assert!(err.to_string().contains("missing.iox"));
    }
}
