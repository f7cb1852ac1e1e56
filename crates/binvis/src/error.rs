use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors raised while configuring or performing a render.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid options or input that cannot be rendered.
    #[error("{0}")]
    Configuration(String),
    /// The input could not be read or the output could not be written.
    #[error("{}: {source}", .path.display())]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// Shorthand for a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Wrap an I/O failure with the path it concerns.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True for errors caused by invalid options or input.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

impl From<spacecurve::error::Error> for Error {
    fn from(err: spacecurve::error::Error) -> Self {
        Self::Configuration(err.to_string())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
