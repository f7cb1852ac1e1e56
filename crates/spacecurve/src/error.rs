use thiserror::Error;

/// Errors raised while constructing or validating curves.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The requested dimension/size combination is not supported by a curve.
    #[error("invalid shape: {0}")]
    Shape(String),
    /// The requested grid is too large or otherwise ill-sized.
    #[error("invalid size: {0}")]
    Size(String),
    /// No curve is registered under the requested name.
    #[error("unknown curve '{0}'")]
    UnknownCurve(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
