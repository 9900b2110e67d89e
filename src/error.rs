//! Error module for the Rusty NetGen library.
use std::error::Error;
use std::fmt;

/// Error types for the library.
#[derive(Debug, PartialEq)]
pub enum ConnectivityError {
    /// Error for invalid parameters, e.g., non-positive spacing or a probability outside [0, 1].
    InvalidParameter(String),
    /// Error for a population without any cell, or statistics requested over no cell at all.
    EmptyPopulation(String),
    /// Error for a projection referring to a population that does not exist.
    UnknownPopulation(String),
    /// Error for two populations sharing the same identifier.
    DuplicatePopulation(String),
    /// Error for two projections between the same ordered pair of populations.
    DuplicateProjection(String),
    /// Error for an ordered pair of populations without any projection.
    MissingProjection(String),
    /// Error for I/O operations.
    IOError(String),
}

impl fmt::Display for ConnectivityError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConnectivityError::InvalidParameter(e) => write!(f, "Invalid parameters: {}", e),
            ConnectivityError::EmptyPopulation(e) => write!(f, "Empty population: {}", e),
            ConnectivityError::UnknownPopulation(e) => write!(f, "Unknown population: {}", e),
            ConnectivityError::DuplicatePopulation(e) => {
                write!(f, "Duplicate population: {}", e)
            }
            ConnectivityError::DuplicateProjection(e) => {
                write!(f, "Duplicate projection: {}", e)
            }
            ConnectivityError::MissingProjection(e) => write!(f, "Missing projection: {}", e),
            ConnectivityError::IOError(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl Error for ConnectivityError {}

impl From<std::io::Error> for ConnectivityError {
    fn from(e: std::io::Error) -> Self {
        ConnectivityError::IOError(e.to_string())
    }
}

impl From<serde_json::Error> for ConnectivityError {
    fn from(e: serde_json::Error) -> Self {
        ConnectivityError::IOError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = ConnectivityError::InvalidParameter("spacing must be positive".into());
        assert_eq!(err.to_string(), "Invalid parameters: spacing must be positive");

        let err = ConnectivityError::UnknownPopulation("baskets_12".into());
        assert_eq!(err.to_string(), "Unknown population: baskets_12");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        assert_eq!(
            ConnectivityError::from(io_err),
            ConnectivityError::IOError("missing".into())
        );
    }
}
