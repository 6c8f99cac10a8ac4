//! Error types.
//!
//! Heuristic shortfalls are not errors: a run that ends with conflicts still
//! returns `Ok` with a nonzero `best_fitness`. Errors cover rejected input,
//! storage that could not be reserved, and file I/O.

use thiserror::Error;

/// Errors raised by the coloring engine and its I/O helpers.
#[derive(Error, Debug)]
pub enum ColoringError {
    /// A configuration parameter is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The graph or its weights are malformed.
    #[error("invalid graph: {0}")]
    InvalidGraph(String),

    /// Working memory for the population could not be reserved.
    #[error("resource exhausted: {0}")]
    ResourceExhausted(String),

    /// Reading or writing a graph, weight, or coloring file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A graph or weight file is syntactically wrong.
    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },
}

impl ColoringError {
    pub fn config(message: impl Into<String>) -> Self {
        ColoringError::InvalidConfig(message.into())
    }

    pub fn graph(message: impl Into<String>) -> Self {
        ColoringError::InvalidGraph(message.into())
    }

    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        ColoringError::Parse {
            line,
            message: message.into(),
        }
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, ColoringError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            ColoringError::config("population_size must be at least 2").to_string(),
            "invalid configuration: population_size must be at least 2"
        );
        assert_eq!(
            ColoringError::parse(3, "bad edge").to_string(),
            "parse error on line 3: bad edge"
        );
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: ColoringError = io.into();
        assert!(matches!(err, ColoringError::Io(_)));
    }
}
