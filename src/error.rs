//! Error types for terrain map generation

use std::fmt;

/// Errors that can occur while configuring or querying a terrain map
///
/// Geometry problems (degenerate cells, too few points) are never errors;
/// they produce empty results instead.
#[derive(Debug, Clone, PartialEq)]
pub enum MapError {
    /// Configuration validation failed
    InvalidConfig(String),
    /// Requested polygon index does not exist
    PolygonNotFound(usize),
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
            MapError::PolygonNotFound(index) => write!(f, "polygon not found: {}", index),
        }
    }
}

impl std::error::Error for MapError {}

/// Result type alias for map operations
pub type Result<T> = std::result::Result<T, MapError>;
