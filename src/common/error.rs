//! Error types for highway_planner

use std::fmt;

/// Main error type for the planner
#[derive(Debug)]
pub enum PlannerError {
    /// Invalid parameter or malformed input
    InvalidParameter(String),
    /// Numerical computation failed (singular system, etc.)
    NumericalError(String),
    /// Track map could not be loaded or is unusable
    MapError(String),
    /// Transport-layer failure (bind, handshake, send)
    TransportError(String),
    /// I/O error
    IoError(std::io::Error),
}

impl fmt::Display for PlannerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlannerError::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            PlannerError::NumericalError(msg) => write!(f, "Numerical error: {}", msg),
            PlannerError::MapError(msg) => write!(f, "Map error: {}", msg),
            PlannerError::TransportError(msg) => write!(f, "Transport error: {}", msg),
            PlannerError::IoError(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for PlannerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlannerError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PlannerError {
    fn from(e: std::io::Error) -> Self {
        PlannerError::IoError(e)
    }
}

impl From<tungstenite::Error> for PlannerError {
    fn from(e: tungstenite::Error) -> Self {
        PlannerError::TransportError(e.to_string())
    }
}

/// Result type alias for planner operations
pub type PlannerResult<T> = Result<T, PlannerError>;
