//! # Carve Errors
//!
//! Error types for lattice construction, selection and export.
//!
//! ## Error Policy
//!
//! - Every rejected operation leaves the session exactly as it was
//! - `UnsupportedCutShape` is recorded as a warning, never returned from export
//! - Lattice inconsistencies surface as `InvariantViolation`

use crate::lattice::{CellId, PointId};
use config::constants::ConfigError;
use thiserror::Error;

/// Errors that can occur while carving a lattice.
#[derive(Debug, Error)]
pub enum CarveError {
    /// Lattice or adjacency inconsistency. Not recoverable by the user.
    #[error("Invariant violation: {message}")]
    InvariantViolation { message: String },

    /// Export attempted while nothing is selected.
    #[error("Nothing to export: {message}")]
    NoSelection { message: String },

    /// Reconstruction produced neither 3 nor 4 surviving points for an anchor.
    #[error("Unsupported cut shape at anchor {anchor}: {point_count} points")]
    UnsupportedCutShape { anchor: PointId, point_count: usize },

    /// Invalid lattice configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// Point id outside the lattice
    #[error("Unknown point: {id}")]
    UnknownPoint { id: PointId },

    /// Cell id outside the lattice
    #[error("Unknown cell: {id}")]
    UnknownCell { id: CellId },

    /// Point exists but is not an anchor
    #[error("Point {id} is not an anchor")]
    NotAnAnchor { id: PointId },

    /// Export target has an unrecognized extension
    #[error("Unknown export format: .{extension}")]
    UnknownFormat { extension: String },

    /// I/O error while writing an export
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CarveError {
    /// Creates an invariant violation error.
    pub fn invariant(message: impl Into<String>) -> Self {
        Self::InvariantViolation {
            message: message.into(),
        }
    }

    /// Creates a nothing-to-export error.
    pub fn no_selection(message: impl Into<String>) -> Self {
        Self::NoSelection {
            message: message.into(),
        }
    }
}

/// Result type alias for carving operations.
pub type CarveResult<T> = Result<T, CarveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CarveError::invariant("anchor 20 has 3 cells");
        assert!(err.to_string().contains("Invariant"));
        assert!(err.to_string().contains("anchor 20"));

        let err = CarveError::UnsupportedCutShape {
            anchor: 17,
            point_count: 5,
        };
        assert!(err.to_string().contains("17"));
        assert!(err.to_string().contains("5 points"));
    }

    #[test]
    fn test_config_error_converts() {
        let err: CarveError = ConfigError::InvalidGridSize(1).into();
        assert!(matches!(err, CarveError::InvalidConfig(_)));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CarveError>();
    }
}
