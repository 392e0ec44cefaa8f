//! Error types for the distance library.
//!
//! This module defines the errors that can occur when building a grid
//! configuration or a positioned token.

use core::fmt;

/// Errors that can occur while preparing a distance calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceError {
    /// Error for invalid grid cell size.
    /// This variant is returned when the cell size is zero, negative, or not finite.
    InvalidCellSize(&'static str),
    /// Error for invalid unit distance.
    /// This variant is returned when the distance represented by one cell is zero,
    /// negative, or not finite.
    InvalidUnitDistance(&'static str),
    /// Error for a position with a NaN or infinite coordinate.
    NonFinitePosition(&'static str),
}

impl fmt::Display for DistanceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistanceError::InvalidCellSize(msg) => write!(f, "Invalid grid cell size: {}", msg),
            DistanceError::InvalidUnitDistance(msg) => {
                write!(f, "Invalid grid unit distance: {}", msg)
            }
            DistanceError::NonFinitePosition(msg) => write!(f, "Invalid position: {}", msg),
        }
    }
}

impl core::error::Error for DistanceError {}
