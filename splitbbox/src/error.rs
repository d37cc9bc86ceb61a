//! Error types for integration requests.

use thiserror::Error;

/// Precondition violations detected before any pixel is processed.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Array '{name}' has {actual} elements, expected {expected} (one per pixel)")]
    ShapeMismatch {
        name: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Axis 1 geometry (pos1, delta_pos1) is required: {reason}")]
    MissingAxis1 { reason: &'static str },

    #[error("Invalid range for axis {axis}: [{min}, {max}] must be finite")]
    InvalidRange { axis: usize, min: f64, max: f64 },

    #[error("Normalization factor must be finite and non-zero, got {0}")]
    InvalidNormalization(f64),

    #[error("Dummy tolerance must be non-negative, got {0}")]
    InvalidDummyTolerance(f32),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Checks that an optional per-pixel array has exactly `expected` elements.
pub(crate) fn check_len<T>(name: &'static str, values: Option<&[T]>, expected: usize) -> Result<()> {
    match values {
        Some(v) if v.len() != expected => Err(Error::ShapeMismatch {
            name,
            expected,
            actual: v.len(),
        }),
        _ => Ok(()),
    }
}
