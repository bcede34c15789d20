//! Error types for apex-reprojection.
//!
//! Errors only arise while constructing or validating camera parameters. The
//! residual kernels themselves never fail: degenerate geometry is absorbed
//! into the validity flag and epsilon guards instead of an error return.
//! All errors use the `thiserror` crate for automatic trait implementations.

use thiserror::Error;

/// Result type used throughout the apex-reprojection library
pub type ReprojResult<T> = Result<T, CameraModelError>;

/// Camera parameter validation errors.
#[derive(Debug, Clone, Error)]
pub enum CameraModelError {
    #[error("Focal length must be positive")]
    FocalLengthMustBePositive,

    #[error("Principal point must be finite")]
    PrincipalPointMustBeFinite,

    #[error("Invalid camera parameters: {0}")]
    InvalidParams(String),
}
