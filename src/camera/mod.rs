//! Camera projection models for the reprojection residual.
//!
//! # Available Camera Models
//!
//! - **[`Linear`]**: standard perspective projection (pinhole, no distortion)
//! - **[`Equirectangular`]**: full spherical projection (longitude/latitude)
//!
//! Both models read their parameters from a 4-slot calibration storage
//! vector. The slot semantics are fixed by convention: two scale terms
//! followed by two offset terms, `[fx, fy, cx, cy]` (focal lengths in
//! pixels, principal point in pixels). How the optimizer packs and updates
//! that vector is outside this crate.

use crate::error::CameraModelError;
use nalgebra::{RealField, Vector2, Vector3, Vector4};

pub mod equirectangular;
pub mod linear;

pub use equirectangular::Equirectangular;
pub use linear::Linear;

/// Epsilon handed to the kernels by callers without a tuned value.
///
/// Small enough not to perturb healthy geometry at pixel scale, large
/// enough to keep guarded denominators well away from the smallest normal
/// numbers.
pub const DEFAULT_EPSILON: f64 = 1e-9;

/// Camera projection model used by the reprojection residual.
///
/// Implementations are stateless marker types: all camera parameters arrive
/// through the calibration storage vector, so one evaluation can be
/// differentiated with respect to the calibration itself. Every method is
/// generic over the scalar so dual-number types substitute for `f64`.
///
/// # Contract
///
/// - [`unproject`](CameraModel::unproject) decodes a pixel into a *unit* ray
///   in the camera frame and reports the model's angular-domain gate: a sign
///   value that is positive iff the pixel decodes inside the valid domain.
/// - [`project`](CameraModel::project) maps a camera-frame point to a pixel.
///   It must return a finite pixel for every finite input and `epsilon > 0`;
///   geometric acceptability is reported separately by
///   [`projection_gate`](CameraModel::projection_gate).
/// - [`projection_gate`](CameraModel::projection_gate) is a sign value that
///   is positive iff the point projects to a geometrically meaningful pixel.
///
/// Gates are combined (and clamped to `{0, 1}`) by the residual assembler,
/// not here.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` for parallel residual evaluation.
pub trait CameraModel: Send + Sync + Clone + std::fmt::Debug + 'static {
    /// Model name identifier.
    const NAME: &'static str;

    /// Decode a pixel into a unit ray in the camera frame.
    ///
    /// Returns the ray and the angular-domain gate.
    fn unproject<T: RealField + Copy>(
        calibration: &Vector4<T>,
        pixel: &Vector2<T>,
        epsilon: T,
    ) -> (Vector3<T>, T);

    /// Project a camera-frame point onto the image plane.
    ///
    /// Singular depths are absorbed by epsilon guards so the result is
    /// always finite; check [`projection_gate`](CameraModel::projection_gate)
    /// before trusting the pixel.
    fn project<T: RealField + Copy>(
        calibration: &Vector4<T>,
        point: &Vector3<T>,
        epsilon: T,
    ) -> Vector2<T>;

    /// Sign gate for the geometric validity of projecting `point`.
    fn projection_gate<T: RealField + Copy>(point: &Vector3<T>) -> T;
}

/// The "common 4" intrinsic parameters.
///
/// Validated convenience type for building calibration storage vectors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intrinsics {
    /// Focal length in x direction (pixels)
    pub fx: f64,
    /// Focal length in y direction (pixels)
    pub fy: f64,
    /// Principal point x-coordinate (pixels)
    pub cx: f64,
    /// Principal point y-coordinate (pixels)
    pub cy: f64,
}

impl Intrinsics {
    /// Create new intrinsics with validation.
    pub fn new(fx: f64, fy: f64, cx: f64, cy: f64) -> Result<Self, CameraModelError> {
        if fx <= 0.0 || fy <= 0.0 {
            return Err(CameraModelError::FocalLengthMustBePositive);
        }
        if !cx.is_finite() || !cy.is_finite() {
            return Err(CameraModelError::PrincipalPointMustBeFinite);
        }
        Ok(Self { fx, fy, cx, cy })
    }

    /// Calibration storage vector in slot order `[fx, fy, cx, cy]`.
    pub fn storage<T: RealField + Copy>(&self) -> Vector4<T> {
        Vector4::new(
            nalgebra::convert(self.fx),
            nalgebra::convert(self.fy),
            nalgebra::convert(self.cx),
            nalgebra::convert(self.cy),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intrinsics_creation() {
        let intrinsics = Intrinsics::new(500.0, 500.0, 320.0, 240.0).unwrap();
        assert_eq!(intrinsics.fx, 500.0);
        assert_eq!(intrinsics.cy, 240.0);
    }

    #[test]
    fn test_intrinsics_rejects_nonpositive_focal_length() {
        assert!(matches!(
            Intrinsics::new(0.0, 500.0, 320.0, 240.0),
            Err(CameraModelError::FocalLengthMustBePositive)
        ));
        assert!(matches!(
            Intrinsics::new(500.0, -1.0, 320.0, 240.0),
            Err(CameraModelError::FocalLengthMustBePositive)
        ));
    }

    #[test]
    fn test_intrinsics_rejects_nonfinite_principal_point() {
        assert!(matches!(
            Intrinsics::new(500.0, 500.0, f64::NAN, 240.0),
            Err(CameraModelError::PrincipalPointMustBeFinite)
        ));
        assert!(matches!(
            Intrinsics::new(500.0, 500.0, 320.0, f64::INFINITY),
            Err(CameraModelError::PrincipalPointMustBeFinite)
        ));
    }

    #[test]
    fn test_storage_slot_order() {
        let intrinsics = Intrinsics::new(500.0, 510.0, 320.0, 240.0).unwrap();
        let storage: Vector4<f64> = intrinsics.storage();
        assert_eq!(storage[0], 500.0);
        assert_eq!(storage[1], 510.0);
        assert_eq!(storage[2], 320.0);
        assert_eq!(storage[3], 240.0);
    }
}
