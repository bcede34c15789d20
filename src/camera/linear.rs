//! Linear (pinhole) camera model.
//!
//! The simplest perspective model with no lens distortion.
//!
//! # Mathematical Model
//!
//! ## Projection (3D → 2D)
//!
//! For a camera-frame point p = (x, y, z):
//!
//! ```text
//! u = fx · (x/z) + cx
//! v = fy · (y/z) + cy
//! ```
//!
//! with z guarded by a sign-preserving epsilon clamp.
//!
//! ## Unprojection (2D → 3D)
//!
//! ```text
//! a = (u - cx) / fx
//! b = (v - cy) / fy
//! ray = normalize([a, b, 1])
//! ```
//!
//! The normalization radicand `a² + b² + 1` is at least one, so this side
//! needs no epsilon guard.

use super::CameraModel;
use crate::numeric::{sign, sign_preserving_clamp};
use nalgebra::{RealField, Vector2, Vector3, Vector4};

/// Linear (pinhole) projection model with `[fx, fy, cx, cy]` calibration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Linear;

impl CameraModel for Linear {
    const NAME: &'static str = "linear";

    /// Every pixel decodes to a forward ray; the domain gate is always one.
    fn unproject<T: RealField + Copy>(
        calibration: &Vector4<T>,
        pixel: &Vector2<T>,
        _epsilon: T,
    ) -> (Vector3<T>, T) {
        let fx = calibration[0];
        let fy = calibration[1];
        let cx = calibration[2];
        let cy = calibration[3];

        let a = (pixel.x - cx) / fx;
        let b = (pixel.y - cy) / fy;

        let inv_norm = T::one() / (a * a + b * b + T::one()).sqrt();

        (Vector3::new(a * inv_norm, b * inv_norm, inv_norm), T::one())
    }

    /// The depth is clamped by [`sign_preserving_clamp`], so a point at
    /// exactly `z = 0` projects through `+epsilon` rather than dividing by
    /// zero. The pixel is finite for any finite input; whether it is
    /// meaningful is reported by [`Linear::projection_gate`].
    fn project<T: RealField + Copy>(
        calibration: &Vector4<T>,
        point: &Vector3<T>,
        epsilon: T,
    ) -> Vector2<T> {
        let fx = calibration[0];
        let fy = calibration[1];
        let cx = calibration[2];
        let cy = calibration[3];

        let z_safe = sign_preserving_clamp(point.z, epsilon);

        Vector2::new(fx * point.x / z_safe + cx, fy * point.y / z_safe + cy)
    }

    /// Positive iff the point is strictly in front of the camera.
    fn projection_gate<T: RealField + Copy>(point: &Vector3<T>) -> T {
        sign(point.z)
    }
}
