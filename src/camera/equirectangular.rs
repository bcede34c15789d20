//! Equirectangular (spherical) camera model.
//!
//! Pixels map linearly to spherical angles: longitude on the horizontal
//! axis, latitude on the vertical axis, so a single image covers the full
//! sphere.
//!
//! # Mathematical Model
//!
//! ## Unprojection (2D → 3D)
//!
//! ```text
//! lon = (u - cx) / fx
//! lat = (v - cy) / fy
//! ray = [cos(lat)·sin(lon), sin(lat), cos(lat)·cos(lon)]
//! ```
//!
//! The pixel is in-domain iff `|lon| < π` and `|lat| < π/2`.
//!
//! ## Projection (3D → 2D)
//!
//! ```text
//! lon = atan2(x, z_biased)
//! lat = atan2(y, sqrt(x² + z² + eps))
//! u = fx · lon + cx
//! v = fy · lat + cy
//! ```
//!
//! where `z_biased` applies the asymmetric branch-cut bias from
//! [`crate::numeric::branch_cut_bias`]. The latitude denominator takes its
//! epsilon inside the square root, where the radicand is nonnegative by
//! construction.

use super::CameraModel;
use crate::numeric::{branch_cut_bias, sign};
use nalgebra::{RealField, Vector2, Vector3, Vector4};

/// Equirectangular projection model with `[fx, fy, cx, cy]` calibration
/// (focal terms in pixels per radian).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Equirectangular;

impl CameraModel for Equirectangular {
    const NAME: &'static str = "equirectangular";

    /// The domain gate is positive iff the decoded angles lie strictly
    /// inside `(-π, π) × (-π/2, π/2)`; a source pixel outside that window
    /// invalidates the whole residual regardless of target-side geometry.
    fn unproject<T: RealField + Copy>(
        calibration: &Vector4<T>,
        pixel: &Vector2<T>,
        epsilon: T,
    ) -> (Vector3<T>, T) {
        let fx = calibration[0];
        let fy = calibration[1];
        let cx = calibration[2];
        let cy = calibration[3];

        let lon = (pixel.x - cx) / fx;
        let lat = (pixel.y - cy) / fy;

        let (sin_lon, cos_lon) = (lon.sin(), lon.cos());
        let (sin_lat, cos_lat) = (lat.sin(), lat.cos());

        let direction = Vector3::new(cos_lat * sin_lon, sin_lat, cos_lat * cos_lon);
        // The radicand is ≈ 1 for any real pixel; the clamp mirrors the
        // guard discipline of the projection side.
        let inv_norm = T::one() / direction.norm_squared().max(epsilon).sqrt();

        let gate = sign(T::pi() - lon.abs()).min(sign(T::frac_pi_2() - lat.abs()));

        (direction * inv_norm, gate)
    }

    /// The longitude denominator gets the asymmetric branch-cut bias, not a
    /// symmetric clamp; the latitude denominator is guarded inside its
    /// square root. Both outputs are finite for any finite input.
    fn project<T: RealField + Copy>(
        calibration: &Vector4<T>,
        point: &Vector3<T>,
        epsilon: T,
    ) -> Vector2<T> {
        let fx = calibration[0];
        let fy = calibration[1];
        let cx = calibration[2];
        let cy = calibration[3];

        let lon = point.x.atan2(branch_cut_bias(point.z, epsilon));
        let lat = point
            .y
            .atan2((point.x * point.x + point.z * point.z + epsilon).sqrt());

        Vector2::new(fx * lon + cx, fy * lat + cy)
    }

    /// Positive iff the point has nonzero magnitude (any direction on the
    /// sphere projects somewhere).
    fn projection_gate<T: RealField + Copy>(point: &Vector3<T>) -> T {
        sign(point.norm_squared())
    }
}
