//! Reprojection residual for inverse-range landmarks.
//!
//! A landmark is anchored as a pixel plus inverse range in the source
//! camera; it therefore always has zero residual there. This module
//! reprojects it into the target camera and returns the delta from the
//! observed correspondence to the reprojection, together with a validity
//! flag.
//!
//! # Residual
//!
//! ```text
//! ray      = unproject(source_calibration, source_pixel)        (source frame)
//! point    = R_tᵀ · (R_s · ray + (t_s - t_t) · inverse_range)   (target frame)
//! delta    = project(target_calibration, point) - target_pixel
//! valid    = max(0, min(domain_gate, projection_gate))
//! ```
//!
//! The evaluation is pure and stateless: no shared mutable state, no I/O,
//! a fixed count of scalar operations per call. It is safe to evaluate
//! concurrently from any number of threads.

use crate::camera::CameraModel;
use crate::pose::{ray_in_target_frame, Pose3};
use nalgebra::{RealField, Vector2, Vector4};
use rayon::prelude::*;

/// Result of one reprojection residual evaluation.
///
/// `is_valid` is boolean-as-scalar: `1.0` when the projection is
/// geometrically and numerically well-defined, `0.0` otherwise. An invalid
/// residual should be excluded from the objective, not merely
/// down-weighted: `delta` is still finite but carries no geometric
/// meaning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReprojectionDelta<T: RealField + Copy> {
    /// Predicted minus observed target pixel.
    pub delta: Vector2<T>,
    /// Validity indicator in `{0, 1}`.
    pub is_valid: T,
}

/// One landmark/correspondence pair observed by a source/target camera pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LandmarkMatch<T: RealField + Copy> {
    /// Location of the landmark in the source camera (pixels).
    pub source_pixel: Vector2<T>,
    /// Inverse range of the landmark in the source camera. Values ≤ 0
    /// denote invalid/behind-camera depth and are never divided by.
    pub inverse_range: T,
    /// Location of the correspondence in the target camera (pixels).
    pub target_pixel: Vector2<T>,
}

/// Reproject the landmark into the target camera and return the delta from
/// the correspondence to the reprojection.
///
/// # Arguments
///
/// * `source_pose` - The pose of the source camera
/// * `source_calibration` - The calibration storage vector of the source camera
/// * `target_pose` - The pose of the target camera
/// * `target_calibration` - The calibration storage vector of the target camera
/// * `source_inverse_range` - The inverse range of the landmark in the source camera
/// * `source_pixel` - The location of the landmark in the source camera
/// * `target_pixel` - The location of the correspondence in the target camera
/// * `epsilon` - Small positive value guarding all singular denominators
///
/// # Numerical behavior
///
/// Never panics and never returns non-finite values for finite inputs and
/// `epsilon > 0`. Degenerate configurations (behind-camera point,
/// zero-magnitude ray, out-of-domain source pixel) yield `is_valid = 0`.
/// Callers that only need the flag should use [`reprojection_is_valid`],
/// which skips the projection arithmetic.
pub fn reprojection_delta<M: CameraModel, T: RealField + Copy>(
    source_pose: &Pose3<T>,
    source_calibration: &Vector4<T>,
    target_pose: &Pose3<T>,
    target_calibration: &Vector4<T>,
    source_inverse_range: T,
    source_pixel: &Vector2<T>,
    target_pixel: &Vector2<T>,
    epsilon: T,
) -> ReprojectionDelta<T> {
    let (ray, domain_gate) = M::unproject(source_calibration, source_pixel, epsilon);
    let point = ray_in_target_frame(source_pose, target_pose, &ray, source_inverse_range);

    let predicted = M::project(target_calibration, &point, epsilon);
    let gate = domain_gate.min(M::projection_gate(&point));

    ReprojectionDelta {
        delta: predicted - target_pixel,
        is_valid: T::zero().max(gate),
    }
}

/// Validity-only evaluation of the reprojection residual.
///
/// Computes the same `{0, 1}` flag as [`reprojection_delta`] without the
/// target-side projection arithmetic (no trigonometry, no division by the
/// guarded depth).
pub fn reprojection_is_valid<M: CameraModel, T: RealField + Copy>(
    source_pose: &Pose3<T>,
    source_calibration: &Vector4<T>,
    target_pose: &Pose3<T>,
    source_inverse_range: T,
    source_pixel: &Vector2<T>,
    epsilon: T,
) -> T {
    let (ray, domain_gate) = M::unproject(source_calibration, source_pixel, epsilon);
    let point = ray_in_target_frame(source_pose, target_pose, &ray, source_inverse_range);

    T::zero().max(domain_gate.min(M::projection_gate(&point)))
}

/// Evaluate a batch of matches against one source/target camera pair.
///
/// Output order matches input order; every element is fully populated.
pub fn reprojection_delta_batch<M: CameraModel, T: RealField + Copy>(
    source_pose: &Pose3<T>,
    source_calibration: &Vector4<T>,
    target_pose: &Pose3<T>,
    target_calibration: &Vector4<T>,
    matches: &[LandmarkMatch<T>],
    epsilon: T,
) -> Vec<ReprojectionDelta<T>> {
    matches
        .iter()
        .map(|m| {
            reprojection_delta::<M, T>(
                source_pose,
                source_calibration,
                target_pose,
                target_calibration,
                m.inverse_range,
                &m.source_pixel,
                &m.target_pixel,
                epsilon,
            )
        })
        .collect()
}

/// Parallel variant of [`reprojection_delta_batch`].
///
/// Each evaluation touches only its own inputs, so the batch splits across
/// the rayon thread pool with no synchronization.
pub fn par_reprojection_delta_batch<M, T>(
    source_pose: &Pose3<T>,
    source_calibration: &Vector4<T>,
    target_pose: &Pose3<T>,
    target_calibration: &Vector4<T>,
    matches: &[LandmarkMatch<T>],
    epsilon: T,
) -> Vec<ReprojectionDelta<T>>
where
    M: CameraModel,
    T: RealField + Copy + Send + Sync,
{
    matches
        .par_iter()
        .map(|m| {
            reprojection_delta::<M, T>(
                source_pose,
                source_calibration,
                target_pose,
                target_calibration,
                m.inverse_range,
                &m.source_pixel,
                &m.target_pixel,
                epsilon,
            )
        })
        .collect()
}
