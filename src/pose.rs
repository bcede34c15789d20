//! Rigid camera poses and the source-to-target ray composition.
//!
//! Poses are represented as a unit-quaternion rotation plus a translation,
//! matching the 7-scalar storage convention `[qw, qx, qy, qz, tx, ty, tz]`
//! used for optimizer round-trips. The composition in
//! [`ray_in_target_frame`] is the only pose algebra the residual kernels
//! need and is written so that it feeds cleanly into differentiable
//! expressions: rotations are evaluated through the quaternion sandwich,
//! no rotation-matrix object is formed.

use nalgebra::{Quaternion, RealField, UnitQuaternion, Vector3};
use std::fmt;

/// Rigid pose of a camera: rotation + translation.
///
/// The quaternion is used as stored; it is never re-normalized on the
/// evaluation path. Supplying a non-unit quaternion silently scales the
/// transformed geometry; keeping it normalized is the caller's
/// responsibility.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose3<T: RealField + Copy> {
    rotation: UnitQuaternion<T>,
    translation: Vector3<T>,
}

impl<T: RealField + Copy + fmt::Display> fmt::Display for Pose3<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = self.translation;
        let q = self.rotation.quaternion();
        write!(
            f,
            "Pose3(translation: [{:.4}, {:.4}, {:.4}], rotation: [w: {:.4}, x: {:.4}, y: {:.4}, z: {:.4}])",
            t.x, t.y, t.z, q.w, q.i, q.j, q.k
        )
    }
}

impl<T: RealField + Copy> Pose3<T> {
    /// Create a new pose from translation and rotation.
    ///
    /// # Arguments
    /// * `translation` - Translation vector [x, y, z]
    /// * `rotation` - Unit quaternion representing rotation
    pub fn new(translation: Vector3<T>, rotation: UnitQuaternion<T>) -> Self {
        Pose3 {
            rotation,
            translation,
        }
    }

    /// Identity pose: no rotation, zero translation.
    pub fn identity() -> Self {
        Pose3 {
            rotation: UnitQuaternion::identity(),
            translation: Vector3::zeros(),
        }
    }

    /// Create a pose from translation components and quaternion coefficients.
    ///
    /// The quaternion is normalized on construction; use [`Pose3::new`] with
    /// a ready-made [`UnitQuaternion`] to skip the normalization.
    pub fn from_translation_quaternion(x: T, y: T, z: T, qw: T, qx: T, qy: T, qz: T) -> Self {
        let translation = Vector3::new(x, y, z);
        let rotation = UnitQuaternion::from_quaternion(Quaternion::new(qw, qx, qy, qz));
        Self::new(translation, rotation)
    }

    /// Create a pose from translation components and Euler angles.
    pub fn from_translation_euler(x: T, y: T, z: T, roll: T, pitch: T, yaw: T) -> Self {
        let translation = Vector3::new(x, y, z);
        let rotation = UnitQuaternion::from_euler_angles(roll, pitch, yaw);
        Self::new(translation, rotation)
    }

    /// Get the translation part.
    pub fn translation(&self) -> Vector3<T> {
        self.translation
    }

    /// Get the rotation part.
    pub fn rotation(&self) -> UnitQuaternion<T> {
        self.rotation
    }

    /// Storage vector in `[qw, qx, qy, qz, tx, ty, tz]` order.
    pub fn storage(&self) -> [T; 7] {
        let q = self.rotation.quaternion();
        let t = self.translation;
        [q.w, q.i, q.j, q.k, t.x, t.y, t.z]
    }

    /// Rebuild a pose from its [`Pose3::storage`] vector.
    ///
    /// The quaternion coefficients are used as stored, without
    /// normalization.
    pub fn from_storage(data: &[T; 7]) -> Self {
        Pose3 {
            rotation: UnitQuaternion::new_unchecked(Quaternion::new(
                data[0], data[1], data[2], data[3],
            )),
            translation: Vector3::new(data[4], data[5], data[6]),
        }
    }
}

/// Express a source-camera ray in the target camera frame.
///
/// Computes `R(q_t)^T * (R(q_s) * ray + (t_s - t_t) * inverse_range)`.
///
/// The translation difference is scaled by the landmark's inverse range
/// instead of the ray being divided by it, so the expression stays exact as
/// `inverse_range` approaches zero (landmark at infinity) and never divides
/// by a vanishing depth. For `inverse_range > 0` the result is the true
/// target-frame landmark point scaled by `inverse_range`; projection through
/// either camera model is invariant to that positive scale.
pub fn ray_in_target_frame<T: RealField + Copy>(
    source: &Pose3<T>,
    target: &Pose3<T>,
    ray: &Vector3<T>,
    inverse_range: T,
) -> Vector3<T> {
    let carried = source.rotation.transform_vector(ray)
        + (source.translation - target.translation) * inverse_range;
    target.rotation.inverse_transform_vector(&carried)
}
