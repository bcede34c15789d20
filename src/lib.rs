//! Reprojection residual kernels for inverse-range landmarks.
//!
//! This crate computes the per-correspondence residual used in visual bundle
//! adjustment and SLAM factor graphs: a landmark is anchored as a pixel plus
//! inverse range in a *source* camera, reprojected into a *target* camera, and
//! compared against an observed pixel correspondence. The result is a 2D pixel
//! delta together with a scalar validity flag.
//!
//! # Key Components
//!
//! - **[`Pose3`]**: rigid camera pose (unit quaternion + translation) and the
//!   source-to-target ray composition
//! - **[`CameraModel`] trait**: projection/unprojection interface shared by the
//!   camera models
//! - **[`Linear`]**: perspective pinhole model
//! - **[`Equirectangular`]**: full spherical model
//! - **[`reprojection_delta`]**: the residual kernel, generic over the model
//!   and the scalar type
//!
//! # Design
//!
//! The kernels are evaluated millions of times per optimization iteration and
//! are differentiated by automatic or symbolic differentiation, so they are
//! pure, branch-minimal and epsilon-guarded: geometric degeneracies (point
//! behind the camera, zero-magnitude ray, out-of-domain source pixel) are
//! reported through the validity flag rather than through `Result`, and every
//! singular denominator is clamped or biased by a caller-supplied epsilon.
//! All kernels are generic over `T: RealField + Copy` so dual-number scalar
//! types can be substituted for derivative computation.

pub mod camera;
pub mod error;
pub mod factors;
pub mod logger;
pub mod numeric;
pub mod pose;

pub use camera::{CameraModel, Equirectangular, Intrinsics, Linear, DEFAULT_EPSILON};
pub use error::{CameraModelError, ReprojResult};
pub use factors::{
    par_reprojection_delta_batch, reprojection_delta, reprojection_delta_batch,
    reprojection_is_valid, LandmarkMatch, ReprojectionDelta,
};
pub use logger::{init_logger, init_logger_with_level};
pub use pose::{ray_in_target_frame, Pose3};
