//! Residual assembly for the reprojection factor.
//!
//! The camera models are leaves; this module combines them with the pose
//! composition into the per-correspondence residual consumed by a factor
//! graph optimizer.

pub mod reprojection;

pub use reprojection::{
    par_reprojection_delta_batch, reprojection_delta, reprojection_delta_batch,
    reprojection_is_valid, LandmarkMatch, ReprojectionDelta,
};
