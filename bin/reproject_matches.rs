//! Reprojection Residual Binary
//!
//! Loads a CSV of landmark/correspondence matches and evaluates the
//! reprojection residual for every row under the chosen camera model.
//!
//! # Usage
//! ```bash
//! cargo run --release --bin reproject_matches -- matches.csv
//!
//! # Spherical cameras, displaced target:
//! cargo run --release --bin reproject_matches -- matches.csv \
//!     --model equirectangular --target-pose 0.1,0.0,0.0,1.0,0.0,0.0,0.0
//! ```
//!
//! The CSV columns are `source_u, source_v, inverse_range, target_u,
//! target_v` with a header row.

use apex_reprojection::{
    init_logger, par_reprojection_delta_batch, CameraModel, Equirectangular, Intrinsics,
    LandmarkMatch, Linear, Pose3, ReprojectionDelta, DEFAULT_EPSILON,
};
use clap::{Parser, ValueEnum};
use nalgebra::{Vector2, Vector4};
use serde::Deserialize;
use std::error::Error;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// Camera model selection for both cameras.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModelArg {
    Linear,
    Equirectangular,
}

/// Reprojection residual evaluation for a CSV of pixel matches
#[derive(Parser)]
#[command(name = "reproject_matches")]
#[command(about = "Evaluate reprojection residuals for a CSV of matches")]
struct Args {
    /// Match CSV path (required, positional)
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Camera model applied to both cameras
    #[arg(long, value_enum, default_value_t = ModelArg::Linear)]
    model: ModelArg,

    /// Calibration for both cameras as fx,fy,cx,cy
    #[arg(long, value_delimiter = ',', default_value = "500.0,500.0,320.0,240.0")]
    calibration: Vec<f64>,

    /// Source pose as tx,ty,tz,qw,qx,qy,qz (defaults to identity)
    #[arg(long, value_delimiter = ',')]
    source_pose: Option<Vec<f64>>,

    /// Target pose as tx,ty,tz,qw,qx,qy,qz (defaults to identity)
    #[arg(long, value_delimiter = ',')]
    target_pose: Option<Vec<f64>>,

    /// Epsilon for the numerical guards
    #[arg(long, default_value_t = DEFAULT_EPSILON)]
    epsilon: f64,
}

#[derive(Debug, Deserialize)]
struct MatchRecord {
    source_u: f64,
    source_v: f64,
    inverse_range: f64,
    target_u: f64,
    target_v: f64,
}

fn parse_pose(values: &Option<Vec<f64>>) -> Pose3<f64> {
    match values {
        Some(v) => Pose3::from_translation_quaternion(v[0], v[1], v[2], v[3], v[4], v[5], v[6]),
        None => Pose3::identity(),
    }
}

fn evaluate<M: CameraModel>(
    args: &Args,
    calibration: &Vector4<f64>,
    matches: &[LandmarkMatch<f64>],
) -> Vec<ReprojectionDelta<f64>> {
    par_reprojection_delta_batch::<M, f64>(
        &parse_pose(&args.source_pose),
        calibration,
        &parse_pose(&args.target_pose),
        calibration,
        matches,
        args.epsilon,
    )
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    init_logger();

    if !args.file.exists() {
        return Err(format!("File not found: {}", args.file.display()).into());
    }
    if args.calibration.len() != 4 {
        return Err("--calibration expects fx,fy,cx,cy".into());
    }
    for pose in [&args.source_pose, &args.target_pose].into_iter().flatten() {
        if pose.len() != 7 {
            return Err("poses expect tx,ty,tz,qw,qx,qy,qz".into());
        }
    }

    let intrinsics = Intrinsics::new(
        args.calibration[0],
        args.calibration[1],
        args.calibration[2],
        args.calibration[3],
    )?;
    let calibration: Vector4<f64> = intrinsics.storage();

    info!("Loading matches: {}", args.file.display());
    let mut reader = csv::Reader::from_path(&args.file)?;
    let mut matches = Vec::new();
    for record in reader.deserialize() {
        let record: MatchRecord = record?;
        matches.push(LandmarkMatch {
            source_pixel: Vector2::new(record.source_u, record.source_v),
            inverse_range: record.inverse_range,
            target_pixel: Vector2::new(record.target_u, record.target_v),
        });
    }
    info!("  Matches: {}", matches.len());

    let start = Instant::now();
    let results = match args.model {
        ModelArg::Linear => evaluate::<Linear>(&args, &calibration, &matches),
        ModelArg::Equirectangular => evaluate::<Equirectangular>(&args, &calibration, &matches),
    };
    let elapsed = start.elapsed();

    let valid: Vec<&ReprojectionDelta<f64>> =
        results.iter().filter(|r| r.is_valid > 0.0).collect();
    let (mut sum, mut max) = (0.0_f64, 0.0_f64);
    for r in &valid {
        let norm = r.delta.norm();
        sum += norm;
        max = max.max(norm);
    }

    info!("Residual statistics:");
    info!("  Model: {}", match args.model {
        ModelArg::Linear => Linear::NAME,
        ModelArg::Equirectangular => Equirectangular::NAME,
    });
    info!("  Valid: {} / {}", valid.len(), results.len());
    if !valid.is_empty() {
        info!("  Mean |delta|: {:.4} px", sum / valid.len() as f64);
        info!("  Max |delta|: {:.4} px", max);
    }
    info!("  Evaluation time: {:?}", elapsed);

    Ok(())
}
