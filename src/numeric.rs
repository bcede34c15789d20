//! Shared numerical guard primitives.
//!
//! Both camera models absorb their singular configurations with the same
//! small set of comparison-based guards. The epsilon argument threaded
//! through them is a caller-supplied tuning knob, not a domain constant:
//! one value is reused for every guarded operation inside a single residual
//! evaluation so that derivatives stay consistent.
//!
//! All functions are generic over `T: RealField + Copy` and use only
//! comparisons and field arithmetic, so they remain well-defined when `T`
//! is a dual-number scalar type.

use nalgebra::RealField;

/// Comparison-based sign function with `sign(0) = 0`.
///
/// The zero case is load-bearing: the validity gates are built from
/// `max(0, sign(x))` expressions whose boundary behavior depends on zero
/// mapping to zero, not to ±1. Do not replace with `signum` (which maps
/// `0.0` to `1.0`).
#[inline]
pub fn sign<T: RealField + Copy>(x: T) -> T {
    if x > T::zero() {
        T::one()
    } else if x < T::zero() {
        -T::one()
    } else {
        T::zero()
    }
}

/// Sign-preserving clamp of a denominator away from zero.
///
/// Returns `sign(x) * max(|x|, eps)`, with exactly-zero input mapped to
/// `+eps` (the tie-break is biased positive). The sign is never flipped, so
/// quotients keep their orientation on either side of the singularity.
#[inline]
pub fn sign_preserving_clamp<T: RealField + Copy>(x: T, eps: T) -> T {
    let magnitude = x.abs().max(eps);
    if x < T::zero() {
        -magnitude
    } else {
        magnitude
    }
}

/// Asymmetric bias applied to the `atan2` denominator near its branch cut:
/// `x + eps * (sign(x) + 0.5)`.
///
/// This is deliberately not a symmetric clamp. The `+0.5` term keeps the
/// guarded value strictly increasing through `x = 0`, which keeps the
/// longitude (and its derivatives) continuous as the denominator crosses
/// zero. Preserve the exact form.
#[inline]
pub fn branch_cut_bias<T: RealField + Copy>(x: T, eps: T) -> T {
    let half: T = nalgebra::convert(0.5);
    x + eps * (sign(x) + half)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_approx_eq(a: f64, b: f64, eps: f64) {
        assert!(
            (a - b).abs() < eps,
            "Values {} and {} differ by more than {}",
            a,
            b,
            eps
        );
    }

    #[test]
    fn test_sign_maps_zero_to_zero() {
        assert_eq!(sign(2.5_f64), 1.0);
        assert_eq!(sign(-0.3_f64), -1.0);
        assert_eq!(sign(0.0_f64), 0.0);
    }

    #[test]
    fn test_sign_preserving_clamp_far_from_zero() {
        // Values above eps in magnitude pass through untouched.
        assert_eq!(sign_preserving_clamp(3.0, 1e-9), 3.0);
        assert_eq!(sign_preserving_clamp(-3.0, 1e-9), -3.0);
    }

    #[test]
    fn test_sign_preserving_clamp_near_zero() {
        let eps = 1e-9;
        assert_eq!(sign_preserving_clamp(1e-12, eps), eps);
        assert_eq!(sign_preserving_clamp(-1e-12, eps), -eps);
        // Tie-break at exactly zero is biased positive.
        assert_eq!(sign_preserving_clamp(0.0, eps), eps);
    }

    #[test]
    fn test_clamp_magnitude_bounded_below() {
        let eps = 1e-6_f64;
        for &x in &[-1.0, -1e-7, -1e-12, 0.0, 1e-12, 1e-7, 1.0] {
            assert!(sign_preserving_clamp(x, eps).abs() >= eps);
        }
    }

    #[test]
    fn test_branch_cut_bias_values() {
        let eps = 1e-9;
        assert_approx_eq(branch_cut_bias(1.0, eps), 1.0 + 1.5 * eps, 1e-15);
        assert_approx_eq(branch_cut_bias(-1.0, eps), -1.0 - 0.5 * eps, 1e-15);
        assert_approx_eq(branch_cut_bias(0.0, eps), 0.5 * eps, 1e-24);
    }

    #[test]
    fn test_branch_cut_bias_monotonic_through_zero() {
        let eps = 1e-9;
        let xs = [-1e-8, -1e-9, -1e-12, 0.0, 1e-12, 1e-9, 1e-8];
        for pair in xs.windows(2) {
            assert!(branch_cut_bias(pair[0], eps) < branch_cut_bias(pair[1], eps));
        }
    }
}
