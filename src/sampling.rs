//! Function sampling and small numeric helpers.
//!
//! Curves are drawn from sampled polylines. [`sample_function`] walks an
//! interval at a fixed step and splits the samples into runs wherever the
//! function leaves the finite domain, so a curve with poles (like `1/x`)
//! renders as separate branches instead of a spike through the pole.

use std::ops::Range;

use glam::Vec2;
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::log::debug;

/// Step used for central-difference differentiation.
const DERIVATIVE_DX: f32 = 0.001;

/// Sample `f` over `[left, right]` with `count` steps, keeping values
/// inside `[bottom, top]`.
///
/// Visits `count + 1` sample positions `left + i * step`. Consecutive
/// in-range finite samples form a run; a non-finite or out-of-range value
/// closes the current run and is dropped, so a curve leaving the visible
/// band resumes as a new run where it re-enters. Returns no runs when
/// `left >= right` or `count` is zero.
pub fn sample_function(
    f: impl Fn(f32) -> f32,
    left: f32,
    right: f32,
    bottom: f32,
    top: f32,
    count: usize,
) -> Vec<Vec<Vec2>> {
    if left >= right || count == 0 {
        return Vec::new();
    }
    let step = (right - left) / count as f32;
    let mut runs = Vec::new();
    let mut run: Vec<Vec2> = Vec::new();
    for i in 0..=count {
        let x = left + i as f32 * step;
        let y = f(x);
        if y.is_finite() && y >= bottom && y <= top {
            run.push(Vec2::new(x, y));
        } else if !run.is_empty() {
            runs.push(std::mem::take(&mut run));
        }
    }
    if !run.is_empty() {
        runs.push(run);
    }
    debug!(
        runs = runs.len(),
        left, right, count, "sampled function interval"
    );
    runs
}

/// Central-difference derivative of `f` at `x`.
///
/// Returns NaN when either probe leaves the finite domain.
pub fn derivative(f: impl Fn(f32) -> f32, x: f32) -> f32 {
    let lo = f(x - DERIVATIVE_DX);
    let hi = f(x + DERIVATIVE_DX);
    if !lo.is_finite() || !hi.is_finite() {
        return f32::NAN;
    }
    (hi - lo) / (2.0 * DERIVATIVE_DX)
}

/// The tangent line of `f` at `x0`, or `None` where the function or its
/// derivative is not finite there.
pub fn tangent_line(f: impl Fn(f32) -> f32, x0: f32) -> Option<impl Fn(f32) -> f32> {
    let y0 = f(x0);
    let k = derivative(&f, x0);
    if !y0.is_finite() || !k.is_finite() {
        return None;
    }
    Some(move |x: f32| k * (x - x0) + y0)
}

/// The line `y = k * x + b` as a function.
pub fn linear(k: f32, b: f32) -> impl Fn(f32) -> f32 {
    move |x| k * x + b
}

/// Evaluate a cubic bezier with endpoints `p0`, `p1` and control points
/// `c0`, `c1` at parameter `t`.
pub fn cubic_bezier(p0: Vec2, c0: Vec2, c1: Vec2, p1: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    p0 * (u * u * u) + c0 * (3.0 * u * u * t) + c1 * (3.0 * u * t * t) + p1 * (t * t * t)
}

/// Approximate direction of a cubic bezier just before its endpoint, as an
/// angle in radians. Used to orient arrowheads at the curve tip.
pub fn bezier_end_angle(p0: Vec2, c0: Vec2, c1: Vec2, p1: Vec2) -> f32 {
    let a = cubic_bezier(p0, c0, c1, p1, 0.989);
    let b = cubic_bezier(p0, c0, c1, p1, 0.991);
    let d = b - a;
    d.y.atan2(d.x)
}

/// Deterministic scatter of `count` points uniformly distributed over the
/// given math-space ranges.
pub fn scatter_points(count: usize, x: Range<f32>, y: Range<f32>, seed: u64) -> Vec<Vec2> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| Vec2::new(rng.gen_range(x.clone()), rng.gen_range(y.clone())))
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const WIDE: (f32, f32) = (-1e9, 1e9);

    #[test]
    fn finite_function_yields_one_run() {
        let runs = sample_function(|x| x * x, 0.0, 1.0, WIDE.0, WIDE.1, 10);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].len(), 11);
        assert!((runs[0][0].x - 0.0).abs() < 1e-6);
        assert!((runs[0][10].x - 1.0).abs() < 1e-5);
        // strictly ascending x
        for pair in runs[0].windows(2) {
            assert!(pair[1].x > pair[0].x);
        }
    }

    #[test]
    fn pole_splits_into_runs_of_finite_points() {
        // 1/x has a pole at the middle sample
        let runs = sample_function(|x| 1.0 / x, -1.0, 1.0, WIDE.0, WIDE.1, 10);
        assert_eq!(runs.len(), 2);
        for run in &runs {
            for p in run {
                assert!(p.y.is_finite());
                assert!(p.x >= -1.0 && p.x <= 1.0);
            }
        }
        assert_eq!(runs[0].len(), 5);
        assert_eq!(runs[1].len(), 5);
    }

    #[test]
    fn leaving_the_band_splits_runs() {
        // x*x dips under bottom = 1 between -1 and 1
        let runs = sample_function(|x| x * x, -2.0, 2.0, 1.0, 100.0, 8);
        assert_eq!(runs.len(), 2);
        for run in &runs {
            for p in run {
                assert!(p.y >= 1.0 && p.y <= 100.0);
            }
        }
    }

    #[test]
    fn degenerate_interval_yields_nothing() {
        assert!(sample_function(|x| x, 1.0, 1.0, WIDE.0, WIDE.1, 10).is_empty());
        assert!(sample_function(|x| x, 2.0, 1.0, WIDE.0, WIDE.1, 10).is_empty());
        assert!(sample_function(|x| x, 0.0, 1.0, WIDE.0, WIDE.1, 0).is_empty());
    }

    #[test]
    fn everywhere_nan_yields_nothing() {
        assert!(sample_function(|_| f32::NAN, 0.0, 1.0, WIDE.0, WIDE.1, 4).is_empty());
    }

    #[test]
    fn central_difference_derivative() {
        let d = derivative(|x| x * x, 3.0);
        assert!((d - 6.0).abs() < 1e-2);
        assert!(derivative(|x| x.sqrt(), 0.0).is_nan());
    }

    #[test]
    fn tangent_line_matches_slope() {
        let t = tangent_line(|x| x * x, 1.0).unwrap();
        assert!((t(1.0) - 1.0).abs() < 1e-3);
        assert!((t(2.0) - 3.0).abs() < 1e-2);
        assert!(tangent_line(|x: f32| x.sqrt(), -1.0).is_none());
    }

    #[test]
    fn bezier_hits_endpoints() {
        let (p0, c0, c1, p1) = (
            Vec2::ZERO,
            Vec2::new(1.0, 2.0),
            Vec2::new(2.0, -1.0),
            Vec2::new(3.0, 0.5),
        );
        assert!((cubic_bezier(p0, c0, c1, p1, 0.0) - p0).length() < 1e-6);
        assert!((cubic_bezier(p0, c0, c1, p1, 1.0) - p1).length() < 1e-5);
    }

    #[test]
    fn straight_bezier_end_angle() {
        let p1 = Vec2::new(1.0, 1.0);
        let angle = bezier_end_angle(Vec2::ZERO, p1 / 3.0, p1 * 2.0 / 3.0, p1);
        assert!((angle - std::f32::consts::FRAC_PI_4).abs() < 1e-3);
    }

    #[test]
    fn scatter_is_seeded_and_bounded() {
        let a = scatter_points(64, -1.0..1.0, 0.0..5.0, 42);
        let b = scatter_points(64, -1.0..1.0, 0.0..5.0, 42);
        assert_eq!(a, b);
        for p in &a {
            assert!(p.x >= -1.0 && p.x < 1.0);
            assert!(p.y >= 0.0 && p.y < 5.0);
        }
        let c = scatter_points(64, -1.0..1.0, 0.0..5.0, 43);
        assert_ne!(a, c);
    }
}
