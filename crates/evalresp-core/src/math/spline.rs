//! Cubic splines under tension
//!
//! Each interval solves `y'''' = sigma^2 * y''`, so `sigma = 0` gives an
//! ordinary cubic spline and large tension approaches linear interpolation.
//! The end conditions tie the outer curvature terms to their neighbours:
//! `yp[0] = k * yp[1]` and `yp[n-1] = k * yp[n-2]` (`k = 0` is natural).

use crate::constants::SINH_SERIES_LIMIT;
use crate::error::SplineError;

/// Argument above which `sinh` is evaluated as a ratio of exponentials
const SINH_OVERFLOW_LIMIT: f64 = 700.0;

/// A fitted tension spline
#[derive(Debug, Clone)]
pub struct TensionSpline {
    x: Vec<f64>,
    y: Vec<f64>,
    yp: Vec<f64>,
    /// Tension denormalised to the abscissa span
    sigma: f64,
}

impl TensionSpline {
    /// Fit a spline through `(x, y)`
    ///
    /// A strictly decreasing abscissa is accepted and reversed together with
    /// its ordinates.
    ///
    /// # Arguments
    /// * `x` - Abscissa, strictly monotonic
    /// * `y` - Ordinate, same length as `x`
    /// * `tension` - Tension factor (its sign is ignored)
    /// * `scale` - End-condition parameter `k`
    pub fn fit(x: &[f64], y: &[f64], tension: f64, scale: f64) -> Result<Self, SplineError> {
        let n = x.len();
        if n < 2 {
            return Err(SplineError::TooFewPoints(n));
        }
        if y.len() != n {
            return Err(SplineError::LengthMismatch {
                x_len: n,
                y_len: y.len(),
            });
        }
        if let Some(i) = x.iter().position(|v| !v.is_finite()) {
            return Err(SplineError::NonFinite(i));
        }

        let (x, y): (Vec<f64>, Vec<f64>) = if x[n - 1] < x[0] {
            (x.iter().rev().copied().collect(), y.iter().rev().copied().collect())
        } else {
            (x.to_vec(), y.to_vec())
        };

        if let Some(i) = x.windows(2).position(|w| w[1] <= w[0]) {
            return Err(SplineError::NotMonotonic(i + 1));
        }

        let sigma = tension.abs() * (n - 1) as f64 / (x[n - 1] - x[0]);
        let yp = solve_curvature(&x, &y, sigma, scale);

        Ok(Self { x, y, yp, sigma })
    }

    /// Evaluate the spline at `t`
    ///
    /// Points outside the knot range are extrapolated from the end interval.
    pub fn evaluate(&self, t: f64) -> f64 {
        let n = self.x.len();
        let i = self.x.partition_point(|&v| v <= t).clamp(1, n - 1);

        let del1 = t - self.x[i - 1];
        let del2 = self.x[i] - t;
        let dels = self.x[i] - self.x[i - 1];
        let linear = (self.y[i] * del1 + self.y[i - 1] * del2) / dels;

        let (yp_lo, yp_hi) = (self.yp[i - 1], self.yp[i]);
        let sigma = self.sigma;

        if sigma == 0.0 {
            return linear
                - del1 * del2 * (yp_hi * (del1 + dels) + yp_lo * (del2 + dels)) / (6.0 * dels);
        }

        let sigdel = sigma * dels;
        if sigdel < SINH_SERIES_LIMIT {
            let ss = sinhm(sigdel);
            let s1 = sinhm(sigma * del1);
            let s2 = sinhm(sigma * del2);
            linear
                + (yp_hi * del1 * (s1 - ss) + yp_lo * del2 * (s2 - ss))
                    / (sigdel * sigma * (1.0 + ss))
        } else {
            let sig2 = sigma * sigma;
            linear
                + (yp_hi * (sinh_ratio(sigma * del1, sigdel) - del1 / dels)
                    + yp_lo * (sinh_ratio(sigma * del2, sigdel) - del2 / dels))
                    / sig2
        }
    }
}

/// Fit and resample in one step
///
/// # Arguments
/// * `x`, `y` - Source table
/// * `tension` - Tension factor
/// * `scale` - End-condition parameter
/// * `targets` - Abscissae to evaluate at
pub fn interpolate(
    x: &[f64],
    y: &[f64],
    tension: f64,
    scale: f64,
    targets: &[f64],
) -> Result<Vec<f64>, SplineError> {
    let spline = TensionSpline::fit(x, y, tension, scale)?;
    Ok(targets.iter().map(|&t| spline.evaluate(t)).collect())
}

/// Solve the tridiagonal system for the curvature terms
fn solve_curvature(x: &[f64], y: &[f64], sigma: f64, k: f64) -> Vec<f64> {
    let n = x.len();
    let mut yp = vec![0.0; n];
    if n < 3 {
        return yp;
    }

    let terms: Vec<(f64, f64)> = x.windows(2).map(|w| interval_terms(sigma, w[1] - w[0])).collect();
    let slopes: Vec<f64> = x
        .windows(2)
        .zip(y.windows(2))
        .map(|(xw, yw)| (yw[1] - yw[0]) / (xw[1] - xw[0]))
        .collect();

    // Unknowns are yp[1..n-1]
    let m = n - 2;
    let mut sub = vec![0.0; m];
    let mut diag = vec![0.0; m];
    let mut sup = vec![0.0; m];
    let mut rhs = vec![0.0; m];

    for j in 0..m {
        let (d_lo, s_lo) = terms[j];
        let (d_hi, s_hi) = terms[j + 1];
        sub[j] = s_lo;
        diag[j] = d_lo + d_hi;
        sup[j] = s_hi;
        rhs[j] = slopes[j + 1] - slopes[j];
    }
    diag[0] += k * terms[0].1;
    diag[m - 1] += k * terms[n - 2].1;

    // Thomas algorithm
    let mut cp = vec![0.0; m];
    let mut dp = vec![0.0; m];
    cp[0] = sup[0] / diag[0];
    dp[0] = rhs[0] / diag[0];
    for j in 1..m {
        let denom = diag[j] - sub[j] * cp[j - 1];
        cp[j] = sup[j] / denom;
        dp[j] = (rhs[j] - sub[j] * dp[j - 1]) / denom;
    }

    yp[m] = dp[m - 1];
    for j in (0..m - 1).rev() {
        yp[j + 1] = dp[j] - cp[j] * yp[j + 2];
    }
    yp[0] = k * yp[1];
    yp[n - 1] = k * yp[n - 2];
    yp
}

/// Diagonal and off-diagonal contribution of one interval of width `del`
fn interval_terms(sigma: f64, del: f64) -> (f64, f64) {
    if sigma == 0.0 {
        return (del / 3.0, del / 6.0);
    }
    let sigdel = sigma * del;
    if sigdel < SINH_SERIES_LIMIT {
        let sm = sinhm(sigdel);
        let cm = coshm(sigdel);
        let denom = sigma * sigdel * (1.0 + sm);
        ((cm - sm) / denom, sm / denom)
    } else {
        // coth(x) - 1/x and 1/x - csch(x), both bounded for large x
        let diag = (1.0 / sigdel.tanh() - 1.0 / sigdel) / sigma;
        let csch = if sigdel > SINH_OVERFLOW_LIMIT {
            0.0
        } else {
            1.0 / sigdel.sinh()
        };
        (diag, (1.0 / sigdel - csch) / sigma)
    }
}

/// `sinh(x)/x - 1`
fn sinhm(x: f64) -> f64 {
    if x.abs() < SINH_SERIES_LIMIT {
        let x2 = x * x;
        x2 / 6.0 * (1.0 + x2 / 20.0 * (1.0 + x2 / 42.0 * (1.0 + x2 / 72.0 * (1.0 + x2 / 110.0))))
    } else {
        x.sinh() / x - 1.0
    }
}

/// `cosh(x) - 1`
fn coshm(x: f64) -> f64 {
    let s = (0.5 * x).sinh();
    2.0 * s * s
}

/// `sinh(a)/sinh(b)` for `0 <= a <= b`, safe for large `b`
fn sinh_ratio(a: f64, b: f64) -> f64 {
    if b < SINH_OVERFLOW_LIMIT {
        a.sinh() / b.sinh()
    } else {
        (a - b).exp() * (1.0 - (-2.0 * a).exp()) / (1.0 - (-2.0 * b).exp())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linear_data_is_reproduced() {
        let x = [0.0, 1.0, 3.0, 4.0, 7.0];
        let y: Vec<f64> = x.iter().map(|v| 2.0 * v - 1.0).collect();
        for tension in [0.0, 0.3, 1000.0] {
            let out = interpolate(&x, &y, tension, 1.0, &[0.5, 2.0, 5.5]).unwrap();
            assert_relative_eq!(out[0], 0.0, epsilon = 1e-10);
            assert_relative_eq!(out[1], 3.0, epsilon = 1e-10);
            assert_relative_eq!(out[2], 10.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_passes_through_knots() {
        let x = [1.0, 2.0, 4.0, 8.0, 16.0];
        let y = [0.3, -1.2, 2.5, 0.0, 4.0];
        for tension in [0.0, 0.1, 5.0, 1000.0] {
            let out = interpolate(&x, &y, tension, 1.0, &x).unwrap();
            for (a, b) in out.iter().zip(y.iter()) {
                assert_relative_eq!(*a, *b, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_zero_tension_reproduces_quadratic() {
        let x = [0.0, 1.0, 2.0, 3.0];
        let y = [0.0, 1.0, 4.0, 9.0];
        let out = interpolate(&x, &y, 0.0, 1.0, &[0.5, 1.5, 2.5]).unwrap();
        assert_relative_eq!(out[0], 0.25, epsilon = 1e-10);
        assert_relative_eq!(out[1], 2.25, epsilon = 1e-10);
        assert_relative_eq!(out[2], 6.25, epsilon = 1e-10);
    }

    #[test]
    fn test_high_tension_approaches_chord() {
        let x = [0.0, 1.0, 2.0, 3.0];
        let y = [0.0, 1.0, 4.0, 9.0];
        let out = interpolate(&x, &y, 1000.0, 1.0, &[1.5]).unwrap();
        assert!((out[0] - 2.5).abs() < 1e-2);
        assert!(out[0] <= 2.5);
    }

    #[test]
    fn test_small_tension_matches_cubic() {
        let x = [0.0, 1.0, 2.5, 3.0, 5.0];
        let y = [1.0, 0.0, 2.0, -1.0, 0.5];
        let cubic = interpolate(&x, &y, 0.0, 0.0, &[0.7, 2.7, 4.1]).unwrap();
        let tensioned = interpolate(&x, &y, 1e-4, 0.0, &[0.7, 2.7, 4.1]).unwrap();
        for (a, b) in cubic.iter().zip(tensioned.iter()) {
            assert_relative_eq!(*a, *b, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_descending_abscissa_is_reversed() {
        let x = [0.0, 1.0, 2.0, 3.0];
        let y = [0.0, 1.0, 4.0, 9.0];
        let xr: Vec<f64> = x.iter().rev().copied().collect();
        let yr: Vec<f64> = y.iter().rev().copied().collect();
        let fwd = interpolate(&x, &y, 2.0, 1.0, &[0.4, 2.2]).unwrap();
        let rev = interpolate(&xr, &yr, 2.0, 1.0, &[0.4, 2.2]).unwrap();
        assert_relative_eq!(fwd[0], rev[0], epsilon = 1e-12);
        assert_relative_eq!(fwd[1], rev[1], epsilon = 1e-12);
    }

    #[test]
    fn test_two_points_is_linear() {
        let out = interpolate(&[1.0, 3.0], &[10.0, 20.0], 1000.0, 1.0, &[2.0]).unwrap();
        assert_relative_eq!(out[0], 15.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rejects_unusable_input() {
        assert_eq!(
            TensionSpline::fit(&[1.0], &[1.0], 0.0, 1.0).unwrap_err(),
            SplineError::TooFewPoints(1)
        );
        assert_eq!(
            TensionSpline::fit(&[1.0, 2.0], &[1.0], 0.0, 1.0).unwrap_err(),
            SplineError::LengthMismatch { x_len: 2, y_len: 1 }
        );
        assert_eq!(
            TensionSpline::fit(&[1.0, 3.0, 2.0, 4.0], &[0.0; 4], 0.0, 1.0).unwrap_err(),
            SplineError::NotMonotonic(2)
        );
        assert_eq!(
            TensionSpline::fit(&[1.0, f64::NAN], &[0.0; 2], 0.0, 1.0).unwrap_err(),
            SplineError::NonFinite(1)
        );
    }

    #[test]
    fn test_hyperbolic_helpers() {
        for x in [0.01, 0.49, 0.51, 3.0] {
            assert_relative_eq!(sinhm(x), x.sinh() / x - 1.0, max_relative = 1e-10);
            assert_relative_eq!(coshm(x), x.cosh() - 1.0, max_relative = 1e-10);
        }
        assert_relative_eq!(sinh_ratio(1.0, 2.0), 1f64.sinh() / 2f64.sinh(), epsilon = 1e-14);
        assert!(sinh_ratio(900.0, 1000.0).is_finite());
    }
}
