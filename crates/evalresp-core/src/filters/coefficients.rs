//! Coefficient (FIR/IIR) transfer functions

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::constants::FIR_NORM_TOL;
use crate::math::conversions::trig_sum;
use crate::response::{Coefficient, Coefficients};

/// Symmetry class of an FIR coefficient array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FirSymmetry {
    /// Odd count, mirrored around a centre tap
    Sym1,
    /// Even count, mirrored in pairs
    Sym2,
    Asym,
}

/// Classify an FIR filter by a palindrome test over (value, error) pairs
pub fn classify_fir(coeffs: &[Coefficient]) -> FirSymmetry {
    let n = coeffs.len();
    let palindrome = (0..n / 2).all(|i| coeffs[i] == coeffs[n - 1 - i]);
    match (palindrome, n % 2) {
        (true, 1) => FirSymmetry::Sym1,
        (true, _) => FirSymmetry::Sym2,
        _ => FirSymmetry::Asym,
    }
}

/// Sum of the coefficient values when it strays from unity by more than
/// the FIR normalisation tolerance
pub fn fir_sum_deviation(coeffs: &[Coefficient]) -> Option<f64> {
    let sum: f64 = coeffs.iter().map(|c| c.value).sum();
    ((sum - 1.0).abs() > FIR_NORM_TOL && sum != 0.0).then_some(sum)
}

/// Evaluate an FIR filter
///
/// Symmetric filters produce a real value. Asymmetric filters carry the
/// phase of the tap sum advanced by `w * (N-1)/2 * dt`.
///
/// # Arguments
/// * `coeffs` - Numerator taps
/// * `a0` - Normalisation factor
/// * `w` - Angular frequency in rad/s
/// * `dt` - Sample interval in seconds
pub fn fir_response(coeffs: &[Coefficient], a0: f64, w: f64, dt: f64) -> Complex64 {
    let wsint = w * dt;
    let n = coeffs.len();

    match classify_fir(coeffs) {
        FirSymmetry::Sym1 => {
            let half = (n + 1) / 2;
            let sum: f64 = coeffs[..half - 1]
                .iter()
                .enumerate()
                .map(|(i, c)| c.value * (wsint * (half - 1 - i) as f64).cos())
                .sum();
            Complex64::new(a0 * (coeffs[half - 1].value + 2.0 * sum), 0.0)
        }
        FirSymmetry::Sym2 => {
            let half = n / 2;
            let sum: f64 = coeffs[..half]
                .iter()
                .enumerate()
                .map(|(i, c)| c.value * (wsint * (half as f64 - i as f64 - 0.5)).cos())
                .sum();
            Complex64::new(a0 * 2.0 * sum, 0.0)
        }
        FirSymmetry::Asym => {
            let first = coeffs[0].value;
            if coeffs.iter().all(|c| c.value == first) {
                let value = if wsint == 0.0 {
                    1.0
                } else {
                    (wsint * n as f64 / 2.0).sin() / (wsint / 2.0).sin() * first
                };
                return Complex64::new(a0 * value, 0.0);
            }

            let acc = coeffs
                .iter()
                .enumerate()
                .fold(Complex64::new(0.0, 0.0), |acc, (i, c)| {
                    let arg = i as f64 * wsint;
                    acc + Complex64::new(c.value * arg.cos(), -c.value * arg.sin())
                });
            let modulus = acc.norm();
            let phase = acc.im.atan2(acc.re) + w * ((n - 1) as f64 / 2.0) * dt;
            Complex64::new(a0 * modulus * phase.cos(), a0 * modulus * phase.sin())
        }
    }
}

/// Evaluate an IIR coefficient filter as a ratio of trigonometric sums
///
/// # Arguments
/// * `c` - Numerator and denominator taps
/// * `a0` - Normalisation factor
/// * `wsint` - Angular frequency times the sample interval
pub fn iir_response(c: &Coefficients, a0: f64, wsint: f64) -> Complex64 {
    let (num_mod, num_pha) = trig_sum(c.numerator.iter().map(|c| c.value), wsint, -1.0);
    let (den_mod, den_pha) = trig_sum(c.denominator.iter().map(|c| c.value), wsint, -1.0);

    let amp = num_mod / den_mod;
    let phase = num_pha - den_pha;
    Complex64::new(a0 * amp * phase.cos(), a0 * amp * phase.sin())
}
