//! Polynomial calibration stages

use num_complex::Complex64;
use std::f64::consts::PI;

use crate::error::FilterError;
use crate::response::Polynomial;

/// Evaluate a polynomial stage at a sample input value
///
/// The amplitude is the first derivative of the MacLaurin series,
/// `sum_{i>=1} c_i * i * x^(i-1)`, with phase 0 for a non-negative
/// derivative and pi otherwise.
pub fn polynomial_response(
    poly: &Polynomial,
    sample: Option<f64>,
) -> Result<Complex64, FilterError> {
    let x = match sample {
        Some(x) if x > 0.0 => x,
        other => return Err(FilterError::NonPositiveSample(other)),
    };

    let amp: f64 = poly
        .coefficients
        .iter()
        .enumerate()
        .skip(1)
        .map(|(i, c)| c.value * i as f64 * x.powi(i as i32 - 1))
        .sum();
    let phase = if amp >= 0.0 { 0.0 } else { PI };

    Ok(Complex64::new(amp * phase.cos(), amp * phase.sin()))
}
