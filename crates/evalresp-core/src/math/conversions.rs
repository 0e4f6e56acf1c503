//! Complex value conversions
//!
//! Helpers shared by the filter evaluators and the spectrum calculator.

use num_complex::Complex64;

use crate::constants::PHASE_EPSILON;

/// Complex multiplicative identity
pub const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// Convert complex number to phase in degrees
///
/// A tiny offset is added to the real part so `(0, 0)` maps to 0 degrees.
#[inline]
pub fn complex_2_degree(z: Complex64) -> f64 {
    z.im.atan2(z.re + PHASE_EPSILON).to_degrees()
}

/// Convert (magnitude, degree) to complex
#[inline]
pub fn magdeg_2_reim(mag: f64, deg: f64) -> Complex64 {
    Complex64::from_polar(mag, deg.to_radians())
}

/// Phase rotation `exp(j*w*delay)` for a time shift of `delay` seconds
#[inline]
pub fn time_shift(w: f64, delay: f64) -> Complex64 {
    Complex64::from_polar(1.0, w * delay)
}

/// Trigonometric sum `sum_i c_i * exp(sign * j * i * wsint)` as (modulus, phase)
pub fn trig_sum<I>(coefficients: I, wsint: f64, sign: f64) -> (f64, f64)
where
    I: IntoIterator<Item = f64>,
{
    let acc = coefficients
        .into_iter()
        .enumerate()
        .fold(Complex64::new(0.0, 0.0), |acc, (i, c)| {
            let arg = sign * i as f64 * wsint;
            acc + Complex64::new(c * arg.cos(), c * arg.sin())
        });
    (acc.norm(), acc.im.atan2(acc.re))
}
