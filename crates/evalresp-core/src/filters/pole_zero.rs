//! Pole-zero transfer functions
//!
//! Analog (Laplace or Hz) and Z-domain evaluation of root-defined filters.

use num_complex::Complex64;
use std::f64::consts::TAU;

use crate::math::ONE;
use crate::response::{PoleZero, TransferType};

/// Evaluate an analog pole-zero filter
///
/// Computes `H(s) = a0 * prod(s - z_i) / prod(s - p_i)` with `s = j*2*pi*f`
/// for Laplace stages and `s = j*f` for analog (Hz) stages.
///
/// # Arguments
/// * `pz` - Poles and zeros
/// * `a0` - Normalisation factor
/// * `transfer_type` - Laplace or Analog
/// * `freq` - Frequency in Hz
pub fn analog_response(
    pz: &PoleZero,
    a0: f64,
    transfer_type: TransferType,
    freq: f64,
) -> Complex64 {
    let w = match transfer_type {
        TransferType::Laplace => TAU * freq,
        _ => freq,
    };
    let s = Complex64::new(0.0, w);

    let mut num = ONE;
    for z in &pz.zeros {
        num *= s - z;
    }
    let mut denom = ONE;
    for p in &pz.poles {
        denom *= s - p;
    }

    let mod_squared = denom.norm_sqr();
    let mut out = num * denom.conj();
    out /= mod_squared;
    out * a0
}

/// Evaluate a Z-domain pole-zero filter
///
/// Roots are measured against `(cos(wsint), sin(wsint))` by subtraction;
/// zeros multiply the modulus and add phase, poles divide and subtract.
///
/// # Arguments
/// * `pz` - Poles and zeros in the Z plane
/// * `a0` - Normalisation factor
/// * `wsint` - Angular frequency times the sample interval
pub fn digital_response(pz: &PoleZero, a0: f64, wsint: f64) -> Complex64 {
    let (c, s) = (wsint.cos(), wsint.sin());
    let mut modulus = 1.0;
    let mut phase = 0.0;

    for z in &pz.zeros {
        let (re, im) = (c - z.re, s - z.im);
        modulus *= (re * re + im * im).sqrt();
        phase += im.atan2(re);
    }
    for p in &pz.poles {
        let (re, im) = (c - p.re, s - p.im);
        modulus /= (re * re + im * im).sqrt();
        phase -= im.atan2(re);
    }

    Complex64::new(a0 * modulus * phase.cos(), a0 * modulus * phase.sin())
}
