//! Numerical constants for response evaluation
//!
//! Tolerances and defaults shared by the normaliser, the filter evaluators
//! and the spectrum calculator.

/// Maximum relative deviation of an asymmetric FIR coefficient sum from 1.0
/// before the coefficients are renormalised.
pub const FIR_NORM_TOL: f64 = 0.02;

/// Offset added to the real part before `atan2` when deriving phase, so that
/// a (0, 0) response yields a stable phase of zero.
pub const PHASE_EPSILON: f64 = 1e-200;

/// Default tension for response-list spline interpolation.
pub const DEFAULT_LIST_TENSION: f64 = 1000.0;

/// Default spline boundary parameter.
pub const DEFAULT_SPLINE_SCALE: f64 = 1.0;

/// Sentinel factor/frequency pair marking an absent gain or sensitivity.
pub const GAIN_SENTINEL: f64 = -1.0;

/// Series cut-over for the hyperbolic helpers used by the tension spline.
pub const SINH_SERIES_LIMIT: f64 = 0.5;
