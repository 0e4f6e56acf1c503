//! Mathematical functions module
//!
//! Complex helpers, phase wrapping and the tension spline used to resample
//! response lists.

pub mod conversions;
pub mod phase;
pub mod spline;

pub use conversions::*;
pub use phase::{unwrap_phase, wrap_phase};
pub use spline::TensionSpline;
