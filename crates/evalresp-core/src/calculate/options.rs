//! Calculation options

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_LIST_TENSION, DEFAULT_SPLINE_SCALE};

/// Switches for a single [`calculate`](super::calculate) call
///
/// Every field has a default, so partial option sets deserialize cleanly:
///
/// ```
/// use evalresp_core::CalcOptions;
///
/// let opts: CalcOptions = serde_json::from_str(r#"{"unwrap_phase": true}"#).unwrap();
/// assert!(opts.unwrap_phase);
/// assert_eq!(opts.list_interp_tension, 1000.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalcOptions {
    /// Rotate asymmetric FIR stages by the estimated delay instead of the
    /// applied correction
    pub use_estimated_delay: bool,
    /// Attach a per-stage summary to the result
    pub show_input_echo: bool,
    /// Resample a response list onto the requested grid before evaluation
    pub list_interp_in: bool,
    /// Resample the computed amplitude and phase onto the requested grid
    pub list_interp_out: bool,
    pub list_interp_tension: f64,
    /// End-condition parameter of the list spline
    pub list_interp_scale: f64,
    pub unwrap_phase: bool,
    /// Scale by the overall sensitivity instead of the product of stage gains
    pub use_total_sensitivity: bool,
    /// Input value at which polynomial stages are linearised
    pub polynomial_sample_value: Option<f64>,
    /// Disable the stage-to-stage unit continuity check
    pub skip_unit_check: bool,
}

impl Default for CalcOptions {
    fn default() -> Self {
        Self {
            use_estimated_delay: false,
            show_input_echo: false,
            list_interp_in: false,
            list_interp_out: false,
            list_interp_tension: DEFAULT_LIST_TENSION,
            list_interp_scale: DEFAULT_SPLINE_SCALE,
            unwrap_phase: false,
            use_total_sensitivity: false,
            polynomial_sample_value: None,
            skip_unit_check: false,
        }
    }
}
