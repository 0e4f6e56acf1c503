//! Response-list stages

use num_complex::Complex64;

use crate::error::FilterError;
use crate::response::{PhaseUnit, ResponseList};

/// One (amplitude, phase) entry of a response table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListPoint {
    pub amplitude: f64,
    pub phase_degrees: f64,
}

/// Complex value of a table entry
#[inline]
pub fn list_response(point: ListPoint) -> Complex64 {
    Complex64::from_polar(point.amplitude, point.phase_degrees.to_radians())
}

/// Check that the three columns are populated and consistent
pub fn check_list(list: &ResponseList) -> Result<(), FilterError> {
    let n = list.frequency.len();
    if n == 0 {
        return Err(FilterError::InvalidList("table is empty".into()));
    }
    if list.amplitude.len() != n {
        return Err(FilterError::InvalidList(format!(
            "{} amplitudes for {} frequencies",
            list.amplitude.len(),
            n
        )));
    }
    if list.phase.len() != n {
        return Err(FilterError::InvalidList(format!(
            "{} phases for {} frequencies",
            list.phase.len(),
            n
        )));
    }
    match list.phase_unit {
        PhaseUnit::Degrees | PhaseUnit::Radians => Ok(()),
        other => Err(FilterError::InvalidPhaseUnit(other)),
    }
}
