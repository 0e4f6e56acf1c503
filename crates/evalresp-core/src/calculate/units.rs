//! Output unit conversion
//!
//! Responses are expressed per unit of the first stage's input. Moving up the
//! displacement -> velocity -> acceleration chain integrates, moving down
//! differentiates.

use num_complex::Complex64;

use crate::error::CalcError;
use crate::response::{UnitConv, UnitKind};

/// Signed number of rank steps from `input` to `output`
///
/// `None` means no conversion applies. Pressure, magnetic flux density and
/// temperature inputs only accept `Velocity` (treated as pass-through) or
/// `Default`.
pub fn conversion_steps(input: UnitKind, output: UnitConv) -> Result<Option<i32>, CalcError> {
    if input.is_non_motion_sensor() && !matches!(output, UnitConv::Velocity | UnitConv::Default) {
        return Err(CalcError::IncompatibleUnits { input, output });
    }
    Ok(match (input.motion_rank(), output.motion_rank()) {
        (Some(from), Some(to)) => Some(to - from),
        _ => None,
    })
}

/// Apply `steps` conversion steps at angular frequency `w`
///
/// Each upward step multiplies by `-j/w` and yields exactly zero at `w = 0`;
/// each downward step multiplies by `j*w`.
pub fn convert_units(value: Complex64, w: f64, steps: i32) -> Complex64 {
    let factor = if steps > 0 {
        if w == 0.0 {
            return Complex64::new(0.0, 0.0);
        }
        Complex64::new(0.0, -1.0 / w)
    } else {
        Complex64::new(0.0, w)
    };
    (0..steps.unsigned_abs()).fold(value, |acc, _| acc * factor)
}
