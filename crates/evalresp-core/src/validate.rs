//! Stage-graph validation
//!
//! Structural and semantic checks run before any numeric work. The first
//! violation found is reported; nothing is modified.

use tracing::debug;

use crate::error::ValidationError;
use crate::frequency::FrequencyUnit;
use crate::response::{Filter, PhaseUnit, ResponseDescriptor, Stage, TransferType};

/// Validate a response descriptor
///
/// # Arguments
/// * `descriptor` - Response to check
/// * `skip_units` - Disable the stage-to-stage unit continuity check
///
/// # Example
/// ```
/// use evalresp_core::response::{ResponseDescriptor, Stage, TransferType, Unit, UnitKind};
/// use evalresp_core::validate;
///
/// let stage = Stage::new(
///     1,
///     TransferType::Analog,
///     Unit::si(UnitKind::Velocity),
///     Unit::si(UnitKind::Volts),
/// )
/// .with_gain(1500.0, 1.0);
/// assert!(validate(&ResponseDescriptor::new(vec![stage]), false).is_ok());
/// ```
pub fn validate(descriptor: &ResponseDescriptor, skip_units: bool) -> Result<(), ValidationError> {
    let stages = &descriptor.stages;
    if stages.is_empty() {
        return Err(ValidationError::NoStages);
    }

    let nstages = stages.len();
    let mut polynomial_seen = false;
    let mut prev: Option<&Stage> = None;

    for (idx, stage) in stages.iter().enumerate() {
        let number = idx + 1;
        if stage.is_empty() {
            return Err(ValidationError::EmptyStage { stage: number });
        }

        polynomial_seen |= stage.is_polynomial();
        if !skip_units && !polynomial_seen {
            if let Some(prev) = prev.filter(|p| p.output_units != stage.input_units) {
                return Err(ValidationError::UnitMismatch {
                    stage: number,
                    expected: prev.output_units,
                    found: stage.input_units,
                });
            }
        }

        match &stage.filter {
            None if stage.valid_gain().is_none() => {
                return Err(ValidationError::MissingFilterOrGain { stage: number });
            }
            None => {}
            Some(filter) => check_filter(number, nstages, stage, filter)?,
        }

        if nstages > 1 && !stage.is_polynomial() && stage.valid_gain().is_none() {
            return Err(ValidationError::MissingStageGain { stage: number });
        }

        prev = Some(stage);
    }

    if nstages == 1
        && !polynomial_seen
        && descriptor.valid_sensitivity().is_none()
        && stages[0].valid_gain().is_none()
    {
        return Err(ValidationError::MissingSensitivity { stage: 1 });
    }

    debug!(nstages, skip_units, "response validated");
    Ok(())
}

/// Filter-type specific rules
fn check_filter(
    number: usize,
    nstages: usize,
    stage: &Stage,
    filter: &Filter,
) -> Result<(), ValidationError> {
    match filter {
        Filter::PoleZero(_) => {
            if stage.normalization.is_none() {
                return Err(ValidationError::MissingNormalization { stage: number });
            }
            match stage.transfer_type {
                TransferType::Laplace | TransferType::Analog => Ok(()),
                TransferType::Digital => require_decimation(number, stage),
                other => Err(ValidationError::InvalidTransferType {
                    stage: number,
                    transfer_type: other,
                }),
            }
        }
        // Coefficient taps are always evaluated against a sample interval
        Filter::Coefficients(_) => require_decimation(number, stage),
        Filter::ResponseList(list) => {
            if nstages != 1 {
                return Err(ValidationError::ListNotSole { stage: number });
            }
            if stage.normalization.is_some() {
                return Err(ValidationError::ListWithNormalization { stage: number });
            }
            if list.frequency_unit != FrequencyUnit::Hz {
                return Err(ValidationError::ListFrequencyUnit {
                    stage: number,
                    unit: list.frequency_unit,
                });
            }
            match list.phase_unit {
                PhaseUnit::Degrees | PhaseUnit::Radians => Ok(()),
                unit => Err(ValidationError::ListPhaseUnit {
                    stage: number,
                    unit,
                }),
            }
        }
        Filter::Polynomial(_) => Ok(()),
    }
}

fn require_decimation(number: usize, stage: &Stage) -> Result<(), ValidationError> {
    match stage.decimation {
        Some(_) => Ok(()),
        None => Err(ValidationError::MissingDecimation { stage: number }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::{
        Coefficient, Coefficients, Decimation, PoleZero, Polynomial, Unit, UnitKind,
    };
    use num_complex::Complex64;

    fn vel() -> Unit {
        Unit::si(UnitKind::Velocity)
    }

    fn volts() -> Unit {
        Unit::si(UnitKind::Volts)
    }

    fn seismometer(number: u32) -> Stage {
        Stage::new(number, TransferType::Laplace, vel(), volts())
            .with_filter(PoleZero {
                poles: vec![Complex64::new(-0.037, 0.037), Complex64::new(-0.037, -0.037)],
                zeros: vec![Complex64::new(0.0, 0.0); 2],
            })
            .with_normalization(1.0, 1.0)
            .with_gain(1500.0, 1.0)
    }

    #[test]
    fn test_unit_mismatch() {
        let second = Stage::new(2, TransferType::Analog, vel(), volts()).with_gain(2.0, 1.0);
        let resp = ResponseDescriptor::new(vec![seismometer(1), second]);
        assert_eq!(
            validate(&resp, false).unwrap_err(),
            ValidationError::UnitMismatch {
                stage: 2,
                expected: volts(),
                found: vel(),
            }
        );
        assert!(validate(&resp, true).is_ok());
    }

    #[test]
    fn test_polynomial_disables_unit_check() {
        let poly = Stage::new(1, TransferType::Analog, Unit::si(UnitKind::Temperature), volts())
            .with_filter(Polynomial {
                coefficients: vec![Coefficient::from(0.0), Coefficient::from(2.0)],
            });
        let adc = Stage::new(2, TransferType::Digital, vel(), Unit::si(UnitKind::Counts))
            .with_gain(1e6, 0.0);
        let resp = ResponseDescriptor::new(vec![poly, adc]);
        assert!(validate(&resp, false).is_ok());
    }

    #[test]
    fn test_empty_stage() {
        let empty = Stage::new(2, TransferType::Analog, volts(), volts());
        let resp = ResponseDescriptor::new(vec![seismometer(1), empty]);
        assert_eq!(
            validate(&resp, false).unwrap_err(),
            ValidationError::EmptyStage { stage: 2 }
        );
        assert_eq!(
            validate(&ResponseDescriptor::default(), false).unwrap_err(),
            ValidationError::NoStages
        );
    }

    #[test]
    fn test_filterless_stage_needs_gain() {
        let stage = Stage::new(1, TransferType::Analog, vel(), volts())
            .with_gain(-1.0, -1.0)
            .with_decimation(Decimation::new(100.0, 1));
        let resp = ResponseDescriptor::new(vec![stage]);
        assert_eq!(
            validate(&resp, false).unwrap_err(),
            ValidationError::MissingFilterOrGain { stage: 1 }
        );
    }

    #[test]
    fn test_composite_pole_zero() {
        let mut stage = seismometer(1);
        stage.transfer_type = TransferType::Composite;
        let resp = ResponseDescriptor::new(vec![stage]);
        assert_eq!(
            validate(&resp, false).unwrap_err(),
            ValidationError::InvalidTransferType {
                stage: 1,
                transfer_type: TransferType::Composite,
            }
        );
    }

    #[test]
    fn test_digital_pole_zero_needs_decimation() {
        let mut stage = seismometer(1);
        stage.transfer_type = TransferType::Digital;
        let resp = ResponseDescriptor::new(vec![stage.clone()]);
        assert_eq!(
            validate(&resp, false).unwrap_err(),
            ValidationError::MissingDecimation { stage: 1 }
        );

        stage.decimation = Some(Decimation::new(40.0, 1));
        assert!(validate(&ResponseDescriptor::new(vec![stage]), false).is_ok());
    }

    #[test]
    fn test_single_stage_needs_some_sensitivity() {
        let mut stage = seismometer(1);
        stage.gain = None;
        let resp = ResponseDescriptor::new(vec![stage]);
        assert_eq!(
            validate(&resp, false).unwrap_err(),
            ValidationError::MissingSensitivity { stage: 1 }
        );
        assert!(validate(&resp.with_sensitivity(1500.0, 1.0), false).is_ok());
    }

    #[test]
    fn test_coefficients_need_decimation_for_any_transfer_type() {
        let stage = Stage::new(1, TransferType::Analog, vel(), volts())
            .with_filter(Coefficients::iir(
                vec![Coefficient::from(1.0)],
                vec![Coefficient::from(1.0), Coefficient::from(-0.5)],
            ))
            .with_gain(1.0, 0.0);
        let resp = ResponseDescriptor::new(vec![stage.clone()]);
        assert_eq!(
            validate(&resp, false).unwrap_err(),
            ValidationError::MissingDecimation { stage: 1 }
        );

        let resp = ResponseDescriptor::new(vec![stage.with_decimation(Decimation::new(100.0, 1))]);
        assert!(validate(&resp, false).is_ok());
    }
}
