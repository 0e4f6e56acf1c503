//! Filters module - per-stage complex evaluation
//!
//! Each filter family has a pure evaluator; [`evaluate`] dispatches on the
//! stage's filter and transfer type.

mod coefficients;
mod list;
mod pole_zero;
mod polynomial;

pub use coefficients::{classify_fir, fir_response, fir_sum_deviation, iir_response, FirSymmetry};
pub use list::{check_list, list_response, ListPoint};
pub use pole_zero::{analog_response, digital_response};
pub use polynomial::polynomial_response;

use num_complex::Complex64;
use std::f64::consts::TAU;

use crate::error::FilterError;
use crate::math::conversions::{time_shift, ONE};
use crate::response::{Filter, Stage, TransferType};

/// Delay correction applied to asymmetric FIR stages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirDelay {
    /// Rotate by the decimation's estimated delay
    Estimated,
    /// Rotate by the applied correction less the (N-1)/2 group delay
    CorrectionApplied,
}

/// Per-evaluation inputs beyond the stage itself
#[derive(Debug, Clone, Copy, Default)]
pub struct EvalContext {
    /// `None` during normalisation, where no delay correction is applied
    pub fir_delay: Option<FirDelay>,
    /// Table entry for the current frequency of a response-list stage
    pub list_point: Option<ListPoint>,
    pub polynomial_sample: Option<f64>,
}

/// Evaluate one stage at one frequency
///
/// A stage without a filter (or with an empty coefficient set) is a pure
/// gain and evaluates to 1.
///
/// # Arguments
/// * `stage` - Stage to evaluate
/// * `a0` - Effective normalisation factor for the stage
/// * `freq` - Frequency in Hz
/// * `ctx` - Delay mode, list entry and polynomial sample
pub fn evaluate(
    stage: &Stage,
    a0: f64,
    freq: f64,
    ctx: &EvalContext,
) -> Result<Complex64, FilterError> {
    let Some(filter) = &stage.filter else {
        return Ok(ONE);
    };
    let w = TAU * freq;

    match filter {
        Filter::PoleZero(pz) => match stage.transfer_type {
            TransferType::Laplace | TransferType::Analog => {
                Ok(analog_response(pz, a0, stage.transfer_type, freq))
            }
            TransferType::Digital => {
                let dt = sample_interval(stage)?;
                Ok(digital_response(pz, a0, w * dt))
            }
            TransferType::Composite => Err(FilterError::InvalidTransferType(stage.transfer_type)),
        },
        Filter::Coefficients(c) if c.is_empty() => Ok(ONE),
        Filter::Coefficients(c) => {
            let dt = sample_interval(stage)?;
            if !c.is_fir() {
                return Ok(iir_response(c, a0, w * dt));
            }

            let value = fir_response(&c.numerator, a0, w, dt);
            if classify_fir(&c.numerator) != FirSymmetry::Asym {
                return Ok(value);
            }
            let Some(decimation) = stage.decimation else {
                return Err(FilterError::MissingDecimation);
            };
            let shift = match ctx.fir_delay {
                None => return Ok(value),
                Some(FirDelay::Estimated) => decimation.estimated_delay,
                Some(FirDelay::CorrectionApplied) => {
                    let group_delay = (c.numerator.len() - 1) as f64 / 2.0 * dt;
                    decimation.correction_applied - group_delay
                }
            };
            Ok(value * time_shift(w, shift))
        }
        Filter::ResponseList(list) => {
            check_list(list)?;
            let point = ctx
                .list_point
                .ok_or_else(|| FilterError::InvalidList("no table entry for frequency".into()))?;
            Ok(list_response(point))
        }
        Filter::Polynomial(poly) => polynomial_response(poly, ctx.polynomial_sample),
    }
}

/// Sample interval of the stage's decimation
fn sample_interval(stage: &Stage) -> Result<f64, FilterError> {
    stage
        .decimation
        .map(|d| d.sample_interval())
        .ok_or(FilterError::MissingDecimation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::{Coefficient, Coefficients, Decimation, PoleZero, Unit, UnitKind};
    use approx::assert_relative_eq;

    fn counts() -> Unit {
        Unit::si(UnitKind::Counts)
    }

    fn asym_fir_stage() -> Stage {
        let taps = [0.6, 0.3, 0.1].iter().map(|&v| Coefficient::from(v)).collect();
        Stage::new(1, TransferType::Digital, counts(), counts())
            .with_filter(Coefficients::fir(taps))
            .with_decimation(Decimation::new(100.0, 1).with_delay(0.05, 0.02))
    }

    #[test]
    fn test_gain_only_stage_is_unity() {
        let stage = Stage::new(1, TransferType::Analog, counts(), counts()).with_gain(4.0, 1.0);
        let h = evaluate(&stage, 1.0, 3.0, &EvalContext::default()).unwrap();
        assert_eq!(h, ONE);
    }

    #[test]
    fn test_digital_filters_need_decimation() {
        let stage = Stage::new(1, TransferType::Digital, counts(), counts())
            .with_filter(PoleZero::default());
        assert_eq!(
            evaluate(&stage, 1.0, 1.0, &EvalContext::default()).unwrap_err(),
            FilterError::MissingDecimation
        );
    }

    #[test]
    fn test_composite_pole_zero_rejected() {
        let stage = Stage::new(1, TransferType::Composite, counts(), counts())
            .with_filter(PoleZero::default());
        assert_eq!(
            evaluate(&stage, 1.0, 1.0, &EvalContext::default()).unwrap_err(),
            FilterError::InvalidTransferType(TransferType::Composite)
        );
    }

    #[test]
    fn test_fir_delay_modes() {
        let stage = asym_fir_stage();
        let freq = 2.0;
        let w = TAU * freq;
        let plain = evaluate(&stage, 1.0, freq, &EvalContext::default()).unwrap();

        let est = EvalContext {
            fir_delay: Some(FirDelay::Estimated),
            ..Default::default()
        };
        let h = evaluate(&stage, 1.0, freq, &est).unwrap();
        assert_relative_eq!(h.norm(), plain.norm(), epsilon = 1e-12);
        let expected = plain * time_shift(w, 0.05);
        assert_relative_eq!(h.re, expected.re, epsilon = 1e-12);
        assert_relative_eq!(h.im, expected.im, epsilon = 1e-12);

        let corr = EvalContext {
            fir_delay: Some(FirDelay::CorrectionApplied),
            ..Default::default()
        };
        let h = evaluate(&stage, 1.0, freq, &corr).unwrap();
        // (N-1)/2 * dt = 0.01
        let expected = plain * time_shift(w, 0.02 - 0.01);
        assert_relative_eq!(h.re, expected.re, epsilon = 1e-12);
        assert_relative_eq!(h.im, expected.im, epsilon = 1e-12);
    }

    #[test]
    fn test_list_needs_point() {
        let stage = Stage::new(1, TransferType::Analog, counts(), counts()).with_filter(
            crate::response::ResponseList {
                frequency: vec![1.0],
                amplitude: vec![2.0],
                phase: vec![0.0],
                ..Default::default()
            },
        );
        assert!(matches!(
            evaluate(&stage, 1.0, 1.0, &EvalContext::default()),
            Err(FilterError::InvalidList(_))
        ));

        let ctx = EvalContext {
            list_point: Some(ListPoint {
                amplitude: 2.0,
                phase_degrees: 0.0,
            }),
            ..Default::default()
        };
        let h = evaluate(&stage, 1.0, 1.0, &ctx).unwrap();
        assert_relative_eq!(h.re, 2.0);
    }
}
