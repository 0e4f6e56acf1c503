//! Gain and sensitivity normalisation
//!
//! Chooses a reference frequency and brings every selected stage's gain and
//! normalisation factor to it. The descriptor is left untouched; the result
//! is a separate [`NormalizationTable`].

use std::ops::RangeInclusive;

use tracing::{debug, warn};

use crate::error::NormalizationError;
use crate::filters::{self, classify_fir, fir_sum_deviation, EvalContext, FirSymmetry};
use crate::response::{Filter, Gain, ResponseDescriptor, Stage, TransferType};

/// Normalisation data for one stage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageNormalization {
    /// Stage position, 1-based
    pub stage: usize,
    /// Gain after synthesis and rescaling
    pub gain: Gain,
    /// Normalisation factor to evaluate the filter with
    pub a0: f64,
    pub a0_frequency: f64,
    /// Gain factor, or 1 for polynomial stages
    pub sensitivity: f64,
}

/// Per-stage sensitivities referred to a common frequency
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizationTable {
    reference_frequency: f64,
    first: usize,
    stages: Vec<StageNormalization>,
    combined: f64,
    overall: Option<Gain>,
    notes: Vec<String>,
}

impl NormalizationTable {
    /// Frequency every gain was referred to, in Hz
    #[inline]
    pub fn reference_frequency(&self) -> f64 {
        self.reference_frequency
    }

    /// Product of the selected stage sensitivities
    #[inline]
    pub fn sensitivity(&self) -> f64 {
        self.combined
    }

    /// Entry for a 1-based stage number, if it was in range
    pub fn stage(&self, number: usize) -> Option<&StageNormalization> {
        number
            .checked_sub(self.first + 1)
            .and_then(|i| self.stages.get(i))
    }

    /// Entries for the selected stages, in order
    #[inline]
    pub fn stages(&self) -> &[StageNormalization] {
        &self.stages
    }

    /// Sensitivities with the combined value at index 0 followed by each
    /// selected stage
    pub fn sensitivities(&self) -> Vec<f64> {
        std::iter::once(self.combined)
            .chain(self.stages.iter().map(|s| s.sensitivity))
            .collect()
    }

    /// Selected stages as a 0-based inclusive range
    pub fn stage_range(&self) -> RangeInclusive<usize> {
        self.first..=self.first + self.stages.len() - 1
    }

    /// Overall sensitivity synthesised for a fully processed single stage
    #[inline]
    pub fn overall_sensitivity(&self) -> Option<Gain> {
        self.overall
    }

    #[inline]
    pub fn notes(&self) -> &[String] {
        &self.notes
    }
}

/// Normalise the stages selected by `start_stage..=stop_stage`
///
/// Stage bounds are 1-based and inclusive; 0 selects from the first or up to
/// the last stage.
///
/// # Arguments
/// * `descriptor` - Response to normalise
/// * `start_stage` - First stage, 1-based (0 for the first)
/// * `stop_stage` - Last stage, 1-based (0 for the last)
pub fn normalize(
    descriptor: &ResponseDescriptor,
    start_stage: u32,
    stop_stage: u32,
) -> Result<NormalizationTable, NormalizationError> {
    let range = resolve_stage_range(start_stage, stop_stage, descriptor.nstages())?;
    let reference_frequency = reference_frequency(descriptor);

    let mut notes = Vec::new();
    let stages = range
        .clone()
        .map(|idx| normalize_stage(descriptor, idx, reference_frequency, &mut notes))
        .collect::<Result<Vec<_>, _>>()?;

    let combined: f64 = stages.iter().map(|s| s.sensitivity).product();
    let overall = (descriptor.nstages() == 1).then(|| Gain::new(combined, reference_frequency));

    debug!(
        reference_frequency,
        first = range.start() + 1,
        last = range.end() + 1,
        sensitivity = combined,
        "response normalized"
    );

    Ok(NormalizationTable {
        reference_frequency,
        first: *range.start(),
        stages,
        combined,
        overall,
        notes,
    })
}

/// Resolve 1-based stage bounds into a 0-based inclusive range
pub fn resolve_stage_range(
    start: u32,
    stop: u32,
    nstages: usize,
) -> Result<RangeInclusive<usize>, NormalizationError> {
    let out_of_range = NormalizationError::StageOutOfRange {
        start,
        stop,
        nstages,
    };
    if nstages == 0 {
        return Err(out_of_range);
    }

    let last = nstages - 1;
    let first = start.saturating_sub(1) as usize;
    let end = if stop > start {
        (stop as usize - 1).min(last)
    } else if stop == 0 {
        last
    } else {
        first
    };

    if first > last {
        return Err(out_of_range);
    }
    Ok(first..=end)
}

/// The overall sensitivity frequency, or else the last non-zero stage gain
/// frequency
pub fn reference_frequency(descriptor: &ResponseDescriptor) -> f64 {
    if let Some(sensitivity) = descriptor.valid_sensitivity() {
        return sensitivity.frequency;
    }
    descriptor
        .stages
        .iter()
        .rev()
        .filter_map(Stage::valid_gain)
        .map(|g| g.frequency)
        .find(|&f| f != 0.0)
        .unwrap_or(0.0)
}

fn normalize_stage(
    descriptor: &ResponseDescriptor,
    idx: usize,
    reference_frequency: f64,
    notes: &mut Vec<String>,
) -> Result<StageNormalization, NormalizationError> {
    let stage = &descriptor.stages[idx];
    let number = idx + 1;

    let gain = match stage.valid_gain() {
        Some(gain) => Some(gain),
        None if descriptor.nstages() == 1 || stage.is_polynomial() => {
            descriptor.valid_sensitivity()
        }
        None => None,
    };

    if stage.is_polynomial() {
        return Ok(StageNormalization {
            stage: number,
            gain: gain.unwrap_or(Gain::new(1.0, reference_frequency)),
            a0: 1.0,
            a0_frequency: reference_frequency,
            sensitivity: 1.0,
        });
    }

    let mut gain = gain.ok_or(NormalizationError::MissingGain { stage: number })?;
    let mut a0 = stage.normalization.map_or(1.0, |n| n.factor);
    let mut a0_frequency = stage.normalization.map_or(gain.frequency, |n| n.frequency);

    let rescalable = match &stage.filter {
        None | Some(Filter::ResponseList(_)) | Some(Filter::Polynomial(_)) => false,
        Some(Filter::PoleZero(pz)) => {
            if stage.normalization.is_none() {
                return Err(NormalizationError::MissingNormalization { stage: number });
            }
            if stage.transfer_type == TransferType::Digital {
                if stage.decimation.is_none() {
                    return Err(NormalizationError::MissingDecimation { stage: number });
                }
                !(pz.poles.is_empty() && pz.zeros.is_empty())
            } else {
                true
            }
        }
        Some(Filter::Coefficients(c)) => {
            if stage.decimation.is_none() {
                return Err(NormalizationError::MissingDecimation { stage: number });
            }
            if c.is_fir() && classify_fir(&c.numerator) == FirSymmetry::Asym {
                if let Some(sum) = fir_sum_deviation(&c.numerator) {
                    let note = format!(
                        "stage {number}: FIR coefficients summed to {sum}, normalized to 1.0"
                    );
                    warn!("{}", note);
                    notes.push(note);
                    a0 /= sum;
                }
            }
            !c.is_empty()
        }
    };

    if rescalable && (gain.frequency != reference_frequency || a0_frequency != reference_frequency)
    {
        let magnitude = |freq: f64| {
            filters::evaluate(stage, 1.0, freq, &EvalContext::default())
                .map(|h| h.norm())
                .map_err(|source| NormalizationError::Filter {
                    stage: number,
                    source,
                })
        };
        let at_gain = magnitude(gain.frequency)?;
        let at_reference = magnitude(reference_frequency)?;
        if at_gain == 0.0 || at_reference == 0.0 {
            let frequency = if at_reference == 0.0 {
                reference_frequency
            } else {
                gain.frequency
            };
            return Err(NormalizationError::ZeroResponse {
                stage: number,
                frequency,
            });
        }

        gain = Gain::new(gain.factor / at_gain * at_reference, reference_frequency);
        a0 = 1.0 / at_reference;
        a0_frequency = reference_frequency;
    }

    Ok(StageNormalization {
        stage: number,
        gain,
        a0,
        a0_frequency,
        sensitivity: gain.factor,
    })
}
