//! Calculate module - complex spectrum of a stage cascade
//!
//! [`calculate`] validates and normalises a response, evaluates every
//! selected stage at every frequency and scales the product into the
//! requested output units.

mod list;
mod options;
mod result;
mod units;

pub use list::{clip_frequencies, ClippedFrequencies};
pub use options::CalcOptions;
pub use result::{CalculationResult, DelaySummary, StageSummary};
pub use units::{conversion_steps, convert_units};

use std::f64::consts::TAU;
use std::sync::OnceLock;

use ndarray::{Array1, Array2};
use tracing::{debug, warn};

use crate::error::CalcError;
use crate::filters::{self, EvalContext, FirDelay};
use crate::math::{conversions::ONE, wrap_phase};
use crate::normalize::normalize;
use crate::response::{ResponseDescriptor, UnitConv};
use crate::validate::validate;

/// Evaluate a response over a set of frequencies
///
/// A response list leading the cascade replaces `freqs` with its own grid
/// unless list interpolation is requested.
///
/// # Arguments
/// * `descriptor` - Response to evaluate
/// * `freqs` - Frequencies in Hz
/// * `output_unit` - Quantity the response should be expressed per
/// * `start_stage` - First stage, 1-based (0 for the first)
/// * `stop_stage` - Last stage, 1-based (0 for the last)
/// * `options` - Calculation switches
///
/// # Example
/// ```
/// use evalresp_core::response::{ResponseDescriptor, Stage, TransferType, Unit, UnitKind};
/// use evalresp_core::{calculate, CalcOptions, UnitConv};
///
/// let stage = Stage::new(
///     1,
///     TransferType::Analog,
///     Unit::si(UnitKind::Velocity),
///     Unit::si(UnitKind::Counts),
/// )
/// .with_gain(800.0, 1.0);
/// let resp = ResponseDescriptor::new(vec![stage]);
///
/// let freqs = [0.1, 1.0, 10.0];
/// let result = calculate(&resp, &freqs, UnitConv::Default, 0, 0, CalcOptions::default()).unwrap();
/// assert!(result.amplitude().iter().all(|&a| (a - 800.0).abs() < 1e-9));
/// ```
pub fn calculate(
    descriptor: &ResponseDescriptor,
    freqs: &[f64],
    output_unit: UnitConv,
    start_stage: u32,
    stop_stage: u32,
    options: CalcOptions,
) -> Result<CalculationResult, CalcError> {
    validate(descriptor, options.skip_unit_check)?;
    let table = normalize(descriptor, start_stage, stop_stage)?;
    let mut notes = table.notes().to_vec();

    let first_unit = descriptor.stages[0].input_units;
    let last_unit = descriptor.stages[descriptor.nstages() - 1].output_units;

    let steps = conversion_steps(first_unit.kind, output_unit)?;
    let pass_through = first_unit.kind.is_non_motion_sensor();
    if steps.is_none() && output_unit != UnitConv::Default && !pass_through {
        let note = format!(
            "no conversion from {} to {:?}, response left in input units",
            first_unit, output_unit
        );
        warn!("{}", note);
        notes.push(note);
    }

    let list_grid = descriptor
        .leading_response_list()
        .map(|l| list::prepare(l, freqs, &options, &mut notes))
        .transpose()?;
    let grid: &[f64] = list_grid.as_ref().map_or(freqs, |g| g.frequencies.as_slice());

    let sensitivity = if options.use_total_sensitivity {
        descriptor
            .valid_sensitivity()
            .or(table.overall_sensitivity())
            .map_or(table.sensitivity(), |g| g.factor)
    } else {
        table.sensitivity()
    };
    let unit_scale = first_unit.scale_factor();
    let scale = sensitivity * unit_scale;

    let fir_delay = if options.use_estimated_delay {
        FirDelay::Estimated
    } else {
        FirDelay::CorrectionApplied
    };

    let entries = table.stages();
    let mut combined = Array1::from_elem(grid.len(), ONE);
    let mut stages = Array2::from_elem((entries.len(), grid.len()), ONE);

    for (i, &freq) in grid.iter().enumerate() {
        let ctx = EvalContext {
            fir_delay: Some(fir_delay),
            list_point: list_grid.as_ref().and_then(|g| g.point(i)),
            polynomial_sample: options.polynomial_sample_value,
        };

        let mut product = ONE;
        for (j, entry) in entries.iter().enumerate() {
            let stage = &descriptor.stages[entry.stage - 1];
            let h = filters::evaluate(stage, entry.a0, freq, &ctx).map_err(|source| {
                CalcError::Filter {
                    stage: entry.stage,
                    source,
                }
            })?;
            stages[[j, i]] = h * (entry.sensitivity * unit_scale);
            product *= h;
        }

        let value = product * scale;
        combined[i] = match steps {
            Some(steps) => convert_units(value, TAU * freq, steps),
            None => value,
        };
    }

    let mut frequencies = Array1::from_vec(grid.to_vec());
    let mut amplitude = OnceLock::new();
    let mut phase = OnceLock::new();

    if let Some(targets) = list_grid.as_ref().and_then(|g| g.output.as_deref()) {
        let (values, amp, unwrapped) =
            list::resample_spectrum(grid, &combined.to_vec(), targets, &options)?;

        let mut resampled = Array2::from_elem((entries.len(), targets.len()), ONE);
        for (j, row) in stages.rows().into_iter().enumerate() {
            let (row_values, _, _) =
                list::resample_spectrum(grid, &row.to_vec(), targets, &options)?;
            resampled.row_mut(j).assign(&Array1::from_vec(row_values));
        }

        let phase_values = if options.unwrap_phase {
            unwrapped
        } else {
            wrap_phase(&unwrapped).into_owned()
        };
        amplitude = OnceLock::from(Array1::from_vec(amp));
        phase = OnceLock::from(Array1::from_vec(phase_values));
        combined = Array1::from_vec(values);
        stages = resampled;
        frequencies = Array1::from_vec(targets.to_vec());
    }

    let delays = DelaySummary::from_descriptor(descriptor);
    let echo = if options.show_input_echo {
        table
            .stage_range()
            .map(|idx| StageSummary::new(idx + 1, &descriptor.stages[idx]))
            .collect()
    } else {
        Vec::new()
    };

    debug!(
        nfreq = frequencies.len(),
        nstages = entries.len(),
        sensitivity,
        reference_frequency = table.reference_frequency(),
        output_unit = ?output_unit,
        "response calculated"
    );

    Ok(CalculationResult {
        frequencies,
        combined,
        stages,
        stage_range: table.stage_range(),
        sensitivity,
        reference_frequency: table.reference_frequency(),
        output_unit,
        first_unit,
        last_unit,
        delays,
        notes,
        echo,
        unwrap: options.unwrap_phase,
        amplitude,
        phase,
    })
}
