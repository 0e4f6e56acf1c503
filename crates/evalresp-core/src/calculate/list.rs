//! Response-list grids and resampling

use num_complex::Complex64;
use tracing::warn;

use super::CalcOptions;
use crate::error::CalcError;
use crate::filters::{check_list, ListPoint};
use crate::math::spline::interpolate;
use crate::math::{complex_2_degree, magdeg_2_reim, unwrap_phase};
use crate::response::ResponseList;

/// Requested frequencies that fall inside a table's range
#[derive(Debug, Clone, PartialEq)]
pub struct ClippedFrequencies {
    pub frequencies: Vec<f64>,
    /// Number of requested frequencies below the table
    pub low: usize,
    /// Number of requested frequencies above the table
    pub high: usize,
}

/// Drop the requested frequencies outside `[min(table), max(table)]`
///
/// Fails when nothing is left.
pub fn clip_frequencies(requested: &[f64], table: &[f64]) -> Result<ClippedFrequencies, CalcError> {
    let min = table.iter().copied().fold(f64::INFINITY, f64::min);
    let max = table.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let low = requested.iter().filter(|&&f| f < min).count();
    let high = requested.iter().filter(|&&f| f > max).count();
    let frequencies: Vec<f64> = requested
        .iter()
        .copied()
        .filter(|&f| f >= min && f <= max)
        .collect();

    if frequencies.is_empty() {
        return Err(CalcError::AllFrequenciesClipped {
            requested: requested.len(),
            min,
            max,
        });
    }
    Ok(ClippedFrequencies {
        frequencies,
        low,
        high,
    })
}

/// Evaluation grid for a response list leading the cascade
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ListGrid {
    /// Frequencies the cascade is evaluated at
    pub frequencies: Vec<f64>,
    /// Table entry for each evaluation frequency
    pub points: Vec<ListPoint>,
    /// Grid the output is resampled onto afterwards
    pub output: Option<Vec<f64>>,
}

impl ListGrid {
    pub fn point(&self, idx: usize) -> Option<ListPoint> {
        self.points.get(idx).copied()
    }
}

/// Build the evaluation grid for `list` given the requested frequencies
///
/// Without interpolation the table's own frequencies are used. Input
/// interpolation takes precedence over output interpolation when both are
/// requested.
pub(crate) fn prepare(
    list: &ResponseList,
    requested: &[f64],
    options: &CalcOptions,
    notes: &mut Vec<String>,
) -> Result<ListGrid, CalcError> {
    check_list(list).map_err(|source| CalcError::Filter { stage: 1, source })?;
    let phase = list.phase_degrees();

    if !options.list_interp_in && !options.list_interp_out {
        let points = list
            .amplitude
            .iter()
            .zip(&phase)
            .map(|(&amplitude, &phase_degrees)| ListPoint {
                amplitude,
                phase_degrees,
            })
            .collect();
        return Ok(ListGrid {
            frequencies: list.frequency.clone(),
            points,
            output: None,
        });
    }

    let clipped = clip_frequencies(requested, &list.frequency)?;
    if clipped.low > 0 || clipped.high > 0 {
        let note = format!(
            "{} frequencies clipped below and {} above the response list range",
            clipped.low, clipped.high
        );
        warn!("{}", note);
        notes.push(note);
    }

    if options.list_interp_out && !options.list_interp_in {
        let points = list
            .amplitude
            .iter()
            .zip(&phase)
            .map(|(&amplitude, &phase_degrees)| ListPoint {
                amplitude,
                phase_degrees,
            })
            .collect();
        return Ok(ListGrid {
            frequencies: list.frequency.clone(),
            points,
            output: Some(clipped.frequencies),
        });
    }

    let targets = &clipped.frequencies;
    let tension = options.list_interp_tension;
    let scale = options.list_interp_scale;
    let amplitude = interpolate(&list.frequency, &list.amplitude, tension, scale, targets)?;
    let phase = interpolate(
        &list.frequency,
        &unwrap_phase(&phase, false),
        tension,
        scale,
        targets,
    )?;

    let points = amplitude
        .into_iter()
        .zip(phase)
        .map(|(amplitude, phase_degrees)| ListPoint {
            amplitude,
            phase_degrees,
        })
        .collect();
    Ok(ListGrid {
        frequencies: clipped.frequencies,
        points,
        output: None,
    })
}

/// Resample a spectrum's amplitude and unwrapped phase onto `targets`
///
/// Returns the rebuilt complex values with the interpolated amplitude and
/// (unwrapped) phase in degrees.
pub(crate) fn resample_spectrum(
    source: &[f64],
    spectrum: &[Complex64],
    targets: &[f64],
    options: &CalcOptions,
) -> Result<(Vec<Complex64>, Vec<f64>, Vec<f64>), CalcError> {
    let amplitude: Vec<f64> = spectrum.iter().map(|z| z.norm()).collect();
    let phase: Vec<f64> = spectrum.iter().map(|&z| complex_2_degree(z)).collect();

    let tension = options.list_interp_tension;
    let scale = options.list_interp_scale;
    let amplitude = interpolate(source, &amplitude, tension, scale, targets)?;
    let phase = interpolate(source, &unwrap_phase(&phase, false), tension, scale, targets)?;

    let values = amplitude
        .iter()
        .zip(&phase)
        .map(|(&mag, &deg)| magdeg_2_reim(mag, deg))
        .collect();
    Ok((values, amplitude, phase))
}
