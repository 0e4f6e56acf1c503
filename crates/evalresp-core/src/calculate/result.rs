//! Calculation results

use std::ops::RangeInclusive;
use std::sync::OnceLock;

use ndarray::{Array1, Array2, ArrayView1};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::math::{complex_2_degree, unwrap_phase};
use crate::response::{
    Filter, FilterKind, Gain, ResponseDescriptor, Stage, TransferType, Unit, UnitConv,
};

/// Timing derived from the decimation metadata of every stage
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DelaySummary {
    /// Output sample interval of the last decimating stage, in seconds
    pub sample_interval: Option<f64>,
    pub estimated_delay: f64,
    pub correction_applied: f64,
    /// Sum of the (N-1)/2 group delays of all FIR stages
    pub calculated_delay: f64,
}

impl DelaySummary {
    pub fn from_descriptor(descriptor: &ResponseDescriptor) -> Self {
        let mut summary = Self::default();
        for stage in &descriptor.stages {
            let Some(decimation) = stage.decimation else {
                continue;
            };
            summary.sample_interval =
                Some(decimation.sample_interval() * f64::from(decimation.factor));
            summary.estimated_delay += decimation.estimated_delay;
            summary.correction_applied += decimation.correction_applied;

            if let Some(Filter::Coefficients(c)) = &stage.filter {
                if c.is_fir() && !c.is_empty() {
                    let ntaps = c.numerator.len() as f64;
                    summary.calculated_delay += (ntaps - 1.0) / 2.0 * decimation.sample_interval();
                }
            }
        }
        summary
    }
}

/// Echo of one stage's metadata
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StageSummary {
    pub stage: usize,
    pub transfer_type: TransferType,
    pub filter_kind: Option<FilterKind>,
    pub input_units: Unit,
    pub output_units: Unit,
    pub gain: Option<Gain>,
    pub has_decimation: bool,
}

impl StageSummary {
    pub fn new(number: usize, stage: &Stage) -> Self {
        Self {
            stage: number,
            transfer_type: stage.transfer_type,
            filter_kind: stage.filter.as_ref().map(|f| f.kind()),
            input_units: stage.input_units,
            output_units: stage.output_units,
            gain: stage.valid_gain(),
            has_decimation: stage.decimation.is_some(),
        }
    }
}

/// Spectra and derived values of one [`calculate`](super::calculate) call
#[derive(Debug, Clone)]
pub struct CalculationResult {
    pub(crate) frequencies: Array1<f64>,
    pub(crate) combined: Array1<Complex64>,
    /// Per-stage spectra [nstage, nfreq]
    pub(crate) stages: Array2<Complex64>,
    pub(crate) stage_range: RangeInclusive<usize>,
    pub(crate) sensitivity: f64,
    pub(crate) reference_frequency: f64,
    pub(crate) output_unit: UnitConv,
    pub(crate) first_unit: Unit,
    pub(crate) last_unit: Unit,
    pub(crate) delays: DelaySummary,
    pub(crate) notes: Vec<String>,
    pub(crate) echo: Vec<StageSummary>,
    pub(crate) unwrap: bool,
    pub(crate) amplitude: OnceLock<Array1<f64>>,
    pub(crate) phase: OnceLock<Array1<f64>>,
}

impl CalculationResult {
    /// Frequencies the spectra are given at, in Hz
    #[inline]
    pub fn frequencies(&self) -> &Array1<f64> {
        &self.frequencies
    }

    /// Get number of frequency points
    #[inline]
    pub fn nfreq(&self) -> usize {
        self.frequencies.len()
    }

    /// Product of all selected stages, scaled and unit-converted
    #[inline]
    pub fn combined(&self) -> &Array1<Complex64> {
        &self.combined
    }

    /// All per-stage spectra, one row per selected stage
    #[inline]
    pub fn stage_spectra(&self) -> &Array2<Complex64> {
        &self.stages
    }

    /// Spectrum of a 1-based stage number
    ///
    /// Scaled by that stage's sensitivity and the input-unit power of ten.
    pub fn stage_spectrum(&self, number: usize) -> Option<ArrayView1<'_, Complex64>> {
        let first = self.stage_range.start() + 1;
        if number < first || number > self.stage_range.end() + 1 {
            return None;
        }
        Some(self.stages.row(number - first))
    }

    /// Stages evaluated, as 1-based numbers
    pub fn stages_evaluated(&self) -> RangeInclusive<usize> {
        self.stage_range.start() + 1..=self.stage_range.end() + 1
    }

    /// Amplitude of the combined spectrum
    pub fn amplitude(&self) -> &Array1<f64> {
        self.amplitude.get_or_init(|| self.combined.mapv(|z| z.norm()))
    }

    /// Phase of the combined spectrum in degrees, unwrapped if requested
    pub fn phase(&self) -> &Array1<f64> {
        self.phase.get_or_init(|| {
            let phase: Vec<f64> = self.combined.iter().map(|&z| complex_2_degree(z)).collect();
            if self.unwrap {
                Array1::from_vec(unwrap_phase(&phase, false).into_owned())
            } else {
                Array1::from_vec(phase)
            }
        })
    }

    /// Sensitivity the spectra were scaled by
    #[inline]
    pub fn sensitivity(&self) -> f64 {
        self.sensitivity
    }

    #[inline]
    pub fn reference_frequency(&self) -> f64 {
        self.reference_frequency
    }

    #[inline]
    pub fn output_unit(&self) -> UnitConv {
        self.output_unit
    }

    /// Input units of the first stage
    #[inline]
    pub fn first_unit(&self) -> Unit {
        self.first_unit
    }

    /// Output units of the last stage
    #[inline]
    pub fn last_unit(&self) -> Unit {
        self.last_unit
    }

    #[inline]
    pub fn delays(&self) -> DelaySummary {
        self.delays
    }

    /// Diagnostic notes recorded during the calculation
    #[inline]
    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    /// Per-stage echo, empty unless requested
    #[inline]
    pub fn stage_summaries(&self) -> &[StageSummary] {
        &self.echo
    }
}
