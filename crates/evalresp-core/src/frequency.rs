//! Frequency module - requested frequency grids
//!
//! Provides the frequency vector a response is evaluated on, plus the
//! frequency unit used by tabulated response lists.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

/// Frequency unit enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FrequencyUnit {
    #[default]
    Hz,
    /// Angular frequency, rad/s
    RadiansPerSecond,
}

impl FrequencyUnit {
    /// Get the multiplier to convert to Hz
    pub fn multiplier(&self) -> f64 {
        match self {
            FrequencyUnit::Hz => 1.0,
            FrequencyUnit::RadiansPerSecond => 1.0 / TAU,
        }
    }
}

/// Sweep type enumeration
///
/// Spacing is recorded for the caller's benefit; the evaluation math never
/// looks at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SweepType {
    #[default]
    Log,
    Linear,
}

/// An ordered set of frequencies to evaluate a response on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyGrid {
    /// Frequency vector in Hz
    f: Vec<f64>,
    /// Sweep type (linear or log)
    sweep_type: SweepType,
}

impl FrequencyGrid {
    /// Create a new grid with start/stop/npoints
    ///
    /// # Arguments
    /// * `start` - Start frequency in the specified unit
    /// * `stop` - Stop frequency in the specified unit
    /// * `npoints` - Number of frequency points
    /// * `unit` - Frequency unit
    /// * `sweep_type` - Linear or logarithmic sweep
    ///
    /// # Example
    /// ```
    /// use evalresp_core::frequency::{FrequencyGrid, FrequencyUnit, SweepType};
    /// let grid = FrequencyGrid::new(0.01, 100.0, 41, FrequencyUnit::Hz, SweepType::Log);
    /// assert_eq!(grid.npoints(), 41);
    /// ```
    pub fn new(
        start: f64,
        stop: f64,
        npoints: usize,
        unit: FrequencyUnit,
        sweep_type: SweepType,
    ) -> Self {
        let mult = unit.multiplier();
        let start_hz = start * mult;
        let stop_hz = stop * mult;

        let f = match (npoints, sweep_type) {
            (0, _) => Vec::new(),
            (1, _) => vec![start_hz],
            (_, SweepType::Linear) => {
                let step = (stop_hz - start_hz) / (npoints - 1) as f64;
                (0..npoints).map(|i| start_hz + i as f64 * step).collect()
            }
            (_, SweepType::Log) => {
                let log_start = start_hz.ln();
                let log_stop = stop_hz.ln();
                let log_step = (log_stop - log_start) / (npoints - 1) as f64;
                (0..npoints)
                    .map(|i| (log_start + i as f64 * log_step).exp())
                    .collect()
            }
        };

        Self { f, sweep_type }
    }

    /// Create from an explicit frequency vector
    pub fn from_f(f: Vec<f64>, unit: FrequencyUnit) -> Self {
        let mult = unit.multiplier();
        Self {
            f: f.iter().map(|&x| x * mult).collect(),
            sweep_type: SweepType::Linear,
        }
    }

    /// Get frequency vector in Hz
    #[inline]
    pub fn f(&self) -> &[f64] {
        &self.f
    }

    /// Get the number of frequency points
    #[inline]
    pub fn npoints(&self) -> usize {
        self.f.len()
    }

    /// Get the start frequency in Hz
    #[inline]
    pub fn start(&self) -> f64 {
        *self.f.first().unwrap_or(&0.0)
    }

    /// Get the stop frequency in Hz
    #[inline]
    pub fn stop(&self) -> f64 {
        *self.f.last().unwrap_or(&0.0)
    }

    /// Get the sweep type
    #[inline]
    pub fn sweep_type(&self) -> SweepType {
        self.sweep_type
    }
}

impl From<Vec<f64>> for FrequencyGrid {
    fn from(f: Vec<f64>) -> Self {
        Self::from_f(f, FrequencyUnit::Hz)
    }
}
