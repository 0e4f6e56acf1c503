//! Stage representation

use serde::{Deserialize, Serialize};

use super::filter::Filter;
use super::units::Unit;
use crate::constants::GAIN_SENTINEL;

/// How a stage's transfer function is expressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TransferType {
    /// Laplace transform in rad/s
    #[default]
    Laplace,
    /// Analog transform in Hz
    Analog,
    /// Z-transform
    Digital,
    Composite,
}

/// Scalar gain at a frequency
///
/// Also used for the overall sensitivity of a response.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gain {
    pub factor: f64,
    pub frequency: f64,
}

impl Gain {
    pub fn new(factor: f64, frequency: f64) -> Self {
        Self { factor, frequency }
    }

    /// A gain is usable unless it is the (-1, -1) placeholder
    #[inline]
    pub fn is_valid(&self) -> bool {
        !(self.factor == GAIN_SENTINEL && self.frequency == GAIN_SENTINEL)
    }
}

/// Sample-rate reduction metadata
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Decimation {
    /// Input sample rate in Hz
    pub input_sample_rate: f64,
    pub factor: u32,
    #[serde(default)]
    pub offset: u32,
    /// Estimated delay in seconds
    #[serde(default)]
    pub estimated_delay: f64,
    /// Correction applied in seconds
    #[serde(default)]
    pub correction_applied: f64,
}

impl Decimation {
    pub fn new(input_sample_rate: f64, factor: u32) -> Self {
        Self {
            input_sample_rate,
            factor,
            offset: 0,
            estimated_delay: 0.0,
            correction_applied: 0.0,
        }
    }

    pub fn with_delay(mut self, estimated_delay: f64, correction_applied: f64) -> Self {
        self.estimated_delay = estimated_delay;
        self.correction_applied = correction_applied;
        self
    }

    /// Input sample interval in seconds
    #[inline]
    pub fn sample_interval(&self) -> f64 {
        1.0 / self.input_sample_rate
    }
}

/// A0 normalisation factor of a pole-zero (or coefficient) filter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Normalization {
    pub factor: f64,
    pub frequency: f64,
}

impl Normalization {
    pub fn new(factor: f64, frequency: f64) -> Self {
        Self { factor, frequency }
    }
}

/// One link of the response cascade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    /// Sequence number as found in the metadata (1-based)
    pub number: u32,
    #[serde(default)]
    pub transfer_type: TransferType,
    #[serde(default)]
    pub filter: Option<Filter>,
    #[serde(default)]
    pub gain: Option<Gain>,
    #[serde(default)]
    pub decimation: Option<Decimation>,
    #[serde(default)]
    pub normalization: Option<Normalization>,
    #[serde(default)]
    pub input_units: Unit,
    #[serde(default)]
    pub output_units: Unit,
}

impl Stage {
    pub fn new(
        number: u32,
        transfer_type: TransferType,
        input_units: Unit,
        output_units: Unit,
    ) -> Self {
        Self {
            number,
            transfer_type,
            filter: None,
            gain: None,
            decimation: None,
            normalization: None,
            input_units,
            output_units,
        }
    }

    pub fn with_filter(mut self, filter: impl Into<Filter>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn with_gain(mut self, factor: f64, frequency: f64) -> Self {
        self.gain = Some(Gain::new(factor, frequency));
        self
    }

    pub fn with_decimation(mut self, decimation: Decimation) -> Self {
        self.decimation = Some(decimation);
        self
    }

    pub fn with_normalization(mut self, factor: f64, frequency: f64) -> Self {
        self.normalization = Some(Normalization::new(factor, frequency));
        self
    }

    /// The stage gain, if present and not a placeholder
    #[inline]
    pub fn valid_gain(&self) -> Option<Gain> {
        self.gain.filter(Gain::is_valid)
    }

    #[inline]
    pub fn is_polynomial(&self) -> bool {
        self.filter.as_ref().is_some_and(Filter::is_polynomial)
    }

    /// True when the stage carries nothing at all
    pub fn is_empty(&self) -> bool {
        self.filter.is_none()
            && self.gain.is_none()
            && self.decimation.is_none()
            && self.normalization.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::units::UnitKind;

    #[test]
    fn test_gain_sentinel() {
        assert!(Gain::new(1.0, 1.0).is_valid());
        assert!(Gain::new(-1.0, 5.0).is_valid());
        assert!(!Gain::new(-1.0, -1.0).is_valid());
    }

    #[test]
    fn test_stage_builders() {
        let counts = Unit::si(UnitKind::Counts);
        let stage = Stage::new(1, TransferType::Digital, counts, counts)
            .with_gain(-1.0, -1.0)
            .with_decimation(Decimation::new(100.0, 2));

        assert!(stage.valid_gain().is_none());
        assert!(!stage.is_empty());
        assert!(!stage.is_polynomial());
        assert_eq!(stage.decimation.map(|d| d.sample_interval()), Some(0.01));
        assert!(Stage::new(2, TransferType::Digital, counts, counts).is_empty());
    }
}
