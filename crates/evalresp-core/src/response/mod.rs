//! Response module - instrument response data model
//!
//! A response is an ordered cascade of stages handed over by an external
//! metadata parser. The engine only ever reads it.

mod filter;
mod stage;
mod units;

pub use filter::{
    Coefficient, Coefficients, Filter, FilterKind, PhaseUnit, PoleZero, Polynomial, ResponseList,
};
pub use stage::{Decimation, Gain, Normalization, Stage, TransferType};
pub use units::{Unit, UnitConv, UnitKind};

use serde::{Deserialize, Serialize};

/// A complete instrument response: stages plus optional overall sensitivity
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResponseDescriptor {
    pub stages: Vec<Stage>,
    #[serde(default)]
    pub sensitivity: Option<Gain>,
}

impl ResponseDescriptor {
    pub fn new(stages: Vec<Stage>) -> Self {
        Self {
            stages,
            sensitivity: None,
        }
    }

    pub fn with_sensitivity(mut self, factor: f64, frequency: f64) -> Self {
        self.sensitivity = Some(Gain::new(factor, frequency));
        self
    }

    /// Get the number of stages
    #[inline]
    pub fn nstages(&self) -> usize {
        self.stages.len()
    }

    /// The overall sensitivity, if present and not a placeholder
    #[inline]
    pub fn valid_sensitivity(&self) -> Option<Gain> {
        self.sensitivity.filter(Gain::is_valid)
    }

    /// True if any stage is a polynomial calibration
    pub fn has_polynomial(&self) -> bool {
        self.stages.iter().any(Stage::is_polynomial)
    }

    /// The response list of the first stage, if that is what it carries
    pub fn leading_response_list(&self) -> Option<&ResponseList> {
        match self.stages.first().and_then(|s| s.filter.as_ref()) {
            Some(Filter::ResponseList(list)) => Some(list),
            _ => None,
        }
    }
}
