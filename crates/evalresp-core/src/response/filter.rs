//! Filter payloads carried by a stage

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::frequency::FrequencyUnit;

/// A coefficient together with its quoted uncertainty
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coefficient {
    pub value: f64,
    #[serde(default)]
    pub error: f64,
}

impl Coefficient {
    pub fn new(value: f64, error: f64) -> Self {
        Self { value, error }
    }
}

impl From<f64> for Coefficient {
    fn from(value: f64) -> Self {
        Self { value, error: 0.0 }
    }
}

/// Pole-zero transfer function (Laplace, analog or Z-domain)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PoleZero {
    pub poles: Vec<Complex64>,
    pub zeros: Vec<Complex64>,
}

/// Numerator/denominator tap coefficients
///
/// An empty denominator makes this an FIR filter.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Coefficients {
    pub numerator: Vec<Coefficient>,
    #[serde(default)]
    pub denominator: Vec<Coefficient>,
}

impl Coefficients {
    pub fn fir(numerator: Vec<Coefficient>) -> Self {
        Self {
            numerator,
            denominator: Vec::new(),
        }
    }

    pub fn iir(numerator: Vec<Coefficient>, denominator: Vec<Coefficient>) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    #[inline]
    pub fn is_fir(&self) -> bool {
        self.denominator.is_empty()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.numerator.is_empty() && self.denominator.is_empty()
    }
}

/// Unit of the phase column of a response list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PhaseUnit {
    #[default]
    Degrees,
    Radians,
    Other,
}

/// Tabulated frequency/amplitude/phase response
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResponseList {
    pub frequency: Vec<f64>,
    pub amplitude: Vec<f64>,
    pub phase: Vec<f64>,
    #[serde(default)]
    pub frequency_unit: FrequencyUnit,
    #[serde(default)]
    pub phase_unit: PhaseUnit,
}

impl ResponseList {
    /// Phase column in degrees
    pub fn phase_degrees(&self) -> Vec<f64> {
        match self.phase_unit {
            PhaseUnit::Radians => self.phase.iter().map(|p| p.to_degrees()).collect(),
            _ => self.phase.clone(),
        }
    }
}

/// MacLaurin power-series calibration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Polynomial {
    pub coefficients: Vec<Coefficient>,
}

/// The transfer function of one stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Filter {
    PoleZero(PoleZero),
    Coefficients(Coefficients),
    ResponseList(ResponseList),
    Polynomial(Polynomial),
}

/// Short classification of a filter, used in summaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterKind {
    PoleZero,
    Iir,
    Fir,
    ResponseList,
    Polynomial,
}

impl Filter {
    pub fn kind(&self) -> FilterKind {
        match self {
            Filter::PoleZero(_) => FilterKind::PoleZero,
            Filter::Coefficients(c) if c.is_fir() => FilterKind::Fir,
            Filter::Coefficients(_) => FilterKind::Iir,
            Filter::ResponseList(_) => FilterKind::ResponseList,
            Filter::Polynomial(_) => FilterKind::Polynomial,
        }
    }

    #[inline]
    pub fn is_polynomial(&self) -> bool {
        matches!(self, Filter::Polynomial(_))
    }

    #[inline]
    pub fn is_response_list(&self) -> bool {
        matches!(self, Filter::ResponseList(_))
    }
}

impl From<PoleZero> for Filter {
    fn from(pz: PoleZero) -> Self {
        Filter::PoleZero(pz)
    }
}

impl From<Coefficients> for Filter {
    fn from(c: Coefficients) -> Self {
        Filter::Coefficients(c)
    }
}

impl From<ResponseList> for Filter {
    fn from(list: ResponseList) -> Self {
        Filter::ResponseList(list)
    }
}

impl From<Polynomial> for Filter {
    fn from(poly: Polynomial) -> Self {
        Filter::Polynomial(poly)
    }
}
