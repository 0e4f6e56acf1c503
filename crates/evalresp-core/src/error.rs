//! Error types
//!
//! Stage numbers in messages are 1-based positions within the response.

use thiserror::Error;

use crate::frequency::FrequencyUnit;
use crate::response::{PhaseUnit, TransferType, Unit, UnitConv, UnitKind};

/// Structural or semantic problems found before any numeric work
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("response contains no stages")]
    NoStages,

    #[error("stage {stage}: stage carries no data")]
    EmptyStage { stage: usize },

    #[error("stage {stage}: input units {found} do not match previous output units {expected}")]
    UnitMismatch {
        stage: usize,
        expected: Unit,
        found: Unit,
    },

    #[error("stage {stage}: no filter and no valid gain")]
    MissingFilterOrGain { stage: usize },

    #[error("stage {stage}: pole-zero filter without normalization")]
    MissingNormalization { stage: usize },

    #[error("stage {stage}: transfer type {transfer_type:?} not allowed for a pole-zero filter")]
    InvalidTransferType {
        stage: usize,
        transfer_type: TransferType,
    },

    #[error("stage {stage}: digital filter without decimation")]
    MissingDecimation { stage: usize },

    #[error("stage {stage}: response list must be the only stage")]
    ListNotSole { stage: usize },

    #[error("stage {stage}: response list must not carry a normalization")]
    ListWithNormalization { stage: usize },

    #[error("stage {stage}: response list frequency unit {unit:?} is not Hz")]
    ListFrequencyUnit { stage: usize, unit: FrequencyUnit },

    #[error("stage {stage}: response list phase unit {unit:?} is not degrees or radians")]
    ListPhaseUnit { stage: usize, unit: PhaseUnit },

    #[error("stage {stage}: multi-stage response requires a valid stage gain")]
    MissingStageGain { stage: usize },

    #[error("stage {stage}: neither overall sensitivity nor stage gain is valid")]
    MissingSensitivity { stage: usize },
}

/// Failures raised by a single filter evaluation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    #[error("transfer type {0:?} cannot be evaluated for this filter")]
    InvalidTransferType(TransferType),

    #[error("digital filter without decimation")]
    MissingDecimation,

    #[error("invalid response list table: {0}")]
    InvalidList(String),

    #[error("invalid response list phase unit {0:?}")]
    InvalidPhaseUnit(PhaseUnit),

    #[error("polynomial sample value must be positive, got {0:?}")]
    NonPositiveSample(Option<f64>),
}

/// Failures while deriving the sensitivity table
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NormalizationError {
    #[error("no stages selected: start {start}, stop {stop}, response has {nstages} stages")]
    StageOutOfRange {
        start: u32,
        stop: u32,
        nstages: usize,
    },

    #[error("stage {stage}: no valid gain and no usable overall sensitivity")]
    MissingGain { stage: usize },

    #[error("stage {stage}: filter requires a decimation")]
    MissingDecimation { stage: usize },

    #[error("stage {stage}: pole-zero filter requires a normalization")]
    MissingNormalization { stage: usize },

    #[error("stage {stage}: zero-valued response at {frequency} Hz")]
    ZeroResponse { stage: usize, frequency: f64 },

    #[error("stage {stage}: {source}")]
    Filter {
        stage: usize,
        #[source]
        source: FilterError,
    },
}

/// Failures of the tensioned spline interpolator
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SplineError {
    #[error("abscissa has {0} points, at least 2 are required")]
    TooFewPoints(usize),

    #[error("ordinate length {y_len} does not match abscissa length {x_len}")]
    LengthMismatch { x_len: usize, y_len: usize },

    #[error("abscissa is not strictly monotonic at index {0}")]
    NotMonotonic(usize),

    #[error("abscissa contains a non-finite value at index {0}")]
    NonFinite(usize),
}

/// Failures of a full spectrum calculation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Normalization(#[from] NormalizationError),

    #[error("stage {stage}: {source}")]
    Filter {
        stage: usize,
        #[source]
        source: FilterError,
    },

    #[error("list interpolation failed: {0}")]
    Spline(#[from] SplineError),

    #[error("all {requested} requested frequencies lie outside the response list range [{min}, {max}] Hz")]
    AllFrequenciesClipped { requested: usize, min: f64, max: f64 },

    #[error("cannot convert {input:?} input units to {output:?} output")]
    IncompatibleUnits { input: UnitKind, output: UnitConv },
}
