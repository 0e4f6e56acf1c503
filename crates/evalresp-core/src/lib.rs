//! evalresp-core: Instrument response evaluation
//!
//! Computes the complex frequency response of a seismic instrument described
//! as a cascade of stages (pole-zero, FIR/IIR coefficients, response lists
//! and polynomial calibrations).
//!
//! ## Modules
//!
//! - `response` - Stage cascade data model
//! - `validate` - Structural checks on a response
//! - `normalize` - Reference frequency and per-stage sensitivities
//! - `filters` - Per-filter complex evaluators
//! - `calculate` - Full spectrum calculation
//! - `frequency` - Frequency grids
//! - `math` - Complex helpers, phase wrapping, tension spline

pub mod calculate;
pub mod constants;
pub mod error;
pub mod filters;
pub mod frequency;
pub mod math;
pub mod normalize;
pub mod response;
pub mod validate;

pub use calculate::{calculate, CalcOptions, CalculationResult};
pub use error::{CalcError, FilterError, NormalizationError, SplineError, ValidationError};
pub use frequency::FrequencyGrid;
pub use normalize::{normalize, NormalizationTable};
pub use response::{ResponseDescriptor, Stage, UnitConv};
pub use validate::validate;
