//! Physical units at stage boundaries
//!
//! The engine never parses unit text; it consumes a resolved classification
//! (quantity kind plus power-of-ten prefix) supplied by the parser.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Physical quantity measured at a stage boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum UnitKind {
    Displacement,
    Velocity,
    Acceleration,
    Pressure,
    MagneticFluxDensity,
    Temperature,
    Counts,
    Volts,
    #[default]
    Other,
}

impl UnitKind {
    /// Position in the displacement -> velocity -> acceleration chain
    pub fn motion_rank(&self) -> Option<i32> {
        match self {
            UnitKind::Displacement => Some(0),
            UnitKind::Velocity => Some(1),
            UnitKind::Acceleration => Some(2),
            _ => None,
        }
    }

    /// Units that only support velocity (pass-through) or default output
    pub fn is_non_motion_sensor(&self) -> bool {
        matches!(
            self,
            UnitKind::Pressure | UnitKind::MagneticFluxDensity | UnitKind::Temperature
        )
    }
}

/// A resolved physical unit: `kind` scaled by `10^power_of_ten`
///
/// Nanometres per second are `Unit::new(UnitKind::Velocity, -9)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Unit {
    pub kind: UnitKind,
    #[serde(default)]
    pub power_of_ten: i32,
}

impl Unit {
    pub fn new(kind: UnitKind, power_of_ten: i32) -> Self {
        Self { kind, power_of_ten }
    }

    /// Unit without a prefix (metres, pascals, counts...)
    pub fn si(kind: UnitKind) -> Self {
        Self::new(kind, 0)
    }

    /// Factor that rescales a response per prefixed unit to a response per
    /// SI unit (nm/s gives 1e9).
    pub fn scale_factor(&self) -> f64 {
        10f64.powi(-self.power_of_ten)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.power_of_ten == 0 {
            write!(f, "{:?}", self.kind)
        } else {
            write!(f, "{:?}(1e{})", self.kind, self.power_of_ten)
        }
    }
}

/// Requested output quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UnitConv {
    /// Leave the response in the first stage's input units
    #[default]
    Default,
    Displacement,
    Velocity,
    Acceleration,
}

impl UnitConv {
    pub fn motion_rank(&self) -> Option<i32> {
        match self {
            UnitConv::Default => None,
            UnitConv::Displacement => Some(0),
            UnitConv::Velocity => Some(1),
            UnitConv::Acceleration => Some(2),
        }
    }
}
