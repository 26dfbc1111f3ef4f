//! # Unit Systems
//!
//! Conversion between the canonical metric system used by the solver and the
//! three unit systems a user can enter values in.
//!
//! ## Canonical Units
//!
//! All statics are computed in:
//! - Length: meters (m)
//! - Force: kilonewtons (kN)
//! - Moment: kilonewton-meters (kN-m)
//!
//! ## Supported Systems
//!
//! | System    | Display name | Length | Force | Moment |
//! |-----------|--------------|--------|-------|--------|
//! | Metric    | MKS          | m      | kN    | kN-m   |
//! | Imperial  | Imperial     | ft     | kips  | kip-ft |
//! | Mixed     | Americano    | ft     | lb    | lb-ft  |
//!
//! The conversion factors are fixed constants. They intentionally match the
//! values earlier versions of the calculator wrote into saved results, so they
//! are not derived from one another (`0.224809 * 3.28084 != 0.737562` exactly).
//!
//! ## Example
//!
//! ```rust
//! use beam_core::units::{from_canonical, to_canonical, QuantityKind, UnitSystem};
//!
//! let span_m = to_canonical(16.4042, QuantityKind::Length, UnitSystem::Imperial);
//! assert!((span_m - 5.0).abs() < 1e-4);
//!
//! let moment_kipft = from_canonical(-12.0, QuantityKind::Moment, UnitSystem::Imperial);
//! assert!((moment_kipft - -8.850744).abs() < 1e-9);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

// ============================================================================
// Conversion Factors (canonical -> display multipliers)
// ============================================================================

/// Feet per meter
pub const FT_PER_M: f64 = 3.28084;

/// Kips per kilonewton
pub const KIPS_PER_KN: f64 = 0.224809;

/// Pounds per kilonewton
pub const LB_PER_KN: f64 = 224.809;

/// Kip-feet per kilonewton-meter
pub const KIPFT_PER_KNM: f64 = 0.737562;

/// Pound-feet per kilonewton-meter
pub const LBFT_PER_KNM: f64 = 737.562;

// ============================================================================
// Unit System
// ============================================================================

/// The unit system user values are entered and displayed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum UnitSystem {
    /// Meters, kilonewtons, kilonewton-meters (canonical)
    #[default]
    #[serde(rename = "MKS", alias = "Metric")]
    Metric,
    /// Feet, kips, kip-feet
    #[serde(rename = "Imperial")]
    Imperial,
    /// Feet, pounds, pound-feet
    #[serde(rename = "Americano", alias = "Mixed")]
    Mixed,
}

impl UnitSystem {
    /// All supported systems, in menu order
    pub const ALL: [UnitSystem; 3] = [UnitSystem::Metric, UnitSystem::Imperial, UnitSystem::Mixed];

    /// Name shown to users and written into exported reports
    pub fn display_name(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "MKS",
            UnitSystem::Imperial => "Imperial",
            UnitSystem::Mixed => "Americano",
        }
    }

    /// Multiplier taking a canonical value of `kind` into this system
    pub fn factor(&self, kind: QuantityKind) -> f64 {
        match (self, kind) {
            (UnitSystem::Metric, _) => 1.0,
            (UnitSystem::Imperial, QuantityKind::Length) => FT_PER_M,
            (UnitSystem::Imperial, QuantityKind::Force) => KIPS_PER_KN,
            (UnitSystem::Imperial, QuantityKind::Moment) => KIPFT_PER_KNM,
            (UnitSystem::Mixed, QuantityKind::Length) => FT_PER_M,
            (UnitSystem::Mixed, QuantityKind::Force) => LB_PER_KN,
            (UnitSystem::Mixed, QuantityKind::Moment) => LBFT_PER_KNM,
        }
    }

    /// Display labels for every quantity kind in this system
    pub fn labels(&self) -> UnitLabels {
        unit_labels(*self)
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for UnitSystem {
    type Err = CalcError;

    fn from_str(s: &str) -> CalcResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "metric" | "mks" | "si" => Ok(UnitSystem::Metric),
            "imperial" | "kips" => Ok(UnitSystem::Imperial),
            "mixed" | "americano" | "lb" => Ok(UnitSystem::Mixed),
            _ => Err(CalcError::invalid_input(
                "unit_system",
                s,
                "Expected one of: MKS, Imperial, Americano",
            )),
        }
    }
}

/// Kind of physical quantity being converted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuantityKind {
    Length,
    Force,
    Moment,
}

impl QuantityKind {
    pub const ALL: [QuantityKind; 3] = [QuantityKind::Length, QuantityKind::Force, QuantityKind::Moment];
}

// ============================================================================
// Conversions
// ============================================================================

/// Convert a value entered in `system` into canonical metric units.
///
/// Moment is never an input to the solver, but the conversion is defined so
/// that every kind round-trips.
pub fn to_canonical(value: f64, kind: QuantityKind, system: UnitSystem) -> f64 {
    match system {
        UnitSystem::Metric => value,
        _ => value / system.factor(kind),
    }
}

/// Convert a canonical metric value into `system` for display.
pub fn from_canonical(value: f64, kind: QuantityKind, system: UnitSystem) -> f64 {
    match system {
        UnitSystem::Metric => value,
        _ => value * system.factor(kind),
    }
}

// ============================================================================
// Labels
// ============================================================================

/// Unit abbreviation for a quantity kind in a given system
pub fn label_for(kind: QuantityKind, system: UnitSystem) -> &'static str {
    match (kind, system) {
        (QuantityKind::Length, UnitSystem::Metric) => "m",
        (QuantityKind::Length, UnitSystem::Imperial | UnitSystem::Mixed) => "ft",
        (QuantityKind::Force, UnitSystem::Metric) => "kN",
        (QuantityKind::Force, UnitSystem::Imperial) => "kips",
        (QuantityKind::Force, UnitSystem::Mixed) => "lb",
        (QuantityKind::Moment, UnitSystem::Metric) => "kN-m",
        (QuantityKind::Moment, UnitSystem::Imperial) => "kip-ft",
        (QuantityKind::Moment, UnitSystem::Mixed) => "lb-ft",
    }
}

/// Display labels used to annotate results, diagrams and exported reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitLabels {
    pub length: String,
    pub force: String,
    pub moment: String,
}

/// Labels for length, force and moment in `system`.
///
/// Backed by [`label_for`], so labels cannot drift from the conversion table.
pub fn unit_labels(system: UnitSystem) -> UnitLabels {
    UnitLabels {
        length: label_for(QuantityKind::Length, system).to_string(),
        force: label_for(QuantityKind::Force, system).to_string(),
        moment: label_for(QuantityKind::Moment, system).to_string(),
    }
}
