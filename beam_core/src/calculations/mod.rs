//! # Structural Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input, settings) -> Result<_, CalcError>` - Pure calculation function
//!
//! ## Available Calculations
//!
//! - [`point_load`] - Simply-supported beam with one concentrated load

pub mod point_load;

// Re-export commonly used types
pub use point_load::{
    calculate, compute, compute_with_settings, BeamAnalysis, BeamInput, BeamResult, DiagramSamples,
    PointLoadBeam,
};
