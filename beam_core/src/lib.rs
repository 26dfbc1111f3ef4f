//! # beam_core - Simply Supported Beam Statics
//!
//! `beam_core` computes support reactions, the moment under the load, and
//! shear/moment diagram samples for a simply supported beam carrying a single
//! point load. Inputs may be entered in metric (MKS), Imperial (ft, kips) or
//! Americano (ft, lb) units; all statics run in canonical metric units.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Every call recomputes from plain input values
//! - **JSON-First**: All inputs and results implement Serialize/Deserialize
//! - **Rich Errors**: Invalid input is a structured, recoverable error
//!
//! ## Quick Start
//!
//! ```rust
//! use beam_core::{compute, unit_labels, UnitSystem};
//!
//! // 16 ft span, 2000 lb at 4 ft
//! let analysis = compute(4.0, 2000.0, 16.0, UnitSystem::Mixed).unwrap();
//! let labels = unit_labels(UnitSystem::Mixed);
//!
//! println!("Ra = {:.2} {}", analysis.result.reaction_a, labels.force);
//! println!("Mb = {:.2} {}", analysis.result.moment_b, labels.moment);
//! ```
//!
//! ## Modules
//!
//! - [`units`] - Unit systems, conversion factors and labels
//! - [`calculations`] - The statics solver and diagram sampling
//! - [`settings`] - User-tunable defaults loaded from JSON
//! - [`report`] - Plain-text report rendering
//! - [`file_io`] - Report export and saved analyses with atomic writes and locking
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod errors;
#[cfg(not(target_arch = "wasm32"))]
pub mod file_io;
pub mod report;
pub mod settings;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{compute, compute_with_settings, BeamAnalysis, BeamInput, BeamResult, DiagramSamples};
pub use errors::{CalcError, CalcResult};
#[cfg(not(target_arch = "wasm32"))]
pub use file_io::{export_report, load_analysis, save_analysis, FileLock, SavedAnalysis};
pub use settings::AnalysisSettings;
pub use units::{unit_labels, QuantityKind, UnitLabels, UnitSystem};
