//! Simply-Supported Beam with a Single Point Load
//!
//! Closed-form statics for a pin-roller beam of span `L` carrying one
//! concentrated load `w` at distance `a` from the left support (A).
//!
//! ## Formulas
//! ```text
//! Rb = w·a / L
//! Ra = w − Rb
//! Ma = 0
//! Mb = −w·a·(L − a) / L        (moment under the load)
//! ```
//!
//! ## Sign Convention
//! - Reactions: positive upward
//! - Diagram moment `M(x)`: positive sagging, so the peak `Ra·a` is positive
//! - `Mb` keeps the negative sign calculators of this type have always reported
//!
//! All arithmetic runs in canonical units (m, kN, kN-m). Values are converted
//! in from the user's [`UnitSystem`] before validation and back out afterwards.
//!
//! ## Example
//! ```rust
//! use beam_core::calculations::point_load::compute;
//! use beam_core::units::UnitSystem;
//!
//! let analysis = compute(2.0, 10.0, 5.0, UnitSystem::Metric).unwrap();
//!
//! assert!((analysis.result.reaction_a - 6.0).abs() < 1e-9);
//! assert!((analysis.result.reaction_b - 4.0).abs() < 1e-9);
//! assert!((analysis.result.moment_b - -12.0).abs() < 1e-9);
//! assert_eq!(analysis.diagrams.moment.len(), 100);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::settings::{AnalysisSettings, MAX_SAMPLE_POINTS, MIN_SAMPLE_POINTS};
use crate::units::{from_canonical, to_canonical, unit_labels, QuantityKind, UnitLabels, UnitSystem};

/// Beam input as entered by the user.
///
/// ## JSON Example
///
/// ```json
/// {
///   "load_position": 6.5,
///   "load_magnitude": 2.25,
///   "span_length": 16.0,
///   "unit_system": "Imperial"
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeamInput {
    /// Distance from support A to the load (a)
    pub load_position: f64,

    /// Point load magnitude, acting downward (w)
    pub load_magnitude: f64,

    /// Span between supports (L)
    pub span_length: f64,

    /// System the three values above are expressed in
    pub unit_system: UnitSystem,
}

impl BeamInput {
    pub fn new(load_position: f64, load_magnitude: f64, span_length: f64, unit_system: UnitSystem) -> Self {
        BeamInput {
            load_position,
            load_magnitude,
            span_length,
            unit_system,
        }
    }

    /// Normalize to canonical units and validate.
    pub fn to_canonical(&self) -> CalcResult<PointLoadBeam> {
        let system = self.unit_system;
        PointLoadBeam::new(
            to_canonical(self.load_position, QuantityKind::Length, system),
            to_canonical(self.load_magnitude, QuantityKind::Force, system),
            to_canonical(self.span_length, QuantityKind::Length, system),
        )
    }
}

/// A validated beam in canonical units (m, kN).
///
/// Construction through [`PointLoadBeam::new`] guarantees `0 <= a <= L`,
/// `w >= 0` and `L > 0`, so none of the methods can divide by zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PointLoadBeam {
    load_position_m: f64,
    load_kn: f64,
    span_m: f64,
}

impl PointLoadBeam {
    /// Validate canonical inputs and build the beam.
    pub fn new(load_position_m: f64, load_kn: f64, span_m: f64) -> CalcResult<Self> {
        if !span_m.is_finite() || span_m <= 0.0 {
            return Err(CalcError::invalid_input(
                "span_length",
                format!("{} m", span_m),
                "Span must be greater than zero",
            ));
        }
        if !load_kn.is_finite() || load_kn < 0.0 {
            return Err(CalcError::invalid_input(
                "load_magnitude",
                format!("{} kN", load_kn),
                "Load must not be negative",
            ));
        }
        if !load_position_m.is_finite() || load_position_m < 0.0 {
            return Err(CalcError::invalid_input(
                "load_position",
                format!("{} m", load_position_m),
                "Load position must not be negative",
            ));
        }
        if load_position_m > span_m {
            return Err(CalcError::invalid_input(
                "load_position",
                format!("{} m", load_position_m),
                format!("Load position must not exceed the span ({} m)", span_m),
            ));
        }

        Ok(PointLoadBeam {
            load_position_m,
            load_kn,
            span_m,
        })
    }

    pub fn load_position_m(&self) -> f64 {
        self.load_position_m
    }

    pub fn load_kn(&self) -> f64 {
        self.load_kn
    }

    pub fn span_m(&self) -> f64 {
        self.span_m
    }

    /// Right reaction Rb = w·a/L (kN)
    pub fn reaction_right(&self) -> f64 {
        self.load_kn * self.load_position_m / self.span_m
    }

    /// Left reaction Ra = w − Rb (kN)
    pub fn reaction_left(&self) -> f64 {
        self.load_kn - self.reaction_right()
    }

    /// Moment at support A; a pin carries none.
    pub fn moment_left(&self) -> f64 {
        0.0
    }

    /// Moment under the load, −w·a·(L − a)/L (kN-m)
    pub fn moment_at_load(&self) -> f64 {
        let a = self.load_position_m;
        let l = self.span_m;
        -self.load_kn * a * (l - a) / l
    }

    /// Internal shear at `x` (kN). Left of the load it is Ra, from the load on Ra − w.
    pub fn shear_at(&self, x_m: f64) -> f64 {
        let r1 = self.reaction_left();
        if x_m < self.load_position_m {
            r1
        } else {
            r1 - self.load_kn
        }
    }

    /// Bending moment at `x` (kN-m, sagging positive)
    pub fn moment_at(&self, x_m: f64) -> f64 {
        let r1 = self.reaction_left();
        if x_m <= self.load_position_m {
            // M(x) = R1 * x
            r1 * x_m
        } else {
            // M(x) = R1 * x - P(x - a)
            r1 * x_m - self.load_kn * (x_m - self.load_position_m)
        }
    }

    /// Shear diagram breakpoints: `(0, Ra), (a, Ra), (a, Ra − w), (L, Rb)`.
    pub fn shear_samples(&self) -> Vec<(f64, f64)> {
        let ra = self.reaction_left();
        let a = self.load_position_m;
        vec![
            (0.0, ra),
            (a, ra),
            (a, ra - self.load_kn),
            (self.span_m, self.reaction_right()),
        ]
    }

    /// Moment at `points` evenly spaced positions over `[0, L]`, both ends included.
    ///
    /// `points` is clamped to `MIN_SAMPLE_POINTS..=MAX_SAMPLE_POINTS`.
    pub fn moment_samples(&self, points: usize) -> Vec<(f64, f64)> {
        let points = points.clamp(MIN_SAMPLE_POINTS, MAX_SAMPLE_POINTS);
        let last = points - 1;
        (0..points)
            .map(|i| {
                let x = if i == last {
                    self.span_m
                } else {
                    self.span_m * i as f64 / last as f64
                };
                (x, self.moment_at(x))
            })
            .collect()
    }
}

/// Reactions and moments, in the unit system of the input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeamResult {
    /// Reaction at support A (Ra)
    pub reaction_a: f64,
    /// Reaction at support B (Rb)
    pub reaction_b: f64,
    /// Moment at support A (Ma), always zero
    pub moment_a: f64,
    /// Moment at the load application point, reported as `Mb`
    pub moment_b: f64,
    /// System the values are expressed in
    pub unit_system: UnitSystem,
}

impl BeamResult {
    /// Solve `beam` and express the results in `system`.
    pub fn from_beam(beam: &PointLoadBeam, system: UnitSystem) -> Self {
        let force = |v| from_canonical(v, QuantityKind::Force, system);
        let moment = |v| from_canonical(v, QuantityKind::Moment, system);

        BeamResult {
            reaction_a: force(beam.reaction_left()),
            reaction_b: force(beam.reaction_right()),
            moment_a: moment(beam.moment_left()),
            moment_b: moment(beam.moment_at_load()),
            unit_system: system,
        }
    }
}

/// Sampled shear and moment diagrams, in display units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramSamples {
    /// Four `(position, shear)` breakpoints
    pub shear: Vec<(f64, f64)>,
    /// Dense `(position, moment)` samples over the span
    pub moment: Vec<(f64, f64)>,
}

impl DiagramSamples {
    /// Sample `beam` and convert the ordinates into `system`.
    pub fn from_beam(beam: &PointLoadBeam, system: UnitSystem, sample_points: usize) -> Self {
        let convert = |samples: Vec<(f64, f64)>, kind: QuantityKind| -> Vec<(f64, f64)> {
            samples
                .into_iter()
                .map(|(x, v)| {
                    (
                        from_canonical(x, QuantityKind::Length, system),
                        from_canonical(v, kind, system),
                    )
                })
                .collect()
        };

        DiagramSamples {
            shear: convert(beam.shear_samples(), QuantityKind::Force),
            moment: convert(beam.moment_samples(sample_points), QuantityKind::Moment),
        }
    }

    /// Size of the shear step at the load (equals the load magnitude)
    pub fn shear_jump(&self) -> f64 {
        match (self.shear.get(1), self.shear.get(2)) {
            (Some(&(_, before)), Some(&(_, after))) => before - after,
            _ => 0.0,
        }
    }

    /// Moment sample with the largest magnitude, as `(position, moment)`
    pub fn peak_moment(&self) -> Option<(f64, f64)> {
        self.moment
            .iter()
            .copied()
            .fold(None, |best: Option<(f64, f64)>, sample| match best {
                Some(b) if b.1.abs() >= sample.1.abs() => Some(b),
                _ => Some(sample),
            })
    }
}

/// Everything a caller needs to display one calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamAnalysis {
    /// The input as entered
    pub input: BeamInput,
    /// Reactions and moments
    pub result: BeamResult,
    /// Diagram samples for plotting
    pub diagrams: DiagramSamples,
    /// Unit abbreviations for `input`, `result` and `diagrams`
    pub labels: UnitLabels,
}

/// Calculate reactions, moments and diagrams with the default resolution.
///
/// # Arguments
///
/// * `a` - Distance from support A to the load
/// * `w` - Load magnitude
/// * `l` - Span length
/// * `unit_system` - System `a`, `w` and `l` are expressed in
///
/// # Returns
///
/// * `Ok(BeamAnalysis)` - Results and diagrams in `unit_system`
/// * `Err(CalcError::InvalidInput)` - `a < 0`, `w < 0`, `L <= 0` or `a > L`
pub fn compute(a: f64, w: f64, l: f64, unit_system: UnitSystem) -> CalcResult<BeamAnalysis> {
    compute_with_settings(a, w, l, unit_system, &AnalysisSettings::default())
}

/// Same as [`compute`], with the moment sample count taken from `settings`.
pub fn compute_with_settings(
    a: f64,
    w: f64,
    l: f64,
    unit_system: UnitSystem,
    settings: &AnalysisSettings,
) -> CalcResult<BeamAnalysis> {
    calculate(&BeamInput::new(a, w, l, unit_system), settings)
}

/// Run the full pipeline for a [`BeamInput`].
pub fn calculate(input: &BeamInput, settings: &AnalysisSettings) -> CalcResult<BeamAnalysis> {
    let system = input.unit_system;
    let beam = input.to_canonical()?;

    Ok(BeamAnalysis {
        input: *input,
        result: BeamResult::from_beam(&beam, system),
        diagrams: DiagramSamples::from_beam(&beam, system, settings.sample_points),
        labels: unit_labels(system),
    })
}
