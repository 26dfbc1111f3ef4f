//! # Plain-Text Reports
//!
//! Fixed-format text rendering of a [`BeamAnalysis`], one labeled line per
//! field. This is the format written by [`crate::file_io::export_report`].
//!
//! ```text
//! Simply Supported Beam Analysis
//! Unit system: MKS
//! Load position (a): 2.00 m
//! Point load (w): 10.00 kN
//! Beam length (L): 5.00 m
//! Reaction at A (Ra): 6.00 kN
//! Reaction at B (Rb): 4.00 kN
//! Moment at A (Ma): 0.00 kN-m
//! Moment at B (Mb): -12.00 kN-m
//! ```

use crate::calculations::BeamAnalysis;

/// Report heading
pub const REPORT_TITLE: &str = "Simply Supported Beam Analysis";

/// Render the summary report with `decimals` places per value.
pub fn render_report(analysis: &BeamAnalysis, decimals: usize) -> String {
    let input = &analysis.input;
    let result = &analysis.result;
    let labels = &analysis.labels;

    let lines = [
        REPORT_TITLE.to_string(),
        format!("Unit system: {}", input.unit_system),
        format!("Load position (a): {:.*} {}", decimals, input.load_position, labels.length),
        format!("Point load (w): {:.*} {}", decimals, input.load_magnitude, labels.force),
        format!("Beam length (L): {:.*} {}", decimals, input.span_length, labels.length),
        format!("Reaction at A (Ra): {:.*} {}", decimals, result.reaction_a, labels.force),
        format!("Reaction at B (Rb): {:.*} {}", decimals, result.reaction_b, labels.force),
        format!("Moment at A (Ma): {:.*} {}", decimals, result.moment_a, labels.moment),
        format!("Moment at B (Mb): {:.*} {}", decimals, result.moment_b, labels.moment),
    ];

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Render the shear breakpoints and moment samples as aligned text columns.
pub fn render_diagram_table(analysis: &BeamAnalysis, decimals: usize) -> String {
    let labels = &analysis.labels;
    let mut out = String::new();

    out.push_str("Shear diagram\n");
    out.push_str(&format!("{:>14} {:>14}\n", format!("x ({})", labels.length), format!("V ({})", labels.force)));
    for (x, v) in &analysis.diagrams.shear {
        out.push_str(&format!("{:>14.*} {:>14.*}\n", decimals, x, decimals, v));
    }

    out.push_str("\nMoment diagram\n");
    out.push_str(&format!("{:>14} {:>14}\n", format!("x ({})", labels.length), format!("M ({})", labels.moment)));
    for (x, m) in &analysis.diagrams.moment {
        out.push_str(&format!("{:>14.*} {:>14.*}\n", decimals, x, decimals, m));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::{compute, compute_with_settings};
    use crate::settings::AnalysisSettings;
    use crate::units::UnitSystem;

    #[test]
    fn test_metric_report() {
        let analysis = compute(2.0, 10.0, 5.0, UnitSystem::Metric).unwrap();
        let report = render_report(&analysis, 2);

        let expected = "\
Simply Supported Beam Analysis
Unit system: MKS
Load position (a): 2.00 m
Point load (w): 10.00 kN
Beam length (L): 5.00 m
Reaction at A (Ra): 6.00 kN
Reaction at B (Rb): 4.00 kN
Moment at A (Ma): 0.00 kN-m
Moment at B (Mb): -12.00 kN-m
";
        assert_eq!(report, expected);
    }

    #[test]
    fn test_mixed_report_labels() {
        let analysis = compute(4.0, 2000.0, 16.0, UnitSystem::Mixed).unwrap();
        let report = render_report(&analysis, 1);

        assert!(report.contains("Unit system: Americano"));
        assert!(report.contains("Point load (w): 2000.0 lb"));
        assert!(report.contains("Reaction at A (Ra): 1500.0 lb"));
        assert!(report.contains("lb-ft"));
        assert_eq!(report.lines().count(), 9);
    }

    #[test]
    fn test_diagram_table() {
        let settings = AnalysisSettings::default().with_sample_points(3);
        let analysis = compute_with_settings(2.0, 10.0, 5.0, UnitSystem::Metric, &settings).unwrap();
        let table = render_diagram_table(&analysis, 2);

        assert!(table.contains("V (kN)"));
        assert!(table.contains("M (kN-m)"));
        // 2 headings + 2 column rows + 4 shear rows + blank + 3 moment rows
        assert_eq!(table.lines().count(), 12);
        // Midspan moment: Ra*2.5 - 10*0.5 = 10
        assert!(table.contains("10.00"));
    }
}
