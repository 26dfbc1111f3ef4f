//! # Beam CLI Application
//!
//! Terminal front end for the simply supported beam calculator. Prompts for the
//! unit system and the three beam values, prints reactions, moments and the
//! diagram tables, and optionally exports the results.
//!
//! Settings are read from the path given as the first argument, or from the
//! `BEAM_SETTINGS` environment variable.

use std::env;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use beam_core::file_io::{export_report, save_analysis, SavedAnalysis};
use beam_core::report::render_diagram_table;
use beam_core::settings::load_settings_or_default;
use beam_core::{compute_with_settings, AnalysisSettings, BeamAnalysis, CalcError, UnitLabels, UnitSystem};

fn read_line(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    io::stdout().flush().ok()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input).ok()?;
    Some(input.trim().to_string())
}

/// Blank input takes the default; anything else must be a number.
fn parse_field(field: &str, text: &str, default: f64) -> Result<f64, CalcError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(default);
    }
    text.parse().map_err(|_| CalcError::invalid_input(field, text, "Not a number"))
}

fn prompt_f64(field: &str, prompt: &str, default: f64) -> Result<f64, CalcError> {
    parse_field(field, &read_line(prompt).unwrap_or_default(), default)
}

/// Prompt for a, w and L; the first unparsable entry aborts the calculation.
fn read_inputs(labels: &UnitLabels) -> Result<(f64, f64, f64), CalcError> {
    let a = prompt_f64("load_position", &format!("Load position a ({}) [2.0]: ", labels.length), 2.0)?;
    let w = prompt_f64("load_magnitude", &format!("Point load w ({}) [10.0]: ", labels.force), 10.0)?;
    let l = prompt_f64("span_length", &format!("Beam length L ({}) [5.0]: ", labels.length), 5.0)?;
    Ok((a, w, l))
}

fn prompt_unit_system(default: UnitSystem) -> UnitSystem {
    let prompt = format!("Unit system (MKS / Imperial / Americano) [{}]: ", default);
    match read_line(&prompt) {
        Some(text) if !text.is_empty() => text.parse().unwrap_or_else(|e: CalcError| {
            println!("  {}, using {}", e, default);
            default
        }),
        _ => default,
    }
}

fn settings_path() -> Option<PathBuf> {
    env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| env::var_os("BEAM_SETTINGS").map(PathBuf::from))
}

fn main() {
    println!("Beam CLI - Simply Supported Beam, Point Load");
    println!("============================================");
    println!();

    let settings = match load_settings_or_default(settings_path().as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            report_error("Could not load settings, using defaults", &e);
            AnalysisSettings::default()
        }
    };

    let system = prompt_unit_system(settings.unit_system);
    let labels = system.labels();

    let inputs = read_inputs(&labels);
    println!();

    match inputs.and_then(|(a, w, l)| compute_with_settings(a, w, l, system, &settings)) {
        Ok(analysis) => {
            print_results(&analysis, settings.decimals);
            prompt_export(&analysis, settings.decimals);
        }
        // No diagrams for rejected input
        Err(e) => report_error("Calculation rejected", &e),
    }
}

fn print_results(analysis: &BeamAnalysis, decimals: usize) {
    let r = &analysis.result;
    let labels = &analysis.labels;

    println!("═══════════════════════════════════════");
    println!("  BEAM RESULTS ({})", analysis.input.unit_system);
    println!("═══════════════════════════════════════");
    println!();
    println!("Input:");
    println!("  a = {:.*} {}", decimals, analysis.input.load_position, labels.length);
    println!("  w = {:.*} {}", decimals, analysis.input.load_magnitude, labels.force);
    println!("  L = {:.*} {}", decimals, analysis.input.span_length, labels.length);
    println!();
    println!("Reactions:");
    println!("  Ra = {:.*} {}", decimals, r.reaction_a, labels.force);
    println!("  Rb = {:.*} {}", decimals, r.reaction_b, labels.force);
    println!();
    println!("Moments:");
    println!("  Ma = {:.*} {}", decimals, r.moment_a, labels.moment);
    println!("  Mb = {:.*} {}  (under the load)", decimals, r.moment_b, labels.moment);
    if let Some((x, m)) = analysis.diagrams.peak_moment() {
        println!(
            "  Peak diagram moment = {:.*} {} at x = {:.*} {}",
            decimals, m, labels.moment, decimals, x, labels.length
        );
    }
    println!();
    print!("{}", render_diagram_table(analysis, decimals));
    println!();

    println!("JSON Output (for API use):");
    if let Ok(json) = serde_json::to_string_pretty(&analysis.result) {
        println!("{}", json);
    }
    println!();
}

/// `.json` targets get a saved analysis record, anything else the text report.
fn prompt_export(analysis: &BeamAnalysis, decimals: usize) {
    let Some(target) = read_line("Export results to file (blank to skip): ") else {
        return;
    };
    if target.is_empty() {
        return;
    }

    let path = Path::new(&target);
    let outcome = if path.extension().is_some_and(|ext| ext == "json") {
        save_analysis(&SavedAnalysis::new(analysis.clone()), path)
    } else {
        export_report(analysis, path, decimals)
    };

    match outcome {
        Ok(()) => println!("Results exported to {}", path.display()),
        Err(e) => report_error("Export failed", &e),
    }
}

fn report_error(context: &str, error: &CalcError) {
    eprintln!("{}: {}", context, error);
    if let Ok(json) = serde_json::to_string_pretty(error) {
        eprintln!();
        eprintln!("Error JSON:");
        eprintln!("{}", json);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_field_uses_default() {
        assert_eq!(parse_field("load_position", "", 2.0).unwrap(), 2.0);
        assert_eq!(parse_field("load_position", "   ", 2.0).unwrap(), 2.0);
    }

    #[test]
    fn test_numeric_field() {
        assert_eq!(parse_field("span_length", " 7.25 ", 5.0).unwrap(), 7.25);
        assert_eq!(parse_field("load_magnitude", "1e3", 10.0).unwrap(), 1000.0);
    }

    #[test]
    fn test_bad_field_is_reported_not_defaulted() {
        match parse_field("load_position", "abc", 2.0) {
            Err(CalcError::InvalidInput { field, value, .. }) => {
                assert_eq!(field, "load_position");
                assert_eq!(value, "abc");
            }
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }
}
