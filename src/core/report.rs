//! Formatting of calculation results.
//!
//! Specific gravities are shown with three decimals and ABV with two. The
//! rounding is applied here and nowhere earlier.

use crate::domain::model::{BatchResult, GelatinizationEntry, ResolvedAddition};
use crate::utils::error::{BrewError, Result};
use serde::Serialize;
use std::fmt::Write as _;

pub const OUTPUT_FORMATS: [&str; 3] = ["text", "json", "csv"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = BrewError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(BrewError::InvalidConfigValueError {
                field: "format".to_string(),
                value: s.to_string(),
                reason: format!("Unsupported format. Valid formats: {}", OUTPUT_FORMATS.join(", ")),
            }),
        }
    }
}

/// One entry of the legacy grain -> pounds summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrainQuantity {
    pub grain: String,
    pub pounds: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub water_gallons: f64,
    pub final_fermented_gravity: String,
    pub max_specific_gravity: String,
    pub typical_specific_gravity: String,
    pub max_fermented_abv: String,
    pub typical_fermented_abv: String,
    pub grain_gelatinization_temps: Vec<GelatinizationEntry>,
    pub grain_quantities: Vec<GrainQuantity>,
    pub additions: Vec<ResolvedAddition>,
}

impl BatchReport {
    pub fn from_result(result: &BatchResult) -> Self {
        Self {
            name: None,
            water_gallons: result.water_gallons,
            final_fermented_gravity: format_gravity(result.final_fermented_gravity),
            max_specific_gravity: format_gravity(result.max_specific_gravity),
            typical_specific_gravity: format_gravity(result.typical_specific_gravity),
            max_fermented_abv: format_abv(result.max_fermented_abv),
            typical_fermented_abv: format_abv(result.typical_fermented_abv),
            grain_gelatinization_temps: result.gelatinization.clone(),
            grain_quantities: collapse_quantities(&result.additions),
            additions: result.additions.clone(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

pub fn format_gravity(value: f64) -> String {
    format!("{:.3}", value)
}

pub fn format_abv(value: f64) -> String {
    format!("{:.2}", value)
}

/// Grain -> pounds summary with one entry per grain name. A repeated grain
/// keeps the position of its first addition and the weight of its last one,
/// the way the form page has always shown it. `additions` has the full list.
pub fn collapse_quantities(additions: &[ResolvedAddition]) -> Vec<GrainQuantity> {
    let mut summary: Vec<GrainQuantity> = Vec::with_capacity(additions.len());
    for addition in additions {
        match summary.iter_mut().find(|q| q.grain == addition.grain) {
            Some(existing) => existing.pounds = addition.pounds,
            None => summary.push(GrainQuantity {
                grain: addition.grain.clone(),
                pounds: addition.pounds,
            }),
        }
    }
    summary
}

pub fn render(reports: &[BatchReport], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(reports)),
        OutputFormat::Json => render_json(reports),
        OutputFormat::Csv => render_csv(reports),
    }
}

pub fn render_text(reports: &[BatchReport]) -> String {
    let mut out = String::new();
    for (i, report) in reports.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        // Writing to a String cannot fail.
        let _ = write_text_report(&mut out, report);
    }
    out
}

fn write_text_report(out: &mut String, report: &BatchReport) -> std::fmt::Result {
    if let Some(name) = &report.name {
        writeln!(out, "{}", name)?;
        writeln!(out, "{}", "=".repeat(name.chars().count()))?;
    }
    writeln!(out, "Water: {} gal", report.water_gallons)?;
    writeln!(out, "Final fermented gravity: {}", report.final_fermented_gravity)?;
    writeln!(out)?;
    writeln!(out, "{:<20} {:>10} {:>10}", "", "Maximum", "Typical")?;
    writeln!(
        out,
        "{:<20} {:>10} {:>10}",
        "Specific gravity", report.max_specific_gravity, report.typical_specific_gravity
    )?;
    writeln!(
        out,
        "{:<20} {:>9}% {:>9}%",
        "ABV", report.max_fermented_abv, report.typical_fermented_abv
    )?;

    if !report.grain_gelatinization_temps.is_empty() {
        writeln!(out)?;
        writeln!(out, "Grains:")?;
        for (addition, gelatinization) in report
            .additions
            .iter()
            .zip(&report.grain_gelatinization_temps)
        {
            let temp = match gelatinization.temperature_f.fahrenheit() {
                Some(temp) => format!("{}°F", temp),
                None => gelatinization.temperature_f.to_string(),
            };
            writeln!(
                out,
                "  {:<28} {:>8.3} lb   gelatinization {}",
                addition.grain, addition.pounds, temp
            )?;
        }
    }
    Ok(())
}

pub fn render_json(reports: &[BatchReport]) -> Result<String> {
    let json = match reports {
        [single] => serde_json::to_string_pretty(single)?,
        _ => serde_json::to_string_pretty(reports)?,
    };
    Ok(json)
}

#[derive(Serialize)]
struct CsvRow<'a> {
    name: &'a str,
    water_gallons: f64,
    final_fermented_gravity: &'a str,
    max_specific_gravity: &'a str,
    typical_specific_gravity: &'a str,
    max_fermented_abv: &'a str,
    typical_fermented_abv: &'a str,
    grains: usize,
}

/// One summary row per report.
pub fn render_csv(reports: &[BatchReport]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for report in reports {
        writer.serialize(CsvRow {
            name: report.name.as_deref().unwrap_or(""),
            water_gallons: report.water_gallons,
            final_fermented_gravity: &report.final_fermented_gravity,
            max_specific_gravity: &report.max_specific_gravity,
            typical_specific_gravity: &report.typical_specific_gravity,
            max_fermented_abv: &report.max_fermented_abv,
            typical_fermented_abv: &report.typical_fermented_abv,
            grains: report.additions.len(),
        })?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| BrewError::IoError(e.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|e| BrewError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}
