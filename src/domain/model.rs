use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Ounces per pound, used to fold a pounds + ounces weight into pounds.
pub const OUNCES_PER_POUND: f64 = 16.0;

/// Gravity points per unit of specific gravity.
pub const POINTS_PER_GRAVITY_UNIT: f64 = 1000.0;

/// Specific gravity of plain water.
pub const WATER_GRAVITY: f64 = 1.0;

/// Simplified linear ABV factor: `(OG - FG) * 131.25`.
pub const ABV_FACTOR: f64 = 131.25;

/// Extraction figures for one grain, in gravity points per pound per gallon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrainProfile {
    pub name: String,
    pub max_ppg: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typical_ppg: Option<u32>,
}

/// Temperature at which a grain's starch gelatinizes during the mash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gelatinization {
    Fahrenheit(u32),
    NotApplicable,
}

impl Gelatinization {
    pub fn fahrenheit(&self) -> Option<u32> {
        match self {
            Gelatinization::Fahrenheit(temp) => Some(*temp),
            Gelatinization::NotApplicable => None,
        }
    }
}

impl From<Option<u32>> for Gelatinization {
    fn from(value: Option<u32>) -> Self {
        value.map_or(Gelatinization::NotApplicable, Gelatinization::Fahrenheit)
    }
}

impl fmt::Display for Gelatinization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gelatinization::Fahrenheit(temp) => write!(f, "{}", temp),
            Gelatinization::NotApplicable => f.write_str("N/A"),
        }
    }
}

// Serialized as a bare number or the string "N/A", the shape the form page renders.
impl Serialize for Gelatinization {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Gelatinization::Fahrenheit(temp) => serializer.serialize_u32(*temp),
            Gelatinization::NotApplicable => serializer.serialize_str("N/A"),
        }
    }
}

/// Which PPG column of the catalog a weighted sum reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extraction {
    Maximum,
    Typical,
}

impl Extraction {
    /// The PPG value this scenario uses, or `None` when the grain should be
    /// left out of the sum. Zero counts as absent.
    pub fn ppg(&self, profile: &GrainProfile) -> Option<u32> {
        let value = match self {
            Extraction::Maximum => Some(profile.max_ppg),
            Extraction::Typical => profile.typical_ppg,
        };
        value.filter(|ppg| *ppg > 0)
    }
}

impl fmt::Display for Extraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Extraction::Maximum => f.write_str("maximum"),
            Extraction::Typical => f.write_str("typical"),
        }
    }
}

/// One grain entry of a batch, as submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrainAddition {
    pub grain: String,
    pub pounds: f64,
    #[serde(default)]
    pub ounces: f64,
}

impl GrainAddition {
    pub fn new(grain: impl Into<String>, pounds: f64, ounces: f64) -> Self {
        Self {
            grain: grain.into(),
            pounds,
            ounces,
        }
    }

    pub fn weight_lb(&self) -> f64 {
        self.pounds + self.ounces / OUNCES_PER_POUND
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchInput {
    pub water_gallons: f64,
    pub additions: Vec<GrainAddition>,
    pub final_fermented_gravity: f64,
}

/// A grain of the batch with its combined weight in pounds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedAddition {
    pub grain: String,
    pub pounds: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GelatinizationEntry {
    pub grain: String,
    pub temperature_f: Gelatinization,
}

/// Full-precision outcome of a calculation. Rounding happens only when a
/// [`crate::core::report::BatchReport`] is built from it.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchResult {
    pub water_gallons: f64,
    pub final_fermented_gravity: f64,
    pub max_specific_gravity: f64,
    pub typical_specific_gravity: f64,
    pub max_fermented_abv: f64,
    pub typical_fermented_abv: f64,
    pub additions: Vec<ResolvedAddition>,
    pub gelatinization: Vec<GelatinizationEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(max_ppg: u32, typical_ppg: Option<u32>) -> GrainProfile {
        GrainProfile {
            name: "Test Grain".to_string(),
            max_ppg,
            typical_ppg,
        }
    }

    #[test]
    fn test_weight_folds_ounces_into_pounds() {
        assert_eq!(GrainAddition::new("2 Row Barley", 1.0, 8.0).weight_lb(), 1.5);
        assert_eq!(GrainAddition::new("2 Row Barley", 0.0, 16.0).weight_lb(), 1.0);
    }

    #[test]
    fn test_extraction_skips_absent_and_zero_ppg() {
        assert_eq!(Extraction::Maximum.ppg(&profile(30, None)), Some(30));
        assert_eq!(Extraction::Typical.ppg(&profile(30, None)), None);
        assert_eq!(Extraction::Typical.ppg(&profile(30, Some(0))), None);
        assert_eq!(Extraction::Maximum.ppg(&profile(0, Some(0))), None);
    }

    #[test]
    fn test_gelatinization_display_and_json() {
        assert_eq!(Gelatinization::Fahrenheit(149).to_string(), "149");
        assert_eq!(Gelatinization::NotApplicable.to_string(), "N/A");
        assert_eq!(
            serde_json::to_string(&Gelatinization::Fahrenheit(149)).unwrap(),
            "149"
        );
        assert_eq!(
            serde_json::to_string(&Gelatinization::NotApplicable).unwrap(),
            "\"N/A\""
        );
        assert_eq!(Gelatinization::from(None), Gelatinization::NotApplicable);
    }
}
