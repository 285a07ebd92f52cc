use crate::domain::model::{
    BatchInput, BatchResult, Extraction, GelatinizationEntry, GrainAddition, GrainProfile,
    ResolvedAddition, ABV_FACTOR, OUNCES_PER_POUND, POINTS_PER_GRAVITY_UNIT, WATER_GRAVITY,
};
use crate::domain::ports::GrainCatalog;
use crate::utils::error::{BrewError, Result};

/// Projects original gravity and ABV for a batch from a grain catalog.
pub struct GravityCalculator<'a, C: GrainCatalog> {
    catalog: &'a C,
}

impl<'a, C: GrainCatalog> GravityCalculator<'a, C> {
    pub fn new(catalog: &'a C) -> Self {
        Self { catalog }
    }

    /// Computes both extraction scenarios. Every input is validated before any
    /// arithmetic, so a failure never leaves a partial result behind.
    pub fn calculate(&self, input: &BatchInput) -> Result<BatchResult> {
        let gallons = input.water_gallons;
        if !gallons.is_finite() || gallons <= 0.0 {
            return Err(BrewError::InvalidWaterVolume { gallons });
        }
        if !input.final_fermented_gravity.is_finite() {
            return Err(BrewError::InvalidFinalGravity {
                value: input.final_fermented_gravity,
            });
        }

        let mut resolved = Vec::with_capacity(input.additions.len());
        for addition in &input.additions {
            validate_weight(addition)?;
            let profile = self.catalog.lookup_ppg(&addition.grain)?;
            resolved.push((profile, addition.weight_lb()));
        }

        let max_specific_gravity = specific_gravity(&resolved, gallons, Extraction::Maximum);
        let typical_specific_gravity = specific_gravity(&resolved, gallons, Extraction::Typical);

        // ABV uses the unrounded gravities; rounding first drifts the result.
        let max_fermented_abv = fermented_abv(max_specific_gravity, input.final_fermented_gravity);
        let typical_fermented_abv =
            fermented_abv(typical_specific_gravity, input.final_fermented_gravity);

        // Finite inputs can still overflow: a subnormal volume or an enormous weight.
        let computed = [
            max_specific_gravity,
            typical_specific_gravity,
            max_fermented_abv,
            typical_fermented_abv,
        ];
        if computed.iter().any(|value| !value.is_finite()) {
            return Err(overflow_error(&input.additions, &resolved, gallons));
        }

        let gelatinization = input
            .additions
            .iter()
            .map(|addition| GelatinizationEntry {
                grain: addition.grain.clone(),
                temperature_f: self.catalog.lookup_gelatinization(&addition.grain),
            })
            .collect();

        let additions = resolved
            .iter()
            .map(|(profile, pounds)| ResolvedAddition {
                grain: profile.name.clone(),
                pounds: *pounds,
            })
            .collect();

        tracing::debug!(
            water_gallons = gallons,
            additions = input.additions.len(),
            max_specific_gravity,
            typical_specific_gravity,
            "Batch calculated"
        );

        Ok(BatchResult {
            water_gallons: gallons,
            final_fermented_gravity: input.final_fermented_gravity,
            max_specific_gravity,
            typical_specific_gravity,
            max_fermented_abv,
            typical_fermented_abv,
            additions,
            gelatinization,
        })
    }
}

fn validate_weight(addition: &GrainAddition) -> Result<()> {
    for (field, value) in [("pounds", addition.pounds), ("ounces", addition.ounces)] {
        if !value.is_finite() || value < 0.0 {
            return Err(BrewError::InvalidWeight {
                grain: addition.grain.clone(),
                field: field.to_string(),
                value,
            });
        }
    }
    Ok(())
}

/// Blames the input that pushed the gravity out of `f64` range: a weight whose
/// points alone overflow, else a volume that overflows a single term, else the
/// heaviest addition.
fn overflow_error(
    additions: &[GrainAddition],
    resolved: &[(&GrainProfile, f64)],
    gallons: f64,
) -> BrewError {
    let points =
        |(profile, weight_lb): &(&GrainProfile, f64)| f64::from(profile.max_ppg) * *weight_lb;

    let culprit = match additions
        .iter()
        .zip(resolved)
        .find(|&(_, entry)| !points(entry).is_finite())
    {
        Some((addition, _)) => Some(addition),
        None if resolved.iter().any(|entry| !(points(entry) / gallons).is_finite()) => None,
        None => additions
            .iter()
            .max_by(|a, b| a.weight_lb().total_cmp(&b.weight_lb())),
    };

    match culprit {
        Some(addition) => {
            let (field, value) = if addition.pounds >= addition.ounces / OUNCES_PER_POUND {
                ("pounds", addition.pounds)
            } else {
                ("ounces", addition.ounces)
            };
            BrewError::InvalidWeight {
                grain: addition.grain.clone(),
                field: field.to_string(),
                value,
            }
        }
        None => BrewError::InvalidWaterVolume { gallons },
    }
}

/// `sum((ppg * lb) / gal) / 1000 + 1`, evaluated in that order.
pub fn specific_gravity(
    additions: &[(&GrainProfile, f64)],
    water_gallons: f64,
    extraction: Extraction,
) -> f64 {
    let points: f64 = additions
        .iter()
        .filter_map(|(profile, weight_lb)| match extraction.ppg(profile) {
            Some(ppg) => Some((f64::from(ppg) * weight_lb) / water_gallons),
            None => {
                tracing::debug!(
                    "Skipping '{}' in {} extraction: no PPG value",
                    profile.name,
                    extraction
                );
                None
            }
        })
        .sum();

    points / POINTS_PER_GRAVITY_UNIT + WATER_GRAVITY
}

pub fn fermented_abv(specific_gravity: f64, final_fermented_gravity: f64) -> f64 {
    (specific_gravity - final_fermented_gravity) * ABV_FACTOR
}
