use crate::domain::model::{BatchInput, GrainAddition};
use crate::utils::error::{BrewError, Result};
use crate::utils::validation;
use serde::{Deserialize, Serialize};

/// Final gravity the first version of the form filled in when left blank.
pub const LEGACY_DEFAULT_FINAL_GRAVITY: f64 = 1.000;

/// How a submission without a final fermented gravity is handled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FinalGravityPolicy {
    Required,
    DefaultTo(f64),
}

impl Default for FinalGravityPolicy {
    fn default() -> Self {
        FinalGravityPolicy::DefaultTo(LEGACY_DEFAULT_FINAL_GRAVITY)
    }
}

impl FinalGravityPolicy {
    pub fn resolve(&self, submitted: Option<f64>) -> Result<f64> {
        match self {
            FinalGravityPolicy::DefaultTo(default) => Ok(submitted.unwrap_or(*default)),
            FinalGravityPolicy::Required => {
                validation::validate_required_field("final_fermented_gravity", &submitted).copied()
            }
        }
    }
}

/// Batch fields in the shape the brewing form posts them: grain names,
/// pounds and ounces as three parallel lists matched up by position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormSubmission {
    pub water_gallons: f64,
    #[serde(default)]
    pub grain_types: Vec<String>,
    #[serde(default)]
    pub pounds: Vec<f64>,
    #[serde(default)]
    pub ounces: Vec<f64>,
    #[serde(default)]
    pub final_fermented_gravity: Option<f64>,
}

impl FormSubmission {
    pub fn into_batch_input(self, policy: FinalGravityPolicy) -> Result<BatchInput> {
        if self.grain_types.len() != self.pounds.len() || self.grain_types.len() != self.ounces.len()
        {
            return Err(BrewError::MismatchedInputLengths {
                grain_types: self.grain_types.len(),
                pounds: self.pounds.len(),
                ounces: self.ounces.len(),
            });
        }

        let final_fermented_gravity = policy.resolve(self.final_fermented_gravity)?;

        let additions = self
            .grain_types
            .into_iter()
            .zip(self.pounds)
            .zip(self.ounces)
            .map(|((grain, pounds), ounces)| GrainAddition {
                grain,
                pounds,
                ounces,
            })
            .collect();

        Ok(BatchInput {
            water_gallons: self.water_gallons,
            additions,
            final_fermented_gravity,
        })
    }
}
