use crate::app::submission::{FinalGravityPolicy, FormSubmission};
use crate::core::calculator::GravityCalculator;
use crate::core::report::BatchReport;
use crate::domain::model::BatchInput;
use crate::domain::ports::GrainCatalog;
use crate::utils::error::Result;

/// Runs one batch through the calculator and formats the outcome.
pub fn calculate_report<C: GrainCatalog>(catalog: &C, input: &BatchInput) -> Result<BatchReport> {
    let result = GravityCalculator::new(catalog).calculate(input)?;
    Ok(BatchReport::from_result(&result))
}

/// Handles one form submission end to end: the parallel lists are checked and
/// zipped, the final gravity policy applied, then the batch is calculated.
pub fn handle_submission<C: GrainCatalog>(
    catalog: &C,
    policy: FinalGravityPolicy,
    submission: FormSubmission,
) -> Result<BatchReport> {
    let outcome = submission
        .into_batch_input(policy)
        .and_then(|input| calculate_report(catalog, &input));

    match &outcome {
        Ok(report) => tracing::info!(
            grains = report.additions.len(),
            max_specific_gravity = %report.max_specific_gravity,
            typical_specific_gravity = %report.typical_specific_gravity,
            "✅ Submission calculated"
        ),
        Err(e) => tracing::warn!(
            category = ?e.category(),
            "❌ Submission rejected: {}",
            e
        ),
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::ReferenceCatalog;
    use crate::utils::error::BrewError;

    #[test]
    fn test_handle_submission_formats_result() {
        let catalog = ReferenceCatalog::builtin().unwrap();
        let form = FormSubmission {
            water_gallons: 5.0,
            grain_types: vec!["2 Row Barley".to_string()],
            pounds: vec![10.0],
            ounces: vec![0.0],
            final_fermented_gravity: None,
        };

        let report = handle_submission(&catalog, FinalGravityPolicy::default(), form).unwrap();
        assert_eq!(report.max_specific_gravity, "1.074");
        assert_eq!(report.typical_specific_gravity, "1.062");
        assert_eq!(report.max_fermented_abv, "9.71");
        assert_eq!(report.typical_fermented_abv, "8.14");
    }

    #[test]
    fn test_handle_submission_rejects_zero_water() {
        let catalog = ReferenceCatalog::builtin().unwrap();
        let form = FormSubmission {
            water_gallons: 0.0,
            final_fermented_gravity: Some(1.0),
            ..FormSubmission::default()
        };

        assert!(matches!(
            handle_submission(&catalog, FinalGravityPolicy::Required, form),
            Err(BrewError::InvalidWaterVolume { .. })
        ));
    }
}
