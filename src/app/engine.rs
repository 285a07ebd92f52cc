use crate::app::handler::{calculate_report, handle_submission};
use crate::app::submission::{FinalGravityPolicy, FormSubmission};
use crate::config::toml_config::RecipeConfig;
use crate::core::catalog::ReferenceCatalog;
use crate::core::report::BatchReport;
use crate::utils::error::Result;
use crate::utils::validation::Validate;

/// Where one batch comes from.
#[derive(Debug, Clone)]
pub enum BatchSource {
    Form(FormSubmission),
    Recipe(RecipeConfig),
}

pub struct BrewEngine {
    catalog: ReferenceCatalog,
    policy: FinalGravityPolicy,
    recipe_catalogs: bool,
}

impl BrewEngine {
    pub fn new(catalog: ReferenceCatalog, policy: FinalGravityPolicy) -> Self {
        Self {
            catalog,
            policy,
            recipe_catalogs: true,
        }
    }

    /// When disabled, a recipe's `[catalog] path` is ignored and every batch
    /// uses the engine's catalog.
    pub fn with_recipe_catalogs(mut self, enabled: bool) -> Self {
        self.recipe_catalogs = enabled;
        self
    }

    /// Calculates every batch in order. The first failure aborts the run.
    pub fn run(&self, sources: &[BatchSource]) -> Result<Vec<BatchReport>> {
        tracing::info!("Calculating {} batch(es)", sources.len());

        let mut reports = Vec::with_capacity(sources.len());
        for source in sources {
            reports.push(self.report_for(source)?);
        }

        tracing::info!("Calculated {} report(s)", reports.len());
        Ok(reports)
    }

    fn report_for(&self, source: &BatchSource) -> Result<BatchReport> {
        match source {
            BatchSource::Form(submission) => {
                handle_submission(&self.catalog, self.policy, submission.clone())
            }
            BatchSource::Recipe(recipe) => {
                recipe.validate()?;
                let input = recipe.to_batch_input(self.policy)?;
                tracing::debug!("Calculating recipe '{}'", recipe.name());

                let report = match recipe.catalog_path() {
                    Some(path) if self.recipe_catalogs => {
                        let catalog = ReferenceCatalog::from_file(path)?;
                        calculate_report(&catalog, &input)?
                    }
                    _ => calculate_report(&self.catalog, &input)?,
                };
                Ok(report.with_name(recipe.name()))
            }
        }
    }
}
