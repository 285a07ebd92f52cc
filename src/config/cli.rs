use crate::app::engine::BatchSource;
use crate::app::submission::{FinalGravityPolicy, FormSubmission};
use crate::config::toml_config::RecipeConfig;
use crate::core::report::{OutputFormat, OUTPUT_FORMATS};
use crate::utils::error::{BrewError, Result};
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "brew-gravity")]
#[command(about = "Projects original gravity and ABV for a homebrew grain bill")]
pub struct CliConfig {
    /// Water volume in gallons
    #[arg(short, long)]
    pub water_gallons: Option<f64>,

    /// Grain name, repeat once per addition (see --list-grains)
    #[arg(short, long = "grain-type")]
    pub grain_types: Vec<String>,

    /// Pounds for each --grain-type, in the same order
    #[arg(short, long, allow_negative_numbers = true)]
    pub pounds: Vec<f64>,

    /// Ounces for each --grain-type, in the same order
    #[arg(short, long, allow_negative_numbers = true)]
    pub ounces: Vec<f64>,

    /// Expected final fermented gravity, e.g. 1.010
    #[arg(short, long)]
    pub final_gravity: Option<f64>,

    /// Fail instead of assuming 1.000 when no final gravity is given
    #[arg(long)]
    pub require_final_gravity: bool,

    /// Recipe TOML file to calculate, may be repeated
    #[arg(short, long = "recipe")]
    pub recipes: Vec<String>,

    /// Grain catalog TOML file replacing the built-in catalog
    #[arg(long)]
    pub catalog: Option<String>,

    /// Output format: text, json or csv
    #[arg(long)]
    pub format: Option<String>,

    /// Print the grain catalog and exit
    #[arg(long)]
    pub list_grains: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn final_gravity_policy(&self) -> FinalGravityPolicy {
        if self.require_final_gravity {
            FinalGravityPolicy::Required
        } else {
            FinalGravityPolicy::default()
        }
    }

    /// The batch given directly on the command line, if any.
    pub fn submission(&self) -> Option<FormSubmission> {
        self.water_gallons.map(|water_gallons| FormSubmission {
            water_gallons,
            grain_types: self.grain_types.clone(),
            pounds: self.pounds.clone(),
            ounces: self.ounces.clone(),
            final_fermented_gravity: self.final_gravity,
        })
    }

    pub fn output_format(&self) -> Result<Option<OutputFormat>> {
        self.format.as_deref().map(str::parse::<OutputFormat>).transpose()
    }

    /// Recipe files first, in the order given, then the command-line batch.
    pub fn batch_sources(&self) -> Result<Vec<BatchSource>> {
        let mut sources = Vec::with_capacity(self.recipes.len() + 1);
        for path in &self.recipes {
            tracing::debug!("Loading recipe from {}", path);
            sources.push(BatchSource::Recipe(RecipeConfig::from_file(path)?));
        }
        if let Some(submission) = self.submission() {
            sources.push(BatchSource::Form(submission));
        }
        Ok(sources)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(catalog) = &self.catalog {
            validation::validate_path("catalog", catalog)?;
        }
        if let Some(format) = &self.format {
            validation::validate_one_of("format", format, &OUTPUT_FORMATS)?;
        }
        if self.list_grains {
            return Ok(());
        }

        for recipe in &self.recipes {
            validation::validate_path("recipe", recipe)?;
        }
        validation::validate_file_extensions("recipe", &self.recipes, &["toml"])?;

        let has_form_fields =
            !self.grain_types.is_empty() || !self.pounds.is_empty() || !self.ounces.is_empty();
        if self.water_gallons.is_none() && has_form_fields {
            return Err(BrewError::MissingField {
                field: "water_gallons".to_string(),
            });
        }
        if self.water_gallons.is_none() && self.recipes.is_empty() {
            return Err(BrewError::ConfigValidationError {
                field: "input".to_string(),
                message: "Nothing to calculate: pass --water-gallons with grains, or --recipe"
                    .to_string(),
            });
        }

        Ok(())
    }
}
