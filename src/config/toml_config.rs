use crate::app::submission::FinalGravityPolicy;
use crate::core::report::{OutputFormat, OUTPUT_FORMATS};
use crate::domain::model::{BatchInput, GrainAddition};
use crate::utils::error::{BrewError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A recipe file: one batch plus optional catalog and output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeConfig {
    pub recipe: RecipeSection,
    #[serde(default)]
    pub grains: Vec<GrainEntry>,
    pub catalog: Option<CatalogConfig>,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeSection {
    pub name: String,
    pub description: Option<String>,
    pub water_gallons: f64,
    pub final_gravity: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrainEntry {
    pub name: String,
    #[serde(default)]
    pub pounds: f64,
    #[serde(default)]
    pub ounces: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: Option<String>,
}

impl RecipeConfig {
    /// Loads a recipe from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(BrewError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| BrewError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the variable's value. Unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| BrewError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Checks the file's own settings. Water volume and weights are left to the
    /// calculator so recipes and forms report the same error kinds.
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("recipe.name", &self.recipe.name)?;

        for (i, grain) in self.grains.iter().enumerate() {
            validation::validate_non_empty_string(&format!("grains[{}].name", i), &grain.name)?;
        }

        if let Some(catalog) = &self.catalog {
            validation::validate_path("catalog.path", &catalog.path)?;
        }

        if let Some(format) = self.output.as_ref().and_then(|o| o.format.as_deref()) {
            validation::validate_one_of("output.format", format, &OUTPUT_FORMATS)?;
        }

        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.recipe.name
    }

    pub fn catalog_path(&self) -> Option<&str> {
        self.catalog.as_ref().map(|c| c.path.as_str())
    }

    pub fn output_format(&self) -> Result<Option<OutputFormat>> {
        self.output
            .as_ref()
            .and_then(|o| o.format.as_deref())
            .map(str::parse::<OutputFormat>)
            .transpose()
    }

    /// The batch this recipe describes, with a missing final gravity resolved by `policy`.
    pub fn to_batch_input(&self, policy: FinalGravityPolicy) -> Result<BatchInput> {
        let final_fermented_gravity = policy.resolve(self.recipe.final_gravity)?;

        Ok(BatchInput {
            water_gallons: self.recipe.water_gallons,
            additions: self
                .grains
                .iter()
                .map(|g| GrainAddition::new(g.name.clone(), g.pounds, g.ounces))
                .collect(),
            final_fermented_gravity,
        })
    }
}

impl Validate for RecipeConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
