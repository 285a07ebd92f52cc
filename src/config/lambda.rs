use crate::app::submission::FinalGravityPolicy;
use crate::utils::error::{BrewError, Result};
use crate::utils::validation::{self, Validate};
use std::env;

pub const CATALOG_PATH_VAR: &str = "BREWCALC_CATALOG_PATH";
pub const DEFAULT_FINAL_GRAVITY_VAR: &str = "BREWCALC_DEFAULT_FINAL_GRAVITY";

/// Request handler settings, read from the function's environment.
#[derive(Debug, Clone, PartialEq)]
pub struct LambdaConfig {
    pub catalog_path: Option<String>,
    pub default_final_gravity: Option<f64>,
}

impl LambdaConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`LambdaConfig::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let catalog_path = lookup(CATALOG_PATH_VAR).filter(|p| !p.trim().is_empty());

        let default_final_gravity = match lookup(DEFAULT_FINAL_GRAVITY_VAR) {
            Some(raw) if !raw.trim().is_empty() => {
                Some(raw.trim().parse::<f64>().map_err(|e| {
                    BrewError::InvalidConfigValueError {
                        field: DEFAULT_FINAL_GRAVITY_VAR.to_string(),
                        value: raw.clone(),
                        reason: e.to_string(),
                    }
                })?)
            }
            _ => None,
        };

        Ok(Self {
            catalog_path,
            default_final_gravity,
        })
    }

    /// Without a configured default the final gravity is mandatory.
    pub fn final_gravity_policy(&self) -> FinalGravityPolicy {
        match self.default_final_gravity {
            Some(value) => FinalGravityPolicy::DefaultTo(value),
            None => FinalGravityPolicy::Required,
        }
    }
}

impl Validate for LambdaConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.catalog_path {
            validation::validate_path(CATALOG_PATH_VAR, path)?;
        }
        if let Some(gravity) = self.default_final_gravity {
            validation::validate_range(DEFAULT_FINAL_GRAVITY_VAR, gravity, 0.9, 1.2)?;
        }

        tracing::info!("✅ Lambda configuration validation passed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<LambdaConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        LambdaConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults_require_final_gravity() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.catalog_path, None);
        assert_eq!(config.final_gravity_policy(), FinalGravityPolicy::Required);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_final_gravity_from_env() {
        let config = config_from(&[
            (DEFAULT_FINAL_GRAVITY_VAR, "1.000"),
            (CATALOG_PATH_VAR, "/opt/grains.toml"),
        ])
        .unwrap();
        assert_eq!(config.final_gravity_policy(), FinalGravityPolicy::DefaultTo(1.0));
        assert_eq!(config.catalog_path.as_deref(), Some("/opt/grains.toml"));
    }

    #[test]
    fn test_invalid_default_final_gravity() {
        assert!(config_from(&[(DEFAULT_FINAL_GRAVITY_VAR, "dry")]).is_err());

        let config = config_from(&[(DEFAULT_FINAL_GRAVITY_VAR, "3.5")]).unwrap();
        assert!(config.validate().is_err());
    }
}
