//! Grain reference catalog.
//!
//! The catalog is a TOML asset compiled into the binary and parsed once at
//! start-up. A replacement file with the same schema can be loaded instead.

use crate::domain::model::{Gelatinization, GrainProfile};
use crate::domain::ports::GrainCatalog;
use crate::utils::error::{BrewError, Result};
use crate::utils::validation::Validate;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

const BUILTIN_CATALOG: &str = include_str!("../../assets/grain_catalog.toml");

const SUPPORTED_VERSION: u32 = 1;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    #[serde(default = "default_version")]
    version: u32,
    #[serde(default)]
    grain: Vec<CatalogEntry>,
}

fn default_version() -> u32 {
    SUPPORTED_VERSION
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogEntry {
    name: String,
    max_ppg: u32,
    typical_ppg: Option<u32>,
    gelatinization_temp_f: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct ReferenceCatalog {
    profiles: Vec<GrainProfile>,
    index: HashMap<String, usize>,
    gelatinization: HashMap<String, u32>,
}

impl ReferenceCatalog {
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("Loading grain catalog from {}", path.display());
        let content = std::fs::read_to_string(path).map_err(BrewError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Loads the catalog file at `path` when one is given, the built-in one otherwise.
    pub fn load(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::builtin(),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(content).map_err(|e| BrewError::CatalogError {
            message: format!("TOML parsing error: {}", e),
        })?;

        if file.version != SUPPORTED_VERSION {
            return Err(BrewError::CatalogError {
                message: format!(
                    "unsupported catalog version {} (expected {})",
                    file.version, SUPPORTED_VERSION
                ),
            });
        }

        let mut profiles = Vec::with_capacity(file.grain.len());
        let mut index = HashMap::with_capacity(file.grain.len());
        let mut gelatinization = HashMap::new();

        for entry in file.grain {
            if index.contains_key(&entry.name) {
                return Err(BrewError::CatalogError {
                    message: format!("duplicate grain '{}'", entry.name),
                });
            }
            if let Some(temp) = entry.gelatinization_temp_f {
                gelatinization.insert(entry.name.clone(), temp);
            }
            index.insert(entry.name.clone(), profiles.len());
            profiles.push(GrainProfile {
                name: entry.name,
                max_ppg: entry.max_ppg,
                typical_ppg: entry.typical_ppg,
            });
        }

        let catalog = Self {
            profiles,
            index,
            gelatinization,
        };
        catalog.validate()?;

        tracing::debug!("Grain catalog loaded with {} grains", catalog.len());
        Ok(catalog)
    }

    /// Grains in catalog order.
    pub fn grains(&self) -> &[GrainProfile] {
        &self.profiles
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }
}

impl GrainCatalog for ReferenceCatalog {
    fn lookup_ppg(&self, name: &str) -> Result<&GrainProfile> {
        self.index
            .get(name)
            .map(|&i| &self.profiles[i])
            .ok_or_else(|| BrewError::UnknownGrain {
                name: name.to_string(),
            })
    }

    fn lookup_gelatinization(&self, name: &str) -> Gelatinization {
        self.gelatinization.get(name).copied().into()
    }
}

impl Validate for ReferenceCatalog {
    fn validate(&self) -> Result<()> {
        if self.profiles.is_empty() {
            return Err(BrewError::CatalogError {
                message: "catalog contains no grains".to_string(),
            });
        }

        for profile in &self.profiles {
            if profile.name.trim().is_empty() {
                return Err(BrewError::CatalogError {
                    message: "grain name cannot be empty".to_string(),
                });
            }
            if profile.max_ppg == 0 {
                return Err(BrewError::CatalogError {
                    message: format!("'{}' must have max_ppg greater than zero", profile.name),
                });
            }
            if let Some(typical) = profile.typical_ppg {
                if typical > profile.max_ppg {
                    return Err(BrewError::CatalogError {
                        message: format!(
                            "'{}' has typical_ppg {} above max_ppg {}",
                            profile.name, typical, profile.max_ppg
                        ),
                    });
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_builtin_catalog_has_reference_grains() {
        let catalog = ReferenceCatalog::builtin().unwrap();
        assert_eq!(catalog.len(), 25);
        assert_eq!(catalog.grains()[0].name, "2 Row Barley");
        assert_eq!(catalog.grains()[24].name, "Sugar (Corn, Cane)");

        let two_row = catalog.lookup_ppg("2 Row Barley").unwrap();
        assert_eq!(two_row.max_ppg, 37);
        assert_eq!(two_row.typical_ppg, Some(31));

        let corn = catalog.lookup_ppg("Cracked Corn").unwrap();
        assert_eq!(corn.max_ppg, 30);
        assert_eq!(corn.typical_ppg, None);
    }

    #[test]
    fn test_every_builtin_grain_has_typical_at_most_max() {
        let catalog = ReferenceCatalog::builtin().unwrap();
        for grain in catalog.grains() {
            if let Some(typical) = grain.typical_ppg {
                assert!(typical <= grain.max_ppg, "{}", grain.name);
            }
        }
    }

    #[test]
    fn test_lookup_ppg_is_exact_match() {
        let catalog = ReferenceCatalog::builtin().unwrap();
        assert!(matches!(
            catalog.lookup_ppg("2 row barley"),
            Err(BrewError::UnknownGrain { .. })
        ));
        assert!(catalog.lookup_ppg("Sugar (Corn, Cane)").is_ok());
    }

    #[test]
    fn test_lookup_gelatinization() {
        let catalog = ReferenceCatalog::builtin().unwrap();
        assert_eq!(
            catalog.lookup_gelatinization("2 Row Barley"),
            Gelatinization::Fahrenheit(149)
        );
        assert_eq!(
            catalog.lookup_gelatinization("Rice (Flaked)"),
            Gelatinization::Fahrenheit(172)
        );
        assert_eq!(
            catalog.lookup_gelatinization("Sugar (Corn, Cane)"),
            Gelatinization::NotApplicable
        );
        assert_eq!(
            catalog.lookup_gelatinization("Not A Grain"),
            Gelatinization::NotApplicable
        );
    }

    #[test]
    fn test_rejects_duplicate_grain() {
        let content = r#"
[[grain]]
name = "Pilsner Malt"
max_ppg = 37

[[grain]]
name = "Pilsner Malt"
max_ppg = 36
"#;
        let err = ReferenceCatalog::from_toml_str(content).unwrap_err();
        assert!(err.to_string().contains("duplicate grain 'Pilsner Malt'"));
    }

    #[test]
    fn test_rejects_typical_above_max() {
        let content = r#"
[[grain]]
name = "Pilsner Malt"
max_ppg = 30
typical_ppg = 31
"#;
        assert!(matches!(
            ReferenceCatalog::from_toml_str(content),
            Err(BrewError::CatalogError { .. })
        ));
    }

    #[test]
    fn test_rejects_zero_max_ppg_and_empty_catalog() {
        let zero = r#"
[[grain]]
name = "Rice Hulls"
max_ppg = 0
"#;
        assert!(ReferenceCatalog::from_toml_str(zero).is_err());
        assert!(ReferenceCatalog::from_toml_str("version = 1\n").is_err());
    }

    #[test]
    fn test_rejects_unknown_version_and_fields() {
        let future = r#"
version = 2

[[grain]]
name = "Pilsner Malt"
max_ppg = 37
"#;
        assert!(ReferenceCatalog::from_toml_str(future).is_err());

        let typo = r#"
[[grain]]
name = "Pilsner Malt"
max_pgp = 37
"#;
        assert!(ReferenceCatalog::from_toml_str(typo).is_err());
    }

    #[test]
    fn test_catalog_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        let content = r#"
version = 1

[[grain]]
name = "Pilsner Malt"
max_ppg = 37
typical_ppg = 32
gelatinization_temp_f = 149

[[grain]]
name = "Candi Sugar"
max_ppg = 46
"#;
        temp_file.write_all(content.as_bytes()).unwrap();

        let catalog = ReferenceCatalog::from_file(temp_file.path()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.contains("Candi Sugar"));
        assert!(!catalog.contains("2 Row Barley"));
        assert_eq!(
            catalog.lookup_gelatinization("Candi Sugar"),
            Gelatinization::NotApplicable
        );
    }

    #[test]
    fn test_missing_catalog_file_is_io_error() {
        let err = ReferenceCatalog::load(Some("/nonexistent/grains.toml")).unwrap_err();
        assert!(matches!(err, BrewError::IoError(_)));
    }
}
