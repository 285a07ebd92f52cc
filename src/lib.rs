pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use app::{BatchSource, BrewEngine, FinalGravityPolicy, FormSubmission};
pub use config::{LambdaConfig, RecipeConfig};
pub use crate::core::{
    calculator::GravityCalculator, catalog::ReferenceCatalog, report::BatchReport,
};
pub use utils::error::{BrewError, Result};
