use brew_gravity::core::report::{self, OutputFormat};
use brew_gravity::utils::error::{BrewError, ErrorSeverity};
use brew_gravity::utils::{logger, validation::Validate};
use brew_gravity::{BatchSource, BrewEngine, CliConfig, ReferenceCatalog};
use clap::Parser;

fn main() {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting brew-gravity CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    match run(&config) {
        Ok(output) => print!("{}", output),
        Err(e) => {
            tracing::error!(
                "❌ Calculation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            // Exit code follows severity; low-severity errors still exit 0.
            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }
}

fn run(config: &CliConfig) -> Result<String, BrewError> {
    let catalog = ReferenceCatalog::load(config.catalog.as_deref())?;
    tracing::info!("📚 Grain catalog ready ({} grains)", catalog.len());

    if config.list_grains {
        return Ok(list_grains(&catalog));
    }

    let sources = config.batch_sources()?;
    let format = resolve_format(config, &sources)?;

    // An explicit --catalog wins over any [catalog] section in the recipes.
    let engine = BrewEngine::new(catalog, config.final_gravity_policy())
        .with_recipe_catalogs(config.catalog.is_none());
    let reports = engine.run(&sources)?;

    report::render(&reports, format)
}

/// `--format` first, then the first recipe that names one, then text.
fn resolve_format(config: &CliConfig, sources: &[BatchSource]) -> Result<OutputFormat, BrewError> {
    if let Some(format) = config.output_format()? {
        return Ok(format);
    }
    for source in sources {
        if let BatchSource::Recipe(recipe) = source {
            if let Some(format) = recipe.output_format()? {
                return Ok(format);
            }
        }
    }
    Ok(OutputFormat::default())
}

fn list_grains(catalog: &ReferenceCatalog) -> String {
    use brew_gravity::domain::ports::GrainCatalog;

    let mut out = format!(
        "{:<28} {:>7} {:>11} {:>14}\n",
        "Grain", "Max PPG", "Typical PPG", "Gelatinization"
    );
    for grain in catalog.grains() {
        let typical = grain
            .typical_ppg
            .map(|ppg| ppg.to_string())
            .unwrap_or_else(|| "N/A".to_string());
        let gelatinization = match catalog.lookup_gelatinization(&grain.name).fahrenheit() {
            Some(temp) => format!("{}°F", temp),
            None => "N/A".to_string(),
        };
        out.push_str(&format!(
            "{:<28} {:>7} {:>11} {:>14}\n",
            grain.name, grain.max_ppg, typical, gelatinization
        ));
    }
    out
}
