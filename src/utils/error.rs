use thiserror::Error;

#[derive(Error, Debug)]
pub enum BrewError {
    #[error("Invalid water volume: {gallons} gallons (must be greater than zero)")]
    InvalidWaterVolume { gallons: f64 },

    #[error("Unknown grain: '{name}'")]
    UnknownGrain { name: String },

    #[error(
        "Mismatched input lengths: {grain_types} grain types, {pounds} pound values, {ounces} ounce values"
    )]
    MismatchedInputLengths {
        grain_types: usize,
        pounds: usize,
        ounces: usize,
    },

    #[error("Invalid weight for '{grain}': {field} = {value}")]
    InvalidWeight {
        grain: String,
        field: String,
        value: f64,
    },

    #[error("Invalid final fermented gravity: {value}")]
    InvalidFinalGravity { value: f64 },

    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Grain catalog error: {message}")]
    CatalogError { message: String },

    #[error("Configuration validation error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid configuration value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV output error: {0}")]
    CsvError(#[from] csv::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Catalog,
    Configuration,
    Io,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl BrewError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            BrewError::InvalidWaterVolume { .. }
            | BrewError::UnknownGrain { .. }
            | BrewError::MismatchedInputLengths { .. }
            | BrewError::InvalidWeight { .. }
            | BrewError::InvalidFinalGravity { .. }
            | BrewError::MissingField { .. } => ErrorCategory::Validation,
            BrewError::CatalogError { .. } => ErrorCategory::Catalog,
            BrewError::ConfigValidationError { .. } | BrewError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            BrewError::IoError(_) => ErrorCategory::Io,
            BrewError::SerializationError(_) | BrewError::CsvError(_) => ErrorCategory::Output,
        }
    }

    /// Validation failures are deterministic and never retried.
    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Validation => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Medium,
            ErrorCategory::Output => ErrorSeverity::Medium,
            ErrorCategory::Catalog => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            BrewError::InvalidWaterVolume { .. } => {
                "Enter a water volume in gallons greater than zero".to_string()
            }
            BrewError::UnknownGrain { .. } => {
                "Run with --list-grains to see the supported grain names (names are case sensitive)"
                    .to_string()
            }
            BrewError::MismatchedInputLengths { .. } => {
                "Give every grain type exactly one pounds value and one ounces value".to_string()
            }
            BrewError::InvalidWeight { .. } => {
                "Pounds and ounces must be zero or positive numbers".to_string()
            }
            BrewError::InvalidFinalGravity { .. } => {
                "Enter the final fermented gravity as a number such as 1.010".to_string()
            }
            BrewError::MissingField { field } => format!("Provide a value for '{}'", field),
            BrewError::CatalogError { .. } => {
                "Check the grain catalog file: every grain needs a unique name, max_ppg > 0 and typical_ppg <= max_ppg".to_string()
            }
            BrewError::ConfigValidationError { field, .. }
            | BrewError::InvalidConfigValueError { field, .. } => {
                format!("Fix the '{}' setting and try again", field)
            }
            BrewError::IoError(_) => "Check that the file exists and is readable".to_string(),
            BrewError::SerializationError(_) | BrewError::CsvError(_) => {
                "Try a different output format".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Validation => format!("The batch could not be calculated: {}", self),
            ErrorCategory::Catalog => format!("The grain catalog could not be loaded: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Io => format!("File access failed: {}", self),
            ErrorCategory::Output => format!("Could not write the report: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, BrewError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_are_high_severity() {
        let err = BrewError::UnknownGrain {
            name: "Unobtainium Malt".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.to_string().contains("Unobtainium Malt"));
    }

    #[test]
    fn test_catalog_errors_are_critical() {
        let err = BrewError::CatalogError {
            message: "duplicate grain".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err.user_friendly_message().starts_with("The grain catalog"));
    }

    #[test]
    fn test_mismatched_lengths_message_lists_counts() {
        let err = BrewError::MismatchedInputLengths {
            grain_types: 2,
            pounds: 1,
            ounces: 2,
        };
        assert_eq!(
            err.to_string(),
            "Mismatched input lengths: 2 grain types, 1 pound values, 2 ounce values"
        );
    }
}
