use crate::domain::model::{Gelatinization, GrainProfile};
use crate::utils::error::Result;

/// Read-only grain reference data, looked up by exact grain name.
pub trait GrainCatalog: Send + Sync {
    /// Fails with `UnknownGrain` when the name is not in the catalog.
    fn lookup_ppg(&self, name: &str) -> Result<&GrainProfile>;

    /// Never fails: grains without a known temperature, including names the
    /// catalog does not carry, yield `NotApplicable`.
    fn lookup_gelatinization(&self, name: &str) -> Gelatinization;
}
