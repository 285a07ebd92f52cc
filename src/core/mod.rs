pub mod calculator;
pub mod catalog;
pub mod report;

pub use crate::domain::model::{BatchInput, BatchResult, GrainAddition};
pub use crate::domain::ports::GrainCatalog;
pub use crate::utils::error::Result;
