pub mod engine;
pub mod handler;
pub mod submission;

pub use engine::{BatchSource, BrewEngine};
pub use handler::{calculate_report, handle_submission};
pub use submission::{FinalGravityPolicy, FormSubmission};
