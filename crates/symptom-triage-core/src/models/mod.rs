//! Domain models for the symptom-triage system.

mod patient;
mod prediction;
mod risk;

pub use patient::*;
pub use prediction::*;
pub use risk::*;
