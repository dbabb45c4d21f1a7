//! Generation pipeline components.
//!
//! The stages a prompt moves through:
//! - **variants**: expand the base prompt into N styled variants
//! - **store**: persist generated images under deterministic names
//! - **orchestrator**: drive variants -> inference -> store -> slideshow

pub mod orchestrator;
pub mod store;
pub mod variants;

// Re-exports for convenient access
pub use orchestrator::{GenerationRun, RunOutcome, RunState};
pub use store::ArtifactStore;
