//! SkinSnap - skin-care questionnaire and skin condition classifier
//!
//! # Architecture
//!
//! - **questionnaire**: linear stage machine and the tips derived from answers
//! - **classifier**: image preprocessing, model loading and top-1 prediction
//! - **report** / **context**: combine the two for one upload
//! - **repl** / **cli** / **doctor**: terminal surfaces

pub mod errors;

// Re-export commonly used types
pub use errors::{Result, SkinError};

// Domain
pub mod advice;
pub mod classifier;
pub mod questionnaire;
pub mod report;

// Application wiring
pub mod config;
pub mod context;
pub mod telemetry;

// Terminal interface
pub mod cli;
pub mod doctor;
pub mod repl;
