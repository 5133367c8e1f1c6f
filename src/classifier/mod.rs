//! Image classification pipeline
//!
//! - `preprocess`: JPEG/PNG input boundary and tensor preparation
//! - `model`: load-once classifier handle and the candle network
//! - `pipeline`: ties them together and looks up the tip
//! - `labels`: the five skin condition classes

pub mod labels;
pub mod model;
pub mod pipeline;
pub mod preprocess;

pub use labels::{SkinCondition, CLASS_NAMES, NUM_CLASSES};
pub use model::{Classifier, ModelHandle, SkinNet};
pub use pipeline::{ClassificationOutcome, ClassificationPipeline, ClassificationResult, ImageAnalysis};
pub use preprocess::IMG_SIZE;
