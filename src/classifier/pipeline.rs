//! Upload → preprocess → predict → tip lookup

use crate::advice;
use crate::classifier::labels::{capitalize, label_for_index};
use crate::classifier::model::ModelHandle;
use crate::classifier::preprocess;
use crate::errors::{Result, SkinError};
use crate::telemetry::{TelemetryCollector, TelemetryEvent};
use candle_core::{Device, Tensor};
use image::DynamicImage;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;

/// Top-1 prediction for one uploaded image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub label: String,
    pub class_index: usize,
    /// Probability of the predicted class, 0-100
    pub confidence: f32,
    pub tip: String,
}

impl ClassificationResult {
    /// Argmax over `probabilities`; ties resolve to the lowest index
    pub fn from_probabilities(probabilities: &[f32]) -> Result<Self> {
        let (class_index, best) = probabilities
            .iter()
            .copied()
            .enumerate()
            .fold(None, |best: Option<(usize, f32)>, (i, p)| match best {
                Some((_, bp)) if bp >= p => best,
                _ => Some((i, p)),
            })
            .ok_or_else(|| SkinError::Inference("classifier returned no probabilities".to_string()))?;

        if !best.is_finite() {
            return Err(SkinError::Inference(format!("non-finite probability {}", best)));
        }

        let label = label_for_index(class_index);
        let tip = advice::tip_for_label(&label).to_string();

        Ok(Self {
            label,
            class_index,
            confidence: best * 100.0,
            tip,
        })
    }

    pub fn display_label(&self) -> String {
        capitalize(&self.label)
    }
}

/// What the pipeline produced for one upload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ClassificationOutcome {
    Predicted(ClassificationResult),
    Unavailable { reason: String },
}

impl ClassificationOutcome {
    pub fn prediction(&self) -> Option<&ClassificationResult> {
        match self {
            ClassificationOutcome::Predicted(result) => Some(result),
            ClassificationOutcome::Unavailable { .. } => None,
        }
    }
}

/// A classified upload together with its decoded dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageAnalysis {
    pub width: u32,
    pub height: u32,
    pub outcome: ClassificationOutcome,
}

pub struct ClassificationPipeline {
    model: ModelHandle,
    device: Device,
    telemetry: TelemetryCollector,
}

impl ClassificationPipeline {
    pub fn new(model: ModelHandle, device: Device) -> Self {
        Self {
            model,
            device,
            telemetry: TelemetryCollector::new(),
        }
    }

    /// Report events into a shared collector
    pub fn with_telemetry(mut self, telemetry: TelemetryCollector) -> Self {
        self.telemetry = telemetry;
        self
    }

    pub fn model(&self) -> &ModelHandle {
        &self.model
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn classify_path(&self, path: &Path) -> Result<ImageAnalysis> {
        if let Err(e) = preprocess::check_extension(path) {
            self.telemetry.record(TelemetryEvent::UploadRejected {
                reason: e.to_string(),
                timestamp: Instant::now(),
            });
            return Err(e);
        }
        let bytes = std::fs::read(path)?;
        self.classify_bytes(&bytes)
    }

    pub fn classify_bytes(&self, bytes: &[u8]) -> Result<ImageAnalysis> {
        let img = match preprocess::decode_image(bytes) {
            Ok(img) => img,
            Err(e) => {
                self.telemetry.record(TelemetryEvent::UploadRejected {
                    reason: e.to_string(),
                    timestamp: Instant::now(),
                });
                return Err(e);
            }
        };
        self.classify_image(&img)
    }

    pub fn classify_image(&self, img: &DynamicImage) -> Result<ImageAnalysis> {
        self.telemetry.record(TelemetryEvent::ImageDecoded {
            width: img.width(),
            height: img.height(),
            timestamp: Instant::now(),
        });

        let tensor = preprocess::prepare_tensor(img, &self.device)?;
        let outcome = self.classify_tensor(&tensor)?;

        Ok(ImageAnalysis {
            width: img.width(),
            height: img.height(),
            outcome,
        })
    }

    /// Run the classifier on an already prepared batch tensor
    pub fn classify_tensor(&self, tensor: &Tensor) -> Result<ClassificationOutcome> {
        let classifier = match &self.model {
            ModelHandle::Loaded(classifier) => classifier,
            ModelHandle::Unavailable { reason } => {
                debug!("skipping inference: {}", reason);
                self.telemetry.record(TelemetryEvent::ModelUnavailable {
                    timestamp: Instant::now(),
                });
                return Ok(ClassificationOutcome::Unavailable {
                    reason: reason.clone(),
                });
            }
        };

        let start = Instant::now();
        let probabilities = classifier.predict(tensor)?;
        let result = ClassificationResult::from_probabilities(&probabilities)?;
        let duration_ms = start.elapsed().as_millis() as u64;

        info!(
            "predicted {} ({:.2}%) in {}ms",
            result.label, result.confidence, duration_ms
        );
        self.telemetry.record(TelemetryEvent::InferenceCompleted {
            label: result.label.clone(),
            confidence: result.confidence,
            duration_ms,
            timestamp: Instant::now(),
        });

        Ok(ClassificationOutcome::Predicted(result))
    }
}
