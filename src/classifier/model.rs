//! Classifier boundary
//!
//! The model is loaded once per process. Loading never fails: a missing or
//! broken artifact puts the handle into `Unavailable` and predictions are
//! skipped while everything else keeps working.

use crate::classifier::labels::NUM_CLASSES;
use crate::classifier::preprocess::CHANNELS;
use crate::errors::{Result, SkinError};
use candle_core::{DType, Device, Module, Tensor, D};
use candle_nn::{Conv2d, Conv2dConfig, Linear, VarBuilder};
use log::{info, warn};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Opaque image classifier: batch tensor in, probabilities out
///
/// Implementations hold no mutable state and are shared across sessions.
pub trait Classifier: Send + Sync {
    /// `input` is `(1, H, W, 3)` in `[0, 1]`; returns one probability per class
    fn predict(&self, input: &Tensor) -> Result<Vec<f32>>;

    fn name(&self) -> &str {
        "classifier"
    }
}

/// Result of the load-once call
#[derive(Clone)]
pub enum ModelHandle {
    Loaded(Arc<dyn Classifier>),
    Unavailable { reason: String },
}

impl ModelHandle {
    /// Load a [`SkinNet`] artifact, degrading to `Unavailable` on any error
    pub fn load(path: &Path, device: &Device) -> Self {
        match SkinNet::load(path, device) {
            Ok(net) => {
                info!("loaded classifier from {}", path.display());
                ModelHandle::Loaded(Arc::new(net))
            }
            Err(e) => {
                warn!("classifier unavailable ({}): {}", path.display(), e);
                ModelHandle::Unavailable {
                    reason: e.to_string(),
                }
            }
        }
    }

    pub fn from_classifier<C: Classifier + 'static>(classifier: C) -> Self {
        ModelHandle::Loaded(Arc::new(classifier))
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        ModelHandle::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, ModelHandle::Loaded(_))
    }

    pub fn classifier(&self) -> Option<&Arc<dyn Classifier>> {
        match self {
            ModelHandle::Loaded(classifier) => Some(classifier),
            ModelHandle::Unavailable { .. } => None,
        }
    }

    pub fn unavailable_reason(&self) -> Option<&str> {
        match self {
            ModelHandle::Loaded(_) => None,
            ModelHandle::Unavailable { reason } => Some(reason),
        }
    }
}

impl std::fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelHandle::Loaded(c) => write!(f, "Loaded({})", c.name()),
            ModelHandle::Unavailable { reason } => write!(f, "Unavailable({})", reason),
        }
    }
}

/// Small convolutional classifier read from safetensors.
///
/// Tensors: `conv.weight (C, 3, 3, 3)`, `conv.bias (C)`,
/// `fc.weight (5, C)`, `fc.bias (5)`.
pub struct SkinNet {
    conv: Conv2d,
    fc: Linear,
    hidden: usize,
}

impl SkinNet {
    pub fn new(vb: VarBuilder, hidden: usize) -> Result<Self> {
        let cfg = Conv2dConfig {
            padding: 1,
            stride: 2,
            ..Default::default()
        };
        let conv = candle_nn::conv2d(CHANNELS, hidden, 3, cfg, vb.pp("conv"))?;
        let fc = candle_nn::linear(hidden, NUM_CLASSES, vb.pp("fc"))?;
        Ok(Self { conv, fc, hidden })
    }

    /// Build from named tensors, reading the hidden width from `conv.weight`
    pub fn from_tensors(tensors: HashMap<String, Tensor>, device: &Device) -> Result<Self> {
        let hidden = tensors
            .get("conv.weight")
            .map(|t| t.dims().first().copied().unwrap_or(0))
            .ok_or_else(|| SkinError::Inference("missing tensor conv.weight".to_string()))?;

        if hidden == 0 {
            return Err(SkinError::Inference("conv.weight has no output channels".to_string()));
        }

        let vb = VarBuilder::from_tensors(tensors, DType::F32, device);
        Self::new(vb, hidden)
    }

    pub fn load(path: &Path, device: &Device) -> Result<Self> {
        if !path.exists() {
            return Err(SkinError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("model file not found: {}", path.display()),
            )));
        }
        let tensors = candle_core::safetensors::load(path, device)?;
        Self::from_tensors(tensors, device)
    }

    pub fn hidden_channels(&self) -> usize {
        self.hidden
    }
}

impl Classifier for SkinNet {
    fn predict(&self, input: &Tensor) -> Result<Vec<f32>> {
        // NHWC -> NCHW
        let xs = input.permute((0, 3, 1, 2))?.contiguous()?;
        let xs = self.conv.forward(&xs)?.relu()?;
        let pooled = xs.mean((2, 3))?;
        let logits = self.fc.forward(&pooled)?;
        let probs = candle_nn::ops::softmax(&logits, D::Minus1)?;
        Ok(probs.squeeze(0)?.to_vec1::<f32>()?)
    }

    fn name(&self) -> &str {
        "skinnet"
    }
}
