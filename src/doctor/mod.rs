//! Doctor command for system diagnostics
//!
//! Checks the configuration and the classifier artifact before a session.

use crate::classifier::preprocess::{CHANNELS, IMG_SIZE};
use crate::classifier::{ModelHandle, NUM_CLASSES};
use crate::config::Config;
use candle_core::{DType, Device, Tensor};
use colored::Colorize;
use std::path::PathBuf;

/// Health check result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Pass,
    Warn(String),
    Fail(String),
}

/// Individual health check
#[derive(Debug)]
pub struct HealthCheck {
    pub name: String,
    pub status: HealthStatus,
}

impl HealthCheck {
    fn new(name: &str, status: HealthStatus) -> Self {
        Self {
            name: name.to_string(),
            status,
        }
    }
}

/// Doctor diagnostics system
pub struct Doctor {
    config: Config,
    device: Device,
}

impl Doctor {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            device: Device::Cpu,
        }
    }

    /// Run all health checks
    pub fn run_diagnostics(&self) -> Vec<HealthCheck> {
        let mut checks = vec![self.check_config(), self.check_model_file()];

        let handle = ModelHandle::load(&self.model_path(), &self.device);
        checks.push(self.check_model_load(&handle));
        checks.push(self.check_dry_run(&handle));
        checks.push(self.check_state_dir());

        checks
    }

    fn model_path(&self) -> PathBuf {
        self.config.model_path()
    }

    /// Check 1: Configuration values
    fn check_config(&self) -> HealthCheck {
        match self.config.validate() {
            Ok(()) => HealthCheck::new("Configuration", HealthStatus::Pass),
            Err(e) => HealthCheck::new("Configuration", HealthStatus::Fail(e.to_string())),
        }
    }

    /// Check 2: Model artifact present
    fn check_model_file(&self) -> HealthCheck {
        let path = self.model_path();
        if path.is_file() {
            HealthCheck::new("Model File", HealthStatus::Pass)
        } else {
            HealthCheck::new(
                "Model File",
                HealthStatus::Warn(format!("{} not found, predictions disabled", path.display())),
            )
        }
    }

    /// Check 3: Model artifact loads
    fn check_model_load(&self, handle: &ModelHandle) -> HealthCheck {
        match handle {
            ModelHandle::Loaded(_) => HealthCheck::new("Model Load", HealthStatus::Pass),
            ModelHandle::Unavailable { reason } if self.model_path().is_file() => {
                HealthCheck::new("Model Load", HealthStatus::Fail(reason.clone()))
            }
            ModelHandle::Unavailable { .. } => {
                HealthCheck::new("Model Load", HealthStatus::Warn("skipped, no model file".to_string()))
            }
        }
    }

    /// Check 4: One prediction on an all-zero input
    fn check_dry_run(&self, handle: &ModelHandle) -> HealthCheck {
        let classifier = match handle.classifier() {
            Some(classifier) => classifier,
            None => {
                return HealthCheck::new("Dry Run", HealthStatus::Warn("skipped, model unavailable".to_string()))
            }
        };

        let side = IMG_SIZE as usize;
        let input = match Tensor::zeros((1, side, side, CHANNELS), DType::F32, &self.device) {
            Ok(t) => t,
            Err(e) => return HealthCheck::new("Dry Run", HealthStatus::Fail(e.to_string())),
        };

        match classifier.predict(&input) {
            Ok(probs) if probs.len() != NUM_CLASSES => HealthCheck::new(
                "Dry Run",
                HealthStatus::Fail(format!("expected {} outputs, got {}", NUM_CLASSES, probs.len())),
            ),
            Ok(probs) if probs.iter().any(|p| !p.is_finite()) => {
                HealthCheck::new("Dry Run", HealthStatus::Fail("non-finite probability".to_string()))
            }
            Ok(_) => HealthCheck::new("Dry Run", HealthStatus::Pass),
            Err(e) => HealthCheck::new("Dry Run", HealthStatus::Fail(e.to_string())),
        }
    }

    /// Check 5: State directory writable (history file lives there)
    fn check_state_dir(&self) -> HealthCheck {
        let dir = self.config.state_dir();
        if let Err(e) = std::fs::create_dir_all(&dir) {
            return HealthCheck::new("State Directory", HealthStatus::Warn(format!("{}: {}", dir.display(), e)));
        }

        let marker = dir.join(".skinsnap_test");
        match std::fs::write(&marker, "test") {
            Ok(_) => {
                let _ = std::fs::remove_file(&marker);
                HealthCheck::new("State Directory", HealthStatus::Pass)
            }
            Err(_) => HealthCheck::new(
                "State Directory",
                HealthStatus::Warn("not writable, history will not be saved".to_string()),
            ),
        }
    }

    /// Display diagnostics results
    pub fn display_results(checks: &[HealthCheck]) {
        println!("\n{}\n", "SkinSnap System Diagnostics".bold());
        println!("{:<20} Status", "Check");
        println!("{}", "=".repeat(50));

        for check in checks {
            let line = match &check.status {
                HealthStatus::Pass => "PASS".green(),
                HealthStatus::Warn(msg) => format!("WARN: {}", msg).yellow(),
                HealthStatus::Fail(msg) => format!("FAIL: {}", msg).red(),
            };
            println!("{:<20} {}", check.name, line);
        }

        println!();
    }

    /// Get overall health status
    pub fn overall_status(checks: &[HealthCheck]) -> bool {
        !checks.iter().any(|c| matches!(c.status, HealthStatus::Fail(_)))
    }
}
