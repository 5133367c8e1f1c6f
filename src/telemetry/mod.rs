//! Telemetry system for SkinSnap
//!
//! Collects questionnaire and pipeline events in-process and prints a
//! short summary on request.

use colored::Colorize;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

/// Telemetry event types
#[derive(Debug, Clone)]
pub enum TelemetryEvent {
    // Questionnaire events
    StageAdvanced {
        from: String,
        to: String,
        timestamp: Instant,
    },
    SessionStarted {
        session_id: String,
        timestamp: Instant,
    },

    // Pipeline events
    ImageDecoded {
        width: u32,
        height: u32,
        timestamp: Instant,
    },
    UploadRejected {
        reason: String,
        timestamp: Instant,
    },
    InferenceCompleted {
        label: String,
        confidence: f32,
        duration_ms: u64,
        timestamp: Instant,
    },
    ModelUnavailable {
        timestamp: Instant,
    },
}

impl TelemetryEvent {
    /// One-line description for the status view
    pub fn describe(&self) -> String {
        match self {
            TelemetryEvent::StageAdvanced { from, to, .. } => format!("stage {} -> {}", from, to),
            TelemetryEvent::SessionStarted { session_id, .. } => format!("session {} started", session_id),
            TelemetryEvent::ImageDecoded { width, height, .. } => format!("image decoded ({}x{})", width, height),
            TelemetryEvent::UploadRejected { reason, .. } => format!("upload rejected: {}", reason),
            TelemetryEvent::InferenceCompleted {
                label,
                confidence,
                duration_ms,
                ..
            } => format!("predicted {} ({:.2}%) in {}ms", label, confidence, duration_ms),
            TelemetryEvent::ModelUnavailable { .. } => "prediction skipped, model unavailable".to_string(),
        }
    }
}

/// Telemetry statistics
#[derive(Debug, Clone, Default)]
pub struct TelemetryStats {
    pub sessions_started: usize,
    pub stage_transitions: usize,
    pub images_decoded: usize,
    pub uploads_rejected: usize,
    pub predictions: usize,
    pub unavailable_predictions: usize,
    pub total_inference_ms: u64,
}

/// Telemetry collector, cheap to clone and shared by reference count
#[derive(Clone)]
pub struct TelemetryCollector {
    events: Arc<Mutex<Vec<TelemetryEvent>>>,
    stats: Arc<Mutex<TelemetryStats>>,
    start_time: Instant,
}

/// Events kept for the status view; stats count everything
pub const MAX_EVENTS: usize = 256;

/// Lock, recovering the data from a poisoned mutex
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl TelemetryCollector {
    /// Create a new telemetry collector
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
            stats: Arc::new(Mutex::new(TelemetryStats::default())),
            start_time: Instant::now(),
        }
    }

    /// Record an event
    pub fn record(&self, event: TelemetryEvent) {
        {
            let mut stats = lock(&self.stats);
            match &event {
                TelemetryEvent::StageAdvanced { .. } => stats.stage_transitions += 1,
                TelemetryEvent::SessionStarted { .. } => stats.sessions_started += 1,
                TelemetryEvent::ImageDecoded { .. } => stats.images_decoded += 1,
                TelemetryEvent::UploadRejected { .. } => stats.uploads_rejected += 1,
                TelemetryEvent::InferenceCompleted { duration_ms, .. } => {
                    stats.predictions += 1;
                    stats.total_inference_ms += duration_ms;
                }
                TelemetryEvent::ModelUnavailable { .. } => stats.unavailable_predictions += 1,
            }
        }

        let mut events = lock(&self.events);
        events.push(event);
        if events.len() > MAX_EVENTS {
            let overflow = events.len() - MAX_EVENTS;
            events.drain(..overflow);
        }
    }

    /// Get current statistics
    pub fn get_stats(&self) -> TelemetryStats {
        lock(&self.stats).clone()
    }

    /// Get elapsed time since start
    pub fn elapsed(&self) -> std::time::Duration {
        self.start_time.elapsed()
    }

    /// Number of retained events, at most [`MAX_EVENTS`]
    pub fn event_count(&self) -> usize {
        lock(&self.events).len()
    }

    /// Get recent events (last n)
    pub fn recent_events(&self, n: usize) -> Vec<TelemetryEvent> {
        let events = lock(&self.events);
        let start = events.len().saturating_sub(n);
        events[start..].to_vec()
    }

    /// Mean inference latency, 0 when nothing was predicted
    pub fn average_inference_ms(&self) -> f64 {
        let stats = lock(&self.stats);
        if stats.predictions == 0 {
            0.0
        } else {
            stats.total_inference_ms as f64 / stats.predictions as f64
        }
    }

    /// Print summary statistics
    pub fn display_summary(&self) {
        let stats = self.get_stats();

        println!("\n{}", "Session Summary".bold().cyan());
        println!("{}", "-".repeat(40).cyan());
        println!("Duration:            {:?}", self.elapsed());
        println!("Sessions started:    {}", stats.sessions_started);
        println!("Stage transitions:   {}", stats.stage_transitions);
        println!("Images analyzed:     {}", stats.images_decoded);
        println!("Uploads rejected:    {}", stats.uploads_rejected);
        println!("Predictions:         {}", stats.predictions);
        println!("Model unavailable:   {}", stats.unavailable_predictions);
        println!("Avg inference:       {:.1}ms", self.average_inference_ms());
        println!();
    }
}

impl Default for TelemetryCollector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collector_creation() {
        let collector = TelemetryCollector::new();
        assert_eq!(collector.event_count(), 0);
        assert_eq!(collector.get_stats().predictions, 0);
    }

    #[test]
    fn test_stage_events() {
        let collector = TelemetryCollector::new();
        collector.record(TelemetryEvent::StageAdvanced {
            from: "Start".to_string(),
            to: "Humidity".to_string(),
            timestamp: Instant::now(),
        });

        assert_eq!(collector.get_stats().stage_transitions, 1);
        assert_eq!(collector.event_count(), 1);
    }

    #[test]
    fn test_average_inference() {
        let collector = TelemetryCollector::new();
        assert_eq!(collector.average_inference_ms(), 0.0);

        for ms in [10, 30] {
            collector.record(TelemetryEvent::InferenceCompleted {
                label: "oily".to_string(),
                confidence: 80.0,
                duration_ms: ms,
                timestamp: Instant::now(),
            });
        }

        assert_eq!(collector.get_stats().predictions, 2);
        assert!((collector.average_inference_ms() - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_clones_share_state() {
        let collector = TelemetryCollector::new();
        let clone = collector.clone();
        clone.record(TelemetryEvent::ModelUnavailable { timestamp: Instant::now() });
        assert_eq!(collector.get_stats().unavailable_predictions, 1);
    }

    #[test]
    fn test_recent_events() {
        let collector = TelemetryCollector::new();
        for i in 0..10 {
            collector.record(TelemetryEvent::ImageDecoded {
                width: i,
                height: i,
                timestamp: Instant::now(),
            });
        }

        let recent = collector.recent_events(3);
        assert_eq!(recent.len(), 3);
        assert!(matches!(recent[2], TelemetryEvent::ImageDecoded { width: 9, .. }));
    }

    #[test]
    fn test_event_log_is_capped() {
        let collector = TelemetryCollector::new();
        for i in 0..(MAX_EVENTS as u32 + 40) {
            collector.record(TelemetryEvent::ImageDecoded {
                width: i,
                height: 1,
                timestamp: Instant::now(),
            });
        }

        assert_eq!(collector.event_count(), MAX_EVENTS);
        assert_eq!(collector.get_stats().images_decoded, MAX_EVENTS + 40);
        let last = collector.recent_events(1);
        assert!(matches!(last[0], TelemetryEvent::ImageDecoded { width, .. } if width == MAX_EVENTS as u32 + 39));
    }

    #[test]
    fn test_describe() {
        let event = TelemetryEvent::StageAdvanced {
            from: "Start".to_string(),
            to: "Humidity".to_string(),
            timestamp: Instant::now(),
        };
        assert_eq!(event.describe(), "stage Start -> Humidity");

        let event = TelemetryEvent::InferenceCompleted {
            label: "acne".to_string(),
            confidence: 87.5,
            duration_ms: 12,
            timestamp: Instant::now(),
        };
        assert_eq!(event.describe(), "predicted acne (87.50%) in 12ms");
    }
}
