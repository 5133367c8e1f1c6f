//! Application context
//!
//! Built once at startup and passed by reference to the REPL and the
//! one-shot commands. Owns the loaded model; sessions only borrow it.

use crate::classifier::{ClassificationPipeline, ImageAnalysis, ModelHandle};
use crate::config::Config;
use crate::errors::{Result, SkinError};
use crate::questionnaire::{QuestionnaireSession, Stage, StageEvent};
use crate::report::AnalysisReport;
use crate::telemetry::{TelemetryCollector, TelemetryEvent};
use candle_core::Device;
use log::info;
use std::path::Path;
use std::time::Instant;

pub struct AppContext {
    config: Config,
    pipeline: ClassificationPipeline,
    telemetry: TelemetryCollector,
}

impl AppContext {
    /// Load the model named in `config` and wire up telemetry
    pub fn new(config: Config) -> Self {
        let device = Device::Cpu;
        let model = ModelHandle::load(&config.model_path(), &device);
        Self::with_model(config, model)
    }

    /// Use an already constructed model handle
    pub fn with_model(config: Config, model: ModelHandle) -> Self {
        let telemetry = TelemetryCollector::new();
        let pipeline = ClassificationPipeline::new(model, Device::Cpu).with_telemetry(telemetry.clone());
        Self {
            config,
            pipeline,
            telemetry,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn pipeline(&self) -> &ClassificationPipeline {
        &self.pipeline
    }

    pub fn telemetry(&self) -> &TelemetryCollector {
        &self.telemetry
    }

    pub fn model(&self) -> &ModelHandle {
        self.pipeline.model()
    }

    /// Fresh questionnaire session
    pub fn new_session(&self) -> QuestionnaireSession {
        let session = QuestionnaireSession::new();
        info!("started session {}", session.id());
        self.telemetry.record(TelemetryEvent::SessionStarted {
            session_id: session.id().to_string(),
            timestamp: Instant::now(),
        });
        session
    }

    /// Apply one event and record the transition
    pub fn advance(&self, session: &mut QuestionnaireSession, event: StageEvent) -> Result<Stage> {
        let from = session.stage();
        let to = session.apply(event)?;
        if to != from {
            self.telemetry.record(TelemetryEvent::StageAdvanced {
                from: from.display_name().to_string(),
                to: to.display_name().to_string(),
                timestamp: Instant::now(),
            });
        }
        Ok(to)
    }

    /// Classify an upload and combine it with the session's tips
    ///
    /// Uploads are only accepted once the session has reached `Upload`.
    pub fn analyze(&self, session: &QuestionnaireSession, image_path: &Path) -> Result<AnalysisReport> {
        if !session.is_ready_for_upload() {
            return Err(SkinError::InvalidTransition {
                from: session.stage().display_name().to_string(),
                event: "Upload".to_string(),
                reason: "finish the questionnaire before uploading".to_string(),
            });
        }

        let analysis: ImageAnalysis = self.pipeline.classify_path(image_path)?;
        let report = AnalysisReport::new(session, analysis);

        if self.config.display.show_disclaimer {
            Ok(report)
        } else {
            Ok(report.without_disclaimer())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questionnaire::AllergySelection;

    fn context() -> AppContext {
        AppContext::with_model(Config::default(), ModelHandle::unavailable("test"))
    }

    #[test]
    fn test_advance_records_telemetry() {
        let ctx = context();
        let mut session = ctx.new_session();

        ctx.advance(&mut session, StageEvent::Begin).unwrap();
        ctx.advance(&mut session, StageEvent::AnswerHumidity(true)).unwrap();

        let stats = ctx.telemetry().get_stats();
        assert_eq!(stats.sessions_started, 1);
        assert_eq!(stats.stage_transitions, 2);
    }

    #[test]
    fn test_terminal_self_loop_not_counted() {
        let ctx = context();
        let mut session = ctx.new_session();
        for event in [
            StageEvent::Begin,
            StageEvent::AnswerHumidity(false),
            StageEvent::AnswerSensitivity(false),
            StageEvent::AnswerAllergies(AllergySelection::new()),
            StageEvent::ProceedToUpload,
            StageEvent::ProceedToUpload,
        ] {
            ctx.advance(&mut session, event).unwrap();
        }

        assert_eq!(session.stage(), Stage::Upload);
        assert_eq!(ctx.telemetry().get_stats().stage_transitions, 5);
    }

    #[test]
    fn test_missing_model_file_degrades() {
        let mut config = Config::default();
        config.model.path = "/nonexistent/skin.safetensors".to_string();
        let ctx = AppContext::new(config);
        assert!(!ctx.model().is_loaded());
    }
}
