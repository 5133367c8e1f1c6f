//! Per-user questionnaire session
//!
//! Holds the current stage and the answers recorded so far. A session lives
//! in memory only and is dropped when the interaction ends.

use crate::errors::Result;
use crate::questionnaire::allergies::AllergySelection;
use crate::questionnaire::stage::{Stage, StageEvent};
use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionnaireSession {
    id: Uuid,
    started_at: DateTime<Utc>,
    stage: Stage,
    humidity: Option<bool>,
    sensitivity: Option<bool>,
    allergies: Vec<String>,
    transitions: usize,
}

impl QuestionnaireSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            stage: Stage::Start,
            humidity: None,
            sensitivity: None,
            allergies: Vec::new(),
            transitions: 0,
        }
    }

    /// Apply one confirmation action.
    ///
    /// Records the answer carried by `event` and advances one stage. On a
    /// mismatched event the session is left untouched.
    pub fn apply(&mut self, event: StageEvent) -> Result<Stage> {
        let from = self.stage;
        let next = from.transition(&event)?;

        if from.is_terminal() {
            return Ok(next);
        }

        match event {
            StageEvent::AnswerHumidity(yes) => self.humidity = Some(yes),
            StageEvent::AnswerSensitivity(yes) => self.sensitivity = Some(yes),
            StageEvent::AnswerAllergies(selection) => self.allergies = selection.resolve(),
            StageEvent::Begin | StageEvent::ProceedToUpload => {}
        }

        self.stage = next;
        self.transitions += 1;
        debug!("session {}: {} -> {}", self.id, from, next);

        Ok(next)
    }

    pub fn begin(&mut self) -> Result<Stage> {
        self.apply(StageEvent::Begin)
    }

    pub fn answer_humidity(&mut self, humid: bool) -> Result<Stage> {
        self.apply(StageEvent::AnswerHumidity(humid))
    }

    pub fn answer_sensitivity(&mut self, sensitive: bool) -> Result<Stage> {
        self.apply(StageEvent::AnswerSensitivity(sensitive))
    }

    pub fn answer_allergies(&mut self, selection: AllergySelection) -> Result<Stage> {
        self.apply(StageEvent::AnswerAllergies(selection))
    }

    pub fn proceed_to_upload(&mut self) -> Result<Stage> {
        self.apply(StageEvent::ProceedToUpload)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn humidity(&self) -> Option<bool> {
        self.humidity
    }

    pub fn sensitivity(&self) -> Option<bool> {
        self.sensitivity
    }

    pub fn allergies(&self) -> &[String] {
        &self.allergies
    }

    /// Number of transitions that changed the stage
    pub fn transition_count(&self) -> usize {
        self.transitions
    }

    pub fn is_ready_for_upload(&self) -> bool {
        self.stage.is_terminal()
    }
}

impl Default for QuestionnaireSession {
    fn default() -> Self {
        Self::new()
    }
}
