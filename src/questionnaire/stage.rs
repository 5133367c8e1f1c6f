//! Questionnaire stage machine
//!
//! A linear finite state machine:
//! - Forward only: every stage has exactly one successor
//! - No skips: a transition advances the stage index by exactly one
//! - Upload is terminal and absorbs every event

use crate::errors::{Result, SkinError};
use crate::questionnaire::allergies::AllergySelection;
use serde::{Deserialize, Serialize};

/// Questionnaire progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// Waiting for the user to begin
    Start,

    /// "Do you live in a humid environment?"
    Humidity,

    /// "Is your skin generally sensitive?"
    Sensitivity,

    /// Allergy multi-select with the "Other" free-text field
    Allergies,

    /// Questionnaire completed, tips available
    Summary,

    /// Image upload phase (terminal for the questionnaire)
    Upload,
}

/// Confirmation actions, one per non-terminal stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageEvent {
    Begin,
    AnswerHumidity(bool),
    AnswerSensitivity(bool),
    AnswerAllergies(AllergySelection),
    ProceedToUpload,
}

impl StageEvent {
    /// Event name without its payload
    pub fn name(&self) -> &'static str {
        match self {
            StageEvent::Begin => "Begin",
            StageEvent::AnswerHumidity(_) => "AnswerHumidity",
            StageEvent::AnswerSensitivity(_) => "AnswerSensitivity",
            StageEvent::AnswerAllergies(_) => "AnswerAllergies",
            StageEvent::ProceedToUpload => "ProceedToUpload",
        }
    }
}

impl Stage {
    pub const ALL: [Stage; 6] = [
        Stage::Start,
        Stage::Humidity,
        Stage::Sensitivity,
        Stage::Allergies,
        Stage::Summary,
        Stage::Upload,
    ];

    /// Stage counter, 0 through 5
    pub fn index(&self) -> u8 {
        match self {
            Stage::Start => 0,
            Stage::Humidity => 1,
            Stage::Sensitivity => 2,
            Stage::Allergies => 3,
            Stage::Summary => 4,
            Stage::Upload => 5,
        }
    }

    pub fn from_index(index: u8) -> Option<Stage> {
        Stage::ALL.get(index as usize).copied()
    }

    /// Successor stage, `None` at Upload
    pub fn next(&self) -> Option<Stage> {
        Stage::from_index(self.index() + 1)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Stage::Upload)
    }

    /// Questionnaire answers are complete from Summary onward
    pub fn is_answered(&self) -> bool {
        *self >= Stage::Summary
    }

    /// Check whether `event` is the confirmation action of this stage
    ///
    /// Valid transitions (5 edges + terminal self-loop):
    /// 1. Start       → Humidity    (on: Begin)
    /// 2. Humidity    → Sensitivity (on: AnswerHumidity)
    /// 3. Sensitivity → Allergies   (on: AnswerSensitivity)
    /// 4. Allergies   → Summary     (on: AnswerAllergies)
    /// 5. Summary     → Upload      (on: ProceedToUpload)
    /// 6. Upload      → Upload      (any event)
    pub fn transition(&self, event: &StageEvent) -> Result<Stage> {
        use Stage::*;

        let accepted = matches!(
            (self, event),
            (Start, StageEvent::Begin)
                | (Humidity, StageEvent::AnswerHumidity(_))
                | (Sensitivity, StageEvent::AnswerSensitivity(_))
                | (Allergies, StageEvent::AnswerAllergies(_))
                | (Summary, StageEvent::ProceedToUpload)
        );

        if self.is_terminal() {
            return Ok(Upload);
        }

        match (accepted, self.next()) {
            (true, Some(next)) => Ok(next),
            _ => Err(SkinError::InvalidTransition {
                from: format!("{:?}", self),
                event: event.name().to_string(),
                reason: format!("{:?} only accepts {}", self, self.expected_event()),
            }),
        }
    }

    /// Name of the single event this stage accepts
    pub fn expected_event(&self) -> &'static str {
        match self {
            Stage::Start => "Begin",
            Stage::Humidity => "AnswerHumidity",
            Stage::Sensitivity => "AnswerSensitivity",
            Stage::Allergies => "AnswerAllergies",
            Stage::Summary => "ProceedToUpload",
            Stage::Upload => "nothing (terminal)",
        }
    }

    /// Human-readable stage name
    pub fn display_name(&self) -> &'static str {
        match self {
            Stage::Start => "Start",
            Stage::Humidity => "Humidity",
            Stage::Sensitivity => "Sensitivity",
            Stage::Allergies => "Allergies",
            Stage::Summary => "Summary",
            Stage::Upload => "Upload",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.display_name(), self.index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_transitions() {
        assert_eq!(Stage::Start.transition(&StageEvent::Begin).unwrap(), Stage::Humidity);
        assert_eq!(
            Stage::Humidity.transition(&StageEvent::AnswerHumidity(true)).unwrap(),
            Stage::Sensitivity
        );
        assert_eq!(
            Stage::Sensitivity.transition(&StageEvent::AnswerSensitivity(false)).unwrap(),
            Stage::Allergies
        );
        assert_eq!(
            Stage::Allergies
                .transition(&StageEvent::AnswerAllergies(AllergySelection::default()))
                .unwrap(),
            Stage::Summary
        );
        assert_eq!(
            Stage::Summary.transition(&StageEvent::ProceedToUpload).unwrap(),
            Stage::Upload
        );
    }

    #[test]
    fn test_wrong_event_rejected() {
        let result = Stage::Start.transition(&StageEvent::ProceedToUpload);
        assert!(matches!(result, Err(SkinError::InvalidTransition { .. })));

        let result = Stage::Humidity.transition(&StageEvent::AnswerSensitivity(true));
        assert!(result.is_err());
    }

    #[test]
    fn test_upload_is_absorbing() {
        assert!(Stage::Upload.is_terminal());
        for event in [StageEvent::Begin, StageEvent::ProceedToUpload, StageEvent::AnswerHumidity(true)] {
            assert_eq!(Stage::Upload.transition(&event).unwrap(), Stage::Upload);
        }
    }

    #[test]
    fn test_index_round_trip_and_order() {
        for (i, stage) in Stage::ALL.iter().enumerate() {
            assert_eq!(stage.index() as usize, i);
            assert_eq!(Stage::from_index(i as u8), Some(*stage));
        }
        assert_eq!(Stage::from_index(6), None);
        assert!(Stage::Start < Stage::Upload);
    }

    #[test]
    fn test_next_advances_by_one() {
        for stage in Stage::ALL {
            match stage.next() {
                Some(next) => assert_eq!(next.index(), stage.index() + 1),
                None => assert_eq!(stage, Stage::Upload),
            }
        }
    }

    #[test]
    fn test_is_answered() {
        assert!(!Stage::Allergies.is_answered());
        assert!(Stage::Summary.is_answered());
        assert!(Stage::Upload.is_answered());
    }
}
