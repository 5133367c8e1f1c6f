//! Combined result shown after an upload: prediction, tips, disclaimer

use crate::advice;
use crate::classifier::{ClassificationOutcome, ImageAnalysis};
use crate::questionnaire::{derive_tips, QuestionnaireSession};
use serde::Serialize;
use std::fmt::Write as _;

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub session_id: String,
    pub image: ImageAnalysis,
    pub questionnaire_tips: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disclaimer: Option<String>,
}

impl AnalysisReport {
    pub fn new(session: &QuestionnaireSession, image: ImageAnalysis) -> Self {
        Self {
            session_id: session.id().to_string(),
            image,
            questionnaire_tips: derive_tips(session),
            disclaimer: Some(advice::DISCLAIMER.to_string()),
        }
    }

    pub fn without_disclaimer(mut self) -> Self {
        self.disclaimer = None;
        self
    }

    pub fn is_prediction_available(&self) -> bool {
        self.image.outcome.prediction().is_some()
    }

    /// Plain-text rendering, one line per fact
    pub fn render_text(&self) -> String {
        let mut out = String::new();

        match &self.image.outcome {
            ClassificationOutcome::Predicted(result) => {
                let _ = writeln!(out, "AI Prediction");
                let _ = writeln!(out, "Detected Condition: {}", result.display_label());
                let _ = writeln!(out, "Confidence: {:.2}%", result.confidence);
                let _ = writeln!(out);
                let _ = writeln!(out, "Skincare Tip Based on AI");
                let _ = writeln!(out, "{}", result.tip);
            }
            ClassificationOutcome::Unavailable { .. } => {
                let _ = writeln!(out, "Warning: {}", advice::MODEL_UNAVAILABLE);
            }
        }

        if !self.questionnaire_tips.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "Personalized Tips Based on Your Answers");
            for tip in &self.questionnaire_tips {
                let _ = writeln!(out, "• {}", tip);
            }
        }

        if let Some(disclaimer) = &self.disclaimer {
            let _ = writeln!(out);
            let _ = writeln!(out, "{}", disclaimer);
        }

        out
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::ClassificationResult;
    use crate::questionnaire::AllergySelection;

    fn answered_session() -> QuestionnaireSession {
        let mut session = QuestionnaireSession::new();
        session.begin().unwrap();
        session.answer_humidity(true).unwrap();
        session.answer_sensitivity(false).unwrap();
        session
            .answer_allergies(AllergySelection::from_labels(&["Fragrance"], None))
            .unwrap();
        session.proceed_to_upload().unwrap();
        session
    }

    fn predicted() -> ImageAnalysis {
        ImageAnalysis {
            width: 640,
            height: 480,
            outcome: ClassificationOutcome::Predicted(
                ClassificationResult::from_probabilities(&[0.875, 0.1, 0.025, 0.0, 0.0]).unwrap(),
            ),
        }
    }

    #[test]
    fn test_render_prediction() {
        let report = AnalysisReport::new(&answered_session(), predicted());
        let text = report.render_text();

        assert!(text.contains("Detected Condition: Acne"));
        assert!(text.contains("Confidence: 87.50%"));
        assert!(text.contains(advice::tip_for_label("acne")));
        assert!(text.contains("• Avoid products containing: Fragrance"));
        assert!(text.contains(advice::DISCLAIMER));
    }

    #[test]
    fn test_render_unavailable() {
        let image = ImageAnalysis {
            width: 10,
            height: 10,
            outcome: ClassificationOutcome::Unavailable {
                reason: "missing".to_string(),
            },
        };
        let report = AnalysisReport::new(&answered_session(), image).without_disclaimer();
        let text = report.render_text();

        assert!(!report.is_prediction_available());
        assert!(text.contains(advice::MODEL_UNAVAILABLE));
        assert!(!text.contains("Detected Condition"));
        assert!(!text.contains(advice::DISCLAIMER));
    }

    #[test]
    fn test_json_shape() {
        let report = AnalysisReport::new(&answered_session(), predicted());
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert_eq!(json["image"]["outcome"]["status"], "predicted");
        assert_eq!(json["image"]["outcome"]["label"], "acne");
        assert_eq!(json["questionnaire_tips"].as_array().unwrap().len(), 2);
    }
}
