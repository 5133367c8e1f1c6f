//! Tips derived from questionnaire answers

use crate::advice;
use crate::questionnaire::session::QuestionnaireSession;

/// Tips for a session; empty until the questionnaire reaches Summary
pub fn derive_tips(session: &QuestionnaireSession) -> Vec<String> {
    if !session.stage().is_answered() {
        return Vec::new();
    }

    let mut tips = Vec::new();

    if session.humidity() == Some(true) {
        tips.push(advice::HUMID_TIP.to_string());
    }
    if session.sensitivity() == Some(true) {
        tips.push(advice::SENSITIVE_TIP.to_string());
    }
    if !session.allergies().is_empty() {
        tips.push(advice::allergy_tip(session.allergies()));
    }

    tips
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questionnaire::allergies::{AllergyOption, AllergySelection};

    fn answered(humid: bool, sensitive: bool, selection: AllergySelection) -> QuestionnaireSession {
        let mut session = QuestionnaireSession::new();
        session.begin().unwrap();
        session.answer_humidity(humid).unwrap();
        session.answer_sensitivity(sensitive).unwrap();
        session.answer_allergies(selection).unwrap();
        session
    }

    #[test]
    fn test_humid_only() {
        let session = answered(true, false, AllergySelection::new());
        assert_eq!(derive_tips(&session), vec![advice::HUMID_TIP.to_string()]);
    }

    #[test]
    fn test_all_tips_in_order() {
        let mut selection = AllergySelection::new();
        selection.select(AllergyOption::Alcohol);
        selection.select(AllergyOption::Sulfates);
        let session = answered(true, true, selection);

        let tips = derive_tips(&session);
        assert_eq!(tips.len(), 3);
        assert_eq!(tips[0], advice::HUMID_TIP);
        assert_eq!(tips[1], advice::SENSITIVE_TIP);
        assert_eq!(tips[2], "Avoid products containing: Alcohol, Sulfates");
    }

    #[test]
    fn test_no_tips_for_all_no() {
        let session = answered(false, false, AllergySelection::new());
        assert!(derive_tips(&session).is_empty());
    }

    #[test]
    fn test_no_tips_before_summary() {
        let mut session = QuestionnaireSession::new();
        session.begin().unwrap();
        session.answer_humidity(true).unwrap();
        session.answer_sensitivity(true).unwrap();
        assert!(derive_tips(&session).is_empty());
    }

    #[test]
    fn test_tips_still_present_at_upload() {
        let mut session = answered(false, true, AllergySelection::new());
        session.proceed_to_upload().unwrap();
        assert_eq!(derive_tips(&session), vec![advice::SENSITIVE_TIP.to_string()]);
    }
}
