//! Questionnaire module
//!
//! Linear stage machine, allergy selection handling and the tips derived
//! from the recorded answers.

pub mod allergies;
pub mod session;
pub mod stage;
pub mod tips;

pub use allergies::{AllergyOption, AllergySelection, OTHER_LABEL};
pub use session::QuestionnaireSession;
pub use stage::{Stage, StageEvent};
pub use tips::derive_tips;

/// Parse a yes/no answer the way the questionnaire buttons read it
pub fn parse_yes_no(input: &str) -> Option<bool> {
    match input.trim().to_lowercase().as_str() {
        "y" | "yes" | "true" | "1" => Some(true),
        "n" | "no" | "false" | "0" => Some(false),
        _ => None,
    }
}

/// Render a recorded yes/no answer
pub fn yes_no_label(answer: Option<bool>) -> &'static str {
    match answer {
        Some(true) => "Yes",
        Some(false) => "No",
        None => "-",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yes_no() {
        assert_eq!(parse_yes_no("Yes"), Some(true));
        assert_eq!(parse_yes_no(" n "), Some(false));
        assert_eq!(parse_yes_no("maybe"), None);
        assert_eq!(parse_yes_no(""), None);
    }

    #[test]
    fn test_yes_no_label() {
        assert_eq!(yes_no_label(Some(true)), "Yes");
        assert_eq!(yes_no_label(Some(false)), "No");
        assert_eq!(yes_no_label(None), "-");
    }
}
