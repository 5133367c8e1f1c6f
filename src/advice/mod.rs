//! Advice catalog
//!
//! Read-only text tables: one tip per predicted skin condition and the
//! tips triggered by questionnaire answers.

/// Returned for labels the catalog does not know
pub const FALLBACK_TIP: &str = "No suggestion available.";

pub const HUMID_TIP: &str = "Use lightweight, water-based moisturizers in humid environments.";

pub const SENSITIVE_TIP: &str = "Avoid alcohol, fragrance, and harsh exfoliants for sensitive skin.";

pub const ALLERGY_TIP_PREFIX: &str = "Avoid products containing: ";

pub const DISCLAIMER: &str =
    "This is a demo AI tool and not a substitute for professional dermatological advice.";

pub const MODEL_UNAVAILABLE: &str =
    "Model not loaded. Predictions will be available once the model file is added.";

const CONDITION_TIPS: [(&str, &str); 5] = [
    ("acne", "Use a gentle cleanser and avoid oil-based products. Try salicylic acid."),
    ("wrinkles", "Hydrate regularly and apply SPF daily. Consider using retinol."),
    ("dry", "Use thick moisturizers and avoid alcohol-based toners."),
    ("oily", "Use foaming cleansers and oil-free moisturizers."),
    ("normal", "Maintain with gentle, balanced skincare products."),
];

/// Static tip for a predicted label, falling back to [`FALLBACK_TIP`]
pub fn tip_for_label(label: &str) -> &'static str {
    CONDITION_TIPS
        .iter()
        .find(|(known, _)| *known == label)
        .map(|(_, tip)| *tip)
        .unwrap_or(FALLBACK_TIP)
}

/// Labels with a dedicated tip, in catalog order
pub fn known_labels() -> impl Iterator<Item = &'static str> {
    CONDITION_TIPS.iter().map(|(label, _)| *label)
}

/// Tip listing the substances to avoid
pub fn allergy_tip(allergies: &[String]) -> String {
    format!("{}{}", ALLERGY_TIP_PREFIX, allergies.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_labels_have_tips() {
        for label in known_labels() {
            assert_ne!(tip_for_label(label), FALLBACK_TIP, "missing tip for {}", label);
        }
    }

    #[test]
    fn test_unknown_label_falls_back() {
        assert_eq!(tip_for_label("rosacea"), FALLBACK_TIP);
        assert_eq!(tip_for_label("class_7"), FALLBACK_TIP);
        assert_eq!(tip_for_label(""), FALLBACK_TIP);
    }

    #[test]
    fn test_label_lookup_is_exact() {
        assert_eq!(tip_for_label("Acne"), FALLBACK_TIP);
        assert!(tip_for_label("acne").contains("salicylic acid"));
    }

    #[test]
    fn test_allergy_tip_joins_with_comma() {
        let allergies = vec!["Fragrance".to_string(), "shea butter".to_string()];
        assert_eq!(
            allergy_tip(&allergies),
            "Avoid products containing: Fragrance, shea butter"
        );
    }
}
