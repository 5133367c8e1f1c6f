//! Allergy multi-select with the "Other" free-text replacement

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Label of the sentinel option
pub const OTHER_LABEL: &str = "Other";

/// Fixed option set offered at the Allergies stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AllergyOption {
    Fragrance,
    Alcohol,
    SalicylicAcid,
    Sulfates,
    Other,
}

impl AllergyOption {
    pub const ALL: [AllergyOption; 5] = [
        AllergyOption::Fragrance,
        AllergyOption::Alcohol,
        AllergyOption::SalicylicAcid,
        AllergyOption::Sulfates,
        AllergyOption::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AllergyOption::Fragrance => "Fragrance",
            AllergyOption::Alcohol => "Alcohol",
            AllergyOption::SalicylicAcid => "Salicylic Acid",
            AllergyOption::Sulfates => "Sulfates",
            AllergyOption::Other => OTHER_LABEL,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        matches!(self, AllergyOption::Other)
    }
}

impl FromStr for AllergyOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        AllergyOption::ALL
            .iter()
            .find(|option| option.label().eq_ignore_ascii_case(wanted))
            .copied()
            .ok_or_else(|| format!("Unknown allergy option: {}", wanted))
    }
}

/// What the user picked at the Allergies stage
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllergySelection {
    /// Picked options in selection order, no duplicates
    selected: Vec<AllergyOption>,

    /// Text of the supplementary field, only read when Other is selected
    custom: String,
}

impl AllergySelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a selection from option labels.
    ///
    /// Labels outside the fixed option set are free text: they select Other
    /// and become the custom value (several are joined with ", ").
    pub fn from_labels<S: AsRef<str>>(labels: &[S], custom: Option<&str>) -> Self {
        let mut selection = Self::new();
        let mut free_text: Vec<String> = Vec::new();

        for label in labels {
            let label = label.as_ref().trim();
            if label.is_empty() {
                continue;
            }
            match label.parse::<AllergyOption>() {
                Ok(option) => selection.select(option),
                Err(_) => {
                    selection.select(AllergyOption::Other);
                    free_text.push(label.to_string());
                }
            }
        }

        if let Some(text) = custom {
            if !text.trim().is_empty() {
                selection.select(AllergyOption::Other);
                free_text.push(text.trim().to_string());
            }
        }

        selection.custom = free_text.join(", ");
        selection
    }

    /// Add an option; selecting the same option twice keeps its first position
    pub fn select(&mut self, option: AllergyOption) {
        if !self.selected.contains(&option) {
            self.selected.push(option);
        }
    }

    pub fn deselect(&mut self, option: AllergyOption) {
        self.selected.retain(|o| *o != option);
    }

    pub fn set_custom(&mut self, text: impl Into<String>) {
        self.custom = text.into();
    }

    pub fn selected(&self) -> &[AllergyOption] {
        &self.selected
    }

    pub fn custom(&self) -> &str {
        &self.custom
    }

    /// Whether the free-text field is active
    pub fn wants_custom(&self) -> bool {
        self.selected.contains(&AllergyOption::Other)
    }

    /// Recorded allergy list.
    ///
    /// Standard options come first in selection order. A non-empty custom
    /// value replaces the sentinel and goes last, recorded as typed; an
    /// empty or whitespace-only one leaves "Other" where it was selected.
    pub fn resolve(&self) -> Vec<String> {
        if self.wants_custom() && !self.custom.trim().is_empty() {
            let mut allergies: Vec<String> = self
                .selected
                .iter()
                .filter(|o| !o.is_sentinel())
                .map(|o| o.label().to_string())
                .collect();
            allergies.push(self.custom.clone());
            allergies
        } else {
            self.selected.iter().map(|o| o.label().to_string()).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_replaces_sentinel() {
        let mut selection = AllergySelection::new();
        selection.select(AllergyOption::Fragrance);
        selection.select(AllergyOption::Other);
        selection.set_custom("shea butter");

        assert_eq!(selection.resolve(), vec!["Fragrance", "shea butter"]);
    }

    #[test]
    fn test_empty_custom_keeps_sentinel() {
        let mut selection = AllergySelection::new();
        selection.select(AllergyOption::Other);
        selection.set_custom("");

        assert_eq!(selection.resolve(), vec!["Other"]);
    }

    #[test]
    fn test_whitespace_custom_counts_as_empty() {
        let mut selection = AllergySelection::new();
        selection.select(AllergyOption::Other);
        selection.select(AllergyOption::Alcohol);
        selection.set_custom("   ");

        assert_eq!(selection.resolve(), vec!["Other", "Alcohol"]);
    }

    #[test]
    fn test_custom_recorded_as_typed() {
        let mut selection = AllergySelection::new();
        selection.select(AllergyOption::Other);
        selection.set_custom(" Shea Butter ");

        assert_eq!(selection.resolve(), vec![" Shea Butter "]);
    }

    #[test]
    fn test_custom_goes_last_even_if_other_picked_first() {
        let mut selection = AllergySelection::new();
        selection.select(AllergyOption::Other);
        selection.select(AllergyOption::Sulfates);
        selection.set_custom("lanolin");

        assert_eq!(selection.resolve(), vec!["Sulfates", "lanolin"]);
    }

    #[test]
    fn test_custom_ignored_without_other() {
        let mut selection = AllergySelection::new();
        selection.select(AllergyOption::Alcohol);
        selection.set_custom("lanolin");

        assert_eq!(selection.resolve(), vec!["Alcohol"]);
    }

    #[test]
    fn test_duplicate_select_keeps_order() {
        let mut selection = AllergySelection::new();
        selection.select(AllergyOption::Sulfates);
        selection.select(AllergyOption::Fragrance);
        selection.select(AllergyOption::Sulfates);

        assert_eq!(selection.resolve(), vec!["Sulfates", "Fragrance"]);
    }

    #[test]
    fn test_deselect() {
        let mut selection = AllergySelection::new();
        selection.select(AllergyOption::Sulfates);
        selection.deselect(AllergyOption::Sulfates);
        assert!(selection.resolve().is_empty());
    }

    #[test]
    fn test_parse_option_case_insensitive() {
        assert_eq!("salicylic acid".parse::<AllergyOption>(), Ok(AllergyOption::SalicylicAcid));
        assert_eq!(" OTHER ".parse::<AllergyOption>(), Ok(AllergyOption::Other));
        assert!("gluten".parse::<AllergyOption>().is_err());
    }

    #[test]
    fn test_from_labels_free_text_becomes_custom() {
        let selection = AllergySelection::from_labels(&["Fragrance", "shea butter"], None);
        assert!(selection.wants_custom());
        assert_eq!(selection.resolve(), vec!["Fragrance", "shea butter"]);
    }

    #[test]
    fn test_from_labels_with_explicit_other() {
        let selection = AllergySelection::from_labels(&["Other"], Some(""));
        assert_eq!(selection.resolve(), vec!["Other"]);

        let selection = AllergySelection::from_labels(&["alcohol"], Some("nickel"));
        assert_eq!(selection.resolve(), vec!["Alcohol", "nickel"]);
    }
}
