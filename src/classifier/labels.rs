//! Skin condition label set, in model output order

use serde::{Deserialize, Serialize};

/// Class names indexed by model output position
pub const CLASS_NAMES: [&str; 5] = ["acne", "wrinkles", "dry", "oily", "normal"];

pub const NUM_CLASSES: usize = CLASS_NAMES.len();

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkinCondition {
    Acne,
    Wrinkles,
    Dry,
    Oily,
    Normal,
}

impl SkinCondition {
    pub const ALL: [SkinCondition; NUM_CLASSES] = [
        SkinCondition::Acne,
        SkinCondition::Wrinkles,
        SkinCondition::Dry,
        SkinCondition::Oily,
        SkinCondition::Normal,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn from_label(label: &str) -> Option<Self> {
        CLASS_NAMES
            .iter()
            .position(|name| *name == label)
            .and_then(Self::from_index)
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Lowercase label as the model and advice catalog use it
    pub fn as_str(&self) -> &'static str {
        CLASS_NAMES[self.index()]
    }

    /// Capitalized label for display
    pub fn display_name(&self) -> &'static str {
        match self {
            SkinCondition::Acne => "Acne",
            SkinCondition::Wrinkles => "Wrinkles",
            SkinCondition::Dry => "Dry",
            SkinCondition::Oily => "Oily",
            SkinCondition::Normal => "Normal",
        }
    }
}

/// Label for an output index, `class_<n>` past the known set
pub fn label_for_index(index: usize) -> String {
    match SkinCondition::from_index(index) {
        Some(condition) => condition.as_str().to_string(),
        None => format!("class_{}", index),
    }
}

/// Capitalize the first character of a label
pub fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
