//! Input handler for REPL using rustyline
//!
//! Provides readline functionality with history and line editing, plus the
//! parsers that turn raw answers into questionnaire values.

use crate::questionnaire::{AllergyOption, AllergySelection};
use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;

/// Line read from the terminal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputLine {
    Line(String),
    Interrupted,
    Eof,
}

/// Input handler managing readline interface and answer history
pub struct InputHandler {
    editor: DefaultEditor,
    history_path: Option<PathBuf>,
    prompt: String,
}

impl InputHandler {
    pub fn new() -> Result<Self> {
        let editor = DefaultEditor::new()?;

        Ok(InputHandler {
            editor,
            history_path: None,
            prompt: "skinsnap> ".to_string(),
        })
    }

    /// Create input handler with persistent history
    pub fn with_history(history_file: PathBuf) -> Result<Self> {
        let mut editor = DefaultEditor::new()?;

        if history_file.exists() {
            let _ = editor.load_history(&history_file);
        }

        Ok(InputHandler {
            editor,
            history_path: Some(history_file),
            prompt: "skinsnap> ".to_string(),
        })
    }

    pub fn set_prompt(&mut self, prompt: String) {
        self.prompt = prompt;
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Read one trimmed line; empty lines are returned as-is
    pub fn read_line(&mut self) -> Result<InputLine> {
        match self.editor.readline(&self.prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if !trimmed.is_empty() {
                    let _ = self.editor.add_history_entry(trimmed);
                }
                Ok(InputLine::Line(trimmed.to_string()))
            }
            Err(ReadlineError::Interrupted) => Ok(InputLine::Interrupted),
            Err(ReadlineError::Eof) => Ok(InputLine::Eof),
            Err(err) => Err(anyhow::anyhow!("Readline error: {}", err)),
        }
    }

    /// Save history to disk
    pub fn save_history(&mut self) -> Result<()> {
        if let Some(ref path) = self.history_path {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            self.editor.save_history(path)?;
        }
        Ok(())
    }
}

/// Parse the allergy answer: comma-separated option numbers (1-based) or
/// labels. Empty input or "none" selects nothing.
pub fn parse_allergy_choices(input: &str) -> std::result::Result<AllergySelection, String> {
    let mut selection = AllergySelection::new();
    let trimmed = input.trim();

    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
        return Ok(selection);
    }

    for token in trimmed.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let option = match token.parse::<usize>() {
            Ok(n) if (1..=AllergyOption::ALL.len()).contains(&n) => AllergyOption::ALL[n - 1],
            Ok(n) => return Err(format!("No option number {}", n)),
            Err(_) => token.parse::<AllergyOption>()?,
        };
        selection.select(option);
    }

    Ok(selection)
}

/// Strip surrounding quotes that terminals add to dragged-in paths
pub fn clean_path_input(input: &str) -> PathBuf {
    let trimmed = input.trim();
    let unquoted = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .or_else(|| trimmed.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')))
        .unwrap_or(trimmed);
    PathBuf::from(unquoted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numbers_and_labels() {
        let selection = parse_allergy_choices("3, fragrance").unwrap();
        assert_eq!(selection.resolve(), vec!["Salicylic Acid", "Fragrance"]);
    }

    #[test]
    fn test_parse_other_activates_custom() {
        let selection = parse_allergy_choices("1,5").unwrap();
        assert!(selection.wants_custom());
        assert_eq!(selection.resolve(), vec!["Fragrance", "Other"]);
    }

    #[test]
    fn test_parse_none() {
        assert!(parse_allergy_choices("").unwrap().resolve().is_empty());
        assert!(parse_allergy_choices("None").unwrap().resolve().is_empty());
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!(parse_allergy_choices("6").is_err());
        assert!(parse_allergy_choices("0").is_err());
        assert!(parse_allergy_choices("gluten").is_err());
    }

    #[test]
    fn test_clean_path_input() {
        assert_eq!(clean_path_input("  '/tmp/face.png' "), PathBuf::from("/tmp/face.png"));
        assert_eq!(clean_path_input("\"my face.jpg\""), PathBuf::from("my face.jpg"));
        assert_eq!(clean_path_input("face.jpg"), PathBuf::from("face.jpg"));
    }
}
