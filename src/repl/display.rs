//! Display manager for REPL terminal UI
//!
//! Renders stage questions, the summary and the analysis report, and owns the
//! inference spinner.

use crate::advice;
use crate::classifier::ClassificationOutcome;
use crate::questionnaire::{yes_no_label, AllergyOption, QuestionnaireSession, Stage};
use crate::report::AnalysisReport;
use colored::*;
use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType},
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::Path;
use std::time::Duration;

/// Display manager for REPL UI
pub struct DisplayManager {
    current_bar: Option<ProgressBar>,
    update_interval: Duration,
    show_progress: bool,
}

impl DisplayManager {
    /// Spinner ticks at 10 FPS
    pub fn new() -> Self {
        DisplayManager {
            current_bar: None,
            update_interval: Duration::from_millis(100),
            show_progress: true,
        }
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Show welcome banner
    pub fn show_banner(&self, version: &str, model_status: &str) {
        let width = 64;
        let title = format!("  SkinSnap {} - Skin Care Questionnaire", version);
        let info = format!("  Classifier: {}", model_status);

        println!("\n{}", "=".repeat(width).cyan());
        println!("{}", title.bold().cyan());
        println!("{}", info.dimmed());
        println!("{}\n", "=".repeat(width).cyan());
        println!(
            "Answer each question (or {} for commands, {} to quit)\n",
            "/help".green(),
            "/exit".green()
        );
    }

    /// Prompt text for the current stage
    pub fn prompt_for(&self, stage: Stage) -> String {
        let name = match stage {
            Stage::Start => "start",
            Stage::Humidity => "humidity",
            Stage::Sensitivity => "sensitivity",
            Stage::Allergies => "allergies",
            Stage::Summary => "summary",
            Stage::Upload => "upload",
        };
        format!("skinsnap[{}]> ", name)
    }

    /// Print the question for `stage`
    pub fn show_question(&self, session: &QuestionnaireSession) {
        match session.stage() {
            Stage::Start => {
                println!("{}", "Welcome to SkinSnap!".bold().cyan());
                println!("Would you like to start the skin questionnaire? (yes/no)");
            }
            Stage::Humidity => {
                println!("{}", "Do you live in a humid environment? (yes/no)".bold());
            }
            Stage::Sensitivity => {
                println!("{}", "Is your skin generally sensitive? (yes/no)".bold());
            }
            Stage::Allergies => {
                println!("{}", "Do you have any known allergies to skincare ingredients?".bold());
                for (i, option) in AllergyOption::ALL.iter().enumerate() {
                    self.show_numbered(i + 1, option.label());
                }
                println!(
                    "{}",
                    "Enter numbers or names separated by commas, or press Enter for none.".dimmed()
                );
            }
            Stage::Summary => self.show_summary(session),
            Stage::Upload => {
                println!("{}", "Upload a photo of your skin (JPEG or PNG path):".bold());
            }
        }
    }

    /// Ask for the free-text allergy after "Other" was picked
    pub fn show_custom_allergy_prompt(&self) {
        println!("{}", "Please specify your allergy (Enter to skip):".bold());
    }

    /// Recorded answers plus the tips they produce
    pub fn show_summary(&self, session: &QuestionnaireSession) {
        println!("\n{}", "Questionnaire completed!".bold().green());
        self.show_answers(session);
        println!("Press Enter to continue to the photo upload.");
    }

    /// Recorded answers and derived tips
    pub fn show_answers(&self, session: &QuestionnaireSession) {
        self.show_section("Your Answers");
        println!("  Humid environment: {}", yes_no_label(session.humidity()).green());
        println!("  Sensitive skin:    {}", yes_no_label(session.sensitivity()).green());
        let allergies = if session.allergies().is_empty() {
            "None".to_string()
        } else {
            session.allergies().join(", ")
        };
        println!("  Allergies:         {}", allergies.green());

        let tips = crate::questionnaire::derive_tips(session);
        if !tips.is_empty() {
            self.show_section("Personalized Tips Based on Your Answers");
            for tip in &tips {
                self.show_bullet(tip);
            }
        }
        println!();
    }

    /// Spinner shown while the classifier runs
    pub fn start_analysis(&mut self, path: &Path) -> Option<ProgressBar> {
        self.finish_current();
        if !self.show_progress {
            return None;
        }

        let pb = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.cyan} Analyzing... {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        pb.set_style(style);
        pb.set_message(path.display().to_string());
        pb.enable_steady_tick(self.update_interval);

        self.current_bar = Some(pb.clone());
        Some(pb)
    }

    /// Finish current progress bar
    pub fn finish_current(&mut self) {
        if let Some(pb) = self.current_bar.take() {
            pb.finish_and_clear();
        }
    }

    /// Render an analysis report with colors
    pub fn show_report(&self, report: &AnalysisReport) {
        match &report.image.outcome {
            ClassificationOutcome::Predicted(result) => {
                self.show_section("AI Prediction");
                println!("  Detected Condition: {}", result.display_label().bold().green());
                println!("  Confidence: {}", format!("{:.2}%", result.confidence).cyan());
                self.show_section("Skincare Tip Based on AI");
                println!("  {}", result.tip);
            }
            ClassificationOutcome::Unavailable { .. } => {
                self.show_warning(advice::MODEL_UNAVAILABLE);
            }
        }

        if !report.questionnaire_tips.is_empty() {
            self.show_section("Personalized Tips Based on Your Answers");
            for tip in &report.questionnaire_tips {
                self.show_bullet(tip);
            }
        }

        if let Some(disclaimer) = &report.disclaimer {
            println!("\n{}", disclaimer.dimmed());
        }
        println!();
    }

    /// Display error message
    pub fn show_error(&self, error: &str) {
        println!("{} {}", "Error:".red().bold(), error.red());
    }

    /// Display warning message
    pub fn show_warning(&self, warning: &str) {
        println!("{} {}", "Warning:".yellow().bold(), warning.yellow());
    }

    /// Display info message
    pub fn show_info(&self, info: &str) {
        println!("{} {}", "Info:".cyan(), info);
    }

    /// Clear screen
    pub fn clear_screen(&self) -> io::Result<()> {
        execute!(io::stdout(), Clear(ClearType::All), cursor::MoveTo(0, 0))
    }

    /// Show section header
    pub fn show_section(&self, title: &str) {
        println!("\n{}", title.bold().cyan());
        println!("{}", "-".repeat(60).cyan());
    }

    /// Show bullet point
    pub fn show_bullet(&self, text: &str) {
        println!("  {} {}", "•".cyan(), text);
    }

    /// Show numbered item
    pub fn show_numbered(&self, index: usize, text: &str) {
        println!("  {}. {}", index.to_string().cyan(), text);
    }
}

impl Default for DisplayManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_manager_creation() {
        let manager = DisplayManager::new();
        assert!(manager.current_bar.is_none());
        assert_eq!(manager.update_interval, Duration::from_millis(100));
    }

    #[test]
    fn test_prompt_names_stage() {
        let manager = DisplayManager::new();
        assert_eq!(manager.prompt_for(Stage::Start), "skinsnap[start]> ");
        assert_eq!(manager.prompt_for(Stage::Upload), "skinsnap[upload]> ");
    }

    #[test]
    fn test_spinner_lifecycle() {
        let mut manager = DisplayManager::new();
        let pb = manager.start_analysis(Path::new("face.png"));
        assert!(pb.is_some());
        assert!(manager.current_bar.is_some());

        manager.finish_current();
        assert!(manager.current_bar.is_none());
    }

    #[test]
    fn test_spinner_disabled() {
        let mut manager = DisplayManager::new().with_progress(false);
        assert!(manager.start_analysis(Path::new("face.png")).is_none());
        assert!(manager.current_bar.is_none());
    }

    #[test]
    fn test_show_every_question() {
        let manager = DisplayManager::new();
        let mut session = QuestionnaireSession::new();
        manager.show_question(&session);
        session.begin().unwrap();
        manager.show_question(&session);
        session.answer_humidity(true).unwrap();
        session.answer_sensitivity(false).unwrap();
        manager.show_question(&session);
    }
}
