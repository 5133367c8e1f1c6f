//! REPL (Read-Eval-Print Loop) module for the interactive questionnaire
//!
//! Each line is either a `/command` or the answer to the question of the
//! current stage. Answers are turned into stage events and applied through
//! the application context, so the stage machine stays the single source of
//! truth for what is asked next.

pub mod commands;
pub mod display;
pub mod input;

use anyhow::Result;
use log::warn;

use crate::context::AppContext;
use crate::questionnaire::{parse_yes_no, AllergySelection, QuestionnaireSession, Stage, StageEvent};
use crate::repl::commands::{is_command, CommandHandler};
pub use crate::repl::display::DisplayManager;
pub use crate::repl::input::{InputHandler, InputLine};
use crate::repl::input::{clean_path_input, parse_allergy_choices};

/// REPL session coordinator
pub struct ReplSession<'a> {
    ctx: &'a AppContext,
    session: QuestionnaireSession,
    command_handler: CommandHandler,
    display_manager: DisplayManager,
    /// Allergy picks waiting for the "Other" free text
    pending_allergies: Option<AllergySelection>,
    reports_shown: usize,
}

impl<'a> ReplSession<'a> {
    pub fn new(ctx: &'a AppContext) -> Self {
        let display_manager = DisplayManager::new().with_progress(ctx.config().display.show_progress);

        ReplSession {
            ctx,
            session: ctx.new_session(),
            command_handler: CommandHandler::new(),
            display_manager,
            pending_allergies: None,
            reports_shown: 0,
        }
    }

    /// Show welcome banner
    pub fn show_welcome(&self, version: &str) {
        let status = match self.ctx.model().unavailable_reason() {
            None => "loaded".to_string(),
            Some(reason) => format!("unavailable ({})", reason),
        };
        self.display_manager.show_banner(version, &status);
        if !self.ctx.model().is_loaded() {
            self.display_manager.show_warning(crate::advice::MODEL_UNAVAILABLE);
        }
    }

    /// Print the question for the current stage
    pub fn show_question(&self) {
        if self.pending_allergies.is_some() {
            self.display_manager.show_custom_allergy_prompt();
        } else {
            self.display_manager.show_question(&self.session);
        }
    }

    pub fn prompt(&self) -> String {
        self.display_manager.prompt_for(self.session.stage())
    }

    /// Read-eval-print until `/exit`, Ctrl-D or a "no" at the start
    pub fn run(&mut self, input: &mut InputHandler) -> Result<()> {
        self.show_question();

        loop {
            input.set_prompt(self.prompt());
            let line = match input.read_line()? {
                InputLine::Line(line) => line,
                InputLine::Interrupted => {
                    self.display_manager.show_info("Use /exit or Ctrl-D to quit");
                    continue;
                }
                InputLine::Eof => break,
            };

            let stage_before = self.session.stage();
            let awaiting_custom = self.pending_allergies.is_some();

            if !self.handle_input(&line)? {
                break;
            }

            let moved = self.session.stage() != stage_before
                || self.pending_allergies.is_some() != awaiting_custom;
            if moved || (is_command(&line) && self.session.stage() == Stage::Start) {
                self.show_question();
            }
        }

        if let Err(e) = input.save_history() {
            warn!("could not save history: {}", e);
        }
        Ok(())
    }

    /// Handle one line of input
    ///
    /// Returns true if session should continue, false to exit
    pub fn handle_input(&mut self, input: &str) -> Result<bool> {
        if is_command(input) {
            let command = self.command_handler.parse(input);

            // At Upload an absolute path also starts with '/'
            let is_path = self.session.stage() == Stage::Upload
                && matches!(command, commands::Command::Unknown { .. });
            if is_path {
                return self.handle_upload(input);
            }

            let restart = matches!(command, commands::Command::Restart);
            let keep_going = self.command_handler.execute(command, &mut self.session, self.ctx)?;
            if restart {
                self.pending_allergies = None;
            }
            return Ok(keep_going);
        }

        match self.session.stage() {
            Stage::Start => self.handle_start(input),
            Stage::Humidity => self.handle_yes_no(input, StageEvent::AnswerHumidity),
            Stage::Sensitivity => self.handle_yes_no(input, StageEvent::AnswerSensitivity),
            Stage::Allergies => self.handle_allergies(input),
            Stage::Summary => self.advance(StageEvent::ProceedToUpload),
            Stage::Upload => self.handle_upload(input),
        }
    }

    fn handle_start(&mut self, input: &str) -> Result<bool> {
        match parse_yes_no(input) {
            Some(true) => self.advance(StageEvent::Begin),
            Some(false) => {
                self.display_manager.show_info("Goodbye! Come back any time.");
                Ok(false)
            }
            None => {
                self.display_manager.show_warning("Please answer yes or no.");
                Ok(true)
            }
        }
    }

    fn handle_yes_no(&mut self, input: &str, event: fn(bool) -> StageEvent) -> Result<bool> {
        match parse_yes_no(input) {
            Some(answer) => self.advance(event(answer)),
            None => {
                self.display_manager.show_warning("Please answer yes or no.");
                Ok(true)
            }
        }
    }

    fn handle_allergies(&mut self, input: &str) -> Result<bool> {
        if let Some(mut selection) = self.pending_allergies.take() {
            selection.set_custom(input);
            return self.advance(StageEvent::AnswerAllergies(selection));
        }

        match parse_allergy_choices(input) {
            Ok(selection) if selection.wants_custom() => {
                self.pending_allergies = Some(selection);
                Ok(true)
            }
            Ok(selection) => self.advance(StageEvent::AnswerAllergies(selection)),
            Err(e) => {
                self.display_manager.show_warning(&e);
                Ok(true)
            }
        }
    }

    fn handle_upload(&mut self, input: &str) -> Result<bool> {
        if input.trim().is_empty() {
            return Ok(true);
        }

        let path = clean_path_input(input);
        self.display_manager.start_analysis(&path);
        let outcome = self.ctx.analyze(&self.session, &path);
        self.display_manager.finish_current();

        match outcome {
            Ok(report) => {
                self.display_manager.show_report(&report);
                self.reports_shown += 1;
                println!("Upload another photo, or type /exit to quit.");
            }
            Err(e) => self.display_manager.show_error(&e.to_string()),
        }
        Ok(true)
    }

    fn advance(&mut self, event: StageEvent) -> Result<bool> {
        if let Err(e) = self.ctx.advance(&mut self.session, event) {
            self.display_manager.show_error(&e.to_string());
        }
        Ok(true)
    }

    pub fn session(&self) -> &QuestionnaireSession {
        &self.session
    }

    pub fn is_awaiting_custom_allergy(&self) -> bool {
        self.pending_allergies.is_some()
    }

    pub fn reports_shown(&self) -> usize {
        self.reports_shown
    }
}
