//! Command handler for REPL built-in commands

use crate::context::AppContext;
use crate::questionnaire::{yes_no_label, QuestionnaireSession};
use crate::repl::display::DisplayManager;
use anyhow::Result;
use colored::*;

/// Events listed by `/status`
const RECENT_EVENTS: usize = 5;

/// REPL command types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Status,
    Answers,
    Restart,
    Clear,
    Exit,
    Unknown { input: String },
}

/// Command handler for parsing and executing REPL commands
pub struct CommandHandler {
    display: DisplayManager,
}

impl CommandHandler {
    pub fn new() -> Self {
        CommandHandler {
            display: DisplayManager::new(),
        }
    }

    /// Parse input string into a command
    pub fn parse(&self, input: &str) -> Command {
        let trimmed = input.trim();

        let Some(body) = trimmed.strip_prefix('/') else {
            return Command::Unknown { input: input.to_string() };
        };

        let name = match body.split_whitespace().next() {
            Some(name) => name.to_lowercase(),
            None => return Command::Unknown { input: input.to_string() },
        };

        match name.as_str() {
            "help" | "h" => Command::Help,
            "status" => Command::Status,
            "answers" | "tips" => Command::Answers,
            "restart" | "reset" => Command::Restart,
            "clear" | "cls" => Command::Clear,
            "exit" | "quit" | "q" => Command::Exit,
            _ => Command::Unknown { input: input.to_string() },
        }
    }

    /// Execute a command
    ///
    /// Returns true if REPL should continue, false if should exit
    pub fn execute(
        &mut self,
        command: Command,
        session: &mut QuestionnaireSession,
        ctx: &AppContext,
    ) -> Result<bool> {
        match command {
            Command::Help => {
                self.show_help();
                Ok(true)
            }
            Command::Exit => {
                println!("{}", "Goodbye!".green());
                Ok(false)
            }
            Command::Status => {
                self.show_status(session, ctx);
                Ok(true)
            }
            Command::Answers => {
                if session.stage().is_answered() {
                    self.display.show_answers(session);
                } else {
                    println!("{}", "Finish the questionnaire to see your tips.".yellow());
                }
                Ok(true)
            }
            Command::Restart => {
                *session = ctx.new_session();
                println!("{}", "Questionnaire restarted.".yellow());
                Ok(true)
            }
            Command::Clear => {
                self.display.clear_screen()?;
                Ok(true)
            }
            Command::Unknown { input } => {
                println!("{}", format!("Unknown command: {}", input).red());
                println!("Type {} for available commands", "/help".cyan());
                Ok(true)
            }
        }
    }

    /// Display help information
    fn show_help(&self) {
        println!("\n{}", "Available Commands:".bold().cyan());
        println!("{}", "=".repeat(60).cyan());

        let commands = [
            ("/help, /h", "Show this help message"),
            ("/status", "Show questionnaire stage and statistics"),
            ("/answers, /tips", "Show recorded answers and tips"),
            ("/restart", "Start a new questionnaire"),
            ("/clear, /cls", "Clear screen"),
            ("/exit, /quit, /q", "Exit REPL"),
        ];

        for (cmd, desc) in commands {
            println!("  {:<20} {}", cmd.green(), desc);
        }

        println!("\n{}", "Usage:".bold());
        println!("  - Answer questions with yes or no");
        println!("  - At the upload step, type the path of a JPEG or PNG photo");
        println!("  - Press {} or {} to exit", "Ctrl-D".cyan(), "/exit".cyan());
        println!();
    }

    /// Display session status
    fn show_status(&self, session: &QuestionnaireSession, ctx: &AppContext) {
        println!("\n{}", "Session Status:".bold().cyan());
        println!("{}", "=".repeat(60).cyan());

        let model = match ctx.model().unavailable_reason() {
            None => "Loaded".green(),
            Some(reason) => format!("Unavailable ({})", reason).red(),
        };

        println!("  Session:          {}", session.id().to_string().dimmed());
        println!("  Stage:            {}", session.stage().to_string().green());
        println!("  Humid:            {}", yes_no_label(session.humidity()));
        println!("  Sensitive:        {}", yes_no_label(session.sensitivity()));
        println!("  Transitions:      {}", session.transition_count().to_string().green());
        println!("  Classifier:       {}", model);

        let recent = ctx.telemetry().recent_events(RECENT_EVENTS);
        if !recent.is_empty() {
            println!("\n{}", "Recent activity:".bold());
            for event in &recent {
                println!("  {} {}", "•".cyan(), event.describe().dimmed());
            }
        }

        ctx.telemetry().display_summary();
    }
}

impl Default for CommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Check if input is a command (starts with /)
pub fn is_command(input: &str) -> bool {
    input.trim().starts_with('/')
}
