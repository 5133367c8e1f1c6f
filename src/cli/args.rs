//! Command-line argument parsing for SkinSnap
//!
//! Provides clap-based CLI with subcommands and verbosity control.

use crate::questionnaire::parse_yes_no;
use clap::{Parser, Subcommand};
use log::LevelFilter;
use std::path::PathBuf;

/// SkinSnap - Answer a few skin questions, upload a photo, get skincare tips
#[derive(Parser, Debug)]
#[command(name = "skinsnap")]
#[command(author = "SkinSnap Team")]
#[command(version)]
#[command(about = "Skin-care questionnaire and skin condition classifier", long_about = None)]
pub struct Args {
    /// Classifier weights (.safetensors), overrides the config file
    #[arg(long, global = true)]
    pub model_path: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level: -q (quiet), default (normal), -v (verbose), -vv (very verbose)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the interactive questionnaire
    Start,

    /// Answer the questionnaire from flags and classify one image
    Analyze {
        /// JPEG or PNG photo of the skin area
        #[arg(value_name = "IMAGE")]
        image: PathBuf,

        /// Do you live in a humid environment? (yes/no)
        #[arg(long, value_parser = parse_answer, action = clap::ArgAction::Set, default_value = "no")]
        humid: bool,

        /// Is your skin generally sensitive? (yes/no)
        #[arg(long, value_parser = parse_answer, action = clap::ArgAction::Set, default_value = "no")]
        sensitive: bool,

        /// Known allergy; standard options or free text, repeatable
        #[arg(long = "allergy", value_name = "NAME")]
        allergies: Vec<String>,

        /// Text for the "Other" allergy option
        #[arg(long, value_name = "TEXT")]
        other: Option<String>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check configuration and the classifier artifact
    Doctor,

    /// Display current configuration
    Config,
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    VeryVerbose,
}

fn parse_answer(input: &str) -> Result<bool, String> {
    parse_yes_no(input).ok_or_else(|| format!("expected yes or no, got '{}'", input))
}

impl Args {
    /// Get verbosity level based on flags
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::VeryVerbose,
            }
        }
    }
}

impl Verbosity {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "quiet",
            Verbosity::Normal => "normal",
            Verbosity::Verbose => "verbose",
            Verbosity::VeryVerbose => "very_verbose",
        }
    }

    /// Default log level when RUST_LOG is not set
    pub fn log_level(&self) -> LevelFilter {
        match self {
            Verbosity::Quiet => LevelFilter::Error,
            Verbosity::Normal => LevelFilter::Warn,
            Verbosity::Verbose => LevelFilter::Info,
            Verbosity::VeryVerbose => LevelFilter::Debug,
        }
    }

    /// Check if should show progress spinners
    pub fn show_progress(&self) -> bool {
        !matches!(self, Verbosity::Quiet)
    }

    /// Check if should print the telemetry summary
    pub fn show_summary(&self) -> bool {
        matches!(self, Verbosity::Verbose | Verbosity::VeryVerbose)
    }
}
