//! SkinSnap - Main CLI Entry Point

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use log::{info, warn};
use skinsnap::{
    cli::{Args, Commands, Verbosity},
    config::Config,
    context::AppContext,
    doctor::Doctor,
    questionnaire::{AllergySelection, StageEvent},
    repl::{InputHandler, ReplSession},
};
use std::path::Path;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() -> Result<()> {
    let args = Args::parse();
    let verbosity = args.verbosity();

    env_logger::Builder::new()
        .filter_level(verbosity.log_level())
        .parse_default_env()
        .init();

    let config = Config::load(args.config.as_deref())
        .context("failed to load configuration")?
        .with_model_path(args.model_path.as_deref());

    // The doctor reports an invalid configuration as a failed check
    if !matches!(args.command, Some(Commands::Doctor)) {
        config.validate().context("invalid configuration")?;
    }

    if args.no_color || !config.display.color_output {
        colored::control::set_override(false);
    }

    match &args.command {
        Some(Commands::Start) => {
            run_repl(config, verbosity)?;
        }
        Some(Commands::Analyze {
            image,
            humid,
            sensitive,
            allergies,
            other,
            json,
        }) => {
            let answers = Answers {
                humid: *humid,
                sensitive: *sensitive,
                allergies: AllergySelection::from_labels(allergies, other.as_deref()),
            };
            run_analyze(config, verbosity, image, answers, *json)?;
        }
        Some(Commands::Doctor) => {
            run_doctor(config);
        }
        Some(Commands::Config) => {
            show_config(&args, &config)?;
        }
        None => {
            println!("SkinSnap v{} - Skin Care Questionnaire", VERSION);
            println!("\nUsage:");
            println!("  skinsnap start                   Interactive questionnaire");
            println!("  skinsnap analyze <IMAGE> [...]   Answer via flags and classify a photo");
            println!("  skinsnap doctor                  Check model and configuration");
            println!("  skinsnap config                  Show configuration");
            println!("\nExample:");
            println!("  skinsnap analyze face.jpg --humid yes --allergy Fragrance");
            println!();
        }
    }

    Ok(())
}

/// Run the interactive questionnaire
fn run_repl(config: Config, verbosity: Verbosity) -> Result<()> {
    let history_path = config.history_path();
    let ctx = AppContext::new(config);

    let mut input = match InputHandler::with_history(history_path) {
        Ok(input) => input,
        Err(e) => {
            warn!("history unavailable: {}", e);
            InputHandler::new()?
        }
    };

    let mut repl = ReplSession::new(&ctx);
    repl.show_welcome(VERSION);
    repl.run(&mut input)?;

    if verbosity.show_summary() {
        ctx.telemetry().display_summary();
    }
    Ok(())
}

/// Questionnaire answers given on the command line
struct Answers {
    humid: bool,
    sensitive: bool,
    allergies: AllergySelection,
}

/// Drive the questionnaire from flags, then classify one image
fn run_analyze(config: Config, verbosity: Verbosity, image: &Path, answers: Answers, json: bool) -> Result<()> {
    let ctx = AppContext::new(config);
    if let Some(reason) = ctx.model().unavailable_reason() {
        warn!("classifier unavailable: {}", reason);
    }

    let mut session = ctx.new_session();
    for event in [
        StageEvent::Begin,
        StageEvent::AnswerHumidity(answers.humid),
        StageEvent::AnswerSensitivity(answers.sensitive),
        StageEvent::AnswerAllergies(answers.allergies),
        StageEvent::ProceedToUpload,
    ] {
        ctx.advance(&mut session, event)?;
    }
    info!("questionnaire answered, classifying {}", image.display());

    let report = ctx
        .analyze(&session, image)
        .with_context(|| format!("failed to analyze {}", image.display()))?;

    if json {
        println!("{}", report.to_json()?);
    } else {
        if !report.is_prediction_available() && verbosity != Verbosity::Quiet {
            eprintln!("{} {}", "Warning:".yellow().bold(), skinsnap::advice::MODEL_UNAVAILABLE);
        }
        print!("{}", report.render_text());
    }

    if verbosity.show_summary() {
        ctx.telemetry().display_summary();
    }
    Ok(())
}

fn run_doctor(config: Config) {
    let doctor = Doctor::new(config);
    let checks = doctor.run_diagnostics();
    Doctor::display_results(&checks);

    std::process::exit(if Doctor::overall_status(&checks) { 0 } else { 1 });
}

fn show_config(args: &Args, config: &Config) -> Result<()> {
    println!("\n{}\n", "SkinSnap Configuration".bold());

    let source = args
        .config
        .clone()
        .unwrap_or_else(Config::default_path);
    println!("Source:      {}", source.display());
    println!("Model file:  {}", config.model_path().display());
    println!("State dir:   {}", config.state_dir().display());
    println!("History:     {}", config.history_path().display());
    println!("Verbosity:   {}", args.verbosity().as_str());
    println!();
    println!("{}", toml::to_string_pretty(config)?);

    Ok(())
}
