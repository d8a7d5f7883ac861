//! `fireplan` - CLI for the fire extinguisher planner
//!
//! This binary analyzes project files, writes reports and coverage maps, and
//! manages configuration.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing::info;

use fireplan::cli::{
    option_index, AnalyzeCommand, Cli, Command, ConfigCommand, InitCommand, MapCommand,
    RatingsCommand, ReportCommand,
};
use fireplan::rating::{Rating, STANDARD_RATINGS};
use fireplan::report::{ReportData, STANDARD_REFERENCE};
use fireplan::{
    init_logging, plan_file, render_plan_report, Config, Project, UpdateChecker, UpdateStatus,
    APP_NAME, VERSION,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Loaded per command so that `config` can repair an invalid configuration
    let config_path = cli.config;
    let load = || Config::load_from(config_path.clone());

    // Execute the command
    match cli.command {
        Command::Analyze(cmd) => handle_analyze(&load()?, &cmd),
        Command::Report(cmd) => handle_report(&load()?, &cmd),
        Command::Map(cmd) => handle_map(&load()?, &cmd),
        Command::Ratings(cmd) => {
            handle_ratings(&cmd);
            Ok(())
        }
        Command::Init(cmd) => handle_init(&cmd),
        Command::CheckUpdate => handle_check_update(&load()?).await,
        Command::About => {
            handle_about();
            Ok(())
        }
        Command::Config(cmd) => handle_config(config_path.clone(), cmd),
    }
}

fn handle_analyze(config: &Config, cmd: &AnalyzeCommand) -> anyhow::Result<()> {
    let (_, plan) = plan_file(&cmd.project, config)?;
    let evaluations = plan.evaluate_all()?;

    if cmd.json {
        let summary = serde_json::json!({
            "analysis": plan.analysis,
            "effective_radius_ft": plan.analysis.effective_radius_ft(),
            "options": evaluations,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    let analysis = &plan.analysis;
    let units = analysis.inputs.units;
    println!("{}", analysis.inputs.project);
    println!("{}", "=".repeat(analysis.inputs.project.len()));
    println!("Hazard:            {}", analysis.inputs.hazard_class);
    println!("Type:              {}", analysis.inputs.hazard_type);
    println!("Rating:            {}", analysis.rating.raw);
    println!(
        "Floor area:        {:.2} {}",
        units.from_sqft(analysis.area_sqft),
        units.area_label()
    );
    println!();

    for evaluation in &evaluations {
        print!("{}", ReportData::new(&plan, evaluation).to_text());
        println!();
    }
    Ok(())
}

fn handle_report(config: &Config, cmd: &ReportCommand) -> anyhow::Result<()> {
    let (_, plan) = plan_file(&cmd.project, config)?;
    let html = render_plan_report(&plan, option_index(cmd.option))?;

    let output = cmd
        .output
        .clone()
        .unwrap_or_else(|| config.default_report_path());
    write_output(&output, &html)?;
    info!("Report written to {}", output.display());
    println!("Report saved to {}", output.display());
    Ok(())
}

fn handle_map(config: &Config, cmd: &MapCommand) -> anyhow::Result<()> {
    let (_, plan) = plan_file(&cmd.project, config)?;
    let evaluation = plan.evaluate(option_index(cmd.option))?;
    let svg = ReportData::new(&plan, &evaluation).coverage_map().to_svg();

    match &cmd.output {
        Some(path) => {
            write_output(path, &svg)?;
            println!("Map saved to {}", path.display());
        }
        None => print!("{svg}"),
    }
    Ok(())
}

fn handle_ratings(cmd: &RatingsCommand) {
    let describe = |rating: &Rating| {
        let mut classes = Vec::new();
        if rating.c {
            classes.push("C");
        }
        if rating.d {
            classes.push("D");
        }
        if rating.k {
            classes.push("K");
        }
        format!(
            "{:<12} A={:<3} B={:<4} listed: {}",
            rating.raw,
            rating.a,
            rating.b,
            if classes.is_empty() {
                "-".to_string()
            } else {
                classes.join(", ")
            }
        )
    };

    match &cmd.rating {
        Some(text) => println!("{}", describe(&Rating::parse(text))),
        None => {
            println!("Standard ratings");
            println!("----------------");
            for raw in STANDARD_RATINGS {
                println!("{}", describe(&Rating::parse(raw)));
            }
        }
    }
}

fn handle_init(cmd: &InitCommand) -> anyhow::Result<()> {
    Project::template().save(&cmd.path, cmd.force)?;
    println!("Template project written to {}", cmd.path.display());
    Ok(())
}

async fn handle_check_update(config: &Config) -> anyhow::Result<()> {
    if !config.updates.enabled {
        println!("Update checks are disabled in the configuration.");
        return Ok(());
    }

    let checker = UpdateChecker::new(&config.updates.url, VERSION, config.update_timeout())?;
    match checker.check().await? {
        UpdateStatus::Available { version, url } => {
            println!("New version {version} is available (current {VERSION}).");
            if !url.is_empty() {
                println!("Download: {url}");
            }
        }
        UpdateStatus::UpToDate => println!("{APP_NAME} {VERSION} is up to date."),
    }
    Ok(())
}

fn handle_about() {
    println!("{APP_NAME} v{VERSION}");
    println!();
    println!("Standard: {STANDARD_REFERENCE}");
    println!();
    println!("Features:");
    println!("  - Class A area and travel-distance rules");
    println!("  - Class B spill and appreciable-depth hazards");
    println!("  - Class C, D and K advisories");
    println!("  - Standard, offset and hexagonal layouts");
    println!("  - Sampled coverage verification");
    println!("  - HTML reports with SVG coverage maps");
    println!("  - Imperial and metric units");
}

fn handle_config(custom: Option<PathBuf>, cmd: ConfigCommand) -> anyhow::Result<()> {
    let config_path = custom.unwrap_or_else(Config::default_config_path);

    match cmd {
        ConfigCommand::Show { json } => {
            let config = Config::load_from(Some(config_path))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                print!("{}", config.to_toml()?);
            }
        }
        ConfigCommand::Path => {
            println!("{}", config_path.display());
        }
        ConfigCommand::Reset { yes } => {
            if yes {
                Config::write_defaults(&config_path)?;
                println!("Configuration reset: {}", config_path.display());
            } else {
                println!("This will reset all configuration to defaults.");
                println!("Use --yes to confirm.");
            }
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or(config_path);
            println!("Validating configuration: {}", path.display());
            Config::load_from(Some(path.clone()))
                .with_context(|| format!("invalid configuration in {}", path.display()))?;
            println!("Configuration is valid.");
        }
    }
    Ok(())
}

fn write_output(path: &Path, contents: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }
    std::fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}
