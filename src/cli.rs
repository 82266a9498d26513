use crate::aggregate::{aggregate, aggregate_numeric};
use crate::config::presets::{
    assess_element, environment_rules, get_presets, lookup_environment, release_verdict_rules,
};
use crate::config::settings::Settings;
use crate::config::types::{BugObservation, ElementObservation, TestResult};
use crate::config::validator::check_sla_threshold;
use crate::observability::audit::audit_logger;
use crate::report::{build_report, Report};
use crate::retry::run_with_retries;
use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Settings file (JSON); built-in defaults when omitted
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Emit the report as JSON instead of text
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a UI element's state, severity and recommended action
    Element {
        /// Element exists in the DOM
        #[arg(long, action = ArgAction::Set, default_value_t = true)]
        present: bool,
        /// Element is visible
        #[arg(long, action = ArgAction::Set, default_value_t = true)]
        displayed: bool,
        /// Element accepts interaction
        #[arg(long, action = ArgAction::Set, default_value_t = true)]
        enabled: bool,
    },
    /// Assign a priority to a bug from its frequency and impact
    Bug {
        /// always, often or rarely
        #[arg(long)]
        frequency: String,
        /// blocker, major or minor
        #[arg(long)]
        impact: String,
    },
    /// Summarize test results (pass, fail, skip) and derive a release verdict
    Tally {
        /// Test results in execution order
        #[arg(required = true)]
        results: Vec<String>,
    },
    /// Summarize response times against an SLA threshold
    Latency {
        /// Response times in milliseconds
        #[arg(required = true)]
        samples: Vec<f64>,
        /// SLA threshold in milliseconds (overrides settings)
        #[arg(long, value_parser = parse_sla_threshold)]
        threshold: Option<f64>,
    },
    /// Resolve an environment name or alias to its profile
    Env {
        /// Environment name, e.g. dev, staging, qa, prod
        name: String,
    },
    /// Simulate a flaky call under a bounded retry budget
    Retry {
        /// Attempt budget (overrides settings)
        #[arg(long)]
        max_attempts: Option<u32>,
        /// Probability that a single attempt succeeds
        #[arg(long, default_value_t = 0.4)]
        success_probability: f64,
        /// Seed for a reproducible simulation
        #[arg(long)]
        seed: Option<u64>,
    },
    /// List the built-in rule tables
    Presets,
}

impl Commands {
    fn command_name(&self) -> &'static str {
        match self {
            Self::Element { .. } => "element",
            Self::Bug { .. } => "bug",
            Self::Tally { .. } => "tally",
            Self::Latency { .. } => "latency",
            Self::Env { .. } => "env",
            Self::Retry { .. } => "retry",
            Self::Presets => "presets",
        }
    }
}

pub fn run() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref()).context("failed to load settings")?;
    let command_name = cli.command.command_name();
    log::debug!("running {} command", command_name);

    let presets = get_presets();
    let report = match cli.command {
        Commands::Element {
            present,
            displayed,
            enabled,
        } => {
            let assessment = assess_element(
                ElementObservation::new(present, displayed, enabled),
                &presets.element_state,
                &presets.element_severity,
            );
            build_report("ELEMENT CHECK REPORT", &assessment, &presets.element_action)
        }
        Commands::Bug { frequency, impact } => {
            let bug = BugObservation::parse(&frequency, &impact);
            build_report("BUG CLASSIFICATION REPORT", &bug, &presets.bug_priority)
        }
        Commands::Tally { results } => {
            let parsed = parse_results(command_name, &results);
            let summary = aggregate(&parsed, &settings.success_label);
            build_report(
                "TEST REPORT",
                &summary,
                &release_verdict_rules(&settings.verdict),
            )
        }
        Commands::Latency { samples, threshold } => {
            let threshold = threshold.unwrap_or(settings.sla_threshold_ms);
            let summary = aggregate_numeric(&samples, threshold)
                .context("failed to aggregate response times")?;
            build_report("API PERFORMANCE REPORT", &summary, &presets.sla_verdict)
        }
        Commands::Env { name } => {
            let rules = environment_rules(&settings.environments);
            let lookup = lookup_environment(&name, &rules);
            build_report(
                "ENVIRONMENT CONFIGURATION",
                &lookup,
                &presets.environment_resolution,
            )
        }
        Commands::Retry {
            max_attempts,
            success_probability,
            seed,
        } => {
            if !(0.0..=1.0).contains(&success_probability) {
                anyhow::bail!(
                    "--success-probability must be within [0, 1], got {}",
                    success_probability
                );
            }
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let max_attempts = max_attempts.unwrap_or(settings.max_attempts);
            let outcome = run_with_retries(max_attempts, |attempt| {
                let ok = rng.gen_bool(success_probability);
                eprintln!("Attempt {}... {}", attempt, if ok { "succeeded" } else { "failed" });
                ok
            })?;
            build_report("RETRY REPORT", &outcome, &presets.retry_verdict)
        }
        Commands::Presets => {
            print_presets();
            return Ok(());
        }
    };

    emit(&report, cli.json)?;
    audit_logger().log_report(command_name, &report);
    Ok(())
}

/// Parse raw test results, skipping and warning about unknown values
fn parse_results(command_name: &str, raw: &[String]) -> Vec<TestResult> {
    raw.iter()
        .filter_map(|value| match value.parse::<TestResult>() {
            Ok(result) => Some(result),
            Err(reason) => {
                log::warn!("Unknown result: {}", value);
                audit_logger().log_skipped_input(command_name, value, &reason);
                None
            }
        })
        .collect()
}

/// Same bounds as `sla_threshold_ms` in the settings file
fn parse_sla_threshold(raw: &str) -> std::result::Result<f64, String> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|e| format!("invalid threshold '{}': {}", raw, e))?;
    check_sla_threshold(value)?;
    Ok(value)
}

fn emit(report: &Report, json: bool) -> Result<()> {
    if json {
        let json = report.to_json().context("failed to serialize report")?;
        println!("{}", json);
    } else {
        println!("{}", report.render());
    }
    Ok(())
}

fn print_presets() {
    for preset in get_presets().list() {
        println!("{} - {}", preset.id, preset.description);
        for (idx, (name, label)) in preset.rules.iter().enumerate() {
            println!("  {:>2}. {:<28} -> {}", idx + 1, name, label);
        }
    }
}
