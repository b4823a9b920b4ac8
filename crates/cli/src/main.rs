use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use er_sim_core::config::{default_window_start, parse_start};
use er_sim_core::constants::{DEFAULT_DURATION_HOURS, DEFAULT_OUTPUT_DIR, DEFAULT_SEED};
use er_sim_core::{generate, run, GenerationSummary, SimulationConfig, SimulationWindow};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ersim")]
#[command(about = "Synthetic ER visit generator CLI")]
struct Cli {
    /// Show progress logs
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate visits and write FHIR and HL7 files
    Generate {
        /// Random seed
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,
        /// Window length in hours
        #[arg(long, default_value_t = DEFAULT_DURATION_HOURS)]
        hours: u32,
        /// Window start (RFC 3339, default: today's midnight UTC)
        #[arg(long, value_parser = parse_start_arg)]
        start: Option<DateTime<Utc>>,
        /// Output directory
        #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
        output: PathBuf,
    },
    /// Print counts for a run without writing files
    Summary {
        /// Random seed
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,
        /// Window length in hours
        #[arg(long, default_value_t = DEFAULT_DURATION_HOURS)]
        hours: u32,
        /// Window start (RFC 3339, default: today's midnight UTC)
        #[arg(long, value_parser = parse_start_arg)]
        start: Option<DateTime<Utc>>,
    },
}

fn parse_start_arg(value: &str) -> Result<DateTime<Utc>, String> {
    parse_start(value).map_err(|e| e.to_string())
}

fn print_summary(summary: &GenerationSummary) {
    println!("Patients: {}", summary.patients);
    println!("Observations: {}", summary.observations);
    println!("Long stays (mid-stay snapshot): {}", summary.long_stays);
    println!("By severity:");
    for (severity, count) in &summary.by_severity {
        println!("  {}: {}", severity.as_str(), count);
    }
    println!("By condition:");
    for (condition, count) in &summary.by_condition {
        println!("  {}: {}", condition, count);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::new("er_sim=info"))
            .init();
    }

    match cli.command {
        Some(Commands::Generate {
            seed,
            hours,
            start,
            output,
        }) => {
            let start = start.unwrap_or_else(default_window_start);
            let config = SimulationConfig::new(start, hours, seed, output)?;
            match run(&config) {
                Ok(summary) => {
                    println!(
                        "Generated {} patients ({} resources, {} messages)",
                        summary.generation.patients, summary.resources, summary.messages
                    );
                    println!("  {}", summary.files.fhir_resources.display());
                    println!("  {}", summary.files.hl7_text.display());
                    println!("  {}", summary.files.hl7_json.display());
                }
                Err(e) => {
                    eprintln!("Error generating data: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Some(Commands::Summary { seed, hours, start }) => {
            let start = start.unwrap_or_else(default_window_start);
            let window = SimulationWindow::from_hours(start, hours)?;
            match generate(window.start(), window.end(), seed) {
                Ok(bundles) => print_summary(&GenerationSummary::from_bundles(&bundles)),
                Err(e) => {
                    eprintln!("Error generating data: {}", e);
                    std::process::exit(1);
                }
            }
        }
        None => {
            println!("Use 'ersim --help' for commands");
        }
    }

    Ok(())
}
