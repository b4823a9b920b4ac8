use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use er_sim_core::SimulationConfig;

/// Main entry point for the ER simulation runner
///
/// Generates one window of synthetic ER visits and writes the resource and message files.
///
/// # Environment Variables
/// - `ER_SIM_START`: RFC 3339 window start (default: today's midnight UTC)
/// - `ER_SIM_HOURS`: window length in hours (default: 48)
/// - `ER_SIM_SEED`: random seed (default: 42)
/// - `ER_SIM_OUTPUT_DIR`: output directory (default: "output")
///
/// # Returns
/// * `Ok(())` - If the files were written
/// * `Err(anyhow::Error)` - If configuration, generation or writing fails
fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("er_sim=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = SimulationConfig::from_env_values(
        std::env::var("ER_SIM_START").ok(),
        std::env::var("ER_SIM_HOURS").ok(),
        std::env::var("ER_SIM_SEED").ok(),
        std::env::var("ER_SIM_OUTPUT_DIR").ok(),
    )?;

    tracing::info!(
        "++ Simulating {} to {} with seed {}",
        config.window().start(),
        config.window().end(),
        config.seed()
    );

    let summary = er_sim_core::run(&config)?;

    tracing::info!(
        "++ Wrote {} patients, {} resources, {} messages",
        summary.generation.patients,
        summary.resources,
        summary.messages
    );
    tracing::info!("   {}", summary.files.fhir_resources.display());
    tracing::info!("   {}", summary.files.hl7_text.display());
    tracing::info!("   {}", summary.files.hl7_json.display());

    Ok(())
}
