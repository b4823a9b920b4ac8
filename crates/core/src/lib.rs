//! # ER Simulation Core
//!
//! Stochastic generator for synthetic emergency-room visits.
//!
//! A run covers a half-open window of simulated time. Arrivals follow a non-homogeneous
//! Poisson process whose rate depends on the hour of day; each arrival gets a synthetic
//! patient, a chief complaint, a length of stay and one or two snapshots of six vital signs.
//! The result is a list of [`EventBundle`]s in arrival order.
//!
//! All randomness comes from one seeded stream, so the same seed and window always produce
//! the same bundles. Formatting into resources and messages lives in the `fhir` and `hl7`
//! crates; this crate only wires them to the filesystem in [`output`].
//!
//! **No process concerns**: environment variables, flags and logging subscribers belong in
//! the binaries.

pub mod arrival;
pub mod assembler;
pub mod condition;
pub mod config;
pub mod constants;
pub mod demographics;
pub mod error;
pub mod output;
pub mod patient;
pub mod summary;
pub mod vitals;

pub use assembler::{EventAssembler, IdentityCounters};
pub use config::{SimulationConfig, SimulationWindow};
pub use error::{SimError, SimResult};
pub use output::{run, write_outputs, RunSummary, WrittenFiles};
pub use summary::GenerationSummary;

pub use er_types::{EventBundle, Severity, VitalSign};

use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Generate every visit in `[window_start, window_end)` from `seed`.
///
/// # Errors
///
/// Returns [`SimError::InvalidWindow`] if `window_end <= window_start`.
pub fn generate(
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
    seed: u64,
) -> SimResult<Vec<EventBundle>> {
    let window = SimulationWindow::new(window_start, window_end)?;
    Ok(EventAssembler::new(ChaCha8Rng::seed_from_u64(seed)).generate(&window))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn start() -> DateTime<Utc> {
        "2026-10-19T00:00:00Z"
            .parse::<DateTime<Utc>>()
            .expect("valid datetime")
    }

    #[test]
    fn generate_rejects_inverted_window() {
        let err = generate(start(), start(), 42).expect_err("empty window");
        match err {
            SimError::InvalidWindow { .. } => {}
            other => panic!("expected InvalidWindow, got {other:?}"),
        }
        assert!(generate(start(), start() - Duration::hours(1), 42).is_err());
    }

    #[test]
    fn generate_is_reproducible() {
        let end = start() + Duration::hours(48);
        let first = generate(start(), end, 42).expect("generate");
        let second = generate(start(), end, 42).expect("generate");
        assert_eq!(first, second);
        // Roughly 48h at 1 to 8 arrivals per hour.
        assert!(first.len() > 48 && first.len() < 400, "{} patients", first.len());
    }

    #[test]
    fn short_window_can_be_empty_or_small() {
        let bundles = generate(start(), start() + Duration::minutes(1), 7).expect("generate");
        assert!(bundles.len() <= 3);
    }
}
