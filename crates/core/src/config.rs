//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into the generator. Binaries read environment variables or flags; the core never
//! does.

use crate::constants::{DEFAULT_DURATION_HOURS, DEFAULT_OUTPUT_DIR, DEFAULT_SEED};
use crate::{SimError, SimResult};
use chrono::{DateTime, Duration, NaiveTime, TimeZone, Utc};
use std::path::{Path, PathBuf};

/// The half-open simulated time span `[start, end)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimulationWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl SimulationWindow {
    /// Create a window, failing fast when `end` is not strictly after `start`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidWindow`] if `end <= start`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> SimResult<Self> {
        if end <= start {
            return Err(SimError::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// Create a window of `hours` starting at `start`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidWindow`] if `hours` is zero and
    /// [`SimError::WindowOutOfRange`] if the end is past the representable calendar.
    pub fn from_hours(start: DateTime<Utc>, hours: u32) -> SimResult<Self> {
        let end = start
            .checked_add_signed(Duration::hours(i64::from(hours)))
            .ok_or(SimError::WindowOutOfRange { start, hours })?;
        Self::new(start, end)
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at < self.end
    }
}

/// Generator configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct SimulationConfig {
    window: SimulationWindow,
    seed: u64,
    output_dir: PathBuf,
}

impl SimulationConfig {
    /// Create a new `SimulationConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidWindow`] for a zero-hour window,
    /// [`SimError::WindowOutOfRange`] when the window end is not representable and
    /// [`SimError::InvalidInput`] for an empty output directory.
    pub fn new(
        window_start: DateTime<Utc>,
        duration_hours: u32,
        seed: u64,
        output_dir: PathBuf,
    ) -> SimResult<Self> {
        if output_dir.as_os_str().is_empty() {
            return Err(SimError::InvalidInput(
                "output_dir cannot be empty".into(),
            ));
        }

        Ok(Self {
            window: SimulationWindow::from_hours(window_start, duration_hours)?,
            seed,
            output_dir,
        })
    }

    /// Build a configuration from optional raw values, typically read from the environment.
    ///
    /// Missing or blank values fall back to the defaults: window starting at today's UTC
    /// midnight, 48 hours, seed 42, output directory `output`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidInput`] if a value does not parse, or any error from
    /// [`SimulationConfig::new`].
    pub fn from_env_values(
        start: Option<String>,
        hours: Option<String>,
        seed: Option<String>,
        output_dir: Option<String>,
    ) -> SimResult<Self> {
        let window_start = match non_blank(start) {
            Some(v) => parse_start(&v)?,
            None => default_window_start(),
        };
        let duration_hours = match non_blank(hours) {
            Some(v) => v
                .parse::<u32>()
                .map_err(|e| SimError::InvalidInput(format!("invalid hours '{v}': {e}")))?,
            None => DEFAULT_DURATION_HOURS,
        };
        let seed = match non_blank(seed) {
            Some(v) => v
                .parse::<u64>()
                .map_err(|e| SimError::InvalidInput(format!("invalid seed '{v}': {e}")))?,
            None => DEFAULT_SEED,
        };
        let output_dir = non_blank(output_dir).unwrap_or_else(|| DEFAULT_OUTPUT_DIR.to_string());

        Self::new(window_start, duration_hours, seed, PathBuf::from(output_dir))
    }

    pub fn window(&self) -> &SimulationWindow {
        &self.window
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

/// Midnight UTC of the current day.
pub fn default_window_start() -> DateTime<Utc> {
    let midnight = Utc::now().date_naive().and_time(NaiveTime::default());
    Utc.from_utc_datetime(&midnight)
}

/// Parse an RFC 3339 window start.
///
/// # Errors
///
/// Returns [`SimError::InvalidInput`] if `value` is not RFC 3339.
pub fn parse_start(value: &str) -> SimResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| SimError::InvalidInput(format!("invalid start time '{value}': {e}")))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
