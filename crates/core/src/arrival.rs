//! Patient arrival process.
//!
//! Arrivals follow a time-inhomogeneous Poisson process. At every step the instantaneous rate
//! `λ` (arrivals per hour) is drawn uniformly from the range of the regime that owns the
//! current hour of day, and the gap to the next arrival is exponential with mean `60/λ`
//! minutes. The rate is re-drawn at every arrival, not once per calendar hour.

use crate::config::SimulationWindow;
use chrono::{DateTime, Duration, Timelike, Utc};
use rand::Rng;
use rand_distr::Exp1;

/// Hour-of-day regime controlling the arrival rate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArrivalRegime {
    /// 18:00 to 02:00.
    EveningNight,
    /// 02:00 to 08:00.
    EarlyMorning,
    /// 08:00 to 18:00.
    Daytime,
}

impl ArrivalRegime {
    /// Regime owning `hour` (0-23).
    pub fn for_hour(hour: u32) -> Self {
        match hour {
            h if h >= 18 || h < 2 => Self::EveningNight,
            h if h < 8 => Self::EarlyMorning,
            _ => Self::Daytime,
        }
    }

    /// Range `[min, max)` that `λ` is drawn from, in arrivals per hour.
    pub fn rate_range(&self) -> (f64, f64) {
        match self {
            Self::EveningNight => (4.0, 8.0),
            Self::EarlyMorning => (1.0, 3.0),
            Self::Daytime => (2.0, 5.0),
        }
    }
}

/// Lazily generated, strictly increasing arrival times inside a window.
///
/// The iterator ends permanently once simulated time reaches the window end.
pub struct ArrivalProcess<'a, R: Rng + ?Sized> {
    rng: &'a mut R,
    current: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl<'a, R: Rng + ?Sized> ArrivalProcess<'a, R> {
    pub fn new(window: &SimulationWindow, rng: &'a mut R) -> Self {
        Self {
            rng,
            current: window.start(),
            end: window.end(),
        }
    }

    /// Draw the next inter-arrival gap for the current simulated time.
    fn next_gap(&mut self) -> Duration {
        let (low, high) = ArrivalRegime::for_hour(self.current.hour()).rate_range();
        let rate_per_hour = self.rng.gen_range(low..high);
        let unit_exponential: f64 = self.rng.sample(Exp1);
        let gap_minutes = unit_exponential * 60.0 / rate_per_hour;

        // Microsecond resolution; never zero so the sequence stays strictly increasing.
        let micros = (gap_minutes * 60_000_000.0).round() as i64;
        Duration::microseconds(micros.max(1))
    }
}

impl<R: Rng + ?Sized> Iterator for ArrivalProcess<'_, R> {
    type Item = DateTime<Utc>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current >= self.end {
            return None;
        }
        let gap = self.next_gap();
        // Past the last representable instant counts as past the window end.
        self.current = self.current.checked_add_signed(gap).unwrap_or(self.end);
        (self.current < self.end).then_some(self.current)
    }
}

/// Collect every arrival in `window`.
pub fn arrival_times<R: Rng + ?Sized>(window: &SimulationWindow, rng: &mut R) -> Vec<DateTime<Utc>> {
    ArrivalProcess::new(window, rng).collect()
}
