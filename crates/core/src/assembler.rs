//! Event assembly.
//!
//! The [`EventAssembler`] owns the single random stream and the monotonic counters of a run.
//! It first draws the whole arrival sequence, then for each arrival builds the patient, picks
//! the condition, samples one vitals pass per snapshot time and emits an [`EventBundle`].
//! Bundles come out in arrival order.

use crate::arrival::arrival_times;
use crate::condition::select_condition;
use crate::config::SimulationWindow;
use crate::constants::{MID_STAY_SNAPSHOT_THRESHOLD_MINUTES, PROGRESS_LOG_INTERVAL};
use crate::demographics::{DemographicsSource, FakerDemographics};
use crate::patient::PatientFactory;
use crate::vitals::sample_snapshot;
use chrono::{DateTime, Duration, Utc};
use er_types::{Condition, EventBundle, SequenceCounter};
use rand::Rng;

/// Monotonic counters for one run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IdentityCounters {
    /// Patient numbers, used for identity and MRN tokens.
    pub patients: SequenceCounter,
    /// Output resource numbers: encounter, condition, then one per observation.
    pub resources: SequenceCounter,
}

/// Snapshot times for a visit: arrival, plus the midpoint for stays over two hours.
pub fn snapshot_times(arrival: DateTime<Utc>, condition: &Condition) -> Vec<DateTime<Utc>> {
    let mut times = vec![arrival];
    if condition.duration_minutes > MID_STAY_SNAPSHOT_THRESHOLD_MINUTES {
        times.push(arrival + Duration::minutes(i64::from(condition.duration_minutes / 2)));
    }
    times
}

/// Builds event bundles from one random stream.
pub struct EventAssembler<R, D = FakerDemographics> {
    rng: R,
    patients: PatientFactory<D>,
    counters: IdentityCounters,
}

impl<R: Rng> EventAssembler<R> {
    /// Assembler with the default demographics provider and fresh counters.
    pub fn new(rng: R) -> Self {
        Self::with_demographics(rng, FakerDemographics)
    }
}

impl<R: Rng, D: DemographicsSource> EventAssembler<R, D> {
    pub fn with_demographics(rng: R, demographics: D) -> Self {
        Self {
            rng,
            patients: PatientFactory::new(demographics),
            counters: IdentityCounters::default(),
        }
    }

    pub fn counters(&self) -> &IdentityCounters {
        &self.counters
    }

    /// Assemble the bundle for one arrival.
    pub fn assemble(&mut self, arrival: DateTime<Utc>) -> EventBundle {
        let patient_number = self.counters.patients.next_id();
        let patient = self.patients.create(&mut self.rng, arrival, patient_number);

        let age = patient.age_on(arrival.date_naive());
        let condition = select_condition(&mut self.rng, age, arrival);

        let encounter_id = self.counters.resources.next_id();
        let condition_id = self.counters.resources.next_id();

        let snapshots = snapshot_times(arrival, &condition)
            .into_iter()
            .map(|taken_at| {
                sample_snapshot(
                    &mut self.rng,
                    &condition,
                    taken_at,
                    &mut self.counters.resources,
                )
            })
            .collect();

        EventBundle {
            arrival_time: arrival,
            patient,
            condition,
            encounter_id,
            condition_id,
            snapshots,
        }
    }

    /// Generate every bundle for `window`, in arrival order.
    pub fn generate(&mut self, window: &SimulationWindow) -> Vec<EventBundle> {
        let arrivals = arrival_times(window, &mut self.rng);
        let total = arrivals.len();
        tracing::info!(
            "generating data for {} patients between {} and {}",
            total,
            window.start(),
            window.end()
        );

        let mut bundles = Vec::with_capacity(total);
        for (idx, arrival) in arrivals.into_iter().enumerate() {
            let bundle = self.assemble(arrival);
            tracing::debug!(
                patient = %bundle.patient.id,
                condition = %bundle.condition.name,
                severity = bundle.condition.severity.as_str(),
                duration_minutes = bundle.condition.duration_minutes,
                "assembled bundle"
            );
            bundles.push(bundle);

            if (idx + 1) % PROGRESS_LOG_INTERVAL == 0 {
                tracing::info!("processed {}/{} patients", idx + 1, total);
            }
        }

        bundles
    }
}
