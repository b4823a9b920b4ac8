//! Vital-sign sampling.
//!
//! For each of the six vitals the sampler decides between the normal and the abnormal band
//! according to the condition's severity, samples uniformly inside the band, applies any
//! condition-specific override and rounds to one decimal place. Every call is an independent
//! pass, so two snapshots of the same visit get different readings.

use chrono::{DateTime, Utc};
use er_types::{Condition, ObservationSnapshot, SequenceCounter, Severity, VitalReading, VitalSign};
use rand::Rng;

/// Closed numeric band `[min, max]` for a vital.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VitalRange {
    pub min: f64,
    pub max: f64,
}

impl VitalRange {
    const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        rng.gen_range(self.min..self.max)
    }
}

/// Band sampled when a vital is not pushed abnormal.
pub fn normal_range(vital: VitalSign) -> VitalRange {
    match vital {
        VitalSign::Temperature => VitalRange::new(97.0, 99.5),
        VitalSign::HeartRate => VitalRange::new(60.0, 100.0),
        VitalSign::BloodPressureSystolic => VitalRange::new(90.0, 120.0),
        VitalSign::BloodPressureDiastolic => VitalRange::new(60.0, 80.0),
        VitalSign::RespiratoryRate => VitalRange::new(12.0, 20.0),
        VitalSign::OxygenSaturation => VitalRange::new(95.0, 100.0),
    }
}

/// Wider band sampled when severity pushes a vital abnormal.
pub fn abnormal_range(vital: VitalSign) -> VitalRange {
    match vital {
        VitalSign::Temperature => VitalRange::new(95.0, 104.0),
        VitalSign::HeartRate => VitalRange::new(40.0, 150.0),
        VitalSign::BloodPressureSystolic => VitalRange::new(70.0, 180.0),
        VitalSign::BloodPressureDiastolic => VitalRange::new(40.0, 120.0),
        VitalSign::RespiratoryRate => VitalRange::new(8.0, 30.0),
        VitalSign::OxygenSaturation => VitalRange::new(85.0, 100.0),
    }
}

/// Probability that a single vital is drawn from its abnormal band.
pub fn abnormal_probability(severity: Severity) -> f64 {
    match severity {
        Severity::High => 0.7,
        Severity::Medium => 0.4,
        Severity::Low => 0.0,
    }
}

/// Condition-specific band that supersedes the severity-based sample.
pub fn override_range(condition_name: &str, vital: VitalSign) -> Option<VitalRange> {
    match (condition_name, vital) {
        ("Fever", VitalSign::Temperature) => Some(VitalRange::new(100.0, 103.0)),
        ("Asthma Exacerbation" | "Shortness of Breath", VitalSign::RespiratoryRate) => {
            Some(VitalRange::new(20.0, 30.0))
        }
        ("Asthma Exacerbation" | "Shortness of Breath", VitalSign::OxygenSaturation) => {
            Some(VitalRange::new(88.0, 95.0))
        }
        _ => None,
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Sample one vital for `condition`.
///
/// Draw order: abnormality roll (medium and high severity only), band sample, override
/// sample (override conditions only).
pub fn sample_vital<R: Rng + ?Sized>(rng: &mut R, condition: &Condition, vital: VitalSign) -> f64 {
    let abnormal = match condition.severity {
        Severity::Low => false,
        severity => rng.gen::<f64>() < abnormal_probability(severity),
    };
    let band = if abnormal {
        abnormal_range(vital)
    } else {
        normal_range(vital)
    };

    let mut value = band.sample(rng);
    if let Some(forced) = override_range(&condition.name, vital) {
        value = forced.sample(rng);
    }

    round_one_decimal(value)
}

/// Sample a full snapshot of all six vitals taken at `taken_at`.
///
/// One observation resource number is drawn from `resource_ids` per reading.
pub fn sample_snapshot<R: Rng + ?Sized>(
    rng: &mut R,
    condition: &Condition,
    taken_at: DateTime<Utc>,
    resource_ids: &mut SequenceCounter,
) -> ObservationSnapshot {
    let readings = VitalSign::ALL
        .iter()
        .map(|&vital| VitalReading {
            vital,
            value: sample_vital(rng, condition, vital),
            resource_id: resource_ids.next_id(),
        })
        .collect();

    ObservationSnapshot { taken_at, readings }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn taken_at() -> DateTime<Utc> {
        "2026-10-19T18:30:00Z"
            .parse::<DateTime<Utc>>()
            .expect("valid datetime")
    }

    fn condition(name: &str, severity: Severity) -> Condition {
        Condition {
            name: name.to_string(),
            code: "R00.0".to_string(),
            severity,
            avg_duration_minutes: 120,
            duration_minutes: 120,
            discharge_time: taken_at() + Duration::minutes(120),
        }
    }

    fn is_one_decimal(value: f64) -> bool {
        ((value * 10.0).round() - value * 10.0).abs() < 1e-6
    }

    #[test]
    fn low_severity_stays_in_normal_band() {
        let mut rng = ChaCha8Rng::seed_from_u64(31);
        let headache = condition("Headache", Severity::Low);
        for _ in 0..500 {
            for vital in VitalSign::ALL {
                let value = sample_vital(&mut rng, &headache, vital);
                assert!(normal_range(vital).contains(value), "{vital:?} = {value}");
                assert!(is_one_decimal(value));
            }
        }
    }

    #[test]
    fn high_severity_stays_in_abnormal_band() {
        let mut rng = ChaCha8Rng::seed_from_u64(32);
        let chest_pain = condition("Chest Pain", Severity::High);
        for _ in 0..500 {
            for vital in VitalSign::ALL {
                let value = sample_vital(&mut rng, &chest_pain, vital);
                // The abnormal band contains the normal band for every vital.
                assert!(abnormal_range(vital).contains(value), "{vital:?} = {value}");
            }
        }
    }

    #[test]
    fn high_severity_leaves_normal_band_more_often_than_medium() {
        let outside_normal = |severity: Severity, seed: u64| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let c = condition("Generic", severity);
            (0..2_000)
                .filter(|_| {
                    let value = sample_vital(&mut rng, &c, VitalSign::HeartRate);
                    !normal_range(VitalSign::HeartRate).contains(value)
                })
                .count()
        };

        let high = outside_normal(Severity::High, 33);
        let medium = outside_normal(Severity::Medium, 33);
        let low = outside_normal(Severity::Low, 33);

        assert_eq!(low, 0);
        assert!(medium > 0);
        assert!(high > medium);
    }

    #[test]
    fn fever_forces_high_temperature() {
        let mut rng = ChaCha8Rng::seed_from_u64(34);
        let fever = condition("Fever", Severity::Medium);
        for _ in 0..1_000 {
            let value = sample_vital(&mut rng, &fever, VitalSign::Temperature);
            assert!((100.0..=103.0).contains(&value), "temperature {value}");
        }
    }

    #[test]
    fn respiratory_conditions_force_breathing_vitals() {
        let mut rng = ChaCha8Rng::seed_from_u64(35);
        for name in ["Asthma Exacerbation", "Shortness of Breath"] {
            let c = condition(name, Severity::High);
            for _ in 0..500 {
                let rr = sample_vital(&mut rng, &c, VitalSign::RespiratoryRate);
                let spo2 = sample_vital(&mut rng, &c, VitalSign::OxygenSaturation);
                assert!((20.0..=30.0).contains(&rr), "{name} respiratory rate {rr}");
                assert!((88.0..=95.0).contains(&spo2), "{name} oxygen saturation {spo2}");
            }
        }
    }

    #[test]
    fn overrides_only_touch_named_vitals() {
        assert!(override_range("Fever", VitalSign::HeartRate).is_none());
        assert!(override_range("Pediatric Fever", VitalSign::Temperature).is_none());
        assert!(override_range("Shortness of Breath", VitalSign::Temperature).is_none());
    }

    #[test]
    fn snapshot_has_one_reading_per_vital() {
        let mut rng = ChaCha8Rng::seed_from_u64(36);
        let mut ids = SequenceCounter::starting_at(10);
        let snapshot = sample_snapshot(
            &mut rng,
            &condition("Pneumonia", Severity::High),
            taken_at(),
            &mut ids,
        );

        assert_eq!(snapshot.taken_at, taken_at());
        assert_eq!(snapshot.readings.len(), 6);
        for (reading, vital) in snapshot.readings.iter().zip(VitalSign::ALL) {
            assert_eq!(reading.vital, vital);
        }
        let ids_used: Vec<u64> = snapshot.readings.iter().map(|r| r.resource_id).collect();
        assert_eq!(ids_used, vec![10, 11, 12, 13, 14, 15]);
        assert_eq!(ids.peek(), 16);
    }

    #[test]
    fn repeated_snapshots_are_independent() {
        let mut rng = ChaCha8Rng::seed_from_u64(37);
        let mut ids = SequenceCounter::default();
        let c = condition("Seizure", Severity::High);
        let first = sample_snapshot(&mut rng, &c, taken_at(), &mut ids);
        let second = sample_snapshot(&mut rng, &c, taken_at(), &mut ids);

        let values = |s: &ObservationSnapshot| s.readings.iter().map(|r| r.value).collect::<Vec<_>>();
        assert_ne!(values(&first), values(&second));
    }
}
