//! Clinical event model shared by the generator and the formatting layers.
//!
//! Every type here is created once by the generator and read-only afterwards.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::Serialize;

// ============================================================================
// Enumerations
// ============================================================================

/// Administrative gender recorded for a synthetic patient.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// All genders, in the order the patient factory chooses from.
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    /// Returns the lowercase wire string (`male`, `female`, `other`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
        }
    }

    /// Single-letter administrative code (`M`, `F`, `O`).
    pub fn initial(&self) -> char {
        match self {
            Self::Male => 'M',
            Self::Female => 'F',
            Self::Other => 'O',
        }
    }
}

/// Severity tier of a condition. Drives how often vitals fall in the abnormal band.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// The six vital signs captured in every observation snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VitalSign {
    Temperature,
    HeartRate,
    BloodPressureSystolic,
    BloodPressureDiastolic,
    RespiratoryRate,
    OxygenSaturation,
}

impl VitalSign {
    /// All vitals in snapshot order.
    pub const ALL: [VitalSign; 6] = [
        VitalSign::Temperature,
        VitalSign::HeartRate,
        VitalSign::BloodPressureSystolic,
        VitalSign::BloodPressureDiastolic,
        VitalSign::RespiratoryRate,
        VitalSign::OxygenSaturation,
    ];

    /// Snake-case key, e.g. `blood_pressure_systolic`.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::HeartRate => "heart_rate",
            Self::BloodPressureSystolic => "blood_pressure_systolic",
            Self::BloodPressureDiastolic => "blood_pressure_diastolic",
            Self::RespiratoryRate => "respiratory_rate",
            Self::OxygenSaturation => "oxygen_saturation",
        }
    }

    /// Measurement unit of the sampled value.
    pub fn unit(&self) -> &'static str {
        match self {
            Self::Temperature => "F",
            Self::HeartRate => "bpm",
            Self::BloodPressureSystolic | Self::BloodPressureDiastolic => "mmHg",
            Self::RespiratoryRate => "/min",
            Self::OxygenSaturation => "%",
        }
    }

    /// LOINC code used by both formatting layers.
    pub fn loinc_code(&self) -> &'static str {
        match self {
            Self::Temperature => "8310-5",
            Self::HeartRate => "8867-4",
            Self::BloodPressureSystolic => "8480-6",
            Self::BloodPressureDiastolic => "8462-4",
            Self::RespiratoryRate => "9279-1",
            Self::OxygenSaturation => "2708-6",
        }
    }
}

// ============================================================================
// Patient
// ============================================================================

/// Structured display name of a synthetic patient.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HumanName {
    pub given: String,
    pub family: String,
}

impl std::fmt::Display for HumanName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.given, self.family)
    }
}

/// Demographics of one synthetic patient, owned by exactly one [`EventBundle`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Patient {
    /// Identity token (`PAT000001`), unique per run.
    pub id: String,

    /// Medical record number token, unique per run.
    pub mrn: String,

    pub name: HumanName,

    pub gender: Gender,

    pub birth_date: NaiveDate,

    /// Free-text postal address. May span several lines.
    pub address: String,

    pub phone: String,
}

impl Patient {
    /// Whole-year age of the patient on `date`.
    ///
    /// Returns 0 for dates before the birth date.
    pub fn age_on(&self, date: NaiveDate) -> u32 {
        let mut years = date.year() - self.birth_date.year();
        if (date.month(), date.day()) < (self.birth_date.month(), self.birth_date.day()) {
            years -= 1;
        }
        years.max(0) as u32
    }
}

// ============================================================================
// Condition
// ============================================================================

/// The presenting condition of one visit, with its sampled length of stay.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Condition {
    pub name: String,

    /// ICD-10 diagnostic code, treated as an opaque string.
    pub code: String,

    pub severity: Severity,

    /// Table average length of stay in minutes.
    pub avg_duration_minutes: u32,

    /// Sampled length of stay in minutes. Always greater than zero.
    pub duration_minutes: u32,

    /// Arrival plus `duration_minutes`.
    pub discharge_time: DateTime<Utc>,
}

impl Condition {
    pub fn duration(&self) -> Duration {
        Duration::minutes(i64::from(self.duration_minutes))
    }
}

// ============================================================================
// Observations
// ============================================================================

/// One sampled vital-sign value.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VitalReading {
    pub vital: VitalSign,

    /// Sampled value rounded to one decimal place.
    pub value: f64,

    /// Resource number allocated for the observation record of this reading.
    pub resource_id: u64,
}

impl VitalReading {
    pub fn unit(&self) -> &'static str {
        self.vital.unit()
    }
}

/// All six vitals taken at one instant.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ObservationSnapshot {
    pub taken_at: DateTime<Utc>,

    /// One reading per vital, in [`VitalSign::ALL`] order.
    pub readings: Vec<VitalReading>,
}

impl ObservationSnapshot {
    /// Returns the reading for `vital`, if present.
    pub fn reading(&self, vital: VitalSign) -> Option<&VitalReading> {
        self.readings.iter().find(|r| r.vital == vital)
    }
}

// ============================================================================
// Bundle
// ============================================================================

/// Everything generated for one ER visit.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EventBundle {
    pub arrival_time: DateTime<Utc>,

    pub patient: Patient,

    pub condition: Condition,

    /// Resource number of the encounter record.
    pub encounter_id: u64,

    /// Resource number of the condition record.
    pub condition_id: u64,

    /// Arrival snapshot first, then the optional mid-stay snapshot.
    pub snapshots: Vec<ObservationSnapshot>,
}

impl EventBundle {
    pub fn discharge_time(&self) -> DateTime<Utc> {
        self.condition.discharge_time
    }

    /// Total number of vital readings across all snapshots.
    pub fn reading_count(&self) -> usize {
        self.snapshots.iter().map(|s| s.readings.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patient_born(birth_date: NaiveDate) -> Patient {
        Patient {
            id: "PAT000001".into(),
            mrn: "MRN100001".into(),
            name: HumanName {
                given: "Sarah".into(),
                family: "Williams".into(),
            },
            gender: Gender::Female,
            birth_date,
            address: "1 High Street\nSpringfield, IL 62701".into(),
            phone: "(217) 555-0100".into(),
        }
    }

    #[test]
    fn age_counts_completed_years() {
        let patient = patient_born(NaiveDate::from_ymd_opt(1990, 6, 15).expect("valid date"));
        let before_birthday = NaiveDate::from_ymd_opt(2026, 6, 14).expect("valid date");
        let on_birthday = NaiveDate::from_ymd_opt(2026, 6, 15).expect("valid date");
        assert_eq!(patient.age_on(before_birthday), 35);
        assert_eq!(patient.age_on(on_birthday), 36);
    }

    #[test]
    fn age_before_birth_is_zero() {
        let patient = patient_born(NaiveDate::from_ymd_opt(2026, 6, 15).expect("valid date"));
        let earlier = NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date");
        assert_eq!(patient.age_on(earlier), 0);
    }

    #[test]
    fn human_name_displays_given_then_family() {
        let patient = patient_born(NaiveDate::from_ymd_opt(1990, 1, 1).expect("valid date"));
        assert_eq!(patient.name.to_string(), "Sarah Williams");
    }

    #[test]
    fn vital_keys_and_units_are_stable() {
        assert_eq!(VitalSign::ALL.len(), 6);
        assert_eq!(VitalSign::BloodPressureDiastolic.key(), "blood_pressure_diastolic");
        assert_eq!(VitalSign::OxygenSaturation.unit(), "%");
        assert_eq!(VitalSign::Temperature.loinc_code(), "8310-5");
    }

    #[test]
    fn enums_serialise_lowercase() {
        let json = serde_json::to_string(&(Severity::High, Gender::Other, VitalSign::HeartRate))
            .expect("serialise");
        assert_eq!(json, r#"["high","other","heart_rate"]"#);
    }
}
