//! Patient factory.
//!
//! Turns an arrival time and a freshly issued patient number into a [`Patient`]. Identity and
//! MRN tokens are derived from the number, so uniqueness follows from the caller's monotonic
//! counter.

use crate::constants::{MAX_PATIENT_AGE, MRN_BASE};
use crate::demographics::{DemographicsSource, FakerDemographics};
use chrono::{DateTime, Duration, Months, NaiveDate, Utc};
use er_types::{Gender, Patient};
use rand::Rng;

/// Builds synthetic patients using a [`DemographicsSource`] for text fields.
#[derive(Clone, Debug, Default)]
pub struct PatientFactory<D = FakerDemographics> {
    demographics: D,
}

impl<D: DemographicsSource> PatientFactory<D> {
    pub fn new(demographics: D) -> Self {
        Self { demographics }
    }

    /// Create the patient arriving at `arrival`.
    ///
    /// Draw order: gender, birth date, name, address, phone.
    pub fn create<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        arrival: DateTime<Utc>,
        patient_number: u64,
    ) -> Patient {
        let gender = Gender::ALL[rng.gen_range(0..Gender::ALL.len())];
        let birth_date = birth_date_for(rng, arrival.date_naive());
        let name = self.demographics.name(rng, gender);
        let address = self.demographics.address(rng);
        let phone = self.demographics.phone(rng);

        Patient {
            id: patient_id(patient_number),
            mrn: mrn(patient_number),
            name,
            gender,
            birth_date,
            address,
            phone,
        }
    }
}

/// Identity token for a patient number, e.g. `PAT000042`.
pub fn patient_id(patient_number: u64) -> String {
    format!("PAT{patient_number:06}")
}

/// Medical record number for a patient number, e.g. `MRN100042`.
pub fn mrn(patient_number: u64) -> String {
    format!("MRN{}", MRN_BASE + patient_number)
}

/// Uniform birth date such that the whole-year age on `on` is within `0..=MAX_PATIENT_AGE`.
fn birth_date_for<R: Rng + ?Sized>(rng: &mut R, on: NaiveDate) -> NaiveDate {
    let oldest_excluded = on
        .checked_sub_months(Months::new((MAX_PATIENT_AGE + 1) * 12))
        .unwrap_or(NaiveDate::MIN);
    let span_days = (on - oldest_excluded).num_days();
    on - Duration::days(rng.gen_range(0..span_days))
}
