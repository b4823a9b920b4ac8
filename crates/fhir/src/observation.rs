//! FHIR Observation resources, one per vital reading.

use crate::datatypes::{CodeableConcept, Coding, Quantity, Reference, LOINC_SYSTEM, UCUM_SYSTEM};
use crate::{FhirError, FhirResult};
use chrono::{DateTime, Utc};
use er_types::{VitalReading, VitalSign};
use serde::Serialize;

/// Observation resource operations.
pub struct Observation;

impl Observation {
    /// Resource id for one reading, e.g. `OBS7-heart-rate`.
    pub fn resource_id(reading: &VitalReading) -> String {
        format!(
            "OBS{}-{}",
            reading.resource_id,
            reading.vital.key().replace('_', "-")
        )
    }

    /// LOINC display text for a vital.
    pub fn display(vital: VitalSign) -> &'static str {
        match vital {
            VitalSign::Temperature => "Body temperature",
            VitalSign::HeartRate => "Heart rate",
            VitalSign::BloodPressureSystolic => "Systolic blood pressure",
            VitalSign::BloodPressureDiastolic => "Diastolic blood pressure",
            VitalSign::RespiratoryRate => "Respiratory rate",
            VitalSign::OxygenSaturation => "Oxygen saturation in Arterial blood",
        }
    }

    /// Render one vital reading as a final Observation taken at `taken_at`.
    ///
    /// # Errors
    ///
    /// Returns [`FhirError::Serialization`] if the wire model cannot be converted to JSON.
    pub fn render(
        patient_id: &str,
        reading: &VitalReading,
        taken_at: DateTime<Utc>,
    ) -> FhirResult<serde_json::Value> {
        let wire = ObservationWire {
            resource_type: "Observation".to_string(),
            id: Self::resource_id(reading),
            status: "final".to_string(),
            code: CodeableConcept::with_text(Coding::new(
                LOINC_SYSTEM,
                reading.vital.loinc_code(),
                Self::display(reading.vital),
            )),
            subject: Reference::patient(patient_id),
            effective_date_time: taken_at.to_rfc3339(),
            value_quantity: Quantity {
                value: reading.value,
                unit: reading.unit().to_string(),
                system: UCUM_SYSTEM.to_string(),
            },
        };
        serde_json::to_value(&wire).map_err(FhirError::Serialization)
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
struct ObservationWire {
    pub resource_type: String,
    pub id: String,
    pub status: String,
    pub code: CodeableConcept,
    pub subject: Reference,
    pub effective_date_time: String,
    pub value_quantity: Quantity,
}

#[cfg(test)]
mod tests {
    use super::*;
    use er_types::test_support::sample_bundle;

    #[test]
    fn observation_carries_loinc_code_and_quantity() {
        let bundle = sample_bundle(150);
        let snapshot = &bundle.snapshots[0];
        let reading = snapshot
            .reading(VitalSign::OxygenSaturation)
            .expect("oxygen saturation reading");

        let value =
            Observation::render(&bundle.patient.id, reading, snapshot.taken_at).expect("render");

        assert_eq!(value["resourceType"], "Observation");
        assert_eq!(value["id"], "OBS8-oxygen-saturation");
        assert_eq!(value["status"], "final");
        assert_eq!(value["code"]["coding"][0]["code"], "2708-6");
        assert_eq!(value["valueQuantity"]["value"], 91.5);
        assert_eq!(value["valueQuantity"]["unit"], "%");
        assert_eq!(value["valueQuantity"]["system"], UCUM_SYSTEM);
        assert_eq!(value["effectiveDateTime"], "2026-10-19T18:30:00+00:00");
    }
}
