//! FHIR Encounter resource spanning one ER visit from arrival to discharge.

use crate::datatypes::{CodeableConcept, Coding, Period, Reference};
use crate::{FhirError, FhirResult};
use er_types::EventBundle;
use serde::Serialize;

const ACT_CODE_SYSTEM: &str = "http://terminology.hl7.org/CodeSystem/v3-ActCode";

/// Encounter resource operations.
pub struct Encounter;

impl Encounter {
    /// Resource id for an encounter resource number.
    pub fn resource_id(number: u64) -> String {
        format!("ENC{number}")
    }

    /// Render the visit in `bundle` as a completed emergency-class Encounter.
    ///
    /// # Errors
    ///
    /// Returns [`FhirError::Serialization`] if the wire model cannot be converted to JSON.
    pub fn render(bundle: &EventBundle) -> FhirResult<serde_json::Value> {
        let wire = EncounterWire {
            resource_type: "Encounter".to_string(),
            id: Self::resource_id(bundle.encounter_id),
            status: "completed".to_string(),
            class: vec![CodeableConcept::single(Coding::new(
                ACT_CODE_SYSTEM,
                "EMER",
                "emergency",
            ))],
            actual_period: Period {
                start: bundle.arrival_time.to_rfc3339(),
                end: bundle.discharge_time().to_rfc3339(),
            },
            subject: Reference::patient(&bundle.patient.id),
        };
        serde_json::to_value(&wire).map_err(FhirError::Serialization)
    }
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
struct EncounterWire {
    pub resource_type: String,
    pub id: String,
    pub status: String,
    pub class: Vec<CodeableConcept>,
    pub actual_period: Period,
    pub subject: Reference,
}
