//! FHIR Condition resource carrying the presenting ICD-10 diagnosis.

use crate::datatypes::{CodeableConcept, Coding, Reference, ICD10_CM_SYSTEM, SNOMED_SYSTEM};
use crate::{FhirError, FhirResult};
use er_types::EventBundle;
use serde::Serialize;

const CLINICAL_STATUS_SYSTEM: &str = "http://terminology.hl7.org/CodeSystem/condition-clinical";
const VERIFICATION_STATUS_SYSTEM: &str =
    "http://terminology.hl7.org/CodeSystem/condition-ver-status";

/// SNOMED CT concept used to categorise every ER condition.
const EMERGENCY_CATEGORY_CODE: &str = "439740001";

/// Condition resource operations.
pub struct Condition;

impl Condition {
    /// Resource id for a condition resource number.
    pub fn resource_id(number: u64) -> String {
        format!("COND{number}")
    }

    /// Render the condition in `bundle` as an active, confirmed emergency Condition.
    ///
    /// # Errors
    ///
    /// Returns [`FhirError::Serialization`] if the wire model cannot be converted to JSON.
    pub fn render(bundle: &EventBundle) -> FhirResult<serde_json::Value> {
        let condition = &bundle.condition;
        let wire = ConditionWire {
            resource_type: "Condition".to_string(),
            id: Self::resource_id(bundle.condition_id),
            clinical_status: CodeableConcept::single(Coding::new(
                CLINICAL_STATUS_SYSTEM,
                "active",
                "Active",
            )),
            verification_status: CodeableConcept::single(Coding::new(
                VERIFICATION_STATUS_SYSTEM,
                "confirmed",
                "Confirmed",
            )),
            category: vec![CodeableConcept::single(Coding::new(
                SNOMED_SYSTEM,
                EMERGENCY_CATEGORY_CODE,
                "Emergency",
            ))],
            code: CodeableConcept::with_text(Coding::new(
                ICD10_CM_SYSTEM,
                &condition.code,
                &condition.name,
            )),
            subject: Reference::patient(&bundle.patient.id),
            onset_date_time: bundle.arrival_time.to_rfc3339(),
        };
        serde_json::to_value(&wire).map_err(FhirError::Serialization)
    }
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
struct ConditionWire {
    pub resource_type: String,
    pub id: String,
    pub clinical_status: CodeableConcept,
    pub verification_status: CodeableConcept,
    pub category: Vec<CodeableConcept>,
    pub code: CodeableConcept,
    pub subject: Reference,
    pub onset_date_time: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use er_types::test_support::sample_bundle;

    #[test]
    fn condition_references_diagnostic_code() {
        let bundle = sample_bundle(150);
        let value = Condition::render(&bundle).expect("render condition");

        assert_eq!(value["resourceType"], "Condition");
        assert_eq!(value["id"], "COND2");
        assert_eq!(value["code"]["coding"][0]["system"], ICD10_CM_SYSTEM);
        assert_eq!(value["code"]["coding"][0]["code"], "R06.02");
        assert_eq!(value["code"]["text"], "Shortness of Breath");
        assert_eq!(value["clinicalStatus"]["coding"][0]["code"], "active");
        assert_eq!(value["category"][0]["coding"][0]["code"], EMERGENCY_CATEGORY_CODE);
        assert_eq!(value["onsetDateTime"], "2026-10-19T18:30:00+00:00");
    }
}
