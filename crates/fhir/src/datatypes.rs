//! FHIR general-purpose data types shared by the resource wire models.
//!
//! Only the subset needed by the ER resources is modelled.

use serde::Serialize;

pub(crate) const LOINC_SYSTEM: &str = "http://loinc.org";
pub(crate) const ICD10_CM_SYSTEM: &str = "http://hl7.org/fhir/sid/icd-10-cm";
pub(crate) const SNOMED_SYSTEM: &str = "http://snomed.info/sct";
pub(crate) const UCUM_SYSTEM: &str = "http://unitsofmeasure.org";

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub(crate) struct Coding {
    pub system: String,
    pub code: String,
    pub display: String,
}

impl Coding {
    pub fn new(system: &str, code: &str, display: &str) -> Self {
        Self {
            system: system.to_string(),
            code: code.to_string(),
            display: display.to_string(),
        }
    }
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub(crate) struct CodeableConcept {
    pub coding: Vec<Coding>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl CodeableConcept {
    /// A concept with a single coding and no free text.
    pub fn single(coding: Coding) -> Self {
        Self {
            coding: vec![coding],
            text: None,
        }
    }

    /// A concept with a single coding whose display doubles as the text.
    pub fn with_text(coding: Coding) -> Self {
        let text = Some(coding.display.clone());
        Self {
            coding: vec![coding],
            text,
        }
    }
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub(crate) struct Reference {
    pub reference: String,
}

impl Reference {
    pub fn patient(patient_id: &str) -> Self {
        Self {
            reference: format!("Patient/{patient_id}"),
        }
    }
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub(crate) struct Period {
    pub start: String,
    pub end: String,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub(crate) struct Quantity {
    pub value: f64,
    pub unit: String,
    pub system: String,
}
