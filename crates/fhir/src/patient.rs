//! FHIR Patient resource for a synthetic ER patient.
//!
//! Responsibilities:
//! - Define the wire model for the Patient resource
//! - Translate the generator's [`er_types::Patient`] into that wire model
//!
//! Notes:
//! - The MRN is carried as the single business identifier
//! - Addresses are emitted as free text only

use crate::{FhirError, FhirResult};
use serde::Serialize;

/// Identifier system for hospital medical record numbers.
pub const MRN_SYSTEM: &str = "http://hospital.example.org/patients";

// ============================================================================
// Public Patient operations
// ============================================================================

/// Patient resource operations.
///
/// This is a zero-sized type used for namespacing patient-related operations.
pub struct Patient;

impl Patient {
    /// Render a patient as a FHIR Patient resource.
    ///
    /// # Errors
    ///
    /// Returns [`FhirError::Serialization`] if the wire model cannot be converted to JSON.
    pub fn render(patient: &er_types::Patient) -> FhirResult<serde_json::Value> {
        let wire = domain_to_wire(patient);
        serde_json::to_value(&wire).map_err(FhirError::Serialization)
    }
}

// ============================================================================
// Wire types (internal)
// ============================================================================

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
struct PatientWire {
    pub resource_type: String,
    pub id: String,
    pub identifier: Vec<IdentifierWire>,
    pub name: Vec<HumanNameWire>,
    pub gender: String,
    pub birth_date: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub telecom: Vec<ContactPointWire>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub address: Vec<AddressWire>,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
struct IdentifierWire {
    pub system: String,
    pub value: String,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
struct HumanNameWire {
    pub family: String,
    pub given: Vec<String>,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
struct ContactPointWire {
    pub system: String,
    pub value: String,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
struct AddressWire {
    pub text: String,
}

fn domain_to_wire(patient: &er_types::Patient) -> PatientWire {
    let telecom = if patient.phone.is_empty() {
        vec![]
    } else {
        vec![ContactPointWire {
            system: "phone".to_string(),
            value: patient.phone.clone(),
        }]
    };

    let address = if patient.address.is_empty() {
        vec![]
    } else {
        vec![AddressWire {
            text: patient.address.clone(),
        }]
    };

    PatientWire {
        resource_type: "Patient".to_string(),
        id: patient.id.clone(),
        identifier: vec![IdentifierWire {
            system: MRN_SYSTEM.to_string(),
            value: patient.mrn.clone(),
        }],
        name: vec![HumanNameWire {
            family: patient.name.family.to_string(),
            given: vec![patient.name.given.to_string()],
        }],
        gender: patient.gender.as_str().to_string(),
        birth_date: patient.birth_date.format("%Y-%m-%d").to_string(),
        telecom,
        address,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use er_types::test_support::sample_bundle;

    #[test]
    fn renders_identity_and_demographics() {
        let bundle = sample_bundle(90);
        let value = Patient::render(&bundle.patient).expect("render patient");

        assert_eq!(value["resourceType"], "Patient");
        assert_eq!(value["id"], "PAT000001");
        assert_eq!(value["identifier"][0]["system"], MRN_SYSTEM);
        assert_eq!(value["identifier"][0]["value"], "MRN100001");
        assert_eq!(value["name"][0]["family"], "Williams");
        assert_eq!(value["name"][0]["given"][0], "Sarah");
        assert_eq!(value["gender"], "female");
        assert_eq!(value["birthDate"], "1992-03-20");
        assert_eq!(value["telecom"][0]["value"], "(217) 555-0100");
    }

    #[test]
    fn omits_empty_contact_details() {
        let mut bundle = sample_bundle(90);
        bundle.patient.phone.clear();
        bundle.patient.address.clear();

        let value = Patient::render(&bundle.patient).expect("render patient");
        assert!(value.get("telecom").is_none());
        assert!(value.get("address").is_none());
    }
}
