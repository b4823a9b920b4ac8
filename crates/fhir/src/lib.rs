//! FHIR formatting layer for generated ER visits.
//!
//! This crate provides **wire models** and **translation helpers** that turn an
//! [`er_types::EventBundle`] into FHIR-aligned resources:
//! - one Patient
//! - one emergency-class Encounter spanning arrival to discharge
//! - one Condition carrying the ICD-10 code
//! - one Observation per vital per snapshot
//!
//! Resources are wrapped in a [`ResourceEnvelope`] (`resourceType`, `data`, `timestamp`) and
//! serialised as a JSON array. The envelope file can be parsed back with [`Fhir::parse_json`].
//!
//! This crate is a pure formatting layer: it never samples or allocates identifiers.

mod datatypes;

pub mod condition;
pub mod encounter;
pub mod observation;
pub mod patient;

// Re-export facades
pub use condition::Condition;
pub use encounter::Encounter;
pub use observation::Observation;
pub use patient::Patient;

use er_types::EventBundle;
use serde::{Deserialize, Serialize};

/// Errors returned by the `fhir` formatting crate.
#[derive(Debug, thiserror::Error)]
pub enum FhirError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("failed to serialise resource: {0}")]
    Serialization(#[source] serde_json::Error),

    #[error("translation error: {0}")]
    Translation(String),
}

/// Type alias for Results that can fail with a [`FhirError`].
pub type FhirResult<T> = Result<T, FhirError>;

/// Kind of resource carried by an envelope.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceType {
    Patient,
    Encounter,
    Condition,
    Observation,
}

impl ResourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Patient => "Patient",
            Self::Encounter => "Encounter",
            Self::Condition => "Condition",
            Self::Observation => "Observation",
        }
    }
}

/// One entry of the output file: a resource plus the clinical time it refers to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResourceEnvelope {
    #[serde(rename = "resourceType")]
    pub resource_type: ResourceType,

    /// The FHIR resource JSON.
    pub data: serde_json::Value,

    /// RFC 3339 time: arrival for Patient/Encounter/Condition, capture time for Observation.
    pub timestamp: String,
}

/// Facade over the resource translators.
pub struct Fhir;

impl Fhir {
    /// Translate one bundle into its resource envelopes.
    ///
    /// Order: Patient, Encounter, Condition, then Observations by snapshot and vital.
    ///
    /// # Errors
    ///
    /// Returns [`FhirError`] if any resource fails to serialise.
    pub fn resources_for(bundle: &EventBundle) -> FhirResult<Vec<ResourceEnvelope>> {
        let arrival = bundle.arrival_time.to_rfc3339();
        let mut envelopes = Vec::with_capacity(3 + bundle.reading_count());

        envelopes.push(ResourceEnvelope {
            resource_type: ResourceType::Patient,
            data: Patient::render(&bundle.patient)?,
            timestamp: arrival.clone(),
        });
        envelopes.push(ResourceEnvelope {
            resource_type: ResourceType::Encounter,
            data: Encounter::render(bundle)?,
            timestamp: arrival.clone(),
        });
        envelopes.push(ResourceEnvelope {
            resource_type: ResourceType::Condition,
            data: Condition::render(bundle)?,
            timestamp: arrival,
        });

        for snapshot in &bundle.snapshots {
            let taken_at = snapshot.taken_at.to_rfc3339();
            for reading in &snapshot.readings {
                envelopes.push(ResourceEnvelope {
                    resource_type: ResourceType::Observation,
                    data: Observation::render(&bundle.patient.id, reading, snapshot.taken_at)?,
                    timestamp: taken_at.clone(),
                });
            }
        }

        Ok(envelopes)
    }

    /// Translate every bundle, preserving bundle order.
    pub fn resources_for_all(bundles: &[EventBundle]) -> FhirResult<Vec<ResourceEnvelope>> {
        let mut all = Vec::new();
        for bundle in bundles {
            all.extend(Self::resources_for(bundle)?);
        }
        Ok(all)
    }

    /// Render envelopes as a pretty-printed JSON array.
    ///
    /// # Errors
    ///
    /// Returns [`FhirError::Serialization`] if serialisation fails.
    pub fn render_json(envelopes: &[ResourceEnvelope]) -> FhirResult<String> {
        serde_json::to_string_pretty(envelopes).map_err(FhirError::Serialization)
    }

    /// Parse an envelope array previously produced by [`Fhir::render_json`].
    ///
    /// This uses `serde_path_to_error` to surface a best-effort path (e.g. `[3].resourceType`)
    /// to the failing field.
    ///
    /// # Errors
    ///
    /// Returns [`FhirError::Translation`] if the JSON does not match the envelope schema, and
    /// [`FhirError::InvalidInput`] if a resource's own `resourceType` disagrees with its
    /// envelope.
    pub fn parse_json(json_text: &str) -> FhirResult<Vec<ResourceEnvelope>> {
        let mut deserializer = serde_json::Deserializer::from_str(json_text);

        let envelopes: Vec<ResourceEnvelope> =
            match serde_path_to_error::deserialize(&mut deserializer) {
                Ok(parsed) => parsed,
                Err(err) => {
                    let path = err.path().to_string();
                    let source = err.into_inner();
                    let path = if path.is_empty() || path == "." {
                        "<root>".to_string()
                    } else {
                        path
                    };
                    return Err(FhirError::Translation(format!(
                        "Resource envelope schema mismatch at {path}: {source}"
                    )));
                }
            };

        for (idx, envelope) in envelopes.iter().enumerate() {
            let inner = envelope.data.get("resourceType").and_then(|v| v.as_str());
            if inner != Some(envelope.resource_type.as_str()) {
                return Err(FhirError::InvalidInput(format!(
                    "Envelope [{idx}] declares '{}' but resource is {:?}",
                    envelope.resource_type.as_str(),
                    inner
                )));
            }
        }

        Ok(envelopes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use er_types::test_support::sample_bundle;

    #[test]
    fn short_visit_yields_three_plus_six_resources() {
        let bundle = sample_bundle(90);
        let envelopes = Fhir::resources_for(&bundle).expect("translate bundle");

        assert_eq!(envelopes.len(), 9);
        assert_eq!(envelopes[0].resource_type, ResourceType::Patient);
        assert_eq!(envelopes[1].resource_type, ResourceType::Encounter);
        assert_eq!(envelopes[2].resource_type, ResourceType::Condition);
        assert!(envelopes[3..]
            .iter()
            .all(|e| e.resource_type == ResourceType::Observation));
    }

    #[test]
    fn long_visit_adds_mid_stay_observations() {
        let bundle = sample_bundle(240);
        let envelopes = Fhir::resources_for(&bundle).expect("translate bundle");

        assert_eq!(envelopes.len(), 15);
        assert_eq!(envelopes[3].timestamp, "2026-10-19T18:30:00+00:00");
        assert_eq!(envelopes[14].timestamp, "2026-10-19T20:30:00+00:00");
        assert_eq!(envelopes[14].data["id"], "OBS14-oxygen-saturation");
    }

    #[test]
    fn parses_rendered_output() {
        let bundle = sample_bundle(150);
        let envelopes = Fhir::resources_for(&bundle).expect("translate bundle");
        let json = Fhir::render_json(&envelopes).expect("render json");

        assert!(json.contains("\"resourceType\": \"Encounter\""));
        let parsed = Fhir::parse_json(&json).expect("parse json");
        assert_eq!(parsed, envelopes);
    }

    #[test]
    fn parse_rejects_unknown_envelope_keys() {
        let input = r#"[{"resourceType":"Patient","data":{"resourceType":"Patient"},"timestamp":"2026-10-19T18:30:00+00:00","extra":1}]"#;

        let err = Fhir::parse_json(input).expect_err("should reject unknown key");
        match err {
            FhirError::Translation(msg) => assert!(msg.contains("extra")),
            other => panic!("expected Translation error, got {other:?}"),
        }
    }

    #[test]
    fn parse_rejects_mismatched_resource_type() {
        let input = r#"[{"resourceType":"Patient","data":{"resourceType":"Observation"},"timestamp":"2026-10-19T18:30:00+00:00"}]"#;

        let err = Fhir::parse_json(input).expect_err("should reject mismatch");
        assert!(matches!(err, FhirError::InvalidInput(_)));
    }
}
