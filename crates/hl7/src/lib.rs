//! HL7 v2 messaging layer for generated ER visits.
//!
//! Each [`er_types::EventBundle`] becomes:
//! - one `ADT^A01` admission (MSH, PID, PV1, DG1)
//! - one `ORU^R01` observation result per vital per snapshot (MSH, PID, OBR, OBX)
//!
//! Messages are rendered as timestamped plain-text blocks ([`Hl7::render_text`]) and mirrored
//! as JSON ([`Hl7::render_json`]).
//!
//! Notes:
//! - Message control ids are random UUIDs and are not part of the reproducible model
//! - Segments are separated by `\r` as the standard requires

mod segments;

use chrono::{DateTime, Utc};
use er_types::{EventBundle, VitalReading};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use segments::SEGMENT_SEPARATOR;

/// Errors returned by the `hl7` formatting crate.
#[derive(Debug, thiserror::Error)]
pub enum Hl7Error {
    #[error("failed to serialise messages: {0}")]
    Serialization(#[source] serde_json::Error),
}

pub type Hl7Result<T> = Result<T, Hl7Error>;

/// Supported trigger events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageType {
    /// Admit/visit notification.
    #[serde(rename = "ADT^A01")]
    AdtA01,
    /// Unsolicited observation result.
    #[serde(rename = "ORU^R01")]
    OruR01,
}

impl MessageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AdtA01 => "ADT^A01",
            Self::OruR01 => "ORU^R01",
        }
    }

    /// MSH-9 value including the message structure.
    fn msh_type(&self) -> &'static str {
        match self {
            Self::AdtA01 => "ADT^A01^ADT_A01",
            Self::OruR01 => "ORU^R01^ORU_R01",
        }
    }

    fn receiving_application(&self) -> &'static str {
        match self {
            Self::AdtA01 => "ADT_SYS",
            Self::OruR01 => "LAB_SYS",
        }
    }
}

/// One rendered message plus the clinical time it refers to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hl7Message {
    #[serde(rename = "type")]
    pub message_type: MessageType,

    /// Segments joined by `\r`.
    pub message: String,

    /// RFC 3339 time of the event.
    pub timestamp: String,
}

impl Hl7Message {
    /// Iterates the segments of this message.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.message.split(SEGMENT_SEPARATOR)
    }
}

/// Facade over the message builders.
pub struct Hl7;

impl Hl7 {
    /// Build the admission message for a visit.
    pub fn admission(bundle: &EventBundle) -> Hl7Message {
        let message_type = MessageType::AdtA01;
        let patient = &bundle.patient;
        let segments = [
            segments::msh(
                message_type.receiving_application(),
                bundle.arrival_time,
                message_type.msh_type(),
                &new_control_id(),
            ),
            segments::pid_full(patient),
            segments::pv1_emergency(patient),
            segments::dg1(&bundle.condition.code, &bundle.condition.name),
        ];

        Hl7Message {
            message_type,
            message: segments.join(SEGMENT_SEPARATOR),
            timestamp: bundle.arrival_time.to_rfc3339(),
        }
    }

    /// Build the observation-result message for one vital reading.
    pub fn observation_result(
        bundle: &EventBundle,
        reading: &VitalReading,
        taken_at: DateTime<Utc>,
    ) -> Hl7Message {
        let message_type = MessageType::OruR01;
        let segments = [
            segments::msh(
                message_type.receiving_application(),
                taken_at,
                message_type.msh_type(),
                &new_control_id(),
            ),
            segments::pid_short(&bundle.patient),
            segments::obr(reading.vital, taken_at),
            segments::obx(reading.vital, reading.value),
        ];

        Hl7Message {
            message_type,
            message: segments.join(SEGMENT_SEPARATOR),
            timestamp: taken_at.to_rfc3339(),
        }
    }

    /// All messages for one visit: the admission, then results by snapshot and vital.
    pub fn messages_for(bundle: &EventBundle) -> Vec<Hl7Message> {
        let mut messages = Vec::with_capacity(1 + bundle.reading_count());
        messages.push(Self::admission(bundle));
        for snapshot in &bundle.snapshots {
            for reading in &snapshot.readings {
                messages.push(Self::observation_result(bundle, reading, snapshot.taken_at));
            }
        }
        messages
    }

    /// Messages for every bundle, preserving bundle order.
    pub fn messages_for_all(bundles: &[EventBundle]) -> Vec<Hl7Message> {
        bundles.iter().flat_map(Self::messages_for).collect()
    }

    /// Render messages as commented plain-text blocks separated by blank lines.
    pub fn render_text(messages: &[Hl7Message]) -> String {
        let mut out = String::new();
        for msg in messages {
            out.push_str(&format!("# Timestamp: {}\n", msg.timestamp));
            out.push_str(&format!("# Message Type: {}\n", msg.message_type.as_str()));
            out.push_str(&msg.message);
            out.push_str("\n\n");
        }
        out
    }

    /// Render messages as a pretty-printed JSON array of `{type, message, timestamp}`.
    ///
    /// # Errors
    ///
    /// Returns [`Hl7Error::Serialization`] if serialisation fails.
    pub fn render_json(messages: &[Hl7Message]) -> Hl7Result<String> {
        serde_json::to_string_pretty(messages).map_err(Hl7Error::Serialization)
    }
}

fn new_control_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use er_types::test_support::sample_bundle;

    #[test]
    fn admission_has_four_segments() {
        let bundle = sample_bundle(90);
        let adt = Hl7::admission(&bundle);
        let segments: Vec<&str> = adt.segments().collect();

        assert_eq!(adt.message_type, MessageType::AdtA01);
        assert_eq!(segments.len(), 4);
        assert!(segments[0].starts_with("MSH|^~\\&|ER_SYS|HOSPITAL|ADT_SYS|HOSPITAL|20261019183000||ADT^A01^ADT_A01|"));
        assert!(segments[0].ends_with("|P|2.5"));
        assert!(segments[1].starts_with("PID|1||MRN100001||Williams^Sarah||19920320|F|||12 Oak Avenue^Springfield^IL 62701||(217) 555-0100"));
        assert!(segments[2].starts_with("PV1|1|E|ER^EMERGENCY ROOM|"));
        assert_eq!(segments[3], "DG1|1|I10|R06.02|Shortness of Breath|||F");
        assert_eq!(adt.timestamp, "2026-10-19T18:30:00+00:00");
    }

    #[test]
    fn control_ids_are_unique_uuids() {
        let bundle = sample_bundle(90);
        let control_id = |m: &Hl7Message| {
            m.segments()
                .next()
                .and_then(|msh| msh.split('|').nth(9))
                .map(str::to_string)
                .expect("MSH-10 present")
        };

        let first = control_id(&Hl7::admission(&bundle));
        let second = control_id(&Hl7::admission(&bundle));
        assert!(Uuid::parse_str(&first).is_ok());
        assert_ne!(first, second);
    }

    #[test]
    fn observation_result_carries_loinc_and_value() {
        let bundle = sample_bundle(90);
        let snapshot = &bundle.snapshots[0];
        let oru = Hl7::observation_result(&bundle, &snapshot.readings[0], snapshot.taken_at);
        let segments: Vec<&str> = oru.segments().collect();

        assert_eq!(oru.message_type, MessageType::OruR01);
        assert!(segments[0].contains("|LAB_SYS|HOSPITAL|20261019183000||ORU^R01^ORU_R01|"));
        assert_eq!(segments[1], "PID|1||MRN100001||Williams^Sarah");
        assert_eq!(
            segments[2],
            "OBR|1|||8310-5^Body temperature|||||||20261019183000"
        );
        assert_eq!(segments[3], "OBX|1|NM|8310-5^Body temperature||98.6|F|||F");
    }

    #[test]
    fn message_counts_follow_snapshots() {
        assert_eq!(Hl7::messages_for(&sample_bundle(90)).len(), 7);
        assert_eq!(Hl7::messages_for(&sample_bundle(121)).len(), 13);
    }

    #[test]
    fn text_rendering_uses_comment_headers() {
        let messages = Hl7::messages_for(&sample_bundle(90));
        let text = Hl7::render_text(&messages);

        assert!(text.starts_with("# Timestamp: 2026-10-19T18:30:00+00:00\n# Message Type: ADT^A01\nMSH|"));
        assert_eq!(text.matches("# Message Type: ORU^R01").count(), 6);
        assert!(text.ends_with("\n\n"));
    }

    #[test]
    fn json_rendering_mirrors_messages() {
        let messages = Hl7::messages_for(&sample_bundle(90));
        let json = Hl7::render_json(&messages).expect("render json");

        let parsed: Vec<Hl7Message> = serde_json::from_str(&json).expect("parse json");
        assert_eq!(parsed, messages);
        assert!(json.contains("\"type\": \"ADT^A01\""));
    }
}
