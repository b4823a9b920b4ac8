//! HL7 v2.5 segment builders.
//!
//! Each builder returns one segment without a terminator; messages join segments with `\r`.

use chrono::{DateTime, Utc};
use er_types::{Patient, VitalSign};

pub(crate) const SEGMENT_SEPARATOR: &str = "\r";

const SENDING_APPLICATION: &str = "ER_SYS";
const FACILITY: &str = "HOSPITAL";
const VERSION: &str = "2.5";

/// HL7 timestamp (`YYYYMMDDHHMMSS`).
pub(crate) fn hl7_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y%m%d%H%M%S").to_string()
}

/// Escapes the field separator and escape character in free text.
pub(crate) fn escape(text: &str) -> String {
    text.replace('\\', "\\E\\").replace('|', "\\F\\")
}

/// Flattens a multi-line postal address into `^`-separated components.
pub(crate) fn address_components(address: &str) -> String {
    escape(address)
        .split(['\n', ','])
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("^")
}

pub(crate) fn msh(
    receiving_application: &str,
    at: DateTime<Utc>,
    message_type: &str,
    control_id: &str,
) -> String {
    format!(
        "MSH|^~\\&|{SENDING_APPLICATION}|{FACILITY}|{receiving_application}|{FACILITY}|{}||{message_type}|{control_id}|P|{VERSION}",
        hl7_timestamp(at)
    )
}

fn patient_name(patient: &Patient) -> String {
    format!(
        "{}^{}",
        escape(patient.name.family.as_str()),
        escape(patient.name.given.as_str())
    )
}

/// Full PID segment used by admission messages.
pub(crate) fn pid_full(patient: &Patient) -> String {
    format!(
        "PID|1||{}||{}||{}|{}|||{}||{}|||||||",
        escape(&patient.mrn),
        patient_name(patient),
        patient.birth_date.format("%Y%m%d"),
        patient.gender.initial(),
        address_components(&patient.address),
        escape(&patient.phone),
    )
}

/// Identification-only PID segment used by observation results.
pub(crate) fn pid_short(patient: &Patient) -> String {
    format!("PID|1||{}||{}", escape(&patient.mrn), patient_name(patient))
}

/// Emergency-class patient visit.
pub(crate) fn pv1_emergency(patient: &Patient) -> String {
    format!(
        "PV1|1|E|ER^EMERGENCY ROOM|||||{}^DOCTOR|||||||||||V",
        escape(&patient.mrn)
    )
}

pub(crate) fn dg1(code: &str, name: &str) -> String {
    format!("DG1|1|I10|{}|{}|||F", escape(code), escape(name))
}

/// Display text used in OBR/OBX identifiers.
pub(crate) fn vital_display(vital: VitalSign) -> &'static str {
    match vital {
        VitalSign::Temperature => "Body temperature",
        VitalSign::HeartRate => "Heart rate",
        VitalSign::BloodPressureSystolic => "Systolic BP",
        VitalSign::BloodPressureDiastolic => "Diastolic BP",
        VitalSign::RespiratoryRate => "Respiratory rate",
        VitalSign::OxygenSaturation => "O2 Sat",
    }
}

/// Unit as reported in OBX-6. Heart rate is reported per minute.
pub(crate) fn vital_unit(vital: VitalSign) -> &'static str {
    match vital {
        VitalSign::HeartRate => "/min",
        other => other.unit(),
    }
}

pub(crate) fn obr(vital: VitalSign, at: DateTime<Utc>) -> String {
    format!(
        "OBR|1|||{}^{}|||||||{}",
        vital.loinc_code(),
        vital_display(vital),
        hl7_timestamp(at)
    )
}

pub(crate) fn obx(vital: VitalSign, value: f64) -> String {
    format!(
        "OBX|1|NM|{}^{}||{:.1}|{}|||F",
        vital.loinc_code(),
        vital_display(vital),
        value,
        vital_unit(vital)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_newlines_and_commas_become_components() {
        assert_eq!(
            address_components("12 Oak Avenue\nSpringfield, IL 62701"),
            "12 Oak Avenue^Springfield^IL 62701"
        );
    }

    #[test]
    fn escape_handles_field_separator() {
        assert_eq!(escape("A|B"), "A\\F\\B");
        assert_eq!(escape("C\\D"), "C\\E\\D");
    }

    #[test]
    fn obx_formats_one_decimal() {
        assert_eq!(
            obx(VitalSign::HeartRate, 112.0),
            "OBX|1|NM|8867-4^Heart rate||112.0|/min|||F"
        );
    }

    #[test]
    fn timestamp_has_no_separators() {
        let at = "2026-10-19T18:30:05Z"
            .parse::<DateTime<Utc>>()
            .expect("valid datetime");
        assert_eq!(hl7_timestamp(at), "20261019183005");
    }
}
