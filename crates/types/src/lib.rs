//! # ER Types
//!
//! Shared value types for the emergency-room event generator.
//!
//! This crate holds the event model handed from the generator to the formatting layers:
//! - the clinical event model ([`EventBundle`] and its parts)
//! - monotonic identity counters ([`SequenceCounter`])
//!
//! It has no knowledge of random sampling or wire formats. The `test-support` feature exposes
//! [`test_support`] fixtures for downstream crates' tests.

mod model;
mod sequence;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use model::{
    Condition, EventBundle, Gender, HumanName, ObservationSnapshot, Patient, Severity,
    VitalReading, VitalSign,
};
pub use sequence::SequenceCounter;
