//! Constants used throughout the generator core.
//!
//! This module collects defaults and output filenames so the binaries and the core agree on
//! them.

/// Default length of the simulated ER window in hours.
pub const DEFAULT_DURATION_HOURS: u32 = 48;

/// Default random seed.
pub const DEFAULT_SEED: u64 = 42;

/// Default directory for generated files.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Filename for the structured-resource envelope array.
pub const FHIR_RESOURCES_FILENAME: &str = "fhir_resources.json";

/// Filename for the plain-text message blocks.
pub const HL7_TEXT_FILENAME: &str = "hl7_messages.txt";

/// Filename for the JSON mirror of the messages.
pub const HL7_JSON_FILENAME: &str = "hl7_messages.json";

/// Visits longer than this many minutes get a mid-stay observation snapshot.
pub const MID_STAY_SNAPSHOT_THRESHOLD_MINUTES: u32 = 120;

/// Patients younger than this are pediatric.
pub const PEDIATRIC_AGE_LIMIT: u32 = 18;

/// Patients older than this are geriatric.
pub const GERIATRIC_AGE_THRESHOLD: u32 = 65;

/// Oldest age a generated patient can have at arrival.
pub const MAX_PATIENT_AGE: u32 = 100;

/// Offset added to the patient number to form the MRN.
pub const MRN_BASE: u64 = 100_000;

/// How often progress is logged while assembling bundles.
pub const PROGRESS_LOG_INTERVAL: usize = 10;
