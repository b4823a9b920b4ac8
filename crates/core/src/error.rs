use chrono::{DateTime, Utc};

#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("invalid simulation window: end {end} must be after start {start}")]
    InvalidWindow {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    #[error("invalid simulation window: {hours} hours from {start} is out of range")]
    WindowOutOfRange { start: DateTime<Utc>, hours: u32 },
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("failed to create output directory: {0}")]
    DirCreation(std::io::Error),
    #[error("failed to write output file: {0}")]
    FileWrite(std::io::Error),

    #[error("FHIR formatting error: {0}")]
    Fhir(#[from] fhir::FhirError),
    #[error("HL7 formatting error: {0}")]
    Hl7(#[from] hl7::Hl7Error),
}

pub type SimResult<T> = std::result::Result<T, SimError>;
