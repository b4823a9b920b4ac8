//! Output writing.
//!
//! A run produces three files in the configured directory:
//! - `fhir_resources.json`: pretty-printed array of resource envelopes
//! - `hl7_messages.txt`: human-readable message blocks
//! - `hl7_messages.json`: the same messages as a JSON array
//!
//! Existing files are overwritten.

use crate::assembler::EventAssembler;
use crate::config::SimulationConfig;
use crate::constants::{FHIR_RESOURCES_FILENAME, HL7_JSON_FILENAME, HL7_TEXT_FILENAME};
use crate::summary::GenerationSummary;
use crate::{SimError, SimResult};
use fhir::{Fhir, ResourceEnvelope};
use hl7::{Hl7, Hl7Message};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Paths of the files written by [`write_outputs`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WrittenFiles {
    pub fhir_resources: PathBuf,
    pub hl7_text: PathBuf,
    pub hl7_json: PathBuf,
}

/// Result of a full [`run`].
#[derive(Clone, Debug, Serialize)]
pub struct RunSummary {
    pub generation: GenerationSummary,
    pub resources: usize,
    pub messages: usize,
    pub files: WrittenFiles,
}

fn write_file(path: &Path, contents: &str) -> SimResult<()> {
    fs::write(path, contents).map_err(SimError::FileWrite)?;
    tracing::debug!("wrote {}", path.display());
    Ok(())
}

/// Write resource envelopes and messages into `dir`, creating it if needed.
///
/// # Errors
///
/// Returns [`SimError::DirCreation`] if `dir` cannot be created,
/// [`SimError::FileWrite`] if a file cannot be written, and a formatting error if the JSON
/// cannot be produced.
pub fn write_outputs(
    dir: &Path,
    resources: &[ResourceEnvelope],
    messages: &[Hl7Message],
) -> SimResult<WrittenFiles> {
    fs::create_dir_all(dir).map_err(SimError::DirCreation)?;

    let files = WrittenFiles {
        fhir_resources: dir.join(FHIR_RESOURCES_FILENAME),
        hl7_text: dir.join(HL7_TEXT_FILENAME),
        hl7_json: dir.join(HL7_JSON_FILENAME),
    };

    write_file(&files.fhir_resources, &Fhir::render_json(resources)?)?;
    write_file(&files.hl7_text, &Hl7::render_text(messages))?;
    write_file(&files.hl7_json, &Hl7::render_json(messages)?)?;

    Ok(files)
}

/// Generate, format and write one full run described by `config`.
///
/// # Errors
///
/// Propagates generation, formatting and I/O errors.
pub fn run(config: &SimulationConfig) -> SimResult<RunSummary> {
    let rng = ChaCha8Rng::seed_from_u64(config.seed());
    let bundles = EventAssembler::new(rng).generate(config.window());

    let resources = Fhir::resources_for_all(&bundles)?;
    let messages = Hl7::messages_for_all(&bundles);
    let files = write_outputs(config.output_dir(), &resources, &messages)?;

    tracing::info!(
        "generated {} FHIR resources and {} HL7 messages in {}",
        resources.len(),
        messages.len(),
        config.output_dir().display()
    );

    Ok(RunSummary {
        generation: GenerationSummary::from_bundles(&bundles),
        resources: resources.len(),
        messages: messages.len(),
        files,
    })
}
