// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Peter Carlton

//! One submission, from raw input to alignment result.
//!
//! Stages run in a fixed order and the first error ends the run: option check, classification,
//! parsing or fetching, validation, alignment. Unsafe options are therefore rejected before
//! anything is fetched or run.

use std::path::Path;

use log::info;

use crate::aligner::Aligner;
use crate::classify::{classify, InputMode};
use crate::config::LimitsConfig;
use crate::errors::AlignError;
use crate::fetch::{fetch_all, RemoteSource, SequenceFetcher};
use crate::options::{check_guide_tree_iterations, sanitize_extra_flags};
use crate::request::{AlignmentRequest, OutputFormat, SequenceType};
use crate::result::{AlignmentResult, ResultAggregator};
use crate::seq::fasta::parse_fasta;
use crate::seq::file::SeqFile;
use crate::validate::validate;

pub const UPLOAD_EXTENSIONS: [&str; 5] = ["fasta", "fa", "fas", "txt", "seq"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmittedInput {
    /// Pasted FastA or a list of identifiers
    Text(String),
    /// File contents; always read as FastA
    Upload {
        filename: Option<String>,
        content: String,
    },
}

impl SubmittedInput {
    /// Upload from raw file bytes. Invalid UTF-8 becomes U+FFFD, which the validator then
    /// reports as an invalid residue.
    pub fn upload_from_bytes(filename: Option<String>, bytes: &[u8]) -> Self {
        SubmittedInput::Upload {
            filename,
            content: String::from_utf8_lossy(bytes).into_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub input: SubmittedInput,
    pub sequence_type: SequenceType,
    pub output_format: OutputFormat,
    pub guide_tree_iterations: u32,
    /// Free-form aligner flags, unchecked
    pub extra_flags: String,
}

/// Rejects uploads whose file name does not carry a FastA-like extension. Nameless uploads pass.
pub fn check_upload_name(filename: Option<&str>) -> Result<(), AlignError> {
    let Some(name) = filename else {
        return Ok(());
    };
    let extension = Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .unwrap_or_default();
    if UPLOAD_EXTENSIONS.contains(&extension.as_str()) {
        Ok(())
    } else {
        Err(AlignError::UnsupportedUpload { extension })
    }
}

fn fetch_records(
    fetcher: &dyn SequenceFetcher,
    identifiers: &[String],
    source: RemoteSource,
    aggregator: &mut ResultAggregator,
) -> Result<SeqFile, AlignError> {
    info!("Fetching {} {} entries", identifiers.len(), source);
    let batch = fetch_all(fetcher, identifiers, source)?;
    aggregator.add_fetch_warnings(batch.warnings());
    Ok(batch.records)
}

pub fn submit(
    submission: &Submission,
    fetcher: &dyn SequenceFetcher,
    aligner: &dyn Aligner,
    limits: &LimitsConfig,
) -> Result<AlignmentResult, AlignError> {
    let extra_flags = sanitize_extra_flags(&submission.extra_flags)?;

    let (text, uploaded) = match &submission.input {
        SubmittedInput::Text(text) => (text.as_str(), false),
        SubmittedInput::Upload { filename, content } => {
            check_upload_name(filename.as_deref())?;
            if content.trim().is_empty() {
                return Err(AlignError::EmptyInput);
            }
            (content.as_str(), true)
        }
    };
    let mode = classify(text, uploaded)?;
    info!("Input classified as {}", mode.label());

    let mut aggregator = ResultAggregator::new();
    let records = match &mode {
        InputMode::FastaText | InputMode::UploadedFasta => parse_fasta(text)?,
        InputMode::UniProtIds(ids) => {
            fetch_records(fetcher, ids, RemoteSource::UniProt, &mut aggregator)?
        }
        InputMode::PdbIds(ids) => fetch_records(fetcher, ids, RemoteSource::Pdb, &mut aggregator)?,
    };

    let validated = validate(records, submission.sequence_type, &mode)?;
    aggregator.add_validation_warnings(validated.warnings);
    aggregator.add_validation_warnings(check_guide_tree_iterations(
        submission.guide_tree_iterations,
        limits.recommended_max_iterations,
    ));

    let request = AlignmentRequest::new(
        validated.records,
        validated.sequence_type,
        submission.output_format,
        submission.guide_tree_iterations,
        extra_flags,
    )?;
    info!(
        "Aligning {} {} sequences to {}",
        request.records().len(),
        request.sequence_type().label(),
        request.output_format().label()
    );
    let outcome = aligner.run(&request);
    aggregator.finish(&request, &mode, outcome)
}
