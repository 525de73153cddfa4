// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Peter Carlton

use std::{io, time::Duration};

use itertools::Itertools;
use serde::Serialize;
use thiserror::Error;

use crate::fetch::FetchFailure;
use crate::request::SequenceType;

/// Coarse classification of an [`AlignError`], stable enough for callers to pick remediation
/// text from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    EmptyInput,
    UnrecognizedFormat,
    MalformedFasta,
    MalformedOutput,
    UnsupportedUpload,
    InsufficientSequences,
    EmptyRecord,
    InvalidResidueCharacters,
    RemoteFetchFailure,
    UnsafeOption,
    AlignerUnavailable,
    AlignerRuntimeError,
    AlignerTimeout,
    Config,
    Io,
}

/// Which part of a FASTA record is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordPart {
    Header,
    Residues,
}

/// One distinct offending character, with the header of the first sequence it occurs in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidResidue {
    pub residue: char,
    pub first_header: String,
}

#[derive(Debug, Error)]
pub enum AlignError {
    #[error("Input is empty. Please provide sequences or identifiers.")]
    EmptyInput,

    #[error(
        "Unrecognized input format: could not identify '{token}' as FASTA, a UniProt accession \
         or a PDB entry code (identifiers must all be of one kind)."
    )]
    UnrecognizedFormat { token: String },

    #[error("Malformed FASTA at line {line}: {message}")]
    MalformedFasta { line: usize, message: String },

    #[error("Could not read {format} output: {message}")]
    MalformedOutput { format: String, message: String },

    #[error(
        "File type '.{extension}' not allowed. Use FASTA format (.fasta, .fa, .fas, .txt, .seq)."
    )]
    UnsupportedUpload { extension: String },

    #[error("At least 2 sequences are required for alignment. Found: {found}.")]
    InsufficientSequences { found: usize },

    #[error("{}", describe_empty_record(.position, .header, .missing))]
    EmptyRecord {
        position: usize,
        header: Option<String>,
        missing: RecordPart,
    },

    #[error(
        "Invalid {} characters: {}. Check that the correct sequence type is selected.",
        .sequence_type.label(),
        describe_residues(.residues)
    )]
    InvalidResidueCharacters {
        sequence_type: SequenceType,
        residues: Vec<InvalidResidue>,
    },

    #[error(
        "Failed to fetch enough sequences ({fetched} record(s) fetched, at least 2 needed):\n{}",
        .failures.iter().join("\n")
    )]
    RemoteFetchFailure {
        fetched: usize,
        failures: Vec<FetchFailure>,
    },

    #[error("Extra options contain unsafe content: '{}'.", .offending.escape_default())]
    UnsafeOption { offending: String },

    #[error("Clustal Omega executable not found at '{binary}'. {guidance}")]
    AlignerUnavailable { binary: String, guidance: String },

    #[error("Clustal Omega error (code {}):\n{diagnostics}", describe_exit_code(.code))]
    AlignerRuntimeError {
        code: Option<i32>,
        diagnostics: String,
    },

    #[error(
        "Clustal Omega timed out after {} seconds. Your input may be too large.",
        .limit.as_secs_f64()
    )]
    AlignerTimeout { limit: Duration },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl From<serde_json::Error> for AlignError {
    fn from(e: serde_json::Error) -> Self {
        AlignError::Config(e.to_string())
    }
}

impl AlignError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AlignError::EmptyInput => ErrorKind::EmptyInput,
            AlignError::UnrecognizedFormat { .. } => ErrorKind::UnrecognizedFormat,
            AlignError::MalformedFasta { .. } => ErrorKind::MalformedFasta,
            AlignError::MalformedOutput { .. } => ErrorKind::MalformedOutput,
            AlignError::UnsupportedUpload { .. } => ErrorKind::UnsupportedUpload,
            AlignError::InsufficientSequences { .. } => ErrorKind::InsufficientSequences,
            AlignError::EmptyRecord { .. } => ErrorKind::EmptyRecord,
            AlignError::InvalidResidueCharacters { .. } => ErrorKind::InvalidResidueCharacters,
            AlignError::RemoteFetchFailure { .. } => ErrorKind::RemoteFetchFailure,
            AlignError::UnsafeOption { .. } => ErrorKind::UnsafeOption,
            AlignError::AlignerUnavailable { .. } => ErrorKind::AlignerUnavailable,
            AlignError::AlignerRuntimeError { .. } => ErrorKind::AlignerRuntimeError,
            AlignError::AlignerTimeout { .. } => ErrorKind::AlignerTimeout,
            AlignError::Config(_) => ErrorKind::Config,
            AlignError::Io(_) => ErrorKind::Io,
        }
    }

    /// Kind plus rendered message, ready to be serialized for a caller.
    pub fn report(&self) -> ErrorReport {
        ErrorReport {
            kind: self.kind(),
            message: self.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorReport {
    pub kind: ErrorKind,
    pub message: String,
}

fn describe_empty_record(position: &usize, header: &Option<String>, missing: &RecordPart) -> String {
    match (missing, header.as_deref()) {
        (RecordPart::Header, _) => {
            format!("Sequence #{} has a '>' header with no sequence ID.", position)
        }
        (RecordPart::Residues, Some(hdr)) => {
            format!("Sequence #{} ('{}') has no residues.", position, hdr)
        }
        (RecordPart::Residues, None) => format!("Sequence #{} has no residues.", position),
    }
}

fn describe_residues(residues: &[InvalidResidue]) -> String {
    residues
        .iter()
        .map(|r| format!("'{}' (first in '{}')", r.residue, r.first_header))
        .join(", ")
}

fn describe_exit_code(code: &Option<i32>) -> String {
    match code {
        Some(c) => c.to_string(),
        // Killed by a signal
        None => String::from("none"),
    }
}
