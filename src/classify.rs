// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Peter Carlton

//! Decides what kind of data a submission holds.
//!
//! Rules, first match wins: an uploaded file is always FastA; text with a line starting with
//! `>` is FastA; a list of tokens that all look like PDB entry codes (optionally with a chain
//! letter) is a PDB list; a list of tokens of 6 to 10 alphanumerics is a UniProt list. PDB codes
//! are tried before UniProt accessions.

use std::sync::OnceLock;

use log::debug;
use regex::Regex;

use crate::errors::AlignError;
use crate::fetch::RemoteSource;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    FastaText,
    /// Uppercased accessions
    UniProtIds(Vec<String>),
    /// Uppercased entry codes, chain letter removed
    PdbIds(Vec<String>),
    UploadedFasta,
}

impl InputMode {
    pub fn label(&self) -> &'static str {
        match self {
            InputMode::FastaText => "fasta",
            InputMode::UniProtIds(_) => "uniprot",
            InputMode::PdbIds(_) => "pdb",
            InputMode::UploadedFasta => "file",
        }
    }

    /// The remote catalog the identifiers must be fetched from, if any.
    pub fn remote_source(&self) -> Option<RemoteSource> {
        match self {
            InputMode::UniProtIds(_) => Some(RemoteSource::UniProt),
            InputMode::PdbIds(_) => Some(RemoteSource::Pdb),
            InputMode::FastaText | InputMode::UploadedFasta => None,
        }
    }
}

fn pdb_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^([0-9][A-Z0-9]{3})[A-Z]?$").unwrap())
}

fn uniprot_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9]{6,10}$").unwrap())
}

/// Splits identifier lists on whitespace, commas and semicolons.
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split(|c: char| c.is_whitespace() || c == ',' || c == ';')
        .filter(|t| !t.is_empty())
        .collect()
}

/// Entry code without its chain letter, if `token` is a PDB identifier.
pub fn pdb_entry_code(token: &str) -> Option<String> {
    pdb_regex()
        .captures(token)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_uppercase())
}

pub fn is_uniprot_accession(token: &str) -> bool {
    uniprot_regex().is_match(token)
}

pub fn classify(text: &str, uploaded: bool) -> Result<InputMode, AlignError> {
    if uploaded {
        return Ok(InputMode::UploadedFasta);
    }
    if text.trim().is_empty() {
        return Err(AlignError::EmptyInput);
    }
    if text.lines().any(|l| l.trim_start().starts_with('>')) {
        return Ok(InputMode::FastaText);
    }

    let tokens = tokenize(text);
    debug!("Classifying {} token(s)", tokens.len());
    // only separators
    if tokens.is_empty() {
        return Err(AlignError::EmptyInput);
    }

    let pdb_codes: Option<Vec<String>> = tokens.iter().map(|t| pdb_entry_code(t)).collect();
    if let Some(codes) = pdb_codes {
        return Ok(InputMode::PdbIds(codes));
    }
    if tokens.iter().all(|t| is_uniprot_accession(t)) {
        return Ok(InputMode::UniProtIds(
            tokens.iter().map(|t| t.to_uppercase()).collect(),
        ));
    }

    // Prefer naming a token that is no identifier at all; failing that, the list mixes PDB
    // codes with accessions and the first non-accession is named.
    let offending = tokens
        .iter()
        .find(|t| pdb_entry_code(t).is_none() && !is_uniprot_accession(t))
        .or_else(|| tokens.iter().find(|t| !is_uniprot_accession(t)))
        .copied()
        .unwrap_or_default();
    Err(AlignError::UnrecognizedFormat {
        token: offending.to_string(),
    })
}
