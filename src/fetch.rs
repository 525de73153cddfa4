// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Peter Carlton

pub mod http;

use std::fmt;

use log::{info, warn};
use rayon::prelude::*;
use serde::Serialize;

use crate::errors::AlignError;
use crate::seq::file::SeqFile;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum RemoteSource {
    UniProt,
    Pdb,
}

impl fmt::Display for RemoteSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RemoteSource::UniProt => "UniProt",
            RemoteSource::Pdb => "PDB",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchFailureReason {
    NotFound,
    /// Any non-success HTTP status other than 404
    Status(u16),
    MalformedResponse(String),
    Transport(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub identifier: String,
    pub source: RemoteSource,
    pub reason: FetchFailureReason,
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            FetchFailureReason::NotFound => {
                write!(f, "{} ID '{}' not found.", self.source, self.identifier)
            }
            FetchFailureReason::Status(code) => write!(
                f,
                "{} returned status {} for '{}'.",
                self.source, code, self.identifier
            ),
            FetchFailureReason::MalformedResponse(msg) => write!(
                f,
                "Malformed response for {} ID '{}': {}",
                self.source, self.identifier, msg
            ),
            FetchFailureReason::Transport(msg) => write!(
                f,
                "Error fetching {} ID '{}': {}",
                self.source, self.identifier, msg
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A PDB entry may resolve to several chains, hence several records.
    Success { identifier: String, records: SeqFile },
    Failure(FetchFailure),
}

impl FetchOutcome {
    pub fn failure(identifier: &str, source: RemoteSource, reason: FetchFailureReason) -> Self {
        FetchOutcome::Failure(FetchFailure {
            identifier: identifier.to_string(),
            source,
            reason,
        })
    }
}

/// Resolves one identifier to FastA records. Implementations must be safe to call from several
/// threads at once, and calling twice with the same arguments must give the same answer.
pub trait SequenceFetcher: Send + Sync {
    fn fetch(&self, identifier: &str, source: RemoteSource) -> FetchOutcome;
}

/// Successful records of a batch, in identifier order, with the failures that were tolerated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchBatch {
    pub records: SeqFile,
    pub failures: Vec<FetchFailure>,
}

impl FetchBatch {
    /// One warning per failed identifier.
    pub fn warnings(&self) -> Vec<String> {
        self.failures.iter().map(|f| f.to_string()).collect()
    }
}

/// Fetches every identifier (concurrently) and merges the outcomes once all have settled.
///
/// The batch fails as a whole, listing every failure, when nothing could be fetched or when
/// failures leave fewer than two records. Otherwise failures become warnings. Without any
/// failure the records are passed on as they are, so that the minimum-count rule is enforced
/// (and reported) by the validator.
pub fn fetch_all(
    fetcher: &dyn SequenceFetcher,
    identifiers: &[String],
    source: RemoteSource,
) -> Result<FetchBatch, AlignError> {
    let outcomes: Vec<FetchOutcome> = identifiers
        .par_iter()
        .map(|id| fetcher.fetch(id, source))
        .collect();

    let mut records: SeqFile = Vec::new();
    let mut failures: Vec<FetchFailure> = Vec::new();
    let mut successes = 0;
    for outcome in outcomes {
        match outcome {
            FetchOutcome::Success {
                identifier,
                records: recs,
            } => {
                info!("Fetched {} record(s) for {} ID {}", recs.len(), source, identifier);
                successes += 1;
                records.extend(recs);
            }
            FetchOutcome::Failure(failure) => {
                warn!("{}", failure);
                failures.push(failure);
            }
        }
    }

    if !failures.is_empty() && (successes == 0 || records.len() < 2) {
        return Err(AlignError::RemoteFetchFailure {
            fetched: records.len(),
            failures,
        });
    }
    Ok(FetchBatch { records, failures })
}
