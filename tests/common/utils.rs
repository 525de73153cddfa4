// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier
// Modifications (c) 2026 Peter Carlton

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
};

use omega_align::{
    aligner::{Aligner, AlignmentOutput},
    errors::AlignError,
    fetch::{FetchFailureReason, FetchOutcome, RemoteSource, SequenceFetcher},
    pipeline::{Submission, SubmittedInput},
    request::{AlignmentRequest, OutputFormat, SequenceType},
    seq::{fasta::write_fasta, record::SequenceRecord},
};

/// Serves canned records by identifier; unknown identifiers are not found.
#[allow(dead_code)]
#[derive(Default)]
pub struct MockFetcher {
    entries: HashMap<String, Vec<SequenceRecord>>,
    calls: AtomicUsize,
}

#[allow(dead_code)]
impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, id: &str, records: &[(&str, &str)]) -> Self {
        let records = records
            .iter()
            .map(|(hdr, res)| SequenceRecord::new(*hdr, res))
            .collect();
        self.entries.insert(id.to_string(), records);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SequenceFetcher for MockFetcher {
    fn fetch(&self, identifier: &str, source: RemoteSource) -> FetchOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.entries.get(identifier) {
            Some(records) => FetchOutcome::Success {
                identifier: identifier.to_string(),
                records: records.clone(),
            },
            None => FetchOutcome::failure(identifier, source, FetchFailureReason::NotFound),
        }
    }
}

/// What a `RecordingAligner` was asked to do.
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeenRequest {
    pub headers: Vec<String>,
    pub sequence_type: SequenceType,
    pub output_format: OutputFormat,
    pub guide_tree_iterations: u32,
    pub extra_flags: Vec<String>,
}

/// Pads every record with gaps to the longest length and returns them as FastA.
#[allow(dead_code)]
#[derive(Default)]
pub struct RecordingAligner {
    seen: Mutex<Vec<SeenRequest>>,
}

#[allow(dead_code)]
impl RecordingAligner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seen(&self) -> Vec<SeenRequest> {
        self.seen.lock().unwrap().clone()
    }
}

impl Aligner for RecordingAligner {
    fn run(&self, request: &AlignmentRequest) -> Result<AlignmentOutput, AlignError> {
        self.seen.lock().unwrap().push(SeenRequest {
            headers: request
                .records()
                .iter()
                .map(|r| r.header().to_string())
                .collect(),
            sequence_type: request.sequence_type(),
            output_format: request.output_format(),
            guide_tree_iterations: request.guide_tree_iterations(),
            extra_flags: request.extra_flags().to_vec(),
        });
        let width = request.records().iter().map(|r| r.len()).max().unwrap_or(0);
        let padded: Vec<SequenceRecord> = request
            .records()
            .iter()
            .map(|r| SequenceRecord::new(r.header(), format!("{:-<width$}", r.residues())))
            .collect();
        Ok(AlignmentOutput {
            text: write_fasta(&padded, 0),
        })
    }

    fn version(&self) -> Option<String> {
        Some(String::from("test"))
    }
}

#[allow(dead_code)]
pub fn text_submission(text: &str) -> Submission {
    Submission {
        input: SubmittedInput::Text(text.to_string()),
        sequence_type: SequenceType::Protein,
        output_format: OutputFormat::Fasta,
        guide_tree_iterations: 0,
        extra_flags: String::new(),
    }
}

#[cfg(unix)]
#[allow(dead_code)]
pub mod scripts {
    use std::{
        fs,
        os::unix::fs::PermissionsExt,
        path::{Path, PathBuf},
        sync::{Mutex, MutexGuard},
    };

    static SCRIPT_LOCK: Mutex<()> = Mutex::new(());

    /// Held while writing and running fake executables, so that no other test thread forks
    /// while a script is still open for writing (which makes exec fail with ETXTBSY).
    pub fn lock() -> MutexGuard<'static, ()> {
        SCRIPT_LOCK.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Writes an executable `/bin/sh` script named `clustalo` into `dir`.
    pub fn fake_clustalo(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("clustalo");
        fs::write(&path, format!("#!/bin/sh\n{}\n", body)).expect("write script");
        let mut perms = fs::metadata(&path).expect("stat script").permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).expect("chmod script");
        path
    }

    /// Shell snippet that stores the value following `-o` in `$out`.
    pub const FIND_OUTPUT: &str = r#"out=""
while [ $# -gt 0 ]; do
  if [ "$1" = "-o" ]; then out="$2"; fi
  shift
done"#;
}
