// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Peter Carlton

use log::debug;
use serde::Serialize;

use crate::aligner::AlignmentOutput;
use crate::classify::InputMode;
use crate::errors::AlignError;
use crate::request::{AlignmentRequest, OutputFormat, SequenceType};
use crate::seq::parse_alignment;
use crate::seq::record::SequenceRecord;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignmentStats {
    pub sequence_count: usize,
    pub min_length: usize,
    pub max_length: usize,
    pub mean_length: f64,
}

impl AlignmentStats {
    pub fn from_records(records: &[SequenceRecord]) -> Self {
        let lengths: Vec<usize> = records.iter().map(|rec| rec.len()).collect();
        let mean_length = if lengths.is_empty() {
            0.0
        } else {
            lengths.iter().sum::<usize>() as f64 / lengths.len() as f64
        };
        AlignmentStats {
            sequence_count: lengths.len(),
            min_length: lengths.iter().copied().min().unwrap_or(0),
            max_length: lengths.iter().copied().max().unwrap_or(0),
            mean_length,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignmentResult {
    pub raw_output: String,
    pub format: OutputFormat,
    /// Type the aligner was run with, after any override
    pub sequence_type: SequenceType,
    pub input_mode: String,
    pub stats: AlignmentStats,
    pub warnings: Vec<String>,
}

/// Collects warnings as the pipeline advances and builds the final result. Warnings come out
/// fetch stage first, then validation stage, whatever order they were added in.
#[derive(Debug, Default)]
pub struct ResultAggregator {
    fetch_warnings: Vec<String>,
    validation_warnings: Vec<String>,
}

impl ResultAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_fetch_warnings<I: IntoIterator<Item = String>>(&mut self, warnings: I) {
        self.fetch_warnings.extend(warnings);
    }

    pub fn add_validation_warnings<I: IntoIterator<Item = String>>(&mut self, warnings: I) {
        self.validation_warnings.extend(warnings);
    }

    pub fn warnings(&self) -> Vec<String> {
        self.fetch_warnings
            .iter()
            .chain(self.validation_warnings.iter())
            .cloned()
            .collect()
    }

    /// Either a complete result or the aligner's error, unchanged.
    pub fn finish(
        self,
        request: &AlignmentRequest,
        mode: &InputMode,
        outcome: Result<AlignmentOutput, AlignError>,
    ) -> Result<AlignmentResult, AlignError> {
        let output = outcome?;
        let format = request.output_format();
        let stats = match parse_alignment(&output.text, format) {
            Ok(aligned) if !aligned.is_empty() => AlignmentStats::from_records(&aligned),
            Ok(_) => {
                debug!("No records in {} output; stats from input", format);
                AlignmentStats::from_records(request.records())
            }
            Err(e) => {
                debug!("{}; stats from input", e);
                AlignmentStats::from_records(request.records())
            }
        };
        let warnings = self.warnings();
        Ok(AlignmentResult {
            raw_output: output.text,
            format,
            sequence_type: request.sequence_type(),
            input_mode: mode.label().to_string(),
            stats,
            warnings,
        })
    }
}
