// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Peter Carlton

pub mod clustalo;

use crate::errors::AlignError;
use crate::request::AlignmentRequest;

/// Raw text written by the aligner, in the requested output format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentOutput {
    pub text: String,
}

/// Runs one alignment. Implementations must not retry on their own.
pub trait Aligner {
    fn run(&self, request: &AlignmentRequest) -> Result<AlignmentOutput, AlignError>;

    /// Version string of the underlying tool, or None if it cannot be run.
    fn version(&self) -> Option<String> {
        None
    }
}
