// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier
// Modifications (c) 2026 Peter Carlton

pub mod alphabet;
pub mod clustal;
pub mod fasta;
pub mod file;
pub mod msf;
pub mod phylip;
pub mod record;
pub mod stockholm;

use crate::errors::AlignError;
use crate::request::OutputFormat;
use crate::seq::file::SeqFile;

/// Reads aligner output back into records, using the reader for `format`.
pub fn parse_alignment(text: &str, format: OutputFormat) -> Result<SeqFile, AlignError> {
    match format {
        // Clustal Omega's Vienna output is FastA without line wrapping
        OutputFormat::Fasta | OutputFormat::Vienna => fasta::parse_fasta(text),
        OutputFormat::Clustal => clustal::parse_clustal(text),
        OutputFormat::Msf => msf::parse_msf(text),
        OutputFormat::Phylip => phylip::parse_phylip(text),
        OutputFormat::Selex => stockholm::parse_selex(text),
        OutputFormat::Stockholm => stockholm::parse_stockholm(text),
    }
}
