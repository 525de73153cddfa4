// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Peter Carlton

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::errors::AlignError;
use crate::seq::file::SeqFile;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SequenceType {
    #[clap(name = "protein")]
    #[clap(alias = "p")]
    Protein,
    #[clap(name = "dna")]
    #[clap(alias = "d")]
    Dna,
    #[clap(name = "rna")]
    #[clap(alias = "r")]
    Rna,
}

impl SequenceType {
    /// Value of Clustal Omega's `--seqtype`.
    pub fn clustalo_arg(&self) -> &'static str {
        match self {
            SequenceType::Protein => "Protein",
            SequenceType::Dna => "DNA",
            SequenceType::Rna => "RNA",
        }
    }

    pub fn label(&self) -> &'static str {
        self.clustalo_arg()
    }
}

// Display gives the command-line name, which clap parses back.
impl fmt::Display for SequenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SequenceType::Protein => "protein",
            SequenceType::Dna => "dna",
            SequenceType::Rna => "rna",
        };
        write!(f, "{}", s)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[clap(name = "clustal")]
    #[clap(alias = "aln")]
    Clustal,
    #[clap(name = "fasta")]
    #[clap(alias = "fa")]
    Fasta,
    #[clap(name = "msf")]
    Msf,
    #[clap(name = "phylip")]
    #[clap(alias = "phy")]
    Phylip,
    #[clap(name = "selex")]
    #[clap(alias = "slx")]
    Selex,
    #[clap(name = "stockholm")]
    #[clap(alias = "sto")]
    Stockholm,
    #[clap(name = "vienna")]
    Vienna,
}

impl OutputFormat {
    /// Value of Clustal Omega's `--outfmt`.
    pub fn clustalo_arg(&self) -> &'static str {
        match self {
            OutputFormat::Clustal => "clustal",
            OutputFormat::Fasta => "fasta",
            OutputFormat::Msf => "msf",
            OutputFormat::Phylip => "phylip",
            OutputFormat::Selex => "selex",
            OutputFormat::Stockholm => "stockholm",
            OutputFormat::Vienna => "vienna",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Clustal => "aln",
            OutputFormat::Fasta => "fasta",
            OutputFormat::Msf => "msf",
            OutputFormat::Phylip => "phy",
            OutputFormat::Selex => "slx",
            OutputFormat::Stockholm => "sto",
            OutputFormat::Vienna => "vienna",
        }
    }

    pub fn label(&self) -> String {
        let name = match self {
            OutputFormat::Clustal => "Clustal",
            OutputFormat::Fasta => "FASTA",
            OutputFormat::Msf => "MSF",
            OutputFormat::Phylip => "PHYLIP",
            OutputFormat::Selex => "SELEX",
            OutputFormat::Stockholm => "Stockholm",
            OutputFormat::Vienna => "Vienna",
        };
        format!("{} (.{})", name, self.extension())
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.clustalo_arg())
    }
}

/// Everything the aligner needs for one run. Built once the records have been validated and
/// never modified afterwards.
#[derive(Debug, Clone)]
pub struct AlignmentRequest {
    records: SeqFile,
    sequence_type: SequenceType,
    output_format: OutputFormat,
    guide_tree_iterations: u32,
    extra_flags: Vec<String>,
}

impl AlignmentRequest {
    pub fn new(
        records: SeqFile,
        sequence_type: SequenceType,
        output_format: OutputFormat,
        guide_tree_iterations: u32,
        extra_flags: Vec<String>,
    ) -> Result<Self, AlignError> {
        if records.len() < 2 {
            return Err(AlignError::InsufficientSequences {
                found: records.len(),
            });
        }
        Ok(AlignmentRequest {
            records,
            sequence_type,
            output_format,
            guide_tree_iterations,
            extra_flags,
        })
    }

    pub fn records(&self) -> &SeqFile {
        &self.records
    }

    pub fn sequence_type(&self) -> SequenceType {
        self.sequence_type
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    pub fn guide_tree_iterations(&self) -> u32 {
        self.guide_tree_iterations
    }

    pub fn extra_flags(&self) -> &[String] {
        &self.extra_flags
    }
}
