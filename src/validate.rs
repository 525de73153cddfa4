// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Peter Carlton

use log::debug;

use crate::classify::InputMode;
use crate::errors::{AlignError, InvalidResidue, RecordPart};
use crate::request::SequenceType;
use crate::seq::alphabet::is_valid_residue;
use crate::seq::file::SeqFile;

/// Records that passed validation, with the sequence type they were checked against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedInput {
    pub records: SeqFile,
    pub sequence_type: SequenceType,
    pub warnings: Vec<String>,
}

// UniProt and PDB only serve protein sequences, so a nucleotide type cannot apply to them.
fn effective_sequence_type(
    declared: SequenceType,
    mode: &InputMode,
    warnings: &mut Vec<String>,
) -> SequenceType {
    match (mode.remote_source(), declared) {
        (Some(_), SequenceType::Dna | SequenceType::Rna) => {
            warnings.push(format!(
                "UniProt and PDB entries contain protein sequences. \
                 Sequence type has been overridden from '{}' to 'Protein'.",
                declared.label()
            ));
            SequenceType::Protein
        }
        _ => declared,
    }
}

pub fn validate(
    records: SeqFile,
    declared: SequenceType,
    mode: &InputMode,
) -> Result<ValidatedInput, AlignError> {
    let mut warnings = Vec::new();
    let sequence_type = effective_sequence_type(declared, mode, &mut warnings);

    if records.len() < 2 {
        return Err(AlignError::InsufficientSequences {
            found: records.len(),
        });
    }

    for (idx, rec) in records.iter().enumerate() {
        if rec.header().trim().is_empty() {
            return Err(AlignError::EmptyRecord {
                position: idx + 1,
                header: None,
                missing: RecordPart::Header,
            });
        }
        if rec.is_empty() {
            return Err(AlignError::EmptyRecord {
                position: idx + 1,
                header: Some(rec.header().to_string()),
                missing: RecordPart::Residues,
            });
        }
    }

    let mut invalid: Vec<InvalidResidue> = Vec::new();
    for rec in &records {
        for residue in rec.residues().chars() {
            if is_valid_residue(sequence_type, residue)
                || invalid.iter().any(|ir| ir.residue == residue)
            {
                continue;
            }
            invalid.push(InvalidResidue {
                residue,
                first_header: rec.header().to_string(),
            });
        }
    }
    if !invalid.is_empty() {
        return Err(AlignError::InvalidResidueCharacters {
            sequence_type,
            residues: invalid,
        });
    }

    debug!(
        "Validated {} {} record(s)",
        records.len(),
        sequence_type.label()
    );
    Ok(ValidatedInput {
        records,
        sequence_type,
        warnings,
    })
}
