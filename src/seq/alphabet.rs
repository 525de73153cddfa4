// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Peter Carlton

use crate::request::SequenceType;

// IUPAC residue codes accepted for each sequence type. Records are uppercased on construction,
// so only uppercase letters appear here.

const PROTEIN: &str = "ACDEFGHIKLMNPQRSTVWYXBZUJ*-";
// U is tolerated in DNA so that mixed submissions are not rejected outright.
const DNA: &str = "ACGTURYSWKMBDHVN-";
const RNA: &str = "ACGURYSWKMBDHVN-";

pub fn alphabet(sequence_type: SequenceType) -> &'static str {
    match sequence_type {
        SequenceType::Protein => PROTEIN,
        SequenceType::Dna => DNA,
        SequenceType::Rna => RNA,
    }
}

pub fn is_valid_residue(sequence_type: SequenceType, residue: char) -> bool {
    alphabet(sequence_type).contains(residue.to_ascii_uppercase())
}
