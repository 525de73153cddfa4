// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier
// Modifications (c) 2026 Peter Carlton

use serde::Serialize;

// A record for sequences, consisting of a description line and its residues. Meant to be
// format-agnostic: FastA submissions as well as every aligner output format end up as these.
// Residues are stored ASCII-uppercased so that alphabet checks and statistics need not care about
// case. Non-ASCII characters are kept as they are, for the validator to reject.

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SequenceRecord {
    header: String,
    residues: String,
}

impl SequenceRecord {
    pub fn new(header: impl Into<String>, residues: impl AsRef<str>) -> Self {
        SequenceRecord {
            header: header.into(),
            residues: residues.as_ref().to_ascii_uppercase(),
        }
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn residues(&self) -> &str {
        &self.residues
    }

    /// Number of residues (gaps included, for aligned records).
    pub fn len(&self) -> usize {
        self.residues.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_residues_are_uppercased() {
        let rec = SequenceRecord::new("seq1", "mkv-l");
        assert_eq!(rec.header(), "seq1");
        assert_eq!(rec.residues(), "MKV-L");
        assert_eq!(rec.len(), 5);
    }

    #[test]
    fn test_non_ascii_residues_left_alone() {
        // Unicode case mapping would turn these into "SS" and "I"
        let rec = SequenceRecord::new("seq1", "mkß\u{131}");
        assert_eq!(rec.residues(), "MKß\u{131}");
        assert_eq!(rec.len(), 4);
    }
}
