// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier
// Modifications (c) 2026 Peter Carlton

use itertools::Itertools;

use crate::errors::AlignError;
use crate::seq::file::SeqFile;
use crate::seq::record::SequenceRecord;

/// Default residue line width when writing FastA.
pub const DEFAULT_LINE_WIDTH: usize = 60;

// Records with an empty header or no residues are kept: it is up to the validator to reject
// them, naming the culprit.
pub fn parse_fasta(text: &str) -> Result<SeqFile, AlignError> {
    let mut result: SeqFile = Vec::new();
    let mut current: Option<(String, String)> = None;

    for (idx, line) in text.lines().enumerate() {
        let l = line.trim();
        if l.is_empty() {
            continue;
        }
        if let Some(hdr) = l.strip_prefix('>') {
            if let Some((header, residues)) = current.take() {
                result.push(SequenceRecord::new(header, residues));
            }
            current = Some((hdr.trim().to_string(), String::new()));
        } else {
            match current.as_mut() {
                // append line to current record's residues, minus any inner whitespace
                Some((_, residues)) => residues.extend(l.chars().filter(|c| !c.is_whitespace())),
                None => {
                    return Err(AlignError::MalformedFasta {
                        line: idx + 1,
                        message: String::from(
                            "sequence data found before any FASTA header ('>...')",
                        ),
                    })
                }
            }
        }
    }
    if let Some((header, residues)) = current {
        result.push(SequenceRecord::new(header, residues));
    }
    Ok(result)
}

/// Serializes records as FastA, wrapping residue lines at `width` characters (0 means no
/// wrapping).
pub fn write_fasta(records: &[SequenceRecord], width: usize) -> String {
    let mut out = String::new();
    for rec in records {
        out.push('>');
        out.push_str(rec.header());
        out.push('\n');
        if width == 0 {
            out.push_str(rec.residues());
            out.push('\n');
            continue;
        }
        for chunk in &rec.residues().chars().chunks(width) {
            out.extend(chunk);
            out.push('\n');
        }
    }
    out
}
