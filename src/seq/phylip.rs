// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Peter Carlton

use crate::errors::AlignError;
use crate::seq::file::SeqFile;
use crate::seq::record::SequenceRecord;

fn format_error(message: String) -> AlignError {
    AlignError::MalformedOutput {
        format: String::from("PHYLIP"),
        message,
    }
}

/// Reads interleaved (or sequential, one line per sequence) PHYLIP. The first block carries the
/// names; later lines are distributed over the sequences in order.
pub fn parse_phylip(text: &str) -> Result<SeqFile, AlignError> {
    let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty());

    let header = lines
        .next()
        .ok_or_else(|| format_error(String::from("empty output")))?;
    let mut dims = header.split_whitespace().map(|f| f.parse::<usize>());
    let (num_seq, aln_len) = match (dims.next(), dims.next()) {
        (Some(Ok(n)), Some(Ok(len))) if n > 0 => (n, len),
        _ => {
            return Err(format_error(format!(
                "expected '<sequences> <length>' header, got '{}'",
                header
            )))
        }
    };

    let mut names: Vec<String> = Vec::with_capacity(num_seq);
    let mut residues: Vec<String> = vec![String::new(); num_seq];
    for (idx, line) in lines.enumerate() {
        let slot = idx % num_seq;
        if idx < num_seq {
            let mut fields = line.split_whitespace();
            // split_whitespace() of a non-empty trimmed line yields at least one field
            let name = fields.next().unwrap_or_default();
            names.push(name.to_string());
            residues[slot].extend(fields.flat_map(str::chars));
        } else {
            residues[slot].extend(line.chars().filter(|c| !c.is_whitespace()));
        }
    }

    if names.len() != num_seq {
        return Err(format_error(format!(
            "header announces {} sequences, found {}",
            num_seq,
            names.len()
        )));
    }
    let result: SeqFile = names
        .into_iter()
        .zip(residues)
        .map(|(name, seq)| SequenceRecord::new(name, seq))
        .collect();
    if let Some(bad) = result.iter().find(|rec| rec.len() != aln_len) {
        return Err(format_error(format!(
            "sequence '{}' has {} columns, header says {}",
            bad.header(),
            bad.len(),
            aln_len
        )));
    }
    Ok(result)
}
