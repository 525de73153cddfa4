// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Peter Carlton

use std::collections::HashMap;

use crate::errors::AlignError;
use crate::seq::file::SeqFile;
use crate::seq::record::SequenceRecord;

fn format_error(message: &str) -> AlignError {
    AlignError::MalformedOutput {
        format: String::from("MSF"),
        message: String::from(message),
    }
}

// GCG MSF: a header (with one "Name: ..." line per sequence) ended by "//", then interleaved
// blocks where each line is a name followed by space-separated groups of residues. Blocks may
// be preceded by a line of column numbers.
pub fn parse_msf(text: &str) -> Result<SeqFile, AlignError> {
    let mut lines = text.lines();
    if !lines.any(|l| l.trim() == "//") {
        return Err(format_error("missing '//' separator"));
    }

    let mut order: Vec<String> = Vec::new();
    let mut sequences: HashMap<String, String> = HashMap::new();
    for l in lines {
        let mut fields = l.split_whitespace();
        let Some(name) = fields.next() else {
            continue;
        };
        let rest: Vec<&str> = fields.collect();
        // column ruler
        if rest.iter().chain(std::iter::once(&name)).all(|f| f.parse::<usize>().is_ok()) {
            continue;
        }
        let entry = sequences.entry(name.to_string()).or_insert_with(|| {
            order.push(name.to_string());
            String::new()
        });
        for group in rest {
            entry.push_str(group);
        }
    }

    if order.is_empty() {
        return Err(format_error("no sequences found"));
    }
    Ok(order
        .into_iter()
        .map(|name| {
            let residues = sequences.remove(&name).unwrap_or_default();
            SequenceRecord::new(name, residues)
        })
        .collect())
}
