// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier
// Modifications (c) 2026 Peter Carlton

use std::collections::HashMap;

use crate::errors::AlignError;
use crate::seq::file::SeqFile;
use crate::seq::record::SequenceRecord;

fn format_error(message: String) -> AlignError {
    AlignError::MalformedOutput {
        format: String::from("Clustal"),
        message,
    }
}

// A "CLUSTAL ..." banner, then blocks of "name fragment [residue count]" lines. Conservation
// lines start with whitespace and are skipped.
pub fn parse_clustal(text: &str) -> Result<SeqFile, AlignError> {
    let mut lines = text.lines().skip_while(|l| l.trim().is_empty());
    match lines.next() {
        Some(banner) if banner.starts_with("CLUSTAL") => {}
        _ => return Err(format_error(String::from("missing CLUSTAL banner"))),
    }

    let mut order: Vec<String> = Vec::new();
    let mut sequences: HashMap<String, String> = HashMap::new();
    for line in lines {
        if line.trim().is_empty() || line.starts_with(char::is_whitespace) {
            continue;
        }
        let mut fields = line.split_whitespace();
        let (Some(name), Some(fragment)) = (fields.next(), fields.next()) else {
            return Err(format_error(format!("no residues on line '{}'", line)));
        };
        sequences
            .entry(name.to_string())
            .or_insert_with(|| {
                order.push(name.to_string());
                String::new()
            })
            .push_str(fragment);
    }

    if order.is_empty() {
        return Err(format_error(String::from("no sequences found")));
    }
    Ok(order
        .into_iter()
        .map(|name| {
            let residues = sequences.remove(&name).unwrap_or_default();
            SequenceRecord::new(name, residues)
        })
        .collect())
}
