// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier
// Modifications (c) 2026 Peter Carlton

use std::collections::HashMap;

use crate::errors::AlignError;
use crate::seq::file::SeqFile;
use crate::seq::record::SequenceRecord;

pub fn parse_stockholm(text: &str) -> Result<SeqFile, AlignError> {
    parse_name_sequence_lines(text, "Stockholm")
}

// SELEX as written by Clustal Omega: '#=' annotations, then "name sequence" lines, possibly in
// several blocks. Same reader as Stockholm, minus the terminating '//'.
pub fn parse_selex(text: &str) -> Result<SeqFile, AlignError> {
    parse_name_sequence_lines(text, "SELEX")
}

fn parse_name_sequence_lines(text: &str, format: &str) -> Result<SeqFile, AlignError> {
    let format_error = |message: String| AlignError::MalformedOutput {
        format: String::from(format),
        message,
    };
    let mut order: Vec<String> = Vec::new();
    let mut sequences: HashMap<String, String> = HashMap::new();

    for l in text.lines() {
        let Some(first_char) = l.trim_start().chars().next() else {
            continue;
        };
        match first_char {
            '/' if l.trim_start().starts_with("//") => {
                break;
            }
            '#' => {} // Annotation -> ignore.
            _ => {
                let mut fields = l.split_whitespace();

                match (fields.next(), fields.next(), fields.next()) {
                    (Some(seqname), Some(aln_seq), None) => {
                        let entry = sequences.entry(seqname.to_string()).or_insert_with(|| {
                            order.push(seqname.to_string());
                            String::new()
                        });
                        entry.push_str(aln_seq);
                    }
                    _ => {
                        return Err(format_error(format!(
                            "expected exactly two fields in '{}'",
                            l.trim()
                        )))
                    }
                }
            }
        }
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
