// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Peter Carlton

use crate::errors::AlignError;

// Shell metacharacters, line breaks and parent-directory traversal.
const UNSAFE_PATTERNS: [&str; 12] = [";", "|", "&", "$", "`", "(", ")", "<", ">", "\n", "\r", "../"];

/// Guards free-form aligner flags against injection. The flags themselves are not interpreted:
/// accepted text is only split on whitespace.
pub fn sanitize_extra_flags(text: &str) -> Result<Vec<String>, AlignError> {
    let earliest = UNSAFE_PATTERNS
        .iter()
        .filter_map(|pat| text.find(pat).map(|pos| (pos, *pat)))
        .min_by_key(|(pos, _)| *pos);
    if let Some((_, pat)) = earliest {
        return Err(AlignError::UnsafeOption {
            offending: pat.to_string(),
        });
    }
    Ok(text.split_whitespace().map(String::from).collect())
}

/// Many guide-tree iterations are allowed but slow; returns a warning above `recommended_max`.
pub fn check_guide_tree_iterations(iterations: u32, recommended_max: u32) -> Option<String> {
    (iterations > recommended_max).then(|| {
        format!(
            "{} guide-tree iterations requested; more than {} can make the alignment much slower.",
            iterations, recommended_max
        )
    })
}
