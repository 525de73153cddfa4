// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

use crate::seq::record::SequenceRecord;

// For our purposes, a sequence file is just a Vec of sequence records, whether it came from a
// submission, a remote database or the aligner's output.
//

pub type SeqFile = Vec<SequenceRecord>;
