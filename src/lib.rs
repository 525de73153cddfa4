// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier
// Modifications (c) 2026 Peter Carlton

pub mod aligner;
pub mod classify;
pub mod config;
pub mod errors;
pub mod fetch;
pub mod options;
pub mod pipeline;
pub mod request;
pub mod result;
mod runner;
pub mod seq;
pub mod validate;

use crate::errors::AlignError;

pub fn run() -> Result<(), AlignError> {
    runner::run()
}
