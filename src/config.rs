// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Peter Carlton

//! Runtime configuration, read from a JSON file. Every field has a default, so an empty object
//! (or no file at all) is a valid configuration.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};

use crate::errors::AlignError;
use crate::seq::fasta::DEFAULT_LINE_WIDTH;

pub const CONFIG_FILE_NAME: &str = ".omegaalignconfig";
pub const BINARY_ENV_VAR: &str = "CLUSTALO_PATH";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub aligner: AlignerConfig,
    pub fetch: FetchConfig,
    pub limits: LimitsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignerConfig {
    /// Name or path of the clustalo executable
    pub binary: String,
    pub timeout_secs: u64,
    pub timeout_per_sequence_ms: u64,
    pub max_timeout_secs: u64,
    /// Residues per line in the FastA handed to the aligner; 0 disables wrapping
    pub wrap_width: usize,
}

impl Default for AlignerConfig {
    fn default() -> Self {
        AlignerConfig {
            binary: String::from("clustalo"),
            timeout_secs: 120,
            timeout_per_sequence_ms: 500,
            max_timeout_secs: 600,
            wrap_width: DEFAULT_LINE_WIDTH,
        }
    }
}

impl AlignerConfig {
    pub fn base_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn per_sequence_timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_per_sequence_ms)
    }

    pub fn max_timeout(&self) -> Duration {
        Duration::from_secs(self.max_timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// `{id}` is replaced by the accession
    pub uniprot_url: String,
    /// `{id}` is replaced by the entry code
    pub pdb_url: String,
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        FetchConfig {
            uniprot_url: String::from("https://rest.uniprot.org/uniprotkb/{id}.fasta"),
            pdb_url: String::from("https://www.rcsb.org/fasta/entry/{id}"),
            timeout_secs: 15,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Guide-tree iterations above this trigger a performance warning
    pub recommended_max_iterations: u32,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        LimitsConfig {
            recommended_max_iterations: 5,
        }
    }
}

impl AppConfig {
    pub fn from_json(text: &str) -> Result<Self, AlignError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AlignError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            AlignError::Config(format!("could not read {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&text)
            .map_err(|e| AlignError::Config(format!("{}: {}", path.display(), e)))
    }

    /// `override_binary` (normally the value of `CLUSTALO_PATH`) replaces the configured binary
    /// when it is set and not blank.
    pub fn with_binary_override(mut self, override_binary: Option<String>) -> Self {
        if let Some(binary) = override_binary.filter(|b| !b.trim().is_empty()) {
            self.aligner.binary = binary;
        }
        self
    }
}

/// Looks for the config file in `$HOME`, then in the current directory.
pub fn find_config() -> Option<PathBuf> {
    if let Ok(home) = std::env::var("HOME") {
        let path = PathBuf::from(home).join(CONFIG_FILE_NAME);
        if path.exists() {
            return Some(path);
        }
    }
    if let Ok(cwd) = std::env::current_dir() {
        let path = cwd.join(CONFIG_FILE_NAME);
        if path.exists() {
            return Some(path);
        }
    }
    None
}
