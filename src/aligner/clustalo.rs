// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Peter Carlton

//! Runs the `clustalo` executable on a temporary FastA file.

use std::{
    ffi::OsString,
    fs::{self, File},
    io,
    path::{Path, PathBuf},
    process::{Child, Command, ExitStatus, Stdio},
    thread,
    time::{Duration, Instant},
};

#[cfg(unix)]
use std::os::unix::process::CommandExt;

use log::{debug, info, warn};

use crate::aligner::{Aligner, AlignmentOutput};
use crate::config::{AlignerConfig, BINARY_ENV_VAR, CONFIG_FILE_NAME};
use crate::errors::AlignError;
use crate::request::AlignmentRequest;
use crate::seq::fasta::write_fasta;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Wall-clock limit for one run: a base allowance plus a per-sequence increment, capped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutPolicy {
    pub base: Duration,
    pub per_sequence: Duration,
    pub max: Duration,
}

impl TimeoutPolicy {
    pub fn limit_for(&self, num_sequences: usize) -> Duration {
        let n = u32::try_from(num_sequences).unwrap_or(u32::MAX);
        self.base
            .saturating_add(self.per_sequence.saturating_mul(n))
            .min(self.max)
    }
}

impl From<&AlignerConfig> for TimeoutPolicy {
    fn from(config: &AlignerConfig) -> Self {
        TimeoutPolicy {
            base: config.base_timeout(),
            per_sequence: config.per_sequence_timeout(),
            max: config.max_timeout(),
        }
    }
}

pub struct ClustalOmega {
    binary: PathBuf,
    timeout: TimeoutPolicy,
    wrap_width: usize,
}

impl ClustalOmega {
    pub fn new(config: &AlignerConfig) -> Self {
        ClustalOmega {
            binary: PathBuf::from(&config.binary),
            timeout: TimeoutPolicy::from(config),
            wrap_width: config.wrap_width,
        }
    }

    pub fn with_binary<P: Into<PathBuf>>(mut self, binary: P) -> Self {
        self.binary = binary.into();
        self
    }

    pub fn with_timeout(mut self, timeout: TimeoutPolicy) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Argument list for one run. Extra flags go last, one argument per token.
    pub fn command_args(
        &self,
        request: &AlignmentRequest,
        input: &Path,
        output: &Path,
    ) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "-i".into(),
            input.as_os_str().to_owned(),
            "-o".into(),
            output.as_os_str().to_owned(),
            "--outfmt".into(),
            request.output_format().clustalo_arg().into(),
            "--seqtype".into(),
            request.sequence_type().clustalo_arg().into(),
            "--force".into(),
        ];
        if request.guide_tree_iterations() > 0 {
            args.push("--iter".into());
            args.push(request.guide_tree_iterations().to_string().into());
        }
        args.extend(request.extra_flags().iter().map(OsString::from));
        args
    }

    /// Error for a binary that cannot be executed, with setup instructions.
    pub fn unavailable(&self) -> AlignError {
        AlignError::AlignerUnavailable {
            binary: self.binary.display().to_string(),
            guidance: format!(
                "Install Clustal Omega (http://www.clustal.org/omega/) and make sure it is on \
                 the PATH, or point {} or 'aligner.binary' in {} at the executable.",
                BINARY_ENV_VAR, CONFIG_FILE_NAME
            ),
        }
    }

    fn spawn_error(&self, e: io::Error) -> AlignError {
        match e.kind() {
            io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => self.unavailable(),
            _ => AlignError::Io(e),
        }
    }
}

impl Aligner for ClustalOmega {
    fn run(&self, request: &AlignmentRequest) -> Result<AlignmentOutput, AlignError> {
        // Removed when dropped, whichever way this function returns.
        let workdir = tempfile::Builder::new().prefix("omega-align-").tempdir()?;
        let input = workdir.path().join("input.fasta");
        let output = workdir
            .path()
            .join(format!("output.{}", request.output_format().extension()));
        fs::write(&input, write_fasta(request.records(), self.wrap_width))?;

        // Not pipes: a background descendant could hold those open past the exit.
        let stdout_path = workdir.path().join("clustalo.stdout");
        let stderr_path = workdir.path().join("clustalo.stderr");

        let args = self.command_args(request, &input, &output);
        debug!("Running {} {:?}", self.binary.display(), args);
        let mut command = Command::new(&self.binary);
        command
            .args(&args)
            .stdin(Stdio::null())
            .stdout(File::create(&stdout_path)?)
            .stderr(File::create(&stderr_path)?);
        #[cfg(unix)]
        command.process_group(0);
        let mut child = command.spawn().map_err(|e| self.spawn_error(e))?;

        let limit = self.timeout.limit_for(request.records().len());
        let Some(status) = wait_with_timeout(&mut child, limit)? else {
            warn!("clustalo killed after {:?}", limit);
            return Err(AlignError::AlignerTimeout { limit });
        };
        let stdout = read_lossy(&stdout_path);
        let stderr = read_lossy(&stderr_path);

        if !status.success() {
            let diagnostics = if stderr.trim().is_empty() {
                stdout
            } else {
                stderr
            };
            return Err(AlignError::AlignerRuntimeError {
                code: status.code(),
                diagnostics,
            });
        }

        let text = match fs::read_to_string(&output) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(e.into()),
        };
        if text.trim().is_empty() {
            return Err(AlignError::AlignerRuntimeError {
                code: status.code(),
                diagnostics: String::from("Clustal Omega exited normally but wrote no alignment."),
            });
        }
        info!(
            "Aligned {} sequences ({} bytes of {} output)",
            request.records().len(),
            text.len(),
            request.output_format()
        );
        Ok(AlignmentOutput { text })
    }

    fn version(&self) -> Option<String> {
        let output = Command::new(&self.binary)
            .arg("--version")
            .stdin(Stdio::null())
            .output()
            .ok()?;
        if !output.status.success() {
            return None;
        }
        String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .map(String::from)
    }
}

fn read_lossy(path: &Path) -> String {
    fs::read(path)
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .unwrap_or_default()
}

/// Kills the child's whole process group, so that anything it started goes too.
#[cfg(unix)]
fn kill_tree(child: &mut Child) {
    let group = format!("-{}", child.id());
    let killed = Command::new("kill")
        .args(["-KILL", "--", &group])
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false);
    if !killed {
        debug!("Could not signal process group {}", group);
        child.kill().ok();
    }
}

#[cfg(not(unix))]
fn kill_tree(child: &mut Child) {
    child.kill().ok();
}

/// Polls `child` until it exits or `limit` has elapsed. On expiry the child and its process
/// group are killed, the child is reaped, and None is returned. Descendants still running after
/// a normal exit are killed as well.
fn wait_with_timeout(child: &mut Child, limit: Duration) -> io::Result<Option<ExitStatus>> {
    let start = Instant::now();
    loop {
        match child.try_wait() {
            Ok(Some(status)) => {
                kill_tree(child);
                return Ok(Some(status));
            }
            Ok(None) => {}
            Err(e) => {
                kill_tree(child);
                child.wait().ok();
                return Err(e);
            }
        }
        if start.elapsed() >= limit {
            kill_tree(child);
            child.wait()?;
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}
