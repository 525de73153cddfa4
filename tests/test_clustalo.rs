// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Peter Carlton

// Runs ClustalOmega against small shell scripts standing in for clustalo.
#![cfg(unix)]

mod common;

use std::{
    fs, thread,
    time::{Duration, Instant},
};

use crate::common::utils::scripts::{fake_clustalo, lock, FIND_OUTPUT};

use omega_align::{
    aligner::{
        clustalo::{ClustalOmega, TimeoutPolicy},
        Aligner,
    },
    config::AlignerConfig,
    errors::AlignError,
    request::{AlignmentRequest, OutputFormat, SequenceType},
    seq::record::SequenceRecord,
};

fn request(iterations: u32, extra: &[&str]) -> AlignmentRequest {
    AlignmentRequest::new(
        vec![
            SequenceRecord::new("a", "MKVL"),
            SequenceRecord::new("b", "MKL"),
        ],
        SequenceType::Protein,
        OutputFormat::Fasta,
        iterations,
        extra.iter().map(|s| s.to_string()).collect(),
    )
    .unwrap()
}

fn aligner_for(script: &std::path::Path) -> ClustalOmega {
    ClustalOmega::new(&AlignerConfig::default()).with_binary(script)
}

#[test]
fn successful_run_returns_output_file() {
    let _guard = lock();
    let dir = tempfile::tempdir().unwrap();
    let script = fake_clustalo(
        dir.path(),
        &format!("{}\nprintf '>a\\nMKVL\\n>b\\nMK-L\\n' > \"$out\"", FIND_OUTPUT),
    );
    let output = aligner_for(&script).run(&request(0, &[])).unwrap();
    assert_eq!(output.text, ">a\nMKVL\n>b\nMK-L\n");
}

#[test]
fn arguments_are_passed_as_a_list() {
    let _guard = lock();
    let dir = tempfile::tempdir().unwrap();
    let args_file = dir.path().join("args.txt");
    let script = fake_clustalo(
        dir.path(),
        &format!(
            "printf '%s\\n' \"$@\" > '{}'\n{}\necho '>a' > \"$out\"",
            args_file.display(),
            FIND_OUTPUT
        ),
    );
    aligner_for(&script)
        .run(&request(2, &["--full", "--threads=4"]))
        .unwrap();
    let args = fs::read_to_string(&args_file).unwrap();
    let args: Vec<&str> = args.lines().collect();
    assert_eq!(args[0], "-i");
    assert!(args[1].ends_with("input.fasta"));
    assert_eq!(args[2], "-o");
    assert!(args[3].ends_with("output.fasta"));
    assert_eq!(
        &args[4..],
        &[
            "--outfmt",
            "fasta",
            "--seqtype",
            "Protein",
            "--force",
            "--iter",
            "2",
            "--full",
            "--threads=4"
        ]
    );
}

#[test]
fn input_file_is_wrapped_fasta() {
    let _guard = lock();
    let dir = tempfile::tempdir().unwrap();
    let copy = dir.path().join("seen.fasta");
    let script = fake_clustalo(
        dir.path(),
        &format!(
            "cp \"$2\" '{}'\n{}\necho '>a' > \"$out\"",
            copy.display(),
            FIND_OUTPUT
        ),
    );
    let mut config = AlignerConfig::default();
    config.wrap_width = 2;
    ClustalOmega::new(&config)
        .with_binary(&script)
        .run(&request(0, &[]))
        .unwrap();
    assert_eq!(
        fs::read_to_string(&copy).unwrap(),
        ">a\nMK\nVL\n>b\nMK\nL\n"
    );
}

#[test]
fn failure_reports_code_and_stderr() {
    let _guard = lock();
    let dir = tempfile::tempdir().unwrap();
    let script = fake_clustalo(
        dir.path(),
        "echo 'progress on stdout'\necho 'FATAL: Unknown option --bogus' >&2\nexit 3",
    );
    match aligner_for(&script).run(&request(0, &["--bogus"])) {
        Err(AlignError::AlignerRuntimeError { code, diagnostics }) => {
            assert_eq!(code, Some(3));
            assert_eq!(diagnostics, "FATAL: Unknown option --bogus\n");
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn failure_without_stderr_reports_stdout() {
    let _guard = lock();
    let dir = tempfile::tempdir().unwrap();
    let script = fake_clustalo(dir.path(), "echo 'only stdout'\nexit 1");
    match aligner_for(&script).run(&request(0, &[])) {
        Err(AlignError::AlignerRuntimeError { code, diagnostics }) => {
            assert_eq!(code, Some(1));
            assert_eq!(diagnostics, "only stdout\n");
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn missing_output_is_an_error() {
    let _guard = lock();
    let dir = tempfile::tempdir().unwrap();
    let script = fake_clustalo(dir.path(), "exit 0");
    let err = aligner_for(&script).run(&request(0, &[])).unwrap_err();
    assert!(matches!(
        err,
        AlignError::AlignerRuntimeError { code: Some(0), .. }
    ));
}

#[test]
fn slow_aligner_is_killed() {
    let _guard = lock();
    let dir = tempfile::tempdir().unwrap();
    let script = fake_clustalo(dir.path(), "exec sleep 30");
    let policy = TimeoutPolicy {
        base: Duration::from_millis(300),
        per_sequence: Duration::from_millis(10),
        max: Duration::from_secs(1),
    };
    let aligner = aligner_for(&script).with_timeout(policy);
    let started = Instant::now();
    match aligner.run(&request(0, &[])) {
        Err(AlignError::AlignerTimeout { limit }) => {
            assert_eq!(limit, Duration::from_millis(320));
        }
        other => panic!("unexpected {:?}", other),
    }
    assert!(started.elapsed() < Duration::from_secs(10));
}

#[test]
fn timeout_kills_background_children() {
    let _guard = lock();
    let dir = tempfile::tempdir().unwrap();
    let marker = dir.path().join("survived");
    let script = fake_clustalo(
        dir.path(),
        &format!("( sleep 1; touch '{}' ) &\nsleep 30", marker.display()),
    );
    let policy = TimeoutPolicy {
        base: Duration::from_millis(300),
        per_sequence: Duration::from_millis(10),
        max: Duration::from_secs(1),
    };
    let started = Instant::now();
    let err = aligner_for(&script)
        .with_timeout(policy)
        .run(&request(0, &[]))
        .unwrap_err();
    assert!(matches!(err, AlignError::AlignerTimeout { .. }));
    assert!(started.elapsed() < Duration::from_secs(5));
    thread::sleep(Duration::from_millis(1500));
    assert!(!marker.exists());
}

#[test]
fn background_children_do_not_delay_a_finished_run() {
    let _guard = lock();
    let dir = tempfile::tempdir().unwrap();
    let marker = dir.path().join("survived");
    let script = fake_clustalo(
        dir.path(),
        &format!(
            "( sleep 1; touch '{}' ) &\n{}\necho '>a' > \"$out\"",
            marker.display(),
            FIND_OUTPUT
        ),
    );
    let started = Instant::now();
    let output = aligner_for(&script).run(&request(0, &[])).unwrap();
    assert_eq!(output.text, ">a\n");
    assert!(started.elapsed() < Duration::from_secs(1));
    thread::sleep(Duration::from_millis(1500));
    assert!(!marker.exists());
}

#[test]
fn non_executable_binary_is_unavailable() {
    let _guard = lock();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clustalo");
    fs::write(&path, "not a program").unwrap();
    let err = aligner_for(&path).run(&request(0, &[])).unwrap_err();
    assert!(matches!(err, AlignError::AlignerUnavailable { .. }));
}

#[test]
fn version_is_first_output_line() {
    let _guard = lock();
    let dir = tempfile::tempdir().unwrap();
    let script = fake_clustalo(dir.path(), "echo '1.2.4'");
    assert_eq!(aligner_for(&script).version().as_deref(), Some("1.2.4"));
}
