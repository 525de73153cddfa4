// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier
// Modifications (c) 2026 Peter Carlton

use std::{
    fs,
    io::{self, Read},
    path::Path,
};

use log::{info, warn};

use clap::Parser;

use crate::aligner::{clustalo::ClustalOmega, Aligner};
use crate::config::{find_config, AppConfig, BINARY_ENV_VAR};
use crate::errors::AlignError;
use crate::fetch::http::HttpFetcher;
use crate::pipeline::{submit, Submission, SubmittedInput};
use crate::request::{OutputFormat, SequenceType};
use crate::result::AlignmentResult;

#[derive(Debug, Parser)]
#[command(version, about, long_about = None) ]
struct Cli {
    /// FastA file to align (read as an upload)
    seq_fname: Option<String>,

    /// FastA text or a list of UniProt accessions / PDB entry codes (default: read stdin)
    #[arg(short = 'T', long, conflicts_with = "seq_fname")]
    text: Option<String>,

    /// Sequence type
    #[arg(short, long = "seqtype", default_value_t = SequenceType::Protein,
        help = "Sequence type [protein|dna|rna] (or just p|d|r); default: protein",
        hide_default_value = true,
        hide_possible_values = true,
    )]
    seqtype: SequenceType,

    /// Output format
    #[arg(short = 'f', long = "outfmt", default_value_t = OutputFormat::Clustal,
        help = "Output format [clustal|fasta|msf|phylip|selex|stockholm|vienna]; default: clustal",
        hide_default_value = true,
        hide_possible_values = true,
    )]
    outfmt: OutputFormat,

    /// Guide-tree iterations (0: none)
    #[arg(long = "iter", default_value_t = 0)]
    iterations: u32,

    /// Extra Clustal Omega flags, e.g. "--full --threads=4"
    #[arg(short = 'x', long = "extra", default_value = "", allow_hyphen_values = true)]
    extra: String,

    /// Write the raw alignment to this file instead of stdout
    #[arg(short, long)]
    output: Option<String>,

    /// Print the result (or error) as JSON
    #[arg(short, long)]
    json: bool,

    /// Report whether Clustal Omega can be run, and exit
    #[arg(long)]
    status: bool,

    /// Config file (default: ~/.omegaalignconfig, then ./.omegaalignconfig)
    #[arg(short, long)]
    config: Option<String>,
}

// An explicitly named config file must be readable; a discovered one only produces a warning.
fn load_config(explicit: Option<&str>) -> Result<AppConfig, AlignError> {
    let config = match explicit {
        Some(path) => AppConfig::from_file(path)?,
        None => match find_config() {
            Some(path) => AppConfig::from_file(&path).unwrap_or_else(|e| {
                warn!("Ignoring {}: {}", path.display(), e);
                eprintln!("WARNING: {}", e);
                AppConfig::default()
            }),
            None => AppConfig::default(),
        },
    };
    Ok(config.with_binary_override(std::env::var(BINARY_ENV_VAR).ok()))
}

fn read_input(cli: &Cli) -> Result<SubmittedInput, AlignError> {
    if let Some(fname) = &cli.seq_fname {
        let bytes = fs::read(fname)?;
        let filename = Path::new(fname)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());
        return Ok(SubmittedInput::upload_from_bytes(filename, &bytes));
    }
    if let Some(text) = &cli.text {
        return Ok(SubmittedInput::Text(text.clone()));
    }
    info!("Reading input from stdin");
    let mut text = String::new();
    io::stdin().read_to_string(&mut text)?;
    Ok(SubmittedInput::Text(text))
}

fn report_status(aligner: &ClustalOmega) -> Result<(), AlignError> {
    match aligner.version() {
        Some(version) => {
            println!(
                "Clustal Omega {} is available ({})",
                version,
                aligner.binary().display()
            );
            Ok(())
        }
        None => Err(aligner.unavailable()),
    }
}

fn print_result(cli: &Cli, result: &AlignmentResult) -> Result<(), AlignError> {
    if let Some(path) = &cli.output {
        fs::write(path, &result.raw_output)?;
        info!("Alignment written to {}", path);
    }
    if cli.json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }
    for warning in &result.warnings {
        eprintln!("WARNING: {}", warning);
    }
    match &cli.output {
        Some(path) => println!(
            "{} {} sequences aligned ({}), length {}..{}, written to {}",
            result.stats.sequence_count,
            result.sequence_type.label(),
            result.format.label(),
            result.stats.min_length,
            result.stats.max_length,
            path
        ),
        None => print!("{}", result.raw_output),
    }
    Ok(())
}

pub fn run() -> Result<(), AlignError> {
    env_logger::init();
    info!("Starting log");

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    let aligner = ClustalOmega::new(&config.aligner);

    if cli.status {
        return report_status(&aligner);
    }

    let submission = Submission {
        input: read_input(&cli)?,
        sequence_type: cli.seqtype,
        output_format: cli.outfmt,
        guide_tree_iterations: cli.iterations,
        extra_flags: cli.extra.clone(),
    };
    let fetcher = HttpFetcher::new(&config.fetch)?;

    match submit(&submission, &fetcher, &aligner, &config.limits) {
        Ok(result) => print_result(&cli, &result),
        Err(e) => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&e.report())?);
            }
            Err(e)
        }
    }
}
