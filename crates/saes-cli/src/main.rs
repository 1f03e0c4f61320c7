//! Command-line interface for seeded-AES file encryption.

#![forbid(unsafe_code)]

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use saes_core::KeySize;
use saes_stream::{ChainMode, StreamCipher};
use serde::Deserialize;

/// Exit code when the settings file cannot be read.
const SETTINGS_ERROR: u8 = 1;

/// Exit code when the settings file is not valid JSON or names invalid
/// parameters.
const JSON_FORMAT_ERROR: u8 = 2;

/// Seeded-AES file encryption CLI.
#[derive(Parser)]
#[command(
    name = "saes",
    version,
    author,
    about = "Seeded AES-family file encryption with ECB/CBC/OFB/CFB chaining"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process the ordered job list from a JSON settings file.
    Run {
        /// Path to the settings file.
        #[arg(long, value_name = "FILE", default_value = "Settings.json")]
        config: PathBuf,
    },
    /// Encrypt a single file.
    Enc {
        #[command(flatten)]
        options: JobOptions,
    },
    /// Decrypt a single file.
    Dec {
        #[command(flatten)]
        options: JobOptions,
    },
}

/// Flags shared by the one-shot `enc` and `dec` subcommands.
#[derive(clap::Args)]
struct JobOptions {
    /// Key as hex characters; 16, 24, or 32 bytes once decoded.
    #[arg(long, value_name = "HEX")]
    key_hex: String,
    /// S-box seed.
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Block chain mode: ECB, CBC, OFB, or CFB.
    #[arg(long, default_value = "ECB")]
    mode: String,
    /// Blocks read per I/O round.
    #[arg(long, default_value_t = 8)]
    batch_size: usize,
    /// Input file.
    #[arg(long, value_name = "FILE")]
    input: PathBuf,
    /// Output file; must not exist yet.
    #[arg(long, value_name = "FILE")]
    output: PathBuf,
}

/// Settings file layout, field names matching the original `Settings.json`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Settings {
    key_length: usize,
    key: String,
    s_box_seed: u64,
    block_chain_mode: String,
    batch_size: usize,
    operations: Vec<JobSpec>,
}

/// One input/output job from the settings file.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct JobSpec {
    path_input: PathBuf,
    path_output: PathBuf,
    operation: Operation,
}

#[derive(Clone, Copy, Debug, Deserialize)]
enum Operation {
    Encrypt,
    Decrypt,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.command {
        Commands::Run { config } => cmd_run(&config),
        Commands::Enc { options } => report(cmd_single(&options, Operation::Encrypt)),
        Commands::Dec { options } => report(cmd_single(&options, Operation::Decrypt)),
    }
}

fn report(result: Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

fn cmd_run(config: &Path) -> ExitCode {
    println!("reading settings from {}", config.display());
    let text = match fs::read_to_string(config) {
        Ok(text) => text,
        Err(error) => {
            eprintln!("cannot read settings at {}: {error}", config.display());
            return ExitCode::from(SETTINGS_ERROR);
        }
    };
    let settings: Settings = match serde_json::from_str(&text) {
        Ok(settings) => settings,
        Err(error) => {
            eprintln!("invalid settings file: {error}");
            return ExitCode::from(JSON_FORMAT_ERROR);
        }
    };
    let stream = match build_stream(&settings) {
        Ok(stream) => stream,
        Err(error) => {
            eprintln!("error: {error:#}");
            return ExitCode::from(JSON_FORMAT_ERROR);
        }
    };

    println!(
        "processing {} job(s) in {} mode",
        settings.operations.len(),
        stream.mode()
    );
    let failed = process_jobs(&stream, &settings.operations);
    if failed > 0 {
        eprintln!("{failed} job(s) failed");
        return ExitCode::FAILURE;
    }
    println!("all jobs finished");
    ExitCode::SUCCESS
}

/// Runs every job in order and returns the number that failed. An
/// already-existing output skips the job without counting it as a failure.
fn process_jobs(stream: &StreamCipher, jobs: &[JobSpec]) -> usize {
    let mut failed = 0;
    for job in jobs {
        if job.path_output.exists() {
            eprintln!(
                "output {} already exists, skipping this job",
                job.path_output.display()
            );
            continue;
        }
        if let Err(error) = run_job(stream, job) {
            eprintln!("error: {error:#}");
            failed += 1;
        }
    }
    failed
}

fn build_stream(settings: &Settings) -> Result<StreamCipher> {
    let size = KeySize::from_bits(settings.key_length).context("invalid key length setting")?;
    let mode: ChainMode = settings
        .block_chain_mode
        .parse()
        .context("invalid block chain mode setting")?;
    StreamCipher::new(
        settings.s_box_seed,
        size,
        settings.key.as_bytes(),
        mode,
        settings.batch_size,
    )
    .context("cannot construct the cipher")
}

fn run_job(stream: &StreamCipher, job: &JobSpec) -> Result<()> {
    let verb = match job.operation {
        Operation::Encrypt => "encrypting",
        Operation::Decrypt => "decrypting",
    };
    println!(
        "{verb} {} -> {}",
        job.path_input.display(),
        job.path_output.display()
    );
    transform_file(stream, job.operation, &job.path_input, &job.path_output)?;
    println!("finished {}", job.path_output.display());
    Ok(())
}

fn cmd_single(options: &JobOptions, operation: Operation) -> Result<()> {
    let key = hex::decode(options.key_hex.trim()).context("decode key hex")?;
    let size = KeySize::from_bits(key.len() * 8)
        .context("key must be 16, 24, or 32 bytes of hex")?;
    let mode: ChainMode = options.mode.parse()?;
    let stream = StreamCipher::new(options.seed, size, &key, mode, options.batch_size)?;

    if options.output.exists() {
        bail!("output {} already exists", options.output.display());
    }
    transform_file(&stream, operation, &options.input, &options.output)
}

fn transform_file(
    stream: &StreamCipher,
    operation: Operation,
    input_path: &Path,
    output_path: &Path,
) -> Result<()> {
    let mut input =
        File::open(input_path).with_context(|| format!("open {}", input_path.display()))?;
    let mut output =
        File::create(output_path).with_context(|| format!("create {}", output_path.display()))?;
    match operation {
        Operation::Encrypt => stream.encrypt(&mut input, &mut output)?,
        Operation::Decrypt => stream.decrypt(&mut input, &mut output)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream() -> StreamCipher {
        StreamCipher::new(1, KeySize::Aes128, &[7u8; 16], ChainMode::Ecb, 4).unwrap()
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(name)
    }

    #[test]
    fn missing_input_counts_as_a_failed_job() {
        let job = JobSpec {
            path_input: temp_path("saes-cli-missing-input.bin"),
            path_output: temp_path("saes-cli-unwritten-output.bin"),
            operation: Operation::Encrypt,
        };
        let _ = fs::remove_file(&job.path_input);
        let _ = fs::remove_file(&job.path_output);
        assert_eq!(1, process_jobs(&stream(), std::slice::from_ref(&job)));
        // the input is opened before the output is created
        assert!(!job.path_output.exists());
    }

    #[test]
    fn existing_output_is_skipped_without_counting_as_failed() {
        let output = temp_path("saes-cli-existing-output.bin");
        fs::write(&output, b"kept").unwrap();
        let job = JobSpec {
            path_input: temp_path("saes-cli-any-input.bin"),
            path_output: output.clone(),
            operation: Operation::Decrypt,
        };
        assert_eq!(0, process_jobs(&stream(), std::slice::from_ref(&job)));
        assert_eq!(b"kept".to_vec(), fs::read(&output).unwrap());
        fs::remove_file(&output).unwrap();
    }

    #[test]
    fn jobs_round_trip_through_files() {
        let plain = temp_path("saes-cli-roundtrip-plain.bin");
        let encrypted = temp_path("saes-cli-roundtrip-encrypted.bin");
        let decrypted = temp_path("saes-cli-roundtrip-decrypted.bin");
        let _ = fs::remove_file(&encrypted);
        let _ = fs::remove_file(&decrypted);

        let content: Vec<u8> = (0..64u8).collect();
        fs::write(&plain, &content).unwrap();
        let jobs = [
            JobSpec {
                path_input: plain.clone(),
                path_output: encrypted.clone(),
                operation: Operation::Encrypt,
            },
            JobSpec {
                path_input: encrypted.clone(),
                path_output: decrypted.clone(),
                operation: Operation::Decrypt,
            },
        ];
        assert_eq!(0, process_jobs(&stream(), &jobs));
        assert_ne!(content, fs::read(&encrypted).unwrap());
        assert_eq!(content, fs::read(&decrypted).unwrap());

        fs::remove_file(&plain).unwrap();
        fs::remove_file(&encrypted).unwrap();
        fs::remove_file(&decrypted).unwrap();
    }
}
