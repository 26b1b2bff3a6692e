// SPDX-FileCopyrightText: 2026 Clinic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Clinic - credential vault and PII scrubber for clinic booking integrations.
//!
//! This is the binary entry point. Every subcommand reads its input from
//! stdin and writes its result to stdout; logs go to stderr through the
//! redacting writer.

mod logging;
mod scrub;
mod tools;
mod vault_cmd;

use std::io::Read;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use clinic_config::ClinicConfig;
use clinic_core::ClinicError;

/// Clinic - credential vault and PII scrubber.
#[derive(Parser, Debug)]
#[command(name = "clinic", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Encrypt a secret read from stdin into a sealed record.
    Seal {
        /// Print the single-line `v1.` form instead of JSON.
        #[arg(long)]
        compact: bool,
    },
    /// Decrypt a sealed record (JSON or compact) read from stdin.
    Open {
        /// Print the plaintext instead of a masked preview.
        #[arg(long)]
        reveal: bool,
    },
    /// Replace PII in stdin text with placeholders.
    Scrub,
    /// Report PII categories found in stdin text, as JSON.
    Scan,
    /// Print a random hex token.
    Token {
        /// Number of random bytes (the token is twice as many hex characters).
        #[arg(long, default_value_t = 32)]
        bytes: usize,
    },
    /// Print the SHA-256 of stdin.
    Checksum,
    /// Check the master passphrase against the strength rules.
    CheckPassphrase {
        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Print a fresh anonymous session identifier.
    SessionId,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match clinic_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            clinic_config::render_errors(&errors);
            return ExitCode::FAILURE;
        }
    };

    let known_values = logging::KnownValues::default();
    logging::init_tracing(&config.logging.level, known_values.clone());

    match run(cli.command, &config, &known_values).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&e);
            ExitCode::FAILURE
        }
    }
}

async fn run(
    command: Commands,
    config: &ClinicConfig,
    known_values: &logging::KnownValues,
) -> Result<(), ClinicError> {
    let mut stdout = std::io::stdout();
    match command {
        Commands::Seal { compact } => {
            let secret = read_stdin_trimmed()?;
            vault_cmd::seal(config, known_values, secret, compact, &mut stdout).await
        }
        Commands::Open { reveal } => {
            let record = read_stdin_trimmed()?;
            vault_cmd::open(config, known_values, &record, reveal, &mut stdout).await
        }
        Commands::Scrub => scrub::scrub(&read_stdin()?, &mut stdout),
        Commands::Scan => scrub::scan(&read_stdin()?, &mut stdout),
        Commands::Token { bytes } => tools::token(bytes, &mut stdout),
        Commands::Checksum => tools::checksum(&read_stdin()?, &mut stdout),
        Commands::CheckPassphrase { json } => {
            vault_cmd::check_passphrase(known_values, json, &mut stdout)
        }
        Commands::SessionId => scrub::session_id(&mut stdout),
    }
}

fn report_error(err: &ClinicError) {
    if err.requires_reentry() {
        tracing::warn!(error = %err, "sealed record could not be opened");
        eprintln!("clinic: credential unavailable, re-entry required");
    } else {
        eprintln!("clinic: {err}");
    }
}

fn read_stdin() -> Result<String, ClinicError> {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .map_err(|e| ClinicError::Internal(format!("failed to read stdin: {e}")))?;
    Ok(input)
}

/// Stdin without the trailing newline a shell pipe usually adds.
fn read_stdin_trimmed() -> Result<String, ClinicError> {
    read_stdin().map(|input| input.trim_end_matches(['\r', '\n']).to_string())
}

/// Map a stdout write failure into the crate error.
pub(crate) fn write_failed(e: std::io::Error) -> ClinicError {
    ClinicError::Internal(format!("failed to write output: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_seal_with_compact_flag() {
        let cli = Cli::try_parse_from(["clinic", "seal", "--compact"]).unwrap();
        assert!(matches!(cli.command, Commands::Seal { compact: true }));
    }

    #[test]
    fn token_defaults_to_32_bytes() {
        let cli = Cli::try_parse_from(["clinic", "token"]).unwrap();
        assert!(matches!(cli.command, Commands::Token { bytes: 32 }));

        let cli = Cli::try_parse_from(["clinic", "token", "--bytes", "16"]).unwrap();
        assert!(matches!(cli.command, Commands::Token { bytes: 16 }));
    }

    #[test]
    fn subcommand_names_are_kebab_case() {
        assert!(Cli::try_parse_from(["clinic", "check-passphrase"]).is_ok());
        assert!(Cli::try_parse_from(["clinic", "session-id"]).is_ok());
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["clinic"]).is_err());
    }

    #[test]
    fn binary_loads_config_defaults() {
        let config = clinic_config::load_and_validate_str("")
            .expect("default config should be valid");
        assert_eq!(config.logging.level, "info");
    }
}
