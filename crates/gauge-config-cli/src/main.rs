//! Gauge configuration CLI
//!
//! # Usage
//!
//! ```bash
//! # Validate a document (JSON, YAML or TOML)
//! gauge-config validate --config voltage.yaml --gap-policy deny --domain 200,240
//!
//! # Print a built-in gauge as a browser script snippet
//! gauge-config show --preset pf --format js
//!
//! # Print a document with every default filled in
//! gauge-config defaults --config partial.json --format yaml
//! ```
//!
//! # Exit Codes
//!
//! - 0: Success - validation passed
//! - 1: Validation failed with errors
//! - 2: Validation passed with warnings
//! - 3: Invalid input or arguments
//! - 4: File not found or inaccessible
//! - 10: Internal error

mod commands;
mod output;

use clap::Parser;
use gauge_config_core::ConfigError;
use tracing_subscriber::EnvFilter;

use commands::{Cli, ExitCode};

fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<ConfigError>() {
        Some(ConfigError::Io(_)) => ExitCode::FileError,
        Some(ConfigError::Serialization(_)) => ExitCode::InternalError,
        Some(e) if e.is_schema_error() => ExitCode::ValidationError,
        Some(_) => ExitCode::InvalidInput,
        None => ExitCode::InternalError,
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let code = match commands::run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            exit_code_for(&e)
        }
    };
    std::process::exit(code.into());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_for_errors() {
        let io = anyhow::Error::new(ConfigError::Io("gone".to_string()));
        assert_eq!(exit_code_for(&io), ExitCode::FileError);

        let format = anyhow::Error::new(ConfigError::UnsupportedFormat("ini".to_string()));
        assert_eq!(exit_code_for(&format), ExitCode::InvalidInput);

        let missing = anyhow::Error::new(ConfigError::missing("angle"));
        assert_eq!(exit_code_for(&missing), ExitCode::ValidationError);

        assert_eq!(exit_code_for(&anyhow::anyhow!("boom")), ExitCode::InternalError);
    }
}
