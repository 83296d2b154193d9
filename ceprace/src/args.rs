use std::path::PathBuf;

use clap::Parser;

/// Resolve a Brazilian postal code by racing address providers
#[derive(Debug, Parser)]
#[command(name = "ceprace", about = "Resolve a CEP using whichever provider answers first")]
pub struct Args {
    /// Postal code, with or without the hyphen (e.g. 01310-100)
    pub cep: String,

    /// Path to configuration file; built-in defaults are used when omitted
    #[arg(short, long, env = "CEPRACE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log filter directive, written to stderr
    #[arg(long, default_value = "warn", env = "CEPRACE_LOG")]
    pub log_filter: String,
}
