//! Command-line argument definitions for the fixed-width relay
//!
//! Every option is an override on top of the defaults and the optional
//! config file; omitted options leave the lower layers untouched.

use crate::config::Config;
use crate::{Error, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the fixed-width relay
///
/// Pairs every schema file with its data file, decodes each fixed-width line
/// and POSTs the resulting JSON document to the configured endpoint.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "fixedwidth-relay",
    version,
    about = "Decode schema-described fixed-width files and POST each record as JSON",
    long_about = "Reads every schema file (CSV rows of name,width,type) from the schema directory, \
                  loads the data file with the same stem from the data directory, decodes each \
                  fixed-width line into typed fields and submits it as a JSON document to an HTTP \
                  endpoint. Bad schemas, missing data files and malformed lines are logged and \
                  skipped; only an unreadable schema directory aborts the run."
)]
pub struct Args {
    /// Directory containing schema files
    #[arg(
        short = 's',
        long = "schemas",
        value_name = "PATH",
        help = "Directory containing schema files"
    )]
    pub schema_dir: Option<PathBuf>,

    /// Directory containing data files
    #[arg(
        short = 'd',
        long = "data",
        value_name = "PATH",
        help = "Directory containing data files"
    )]
    pub data_dir: Option<PathBuf>,

    /// Extension of data files paired with schema files
    #[arg(
        short = 'e',
        long = "extension",
        value_name = "EXT",
        help = "Data file extension replacing the schema file's extension"
    )]
    pub data_extension: Option<String>,

    /// HTTP endpoint receiving each JSON document
    #[arg(
        short = 'u',
        long = "endpoint",
        value_name = "URL",
        help = "HTTP endpoint receiving one POST per record"
    )]
    pub endpoint: Option<String>,

    /// Per-request timeout in seconds
    ///
    /// Without a timeout each submission waits until the server answers.
    #[arg(
        short = 't',
        long = "timeout",
        value_name = "SECONDS",
        help = "Per-request timeout in seconds"
    )]
    pub timeout_secs: Option<u64>,

    /// Path to configuration file
    ///
    /// JSON object with any of: schema_dir, data_dir, data_extension,
    /// endpoint, request_timeout_secs, dry_run.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (JSON format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Decode and log documents without sending them
    #[arg(
        long = "dry-run",
        help = "Decode and log documents without sending them"
    )]
    pub dry_run: bool,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: debug, -vv: trace)"
    )]
    pub verbose: u8,

    /// Only show warnings and errors
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except warnings and errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Format of the final summary
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for the run summary"
    )]
    pub output_format: OutputFormat,
}

/// Output format options for the run summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
}

impl Args {
    /// Reject argument values clap cannot check on its own
    pub fn validate(&self) -> Result<()> {
        if let Some(extension) = &self.data_extension {
            if extension.trim().is_empty() {
                return Err(Error::configuration("--extension cannot be empty"));
            }
        }

        if let Some(config_file) = &self.config_file {
            if !config_file.is_file() {
                return Err(Error::configuration(format!(
                    "Config file not found: {}",
                    config_file.display()
                )));
            }
        }

        Ok(())
    }

    /// Get log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            return "warn";
        }

        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }

    /// Apply every option that was given on the command line
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(schema_dir) = &self.schema_dir {
            config.schema_dir = schema_dir.clone();
        }
        if let Some(data_dir) = &self.data_dir {
            config.data_dir = data_dir.clone();
        }
        if let Some(extension) = &self.data_extension {
            config.data_extension = extension.clone();
        }
        if let Some(endpoint) = &self.endpoint {
            config.endpoint = endpoint.clone();
        }
        if let Some(timeout) = self.timeout_secs {
            config.request_timeout_secs = Some(timeout);
        }
        if self.dry_run {
            config.dry_run = true;
        }
    }
}
