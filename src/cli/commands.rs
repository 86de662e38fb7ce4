//! Command implementation for the fixed-width relay CLI
//!
//! Sets up logging, layers the configuration, builds the transport sink and
//! runs the batch coordinator, then prints a summary.

use crate::app::services::batch_coordinator::{BatchCoordinator, BatchStats};
use crate::app::services::run_log::TracingLogger;
use crate::app::services::transport_sink::{DryRunSink, HttpSink, RecordSink};
use crate::cli::args::{Args, OutputFormat};
use crate::config::Config;
use crate::constants::LOG_TARGET;
use crate::{Error, Result};
use colored::*;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Main command runner
///
/// 1. Set up logging and configuration
/// 2. Build the sink (HTTP, or dry run)
/// 3. Run the batch
/// 4. Report the outcome
pub fn run(args: Args) -> Result<BatchStats> {
    let start_time = Instant::now();

    setup_logging(&args)?;

    info!("Starting fixed-width relay");
    debug!("Command line arguments: {:?}", args);

    args.validate()?;

    let config = load_configuration(&args)?;
    debug!("Loaded configuration: {:?}", config);

    let dry_run = config.dry_run;
    let stats = if dry_run {
        info!("Dry run - documents are logged but not sent");
        run_batch(config, DryRunSink)?
    } else {
        let sink = HttpSink::new(config.endpoint.clone(), config.request_timeout())?;
        info!("Submitting records to {}", sink.endpoint());
        run_batch(config, sink)?
    };

    generate_final_report(&args, &stats, dry_run, start_time.elapsed())?;

    Ok(stats)
}

fn run_batch<S: RecordSink>(config: Config, sink: S) -> Result<BatchStats> {
    BatchCoordinator::new(config, TracingLogger, sink).run()
}

/// Set up structured logging based on CLI arguments
fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{}={}", LOG_TARGET, log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .try_init()
        .map_err(|e| Error::configuration(format!("Failed to initialise logging: {}", e)))?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration using layered approach (defaults -> file -> args)
fn load_configuration(args: &Args) -> Result<Config> {
    let mut config = match &args.config_file {
        Some(path) => {
            info!("Using config file: {}", path.display());
            Config::from_file(path)?
        }
        None => Config::default(),
    };

    args.apply_overrides(&mut config);
    config.validate()?;

    Ok(config)
}

/// Print the run summary to stdout
fn generate_final_report(
    args: &Args,
    stats: &BatchStats,
    dry_run: bool,
    elapsed: Duration,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(stats)?;
            println!("{}", json);
        }
        OutputFormat::Human => {
            if args.quiet {
                return Ok(());
            }

            println!();
            println!("{}", "Run summary".bold());
            println!("  Schema files:     {}", stats.schema_files_seen);
            println!("  Data files:       {}", stats.data_files_processed);
            println!("  Records read:     {}", stats.records_read);
            if dry_run {
                println!(
                    "  Records decoded:  {} (dry run, none sent)",
                    stats.records_submitted.to_string().yellow()
                );
            } else {
                println!(
                    "  Records sent:     {}",
                    stats.records_submitted.to_string().green()
                );
            }

            if stats.schema_files_skipped > 0 {
                println!(
                    "  Files skipped:    {}",
                    stats.schema_files_skipped.to_string().yellow()
                );
            }
            if stats.records_skipped > 0 {
                println!(
                    "  Lines skipped:    {}",
                    stats.records_skipped.to_string().yellow()
                );
            }
            if stats.submissions_failed > 0 {
                println!(
                    "  Failed requests:  {}",
                    stats.submissions_failed.to_string().red()
                );
            }

            println!("  Decode rate:      {:.1}%", stats.success_rate());
            println!("  Elapsed:          {:.2?}", elapsed);

            if dry_run {
                println!("{}", "Dry run complete: no records were sent".yellow());
            } else if stats.is_clean() {
                println!("{}", "All records delivered".green());
            }
        }
    }

    Ok(())
}
