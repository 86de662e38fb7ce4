//! Batch coordination for schema/data file pairs
//!
//! This module drives the whole run: list the schema directory, load each
//! schema, pair it with its data file, decode every line and hand each
//! document to the transport sink.
//!
//! ## Architecture
//!
//! - [`coordinator`] - Per-run and per-file state machine with skip semantics
//! - [`discovery`] - Schema directory listing and data file reading
//! - [`stats`] - Counters describing what was processed and skipped
//!
//! Only an unlistable schema directory aborts the run. A bad schema, a
//! missing data file or a file name without an extension skips that pair;
//! a line that fails to decode skips that line only.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use fixedwidth_relay::Config;
//! use fixedwidth_relay::app::services::batch_coordinator::BatchCoordinator;
//! use fixedwidth_relay::app::services::run_log::TracingLogger;
//! use fixedwidth_relay::app::services::transport_sink::DryRunSink;
//!
//! # fn example() -> fixedwidth_relay::Result<()> {
//! let mut coordinator = BatchCoordinator::new(Config::default(), TracingLogger, DryRunSink);
//! let stats = coordinator.run()?;
//!
//! println!("Submitted {} of {} records", stats.records_submitted, stats.records_read);
//! # Ok(())
//! # }
//! ```

pub mod coordinator;
pub mod discovery;
pub mod stats;

#[cfg(test)]
mod tests;

// Re-export main types for easy access
pub use coordinator::BatchCoordinator;
pub use discovery::{list_schema_files, read_data_lines};
pub use stats::BatchStats;
