//! Batch coordinator implementation
//!
//! Per run: `Start -> (ProcessSchemaFile)* -> Finished`.
//! Per file: `Start -> SchemaLoaded -> DataLoaded -> (Decode | Skip)* -> Done`,
//! leaving early for `Done` at any failure point.

use super::discovery::{list_schema_files, read_data_lines};
use super::stats::BatchStats;
use crate::app::models::Schema;
use crate::app::services::file_pairing::pair_for;
use crate::app::services::fixed_width_decoder::FixedWidthDecoder;
use crate::app::services::run_log::RunLogger;
use crate::app::services::schema_loader::load_schema_file;
use crate::app::services::transport_sink::{RecordSink, submit_and_log};
use crate::config::Config;
use crate::{Error, Result};

/// Sequential driver for one batch run
///
/// Owns its logging and transport collaborators so tests can inject
/// capturing implementations and inspect them after [`run`](Self::run).
#[derive(Debug)]
pub struct BatchCoordinator<L, S> {
    config: Config,
    logger: L,
    sink: S,
}

impl<L: RunLogger, S: RecordSink> BatchCoordinator<L, S> {
    pub fn new(config: Config, logger: L, sink: S) -> Self {
        Self {
            config,
            logger,
            sink,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn logger(&self) -> &L {
        &self.logger
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Process every schema file in the schema directory
    ///
    /// Fails only when the schema directory cannot be listed.
    pub fn run(&mut self) -> Result<BatchStats> {
        let schema_files = list_schema_files(&self.config.schema_dir, &self.logger)?;
        self.logger.info(&format!(
            "Found {} schema files in {}",
            schema_files.len(),
            self.config.schema_dir.display()
        ));

        let mut stats = BatchStats::new();
        for schema_file in &schema_files {
            stats.schema_files_seen += 1;
            self.process_schema_file(schema_file, &mut stats);
        }

        self.logger.info(&format!(
            "Finished: {} records submitted, {} lines skipped, {} files skipped",
            stats.records_submitted, stats.records_skipped, stats.schema_files_skipped
        ));
        Ok(stats)
    }

    /// Load, pair, read and submit one schema/data pair
    fn process_schema_file(&mut self, schema_file: &str, stats: &mut BatchStats) {
        // Schema errors are reported before a missing extension
        let pairing = pair_for(
            &self.config.schema_dir,
            &self.config.data_dir,
            schema_file,
            self.config.normalized_extension(),
        );

        let schema = match load_schema_file(&self.config.schema_dir.join(schema_file)) {
            Ok(schema) => schema,
            Err(e) => {
                self.skip_file(
                    stats,
                    format!("Skipping schema file {}: {}", schema_file, e.describe()),
                );
                return;
            }
        };

        let pair = match pairing {
            Ok(pair) => pair,
            Err(_) => {
                self.skip_file(
                    stats,
                    format!(
                        "Found schema filename with no '.': {}. Skipping...",
                        schema_file
                    ),
                );
                return;
            }
        };

        let lines = match read_data_lines(&pair.data_path) {
            Ok(lines) => lines,
            Err(e) => {
                self.skip_file(
                    stats,
                    format!(
                        "Skipping data file {} for schema {}: {}",
                        pair.data_file_name,
                        schema_file,
                        e.describe()
                    ),
                );
                return;
            }
        };

        self.logger.info(&format!(
            "Processing {} lines from {} with schema {} ({} fields)",
            lines.len(),
            pair.data_file_name,
            schema_file,
            schema.len()
        ));
        self.process_lines(&schema, &pair.data_file_name, &lines, stats);
        stats.data_files_processed += 1;
    }

    /// Decode each line in order and submit the successful ones
    fn process_lines(
        &mut self,
        schema: &Schema,
        data_file: &str,
        lines: &[Vec<u8>],
        stats: &mut BatchStats,
    ) {
        let decoder = FixedWidthDecoder::new(schema);

        for (index, raw) in lines.iter().enumerate() {
            let line_number = index + 1;
            stats.records_read += 1;

            let document = match std::str::from_utf8(raw)
                .map_err(Error::invalid_encoding)
                .and_then(|line| decoder.decode(line))
                .and_then(|record| record.to_json())
            {
                Ok(document) => document,
                Err(e) => {
                    let message = format!(
                        "Skipping data record {}:{} '{}': {}",
                        data_file,
                        line_number,
                        String::from_utf8_lossy(raw),
                        e.describe()
                    );
                    self.logger.warn(&message);
                    stats.skip_record(message);
                    continue;
                }
            };
            stats.records_decoded += 1;

            if submit_and_log(&mut self.sink, &document, &self.logger) {
                stats.records_submitted += 1;
            } else {
                stats.submissions_failed += 1;
            }
        }
    }

    fn skip_file(&self, stats: &mut BatchStats, message: String) {
        self.logger.warn(&message);
        stats.skip_file(message);
    }
}
