//! Batch statistics
//!
//! Counters accumulated over one run, used for the final report.

/// Outcome counters for a batch run
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BatchStats {
    /// Schema files found in the schema directory
    pub schema_files_seen: usize,

    /// Schema files whose pair was skipped (bad schema, no extension, unreadable data)
    pub schema_files_skipped: usize,

    /// Data files whose lines were all visited
    pub data_files_processed: usize,

    /// Lines read from data files
    pub records_read: usize,

    /// Lines decoded and serialized into documents
    pub records_decoded: usize,

    /// Lines skipped because decoding or serialization failed
    pub records_skipped: usize,

    /// Documents acknowledged by the sink
    pub records_submitted: usize,

    /// Documents the sink rejected or failed to deliver
    pub submissions_failed: usize,

    /// One message per skipped file or line, for reporting
    pub errors: Vec<String>,
}

impl BatchStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Share of read lines that were decoded, as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.records_read == 0 {
            0.0
        } else {
            (self.records_decoded as f64 / self.records_read as f64) * 100.0
        }
    }

    /// Nothing skipped and every submission acknowledged
    pub fn is_clean(&self) -> bool {
        self.schema_files_skipped == 0 && self.records_skipped == 0 && self.submissions_failed == 0
    }

    pub(crate) fn skip_file(&mut self, message: String) {
        self.schema_files_skipped += 1;
        self.errors.push(message);
    }

    pub(crate) fn skip_record(&mut self, message: String) {
        self.records_skipped += 1;
        self.errors.push(message);
    }
}
