//! Transport sinks for decoded records
//!
//! Every decoded record is submitted individually as a JSON document. The
//! outcome is only reported; a failed submission never changes how the
//! remaining records are processed.

use crate::app::services::run_log::RunLogger;
use crate::constants::{DRY_RUN_STATUS, JSON_CONTENT_TYPE};
use crate::{Error, Result};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;

/// Response received for one submitted document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub status: u16,
    pub body: String,
}

impl Delivery {
    /// 2xx responses, plus the synthetic status of non-network sinks
    pub fn is_success(&self) -> bool {
        self.is_dry_run() || (200..300).contains(&self.status)
    }

    /// The document was accepted without being sent anywhere
    pub fn is_dry_run(&self) -> bool {
        self.status == DRY_RUN_STATUS
    }
}

/// Destination for serialized records
pub trait RecordSink {
    fn submit(&mut self, document: &str) -> Result<Delivery>;
}

impl<S: RecordSink + ?Sized> RecordSink for &mut S {
    fn submit(&mut self, document: &str) -> Result<Delivery> {
        (**self).submit(document)
    }
}

/// POSTs each document to a fixed HTTP endpoint with a blocking client
#[derive(Debug, Clone)]
pub struct HttpSink {
    client: Client,
    endpoint: String,
}

impl HttpSink {
    /// Build a sink; `timeout` of `None` waits indefinitely
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::transport("Failed to build HTTP client", Box::new(e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl RecordSink for HttpSink {
    fn submit(&mut self, document: &str) -> Result<Delivery> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(document.to_string())
            .send()?;

        let status = response.status().as_u16();
        let body = response.text()?;
        Ok(Delivery { status, body })
    }
}

/// Accepts every document without any network I/O
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunSink;

impl RecordSink for DryRunSink {
    fn submit(&mut self, _document: &str) -> Result<Delivery> {
        Ok(Delivery {
            status: DRY_RUN_STATUS,
            body: String::new(),
        })
    }
}

/// Records every document and answers with a fixed status
#[derive(Debug, Clone)]
pub struct MemorySink {
    documents: Vec<String>,
    status: u16,
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::with_status(200)
    }
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(status: u16) -> Self {
        Self {
            documents: Vec::new(),
            status,
        }
    }

    /// Documents received so far, in submission order
    pub fn documents(&self) -> &[String] {
        &self.documents
    }
}

impl RecordSink for MemorySink {
    fn submit(&mut self, document: &str) -> Result<Delivery> {
        self.documents.push(document.to_string());
        Ok(Delivery {
            status: self.status,
            body: String::new(),
        })
    }
}

/// Submit `document` and log the payload and outcome
///
/// Returns whether the sink acknowledged the document.
pub fn submit_and_log<S, L>(sink: &mut S, document: &str, logger: &L) -> bool
where
    S: RecordSink + ?Sized,
    L: RunLogger + ?Sized,
{
    logger.info(&format!("POSTing JSON data to API: {}", document));

    match sink.submit(document) {
        Ok(delivery) if delivery.is_dry_run() => {
            logger.info("Dry run: document not sent");
            true
        }
        Ok(delivery) if delivery.is_success() => {
            logger.info(&format!(
                "Received {} response from API: {}",
                delivery.status, delivery.body
            ));
            true
        }
        Ok(delivery) => {
            logger.warn(&format!(
                "Received {} response from API: {}",
                delivery.status, delivery.body
            ));
            false
        }
        Err(e) => {
            logger.warn(&format!("Received error response from API: {}", e));
            false
        }
    }
}
