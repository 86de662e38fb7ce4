//! Fixed-Width Relay Library
//!
//! A Rust library for decoding fixed-width data files described by companion
//! CSV schema files and forwarding every record as a JSON document to a
//! remote HTTP endpoint.
//!
//! This library provides tools for:
//! - Parsing `name,width,type` schema files into ordered field definitions
//! - Decoding fixed-width lines into typed records using cumulative offsets
//! - Pairing schema files with their data files by extension swap
//! - Driving the batch with per-file and per-record skip semantics
//! - Submitting JSON documents through a pluggable transport sink

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod batch_coordinator;
        pub mod file_pairing;
        pub mod fixed_width_decoder;
        pub mod run_log;
        pub mod schema_loader;
        pub mod transport_sink;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{DecodedRecord, FieldDefinition, FieldType, FieldValue, Schema};
pub use config::Config;

/// Result type alias for the relay
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for schema loading, decoding and delivery
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Schema CSV could not be read
    #[error("CSV parsing error in schema '{file}': {message}")]
    CsvParsing {
        file: String,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// Schema directory could not be listed
    #[error("Schema directory '{path}' could not be listed")]
    DirectoryUnreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Width column is not a positive integer
    #[error("Invalid width in schema '{file}', row {row}: '{value}'")]
    InvalidWidth {
        file: String,
        row: usize,
        value: String,
    },

    /// Type column is not one of TEXT, INTEGER, BOOLEAN
    #[error("Invalid data type in schema '{file}', row {row}: '{value}'")]
    InvalidType {
        file: String,
        row: usize,
        value: String,
    },

    /// Schema row does not have exactly three columns
    #[error("Malformed row in schema '{file}', row {row}: expected 3 columns, found {found}")]
    MalformedSchemaRow {
        file: String,
        row: usize,
        found: usize,
    },

    /// Field name column is empty
    #[error("Empty field name in schema '{file}', row {row}")]
    EmptyFieldName { file: String, row: usize },

    /// Field name repeats an earlier row
    #[error("Duplicate field name in schema '{file}', row {row}: '{name}'")]
    DuplicateFieldName {
        file: String,
        row: usize,
        name: String,
    },

    /// Schema file name has no '.' to split the extension at
    #[error("Schema file name has no extension separator: '{file}'")]
    MissingExtension { file: String },

    /// Paired data file is missing or unreadable
    #[error("Data file '{path}' could not be read")]
    DataFileUnreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Data line bytes are not valid UTF-8
    #[error("Line is not valid UTF-8")]
    InvalidEncoding {
        #[source]
        source: std::str::Utf8Error,
    },

    /// Line ends before a field's character range
    #[error("Line too short for field '{field}': needs {required} characters, found {actual}")]
    LineTooShort {
        field: String,
        required: usize,
        actual: usize,
    },

    /// BOOLEAN field holds an unrecognised literal
    #[error("Invalid boolean value for field '{field}': '{value}'")]
    InvalidBoolean { field: String, value: String },

    /// INTEGER field is not a base-10 signed integer
    #[error("Invalid integer value for field '{field}': '{value}'")]
    InvalidInteger { field: String, value: String },

    /// Decoded record could not be serialized to JSON
    #[error("JSON serialization failed: {message}")]
    Serialization {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// HTTP submission failed before a response was received
    #[error("Transport error: {message}")]
    Transport {
        message: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV parsing error with context
    pub fn csv_parsing(
        file: impl Into<String>,
        message: impl Into<String>,
        source: Option<csv::Error>,
    ) -> Self {
        Self::CsvParsing {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a directory listing error
    pub fn directory_unreadable(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::DirectoryUnreadable {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid width error
    pub fn invalid_width(file: impl Into<String>, row: usize, value: impl Into<String>) -> Self {
        Self::InvalidWidth {
            file: file.into(),
            row,
            value: value.into(),
        }
    }

    /// Create an invalid type error
    pub fn invalid_type(file: impl Into<String>, row: usize, value: impl Into<String>) -> Self {
        Self::InvalidType {
            file: file.into(),
            row,
            value: value.into(),
        }
    }

    pub fn malformed_schema_row(file: impl Into<String>, row: usize, found: usize) -> Self {
        Self::MalformedSchemaRow {
            file: file.into(),
            row,
            found,
        }
    }

    pub fn empty_field_name(file: impl Into<String>, row: usize) -> Self {
        Self::EmptyFieldName {
            file: file.into(),
            row,
        }
    }

    pub fn duplicate_field_name(file: impl Into<String>, row: usize, name: impl Into<String>) -> Self {
        Self::DuplicateFieldName {
            file: file.into(),
            row,
            name: name.into(),
        }
    }

    /// Create a missing extension error
    pub fn missing_extension(file: impl Into<String>) -> Self {
        Self::MissingExtension { file: file.into() }
    }

    /// Create a data file read error
    pub fn data_file_unreadable(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::DataFileUnreadable {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid encoding error for one data line
    pub fn invalid_encoding(source: std::str::Utf8Error) -> Self {
        Self::InvalidEncoding { source }
    }

    /// Create a line too short error
    pub fn line_too_short(field: impl Into<String>, required: usize, actual: usize) -> Self {
        Self::LineTooShort {
            field: field.into(),
            required,
            actual,
        }
    }

    /// Create an invalid boolean error
    pub fn invalid_boolean(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidBoolean {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create an invalid integer error
    pub fn invalid_integer(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidInteger {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create a transport error
    pub fn transport(
        message: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::Transport {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Message followed by every underlying cause, `: `-separated
    pub fn describe(self) -> String {
        format!("{:#}", anyhow::Error::new(self))
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            file: "unknown".to_string(),
            message: "CSV parsing failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            message: "Failed to serialize record".to_string(),
            source: error,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        Self::Transport {
            message: error.to_string(),
            source: Box::new(error),
        }
    }
}
