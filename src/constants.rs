//! Application constants for the fixed-width relay
//!
//! Default locations, the schema type vocabulary and transport settings
//! used throughout the application.

// =============================================================================
// Directory Layout and File Pairing
// =============================================================================

/// Directory holding schema files, relative to the working directory
pub const DEFAULT_SCHEMA_DIR: &str = "schemas";

/// Directory holding data files, relative to the working directory
pub const DEFAULT_DATA_DIR: &str = "data";

/// Extension given to a data file paired with a schema file
pub const DEFAULT_DATA_EXTENSION: &str = "txt";

/// Separator between a file stem and its extension
pub const EXTENSION_SEPARATOR: char = '.';

// =============================================================================
// Schema Format
// =============================================================================

/// Column positions within a schema row
pub mod schema_columns {
    pub const NAME: usize = 0;
    pub const WIDTH: usize = 1;
    pub const DATA_TYPE: usize = 2;

    /// Every schema row has exactly this many columns
    pub const COUNT: usize = 3;
}

/// Data type literals accepted in the type column (case-sensitive)
pub mod data_types {
    pub const TEXT: &str = "TEXT";
    pub const INTEGER: &str = "INTEGER";
    pub const BOOLEAN: &str = "BOOLEAN";

    pub const ALL: &[&str] = &[TEXT, INTEGER, BOOLEAN];
}

/// Literals accepted for BOOLEAN fields, compared case-insensitively
pub mod boolean_literals {
    pub const TRUE: &[&str] = &["true", "t", "1"];
    pub const FALSE: &[&str] = &["false", "f", "0"];
}

// =============================================================================
// Transport
// =============================================================================

/// Remote endpoint that receives one JSON document per record
pub const DEFAULT_ENDPOINT: &str =
    "https://2swdepm0wa.execute-api.us-east-1.amazonaws.com/prod/NavaInterview/measures";

/// Content type of every submitted document
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Status reported by sinks that never reach the network
pub const DRY_RUN_STATUS: u16 = 0;

// =============================================================================
// Logging
// =============================================================================

/// Log target used when building the default `EnvFilter`
pub const LOG_TARGET: &str = "fixedwidth_relay";
