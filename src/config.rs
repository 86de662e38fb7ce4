//! Configuration management and validation.
//!
//! Settings are layered: built-in defaults, then an optional JSON config
//! file, then command-line overrides applied by the CLI.

use crate::constants::{
    DEFAULT_DATA_DIR, DEFAULT_DATA_EXTENSION, DEFAULT_ENDPOINT, DEFAULT_SCHEMA_DIR,
    EXTENSION_SEPARATOR,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Settings for one batch run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory listed for schema files
    pub schema_dir: PathBuf,

    /// Directory holding the paired data files
    pub data_dir: PathBuf,

    /// Extension of data files, without the leading dot
    pub data_extension: String,

    /// HTTP endpoint receiving one POST per record
    pub endpoint: String,

    /// Per-request timeout in seconds (none = wait indefinitely)
    pub request_timeout_secs: Option<u64>,

    /// Decode and log documents without submitting them
    pub dry_run: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema_dir: PathBuf::from(DEFAULT_SCHEMA_DIR),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            data_extension: DEFAULT_DATA_EXTENSION.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout_secs: None,
            dry_run: false,
        }
    }
}

impl Config {
    /// Load a JSON config file; missing keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::configuration(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = serde_json::from_str(&content).map_err(|e| {
            Error::configuration(format!(
                "Invalid config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        debug!("Loaded config file {}: {:?}", path.display(), config);
        Ok(config)
    }

    /// Check settings that would make every submission or pairing fail
    pub fn validate(&self) -> Result<()> {
        if self.data_extension.trim_start_matches(EXTENSION_SEPARATOR).is_empty() {
            return Err(Error::configuration("Data file extension cannot be empty"));
        }

        if self.data_extension.contains(['/', '\\']) {
            return Err(Error::configuration(format!(
                "Data file extension must not contain path separators: '{}'",
                self.data_extension
            )));
        }

        if !self.dry_run
            && !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://"))
        {
            return Err(Error::configuration(format!(
                "Endpoint must be an http(s) URL: '{}'",
                self.endpoint
            )));
        }

        if self.request_timeout_secs == Some(0) {
            return Err(Error::configuration("Request timeout must be at least 1 second"));
        }

        Ok(())
    }

    /// Data extension with any leading dot removed
    pub fn normalized_extension(&self) -> &str {
        self.data_extension.trim_start_matches(EXTENSION_SEPARATOR)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn with_schema_dir(mut self, schema_dir: impl Into<PathBuf>) -> Self {
        self.schema_dir = schema_dir.into();
        self
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn with_data_extension(mut self, extension: impl Into<String>) -> Self {
        self.data_extension = extension.into();
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_request_timeout_secs(mut self, seconds: u64) -> Self {
        self.request_timeout_secs = Some(seconds);
        self
    }

    pub fn with_dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.schema_dir, PathBuf::from("schemas"));
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.data_extension, "txt");
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.request_timeout(), None);
        assert!(!config.dry_run);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_methods() {
        let config = Config::default()
            .with_schema_dir("/tmp/s")
            .with_data_dir("/tmp/d")
            .with_data_extension(".dat")
            .with_endpoint("http://localhost:8080/measures")
            .with_request_timeout_secs(5)
            .with_dry_run();

        assert_eq!(config.schema_dir, PathBuf::from("/tmp/s"));
        assert_eq!(config.data_dir, PathBuf::from("/tmp/d"));
        assert_eq!(config.normalized_extension(), "dat");
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(5)));
        assert!(config.dry_run);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_failures() {
        let bad_extension = Config::default().with_data_extension(".");
        assert!(matches!(
            bad_extension.validate(),
            Err(Error::Configuration { .. })
        ));

        let separator = Config::default().with_data_extension("d/txt");
        assert!(separator.validate().is_err());

        let bad_endpoint = Config::default().with_endpoint("ftp://example.com");
        assert!(bad_endpoint.validate().is_err());

        // Endpoint is irrelevant when nothing is sent
        let dry = Config::default().with_endpoint("").with_dry_run();
        assert!(dry.validate().is_ok());

        let zero_timeout = Config::default().with_request_timeout_secs(0);
        assert!(zero_timeout.validate().is_err());
    }

    #[test]
    fn test_from_file_partial() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"data_dir": "incoming", "request_timeout_secs": 10}}"#
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("incoming"));
        assert_eq!(config.request_timeout_secs, Some(10));
        assert_eq!(config.schema_dir, PathBuf::from("schemas"));
        assert_eq!(config.data_extension, "txt");
    }

    #[test]
    fn test_from_file_errors() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            Config::from_file(file.path()),
            Err(Error::Configuration { .. })
        ));

        let dir = tempfile::TempDir::new().unwrap();
        assert!(Config::from_file(&dir.path().join("missing.json")).is_err());
    }
}
