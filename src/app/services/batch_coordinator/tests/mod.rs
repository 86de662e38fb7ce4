//! Test fixtures for batch coordination
//!
//! Builds throwaway schema/data directory trees and a coordinator wired to
//! in-memory logging and transport collaborators.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::app::services::run_log::MemoryLogger;
use crate::app::services::transport_sink::MemorySink;
use crate::config::Config;

use super::BatchCoordinator;

mod stats_tests;

/// Schema and data directories under one temporary root
pub struct Workspace {
    _root: TempDir,
    pub schema_dir: PathBuf,
    pub data_dir: PathBuf,
}

impl Workspace {
    pub fn new() -> Self {
        let root = TempDir::new().unwrap();
        let schema_dir = root.path().join("schemas");
        let data_dir = root.path().join("data");
        fs::create_dir_all(&schema_dir).unwrap();
        fs::create_dir_all(&data_dir).unwrap();

        Self {
            _root: root,
            schema_dir,
            data_dir,
        }
    }

    pub fn schema(&self, name: &str, content: &str) -> &Self {
        write_file(&self.schema_dir, name, content);
        self
    }

    pub fn data(&self, name: &str, content: impl AsRef<[u8]>) -> &Self {
        write_file(&self.data_dir, name, content);
        self
    }

    pub fn config(&self) -> Config {
        Config::default()
            .with_schema_dir(&self.schema_dir)
            .with_data_dir(&self.data_dir)
    }

    pub fn coordinator(&self) -> BatchCoordinator<MemoryLogger, MemorySink> {
        BatchCoordinator::new(self.config(), MemoryLogger::new(), MemorySink::new())
    }
}

fn write_file(dir: &Path, name: &str, content: impl AsRef<[u8]>) {
    fs::write(dir.join(name), content).unwrap();
}

/// Schema with a 3-wide INTEGER `id` and a 1-wide BOOLEAN `flag`
pub const ID_FLAG_SCHEMA: &str = "id,3,INTEGER\nflag,1,BOOLEAN\n";

/// Schema mixing all three types
pub const MEASURES_SCHEMA: &str = "name,10,TEXT\nvalid,1,BOOLEAN\ncount,3,INTEGER\n";
