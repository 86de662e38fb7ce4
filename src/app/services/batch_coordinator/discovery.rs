//! File discovery for batch runs
//!
//! Lists schema files and reads paired data files. Each file handle is
//! opened, fully consumed and dropped before the function returns.

use crate::app::services::run_log::RunLogger;
use crate::{Error, Result};
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Names of the regular files in `schema_dir`, sorted lexicographically
///
/// Failure to list the directory (or to read one of its entries) is the only
/// error that aborts a run.
pub fn list_schema_files<L: RunLogger + ?Sized>(schema_dir: &Path, logger: &L) -> Result<Vec<String>> {
    let unreadable = |e| Error::directory_unreadable(schema_dir.display().to_string(), e);

    let mut names = Vec::new();
    for entry in fs::read_dir(schema_dir).map_err(unreadable)? {
        let entry = entry.map_err(unreadable)?;
        let path = entry.path();

        if !path.is_file() {
            logger.info(&format!(
                "Ignoring non-file entry in schema directory: {}",
                path.display()
            ));
            continue;
        }

        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(raw) => logger.warn(&format!(
                "Ignoring schema file with non UTF-8 name: {}",
                raw.to_string_lossy()
            )),
        }
    }

    names.sort();
    Ok(names)
}

/// Raw bytes of every line in the data file at `path`
///
/// `\n` and `\r\n` terminators are removed. Content is not validated here,
/// so one undecodable line cannot fail the whole file.
pub fn read_data_lines(path: &Path) -> Result<Vec<Vec<u8>>> {
    let unreadable = |e| Error::data_file_unreadable(path.display().to_string(), e);

    let file = File::open(path).map_err(unreadable)?;
    BufReader::new(file)
        .split(b'\n')
        .map(|line| {
            line.map(|mut bytes| {
                if bytes.last() == Some(&b'\r') {
                    bytes.pop();
                }
                bytes
            })
        })
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(unreadable)
}
