//! Schema/data file pairing
//!
//! A data file shares its schema file's stem: everything from the last `.`
//! of the schema file name onwards is replaced by the data extension.

use crate::constants::EXTENSION_SEPARATOR;
use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// A schema file and the data file it governs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaDataPair {
    pub schema_file_name: String,
    pub data_file_name: String,
    pub schema_path: PathBuf,
    pub data_path: PathBuf,
}

/// Derive the data file name for `schema_file_name`
///
/// `data_extension` may be given with or without its leading dot.
pub fn data_file_name(schema_file_name: &str, data_extension: &str) -> Result<String> {
    let dot = schema_file_name
        .rfind(EXTENSION_SEPARATOR)
        .ok_or_else(|| Error::missing_extension(schema_file_name))?;

    let extension = data_extension.trim_start_matches(EXTENSION_SEPARATOR);
    Ok(format!(
        "{}{}{}",
        &schema_file_name[..dot],
        EXTENSION_SEPARATOR,
        extension
    ))
}

/// Resolve both paths for a schema file found in `schema_dir`
pub fn pair_for(
    schema_dir: &Path,
    data_dir: &Path,
    schema_file_name: &str,
    data_extension: &str,
) -> Result<SchemaDataPair> {
    let data_file_name = data_file_name(schema_file_name, data_extension)?;

    Ok(SchemaDataPair {
        schema_path: schema_dir.join(schema_file_name),
        data_path: data_dir.join(&data_file_name),
        schema_file_name: schema_file_name.to_string(),
        data_file_name,
    })
}
