//! Schema loading for fixed-width data files
//!
//! Schema files are headerless CSV with one `name,width,type` row per field.
//! A single bad row rejects the whole schema; there is no partial result.

use crate::app::models::{FieldDefinition, FieldType, Schema};
use crate::constants::schema_columns;
use crate::{Error, Result};
use csv::StringRecord;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;

/// Load and validate the schema stored at `path`
pub fn load_schema_file(path: &Path) -> Result<Schema> {
    let source = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    // File handle is dropped on every return path
    let file = File::open(path).map_err(|e| {
        Error::io(
            format!("Failed to open schema file {}", path.display()),
            e,
        )
    })?;

    let schema = parse_schema(BufReader::new(file), &source)?;
    debug!(
        "Loaded schema {}: {} fields, total width {}",
        source,
        schema.len(),
        schema.total_width()
    );
    Ok(schema)
}

/// Parse schema rows from any reader; `source` names the input in errors
pub fn parse_schema<R: Read>(reader: R, source: &str) -> Result<Schema> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut fields = Vec::new();
    let mut seen_names = HashSet::new();
    let mut total_width = 0usize;

    for (index, result) in csv_reader.records().enumerate() {
        let row = index + 1;
        let record = result.map_err(|e| {
            Error::csv_parsing(source, format!("Failed to read row {}", row), Some(e))
        })?;

        let field = parse_schema_row(&record, source, row)?;
        if !seen_names.insert(field.name().to_string()) {
            return Err(Error::duplicate_field_name(source, row, field.name()));
        }
        // Cumulative offsets must stay addressable
        total_width = total_width
            .checked_add(field.width())
            .ok_or_else(|| Error::invalid_width(source, row, &record[schema_columns::WIDTH]))?;
        fields.push(field);
    }

    Ok(Schema::new(fields))
}

/// Convert one CSV row into a field definition
///
/// The width column is trimmed before parsing; the type column must match
/// exactly. `row` is 1-based and only used for error context.
pub fn parse_schema_row(record: &StringRecord, source: &str, row: usize) -> Result<FieldDefinition> {
    if record.len() != schema_columns::COUNT {
        return Err(Error::malformed_schema_row(source, row, record.len()));
    }

    let name = &record[schema_columns::NAME];
    if name.is_empty() {
        return Err(Error::empty_field_name(source, row));
    }

    let raw_width = &record[schema_columns::WIDTH];
    let width = parse_width(raw_width).ok_or_else(|| Error::invalid_width(source, row, raw_width))?;

    let raw_type = &record[schema_columns::DATA_TYPE];
    let field_type = raw_type
        .parse::<FieldType>()
        .map_err(|_| Error::invalid_type(source, row, raw_type))?;

    Ok(FieldDefinition::new(name, width, field_type))
}

/// Positive decimal integer, surrounding whitespace ignored
fn parse_width(value: &str) -> Option<usize> {
    value.trim().parse::<usize>().ok().filter(|w| *w > 0)
}
