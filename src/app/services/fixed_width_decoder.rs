//! Fixed-width line decoding
//!
//! Field `i` of a line occupies the character range
//! `[sum(width_0..i), sum(width_0..=i))`. Each slice is trimmed and coerced
//! to the field's type; the first failing field rejects the whole line.

use crate::app::models::{DecodedRecord, FieldDefinition, FieldType, FieldValue, Schema};
use crate::constants::boolean_literals;
use crate::{Error, Result};

/// Decoder bound to one schema, reused for every line of a data file
#[derive(Debug, Clone, Copy)]
pub struct FixedWidthDecoder<'a> {
    schema: &'a Schema,
}

impl<'a> FixedWidthDecoder<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &'a Schema {
        self.schema
    }

    /// Decode one raw line
    pub fn decode(&self, line: &str) -> Result<DecodedRecord> {
        decode(line, self.schema)
    }
}

/// Decode `line` into one typed value per schema field, in schema order
///
/// Characters past the schema's total width are ignored.
pub fn decode(line: &str, schema: &Schema) -> Result<DecodedRecord> {
    let mut record = DecodedRecord::with_capacity(schema.len());
    let mut rest = line;
    let mut offset: usize = 0;

    for field in schema {
        offset = offset.saturating_add(field.width());
        let (raw, remainder) = split_chars(rest, field.width())
            .ok_or_else(|| Error::line_too_short(field.name(), offset, line.chars().count()))?;
        rest = remainder;

        let value = parse_value(field, raw.trim())?;
        record.push(field.name(), value);
    }

    Ok(record)
}

/// Coerce an already trimmed slice according to the field's type
pub fn parse_value(field: &FieldDefinition, value: &str) -> Result<FieldValue> {
    match field.field_type() {
        FieldType::Boolean => parse_boolean(value)
            .map(FieldValue::Boolean)
            .ok_or_else(|| Error::invalid_boolean(field.name(), value)),
        FieldType::Integer => value
            .parse::<i64>()
            .map(FieldValue::Integer)
            .map_err(|_| Error::invalid_integer(field.name(), value)),
        FieldType::Text => Ok(FieldValue::Text(value.to_string())),
    }
}

/// Accepts `true`/`false`, `t`/`f` in any case, and `1`/`0`
pub fn parse_boolean(value: &str) -> Option<bool> {
    if boolean_literals::TRUE
        .iter()
        .any(|lit| value.eq_ignore_ascii_case(lit))
    {
        Some(true)
    } else if boolean_literals::FALSE
        .iter()
        .any(|lit| value.eq_ignore_ascii_case(lit))
    {
        Some(false)
    } else {
        None
    }
}

/// Split off the first `count` characters, or `None` if `s` is shorter
fn split_chars(s: &str, count: usize) -> Option<(&str, &str)> {
    let end = s
        .char_indices()
        .map(|(idx, _)| idx)
        .chain(std::iter::once(s.len()))
        .nth(count)?;
    Some(s.split_at(end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id_flag_schema() -> Schema {
        Schema::new(vec![
            FieldDefinition::new("id", 3, FieldType::Integer),
            FieldDefinition::new("flag", 1, FieldType::Boolean),
        ])
    }

    fn measure_schema() -> Schema {
        Schema::new(vec![
            FieldDefinition::new("name", 10, FieldType::Text),
            FieldDefinition::new("valid", 1, FieldType::Boolean),
            FieldDefinition::new("count", 3, FieldType::Integer),
        ])
    }

    #[test]
    fn test_decode_id_and_flag() {
        let record = decode("042T", &id_flag_schema()).unwrap();

        assert_eq!(record.len(), 2);
        assert_eq!(record.get("id"), Some(&FieldValue::Integer(42)));
        assert_eq!(record.get("flag"), Some(&FieldValue::Boolean(true)));
        assert_eq!(record.to_json().unwrap(), r#"{"id":42,"flag":true}"#);
    }

    #[test]
    fn test_decode_trims_each_slice() {
        let schema = measure_schema();

        let record = decode("Diabetes  1  1", &schema).unwrap();
        assert_eq!(record.get("name"), Some(&FieldValue::Text("Diabetes".to_string())));
        assert_eq!(record.get("valid"), Some(&FieldValue::Boolean(true)));
        assert_eq!(record.get("count"), Some(&FieldValue::Integer(1)));

        let record = decode("NewProvidr0-12", &schema).unwrap();
        assert_eq!(record.get("name"), Some(&FieldValue::Text("NewProvidr".to_string())));
        assert_eq!(record.get("valid"), Some(&FieldValue::Boolean(false)));
        assert_eq!(record.get("count"), Some(&FieldValue::Integer(-12)));
    }

    #[test]
    fn test_line_too_short() {
        let result = decode("04", &id_flag_schema());
        match result.unwrap_err() {
            Error::LineTooShort {
                field,
                required,
                actual,
            } => {
                assert_eq!(field, "id");
                assert_eq!(required, 3);
                assert_eq!(actual, 2);
            }
            other => panic!("Expected LineTooShort, got {:?}", other),
        }

        // Exactly one character short on the last field
        assert!(matches!(
            decode("042", &id_flag_schema()),
            Err(Error::LineTooShort { required: 4, .. })
        ));
    }

    #[test]
    fn test_huge_widths_report_line_too_short() {
        let schema = Schema::new(vec![
            FieldDefinition::new("a", 1, FieldType::Text),
            FieldDefinition::new("b", usize::MAX, FieldType::Text),
        ]);

        assert!(matches!(
            decode("a", &schema),
            Err(Error::LineTooShort { ref field, required: usize::MAX, actual: 1 }) if field == "b"
        ));
    }

    #[test]
    fn test_extra_characters_ignored() {
        let record = decode("007F trailing junk", &id_flag_schema()).unwrap();
        assert_eq!(record.get("id"), Some(&FieldValue::Integer(7)));
        assert_eq!(record.get("flag"), Some(&FieldValue::Boolean(false)));
    }

    #[test]
    fn test_invalid_integer_yields_no_record() {
        for line in ["4x2T", "   T", "1.5T"] {
            let result = decode(line, &id_flag_schema());
            assert!(
                matches!(result, Err(Error::InvalidInteger { ref field, .. }) if field == "id"),
                "line '{}' should fail integer parsing",
                line
            );
        }
    }

    #[test]
    fn test_integer_signs() {
        let schema = Schema::new(vec![FieldDefinition::new("n", 4, FieldType::Integer)]);
        assert_eq!(decode("+012", &schema).unwrap().get("n"), Some(&FieldValue::Integer(12)));
        assert_eq!(decode(" -99", &schema).unwrap().get("n"), Some(&FieldValue::Integer(-99)));
    }

    #[test]
    fn test_boolean_literals() {
        for literal in ["true", "TRUE", "True", "t", "T", "1"] {
            assert_eq!(parse_boolean(literal), Some(true), "literal '{}'", literal);
        }
        for literal in ["false", "FALSE", "False", "f", "F", "0"] {
            assert_eq!(parse_boolean(literal), Some(false), "literal '{}'", literal);
        }
        for literal in ["maybe", "yes", "", "2", "tru"] {
            assert_eq!(parse_boolean(literal), None, "literal '{}'", literal);
        }
    }

    #[test]
    fn test_invalid_boolean() {
        let schema = Schema::new(vec![FieldDefinition::new("active", 5, FieldType::Boolean)]);
        let result = decode("maybe", &schema);
        assert!(matches!(
            result,
            Err(Error::InvalidBoolean { ref value, .. }) if value == "maybe"
        ));
    }

    #[test]
    fn test_empty_text_is_allowed() {
        let schema = Schema::new(vec![
            FieldDefinition::new("note", 4, FieldType::Text),
            FieldDefinition::new("n", 1, FieldType::Integer),
        ]);
        let record = decode("    5", &schema).unwrap();
        assert_eq!(record.get("note"), Some(&FieldValue::Text(String::new())));
    }

    #[test]
    fn test_offsets_count_characters() {
        let schema = Schema::new(vec![
            FieldDefinition::new("city", 6, FieldType::Text),
            FieldDefinition::new("code", 2, FieldType::Integer),
        ]);
        let record = decode("Zürich42", &schema).unwrap();
        assert_eq!(record.get("city"), Some(&FieldValue::Text("Zürich".to_string())));
        assert_eq!(record.get("code"), Some(&FieldValue::Integer(42)));
    }

    #[test]
    fn test_decode_is_stable_on_reconstructed_line() {
        let schema = measure_schema();
        let line = "Hypertensn0 17 and more";
        let first = decode(line, &schema).unwrap();

        // Rebuild the line from each field's own character range
        let mut rebuilt = String::new();
        let mut rest = line;
        for field in &schema {
            let (slice, remainder) = split_chars(rest, field.width()).unwrap();
            rebuilt.push_str(slice);
            rest = remainder;
        }

        assert_eq!(rebuilt.chars().count(), schema.total_width());
        assert_eq!(decode(&rebuilt, &schema).unwrap(), first);
    }

    #[test]
    fn test_empty_schema_decodes_to_empty_record() {
        let record = decode("anything", &Schema::default()).unwrap();
        assert!(record.is_empty());
        assert_eq!(record.to_json().unwrap(), "{}");
    }

    #[test]
    fn test_decoder_wrapper() {
        let schema = id_flag_schema();
        let decoder = FixedWidthDecoder::new(&schema);
        assert_eq!(decoder.schema().len(), 2);
        assert!(decoder.decode("123f").is_ok());
        assert!(decoder.decode("12").is_err());
    }
}
