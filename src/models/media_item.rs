/*---------- Imports ----------*/
use crate::error::IngestError;
use aws_sdk_dynamodb::types::AttributeValue;
use serde_json::{Map, Value};
use std::collections::HashMap;
use uuid::Uuid;

/*---------- Constants ----------*/
pub const DEFAULT_YEAR: &str = "2012";
pub const DEFAULT_TITLE: &str = "The Amazing Spider-Man 2";

/*---------- Structs ----------*/
/// Record written to the media table. `year` holds the decimal text of a number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaItem {
    pub year: String,
    pub title: String,
    pub id: String,
}

/// Decoded request body before coercion. Keys other than `year`, `title` and
/// `id` are kept so the payload can be logged as received.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaItemPayload {
    fields: Map<String, Value>,
}

impl MediaItem {
    pub fn default_with_id(id: String) -> Self {
        Self {
            year: DEFAULT_YEAR.to_owned(),
            title: DEFAULT_TITLE.to_owned(),
            id,
        }
    }

    pub fn with_generated_id() -> Self {
        Self::default_with_id(Uuid::new_v4().to_string())
    }

    pub fn to_attributes(&self) -> HashMap<String, AttributeValue> {
        HashMap::from([
            ("year".to_owned(), AttributeValue::N(self.year.to_owned())),
            ("title".to_owned(), AttributeValue::S(self.title.to_owned())),
            ("id".to_owned(), AttributeValue::S(self.id.to_owned())),
        ])
    }
}

fn required<'a>(
    fields: &'a Map<String, Value>,
    key: &'static str,
) -> Result<&'a Value, IngestError> {
    fields.get(key).ok_or(IngestError::MissingField(key))
}

fn invalid(field: &'static str, reason: impl Into<String>) -> IngestError {
    IngestError::InvalidField {
        field,
        reason: reason.into(),
    }
}

fn coerce_number(field: &'static str, value: &Value) -> Result<String, IngestError> {
    match value {
        Value::Number(number) => Ok(number.to_string()),

        Value::String(text) => {
            let trimmed = text.trim();

            match trimmed.parse::<f64>() {
                Ok(parsed) if parsed.is_finite() => Ok(trimmed.to_owned()),
                _ => Err(invalid(field, format!("must be numeric, got {:?}", text))),
            }
        }

        other => Err(invalid(field, format!("must be numeric, got {}", other))),
    }
}

fn quote(text: &str) -> String {
    let delimiter = if text.contains('\'') && !text.contains('"') {
        '"'
    } else {
        '\''
    };
    let mut quoted = String::with_capacity(text.len() + 2);

    quoted.push(delimiter);
    for character in text.chars() {
        match character {
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            c if c == delimiter => {
                quoted.push('\\');
                quoted.push(c);
            }
            c => quoted.push(c),
        }
    }
    quoted.push(delimiter);

    quoted
}

/// Text rendering used for nested values: `None`, `True`/`False`, quoted
/// strings, `[a, b]` lists and `{'k': v}` maps.
fn literal(value: &Value) -> String {
    match value {
        Value::Null => "None".to_owned(),
        Value::Bool(true) => "True".to_owned(),
        Value::Bool(false) => "False".to_owned(),
        Value::Number(number) => number.to_string(),
        Value::String(text) => quote(text),

        Value::Array(values) => {
            let rendered: Vec<String> = values.iter().map(literal).collect();

            format!("[{}]", rendered.join(", "))
        }

        Value::Object(entries) => {
            let rendered: Vec<String> = entries
                .iter()
                .map(|(key, value)| format!("{}: {}", quote(key), literal(value)))
                .collect();

            format!("{{{}}}", rendered.join(", "))
        }
    }
}

fn coerce_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.to_owned(),
        other => literal(other),
    }
}

impl MediaItemPayload {
    pub fn parse(body: &[u8]) -> Result<Self, IngestError> {
        let fields: Map<String, Value> = serde_json::from_slice(body)?;

        Ok(Self { fields })
    }

    pub fn into_item(self) -> Result<MediaItem, IngestError> {
        let year = coerce_number("year", required(&self.fields, "year")?)?;
        let title = coerce_text(required(&self.fields, "title")?);
        let id = coerce_text(required(&self.fields, "id")?);

        Ok(MediaItem { year, title, id })
    }
}

impl std::fmt::Display for MediaItemPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let raw = serde_json::to_string(&self.fields).map_err(|_| std::fmt::Error)?;

        write!(f, "{}", raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item_from(body: &str) -> Result<MediaItem, IngestError> {
        MediaItemPayload::parse(body.as_bytes())?.into_item()
    }

    #[test]
    fn coerces_a_typical_payload() {
        let item = item_from(r#"{"year": 1999, "title": "The Matrix", "id": "abc-1"}"#).unwrap();

        assert_eq!(
            item,
            MediaItem {
                year: "1999".to_owned(),
                title: "The Matrix".to_owned(),
                id: "abc-1".to_owned(),
            }
        );
    }

    #[test]
    fn numeric_strings_and_numbers_are_accepted() {
        let item = item_from(r#"{"year": " 2001 ", "title": 42, "id": 7}"#).unwrap();

        assert_eq!(item.year, "2001");
        assert_eq!(item.title, "42");
        assert_eq!(item.id, "7");

        let fractional = item_from(r#"{"year": 1999.5, "title": "x", "id": "y"}"#).unwrap();
        assert_eq!(fractional.year, "1999.5");
    }

    #[test]
    fn extra_keys_are_ignored() {
        let item = item_from(r#"{"year": 1, "title": "t", "id": "i", "rating": 5}"#).unwrap();

        assert_eq!(item.id, "i");
    }

    #[test]
    fn missing_keys_are_named() {
        let error = item_from(r#"{"year": 1999, "title": "The Matrix"}"#).unwrap_err();
        assert!(matches!(error, IngestError::MissingField("id")));

        let error = item_from(r#"{"title": "The Matrix", "id": "abc-1"}"#).unwrap_err();
        assert!(matches!(error, IngestError::MissingField("year")));
    }

    #[test]
    fn non_numeric_year_is_rejected() {
        for body in [
            r#"{"year": "nineteen", "title": "t", "id": "i"}"#,
            r#"{"year": true, "title": "t", "id": "i"}"#,
            r#"{"year": null, "title": "t", "id": "i"}"#,
        ] {
            let error = item_from(body).unwrap_err();
            assert!(matches!(error, IngestError::InvalidField { field: "year", .. }), "{}", body);
        }
    }

    #[test]
    fn large_integers_keep_every_digit() {
        let item = item_from(
            r#"{"year": 123456789012345678901, "title": "t", "id": 98765432109876543210987}"#,
        )
        .unwrap();

        assert_eq!(item.year, "123456789012345678901");
        assert_eq!(item.id, "98765432109876543210987");

        let other = item_from(
            r#"{"year": 1, "title": "t", "id": 98765432109876543210988}"#,
        )
        .unwrap();
        assert_ne!(item.id, other.id);
    }

    #[test]
    fn literals_render_as_text() {
        let item = item_from(r#"{"year": 1999, "title": true, "id": null}"#).unwrap();
        assert_eq!(item.title, "True");
        assert_eq!(item.id, "None");

        let item = item_from(r#"{"year": 1999, "title": false, "id": 1.5}"#).unwrap();
        assert_eq!(item.title, "False");
        assert_eq!(item.id, "1.5");
    }

    #[test]
    fn nested_values_render_as_text() {
        let item = item_from(
            r#"{"year": 1, "title": ["a", 1, null, "it's"], "id": {"k": {"n": false}}}"#,
        )
        .unwrap();

        assert_eq!(item.title, r#"['a', 1, None, "it's"]"#);
        assert_eq!(item.id, "{'k': {'n': False}}");
    }

    #[test]
    fn malformed_or_non_object_bodies_fail_to_parse() {
        for body in ["{not json", "[1, 2, 3]", "\"text\""] {
            let error = MediaItemPayload::parse(body.as_bytes()).unwrap_err();
            assert!(matches!(error, IngestError::MalformedPayload(_)), "{}", body);
        }
    }

    #[test]
    fn default_item_uses_fresh_v4_ids() {
        let first = MediaItem::with_generated_id();
        let second = MediaItem::with_generated_id();

        assert_eq!(first.year, DEFAULT_YEAR);
        assert_eq!(first.title, DEFAULT_TITLE);
        assert_eq!(Uuid::parse_str(&first.id).unwrap().get_version_num(), 4);
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn attributes_use_number_and_string_types() {
        let attributes = MediaItem::default_with_id("abc".to_owned()).to_attributes();

        assert_eq!(attributes.len(), 3);
        assert_eq!(attributes["year"], AttributeValue::N("2012".to_owned()));
        assert_eq!(
            attributes["title"],
            AttributeValue::S("The Amazing Spider-Man 2".to_owned())
        );
        assert_eq!(attributes["id"], AttributeValue::S("abc".to_owned()));
    }
}
