//! Table items and the conversion of request bodies into them.
//!
//! Items travel in the table's typed attribute form (`{"id": {"S": "123"}}`).
//! Items written through this service always carry string-typed attributes:
//! every JSON value of a put body is rendered to text first, see [`stringify`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use thiserror::Error;

/// Name of the partition key attribute of the table.
pub const ID_ATTRIBUTE: &str = "id";

pub type Item = BTreeMap<String, AttrValue>;

/// One typed attribute value, serialized the way the table service
/// represents it on the wire. Binary values are kept base64 encoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttrValue {
    S(String),
    N(String),
    B(String),
    #[serde(rename = "BOOL")]
    Bool(bool),
    #[serde(rename = "NULL")]
    Null(bool),
    L(Vec<AttrValue>),
    M(BTreeMap<String, AttrValue>),
    SS(Vec<String>),
    NS(Vec<String>),
    BS(Vec<String>),
}

impl AttrValue {
    pub fn as_s(&self) -> Option<&str> {
        match self {
            Self::S(s) => Some(s),
            _ => None,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ItemError {
    #[error("Request body is empty, expected a JSON object containing '{ID_ATTRIBUTE}'")]
    EmptyBody,

    #[error("Invalid JSON body: {0}")]
    Malformed(String),

    #[error("Item must be a JSON object")]
    NotAnObject,

    #[error("Item must contain '{ID_ATTRIBUTE}'")]
    MissingId,
}

/// Parses a put-item request body into a string-typed item.
///
/// Rejects the body before anything is sent to the table: it must be a JSON
/// object with an `id` key.
pub fn parse_put_body(body: &[u8]) -> Result<Item, ItemError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ItemError::EmptyBody);
    }
    let value: Value =
        serde_json::from_slice(body).map_err(|e| ItemError::Malformed(e.to_string()))?;
    let Value::Object(fields) = value else {
        return Err(ItemError::NotAnObject);
    };
    if !fields.contains_key(ID_ATTRIBUTE) {
        return Err(ItemError::MissingId);
    }

    Ok(fields
        .iter()
        .map(|(name, value)| (name.clone(), AttrValue::S(stringify(value))))
        .collect())
}

/// Renders a JSON value as the text stored in a string attribute.
///
/// Strings are stored as is. Everything else uses the rendering the table
/// already holds for existing rows: `True`/`False`, `None`, `5`, `5.0`,
/// `[1, 'a']`, `{'k': True}`.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => repr(other),
    }
}

fn repr(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => number(n),
        Value::String(s) => quote(s),
        Value::Array(values) => {
            let inner: Vec<String> = values.iter().map(repr).collect();
            format!("[{}]", inner.join(", "))
        }
        Value::Object(fields) => object(fields),
    }
}

fn object(fields: &Map<String, Value>) -> String {
    let inner: Vec<String> = fields
        .iter()
        .map(|(k, v)| format!("{}: {}", quote(k), repr(v)))
        .collect();
    format!("{{{}}}", inner.join(", "))
}

fn number(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    n.as_f64().map_or_else(|| n.to_string(), float)
}

// Shortest round-trip digits, always with a fractional part or an exponent.
fn float(f: f64) -> String {
    if f.is_nan() {
        return "nan".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let magnitude = f.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        let sci = format!("{f:e}");
        return match sci.split_once('e') {
            Some((mantissa, exp)) => {
                let exp: i32 = exp.parse().unwrap_or(0);
                let sign = if exp < 0 { '-' } else { '+' };
                format!("{mantissa}e{sign}{:02}", exp.abs())
            }
            None => sci,
        };
    }

    let plain = f.to_string();
    if plain.contains('.') {
        plain
    } else {
        format!("{plain}.0")
    }
}

fn quote(s: &str) -> String {
    let delimiter = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };
    let mut out = String::with_capacity(s.len() + 2);
    out.push(delimiter);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == delimiter => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(delimiter);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalars_render_as_stored_text() {
        assert_eq!(stringify(&json!("abc")), "abc");
        assert_eq!(stringify(&json!(5)), "5");
        assert_eq!(stringify(&json!(-12)), "-12");
        assert_eq!(stringify(&json!(2.5)), "2.5");
        assert_eq!(stringify(&json!(5.0)), "5.0");
        assert_eq!(stringify(&json!(true)), "True");
        assert_eq!(stringify(&json!(false)), "False");
        assert_eq!(stringify(&Value::Null), "None");
    }

    #[test]
    fn extreme_floats_switch_to_exponent_form() {
        assert_eq!(stringify(&json!(1e16)), "1e+16");
        assert_eq!(stringify(&json!(0.00001)), "1e-05");
        assert_eq!(stringify(&json!(0.0001)), "0.0001");
    }

    #[test]
    fn nested_values_quote_their_strings() {
        assert_eq!(stringify(&json!([1, "a", null])), "[1, 'a', None]");
        assert_eq!(stringify(&json!({"k": true})), "{'k': True}");
        assert_eq!(stringify(&json!(["it's"])), "[\"it's\"]");
        assert_eq!(stringify(&json!({})), "{}");
    }

    #[test]
    fn put_body_values_are_all_string_typed() {
        let item = parse_put_body(br#"{"id": "123", "count": 5}"#).unwrap();
        let expected: Item = [
            ("id".to_string(), AttrValue::S("123".to_string())),
            ("count".to_string(), AttrValue::S("5".to_string())),
        ]
        .into_iter()
        .collect();
        assert_eq!(item, expected);
        assert_eq!(
            serde_json::to_value(&item).unwrap(),
            json!({"id": {"S": "123"}, "count": {"S": "5"}})
        );
    }

    #[test]
    fn numeric_id_is_accepted_and_stringified() {
        let item = parse_put_body(br#"{"id": 7}"#).unwrap();
        assert_eq!(item[ID_ATTRIBUTE].as_s(), Some("7"));
    }

    #[test]
    fn invalid_bodies_are_rejected() {
        assert_eq!(parse_put_body(b""), Err(ItemError::EmptyBody));
        assert_eq!(parse_put_body(b"  \n"), Err(ItemError::EmptyBody));
        assert!(matches!(
            parse_put_body(b"{not json"),
            Err(ItemError::Malformed(_))
        ));
        assert_eq!(parse_put_body(b"[1, 2]"), Err(ItemError::NotAnObject));
        assert_eq!(
            parse_put_body(br#"{"name": "Test Item"}"#),
            Err(ItemError::MissingId)
        );
    }

    #[test]
    fn typed_attributes_use_wire_tags() {
        let value = AttrValue::M(
            [
                ("flag".to_string(), AttrValue::Bool(true)),
                ("none".to_string(), AttrValue::Null(true)),
                ("tags".to_string(), AttrValue::SS(vec!["a".to_string()])),
            ]
            .into_iter()
            .collect(),
        );
        assert_eq!(
            serde_json::to_value(&value).unwrap(),
            json!({"M": {"flag": {"BOOL": true}, "none": {"NULL": true}, "tags": {"SS": ["a"]}}})
        );
    }
}
