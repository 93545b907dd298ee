//! Collections, records, and integer id coercion.
//!
//! A [`Collection`] is the ordered content of one backing document.
//! Lookups are linear scans in insertion order; the first record whose
//! identity field coerces to the requested integer wins. Identity values
//! are not required to be unique, so removal drops every match.
//!
//! Elements that are not JSON objects are carried through untouched so
//! that a load followed by a save never changes the document's content.
//! They never match a lookup.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One user or post: a JSON object with arbitrary fields.
pub type Record = Map<String, Value>;

/// Largest magnitude accepted when truncating a JSON float to an id.
const FLOAT_ID_LIMIT: f64 = 9.2e18;

/// The full ordered set of records for one resource type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection(Vec<Value>);

impl Collection {
    /// Create an empty collection.
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Wrap already-parsed document elements.
    pub const fn from_values(values: Vec<Value>) -> Self {
        Self(values)
    }

    /// All elements in insertion order.
    pub fn values(&self) -> &[Value] {
        &self.0
    }

    /// Number of elements.
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the collection has no elements.
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Append a record at the end.
    pub fn push(&mut self, record: Record) {
        self.0.push(Value::Object(record));
    }

    /// First record whose `field` coerces to `id`.
    pub fn find(&self, field: &str, id: i64) -> Option<&Record> {
        self.0
            .iter()
            .filter_map(Value::as_object)
            .find(|record| identity_matches(record, field, id))
    }

    /// Mutable access to the first record whose `field` coerces to `id`.
    pub fn find_mut(&mut self, field: &str, id: i64) -> Option<&mut Record> {
        self.0
            .iter_mut()
            .filter_map(Value::as_object_mut)
            .find(|record| identity_matches(record, field, id))
    }

    /// Whether any record's `field` coerces to `id`.
    pub fn contains(&self, field: &str, id: i64) -> bool {
        self.find(field, id).is_some()
    }

    /// Remove every record whose `field` coerces to `id`.
    ///
    /// Returns the number of records removed.
    pub fn remove_all(&mut self, field: &str, id: i64) -> usize {
        let before = self.0.len();
        self.0.retain(|value| {
            value
                .as_object()
                .is_none_or(|record| !identity_matches(record, field, id))
        });
        before.saturating_sub(self.0.len())
    }

    /// Consume the collection into a JSON array.
    pub fn into_value(self) -> Value {
        Value::Array(self.0)
    }
}

impl From<Vec<Value>> for Collection {
    fn from(values: Vec<Value>) -> Self {
        Self(values)
    }
}

fn identity_matches(record: &Record, field: &str, id: i64) -> bool {
    record.get(field).and_then(coerce_id) == Some(id)
}

/// Parse the leading integer of a string.
///
/// Leading whitespace is skipped, an optional `+` or `-` is accepted, and
/// parsing stops at the first non-digit. Returns `None` when no digit
/// follows or the value does not fit in an `i64`.
///
/// `"42"`, `" 42"`, `"42abc"` and `"42.9"` all yield `42`; `"abc"` and
/// `""` yield `None`.
pub fn parse_id(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let sign_len = usize::from(trimmed.starts_with(['+', '-']));
    let digits = trimmed.get(sign_len..)?;
    let digit_len = digits.bytes().take_while(u8::is_ascii_digit).count();
    if digit_len == 0 {
        return None;
    }
    trimmed.get(..sign_len.saturating_add(digit_len))?.parse().ok()
}

/// Coerce a JSON value to an integer identity.
///
/// Numbers are truncated toward zero, strings go through [`parse_id`],
/// and every other value has no integer identity.
pub fn coerce_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().and_then(truncate_float)),
        Value::String(text) => parse_id(text),
        _ => None,
    }
}

#[allow(clippy::cast_possible_truncation)]
fn truncate_float(value: f64) -> Option<i64> {
    let truncated = value.trunc();
    (truncated.is_finite() && truncated.abs() <= FLOAT_ID_LIMIT).then_some(truncated as i64)
}
