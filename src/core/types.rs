use super::Value;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

/// Storage form of a row: values aligned to the table's column order.
pub type Row = Vec<Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    #[default]
    String,
    Number,
    Boolean,
    Array,
    Date,
}

impl ColumnType {
    pub const ALL: [ColumnType; 5] = [
        Self::String,
        Self::Number,
        Self::Boolean,
        Self::Array,
        Self::Date,
    ];

    /// Trimmed, case-insensitive lookup; anything unrecognised is `String`.
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "number" => Self::Number,
            "boolean" => Self::Boolean,
            "array" => Self::Array,
            "date" => Self::Date,
            _ => Self::String,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Date => "date",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A sanitized column. Only the schema sanitizer builds these from raw input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    /// Present only on `number` columns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl Column {
    pub fn is_auto_increment(&self) -> bool {
        self.column_type == ColumnType::Number && self.ai == Some(true)
    }
}

/// Unvalidated column declaration, as found in a loaded document or passed
/// to table creation.
///
/// Every field is optional so that malformed declarations can be read and
/// then dropped by the sanitizer instead of failing the whole document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ColumnSpec {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub column_type: Option<String>,
    pub ai: Option<JsonValue>,
    pub default: Option<Value>,
}

impl ColumnSpec {
    pub fn new(name: impl Into<String>, column_type: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            column_type: Some(column_type.into()),
            ai: None,
            default: None,
        }
    }

    pub fn auto_increment(mut self) -> Self {
        self.ai = Some(JsonValue::Bool(true));
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }
}

/// Keyed view of a row, in column order.
///
/// Views are what predicates see and what `get`/`first` return; they are
/// also the input shape for `insert` and `update`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RowView {
    entries: Vec<(String, Value)>,
}

impl RowView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Sets `key`, keeping its original position when already present.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reads a JSON object into a view; anything else yields an empty view.
    pub fn from_json(json: &JsonValue) -> Self {
        json.as_object()
            .map(|map| {
                map.iter()
                    .map(|(k, v)| (k.clone(), Value::from_json(v)))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn to_json(&self) -> JsonValue {
        JsonValue::Object(
            self.entries
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for RowView {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut view = Self::new();
        for (k, v) in iter {
            view.insert(k, v);
        }
        view
    }
}

impl<K: Into<String>, V: Into<Value>, const N: usize> From<[(K, V); N]> for RowView {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl Serialize for RowView {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}
