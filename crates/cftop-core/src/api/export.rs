//! Raw row export: column key → unformatted value, in column order.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::table::{ColumnRegistry, SchemaError};

/// One exported row. Serializes as a JSON object whose keys keep the order
/// the columns were requested in.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRow {
    pub fields: Vec<(&'static str, String)>,
}

impl ExportRow {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl Serialize for ExportRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[derive(Debug)]
pub enum ExportError {
    Schema(SchemaError),
    Json(serde_json::Error),
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportError::Schema(e) => write!(f, "{}", e),
            ExportError::Json(e) => write!(f, "JSON serialization failed: {}", e),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExportError::Schema(e) => Some(e),
            ExportError::Json(e) => Some(e),
        }
    }
}

impl From<SchemaError> for ExportError {
    fn from(e: SchemaError) -> Self {
        ExportError::Schema(e)
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(e: serde_json::Error) -> Self {
        ExportError::Json(e)
    }
}

/// Raw values of `keys` for every row. Unknown keys fail before any row is
/// read.
pub fn export_rows<'a, R: 'a, S: AsRef<str>>(
    registry: &ColumnRegistry<R>,
    keys: &[S],
    rows: impl IntoIterator<Item = &'a R>,
) -> Result<Vec<ExportRow>, SchemaError> {
    let columns = registry.select(keys)?;
    Ok(rows
        .into_iter()
        .map(|row| ExportRow {
            fields: columns
                .iter()
                .map(|c| (c.key(), c.raw_value(row)))
                .collect(),
        })
        .collect())
}

/// [`export_rows`] serialized as a pretty-printed JSON array.
pub fn export_json<'a, R: 'a, S: AsRef<str>>(
    registry: &ColumnRegistry<R>,
    keys: &[S],
    rows: impl IntoIterator<Item = &'a R>,
) -> Result<String, ExportError> {
    let exported = export_rows(registry, keys, rows)?;
    Ok(serde_json::to_string_pretty(&exported)?)
}
