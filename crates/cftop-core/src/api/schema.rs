//! API schema - column metadata for the space table.

use serde::Serialize;
use utoipa::ToSchema;

use crate::VERSION;
use crate::attention::AttentionThresholds;
use crate::table::{Column, ColumnKind, ColumnRegistry, SchemaError, SortSpec};
use crate::view::space::{COL_SPACE_NAME, default_space_sort, space_registry};

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TableSchema {
    pub version: String,
    pub name: String,
    /// Column whose raw value uniquely identifies a row.
    pub entity_id: String,
    pub columns: Vec<ColumnSchema>,
    /// Sort chain applied when the client asks for none.
    pub default_sort: Vec<SortSchema>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attention: Option<AttentionSchema>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ColumnSchema {
    /// Key of the value in exported rows.
    pub key: String,
    pub label: String,
    #[serde(rename = "type")]
    pub data_type: DataType,
    /// Display width in terminal columns.
    pub width: usize,
    pub default_visible: bool,
    pub default_descending: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub has_attention: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SortSchema {
    pub key: String,
    pub descending: bool,
}

/// Percent thresholds behind the warm/hot cell states.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AttentionSchema {
    pub warm_percent: f64,
    pub hot_percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Number,
    String,
}

impl From<ColumnKind> for DataType {
    fn from(kind: ColumnKind) -> Self {
        match kind {
            ColumnKind::Alphanumeric => DataType::String,
            ColumnKind::Numeric => DataType::Number,
        }
    }
}

impl<R> From<&Column<R>> for ColumnSchema {
    fn from(c: &Column<R>) -> Self {
        ColumnSchema {
            key: c.key().into(),
            label: c.header().into(),
            data_type: c.kind().into(),
            width: c.width(),
            default_visible: c.default_visible(),
            default_descending: c.default_descending(),
            has_attention: c.has_attention(),
        }
    }
}

impl TableSchema {
    /// Describes every column of `registry`; fails if `default_sort` names an
    /// unknown column.
    pub fn from_registry<R>(
        name: &str,
        entity_id: &str,
        registry: &ColumnRegistry<R>,
        default_sort: &SortSpec,
    ) -> Result<Self, SchemaError> {
        registry.get(entity_id)?;
        let default_sort = default_sort
            .resolve(registry)?
            .into_iter()
            .map(|(column, dir)| SortSchema {
                key: column.key().into(),
                descending: !dir.is_ascending(),
            })
            .collect();

        Ok(TableSchema {
            version: VERSION.into(),
            name: name.into(),
            entity_id: entity_id.into(),
            columns: registry.iter().map(ColumnSchema::from).collect(),
            default_sort,
            attention: None,
        })
    }
}

/// Schema of the space table under `thresholds`.
pub fn space_schema(thresholds: &AttentionThresholds) -> Result<TableSchema, SchemaError> {
    let registry = space_registry(thresholds)?;
    let mut schema =
        TableSchema::from_registry("spaces", COL_SPACE_NAME, &registry, &default_space_sort())?;
    schema.attention = Some(AttentionSchema {
        warm_percent: thresholds.warm(),
        hot_percent: thresholds.hot(),
    });
    Ok(schema)
}
