//! Ordered, keyed column set plus the sort specification that drives it.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::str::FromStr;

use tracing::{debug, trace, warn};

use super::{Column, SchemaError};

/// Sort direction of one sort column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Direction a column sorts in when first selected.
    pub fn default_for<R>(column: &Column<R>) -> Self {
        if column.default_descending() {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Applies the direction to an ascending ordering.
    pub fn apply(self, ord: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    }

    pub fn is_ascending(self) -> bool {
        self == SortDirection::Ascending
    }
}

/// One entry of a sort chain. `direction: None` means the column's default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortColumn {
    pub key: String,
    pub direction: Option<SortDirection>,
}

impl SortColumn {
    pub fn new(key: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            key: key.into(),
            direction: Some(direction),
        }
    }

    /// Sort by `key` in the column's default direction.
    pub fn by_default(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: None,
        }
    }
}

/// Parses `KEY`, `KEY:asc` or `KEY:desc`.
impl FromStr for SortColumn {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (key, direction) = match s.rsplit_once(':') {
            Some((key, dir)) => {
                let direction = match dir.to_ascii_lowercase().as_str() {
                    "asc" | "a" => SortDirection::Ascending,
                    "desc" | "d" => SortDirection::Descending,
                    _ => return Err(SchemaError::InvalidSort(s.to_string())),
                };
                (key, Some(direction))
            }
            None => (s, None),
        };
        if key.is_empty() {
            return Err(SchemaError::InvalidSort(s.to_string()));
        }
        Ok(Self {
            key: key.to_string(),
            direction,
        })
    }
}

/// Ordered sort chain: the first entry is the active sort column, the rest
/// break ties.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortSpec {
    columns: Vec<SortColumn>,
}

impl SortSpec {
    pub fn new(columns: Vec<SortColumn>) -> Self {
        Self { columns }
    }

    /// Appends a tie-breaker.
    pub fn then(mut self, column: SortColumn) -> Self {
        self.columns.push(column);
        self
    }

    /// The active sort column.
    pub fn primary(&self) -> Option<&SortColumn> {
        self.columns.first()
    }

    pub fn columns(&self) -> &[SortColumn] {
        &self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Makes `key` the active sort column. Re-selecting the active column
    /// flips its direction; selecting another column uses its default
    /// direction and keeps the old chain as tie-breakers.
    pub fn select<R>(
        &mut self,
        registry: &ColumnRegistry<R>,
        key: &str,
    ) -> Result<(), SchemaError> {
        let column = registry.get(key)?;
        let resolved = self.resolve(registry)?;
        match resolved.first() {
            Some((active, dir)) if active.key() == key => {
                let flipped = dir.toggle();
                self.columns[0].direction = Some(flipped);
            }
            _ => {
                self.columns.retain(|c| c.key != key);
                self.columns
                    .insert(0, SortColumn::new(key, SortDirection::default_for(column)));
            }
        }
        Ok(())
    }

    /// Validates every key against `registry` and fills default directions.
    pub fn resolve<'r, R>(
        &self,
        registry: &'r ColumnRegistry<R>,
    ) -> Result<Vec<(&'r Column<R>, SortDirection)>, SchemaError> {
        self.columns
            .iter()
            .map(|sc| {
                let column = registry.get(&sc.key)?;
                let direction = sc
                    .direction
                    .unwrap_or_else(|| SortDirection::default_for(column));
                Ok((column, direction))
            })
            .collect()
    }
}

/// Ordered set of columns with unique keys. Built once at startup.
pub struct ColumnRegistry<R> {
    columns: Vec<Column<R>>,
}

impl<R> Default for ColumnRegistry<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> std::fmt::Debug for ColumnRegistry<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.columns.iter()).finish()
    }
}

impl<R> ColumnRegistry<R> {
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
        }
    }

    /// Builds a registry from columns in display order.
    pub fn from_columns(
        columns: impl IntoIterator<Item = Column<R>>,
    ) -> Result<Self, SchemaError> {
        let mut registry = Self::new();
        for column in columns {
            registry.register(column)?;
        }
        debug!(columns = registry.len(), "column registry built");
        Ok(registry)
    }

    /// Appends a column. Keys must be unique.
    pub fn register(&mut self, column: Column<R>) -> Result<(), SchemaError> {
        if self.position(column.key()).is_some() {
            warn!(key = column.key(), "rejected duplicate column registration");
            return Err(SchemaError::DuplicateKey(column.key().to_string()));
        }
        self.columns.push(column);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<&Column<R>, SchemaError> {
        self.columns
            .iter()
            .find(|c| c.key() == key)
            .ok_or_else(|| SchemaError::UnknownColumn(key.to_string()))
    }

    pub fn position(&self, key: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.key() == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Column<R>> {
        self.columns.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns.iter().map(|c| c.key())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Columns shown when the user has not picked any, in display order.
    pub fn default_visible(&self) -> Vec<&Column<R>> {
        self.columns.iter().filter(|c| c.default_visible()).collect()
    }

    /// Resolves an explicit column selection, keeping the given order.
    pub fn select<S: AsRef<str>>(&self, keys: &[S]) -> Result<Vec<&Column<R>>, SchemaError> {
        keys.iter().map(|k| self.get(k.as_ref())).collect()
    }

    /// Stable full re-sort of `rows` by `spec`.
    ///
    /// The sort chain is resolved before any row is touched, so an unknown key
    /// leaves `rows` unchanged.
    pub fn sort<T>(&self, rows: &mut [T], spec: &SortSpec) -> Result<(), SchemaError>
    where
        T: Borrow<R>,
    {
        let chain = spec.resolve(self)?;
        trace!(rows = rows.len(), sort = ?spec.columns(), "sorting rows");
        rows.sort_by(|a, b| {
            let (a, b): (&R, &R) = (a.borrow(), b.borrow());
            chain
                .iter()
                .map(|(column, dir)| dir.apply(column.compare(a, b)))
                .find(|ord| *ord != Ordering::Equal)
                .unwrap_or(Ordering::Equal)
        });
        Ok(())
    }
}
