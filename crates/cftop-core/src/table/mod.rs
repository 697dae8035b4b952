//! Generic column model: typed accessors bound into column definitions.
//!
//! A [`Column`] owns four operations over a row type `R` (compare, display,
//! raw value, optional attention). The concrete field access is captured at
//! construction time, so the table never inspects row types at runtime.

mod registry;

pub use registry::*;

use std::cmp::Ordering;

use crate::attention::Attention;
use crate::fmt::{cmp_ignore_case, fit_left, fit_right};

pub type CompareFn<R> = Box<dyn Fn(&R, &R) -> Ordering + Send + Sync>;
pub type TextFn<R> = Box<dyn Fn(&R) -> String + Send + Sync>;
pub type AttentionFn<R> = Box<dyn Fn(&R) -> Attention + Send + Sync>;

/// Schema misuse, reported while the table is being set up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// Two columns registered under the same key.
    DuplicateKey(String),
    /// Lookup of a key that was never registered.
    UnknownColumn(String),
    /// Column built without a comparator.
    MissingComparator(String),
    /// Column built without a display formatter.
    MissingFormatter(String),
    /// Column built without a raw value extractor.
    MissingRawValue(String),
    /// Column declared with zero display width.
    ZeroWidth(String),
    /// Unparseable sort specification.
    InvalidSort(String),
}

impl std::fmt::Display for SchemaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaError::DuplicateKey(key) => write!(f, "column '{}' registered twice", key),
            SchemaError::UnknownColumn(key) => write!(f, "unknown column '{}'", key),
            SchemaError::MissingComparator(key) => {
                write!(f, "column '{}' has no comparator", key)
            }
            SchemaError::MissingFormatter(key) => {
                write!(f, "column '{}' has no display formatter", key)
            }
            SchemaError::MissingRawValue(key) => {
                write!(f, "column '{}' has no raw value extractor", key)
            }
            SchemaError::ZeroWidth(key) => write!(f, "column '{}' has zero width", key),
            SchemaError::InvalidSort(spec) => write!(f, "invalid sort specification '{}'", spec),
        }
    }
}

impl std::error::Error for SchemaError {}

/// Column value type; drives default alignment and sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Text, left-aligned.
    Alphanumeric,
    /// Numbers, right-aligned.
    Numeric,
}

impl ColumnKind {
    /// Pads or clips `text` to exactly `width` characters.
    pub fn align(self, text: &str, width: usize) -> String {
        match self {
            ColumnKind::Alphanumeric => fit_left(text, width),
            ColumnKind::Numeric => fit_right(text, width),
        }
    }
}

/// One table field: metadata plus the four operations over `R`.
pub struct Column<R> {
    key: &'static str,
    header: &'static str,
    width: usize,
    kind: ColumnKind,
    default_visible: bool,
    default_descending: bool,
    compare: CompareFn<R>,
    display: TextFn<R>,
    raw_value: TextFn<R>,
    attention: Option<AttentionFn<R>>,
}

impl<R> std::fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("header", &self.header)
            .field("width", &self.width)
            .field("kind", &self.kind)
            .field("default_visible", &self.default_visible)
            .field("default_descending", &self.default_descending)
            .field("attention", &self.attention.is_some())
            .finish()
    }
}

impl<R: 'static> Column<R> {
    pub fn builder(
        key: &'static str,
        header: &'static str,
        width: usize,
        kind: ColumnKind,
    ) -> ColumnBuilder<R> {
        ColumnBuilder {
            key,
            header,
            width,
            kind,
            default_visible: true,
            default_descending: kind == ColumnKind::Numeric,
            compare: None,
            display: None,
            raw_value: None,
            attention: None,
        }
    }
}

impl<R> Column<R> {
    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn header(&self) -> &'static str {
        self.header
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn kind(&self) -> ColumnKind {
        self.kind
    }

    pub fn default_visible(&self) -> bool {
        self.default_visible
    }

    pub fn default_descending(&self) -> bool {
        self.default_descending
    }

    pub fn has_attention(&self) -> bool {
        self.attention.is_some()
    }

    /// Ascending order of two rows by this column.
    pub fn compare(&self, a: &R, b: &R) -> Ordering {
        (self.compare)(a, b)
    }

    /// Strict-less for ascending sort.
    pub fn less(&self, a: &R, b: &R) -> bool {
        self.compare(a, b) == Ordering::Less
    }

    /// Cell text, exactly [`width`](Self::width) characters.
    pub fn display(&self, row: &R) -> String {
        self.kind.align(&(self.display)(row), self.width)
    }

    /// Unpadded full-precision value, for export.
    pub fn raw_value(&self, row: &R) -> String {
        (self.raw_value)(row)
    }

    /// Severity of the cell, `None` if the column never asks for attention.
    pub fn attention(&self, row: &R) -> Option<Attention> {
        self.attention.as_ref().map(|f| f(row))
    }

    /// Header text aligned like the column's values.
    pub fn header_cell(&self) -> String {
        self.kind.align(self.header, self.width)
    }
}

/// Builder for [`Column`]; `build` fails if an operation is missing.
pub struct ColumnBuilder<R> {
    key: &'static str,
    header: &'static str,
    width: usize,
    kind: ColumnKind,
    default_visible: bool,
    default_descending: bool,
    compare: Option<CompareFn<R>>,
    display: Option<TextFn<R>>,
    raw_value: Option<TextFn<R>>,
    attention: Option<AttentionFn<R>>,
}

impl<R: 'static> ColumnBuilder<R> {
    /// Hides the column unless explicitly selected.
    pub fn hidden(mut self) -> Self {
        self.default_visible = false;
        self
    }

    /// Overrides the default sort direction (numeric columns sort descending).
    pub fn default_descending(mut self, descending: bool) -> Self {
        self.default_descending = descending;
        self
    }

    pub fn compare<F>(mut self, f: F) -> Self
    where
        F: Fn(&R, &R) -> Ordering + Send + Sync + 'static,
    {
        self.compare = Some(Box::new(f));
        self
    }

    /// Case-insensitive comparison of a string field.
    pub fn compare_str<F>(self, field: F) -> Self
    where
        F: Fn(&R) -> &str + Send + Sync + 'static,
    {
        self.compare(move |a, b| cmp_ignore_case(field(a), field(b)))
    }

    /// Comparison of an integer field.
    pub fn compare_u64<F>(self, field: F) -> Self
    where
        F: Fn(&R) -> u64 + Send + Sync + 'static,
    {
        self.compare(move |a, b| field(a).cmp(&field(b)))
    }

    /// Total-order comparison of a float field, so NaN cannot break sorting.
    pub fn compare_f64<F>(self, field: F) -> Self
    where
        F: Fn(&R) -> f64 + Send + Sync + 'static,
    {
        self.compare(move |a, b| field(a).total_cmp(&field(b)))
    }

    /// Cell formatter. Its output is padded or clipped to the column width.
    pub fn display<F>(mut self, f: F) -> Self
    where
        F: Fn(&R) -> String + Send + Sync + 'static,
    {
        self.display = Some(Box::new(f));
        self
    }

    pub fn raw_value<F>(mut self, f: F) -> Self
    where
        F: Fn(&R) -> String + Send + Sync + 'static,
    {
        self.raw_value = Some(Box::new(f));
        self
    }

    pub fn attention<F>(mut self, f: F) -> Self
    where
        F: Fn(&R) -> Attention + Send + Sync + 'static,
    {
        self.attention = Some(Box::new(f));
        self
    }

    pub fn build(self) -> Result<Column<R>, SchemaError> {
        let key = self.key;
        if self.width == 0 {
            return Err(SchemaError::ZeroWidth(key.to_string()));
        }
        let compare = self
            .compare
            .ok_or_else(|| SchemaError::MissingComparator(key.to_string()))?;
        let display = self
            .display
            .ok_or_else(|| SchemaError::MissingFormatter(key.to_string()))?;
        let raw_value = self
            .raw_value
            .ok_or_else(|| SchemaError::MissingRawValue(key.to_string()))?;

        Ok(Column {
            key,
            header: self.header,
            width: self.width,
            kind: self.kind,
            default_visible: self.default_visible,
            default_descending: self.default_descending,
            compare,
            display,
            raw_value,
            attention: self.attention,
        })
    }
}
