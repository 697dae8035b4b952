//! UI-agnostic view model types.
//!
//! These types carry presentation data without any dependency on a specific
//! rendering framework. The TUI adapter maps them to ratatui styles, the CLI
//! to ANSI colors.

use crate::attention::Attention;
use crate::table::{Column, SortDirection};

/// A single table cell: fixed-width text plus the column's severity, if the
/// column classifies at all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewCell {
    pub text: String,
    /// `None` = the column never asks for attention.
    pub attention: Option<Attention>,
}

impl ViewCell {
    pub fn plain(text: String) -> Self {
        Self {
            text,
            attention: None,
        }
    }

    pub fn with_attention(text: String, attention: Attention) -> Self {
        Self {
            text,
            attention: Some(attention),
        }
    }
}

/// One table row, parameterized by entity ID type.
#[derive(Debug, Clone)]
pub struct ViewRow<Id> {
    pub id: Id,
    pub cells: Vec<ViewCell>,
    /// Worst cell severity in the row.
    pub style: Attention,
}

/// Complete table ready to be rendered by any frontend.
#[derive(Debug, Clone)]
pub struct TableViewModel<Id> {
    pub title: String,
    pub headers: Vec<String>,
    pub widths: Vec<u16>,
    pub rows: Vec<ViewRow<Id>>,
    /// Index of the active sort column among the visible columns.
    pub sort_column: Option<usize>,
    pub sort_ascending: bool,
}

/// Renders already filtered and sorted rows through `columns`.
///
/// `sort` is the active sort column and direction, used for the header
/// indicator only; sorting itself belongs to the registry.
pub fn build_table_view<R, Id>(
    title: String,
    columns: &[&Column<R>],
    rows: &[&R],
    sort: Option<(&Column<R>, SortDirection)>,
    id: impl Fn(&R) -> Id,
) -> TableViewModel<Id> {
    let rows = rows
        .iter()
        .map(|row| {
            let cells: Vec<ViewCell> = columns
                .iter()
                .map(|c| ViewCell {
                    text: c.display(row),
                    attention: c.attention(row),
                })
                .collect();
            let style = cells
                .iter()
                .filter_map(|c| c.attention)
                .max()
                .unwrap_or_default();
            ViewRow {
                id: id(row),
                cells,
                style,
            }
        })
        .collect();

    let sort_column =
        sort.and_then(|(active, _)| columns.iter().position(|c| c.key() == active.key()));

    TableViewModel {
        title,
        headers: columns.iter().map(|c| c.header_cell()).collect(),
        widths: columns
            .iter()
            .map(|c| u16::try_from(c.width()).unwrap_or(u16::MAX))
            .collect(),
        rows,
        sort_column,
        sort_ascending: sort.is_none_or(|(_, dir)| dir.is_ascending()),
    }
}
