//! View models: table rows ready for any frontend.

pub mod common;
pub mod space;

pub use common::{TableViewModel, ViewCell, ViewRow, build_table_view};
pub use space::{
    SpaceViewOptions, build_space_view, default_space_sort, select_space_rows, space_columns,
    space_registry,
};
