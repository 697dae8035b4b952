//! ratatui adapter for [`TableViewModel`](crate::view::TableViewModel).
//!
//! Only maps view models to widgets; terminal setup, input and redraw
//! scheduling belong to the embedding application.

pub mod style;
pub mod table;

pub use style::{Styles, Theme};
pub use table::to_table;
