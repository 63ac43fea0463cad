mod row;
mod sort;

pub use row::{classify_and_format, format_row, Column, DisplayRow};
pub use sort::{compare_passes, sort_key, sort_passes, SortKey, SortState};
