pub mod search;
pub mod types;

pub use search::{PropertySearch, RawPropertySearch};
pub use types::{FilterError, SortDirection, SortField, SqlQuery};
