pub mod ddl;
pub mod dml;
pub mod query;
pub mod sort;
mod delete;
mod update;

pub use ddl::Tables;
pub use dml::TableHandle;
pub use query::{OrderedQuery, Query};
pub use sort::{SortDirection, SortKey};
