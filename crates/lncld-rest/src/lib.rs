//! lncld-rest - REST-backed table implementation.

mod client;
mod table;

pub use table::RestTable;
