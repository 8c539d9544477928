//! Core traits.

mod table;

pub use table::{Patch, Table};
