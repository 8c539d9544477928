//! lncld-core - Core types and traits for the lncld LeanCloud client.
//!
//! This crate holds everything that does not touch the network: validated
//! configuration, endpoint resolution, batch encoding and reconciliation,
//! search query building and the [`Table`] trait whose provided methods
//! implement the derived read, write and search operations.

pub mod batch;
pub mod config;
pub mod credentials;
pub mod error;
pub mod query;
pub mod record;
pub mod response;
pub mod search;
pub mod traits;
pub mod types;

pub use batch::{BatchOutcome, Operation, OperationFailure, Outcome};
pub use config::Config;
pub use credentials::{AppId, AppKey, SessionToken};
pub use error::Error;
pub use query::CollectionQuery;
pub use record::{Record, RecordPage};
pub use search::{SearchQuery, SearchResults};
pub use traits::{Patch, Table};
pub use types::{ApiBase, ClassName, Endpoints, ObjectId, PAGE_SIZE, Page};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
