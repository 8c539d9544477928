//! Core value types.
//!
//! These types enforce their invariants at construction time, so a
//! resolved endpoint or a batch path can never carry an invalid segment.

mod api_base;
mod class_name;
mod endpoints;
mod object_id;
mod page;

pub use api_base::ApiBase;
pub use class_name::ClassName;
pub use endpoints::Endpoints;
pub use object_id::ObjectId;
pub use page::{PAGE_SIZE, Page};
