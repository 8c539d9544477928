//! Batch operations.
//!
//! A list of logical operations is encoded into a single
//! `{"requests": [...]}` envelope, and the server's response array is
//! reconciled back into one outcome per operation, index for index.

mod operation;
mod outcome;

pub use operation::{BatchRequest, Operation, SubRequest, SubRequestParams};
pub use outcome::{
    BatchOutcome, OperationFailure, Outcome, first_result, into_record, reconcile,
};
