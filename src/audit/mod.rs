//! Audit logging for expense changes
//!
//! Every create, update and delete is appended to `audit.log` as one JSON
//! line holding the timestamp, the operation, the expense id and the
//! before/after values.
//!
//! - `AuditEntry`: a single record
//! - `AuditLogger`: appends entries to the log and reads them back

mod entry;
mod logger;

pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
