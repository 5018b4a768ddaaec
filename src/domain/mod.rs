//! Student record types and the pure validation rules applied to them.

pub mod entry;
pub mod validation;

pub use entry::{Entry, EntryFields, EntryForm};
pub use validation::{validate, ValidationError};
