pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::controller::{ClientState, EntryController, SubmitOutcome};
pub use domain::entry::{Entry, EntryFields, EntryForm};
pub use domain::validation::ValidationError;
pub use storage::{EntryStore, MemoryEntryStore, PostgresEntryStore, StoreError};
pub use transport::client::{ApiError, EntryApi, HttpEntryApi};
