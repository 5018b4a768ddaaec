pub mod controller;

pub use controller::{ClientState, EntryController, SubmitOutcome};
