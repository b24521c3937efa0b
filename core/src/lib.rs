#![deny(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

pub mod db;
pub mod edit;
pub mod errors;
pub mod models;
pub mod schema;
pub mod validator;

// Re-export commonly used types
pub use db::{open_db, open_in_memory, NoteStore, OPERATION_TIMEOUT};
pub use edit::{apply_edit, EditOutcome};
pub use errors::{StoreError, StoreResult};
pub use models::{MoodNote, NoteDraft, NoteUpdate};
pub use validator::{validate_note, Validator};
