use crate::db::NoteStore;
use crate::errors::{StoreError, StoreResult};
use crate::models::{MoodNote, NoteUpdate};

/// What happened to a version-checked edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    Updated(MoodNote),
    /// The note no longer exists
    Deleted,
    /// Someone else saved first; `current` is what is stored now
    Conflict { current: MoodNote },
}

/// Apply an edit and, if the conditional update matched nothing, re-fetch the
/// note to tell a deletion apart from a concurrent modification.
pub fn apply_edit(store: &NoteStore, update: &NoteUpdate) -> StoreResult<EditOutcome> {
    match store.update(update) {
        Ok(note) => Ok(EditOutcome::Updated(note)),
        Err(StoreError::NotFoundOrConflict) => match store.get(update.id) {
            Ok(current) => Ok(EditOutcome::Conflict { current }),
            Err(StoreError::NotFound) => Ok(EditOutcome::Deleted),
            Err(e) => Err(e),
        },
        Err(StoreError::NotFound) => Ok(EditOutcome::Deleted),
        Err(e) => Err(e),
    }
}
