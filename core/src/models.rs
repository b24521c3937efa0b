/// A stored mood note with all metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoodNote {
    /// Assigned by the database, never reused
    pub id: i64,
    /// Unix timestamp in milliseconds
    pub created_at: i64,
    /// Unix timestamp in milliseconds
    pub updated_at: i64,
    pub title: String,
    pub content: String,
    /// Optimistic locking counter, starts at 1
    pub version: i64,
}

/// Candidate title/content submitted by a client, not yet persisted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// An edit against an existing note, carrying the version the client last saw
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteUpdate {
    pub id: i64,
    pub draft: NoteDraft,
    pub version: i64,
}

impl From<&MoodNote> for NoteDraft {
    fn from(note: &MoodNote) -> Self {
        NoteDraft {
            title: note.title.clone(),
            content: note.content.clone(),
        }
    }
}
