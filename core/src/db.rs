use crate::errors::{StoreError, StoreResult};
use crate::models::{MoodNote, NoteDraft, NoteUpdate};
use crate::schema;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::debug;

/// Upper bound for a single store operation waiting on the database
pub const OPERATION_TIMEOUT: Duration = Duration::from_secs(3);

const NOTE_COLUMNS: &str = "id, created_at, updated_at, title, content, version";

/// Open or create a mood notes database at the specified path
pub fn open_db(path: &Path) -> rusqlite::Result<Connection> {
    let conn = Connection::open(path)?;
    prepare(conn)
}

/// Open a private in-memory database (tests, throwaway runs)
pub fn open_in_memory() -> rusqlite::Result<Connection> {
    let conn = Connection::open_in_memory()?;
    prepare(conn)
}

fn prepare(conn: Connection) -> rusqlite::Result<Connection> {
    conn.busy_timeout(OPERATION_TIMEOUT)?;
    schema::migrate(&conn)?;
    Ok(conn)
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

fn map_note(row: &Row<'_>) -> rusqlite::Result<MoodNote> {
    Ok(MoodNote {
        id: row.get(0)?,
        created_at: row.get(1)?,
        updated_at: row.get(2)?,
        title: row.get(3)?,
        content: row.get(4)?,
        version: row.get(5)?,
    })
}

/// Durable CRUD for mood notes with version-checked updates.
///
/// Cloning is cheap; all clones share the one connection handed to
/// [`NoteStore::new`]. Build it once per process and inject it.
#[derive(Clone)]
pub struct NoteStore {
    conn: Arc<Mutex<Connection>>,
}

impl NoteStore {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> StoreResult<T>) -> StoreResult<T> {
        let conn = self.conn.lock().map_err(|_| StoreError::Unavailable)?;
        f(&conn)
    }

    /// Persist a new note. The database assigns id, timestamps and version.
    pub fn insert(&self, draft: &NoteDraft) -> StoreResult<MoodNote> {
        let now = now_millis();

        let note = self.with_conn(|conn| {
            conn.query_row(
                &format!(
                    "INSERT INTO mood_notes (created_at, updated_at, title, content)
                     VALUES (?1, ?1, ?2, ?3)
                     RETURNING {NOTE_COLUMNS}"
                ),
                params![now, draft.title, draft.content],
                map_note,
            )
            .map_err(StoreError::from)
        })?;

        debug!(id = note.id, "Inserted mood note");
        Ok(note)
    }

    /// Get a note by id
    pub fn get(&self, id: i64) -> StoreResult<MoodNote> {
        if id < 1 {
            return Err(StoreError::NotFound);
        }

        self.with_conn(|conn| {
            conn.query_row(
                &format!("SELECT {NOTE_COLUMNS} FROM mood_notes WHERE id = ?1"),
                params![id],
                map_note,
            )
            .optional()?
            .ok_or(StoreError::NotFound)
        })
    }

    /// All notes, newest first
    pub fn get_all(&self) -> StoreResult<Vec<MoodNote>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {NOTE_COLUMNS} FROM mood_notes ORDER BY created_at DESC, id DESC"
            ))?;

            let rows = stmt.query_map([], map_note)?;

            let mut notes = Vec::new();
            for note in rows {
                notes.push(note?);
            }

            Ok(notes)
        })
    }

    /// Conditional write: applies only when both id and version match the
    /// stored row, bumping version by one and refreshing `updated_at`.
    ///
    /// Zero matching rows yields [`StoreError::NotFoundOrConflict`]; this call
    /// alone cannot tell a deleted note from a concurrent edit.
    pub fn update(&self, update: &NoteUpdate) -> StoreResult<MoodNote> {
        if update.id < 1 {
            return Err(StoreError::NotFound);
        }

        let now = now_millis();

        let note = self.with_conn(|conn| {
            conn.query_row(
                &format!(
                    "UPDATE mood_notes
                     SET title = ?1, content = ?2,
                         updated_at = MAX(?3, updated_at + 1),
                         version = version + 1
                     WHERE id = ?4 AND version = ?5
                     RETURNING {NOTE_COLUMNS}"
                ),
                params![
                    update.draft.title,
                    update.draft.content,
                    now,
                    update.id,
                    update.version
                ],
                map_note,
            )
            .optional()?
            .ok_or(StoreError::NotFoundOrConflict)
        })?;

        debug!(id = note.id, version = note.version, "Updated mood note");
        Ok(note)
    }

    /// Permanently remove a note
    pub fn delete(&self, id: i64) -> StoreResult<()> {
        if id < 1 {
            return Err(StoreError::NotFound);
        }

        let rows = self.with_conn(|conn| {
            conn.execute("DELETE FROM mood_notes WHERE id = ?1", params![id])
                .map_err(StoreError::from)
        })?;

        if rows == 0 {
            return Err(StoreError::NotFoundOrAlreadyDeleted);
        }

        debug!(id, "Deleted mood note");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use std::sync::Barrier;
    use std::thread;
    use tempfile::TempDir;

    fn memory_store() -> NoteStore {
        NoteStore::new(open_in_memory().unwrap())
    }

    fn edit(note: &MoodNote, content: &str, version: i64) -> NoteUpdate {
        NoteUpdate {
            id: note.id,
            draft: NoteDraft::new(note.title.clone(), content),
            version,
        }
    }

    #[test]
    fn test_insert_and_get_note() {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("test.db");
        let store = NoteStore::new(open_db(&db_path).unwrap());

        let note = store
            .insert(&NoteDraft::new("Happy", "Had a good day"))
            .unwrap();

        assert!(note.id >= 1);
        assert_eq!(note.version, 1);
        assert_eq!(note.created_at, note.updated_at);

        let retrieved = store.get(note.id).unwrap();

        assert_eq!(retrieved, note);
        assert_eq!(retrieved.title, "Happy");
        assert_eq!(retrieved.content, "Had a good day");
    }

    #[test]
    fn test_get_invalid_or_missing_id() {
        let store = memory_store();

        assert!(matches!(store.get(0), Err(StoreError::NotFound)));
        assert!(matches!(store.get(-5), Err(StoreError::NotFound)));
        assert!(matches!(store.get(999999), Err(StoreError::NotFound)));
    }

    #[test]
    fn test_get_all_empty() {
        let store = memory_store();

        assert!(store.get_all().unwrap().is_empty());
    }

    #[test]
    fn test_get_all_newest_first_and_stable() {
        let store = memory_store();

        let first = store.insert(&NoteDraft::new("one", "1")).unwrap();
        let second = store.insert(&NoteDraft::new("two", "2")).unwrap();
        let third = store.insert(&NoteDraft::new("three", "3")).unwrap();

        let notes = store.get_all().unwrap();
        let ids: Vec<i64> = notes.iter().map(|n| n.id).collect();

        assert_eq!(ids, vec![third.id, second.id, first.id]);
        assert_eq!(store.get_all().unwrap(), notes);
    }

    #[test]
    fn test_update_bumps_version() {
        let store = memory_store();
        let note = store
            .insert(&NoteDraft::new("Happy", "Had a good day"))
            .unwrap();

        let updated = store.update(&edit(&note, "Had a great day", 1)).unwrap();

        assert_eq!(updated.id, note.id);
        assert_eq!(updated.version, 2);
        assert_eq!(updated.content, "Had a great day");
        assert_eq!(updated.created_at, note.created_at);
        assert!(updated.updated_at > note.updated_at);
        assert_eq!(store.get(note.id).unwrap(), updated);
    }

    #[test]
    fn test_update_with_stale_version_is_rejected() {
        let store = memory_store();
        let note = store.insert(&NoteDraft::new("Happy", "v1")).unwrap();

        store.update(&edit(&note, "v2", 1)).unwrap();
        let stale = store.update(&edit(&note, "lost edit", 1));

        assert!(matches!(stale, Err(StoreError::NotFoundOrConflict)));

        let current = store.get(note.id).unwrap();
        assert_eq!(current.version, 2);
        assert_eq!(current.content, "v2");
    }

    #[test]
    fn test_update_missing_note() {
        let store = memory_store();
        let update = NoteUpdate {
            id: 42,
            draft: NoteDraft::new("t", "c"),
            version: 1,
        };

        assert!(matches!(
            store.update(&update),
            Err(StoreError::NotFoundOrConflict)
        ));
    }

    #[test]
    fn test_delete_twice() {
        let store = memory_store();
        let note = store.insert(&NoteDraft::new("t", "c")).unwrap();

        store.delete(note.id).unwrap();

        assert!(matches!(store.get(note.id), Err(StoreError::NotFound)));
        assert!(matches!(
            store.delete(note.id),
            Err(StoreError::NotFoundOrAlreadyDeleted)
        ));
    }

    #[test]
    fn test_delete_nonexistent_and_invalid() {
        let store = memory_store();

        assert!(matches!(
            store.delete(999999),
            Err(StoreError::NotFoundOrAlreadyDeleted)
        ));
        assert!(matches!(store.delete(0), Err(StoreError::NotFound)));
    }

    #[test]
    fn test_ids_are_not_reused() {
        let store = memory_store();

        let first = store.insert(&NoteDraft::new("t", "c")).unwrap();
        store.delete(first.id).unwrap();
        let second = store.insert(&NoteDraft::new("t", "c")).unwrap();

        assert!(second.id > first.id);
    }

    #[test]
    fn test_concurrent_updates_exactly_one_wins() {
        let store = memory_store();
        let note = store.insert(&NoteDraft::new("race", "start")).unwrap();
        let barrier = Arc::new(Barrier::new(2));

        let handles: Vec<_> = ["left", "right"]
            .into_iter()
            .map(|content| {
                let store = store.clone();
                let barrier = barrier.clone();
                let update = edit(&note, content, note.version);
                thread::spawn(move || {
                    barrier.wait();
                    store.update(&update).map(|n| n.content)
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        let winners: Vec<&String> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
        let conflicts = results
            .iter()
            .filter(|r| matches!(r, Err(StoreError::NotFoundOrConflict)))
            .count();

        assert_eq!(winners.len(), 1);
        assert_eq!(conflicts, 1);

        let current = store.get(note.id).unwrap();
        assert_eq!(current.version, 2);
        assert_eq!(&current.content, winners[0]);
    }

    #[test]
    fn test_stale_version_across_connections() {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("shared.db");
        let a = NoteStore::new(open_db(&db_path).unwrap());
        let b = NoteStore::new(open_db(&db_path).unwrap());

        let note = a.insert(&NoteDraft::new("shared", "v1")).unwrap();

        a.update(&edit(&note, "from a", 1)).unwrap();

        assert!(matches!(
            b.update(&edit(&note, "from b", 1)),
            Err(StoreError::NotFoundOrConflict)
        ));
        assert_eq!(b.get(note.id).unwrap().content, "from a");
    }
}
