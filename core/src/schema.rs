use rusqlite::Connection;

/// SQL schema for the mood notes database
pub const SCHEMA_V1: &str = r#"
CREATE TABLE IF NOT EXISTS mood_notes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL,
    title TEXT NOT NULL,
    content TEXT NOT NULL,
    version INTEGER NOT NULL DEFAULT 1
);

CREATE INDEX IF NOT EXISTS idx_mood_notes_created_at ON mood_notes(created_at);

PRAGMA user_version = 1;
"#;

/// Latest schema version known to this build
pub const CURRENT_VERSION: i32 = 1;

/// Get current schema version from database
pub fn get_schema_version(conn: &Connection) -> Result<i32, rusqlite::Error> {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
}

/// Run migrations to bring database to current schema version
pub fn migrate(conn: &Connection) -> Result<(), rusqlite::Error> {
    let mut version = get_schema_version(conn)?;

    if version == 0 {
        // Fresh database - apply v1 schema
        conn.execute_batch(SCHEMA_V1)?;
        version = 1;
    }

    if version == CURRENT_VERSION {
        Ok(())
    } else {
        // Written by a newer build, refuse to touch it
        Err(rusqlite::Error::InvalidQuery)
    }
}
