//! NoteStore — SQLite-backed note persistence
//!
//! Owns the `notes` table and is the single place where required fields and
//! default values are enforced. Rows keep an autoincrement `seq` so listing
//! returns notes in insertion order.

use chrono::{DateTime, Utc};
use notes_types::{CreateNoteRequest, Note, UpdateNoteRequest, DEFAULT_FOLDER};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};

const NOTE_COLUMNS: &str = "id, folder, title, content, created_at, updated_at";

pub struct NoteStore {
    conn: Mutex<Connection>,
}

impl NoteStore {
    /// Open (or create) the note database at `db_path`. `":memory:"` opens a
    /// private in-memory database.
    pub fn open(db_path: &str) -> StoreResult<Self> {
        if db_path == ":memory:" {
            return Self::open_in_memory();
        }

        if let Some(parent) = Path::new(db_path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    StoreError::Unavailable(format!("Failed to create {}: {}", parent.display(), e))
                })?;
            }
        }

        let conn = Connection::open(db_path)?;
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> StoreResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> StoreResult<Self> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS notes (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                id TEXT NOT NULL UNIQUE,
                folder TEXT NOT NULL,
                title TEXT NOT NULL,
                content TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT
            )",
            [],
        )?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub(crate) fn conn(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| StoreError::Unavailable("note store lock poisoned".to_string()))
    }

    /// Validate and persist a new note, assigning its id and creation time
    pub fn insert(&self, payload: CreateNoteRequest) -> StoreResult<Note> {
        let mut missing = Vec::new();
        if is_blank(payload.title.as_deref()) {
            missing.push("title is required");
        }
        if is_blank(payload.content.as_deref()) {
            missing.push("content is required");
        }
        if !missing.is_empty() {
            return Err(StoreError::Validation(missing.join(", ")));
        }

        let note = Note {
            id: Uuid::new_v4().to_string(),
            folder: payload.folder.unwrap_or_else(|| DEFAULT_FOLDER.to_string()),
            title: payload.title.unwrap_or_default(),
            content: payload.content.unwrap_or_default(),
            created_at: Utc::now(),
            updated_at: None,
        };

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO notes (id, folder, title, content, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, NULL)",
            params![
                note.id,
                note.folder,
                note.title,
                note.content,
                note.created_at.to_rfc3339(),
            ],
        )?;

        log::info!("[NOTES] Created note {} in folder '{}'", note.id, note.folder);
        Ok(note)
    }

    /// All notes in insertion order
    pub fn list_all(&self) -> StoreResult<Vec<Note>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!("SELECT {} FROM notes ORDER BY seq ASC", NOTE_COLUMNS))?;

        let notes = stmt
            .query_map([], note_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(notes)
    }

    pub fn find_by_id(&self, id: &str) -> StoreResult<Option<Note>> {
        let id = parse_id(id)?;
        let conn = self.conn()?;
        Ok(select_note(&conn, &id)?)
    }

    /// Merge the supplied fields into an existing note and stamp `updated_at`.
    ///
    /// The merged note must still have a non-empty title and content; a
    /// rejected update leaves the stored row untouched.
    pub fn update_by_id(&self, id: &str, patch: UpdateNoteRequest) -> StoreResult<Option<Note>> {
        let id = parse_id(id)?;
        let conn = self.conn()?;

        let mut note = match select_note(&conn, &id)? {
            Some(note) => note,
            None => return Ok(None),
        };

        if let Some(folder) = patch.folder {
            note.folder = folder;
        }
        if let Some(title) = patch.title {
            note.title = title;
        }
        if let Some(content) = patch.content {
            note.content = content;
        }

        let mut emptied = Vec::new();
        if note.title.trim().is_empty() {
            emptied.push("title must not be empty");
        }
        if note.content.trim().is_empty() {
            emptied.push("content must not be empty");
        }
        if !emptied.is_empty() {
            return Err(StoreError::Validation(emptied.join(", ")));
        }

        // Never stamp an update earlier than the creation time
        let now = Utc::now().max(note.created_at);
        note.updated_at = Some(now);

        conn.execute(
            "UPDATE notes SET folder = ?1, title = ?2, content = ?3, updated_at = ?4 WHERE id = ?5",
            params![note.folder, note.title, note.content, now.to_rfc3339(), note.id],
        )?;

        log::info!("[NOTES] Updated note {}", note.id);
        Ok(Some(note))
    }

    /// Returns `false` when no note had this id
    pub fn delete_by_id(&self, id: &str) -> StoreResult<bool> {
        let id = parse_id(id)?;
        let conn = self.conn()?;
        let count = conn.execute("DELETE FROM notes WHERE id = ?1", params![id])?;

        if count > 0 {
            log::info!("[NOTES] Deleted note {}", id);
        }
        Ok(count > 0)
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map(|s| s.trim().is_empty()).unwrap_or(true)
}

/// Normalize an id to the canonical hyphenated form stored in the table
fn parse_id(id: &str) -> StoreResult<String> {
    Uuid::parse_str(id.trim())
        .map(|uuid| uuid.to_string())
        .map_err(|_| StoreError::InvalidId(id.to_string()))
}

fn select_note(conn: &Connection, id: &str) -> rusqlite::Result<Option<Note>> {
    conn.query_row(
        &format!("SELECT {} FROM notes WHERE id = ?1", NOTE_COLUMNS),
        params![id],
        note_from_row,
    )
    .optional()
}

fn note_from_row(row: &Row<'_>) -> rusqlite::Result<Note> {
    let created_at_str: String = row.get(4)?;
    let updated_at_str: Option<String> = row.get(5)?;

    Ok(Note {
        id: row.get(0)?,
        folder: row.get(1)?,
        title: row.get(2)?,
        content: row.get(3)?,
        created_at: parse_timestamp(4, &created_at_str)?,
        updated_at: updated_at_str
            .map(|s| parse_timestamp(5, &s))
            .transpose()?,
    })
}

fn parse_timestamp(column: usize, value: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(e))
        })
}
