//! Shared types for the notes service and its HTTP clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Folder assigned to a note created without one
pub const DEFAULT_FOLDER: &str = "random";

// =====================================================
// Request Types
// =====================================================

/// Body of `POST /api/notes/createNote`.
///
/// Title and content are optional here so that a missing field reaches the
/// store and comes back as a validation error instead of a parse error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateNoteRequest {
    #[serde(default)]
    pub folder: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// Body of `PUT /api/notes/:id`. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateNoteRequest {
    #[serde(default)]
    pub folder: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl UpdateNoteRequest {
    pub fn is_empty(&self) -> bool {
        self.folder.is_none() && self.title.is_none() && self.content.is_none()
    }
}

// =====================================================
// Response Types
// =====================================================

/// `{ "message": ... }` body used for errors and delete confirmations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// =====================================================
// Domain Types
// =====================================================

/// A stored note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub folder: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    /// `None` until the note is first updated
    pub updated_at: Option<DateTime<Utc>>,
}
