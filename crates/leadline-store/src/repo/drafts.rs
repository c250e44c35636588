use crate::error::Result;
use chrono::{DateTime, Utc};
use leadline_core::domain::LeadDraft;
use rusqlite::{params, Connection, OptionalExtension};

/// Key the add-lead form saves its unsubmitted input under.
pub const ADD_LEAD_DRAFT: &str = "add-lead";

/// Named snapshots of unsaved lead input, stored as JSON.
pub struct DraftsRepo<'a> {
    conn: &'a Connection,
}

impl<'a> DraftsRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn save(&self, now: DateTime<Utc>, key: &str, draft: &LeadDraft) -> Result<()> {
        let payload = serde_json::to_string(draft)?;
        self.conn.execute(
            "INSERT INTO drafts (key, payload, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET payload = excluded.payload,
                                            updated_at = excluded.updated_at;",
            params![key, payload, now.timestamp_micros()],
        )?;
        Ok(())
    }

    pub fn load(&self, key: &str) -> Result<Option<LeadDraft>> {
        let payload: Option<String> = self
            .conn
            .query_row(
                "SELECT payload FROM drafts WHERE key = ?1;",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        match payload {
            Some(payload) => Ok(Some(serde_json::from_str(&payload)?)),
            None => Ok(None),
        }
    }

    /// Returns whether a draft was removed.
    pub fn clear(&self, key: &str) -> Result<bool> {
        let deleted = self
            .conn
            .execute("DELETE FROM drafts WHERE key = ?1;", [key])?;
        Ok(deleted > 0)
    }
}
