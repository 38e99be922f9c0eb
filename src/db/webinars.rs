//! Webinar record persistence.
//!
//! Raw SQL with rusqlite. Enum columns are stored as their canonical text and
//! parsed back after the row is read.

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::schemas::{CtaType, NewWebinar, Webinar, WebinarStatus};

const SELECT_COLUMNS: &str = "SELECT id, title, description, status, cta_type, cta_label, \
     ai_agent_id, tags, start_time, created_at FROM webinars";

/// Row as stored, before enum and tag parsing.
struct WebinarRow {
    id: String,
    title: String,
    description: Option<String>,
    status: String,
    cta_type: String,
    cta_label: String,
    ai_agent_id: Option<String>,
    tags: String,
    start_time: String,
    created_at: String,
}

impl WebinarRow {
    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            status: row.get(3)?,
            cta_type: row.get(4)?,
            cta_label: row.get(5)?,
            ai_agent_id: row.get(6)?,
            tags: row.get(7)?,
            start_time: row.get(8)?,
            created_at: row.get(9)?,
        })
    }

    fn into_webinar(self) -> Result<Webinar> {
        Ok(Webinar {
            status: WebinarStatus::parse(&self.status)?,
            cta_type: CtaType::parse(&self.cta_type)?,
            tags: serde_json::from_str(&self.tags)
                .with_context(|| format!("Invalid tags on webinar {}", self.id))?,
            id: self.id,
            title: self.title,
            description: self.description,
            cta_label: self.cta_label,
            ai_agent_id: self.ai_agent_id,
            start_time: self.start_time,
            created_at: self.created_at,
        })
    }
}

/// Repository for webinar records.
pub struct WebinarRepository;

impl WebinarRepository {
    /// Insert a new webinar. Returns the generated id.
    pub fn insert(conn: &Connection, webinar: &NewWebinar) -> Result<String> {
        let id = uuid::Uuid::new_v4().to_string();
        let tags = serde_json::to_string(&webinar.tags)?;

        conn.execute(
            "INSERT INTO webinars (id, title, description, status, cta_type, cta_label, ai_agent_id, tags, start_time) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                id,
                webinar.title,
                webinar.description,
                webinar.status.as_str(),
                webinar.cta_type.as_str(),
                webinar.cta_label,
                webinar.ai_agent_id,
                tags,
                webinar.start_time,
            ],
        )
        .context("Failed to insert webinar")?;

        Ok(id)
    }

    pub fn get(conn: &Connection, id: &str) -> Result<Option<Webinar>> {
        let row = conn
            .query_row(
                &format!("{SELECT_COLUMNS} WHERE id = ?1"),
                params![id],
                WebinarRow::read,
            )
            .optional()
            .context("Failed to query webinar")?;

        row.map(WebinarRow::into_webinar).transpose()
    }

    /// Most recently scheduled webinars first.
    pub fn list(conn: &Connection, limit: usize) -> Result<Vec<Webinar>> {
        let mut stmt = conn
            .prepare(&format!("{SELECT_COLUMNS} ORDER BY start_time DESC LIMIT ?1"))
            .context("Failed to prepare webinar query")?;

        let rows = stmt
            .query_map([limit], WebinarRow::read)
            .context("Failed to query webinars")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .context("Failed to map webinars")?;

        rows.into_iter().map(WebinarRow::into_webinar).collect()
    }

    /// Returns false when no webinar has this id.
    pub fn update_status(conn: &Connection, id: &str, status: WebinarStatus) -> Result<bool> {
        let updated = conn
            .execute(
                "UPDATE webinars SET status = ?1 WHERE id = ?2",
                params![status.as_str(), id],
            )
            .context("Failed to update webinar status")?;
        Ok(updated > 0)
    }

    /// Attach (or with `None`, detach) the voice assistant used for booked calls.
    pub fn set_assistant(conn: &Connection, id: &str, assistant_id: Option<&str>) -> Result<bool> {
        let updated = conn
            .execute(
                "UPDATE webinars SET ai_agent_id = ?1 WHERE id = ?2",
                params![assistant_id, id],
            )
            .context("Failed to update webinar assistant")?;
        Ok(updated > 0)
    }

    pub fn set_cta(conn: &Connection, id: &str, cta_type: CtaType, cta_label: &str) -> Result<bool> {
        let updated = conn
            .execute(
                "UPDATE webinars SET cta_type = ?1, cta_label = ?2 WHERE id = ?3",
                params![cta_type.as_str(), cta_label, id],
            )
            .context("Failed to update webinar call-to-action")?;
        Ok(updated > 0)
    }
}
