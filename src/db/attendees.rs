//! Attendee record persistence.

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::schemas::{AttendanceStage, Attendee, CallStatus};

const SELECT_COLUMNS: &str =
    "SELECT id, webinar_id, name, email, call_status, stage, created_at FROM attendees";

struct AttendeeRow {
    id: String,
    webinar_id: String,
    name: String,
    email: String,
    call_status: String,
    stage: String,
    created_at: String,
}

impl AttendeeRow {
    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            webinar_id: row.get(1)?,
            name: row.get(2)?,
            email: row.get(3)?,
            call_status: row.get(4)?,
            stage: row.get(5)?,
            created_at: row.get(6)?,
        })
    }

    fn into_attendee(self) -> Result<Attendee> {
        Ok(Attendee {
            call_status: CallStatus::parse(&self.call_status)?,
            stage: AttendanceStage::parse(&self.stage)?,
            id: self.id,
            webinar_id: self.webinar_id,
            name: self.name,
            email: self.email,
            created_at: self.created_at,
        })
    }
}

/// Repository for attendee records.
pub struct AttendeeRepository;

impl AttendeeRepository {
    /// Register an attendee (call status PENDING, stage REGISTERED). Returns the new id.
    pub fn insert(conn: &Connection, webinar_id: &str, name: &str, email: &str) -> Result<String> {
        let id = uuid::Uuid::new_v4().to_string();

        conn.execute(
            "INSERT INTO attendees (id, webinar_id, name, email, call_status, stage) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                id,
                webinar_id,
                name,
                email,
                CallStatus::Pending.as_str(),
                AttendanceStage::Registered.as_str(),
            ],
        )
        .context("Failed to insert attendee")?;

        Ok(id)
    }

    /// Look up an attendee within a webinar. Attendees of other webinars are not returned.
    pub fn get(conn: &Connection, id: &str, webinar_id: &str) -> Result<Option<Attendee>> {
        let row = conn
            .query_row(
                &format!("{SELECT_COLUMNS} WHERE id = ?1 AND webinar_id = ?2"),
                params![id, webinar_id],
                AttendeeRow::read,
            )
            .optional()
            .context("Failed to query attendee")?;

        row.map(AttendeeRow::into_attendee).transpose()
    }

    pub fn list_by_webinar(conn: &Connection, webinar_id: &str) -> Result<Vec<Attendee>> {
        let mut stmt = conn
            .prepare(&format!(
                "{SELECT_COLUMNS} WHERE webinar_id = ?1 ORDER BY created_at ASC, name ASC"
            ))
            .context("Failed to prepare attendee query")?;

        let rows = stmt
            .query_map(params![webinar_id], AttendeeRow::read)
            .context("Failed to query attendees")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .context("Failed to map attendees")?;

        rows.into_iter().map(AttendeeRow::into_attendee).collect()
    }

    /// Set the call status. Returns false when no attendee has this id.
    pub fn update_call_status(conn: &Connection, id: &str, status: CallStatus) -> Result<bool> {
        let updated = conn
            .execute(
                "UPDATE attendees SET call_status = ?1 WHERE id = ?2",
                params![status.as_str(), id],
            )
            .context("Failed to update attendee call status")?;
        Ok(updated > 0)
    }

    pub fn update_stage(conn: &Connection, id: &str, stage: AttendanceStage) -> Result<bool> {
        let updated = conn
            .execute(
                "UPDATE attendees SET stage = ?1 WHERE id = ?2",
                params![stage.as_str(), id],
            )
            .context("Failed to update attendee stage")?;
        Ok(updated > 0)
    }
}
