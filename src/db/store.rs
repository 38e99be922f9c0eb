use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex};

use super::attendees::AttendeeRepository;
use super::init::{init_db, init_memory_db};
use super::schemas::{Attendee, CallStatus, Webinar};
use super::webinars::WebinarRepository;
use crate::call::CallStore;

/// SQLite-backed store shared by the HTTP handlers.
///
/// The connection lives behind a mutex; every query runs on the blocking pool.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self::from_connection(init_db(path)?))
    }

    pub fn in_memory() -> Result<Self> {
        Ok(Self::from_connection(init_memory_db()?))
    }

    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Run a closure against the connection on the blocking pool.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn
                .lock()
                .map_err(|_| anyhow!("Database connection lock poisoned"))?;
            f(&*guard)
        })
        .await
        .context("Database task panicked")?
    }
}

#[async_trait]
impl CallStore for SqliteStore {
    async fn get_webinar_by_id(&self, webinar_id: &str) -> Result<Option<Webinar>> {
        let webinar_id = webinar_id.to_string();
        self.run(move |conn| WebinarRepository::get(conn, &webinar_id))
            .await
    }

    async fn get_attendee_by_id(
        &self,
        attendee_id: &str,
        webinar_id: &str,
    ) -> Result<Option<Attendee>> {
        let attendee_id = attendee_id.to_string();
        let webinar_id = webinar_id.to_string();
        self.run(move |conn| AttendeeRepository::get(conn, &attendee_id, &webinar_id))
            .await
    }

    async fn change_call_status(&self, attendee_id: &str, status: CallStatus) -> Result<()> {
        let attendee_id = attendee_id.to_string();
        self.run(move |conn| {
            if !AttendeeRepository::update_call_status(conn, &attendee_id, status)? {
                bail!("Attendee {} not found", attendee_id);
            }
            Ok(())
        })
        .await
    }

    async fn list_attendees(&self, webinar_id: &str) -> Result<Vec<Attendee>> {
        let webinar_id = webinar_id.to_string();
        self.run(move |conn| AttendeeRepository::list_by_webinar(conn, &webinar_id))
            .await
    }
}
