//! Data access seam between the call logic and persistence.

use anyhow::Result;
use async_trait::async_trait;

use crate::db::{Attendee, CallStatus, Webinar};

/// Read/write access to the webinar and attendee records the call flow needs.
#[async_trait]
pub trait CallStore: Send + Sync {
    async fn get_webinar_by_id(&self, webinar_id: &str) -> Result<Option<Webinar>>;

    /// Attendees are scoped to a webinar; an id from another webinar yields `None`.
    async fn get_attendee_by_id(&self, attendee_id: &str, webinar_id: &str)
        -> Result<Option<Attendee>>;

    /// Write the call status. Fails if the attendee does not exist.
    async fn change_call_status(&self, attendee_id: &str, status: CallStatus) -> Result<()>;

    async fn list_attendees(&self, webinar_id: &str) -> Result<Vec<Attendee>>;
}
