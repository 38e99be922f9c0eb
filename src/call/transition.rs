use anyhow::Result;
use tracing::info;

use super::store::CallStore;
use crate::db::{Attendee, CallStatus};

/// Set an attendee's call status. Writing the same status twice is harmless.
pub async fn change_call_status(
    store: &dyn CallStore,
    attendee_id: &str,
    status: CallStatus,
) -> Result<()> {
    store.change_call_status(attendee_id, status).await?;
    info!("Attendee {} call status set to {}", attendee_id, status);
    Ok(())
}

/// Move a finished call back to PENDING so a new one can start.
///
/// Returns whether a write happened.
pub async fn reset_completed_call(store: &dyn CallStore, attendee: &Attendee) -> Result<bool> {
    if attendee.call_status != CallStatus::Completed {
        return Ok(false);
    }

    change_call_status(store, &attendee.id, CallStatus::Pending).await?;
    Ok(true)
}
