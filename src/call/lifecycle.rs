//! Call lifecycle events pushed by the voice provider to the webhook.

use anyhow::Result;
use serde::Deserialize;
use tracing::{debug, warn};

use super::store::CallStore;
use super::transition::change_call_status;
use crate::db::CallStatus;

/// Webhook body: `{"message": {...}}`.
#[derive(Debug, Deserialize)]
pub struct WebhookPayload {
    pub message: ServerMessage,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerMessage {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub call: Option<CallInfo>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallInfo {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub assistant_id: Option<String>,
    #[serde(default)]
    pub metadata: CallMetadata,
}

/// Identifiers the call page attaches when it starts the call.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallMetadata {
    #[serde(default)]
    pub attendee_id: Option<String>,
    #[serde(default)]
    pub webinar_id: Option<String>,
}

/// A status change for one attendee's call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallEvent {
    pub attendee_id: String,
    pub webinar_id: String,
    pub status: CallStatus,
}

impl CallEvent {
    /// Interpret a provider message. Returns `None` for messages that do not change call status.
    pub fn from_message(message: &ServerMessage) -> Option<CallEvent> {
        let status = match message.kind.as_str() {
            "status-update" => match message.status.as_deref()? {
                "in-progress" => CallStatus::InProgress,
                "ended" => CallStatus::Completed,
                other => {
                    debug!("Ignoring call status update: {}", other);
                    return None;
                }
            },
            "end-of-call-report" => CallStatus::Completed,
            other => {
                debug!("Ignoring webhook message type: {}", other);
                return None;
            }
        };

        let metadata = &message.call.as_ref()?.metadata;
        let attendee_id = non_blank(metadata.attendee_id.as_deref());
        let webinar_id = non_blank(metadata.webinar_id.as_deref());

        match (attendee_id, webinar_id) {
            (Some(attendee_id), Some(webinar_id)) => Some(CallEvent {
                attendee_id: attendee_id.to_string(),
                webinar_id: webinar_id.to_string(),
                status,
            }),
            _ => {
                warn!(
                    "Webhook {} message without attendee metadata, call {:?}",
                    message.kind,
                    message.call.as_ref().and_then(|c| c.id.as_deref())
                );
                None
            }
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Apply a call event to the store. Returns false when the attendee is unknown.
pub async fn apply_event(store: &dyn CallStore, event: &CallEvent) -> Result<bool> {
    if store
        .get_attendee_by_id(&event.attendee_id, &event.webinar_id)
        .await?
        .is_none()
    {
        warn!(
            "Webhook event for unknown attendee {} in webinar {}",
            event.attendee_id, event.webinar_id
        );
        return Ok(false);
    }

    change_call_status(store, &event.attendee_id, event.status).await?;
    Ok(true)
}
