//! Provider webhook: call lifecycle events from Vapi.

use crate::api::error::ApiResult;
use crate::api::AppState;
use crate::call::{self, CallEvent, WebhookPayload};
use axum::{extract::State, response::Json, routing::post, Router};
use serde_json::{json, Value};
use tracing::{debug, info};

pub fn router() -> Router<AppState> {
    Router::new().route("/api/vapi-webhook", post(receive))
}

/// POST /api/vapi-webhook
///
/// Any JSON body is acknowledged with 200. Bodies that are not a server
/// message, or messages that do not change call status, are ignored.
async fn receive(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> ApiResult<Json<Value>> {
    let payload: WebhookPayload = match serde_json::from_value(body) {
        Ok(payload) => payload,
        Err(err) => {
            debug!("Ignoring unrecognized webhook body: {}", err);
            return Ok(acknowledge(false));
        }
    };

    let applied = match CallEvent::from_message(&payload.message) {
        Some(event) => {
            info!(
                "Webhook {} for attendee {}: {}",
                payload.message.kind, event.attendee_id, event.status
            );
            call::apply_event(state.store.as_ref(), &event).await?
        }
        None => false,
    };

    Ok(acknowledge(applied))
}

fn acknowledge(applied: bool) -> Json<Value> {
    Json(json!({ "received": true, "applied": applied }))
}
