//! Live call page route.
//!
//! `GET /live-webinar/:webinar_id/call?attendeeId=...` runs the admission
//! check and either redirects with an error code or returns the call session
//! the page hands to the voice client.

use crate::api::error::ApiResult;
use crate::api::AppState;
use crate::call::{self, AdmissionOutcome, RejectReason};
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Json, Redirect, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize, Default)]
pub struct CallQueryParams {
    #[serde(rename = "attendeeId")]
    pub attendee_id: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/live-webinar/:webinar_id/call", get(call_page))
}

async fn call_page(
    State(state): State<AppState>,
    Path(webinar_id): Path<String>,
    Query(params): Query<CallQueryParams>,
) -> ApiResult<Response> {
    let attendee_id = params.attendee_id.unwrap_or_default();
    debug!(
        "Call page accessed with webinar {} attendee {}",
        webinar_id, attendee_id
    );

    let outcome = call::admit(state.store.as_ref(), &webinar_id, &attendee_id).await?;

    Ok(match outcome {
        AdmissionOutcome::Admitted(session) => Json(session).into_response(),
        AdmissionOutcome::Rejected(reason) => redirect(reason, &webinar_id),
    })
}

fn redirect(reason: RejectReason, webinar_id: &str) -> Response {
    Redirect::to(&reason.redirect_target(webinar_id)).into_response()
}
