//! Assistant API routes, backed by the voice assistant gateway.
//!
//! The HTTP status of each response mirrors the `status` field of the
//! gateway result.

use crate::api::AppState;
use crate::vapi::GatewayResult;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, patch},
    Router,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CreateAssistantRequest {
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAssistantRequest {
    pub first_message: Option<String>,
    pub system_prompt: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_assistants).post(create_assistant))
        .route("/:assistant_id", patch(update_assistant))
}

/// GET /assistants
async fn list_assistants(State(state): State<AppState>) -> Response {
    respond(state.gateway.list().await)
}

/// POST /assistants
async fn create_assistant(
    State(state): State<AppState>,
    Json(req): Json<CreateAssistantRequest>,
) -> Response {
    respond(state.gateway.create(&req.name).await)
}

/// PATCH /assistants/:assistant_id
async fn update_assistant(
    State(state): State<AppState>,
    Path(assistant_id): Path<String>,
    body: Option<Json<UpdateAssistantRequest>>,
) -> Response {
    let req = body.map(|Json(req)| req).unwrap_or_default();
    respond(
        state
            .gateway
            .update(
                &assistant_id,
                req.first_message.as_deref(),
                req.system_prompt.as_deref(),
            )
            .await,
    )
}

fn respond<T: Serialize>(result: GatewayResult<T>) -> Response {
    let status =
        StatusCode::from_u16(result.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(result)).into_response()
}
