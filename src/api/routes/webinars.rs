//! Webinar read routes.

use crate::api::error::{ApiError, ApiResult};
use crate::api::AppState;
use crate::call::CallStore;
use crate::db::Webinar;
use crate::pipeline::{self, Pipeline};
use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/:webinar_id", get(get_webinar))
        .route("/:webinar_id/pipeline", get(get_pipeline))
}

/// GET /webinars/:webinar_id
async fn get_webinar(
    State(state): State<AppState>,
    Path(webinar_id): Path<String>,
) -> ApiResult<Json<Webinar>> {
    let webinar = state
        .store
        .get_webinar_by_id(&webinar_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Webinar {} not found", webinar_id)))?;

    Ok(Json(webinar))
}

/// GET /webinars/:webinar_id/pipeline
async fn get_pipeline(
    State(state): State<AppState>,
    Path(webinar_id): Path<String>,
) -> ApiResult<Json<Pipeline>> {
    let board = pipeline::load(state.store.as_ref(), &webinar_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Webinar {} not found", webinar_id)))?;

    Ok(Json(board))
}
