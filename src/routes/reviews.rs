use axum::{extract::State, Json};
use serde_json::Value;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::MessageResponse,
    routes::AppState,
};

/// Handler listing all reviews, newest first
pub async fn list(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<Value>>> {
    let reviews = state.reviews.all().await.map_err(|e| {
        tracing::error!(error = %e, path = %state.reviews.path().display(), "Could not read reviews");
        AppError::Internal("Could not read reviews".to_string())
    })?;
    Ok(Json(reviews))
}

/// Handler storing a new review
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(review): Json<Value>,
) -> AppResult<Json<MessageResponse>> {
    state.reviews.prepend(review).await.map_err(|e| {
        tracing::error!(error = %e, "Could not save review");
        AppError::Internal("Could not save review".to_string())
    })?;

    Ok(Json(MessageResponse {
        message: "Review saved!",
    }))
}
