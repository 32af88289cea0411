use std::sync::Arc;

use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    error::AppResult,
    middleware::{make_span_with_request_id, request_id_middleware, RequestId},
    models::Movie,
    services::{Catalog, ReviewStore, TrailerProvider},
};

pub mod movies;
pub mod recommendations;
pub mod reviews;
pub mod trailers;

/// Shared application state
pub struct AppState {
    pub catalog: Catalog,
    pub reviews: ReviewStore,
    /// Absent when no trailer API key is configured
    pub trailers: Option<Arc<dyn TrailerProvider>>,
}

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // Movie lookups
        .route("/search", get(movies::search))
        .route("/movie/:id", get(movies::get_movie))
        .route("/movies/library", get(movies::library))
        .route("/movies/get-list", post(movies::get_list))
        // Recommendations
        .route("/recommend/genre", get(recommendations::by_genre))
        .route("/recommend/actors", get(recommendations::by_actor))
        .route("/recommend/director", get(recommendations::by_director))
        .route("/recommend/timeline", get(recommendations::by_era))
        // Trailers
        .route("/youtube/search", get(trailers::search))
        // Reviews
        .route("/reviews", get(reviews::list).post(reviews::create))
        .with_state(state)
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Folds raw query pairs into `T`, keeping the first value of a repeated key
///
/// Never rejects: every params struct is all-optional text, and anything that
/// still fails to deserialize falls back to `T::default()`.
pub(crate) fn first_values<T: DeserializeOwned + Default>(pairs: Vec<(String, String)>) -> T {
    let mut fields = Map::new();
    for (key, value) in pairs {
        fields.entry(key).or_insert(Value::String(value));
    }
    serde_json::from_value(Value::Object(fields)).unwrap_or_default()
}

/// Response for endpoints that always answer with a JSON array of movies
///
/// A failed query still answers with `[]`; only the status tells the client
/// that something went wrong.
pub(crate) fn movie_list(
    endpoint: &'static str,
    request_id: RequestId,
    result: AppResult<Vec<Movie>>,
) -> (StatusCode, Json<Vec<Movie>>) {
    match result {
        Ok(movies) => {
            tracing::info!(
                request_id = %request_id,
                endpoint,
                count = movies.len(),
                "Movie list served"
            );
            (StatusCode::OK, Json(movies))
        }
        Err(e) => {
            tracing::error!(request_id = %request_id, endpoint, error = %e, "Movie query failed");
            (e.status_code(), Json(Vec::new()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::LibraryParams;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_first_values_keeps_first_of_repeated_key() {
        let params: LibraryParams =
            first_values(pairs(&[("sort", "date_desc"), ("sort", "bogus"), ("limit", "2")]));
        assert_eq!(params.sort.as_deref(), Some("date_desc"));
        assert_eq!(params.limit.as_deref(), Some("2"));
    }

    #[test]
    fn test_first_values_ignores_unknown_keys() {
        let params: LibraryParams = first_values(pairs(&[("utm_source", "x"), ("year", "1990")]));
        assert_eq!(params.year.as_deref(), Some("1990"));
        assert_eq!(params.genre, None);
    }

    #[test]
    fn test_first_values_of_nothing_is_default() {
        let params: LibraryParams = first_values(Vec::new());
        assert_eq!(params.sort, None);
        assert_eq!(params.limit, None);
    }
}
