use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    middleware::RequestId,
    models::Movie,
    routes::{first_values, movie_list, AppState},
    services::Recommendation,
};

#[derive(Debug, Default, Deserialize)]
pub struct GenreQuery {
    pub genre: Option<String>,
    pub exclude: Option<String>,
}

/// Query for rows keyed by a person's name
#[derive(Debug, Default, Deserialize)]
pub struct NameQuery {
    pub val: Option<String>,
    pub exclude: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TimelineQuery {
    pub year: Option<String>,
    pub exclude: Option<String>,
}

async fn recommend(
    state: &AppState,
    request_id: RequestId,
    endpoint: &'static str,
    recommendation: Option<Recommendation>,
    exclude: Option<&str>,
) -> (StatusCode, Json<Vec<Movie>>) {
    let Some(recommendation) = recommendation else {
        tracing::debug!(request_id = %request_id, endpoint, "Empty recommendation key");
        return (StatusCode::OK, Json(Vec::new()));
    };

    let result = state.catalog.recommend(&recommendation, exclude).await;
    movie_list(endpoint, request_id, result)
}

/// Same primary genre, ranked by smart score
pub async fn by_genre(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> (StatusCode, Json<Vec<Movie>>) {
    let params: GenreQuery = first_values(pairs);
    let recommendation = Recommendation::by_genre(params.genre.as_deref());
    recommend(&state, request_id, "recommend/genre", recommendation, params.exclude.as_deref()).await
}

pub async fn by_actor(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> (StatusCode, Json<Vec<Movie>>) {
    let params: NameQuery = first_values(pairs);
    let recommendation = Recommendation::by_actor(params.val.as_deref());
    recommend(&state, request_id, "recommend/actors", recommendation, params.exclude.as_deref()).await
}

pub async fn by_director(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> (StatusCode, Json<Vec<Movie>>) {
    let params: NameQuery = first_values(pairs);
    let recommendation = Recommendation::by_director(params.val.as_deref());
    recommend(&state, request_id, "recommend/director", recommendation, params.exclude.as_deref()).await
}

/// Released within five years of `year`
pub async fn by_era(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> (StatusCode, Json<Vec<Movie>>) {
    let params: TimelineQuery = first_values(pairs);
    let recommendation = Recommendation::by_era(params.year.as_deref());
    recommend(&state, request_id, "recommend/timeline", recommendation, params.exclude.as_deref()).await
}
