use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::{Movie, MovieListRequest},
    routes::{first_values, movie_list, AppState},
    services::{normalize::non_blank, LibraryFilter, LibraryParams},
};

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    q: Option<String>,
}

/// Handler for title search endpoint
pub async fn search(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> (StatusCode, Json<Vec<Movie>>) {
    let params: SearchQuery = first_values(pairs);
    let Some(query) = non_blank(params.q.as_deref()) else {
        return (StatusCode::OK, Json(Vec::new()));
    };

    movie_list("search", request_id, state.catalog.search_by_name(query).await)
}

/// Handler for single movie lookup
pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<Json<Movie>> {
    state
        .catalog
        .find_by_id(&id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Movie not found".to_string()))
}

/// Handler for the filterable, sortable library listing
pub async fn library(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> (StatusCode, Json<Vec<Movie>>) {
    let params: LibraryParams = first_values(pairs);
    let filter = LibraryFilter::from_params(&params);

    tracing::debug!(
        request_id = %request_id,
        sort = filter.sort.as_str(),
        min_year = filter.min_year,
        limit = filter.limit,
        offset = filter.offset,
        "Processing library request"
    );

    movie_list("library", request_id, state.catalog.library(&filter).await)
}

/// Handler for fetching a saved list of movies by ID
pub async fn get_list(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<MovieListRequest>,
) -> (StatusCode, Json<Vec<Movie>>) {
    movie_list("get-list", request_id, state.catalog.find_many(&request.ids).await)
}
