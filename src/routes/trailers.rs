use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::TrailerResponse,
    routes::{first_values, AppState},
    services::normalize::non_blank,
};

#[derive(Debug, Default, Deserialize)]
pub struct TrailerQuery {
    name: Option<String>,
}

/// Handler for trailer lookup by movie name
pub async fn search(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> AppResult<Json<TrailerResponse>> {
    let params: TrailerQuery = first_values(pairs);
    let name = non_blank(params.name.as_deref())
        .ok_or_else(|| AppError::InvalidInput("Movie name required".to_string()))?;

    let provider = state
        .trailers
        .as_ref()
        .ok_or_else(|| AppError::NotConfigured("Trailer search is not configured".to_string()))?;

    tracing::info!(
        request_id = %request_id,
        provider = provider.name(),
        movie = %name,
        "Searching trailer"
    );

    let video_id = provider.find_trailer(name).await?;

    Ok(Json(TrailerResponse {
        video_id: video_id.unwrap_or_default(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        routes::create_router,
        services::{trailers::MockTrailerProvider, Catalog, ReviewStore},
    };
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use mockall::predicate::eq;
    use std::time::Duration;

    async fn create_test_server(
        trailers: Option<Arc<dyn crate::services::TrailerProvider>>,
    ) -> (TestServer, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let pool = sqlx::SqlitePool::connect("sqlite::memory:").await.unwrap();
        let state = AppState {
            catalog: Catalog::new(pool, Duration::from_secs(5)),
            reviews: ReviewStore::open(dir.path().join("reviews.json")).await.unwrap(),
            trailers,
        };
        let server = TestServer::new(create_router(Arc::new(state))).unwrap();
        (server, dir)
    }

    #[tokio::test]
    async fn test_returns_video_id_from_provider() {
        let mut provider = MockTrailerProvider::new();
        provider
            .expect_find_trailer()
            .with(eq("Heat 1995"))
            .times(1)
            .returning(|_| Ok(Some("abc123".to_string())));
        provider.expect_name().return_const("mock");

        let (server, _dir) = create_test_server(Some(Arc::new(provider))).await;
        let response = server
            .get("/youtube/search")
            .add_query_param("name", "Heat 1995")
            .await;

        response.assert_status_ok();
        response.assert_json(&serde_json::json!({ "videoId": "abc123" }));
    }

    #[tokio::test]
    async fn test_no_match_returns_empty_video_id() {
        let mut provider = MockTrailerProvider::new();
        provider.expect_find_trailer().returning(|_| Ok(None));
        provider.expect_name().return_const("mock");

        let (server, _dir) = create_test_server(Some(Arc::new(provider))).await;
        let response = server
            .get("/youtube/search")
            .add_query_param("name", "Obscure Film")
            .await;

        response.assert_status_ok();
        let body: TrailerResponse = response.json();
        assert_eq!(body.video_id, "");
    }

    #[tokio::test]
    async fn test_missing_name_is_rejected() {
        let mut provider = MockTrailerProvider::new();
        provider.expect_find_trailer().never();

        let (server, _dir) = create_test_server(Some(Arc::new(provider))).await;
        let response = server.get("/youtube/search").await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&serde_json::json!({ "error": "Movie name required" }));
    }

    #[tokio::test]
    async fn test_upstream_failure_is_bad_gateway() {
        let mut provider = MockTrailerProvider::new();
        provider
            .expect_find_trailer()
            .returning(|_| Err(AppError::ExternalApi("quotaExceeded".to_string())));
        provider.expect_name().return_const("mock");

        let (server, _dir) = create_test_server(Some(Arc::new(provider))).await;
        let response = server
            .get("/youtube/search")
            .add_query_param("name", "Heat")
            .await;

        response.assert_status(StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_unconfigured_provider_is_unavailable() {
        let (server, _dir) = create_test_server(None).await;
        let response = server
            .get("/youtube/search")
            .add_query_param("name", "Heat")
            .await;

        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    }
}
