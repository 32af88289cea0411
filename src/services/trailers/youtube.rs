/// YouTube Data API trailer provider
///
/// Uses the `search` endpoint restricted to videos and keeps only the top hit.
/// Each lookup costs quota, so results are cached in Redis when available.
use crate::{
    cached,
    db::{Cache, CacheKey},
    error::{AppError, AppResult},
    services::trailers::TrailerProvider,
};
use reqwest::Client as HttpClient;
use serde::Deserialize;

const TRAILER_CACHE_TTL: u64 = 604800; // 1 week

#[derive(Clone)]
pub struct YouTubeProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    cache: Option<Cache>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchItemId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchItemId {
    #[serde(default)]
    video_id: Option<String>,
}

impl SearchResponse {
    fn first_video_id(self) -> Option<String> {
        self.items
            .into_iter()
            .next()
            .and_then(|item| item.id.video_id)
            .filter(|id| !id.is_empty())
    }
}

impl YouTubeProvider {
    pub fn new(api_key: String, api_url: String, cache: Option<Cache>) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
            cache,
        }
    }

    fn search_url(&self) -> String {
        format!("{}/search", self.api_url.trim_end_matches('/'))
    }

    fn search_terms(movie_name: &str) -> String {
        format!("{} official trailer", movie_name.trim())
    }

    /// Pulls `error.message` out of an API error body, falling back to the raw body
    fn error_message(body: &str) -> String {
        serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
            .unwrap_or_else(|| body.to_string())
    }

    /// Top video ID for the movie, empty when the search found none
    async fn search(&self, movie_name: &str) -> AppResult<String> {
        let terms = Self::search_terms(movie_name);

        let response = self
            .http_client
            .get(self.search_url())
            .query(&[
                ("part", "snippet"),
                ("q", terms.as_str()),
                ("maxResults", "1"),
                ("type", "video"),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, movie = %movie_name, "YouTube search failed");
            return Err(AppError::ExternalApi(format!(
                "YouTube API returned status {}: {}",
                status,
                Self::error_message(&body)
            )));
        }

        let results: SearchResponse = response.json().await?;
        let video_id = results.first_video_id().unwrap_or_default();

        tracing::info!(
            movie = %movie_name,
            video_id = if video_id.is_empty() { "none" } else { video_id.as_str() },
            "YouTube search completed"
        );

        Ok(video_id)
    }
}

fn trailer_from_video_id(video_id: String) -> Option<String> {
    Some(video_id).filter(|id| !id.is_empty())
}

#[async_trait::async_trait]
impl TrailerProvider for YouTubeProvider {
    async fn find_trailer(&self, movie_name: &str) -> AppResult<Option<String>> {
        // Cached as a plain string so "no trailer" is a hit too.
        let video_id: String = match &self.cache {
            Some(cache) => cached!(
                cache,
                CacheKey::Trailer(movie_name.to_string()),
                TRAILER_CACHE_TTL,
                self.search(movie_name)
            ),
            None => self.search(movie_name).await?,
        };

        Ok(trailer_from_video_id(video_id))
    }

    fn name(&self) -> &'static str {
        "youtube"
    }
}
