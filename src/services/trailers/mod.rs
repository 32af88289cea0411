//! Trailer lookup behind a pluggable provider.
//!
//! The front-end plays trailers by video ID; providers turn a movie title
//! (usually "<name> <year>") into the best matching video.

use crate::error::AppResult;

pub mod youtube;

pub use youtube::YouTubeProvider;

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait TrailerProvider: Send + Sync {
    /// Finds the trailer video for a movie, `None` when the provider has no match
    async fn find_trailer(&self, movie_name: &str) -> AppResult<Option<String>>;

    /// Provider name for logging
    fn name(&self) -> &'static str;
}
