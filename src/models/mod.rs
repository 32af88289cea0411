use serde::{Deserialize, Serialize};

pub mod movie;

pub use movie::{Movie, MovieId};

/// Request body for fetching a saved list of movies
#[derive(Debug, Default, Deserialize)]
pub struct MovieListRequest {
    #[serde(default)]
    pub ids: Vec<MovieId>,
}

/// Trailer lookup result returned to the client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrailerResponse {
    /// YouTube video ID, empty when nothing was found
    #[serde(rename = "videoId")]
    pub video_id: String,
}

/// Acknowledgement sent after a review is stored
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
