use serde::Deserialize;
use std::path::PathBuf;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// SQLite movie dataset URL
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Maximum pooled connections to the dataset
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Upper bound for a single catalog query, in seconds
    #[serde(default = "default_query_timeout_secs")]
    pub query_timeout_secs: u64,

    /// Redis connection URL, enables trailer lookup caching when set
    #[serde(default)]
    pub redis_url: Option<String>,

    /// YouTube Data API key, the trailer endpoint is disabled without it
    #[serde(default)]
    pub youtube_api_key: Option<String>,

    /// YouTube Data API base URL
    #[serde(default = "default_youtube_api_url")]
    pub youtube_api_url: String,

    /// JSON file holding user reviews
    #[serde(default = "default_reviews_path")]
    pub reviews_path: PathBuf,

    /// Directory with front-end assets served as a fallback
    #[serde(default)]
    pub static_dir: Option<PathBuf>,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_database_url() -> String {
    "sqlite://datasets/movies.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_query_timeout_secs() -> u64 {
    5
}

fn default_youtube_api_url() -> String {
    "https://www.googleapis.com/youtube/v3".to_string()
}

fn default_reviews_path() -> PathBuf {
    PathBuf::from("backend/reviews.json")
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Address the HTTP listener binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
