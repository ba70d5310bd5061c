use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Response from the song url endpoint
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SongUrlResponse {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub br: Option<serde_json::Value>,
    #[serde(default)]
    pub size: Option<serde_json::Value>,
}

impl SongUrlResponse {
    /// The url, if the endpoint actually returned a usable one.
    pub fn usable_url(&self) -> Option<&str> {
        self.url.as_deref().filter(|url| !url.trim().is_empty())
    }
}

/// Body of `POST /api/download-to-server`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerDownloadRequest {
    pub url: String,
    pub filename: String,
}

/// Response from `POST /api/download-to-server`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerDownloadResponse {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub api_base: String,
    pub proxy_endpoint: String,
    pub server_base: String,
    pub session_cookie: Option<String>,
    pub download_dir: PathBuf,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_base: "https://music-api.gdstudio.xyz/api.php".to_string(),
            proxy_endpoint: "http://127.0.0.1:3000/api/audio-proxy".to_string(),
            server_base: "http://127.0.0.1:3000".to_string(),
            session_cookie: None,
            download_dir: PathBuf::from("downloads"),
        }
    }
}

impl ApiConfig {
    /// Defaults overridden by `SONG_DL_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(value) = lookup("SONG_DL_API_BASE") {
            config.api_base = value;
        }
        if let Some(value) = lookup("SONG_DL_PROXY_ENDPOINT") {
            config.proxy_endpoint = value;
        }
        if let Some(value) = lookup("SONG_DL_SERVER_BASE") {
            config.server_base = value.trim_end_matches('/').to_string();
        }
        config.session_cookie = lookup("SONG_DL_SESSION_COOKIE").filter(|v| !v.is_empty());
        if let Some(value) = lookup("SONG_DL_DOWNLOAD_DIR") {
            config.download_dir = PathBuf::from(value);
        }
        config
    }
}
