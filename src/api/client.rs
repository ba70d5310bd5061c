use async_trait::async_trait;
use futures::Stream;
use futures::TryStreamExt;
use reqwest::{header, Client};
use thiserror::Error;
use url::Url;

use super::models::{ApiConfig, ServerDownloadRequest, ServerDownloadResponse, SongUrlResponse};
use crate::application::ports::{AudioProxyUrlBuilder, ServerDownloader, SongUrlResolver};
use crate::domain::{Quality, Song};

const SERVER_DOWNLOAD_PATH: &str = "/api/download-to-server";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Clone)]
pub struct ApiClient {
    config: ApiConfig,
    client: Client,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    /// Fetch a file as a byte stream
    pub async fn download_file_stream(
        &self,
        download_url: &str,
    ) -> Result<impl Stream<Item = Result<bytes::Bytes>>> {
        let response = self
            .client
            .get(download_url)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.bytes_stream().map_err(ApiError::RequestError))
    }
}

#[async_trait]
impl SongUrlResolver for ApiClient {
    fn song_url(&self, song: &Song, quality: &Quality) -> String {
        match Url::parse_with_params(
            &self.config.api_base,
            &[
                ("types", "url"),
                ("source", song.source.as_str()),
                ("id", song.id.as_str()),
                ("br", quality.value()),
            ],
        ) {
            Ok(url) => url.to_string(),
            // Not a parseable base; let the fetch report it.
            Err(_) => format!(
                "{}?types=url&source={}&id={}&br={}",
                self.config.api_base,
                song.source,
                song.id,
                quality.value()
            ),
        }
    }

    async fn fetch_song_url(&self, request_url: &str) -> Result<Option<SongUrlResponse>> {
        log::debug!("Resolving song url: {}", request_url);
        let response = self
            .client
            .get(request_url)
            .send()
            .await?
            .error_for_status()?;

        response
            .json::<Option<SongUrlResponse>>()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("JSON decode error: {}", e)))
    }
}

impl AudioProxyUrlBuilder for ApiClient {
    fn proxy_url(&self, raw_url: &str) -> Result<String> {
        let url = Url::parse_with_params(&self.config.proxy_endpoint, &[("url", raw_url)])?;
        Ok(url.to_string())
    }
}

#[async_trait]
impl ServerDownloader for ApiClient {
    async fn download_to_server(
        &self,
        request: &ServerDownloadRequest,
    ) -> Result<ServerDownloadResponse> {
        let endpoint = format!("{}{}", self.config.server_base, SERVER_DOWNLOAD_PATH);
        log::debug!("Posting server download to {}", endpoint);

        let mut builder = self.client.post(&endpoint).json(request);
        if let Some(cookie) = &self.config.session_cookie {
            builder = builder.header(header::COOKIE, cookie);
        }

        // Error statuses still carry a `{success, error}` body.
        let response = builder.send().await?;

        response
            .json::<ServerDownloadResponse>()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("JSON decode error: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Artist;
    use mockito::Matcher;
    use serde_json::json;

    fn song() -> Song {
        Song {
            id: "1962165898".to_string(),
            source: "netease".to_string(),
            name: "Title".to_string(),
            artist: Artist::from("Solo"),
        }
    }

    fn client_for(server: &mockito::ServerGuard) -> ApiClient {
        ApiClient::new(ApiConfig {
            api_base: format!("{}/api.php", server.url()),
            proxy_endpoint: format!("{}/api/audio-proxy", server.url()),
            server_base: server.url(),
            session_cookie: Some("sid=abc".to_string()),
            ..ApiConfig::default()
        })
    }

    #[test]
    fn test_song_url_query() {
        let client = ApiClient::new(ApiConfig {
            api_base: "https://api.example.com/api.php".to_string(),
            ..ApiConfig::default()
        });
        let url = client.song_url(&song(), &Quality::new("320"));
        assert_eq!(
            url,
            "https://api.example.com/api.php?types=url&source=netease&id=1962165898&br=320"
        );
    }

    #[test]
    fn test_proxy_url_encodes_raw_url() {
        let client = ApiClient::new(ApiConfig {
            proxy_endpoint: "http://localhost:3000/api/audio-proxy".to_string(),
            ..ApiConfig::default()
        });
        let proxied = client
            .proxy_url("http://m7.music.126.net/a b.mp3?vuutv=x&y=1")
            .unwrap();
        assert!(proxied.starts_with("http://localhost:3000/api/audio-proxy?url="));
        assert!(proxied.contains("vuutv%3Dx%26y%3D1"));
    }

    #[tokio::test]
    async fn test_fetch_song_url() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api.php")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("types".into(), "url".into()),
                Matcher::UrlEncoded("id".into(), "1962165898".into()),
                Matcher::UrlEncoded("br".into(), "320".into()),
            ]))
            .with_header("content-type", "application/json")
            .with_body(r#"{"url":"http://cdn.example.com/x.mp3","br":320,"size":1024}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let request_url = client.song_url(&song(), &Quality::new("320"));
        let response = client.fetch_song_url(&request_url).await.unwrap().unwrap();

        assert_eq!(response.usable_url(), Some("http://cdn.example.com/x.mp3"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_song_url_null_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", Matcher::Any)
            .with_body("null")
            .create_async()
            .await;

        let client = client_for(&server);
        let request_url = client.song_url(&song(), &Quality::new("320"));
        assert!(client.fetch_song_url(&request_url).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_download_to_server_sends_body_and_cookie() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/download-to-server")
            .match_header("cookie", "sid=abc")
            .match_body(Matcher::Json(json!({
                "url": "http://cdn.example.com/x.mp3",
                "filename": "Title - Solo [High].mp3"
            })))
            .with_body(r#"{"success":false,"error":"disk full"}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let response = client
            .download_to_server(&ServerDownloadRequest {
                url: "http://cdn.example.com/x.mp3".to_string(),
                filename: "Title - Solo [High].mp3".to_string(),
            })
            .await
            .unwrap();

        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some("disk full"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_download_to_server_non_json_reply() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/download-to-server")
            .with_status(502)
            .with_body("<html>bad gateway</html>")
            .create_async()
            .await;

        let client = client_for(&server);
        let result = client
            .download_to_server(&ServerDownloadRequest {
                url: "u".to_string(),
                filename: "f".to_string(),
            })
            .await;

        assert!(matches!(result, Err(ApiError::InvalidResponse(_))));
    }
}
