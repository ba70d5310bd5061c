//! Seams between the download flows and the outside world.

use async_trait::async_trait;

use crate::{
    api::{ApiError, ServerDownloadRequest, ServerDownloadResponse, SongUrlResponse},
    domain::{NotificationStyle, Quality, Song},
};

/// Looks up where a song can be fetched from.
#[async_trait]
pub trait SongUrlResolver: Send + Sync {
    /// Builds the lookup request url. Pure.
    fn song_url(&self, song: &Song, quality: &Quality) -> String;

    /// Performs the lookup. `Ok(None)` means the endpoint answered with nothing.
    async fn fetch_song_url(&self, request_url: &str) -> Result<Option<SongUrlResponse>, ApiError>;
}

/// Rewrites a raw audio url so the client can fetch it directly.
pub trait AudioProxyUrlBuilder: Send + Sync {
    fn proxy_url(&self, raw_url: &str) -> Result<String, ApiError>;
}

/// Triggers a save on the local device. Fire-and-forget.
pub trait FileSaver: Send + Sync {
    fn save(&self, url: &str, filename: &str);
}

#[async_trait]
pub trait ServerDownloader: Send + Sync {
    async fn download_to_server(
        &self,
        request: &ServerDownloadRequest,
    ) -> Result<ServerDownloadResponse, ApiError>;
}

pub trait Notifier: Send + Sync {
    fn show(&self, message: &str, style: NotificationStyle);
}
