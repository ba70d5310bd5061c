use std::sync::Arc;

use crate::{
    api::ServerDownloadRequest,
    application::ports::{
        AudioProxyUrlBuilder, FileSaver, Notifier, ServerDownloader, SongUrlResolver,
    },
    domain::{AppError, DownloadJob, DownloadTarget, NotificationStyle, Quality, Song},
    utils::download_filename,
};

const SERVER_FALLBACK_ERROR: &str = "server rejected the download";

/// Runs the two download flows. Outcomes only ever reach the notifier.
#[derive(Clone)]
pub struct DownloadExecutor {
    resolver: Arc<dyn SongUrlResolver>,
    proxy: Arc<dyn AudioProxyUrlBuilder>,
    saver: Arc<dyn FileSaver>,
    server: Arc<dyn ServerDownloader>,
}

impl DownloadExecutor {
    pub fn new(
        resolver: Arc<dyn SongUrlResolver>,
        proxy: Arc<dyn AudioProxyUrlBuilder>,
        saver: Arc<dyn FileSaver>,
        server: Arc<dyn ServerDownloader>,
    ) -> Self {
        Self {
            resolver,
            proxy,
            saver,
            server,
        }
    }

    pub async fn run(&self, job: DownloadJob, notifier: &dyn Notifier) {
        log::info!("Starting {:?} download of {}", job.target, job.song.name);
        match job.target {
            DownloadTarget::Browser => {
                self.download_to_browser(&job.song, &job.quality, notifier)
                    .await
            }
            DownloadTarget::Server => {
                self.download_to_server(&job.song, &job.quality, notifier)
                    .await
            }
        }
    }

    pub async fn download_to_browser(
        &self,
        song: &Song,
        quality: &Quality,
        notifier: &dyn Notifier,
    ) {
        notifier.show("Preparing download...", NotificationStyle::Default);

        match self.prepare_browser_download(song, quality).await {
            Ok((download_url, filename)) => {
                self.saver.save(&download_url, &filename);
                notifier.show(
                    &format!("Download started: {}", song.name),
                    NotificationStyle::Success,
                );
            }
            Err(e) => {
                log::error!("Download failed: {}", e);
                notifier.show(
                    "Download failed, please try again later",
                    NotificationStyle::Error,
                );
            }
        }
    }

    pub async fn download_to_server(
        &self,
        song: &Song,
        quality: &Quality,
        notifier: &dyn Notifier,
    ) {
        notifier.show("Downloading to server...", NotificationStyle::Default);

        match self.save_on_server(song, quality).await {
            Ok(filename) => {
                log::info!("Server saved {}", filename);
                notifier.show(
                    &format!("Download succeeded: {}", filename),
                    NotificationStyle::Success,
                );
            }
            Err(e) => {
                log::error!("Download to server failed: {}", e);
                notifier.show(&format!("Download failed: {}", e), NotificationStyle::Error);
            }
        }
    }

    async fn resolve(&self, song: &Song, quality: &Quality) -> Result<String, AppError> {
        let request_url = self.resolver.song_url(song, quality);
        let response = self.resolver.fetch_song_url(&request_url).await?;

        response
            .as_ref()
            .and_then(|r| r.usable_url())
            .map(str::to_string)
            .ok_or(AppError::Resolution)
    }

    async fn prepare_browser_download(
        &self,
        song: &Song,
        quality: &Quality,
    ) -> Result<(String, String), AppError> {
        let raw_url = self.resolve(song, quality).await?;
        let download_url = self.proxy.proxy_url(&raw_url)?;
        Ok((download_url, download_filename(song, quality)))
    }

    async fn save_on_server(&self, song: &Song, quality: &Quality) -> Result<String, AppError> {
        let url = self.resolve(song, quality).await?;
        let filename = download_filename(song, quality);

        let response = self
            .server
            .download_to_server(&ServerDownloadRequest {
                url,
                filename: filename.clone(),
            })
            .await?;

        if response.success {
            Ok(filename)
        } else {
            Err(AppError::ServerDownload(
                response
                    .error
                    .filter(|e| !e.is_empty())
                    .unwrap_or_else(|| SERVER_FALLBACK_ERROR.to_string()),
            ))
        }
    }
}
