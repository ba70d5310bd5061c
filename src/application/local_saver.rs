use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use futures::{stream::BoxStream, StreamExt};
use tokio::io::AsyncWriteExt;

use crate::{
    api::ApiClient, application::ports::FileSaver, domain::AppError, utils::sanitize_filename,
};

/// Saves files into a local directory in the background.
#[derive(Clone)]
pub struct LocalFileSaver {
    api_client: ApiClient,
    download_dir: Arc<RwLock<PathBuf>>,
}

impl LocalFileSaver {
    pub fn new(api_client: ApiClient, download_dir: PathBuf) -> Self {
        Self {
            api_client,
            download_dir: Arc::new(RwLock::new(download_dir)),
        }
    }

    pub fn download_dir(&self) -> PathBuf {
        match self.download_dir.read() {
            Ok(dir) => dir.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn set_download_dir(&self, dir: PathBuf) {
        match self.download_dir.write() {
            Ok(mut current) => *current = dir,
            Err(poisoned) => *poisoned.into_inner() = dir,
        }
    }

    pub async fn choose_download_dir(&self) -> Option<PathBuf> {
        rfd::AsyncFileDialog::new()
            .set_directory(self.download_dir())
            .pick_folder()
            .await
            .map(|handle| handle.path().to_path_buf())
    }

    /// Streams `url` into `<dir>/<filename>` and returns the written path.
    ///
    /// The body lands in a `.part` file first; nothing appears under the final
    /// name unless the whole body was written.
    pub async fn fetch_to_disk(
        &self,
        url: &str,
        dir: &Path,
        filename: &str,
    ) -> Result<PathBuf, AppError> {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| AppError::Io(format!("Failed to create directory: {}", e)))?;

        let path = dir.join(sanitize_filename(filename));
        let part_path = part_path_for(&path);
        let stream = self.api_client.download_file_stream(url).await?;

        if let Err(e) = write_stream(&part_path, stream.boxed()).await {
            if let Err(remove_err) = tokio::fs::remove_file(&part_path).await {
                log::warn!(
                    "Failed to remove {}: {}",
                    part_path.display(),
                    remove_err
                );
            }
            return Err(e);
        }

        tokio::fs::rename(&part_path, &path)
            .await
            .map_err(|e| AppError::Io(format!("Failed to finalize file: {}", e)))?;

        Ok(path)
    }
}

fn part_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".part");
    path.with_file_name(name)
}

async fn write_stream(
    path: &Path,
    mut stream: BoxStream<'static, crate::api::Result<bytes::Bytes>>,
) -> Result<(), AppError> {
    let mut file = tokio::fs::File::create(path)
        .await
        .map_err(|e| AppError::Io(format!("Failed to create file: {}", e)))?;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk)
            .await
            .map_err(|e| AppError::Io(format!("Write error: {}", e)))?;
    }

    file.sync_all()
        .await
        .map_err(|e| AppError::Io(format!("Failed to sync file: {}", e)))
}

impl FileSaver for LocalFileSaver {
    fn save(&self, url: &str, filename: &str) {
        let saver = self.clone();
        let url = url.to_string();
        let filename = filename.to_string();
        let dir = self.download_dir();

        tokio::spawn(async move {
            match saver.fetch_to_disk(&url, &dir, &filename).await {
                Ok(path) => log::info!("Saved {}", path.display()),
                Err(e) => log::error!("Saving {} failed: {}", filename, e),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::api::ApiConfig;

    #[tokio::test]
    async fn test_fetch_to_disk_writes_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/audio.mp3")
            .with_body("ID3 fake audio")
            .create_async()
            .await;

        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("music");
        let saver = LocalFileSaver::new(ApiClient::new(ApiConfig::default()), dir.clone());

        let path = saver
            .fetch_to_disk(
                &format!("{}/audio.mp3", server.url()),
                &dir,
                "AC/DC - Song [High].mp3",
            )
            .await
            .unwrap();

        assert_eq!(path, dir.join("AC_DC - Song [High].mp3"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "ID3 fake audio");
    }

    #[tokio::test]
    async fn test_fetch_to_disk_http_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/gone.mp3")
            .with_status(404)
            .create_async()
            .await;

        let tmp = tempfile::tempdir().unwrap();
        let saver = LocalFileSaver::new(ApiClient::new(ApiConfig::default()), tmp.path().into());

        let result = saver
            .fetch_to_disk(&format!("{}/gone.mp3", server.url()), tmp.path(), "x.mp3")
            .await;

        assert!(matches!(result, Err(AppError::Network(_))));
        assert!(!tmp.path().join("x.mp3").exists());
    }

    #[tokio::test]
    async fn test_fetch_to_disk_interrupted_body_leaves_no_file() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/cut.mp3")
            .with_chunked_body(|w| {
                w.write_all(b"ID3 partial")?;
                Err(std::io::Error::new(
                    std::io::ErrorKind::ConnectionReset,
                    "connection dropped",
                ))
            })
            .create_async()
            .await;

        let tmp = tempfile::tempdir().unwrap();
        let saver = LocalFileSaver::new(ApiClient::new(ApiConfig::default()), tmp.path().into());

        let result = saver
            .fetch_to_disk(&format!("{}/cut.mp3", server.url()), tmp.path(), "x.mp3")
            .await;

        assert!(result.is_err());
        assert!(!tmp.path().join("x.mp3").exists());
        assert!(!tmp.path().join("x.mp3.part").exists());
    }

    #[test]
    fn test_part_path_keeps_extension() {
        assert_eq!(
            part_path_for(Path::new("/music/Title - Solo [High].mp3")),
            PathBuf::from("/music/Title - Solo [High].mp3.part")
        );
    }

    #[test]
    fn test_set_download_dir() {
        let saver = LocalFileSaver::new(ApiClient::new(ApiConfig::default()), "a".into());
        saver.set_download_dir("b".into());
        assert_eq!(saver.download_dir(), PathBuf::from("b"));
    }
}
