//! Streaming archive download with progress reporting.
//!
//! The body is written to `<dest>.part` and renamed onto `dest` only once
//! the whole response has been written, so a file at `dest` is always a
//! complete download.

use std::path::{Path, PathBuf};

use futures::StreamExt;
use reqwest::Client;
use thiserror::Error;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::Reporter;

#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("Download failed: HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Download failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Download failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Path used while a download to `dest` is in flight.
pub fn partial_path(dest: &Path) -> PathBuf {
    let mut name = dest.file_name().unwrap_or_default().to_os_string();
    name.push(".part");
    dest.with_file_name(name)
}

/// Stream `url` into `dest`, reporting cumulative progress after every chunk.
///
/// Returns the number of bytes written.
pub async fn download<R: Reporter + ?Sized>(
    client: &Client,
    url: &str,
    dest: &Path,
    reporter: &R,
) -> Result<u64, DownloadError> {
    let part = partial_path(dest);
    match tokio::fs::remove_file(&part).await {
        Ok(()) => tracing::debug!(path = %part.display(), "Discarded stale partial download"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    tracing::debug!(%url, "Starting download");
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(DownloadError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let total_size = response.content_length();
    reporter.downloading(0, total_size);

    if let Some(parent) = dest.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let mut file = File::create(&part).await?;
    let mut stream = response.bytes_stream();
    let mut downloaded: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        downloaded += chunk.len() as u64;
        reporter.downloading(downloaded, total_size);
    }

    file.flush().await?;
    file.sync_all().await?;
    drop(file);

    tokio::fs::rename(&part, dest).await?;
    reporter.download_finished();
    tracing::debug!(bytes = downloaded, dest = %dest.display(), "Download complete");

    Ok(downloaded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        progress: Mutex<Vec<(u64, Option<u64>)>>,
        finished: Mutex<bool>,
    }

    impl Reporter for Recorder {
        fn stage(&self, _: &str) {}
        fn downloading(&self, current: u64, total: Option<u64>) {
            self.progress.lock().unwrap().push((current, total));
        }
        fn download_finished(&self) {
            *self.finished.lock().unwrap() = true;
        }
        fn info(&self, _: &str) {}
        fn success(&self, _: &str) {}
        fn warning(&self, _: &str) {}
        fn error(&self, _: &str) {}
    }

    #[tokio::test]
    async fn streams_body_and_reports_progress() {
        let body = vec![42u8; 100_000];
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/Blender4.2/blender-4.2.2-linux-x64.tar.xz")
            .with_status(200)
            .with_body(&body)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("blender-4.2.2-linux-x64.tar.xz");
        let recorder = Recorder::default();
        let url = format!("{}/Blender4.2/blender-4.2.2-linux-x64.tar.xz", server.url());

        let written = download(&Client::new(), &url, &dest, &recorder)
            .await
            .unwrap();

        assert_eq!(written, body.len() as u64);
        assert_eq!(std::fs::read(&dest).unwrap(), body);
        assert!(!partial_path(&dest).exists());
        assert!(*recorder.finished.lock().unwrap());

        let progress = recorder.progress.lock().unwrap();
        assert_eq!(progress.first().map(|p| p.0), Some(0));
        assert_eq!(progress.last().map(|p| p.0), Some(100_000));
        assert!(progress.windows(2).all(|w| w[0].0 <= w[1].0));
    }

    #[tokio::test]
    async fn error_status_fails_without_creating_dest() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/missing.zip")
            .with_status(404)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("missing.zip");
        let err = download(
            &Client::new(),
            &format!("{}/missing.zip", server.url()),
            &dest,
            &crate::NullReporter,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, DownloadError::Status { status: 404, .. }));
        assert!(!dest.exists());
    }

    #[tokio::test]
    async fn stale_partial_file_is_replaced() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/a.zip")
            .with_status(200)
            .with_body("fresh")
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("a.zip");
        std::fs::write(partial_path(&dest), "truncated garbage").unwrap();

        download(
            &Client::new(),
            &format!("{}/a.zip", server.url()),
            &dest,
            &crate::NullReporter,
        )
        .await
        .unwrap();

        assert_eq!(std::fs::read_to_string(&dest).unwrap(), "fresh");
        assert!(!partial_path(&dest).exists());
    }

    #[test]
    fn partial_path_appends_suffix() {
        assert_eq!(
            partial_path(Path::new("/tmp/source/blender-4.2.2-windows-x64.zip")),
            Path::new("/tmp/source/blender-4.2.2-windows-x64.zip.part")
        );
    }
}
