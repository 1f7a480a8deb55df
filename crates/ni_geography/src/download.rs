use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use tracing::{debug, info};

use crate::GeographyError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadOutcome {
    AlreadyPresent,
    Downloaded { bytes: u64 },
}

/// Fetches published files once; nothing is retried.
#[derive(Default)]
pub struct Downloader {
    client: reqwest::Client,
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}

/// Takes the `key` field out of a JSON document.
pub fn extract_json_field(
    mut document: serde_json::Value,
    key: &str,
) -> Result<serde_json::Value, GeographyError> {
    document
        .get_mut(key)
        .map(serde_json::Value::take)
        .ok_or_else(|| GeographyError::MissingJsonField(key.to_string()))
}

impl Downloader {
    pub fn new() -> Self {
        Self::with_client(reqwest::Client::new())
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, GeographyError> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(GeographyError::Api {
                url: url.to_string(),
                status,
                message,
            });
        }

        Ok(response)
    }

    /// Streams `url` to `path` unless `path` already exists. The body is
    /// written next to `path` first so an interrupted download is never
    /// mistaken for a complete file.
    pub async fn download_if_missing<P: AsRef<Path>>(
        &self,
        url: &str,
        path: P,
    ) -> Result<DownloadOutcome, GeographyError> {
        let path = path.as_ref();
        if path.is_file() {
            debug!(path = %path.display(), "Already downloaded");
            return Ok(DownloadOutcome::AlreadyPresent);
        }

        let mut response = self.get(url).await?;

        let partial = partial_path(path);
        let mut writer = BufWriter::with_capacity(64 * 1024, File::create(&partial)?);
        let mut bytes = 0;
        while let Some(chunk) = response.chunk().await? {
            writer.write_all(&chunk)?;
            bytes += chunk.len() as u64;
        }
        writer.flush()?;
        drop(writer);

        std::fs::rename(&partial, path)?;

        info!(url, bytes, path = %path.display(), "Downloaded");

        Ok(DownloadOutcome::Downloaded { bytes })
    }

    /// Fetches a JSON document and stores only its `key` field, unless `path`
    /// already exists.
    pub async fn download_json_field_if_missing<P: AsRef<Path>>(
        &self,
        url: &str,
        path: P,
        key: &str,
    ) -> Result<DownloadOutcome, GeographyError> {
        let path = path.as_ref();
        if path.is_file() {
            debug!(path = %path.display(), "Already downloaded");
            return Ok(DownloadOutcome::AlreadyPresent);
        }

        let body = self.get(url).await?.bytes().await?;
        let field = extract_json_field(serde_json::from_slice(&body)?, key)?;

        let content = serde_json::to_vec(&field)?;
        std::fs::write(path, &content)?;

        info!(url, key, path = %path.display(), "Downloaded JSON field");

        Ok(DownloadOutcome::Downloaded {
            bytes: content.len() as u64,
        })
    }
}
