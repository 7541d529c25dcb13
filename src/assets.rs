//! Asset groups: archive sub-trees populated from a remote zip bundle and/or inline texts.

use log::{debug, info};
use std::io::Cursor;
use std::path::{Path, PathBuf};

use crate::constants::FETCH_TIMEOUT;
use crate::error::{Error, Result};
use crate::files::{create_dir_all, write_text};
use crate::template::normalize_newlines;

/// A literal text file written into an asset group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineText {
    /// Path relative to the group's staging directory.
    pub file: PathBuf,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetGroup {
    pub staging_dir: PathBuf,
    pub remote_url: Option<String>,
    pub inline_texts: Vec<InlineText>,
}

/// Retrieves a remote resource fully into memory.
pub trait Downloader {
    fn download(&self, url: &str) -> Result<Vec<u8>>;
}

/// Blocking HTTP downloader with a bounded request timeout.
pub struct HttpDownloader {
    client: reqwest::blocking::Client,
}

impl HttpDownloader {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|source| Error::DownloadError { url: "<http client>".to_string(), source })?;
        Ok(Self { client })
    }
}

impl Downloader for HttpDownloader {
    fn download(&self, url: &str) -> Result<Vec<u8>> {
        info!("Downloading '{url}'");
        let to_error = |source| Error::DownloadError { url: url.to_string(), source };

        let response = self.client.get(url).send().map_err(to_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::DownloadStatusError {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let bytes = response.bytes().map_err(to_error)?;
        debug!("Downloaded {} bytes from '{url}'", bytes.len());
        Ok(bytes.to_vec())
    }
}

/// Extracts every entry of an in-memory zip archive into `dest`.
///
/// Entries whose names would escape `dest` are not written.
pub fn extract_zip(bytes: Vec<u8>, dest: &Path) -> Result<()> {
    create_dir_all(dest)?;
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    debug!("Extracting {} entries into '{}'", archive.len(), dest.display());
    archive.extract(dest)?;
    Ok(())
}

/// Populates an asset group's staging directory.
///
/// The remote bundle, when configured, is extracted first; inline texts are
/// then written over it with LF line endings.
pub fn fetch(group: &AssetGroup, downloader: &dyn Downloader) -> Result<()> {
    if let Some(url) = &group.remote_url {
        let bytes = downloader.download(url)?;
        extract_zip(bytes, &group.staging_dir)?;
    }

    for text in &group.inline_texts {
        let path = group.staging_dir.join(&text.file);
        debug!("Writing inline asset '{}'", path.display());
        write_text(&path, &normalize_newlines(&text.content, "\n"))?;
    }
    Ok(())
}
