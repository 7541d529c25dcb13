//! Zip archive creation for release packages.

use log::{debug, info};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::error::{Error, Result};

/// Returns the entry name of `path` inside the archive: `root/<relative path>`
/// joined with forward slashes on every platform.
pub fn entry_name(root: &str, relative: &Path) -> String {
    std::iter::once(root.to_string())
        .chain(
            relative
                .components()
                .map(|component| component.as_os_str().to_string_lossy().into_owned()),
        )
        .collect::<Vec<_>>()
        .join("/")
}

/// Writes every regular file under `source_dir` into `dest_dir/<name>.zip`,
/// rooted at a top-level folder called `name`.
///
/// Entries are written in file name order with fixed timestamps, so the same
/// tree always produces the same archive. Nothing is written when `dest_dir`
/// is not an existing directory.
pub fn archive(source_dir: &Path, dest_dir: &Path, name: &str) -> Result<Option<PathBuf>> {
    if !dest_dir.is_dir() {
        debug!("Archive destination '{}' does not exist", dest_dir.display());
        return Ok(None);
    }

    let path = dest_dir.join(format!("{name}.zip"));
    let file = File::create(&path)
        .map_err(|source| Error::WriteError { path: path.display().to_string(), source })?;
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default())
        .unix_permissions(0o644);

    if source_dir.is_dir() {
        for entry in WalkDir::new(source_dir).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry
                .path()
                .strip_prefix(source_dir)
                .map_err(|e| Error::ConfigError(e.to_string()))?;
            let entry_name = entry_name(name, relative);
            debug!("Adding '{entry_name}'");

            writer.start_file(entry_name, options)?;
            let mut input = File::open(entry.path()).map_err(|source| Error::ReadError {
                path: entry.path().display().to_string(),
                source,
            })?;
            io::copy(&mut input, &mut writer)?;
        }
    }

    writer.finish()?;
    info!("Created archive '{}'", path.display());
    Ok(Some(path))
}
