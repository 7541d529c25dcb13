//! Filesystem primitives shared by the build, install and package stages.

use log::{debug, warn};
use std::fs::{self, File, FileTimes};
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{Error, Result};

fn write_error(path: &Path, source: io::Error) -> Error {
    Error::WriteError { path: path.display().to_string(), source }
}

/// Reads a UTF-8 text file, reporting the path on failure.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|source| Error::ReadError { path: path.display().to_string(), source })
}

/// Writes `content` to `path`, creating parent directories as needed.
pub fn write_text(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }
    fs::write(path, content).map_err(|e| write_error(path, e))
}

pub fn create_dir_all(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| write_error(path, e))
}

/// Removes `dir` recursively when `clean` is set and it is an existing directory,
/// then makes sure it exists.
pub fn prepare_dir(dir: &Path, clean: bool) -> Result<()> {
    if clean && dir.is_dir() {
        debug!("Cleaning directory '{}'", dir.display());
        fs::remove_dir_all(dir).map_err(|e| write_error(dir, e))?;
    }
    create_dir_all(dir)
}

/// Copies a regular file, carrying over its permissions and its access and
/// modification times. Permissions are applied last.
pub fn copy_file(source: &Path, target: &Path) -> Result<()> {
    if let Some(parent) = target.parent() {
        create_dir_all(parent)?;
    }

    let metadata = fs::metadata(source)
        .map_err(|e| Error::ReadError { path: source.display().to_string(), source: e })?;
    let mut input = File::open(source)
        .map_err(|e| Error::ReadError { path: source.display().to_string(), source: e })?;
    let mut output = File::create(target).map_err(|e| write_error(target, e))?;
    io::copy(&mut input, &mut output).map_err(|e| write_error(target, e))?;

    let mut times = FileTimes::new();
    if let Ok(accessed) = metadata.accessed() {
        times = times.set_accessed(accessed);
    }
    if let Ok(modified) = metadata.modified() {
        times = times.set_modified(modified);
    }
    output.set_times(times).map_err(|e| write_error(target, e))?;
    drop(output);

    fs::set_permissions(target, metadata.permissions()).map_err(|e| write_error(target, e))?;

    debug!("Copied '{}' to '{}'", source.display(), target.display());
    Ok(())
}

/// Copies `source` into `dest_dir` under its own file name.
///
/// Directories are copied recursively, merging into an existing tree.
/// Returns `None` when `source` does not exist.
pub fn copy_into(source: &Path, dest_dir: &Path) -> Result<Option<PathBuf>> {
    let Some(name) = source.file_name() else {
        return Ok(None);
    };
    let target = dest_dir.join(name);

    if source.is_dir() {
        for entry in WalkDir::new(source).sort_by_file_name() {
            let entry = entry?;
            let relative = entry
                .path()
                .strip_prefix(source)
                .map_err(|e| Error::ConfigError(e.to_string()))?;
            let dest = target.join(relative);
            if entry.file_type().is_dir() {
                create_dir_all(&dest)?;
            } else if entry.file_type().is_file() {
                copy_file(entry.path(), &dest)?;
            }
        }
        Ok(Some(target))
    } else if source.is_file() {
        copy_file(source, &target)?;
        Ok(Some(target))
    } else {
        warn!("Skipping missing path '{}'", source.display());
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_prepare_dir_cleans_only_when_asked() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("out");
        write_text(&dir.join("stale.txt"), "old").unwrap();

        prepare_dir(&dir, false).unwrap();
        assert!(dir.join("stale.txt").exists());

        prepare_dir(&dir, true).unwrap();
        assert!(dir.is_dir());
        assert!(!dir.join("stale.txt").exists());
    }

    #[test]
    fn test_copy_file_keeps_modification_time() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("a.txt");
        write_text(&source, "a").unwrap();
        let past = std::time::SystemTime::UNIX_EPOCH + std::time::Duration::from_secs(1_000_000);
        File::options()
            .write(true)
            .open(&source)
            .unwrap()
            .set_modified(past)
            .unwrap();

        let target = temp_dir.path().join("nested/b.txt");
        copy_file(&source, &target).unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "a");
        assert_eq!(fs::metadata(&target).unwrap().modified().unwrap(), past);
    }

    #[cfg(unix)]
    #[test]
    fn test_copy_file_read_only_source() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("LICENSE");
        write_text(&source, "MIT").unwrap();
        let past = std::time::SystemTime::UNIX_EPOCH + std::time::Duration::from_secs(2_000_000);
        File::options()
            .write(true)
            .open(&source)
            .unwrap()
            .set_modified(past)
            .unwrap();
        fs::set_permissions(&source, fs::Permissions::from_mode(0o444)).unwrap();

        let target = temp_dir.path().join("out/LICENSE");
        copy_file(&source, &target).unwrap();

        let metadata = fs::metadata(&target).unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "MIT");
        assert_eq!(metadata.permissions().mode() & 0o777, 0o444);
        assert_eq!(metadata.modified().unwrap(), past);

        copy_into(&source, &temp_dir.path().join("staging")).unwrap();
        assert!(temp_dir.path().join("staging/LICENSE").is_file());
    }

    #[test]
    fn test_copy_into_missing_source() {
        let temp_dir = TempDir::new().unwrap();
        let result = copy_into(&temp_dir.path().join("nope"), temp_dir.path()).unwrap();
        assert!(result.is_none());
    }
}
