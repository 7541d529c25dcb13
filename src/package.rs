//! Package stage: assembles the release archive and release notes.

use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

use crate::archive::archive;
use crate::assets::{fetch, AssetGroup, Downloader};
use crate::constants::STAGING_DIR;
use crate::error::{Error, Result};
use crate::files::{copy_into, create_dir_all, prepare_dir};
use crate::notes::write_release_notes;

#[derive(Debug, Clone)]
pub struct PackagePlan {
    pub clean: bool,
    pub directory: PathBuf,
    /// Name of the archive and of its top-level folder.
    pub archive_name: String,
    pub files: Vec<PathBuf>,
    /// Asset groups whose staging directories live under `staging_dir()`.
    pub asset_groups: Vec<AssetGroup>,
    /// Changelog document release notes are taken from.
    pub notes_document: PathBuf,
}

impl PackagePlan {
    /// Transient directory holding exactly the tree that becomes the archive.
    pub fn staging_dir(&self) -> PathBuf {
        staging_dir(&self.directory)
    }
}

pub fn staging_dir(package_dir: &Path) -> PathBuf {
    package_dir.join(STAGING_DIR)
}

/// What a packaging run left in the package directory.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PackageReport {
    pub archive: Option<PathBuf>,
    pub notes: Option<PathBuf>,
}

/// Runs a package plan.
///
/// Order: stage files, populate asset groups, write release notes, archive
/// the staging tree, remove the staging tree.
pub fn package(plan: &PackagePlan, downloader: &dyn Downloader) -> Result<PackageReport> {
    prepare_dir(&plan.directory, plan.clean)?;

    let staging = plan.staging_dir();
    create_dir_all(&staging)?;
    for file in &plan.files {
        copy_into(file, &staging)?;
    }

    for group in &plan.asset_groups {
        debug!("Populating asset group '{}'", group.staging_dir.display());
        fetch(group, downloader)?;
    }

    let notes = write_release_notes(&plan.notes_document, &plan.directory)?;
    let archive = archive(&staging, &plan.directory, &plan.archive_name)?;

    fs::remove_dir_all(&staging)
        .map_err(|source| Error::WriteError { path: staging.display().to_string(), source })?;

    info!("Packaged '{}' into '{}'", plan.archive_name, plan.directory.display());
    Ok(PackageReport { archive, notes })
}
