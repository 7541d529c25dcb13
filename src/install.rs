//! Install stage: copies build artifacts into the host application's script directory.

use log::{debug, info};
use std::path::PathBuf;

use crate::error::Result;
use crate::files::{copy_file, prepare_dir};

#[derive(Debug, Clone)]
pub struct InstallPlan {
    pub clean: bool,
    /// No destination means there is nothing to install.
    pub destination: Option<PathBuf>,
    pub artifacts: Vec<PathBuf>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum InstallOutcome {
    /// No destination was configured; nothing was touched.
    NoDestination,
    /// Artifacts copied into the destination, in plan order.
    Installed { files: Vec<PathBuf> },
}

/// Copies every existing artifact into the destination directory.
///
/// Artifacts that are missing or are not regular files are skipped.
pub fn install(plan: &InstallPlan) -> Result<InstallOutcome> {
    let Some(destination) = &plan.destination else {
        debug!("No install destination configured");
        return Ok(InstallOutcome::NoDestination);
    };

    prepare_dir(destination, plan.clean)?;

    let mut files = Vec::new();
    for artifact in &plan.artifacts {
        let Some(name) = artifact.file_name().filter(|_| artifact.is_file()) else {
            debug!("Skipping missing artifact '{}'", artifact.display());
            continue;
        };
        let target = destination.join(name);
        copy_file(artifact, &target)?;
        files.push(target);
    }

    info!("Installed {} file(s) into '{}'", files.len(), destination.display());
    Ok(InstallOutcome::Installed { files })
}
