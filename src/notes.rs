//! Release notes generation from the changelog section of a markdown document.
//!
//! The expected document shape is:
//!
//! ```text
//! ## Change Log
//! - **v1.2.0**
//!   - Added something
//!   - Fixed something
//! - **v1.1.0**
//!   - ...
//! ```
//!
//! Only the entries of the first version block are collected.

use log::{debug, info};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crate::constants::{CHANGE_LOG_SECTION, RELEASE_NOTES_FILE, WHATS_CHANGED_HEADING};
use crate::error::{Error, Result};
use crate::files::{read_text, write_text};

static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^- \*\*(v[\d.]+)\*\*").expect("version pattern is valid"));

static CHANGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*-\s(.+)").expect("change pattern is valid"));

/// Collects the change entries of the most recent version below the changelog marker.
///
/// # Errors
/// * `Error::MissingSectionError` if no line equals the changelog marker
pub fn collect_changes(text: &str, document: &Path) -> Result<Vec<String>> {
    let mut lines = text.lines();
    if !lines.by_ref().any(|line| line.trim() == CHANGE_LOG_SECTION) {
        return Err(Error::MissingSectionError {
            document: document.display().to_string(),
            section: CHANGE_LOG_SECTION.to_string(),
        });
    }

    let mut changes = Vec::new();
    let mut in_version = false;
    for line in lines {
        if VERSION_RE.is_match(line) {
            if in_version {
                break;
            }
            in_version = true;
            continue;
        }
        if !in_version {
            continue;
        }
        if let Some(caps) = CHANGE_RE.captures(line) {
            changes.push(caps[1].trim().to_string());
        }
    }
    Ok(changes)
}

/// Formats change entries as a "What's Changed" document with LF endings.
pub fn format_notes(changes: &[String]) -> String {
    let mut notes = format!("{WHATS_CHANGED_HEADING}\n");
    for change in changes {
        notes.push_str("- ");
        notes.push_str(change);
        notes.push('\n');
    }
    notes
}

/// Builds release notes from `document`.
///
/// Returns `None` when the document does not exist or its latest version has no entries.
pub fn extract(document: &Path) -> Result<Option<String>> {
    if !document.exists() {
        debug!("Notes source '{}' does not exist", document.display());
        return Ok(None);
    }

    let text = read_text(document)?;
    let changes = collect_changes(&text, document)?;
    if changes.is_empty() {
        debug!("No changes listed for the latest version in '{}'", document.display());
        return Ok(None);
    }
    Ok(Some(format_notes(&changes)))
}

/// Extracts release notes from `document` and writes them into `dest_dir`.
///
/// Returns the path of the written file, if any.
pub fn write_release_notes(document: &Path, dest_dir: &Path) -> Result<Option<PathBuf>> {
    let Some(notes) = extract(document)? else {
        return Ok(None);
    };
    let path = dest_dir.join(RELEASE_NOTES_FILE);
    write_text(&path, &notes)?;
    info!("Wrote release notes to '{}'", path.display());
    Ok(Some(path))
}
