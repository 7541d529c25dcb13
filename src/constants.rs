//! Common constants used throughout the Astra application.

use std::time::Duration;

/// Default configuration file name looked up in the source directory
pub const CONFIG_FILE: &str = "astra.config.json";

/// Marker line introducing the changelog inside the notes document
pub const CHANGE_LOG_SECTION: &str = "## Change Log";

/// Heading of the generated release notes
pub const WHATS_CHANGED_HEADING: &str = "## What's Changed";

/// Name of the release notes file written next to the archive
pub const RELEASE_NOTES_FILE: &str = "release_notes.txt";

/// Staging subdirectory of the package directory, removed after archiving
pub const STAGING_DIR: &str = "tmp";

/// Marker of an include directive inside script sources
pub const INCLUDE_MARKER: &str = "--#include";

pub const DEFAULT_SOURCE_TAG: &str = ".in";
pub const DEFAULT_NEWLINE: &str = "\r\n";

/// Upper bound for a single asset download
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(60);
