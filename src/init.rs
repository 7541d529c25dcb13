//! Starter configuration generation for new projects.

use log::info;
use std::path::{Path, PathBuf};

use crate::constants::CONFIG_FILE;
use crate::error::{Error, Result};
use crate::files::write_text;

/// Configuration written by `astra init`.
pub fn starter_config() -> serde_json::Value {
    serde_json::json!({
        "project": {
            "name": "Project",
            "version": "v0.1.0",
            "author": "name"
        },
        "build": {
            "clean": true,
            "directory": "build",
            "scripts": [
                {
                    "name": "Effect",
                    "suffix": ".anm2",
                    "newline": "\r\n",
                    "source": {
                        "tag": ".in",
                        "include_directories": ["includes"],
                        "variables": { "LABEL": "加工" }
                    }
                }
            ]
        },
        "install": {
            "clean": true,
            "directory": "C:/ProgramData/aviutl2/Script"
        },
        "package": {
            "clean": true,
            "directory": "package",
            "archive": {
                "files": ["../README.md", "../LICENSE"],
                "assets": [
                    {
                        "directory": "assets",
                        "url": "https://example.com/assets.zip",
                        "texts": [
                            { "file": "credits.txt", "content": "This is a sample asset." }
                        ]
                    }
                ]
            },
            "notes": { "source": "../README.md" }
        }
    })
}

/// Writes the starter configuration into `dest_dir`.
///
/// An existing file is only replaced when `force` is set; otherwise `None` is returned.
pub fn init(dest_dir: &Path, force: bool) -> Result<Option<PathBuf>> {
    let path = dest_dir.join(CONFIG_FILE);
    if path.exists() && !force {
        info!("'{}' already exists, leaving it untouched", path.display());
        return Ok(None);
    }

    let mut content = serde_json::to_string_pretty(&starter_config())
        .map_err(|e| Error::ConfigError(e.to_string()))?;
    content.push('\n');
    write_text(&path, &content)?;
    Ok(Some(path))
}
