//! Configuration handling for Astra projects.
//! This module loads `astra.config.json`, validates it against the embedded
//! schema and turns it into build, install and package plans.
//!
//! Every relative path in the configuration is anchored to the directory that
//! contains the configuration file, never to the process working directory.

use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

use crate::assets::{AssetGroup, InlineText};
use crate::build::{BuildPlan, Script};
use crate::constants::{DEFAULT_NEWLINE, DEFAULT_SOURCE_TAG};
use crate::error::{Error, Result};
use crate::files::read_text;
use crate::install::InstallPlan;
use crate::package::{staging_dir, PackagePlan};

fn default_true() -> bool {
    true
}

fn default_tag() -> String {
    DEFAULT_SOURCE_TAG.to_string()
}

fn default_newline() -> String {
    DEFAULT_NEWLINE.to_string()
}

#[derive(Debug, Deserialize)]
pub struct ProjectSection {
    pub name: String,
    pub version: Option<String>,
    pub author: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SourceSection {
    /// Inserted between script name and suffix to form the source file name.
    #[serde(default = "default_tag")]
    pub tag: String,
    #[serde(default)]
    pub include_directories: Vec<String>,
    #[serde(default)]
    pub variables: IndexMap<String, String>,
}

impl Default for SourceSection {
    fn default() -> Self {
        Self {
            tag: default_tag(),
            include_directories: Vec::new(),
            variables: IndexMap::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ScriptEntry {
    pub name: Option<String>,
    pub suffix: String,
    #[serde(default = "default_newline")]
    pub newline: String,
    #[serde(default)]
    pub source: SourceSection,
}

#[derive(Debug, Deserialize)]
pub struct BuildSection {
    #[serde(default = "default_true")]
    pub clean: bool,
    pub directory: String,
    pub scripts: Vec<ScriptEntry>,
}

#[derive(Debug, Deserialize)]
pub struct InstallSection {
    #[serde(default = "default_true")]
    pub clean: bool,
    pub directory: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TextEntry {
    pub file: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct AssetEntry {
    pub directory: String,
    pub url: Option<String>,
    #[serde(default)]
    pub texts: Vec<TextEntry>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ArchiveSection {
    #[serde(default)]
    pub files: Vec<String>,
    #[serde(default)]
    pub assets: Vec<AssetEntry>,
}

#[derive(Debug, Deserialize)]
pub struct NotesSection {
    pub source: String,
}

#[derive(Debug, Deserialize)]
pub struct PackageSection {
    #[serde(default = "default_true")]
    pub clean: bool,
    pub directory: String,
    #[serde(default)]
    pub archive: ArchiveSection,
    pub notes: NotesSection,
}

/// A loaded and validated project configuration.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Directory containing the configuration file.
    #[serde(skip)]
    pub root: PathBuf,
    pub project: ProjectSection,
    pub build: BuildSection,
    pub install: Option<InstallSection>,
    pub package: Option<PackageSection>,
}

/// JSON schema every configuration must satisfy.
pub fn config_schema() -> serde_json::Value {
    let string_array = serde_json::json!({ "type": "array", "items": { "type": "string" } });

    serde_json::json!({
        "type": "object",
        "required": ["project", "build"],
        "properties": {
            "project": {
                "type": "object",
                "required": ["name"],
                "properties": {
                    "name": { "type": "string" },
                    "version": { "type": "string" },
                    "author": { "type": "string" }
                }
            },
            "build": {
                "type": "object",
                "required": ["directory", "scripts"],
                "properties": {
                    "clean": { "type": "boolean" },
                    "directory": { "type": "string" },
                    "scripts": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "required": ["suffix", "source"],
                            "properties": {
                                "name": { "type": "string" },
                                "suffix": { "type": "string" },
                                "newline": { "type": "string" },
                                "source": {
                                    "type": "object",
                                    "properties": {
                                        "tag": { "type": "string" },
                                        "include_directories": string_array,
                                        "variables": {
                                            "type": "object",
                                            "additionalProperties": { "type": "string" }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            },
            "install": {
                "type": "object",
                "properties": {
                    "clean": { "type": "boolean" },
                    "directory": { "type": "string" }
                }
            },
            "package": {
                "type": "object",
                "required": ["directory", "notes"],
                "properties": {
                    "clean": { "type": "boolean" },
                    "directory": { "type": "string" },
                    "archive": {
                        "type": "object",
                        "properties": {
                            "files": string_array,
                            "assets": {
                                "type": "array",
                                "items": {
                                    "type": "object",
                                    "required": ["directory"],
                                    "properties": {
                                        "directory": { "type": "string" },
                                        "url": { "type": "string" },
                                        "texts": {
                                            "type": "array",
                                            "items": {
                                                "type": "object",
                                                "required": ["file", "content"],
                                                "properties": {
                                                    "file": { "type": "string" },
                                                    "content": { "type": "string" }
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    },
                    "notes": {
                        "type": "object",
                        "required": ["source"],
                        "properties": {
                            "source": { "type": "string" }
                        }
                    }
                }
            }
        },
        "additionalProperties": true
    })
}

/// Parses configuration content, trying JSON first and YAML second.
pub fn parse_config(content: &str) -> std::result::Result<serde_json::Value, String> {
    match serde_json::from_str(content) {
        Ok(value) => Ok(value),
        Err(_) => serde_yaml::from_str(content).map_err(|e| e.to_string()),
    }
}

/// Validates a parsed configuration against [`config_schema`].
///
/// # Errors
/// * `Error::ConfigValidationError` with the first violation found
pub fn validate_config(value: &serde_json::Value) -> Result<()> {
    let validator = jsonschema::validator_for(&config_schema())
        .map_err(|e| Error::ConfigError(format!("Invalid schema: {e}")))?;
    let first_error = validator.iter_errors(value).next().map(|error| error.to_string());
    match first_error {
        Some(message) => Err(Error::ConfigValidationError(message)),
        None => Ok(()),
    }
}

/// Loads, validates and deserializes the configuration file at `path`.
///
/// # Errors
/// * `Error::ConfigNotFoundError` if `path` is not a file
/// * `Error::ConfigParseError` if the content is neither JSON nor YAML
/// * `Error::ConfigValidationError` if the schema is not satisfied
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.is_file() {
        return Err(Error::ConfigNotFoundError { path: path.display().to_string() });
    }
    let path = fs::canonicalize(path)?;
    debug!("Loading configuration from {}", path.display());

    let content = read_text(&path)?;
    let parse_error =
        |message: String| Error::ConfigParseError { path: path.display().to_string(), message };

    let value = parse_config(&content).map_err(parse_error)?;
    validate_config(&value)?;

    let mut config: Config =
        serde_json::from_value(value).map_err(|e| parse_error(e.to_string()))?;
    config.root = path.parent().map(Path::to_path_buf).unwrap_or_default();
    Ok(config)
}

impl Config {
    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }

    fn build_dir(&self) -> PathBuf {
        self.resolve(&self.build.directory)
    }

    /// The declared scripts with their paths and variables resolved.
    pub fn scripts(&self) -> Vec<Script> {
        let build_dir = self.build_dir();
        let project = &self.project;

        self.build
            .scripts
            .iter()
            .map(|entry| {
                let name = entry.name.as_deref().unwrap_or(&project.name);
                let source = &entry.source;

                let mut variables = source.variables.clone();
                variables.insert("PROJECT_NAME".to_string(), project.name.clone());
                variables.insert("SCRIPT_NAME".to_string(), name.to_string());
                if let Some(version) = &project.version {
                    variables.insert("VERSION".to_string(), version.clone());
                }
                if let Some(author) = &project.author {
                    variables.insert("AUTHOR".to_string(), author.clone());
                }

                Script {
                    source: self.root.join(format!("{name}{}{}", source.tag, entry.suffix)),
                    target: build_dir.join(format!("{name}{}", entry.suffix)),
                    include_dirs: source
                        .include_directories
                        .iter()
                        .map(|dir| self.resolve(dir))
                        .collect(),
                    variables,
                    newline: entry.newline.clone(),
                }
            })
            .collect()
    }

    pub fn build_plan(&self) -> BuildPlan {
        BuildPlan {
            clean: self.build.clean,
            output_dir: self.build_dir(),
            scripts: self.scripts(),
        }
    }

    /// Builds the install plan; `destination` overrides the configured directory.
    ///
    /// A missing `install` section behaves like one without a directory.
    pub fn install_plan(&self, destination: Option<PathBuf>) -> InstallPlan {
        let section = self.install.as_ref();
        let configured = section
            .and_then(|install| install.directory.as_deref())
            .map(|dir| self.resolve(dir));

        InstallPlan {
            clean: section.map_or(true, |install| install.clean),
            destination: destination.or(configured),
            artifacts: self.scripts().into_iter().map(|script| script.target).collect(),
        }
    }

    /// Builds the package plan.
    ///
    /// # Errors
    /// * `Error::ConfigError` if the `package` section is missing or an asset URL is invalid
    pub fn package_plan(&self) -> Result<PackagePlan> {
        let section = self.package.as_ref().ok_or_else(|| {
            Error::ConfigError("missing 'package' section".to_string())
        })?;
        let directory = self.resolve(&section.directory);
        let staging = staging_dir(&directory);

        let mut files: Vec<PathBuf> =
            section.archive.files.iter().map(|file| self.resolve(file)).collect();
        files.extend(self.scripts().into_iter().map(|script| script.target));

        let asset_groups = section
            .archive
            .assets
            .iter()
            .map(|asset| -> Result<AssetGroup> {
                // An empty url means the group has no remote bundle.
                let remote_url = asset.url.clone().filter(|url| !url.is_empty());
                if let Some(url) = &remote_url {
                    Url::parse(url).map_err(|e| {
                        Error::ConfigError(format!("invalid asset url '{url}': {e}"))
                    })?;
                }
                Ok(AssetGroup {
                    staging_dir: staging.join(&asset.directory),
                    remote_url,
                    inline_texts: asset
                        .texts
                        .iter()
                        .map(|text| InlineText {
                            file: PathBuf::from(&text.file),
                            content: text.content.clone(),
                        })
                        .collect(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(PackagePlan {
            clean: section.clean,
            directory,
            archive_name: self.project.name.clone(),
            files,
            asset_groups,
            notes_document: self.resolve(&section.notes.source),
        })
    }
}
