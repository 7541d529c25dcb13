//! Astra turns a templated script source tree into deployable artifacts for AviUtl2.
//! It resolves `${VARIABLE}` and `--#include` templates into concrete scripts,
//! installs them into the host application's script directory, and packages a
//! release archive with generated release notes and optional remote assets.

/// Zip archive creation rooted at a self-named top-level folder
pub mod archive;

/// Remote zip bundles and inline text assets
pub mod assets;

/// Build orchestration over the declared scripts
pub mod build;

/// Command-line interface module for the Astra application
pub mod cli;

/// Configuration loading, schema validation and plan construction
/// Supports JSON and YAML content
pub mod config;

pub mod constants;

/// Error types and handling for the Astra application
pub mod error;

/// Filesystem primitives shared by the stages
pub mod files;

/// Starter configuration generation
pub mod init;

/// Copies build artifacts into an install destination
pub mod install;

/// Release notes extraction from a changelog document
pub mod notes;

/// Package orchestration: staging, assets, notes, archive
pub mod package;

/// Variable substitution and include resolution
pub mod template;
