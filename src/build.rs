//! Build stage: resolves every declared script template into its output file.

use indexmap::IndexMap;
use log::{debug, info};
use std::path::PathBuf;

use crate::error::Result;
use crate::files::{prepare_dir, read_text, write_text};
use crate::template::{normalize_newlines, resolve};

/// A single templated source file mapped to one built output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    pub source: PathBuf,
    pub target: PathBuf,
    pub include_dirs: Vec<PathBuf>,
    /// Always holds `PROJECT_NAME` and `SCRIPT_NAME`.
    pub variables: IndexMap<String, String>,
    /// Line ending written to `target`.
    pub newline: String,
}

#[derive(Debug, Clone)]
pub struct BuildPlan {
    pub clean: bool,
    pub output_dir: PathBuf,
    pub scripts: Vec<Script>,
}

/// Files written by a build, in declaration order.
#[derive(Debug, Default)]
pub struct BuildReport {
    pub outputs: Vec<PathBuf>,
}

impl Script {
    /// Resolves the source template and returns the text as it will be written.
    ///
    /// # Errors
    /// * `Error::ReadError` if the source file cannot be read
    pub fn render(&self) -> Result<String> {
        let content = read_text(&self.source)?;
        let resolved = resolve(&content, &self.variables, &self.include_dirs, &self.source);
        Ok(normalize_newlines(&resolved, &self.newline))
    }
}

/// Runs a build plan.
///
/// Scripts are processed in declaration order and the first failure aborts the
/// run, so no later script is written after an error.
pub fn build(plan: &BuildPlan) -> Result<BuildReport> {
    prepare_dir(&plan.output_dir, plan.clean)?;

    let mut report = BuildReport::default();
    for script in &plan.scripts {
        debug!("Building '{}' from '{}'", script.target.display(), script.source.display());
        let content = script.render()?;
        write_text(&script.target, &content)?;
        report.outputs.push(script.target.clone());
    }

    info!("Built {} script(s) into '{}'", report.outputs.len(), plan.output_dir.display());
    Ok(report)
}
