//! Flat text templating for script sources.
//!
//! Two passes are applied to a source text, in this order:
//! 1. `${NAME}` tokens are replaced with variable values. Unknown names are left as is.
//! 2. Lines of the form `--#include "path"` or `--#include <path>` are replaced with
//!    the raw text of the first matching file.
//!
//! Neither pass re-scans its own output: variable values are never substituted
//! again and included text is never searched for further includes or variables.

use indexmap::IndexMap;
use log::debug;
use regex::{Captures, Regex};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crate::constants::INCLUDE_MARKER;

static VARIABLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Za-z0-9_]+)\}").expect("variable pattern is valid")
});

static INCLUDE_RE: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(
        r#"^[ \t]*{}[ \t]+(?:"([^"]+)"|<([^>]+)>).*$"#,
        regex::escape(INCLUDE_MARKER)
    );
    Regex::new(&pattern).expect("include pattern is valid")
});

/// Where an include directive asks to be looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IncludeTarget<'a> {
    /// `"path"`: the including file's directory first, then the include directories.
    Local(&'a str),
    /// `<path>`: the include directories only.
    Library(&'a str),
}

impl<'a> IncludeTarget<'a> {
    /// Parses a single line (without its terminator) as an include directive.
    pub fn parse(line: &'a str) -> Option<Self> {
        let caps = INCLUDE_RE.captures(line)?;
        if let Some(quoted) = caps.get(1) {
            Some(Self::Local(quoted.as_str()))
        } else {
            caps.get(2).map(|angled| Self::Library(angled.as_str()))
        }
    }

    /// Candidate files in lookup order.
    pub fn candidates(&self, include_dirs: &[PathBuf], self_path: &Path) -> Vec<PathBuf> {
        match self {
            Self::Local(path) => self_path
                .parent()
                .map(|dir| dir.join(path))
                .into_iter()
                .chain(include_dirs.iter().map(|dir| dir.join(path)))
                .collect(),
            Self::Library(path) => include_dirs.iter().map(|dir| dir.join(path)).collect(),
        }
    }
}

/// Replaces every `${NAME}` token whose name is a key of `variables`.
pub fn substitute_variables(content: &str, variables: &IndexMap<String, String>) -> String {
    VARIABLE_RE
        .replace_all(content, |caps: &Captures| match variables.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

fn find_include(target: &IncludeTarget, include_dirs: &[PathBuf], self_path: &Path) -> Option<String> {
    for candidate in target.candidates(include_dirs, self_path) {
        if !candidate.is_file() || is_same_file(&candidate, self_path) {
            continue;
        }
        return match fs::read_to_string(&candidate) {
            Ok(text) => {
                debug!("Including '{}'", candidate.display());
                Some(text)
            }
            Err(e) => {
                debug!("Failed to read include '{}': {}", candidate.display(), e);
                None
            }
        };
    }
    None
}

fn split_line_ending(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, "\n")
    } else {
        (line, "")
    }
}

/// Replaces include directive lines with the content of the file they name.
///
/// The line terminator of a resolved directive is kept. Directives that match
/// no readable file, or only `self_path` itself, are left unchanged.
pub fn resolve_includes(content: &str, include_dirs: &[PathBuf], self_path: &Path) -> String {
    let mut output = String::with_capacity(content.len());
    for line in content.split_inclusive('\n') {
        let (body, ending) = split_line_ending(line);
        let included = IncludeTarget::parse(body)
            .and_then(|target| find_include(&target, include_dirs, self_path));
        match included {
            Some(text) => {
                output.push_str(&text);
                output.push_str(ending);
            }
            None => output.push_str(line),
        }
    }
    output
}

/// Resolves a script source: variables over the whole text, then includes.
pub fn resolve(
    content: &str,
    variables: &IndexMap<String, String>,
    include_dirs: &[PathBuf],
    self_path: &Path,
) -> String {
    let substituted = substitute_variables(content, variables);
    resolve_includes(&substituted, include_dirs, self_path)
}

/// Rewrites every line ending (CRLF, CR or LF) to `newline`.
pub fn normalize_newlines(text: &str, newline: &str) -> String {
    let unified = text.replace("\r\n", "\n").replace('\r', "\n");
    if newline == "\n" {
        unified
    } else {
        unified.replace('\n', newline)
    }
}
