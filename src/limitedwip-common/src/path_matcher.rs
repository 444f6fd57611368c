//! Wildcard path matching.
//!
//! Patterns use a small wildcard language rather than full globs:
//!
//! - `*` matches any run of characters, `?` exactly one
//! - `*?` and `?*` match one or more characters
//! - `**` as a whole directory segment matches zero or more directories
//! - everything after the last `/` applies to the file name, everything
//!   before it to the directory
//!
//! Backslashes are treated as path separators so that the same pattern
//! works for paths coming from any platform.

use std::fmt;

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

use crate::error::{CommonError, Result};

/// Collapses repeated `.*` produced by wildcard expansion.
static REPEATED_ANY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:\.\*)+").expect("Invalid wildcard collapse regex"));

/// Whether paths on this platform compare case-insensitively by default.
pub const FILE_SYSTEM_CASE_SENSITIVE: bool = !cfg!(any(windows, target_os = "macos"));

/// A compiled wildcard pattern.
#[derive(Debug, Clone)]
pub struct PathMatcher {
    pattern: String,
    file_name: Regex,
    dir: Option<Regex>,
}

impl PathMatcher {
    /// Compile a wildcard pattern using the platform case sensitivity.
    pub fn parse(pattern: &str) -> Result<Self> {
        Self::parse_with_case(pattern, FILE_SYSTEM_CASE_SENSITIVE)
    }

    /// Compile a wildcard pattern with explicit case sensitivity.
    pub fn parse_with_case(pattern: &str, case_sensitive: bool) -> Result<Self> {
        let normalized = to_forward_slashes(pattern);

        let (dir_pattern, file_pattern) = match normalized.rfind('/') {
            Some(slash) => (
                Some(dir_to_regex(&normalized[..slash])),
                &normalized[slash + 1..],
            ),
            None => (None, normalized.as_str()),
        };
        let file_pattern = collapse_wildcards(&expand_wildcards(file_pattern));

        let file_name = compile(pattern, &file_pattern, case_sensitive)?;
        let dir = dir_pattern
            .map(|dir| compile(pattern, &dir, case_sensitive))
            .transpose()?;

        Ok(Self {
            pattern: pattern.to_string(),
            file_name,
            dir,
        })
    }

    /// The wildcard pattern this matcher was compiled from.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Test a path against the pattern.
    ///
    /// The file name (after the last `/`) must match the file name part of
    /// the pattern. If the pattern has a directory part, the path's
    /// directory must match it too. Relative directories are matched as if
    /// rooted at `/`.
    pub fn matches(&self, path: &str) -> bool {
        let path = to_forward_slashes(path);
        match path.rfind('/') {
            Some(slash) => {
                let (dir, file_name) = (&path[..slash], &path[slash + 1..]);
                if !self.file_name.is_match(file_name) {
                    return false;
                }
                match &self.dir {
                    None => true,
                    Some(dir_regex) if dir.starts_with('/') => dir_regex.is_match(dir),
                    Some(dir_regex) => dir_regex.is_match(&format!("/{dir}")),
                }
            }
            None => self.file_name.is_match(&path),
        }
    }
}

impl PartialEq for PathMatcher {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
    }
}

impl Eq for PathMatcher {}

impl fmt::Display for PathMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

/// A set of matchers parsed from a `;`-separated pattern list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathMatchers(Vec<PathMatcher>);

impl PathMatchers {
    /// A set that matches nothing.
    pub const fn empty() -> Self {
        Self(Vec::new())
    }

    /// Parse a `;`-separated list of wildcard patterns. Blank entries are
    /// ignored, so `""` yields an empty set.
    pub fn parse(patterns: &str) -> Result<Self> {
        patterns
            .split(';')
            .map(str::trim)
            .filter(|pattern| !pattern.is_empty())
            .map(PathMatcher::parse)
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }

    /// True if any matcher in the set matches the path.
    pub fn matches(&self, path: &str) -> bool {
        self.0.iter().any(|matcher| matcher.matches(path))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathMatcher> {
        self.0.iter()
    }
}

impl fmt::Display for PathMatchers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, matcher) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(";")?;
            }
            f.write_str(matcher.pattern())?;
        }
        Ok(())
    }
}

impl FromIterator<PathMatcher> for PathMatchers {
    fn from_iter<T: IntoIterator<Item = PathMatcher>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

fn to_forward_slashes(path: &str) -> String {
    path.replace('\\', "/")
}

fn expand_wildcards(pattern: &str) -> String {
    pattern
        .replace("\\!", "!")
        .replace('.', "\\.")
        .replace("*?", ".+")
        .replace("?*", ".+")
        .replace('*', ".*")
        .replace('?', ".")
}

fn collapse_wildcards(pattern: &str) -> String {
    REPEATED_ANY.replace_all(pattern, ".*").into_owned()
}

fn dir_to_regex(dir_pattern: &str) -> String {
    let rooted = if dir_pattern.starts_with('/') {
        dir_pattern.to_string()
    } else {
        format!("/{dir_pattern}")
    };
    let expanded = expand_wildcards(&rooted).replace("/.*.*/", "(/.*)?/");
    let trimmed = expanded.strip_suffix('/').unwrap_or(&expanded);
    collapse_wildcards(trimmed)
}

fn compile(pattern: &str, regex: &str, case_sensitive: bool) -> Result<Regex> {
    RegexBuilder::new(&format!("^(?:{regex})$"))
        .case_insensitive(!case_sensitive)
        .build()
        .map_err(|e| CommonError::invalid_pattern(pattern, e.to_string()))
}
