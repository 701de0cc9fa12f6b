/// File name filtering.
///
/// A name pattern is a wildcard where `*` matches any run of characters
/// (including none) and every other character, `?` and `[` included, is taken
/// literally. Patterns are tested against the base name only, so `*.txt`
/// selects `notes.txt` in any subdirectory but never looks at directory names.
///
/// Matching is case-sensitive on every platform.
use glob::{MatchOptions, Pattern};
use std::path::Path;

use crate::errors::{SearchError, SearchResult};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// A compiled file name pattern
#[derive(Debug, Clone)]
pub struct NameFilter {
    source: String,
    pattern: Option<Pattern>,
}

impl NameFilter {
    /// Compiles `pattern`. Empty or all-`*` patterns match every file.
    ///
    /// Every user-typed character other than `*` is escaped before it reaches
    /// `glob`, so compilation is not expected to fail. `glob` still reports
    /// errors through a `Result`, and those surface as `InvalidPattern`.
    pub fn new(pattern: &str) -> SearchResult<Self> {
        let glob = to_glob(pattern);
        let compiled = if glob.is_empty() || glob == "*" {
            None
        } else {
            Some(Pattern::new(&glob).map_err(|e| {
                SearchError::invalid_pattern(format!("{}: {}", pattern, e.msg))
            })?)
        };

        Ok(Self {
            source: pattern.to_string(),
            pattern: compiled,
        })
    }

    /// The pattern as the user typed it
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Tests a file name (not a path)
    pub fn matches_name(&self, name: &str) -> bool {
        match &self.pattern {
            None => true,
            Some(p) => p.matches_with(name, MATCH_OPTIONS),
        }
    }

    /// Tests the base name of `path`
    pub fn matches_path(&self, path: &Path) -> bool {
        path.file_name()
            .map(|name| self.matches_name(&name.to_string_lossy()))
            .unwrap_or(false)
    }
}

/// Escapes everything except `*`, collapsing runs of `*` so the result never
/// contains a recursive `**` component.
fn to_glob(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut literal = String::new();
    for c in pattern.chars() {
        if c == '*' {
            out.push_str(&Pattern::escape(&literal));
            literal.clear();
            if !out.ends_with('*') {
                out.push('*');
            }
        } else {
            literal.push(c);
        }
    }
    out.push_str(&Pattern::escape(&literal));
    out
}
