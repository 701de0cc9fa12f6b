use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::PathBuf;

/// How to handle invalid UTF-8 while reading lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodingMode {
    /// Fail the scan on the first invalid sequence
    FailFast,
    /// Replace invalid sequences with U+FFFD and keep going
    #[default]
    Lossy,
}

/// What to do when a file or directory cannot be read mid-search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnreadablePolicy {
    /// Abort the whole search with the error
    #[default]
    Abort,
    /// Log a warning and continue with the next entry
    Skip,
}

/// One search: where to look, which file names, and what text.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// Directory the recursive walk starts from
    pub root_path: PathBuf,

    /// Wildcard applied to file base names. `*` matches any run of
    /// characters; everything else is literal. Empty matches every file.
    pub name_pattern: String,

    /// Literal text to look for. Empty matches every line.
    pub search_term: String,

    /// Number of scanning threads; 1 scans sequentially
    pub thread_count: NonZeroUsize,

    pub encoding_mode: EncodingMode,

    pub unreadable_policy: UnreadablePolicy,
}

impl SearchRequest {
    /// Creates a sequential request that decodes lossily and aborts on unreadable files
    pub fn new(
        root_path: impl Into<PathBuf>,
        name_pattern: impl Into<String>,
        search_term: impl Into<String>,
    ) -> Self {
        SearchRequest {
            root_path: root_path.into(),
            name_pattern: name_pattern.into(),
            search_term: search_term.into(),
            thread_count: NonZeroUsize::MIN,
            encoding_mode: EncodingMode::default(),
            unreadable_policy: UnreadablePolicy::default(),
        }
    }

    /// Builder method to set the number of threads; 0 means one per CPU
    pub fn with_thread_count(mut self, count: usize) -> Self {
        self.thread_count = resolve_thread_count(count);
        self
    }

    /// Builder method to set the encoding mode
    pub fn with_encoding_mode(mut self, mode: EncodingMode) -> Self {
        self.encoding_mode = mode;
        self
    }

    /// Builder method to set the unreadable file policy
    pub fn with_unreadable_policy(mut self, policy: UnreadablePolicy) -> Self {
        self.unreadable_policy = policy;
        self
    }
}

/// Turns a requested thread count into a usable one. 0 means one per CPU.
pub fn resolve_thread_count(requested: usize) -> NonZeroUsize {
    NonZeroUsize::new(requested)
        .or_else(|| NonZeroUsize::new(num_cpus::get()))
        .unwrap_or(NonZeroUsize::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_defaults() {
        let request = SearchRequest::new("/data", "*.txt", "hello");
        assert_eq!(request.root_path, PathBuf::from("/data"));
        assert_eq!(request.name_pattern, "*.txt");
        assert_eq!(request.search_term, "hello");
        assert_eq!(request.thread_count.get(), 1);
        assert_eq!(request.encoding_mode, EncodingMode::Lossy);
        assert_eq!(request.unreadable_policy, UnreadablePolicy::Abort);
    }

    #[test]
    fn test_builders() {
        let request = SearchRequest::new(".", "", "")
            .with_thread_count(4)
            .with_encoding_mode(EncodingMode::FailFast)
            .with_unreadable_policy(UnreadablePolicy::Skip);
        assert_eq!(request.thread_count.get(), 4);
        assert_eq!(request.encoding_mode, EncodingMode::FailFast);
        assert_eq!(request.unreadable_policy, UnreadablePolicy::Skip);
    }

    #[test]
    fn test_zero_threads_uses_cpu_count() {
        assert_eq!(resolve_thread_count(0).get(), num_cpus::get().max(1));
        assert_eq!(resolve_thread_count(3).get(), 3);
    }
}
