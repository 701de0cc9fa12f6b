use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// One line that contained the search term
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineHit {
    /// The file the line belongs to
    pub path: PathBuf,
    /// 1-based line number within the file
    pub line_number: usize,
}

/// All hits for one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHits {
    pub path: PathBuf,
    /// Matching line numbers, in file order
    pub line_numbers: Vec<usize>,
}

impl FileHits {
    pub fn hit_count(&self) -> usize {
        self.line_numbers.len()
    }
}

/// The outcome of one search
#[derive(Debug, Clone, Default)]
pub struct SearchResult {
    /// The term that was searched for
    pub search_term: String,
    /// Hits grouped per file, in the order each file was first seen
    pub file_hits: Vec<FileHits>,
    /// Number of matching lines across all files
    pub total_hits: usize,
    /// Number of files whose name passed the filter
    pub files_searched: usize,
    /// Wall-clock time spent enumerating and scanning
    pub elapsed: Duration,
}

impl SearchResult {
    /// Creates a new empty search result
    pub fn new(search_term: impl Into<String>) -> Self {
        Self {
            search_term: search_term.into(),
            ..Default::default()
        }
    }

    /// Groups `hits` by file, keeping first-seen order.
    pub fn aggregate(search_term: impl Into<String>, hits: impl IntoIterator<Item = LineHit>) -> Self {
        let mut result = Self::new(search_term);
        let mut index: HashMap<PathBuf, usize> = HashMap::new();

        for hit in hits {
            result.total_hits += 1;
            match index.get(&hit.path) {
                Some(&i) => result.file_hits[i].line_numbers.push(hit.line_number),
                None => {
                    index.insert(hit.path.clone(), result.file_hits.len());
                    result.file_hits.push(FileHits {
                        path: hit.path,
                        line_numbers: vec![hit.line_number],
                    });
                }
            }
        }

        result
    }

    /// Number of distinct files with at least one hit
    pub fn files_with_hits(&self) -> usize {
        self.file_hits.len()
    }

    /// Distinct files with at least one hit, in first-seen order
    pub fn distinct_files(&self) -> impl Iterator<Item = &Path> {
        self.file_hits.iter().map(|f| f.path.as_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(path: &str, line_number: usize) -> LineHit {
        LineHit {
            path: PathBuf::from(path),
            line_number,
        }
    }

    #[test]
    fn test_search_result_new() {
        let result = SearchResult::new("term");
        assert_eq!(result.search_term, "term");
        assert_eq!(result.total_hits, 0);
        assert_eq!(result.files_with_hits(), 0);
        assert_eq!(result.elapsed, Duration::ZERO);
    }

    #[test]
    fn test_aggregate_groups_in_first_seen_order() {
        let hits = vec![
            hit("b.txt", 1),
            hit("a.txt", 4),
            hit("b.txt", 7),
            hit("c.txt", 2),
            hit("a.txt", 9),
        ];

        let result = SearchResult::aggregate("x", hits);
        assert_eq!(result.total_hits, 5);
        assert_eq!(result.files_with_hits(), 3);
        assert_eq!(
            result.distinct_files().collect::<Vec<_>>(),
            vec![Path::new("b.txt"), Path::new("a.txt"), Path::new("c.txt")]
        );
        assert_eq!(result.file_hits[0].line_numbers, vec![1, 7]);
        assert_eq!(result.file_hits[1].hit_count(), 2);
        assert_eq!(result.file_hits[2].hit_count(), 1);
    }

    #[test]
    fn test_aggregate_empty() {
        let result = SearchResult::aggregate("nothing", Vec::new());
        assert_eq!(result.search_term, "nothing");
        assert_eq!(result.total_hits, 0);
        assert_eq!(result.distinct_files().count(), 0);
    }

    #[test]
    fn test_total_hits_at_least_distinct_files() {
        let hits = (0..10).map(|i| hit(if i % 3 == 0 { "x" } else { "y" }, i));
        let result = SearchResult::aggregate("t", hits);
        assert!(result.total_hits >= result.files_with_hits());
        assert_eq!(
            result.file_hits.iter().map(FileHits::hit_count).sum::<usize>(),
            result.total_hits
        );
    }
}
