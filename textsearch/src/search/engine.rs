use std::time::Instant;
use tracing::{debug, info};

use super::enumerator::enumerate;
use super::matcher::TermMatcher;
use super::scanner::Scanner;
use crate::errors::SearchResult;
use crate::filters::NameFilter;
use crate::request::SearchRequest;
use crate::results::SearchResult as SearchOutput;

/// Runs one search: enumerate matching files, scan their lines, group hits.
///
/// Performs no console I/O and keeps no state between calls, so running the
/// same request twice over an unchanged tree gives the same hits in the same
/// order; only `elapsed` differs.
pub fn search(request: &SearchRequest) -> SearchResult<SearchOutput> {
    info!(
        "Searching for '{}' in files named '{}' under {}",
        request.search_term,
        request.name_pattern,
        request.root_path.display()
    );
    let started = Instant::now();

    let filter = NameFilter::new(&request.name_pattern)?;
    let files = enumerate(&request.root_path, &filter, request.unreadable_policy)?;

    let scanner = Scanner::new(TermMatcher::new(request.search_term.as_str()))
        .with_encoding_mode(request.encoding_mode)
        .with_policy(request.unreadable_policy)
        .with_thread_count(request.thread_count);
    let hits = scanner.scan(&files)?;
    debug!("Scanner produced {} hits", hits.len());

    let mut result = SearchOutput::aggregate(request.search_term.as_str(), hits);
    result.files_searched = files.len();
    result.elapsed = started.elapsed();

    info!(
        "Search complete. Found {} hits in {} of {} files in {}",
        result.total_hits,
        result.files_with_hits(),
        result.files_searched,
        humantime::format_duration(result.elapsed)
    );

    Ok(result)
}
