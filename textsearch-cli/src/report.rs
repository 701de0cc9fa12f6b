use std::io::{self, BufRead, Write};
use std::time::Duration;
use textsearch::SearchOutput;

use crate::console::Console;

/// Formats a duration as `MM minutes, SS seconds and mmm milliseconds`.
/// Minutes are not wrapped at the hour.
pub fn format_elapsed(elapsed: Duration) -> String {
    let total_ms = elapsed.as_millis();
    format!(
        "{:02} minutes, {:02} seconds and {:03} milliseconds",
        total_ms / 60_000,
        (total_ms / 1_000) % 60,
        total_ms % 1_000
    )
}

/// The summary block shown above the file list
pub fn summary_lines(result: &SearchOutput) -> Vec<String> {
    vec![
        format!("Searched for   : {}", result.search_term),
        format!("Total text hits: {}", result.total_hits),
        format!("Total file hits: {}", result.files_with_hits()),
        format!("Processing time: {}", format_elapsed(result.elapsed)),
    ]
}

/// One numbered row per distinct file, 1-based and zero-padded to 5 digits
pub fn file_rows(result: &SearchOutput) -> Vec<String> {
    result
        .distinct_files()
        .enumerate()
        .map(|(i, path)| format!("{:05} {}", i + 1, path.display()))
        .collect()
}

pub fn write_report<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    result: &SearchOutput,
) -> io::Result<()> {
    console.info("S E A R C H - R E S U L T S:", true)?;
    for line in summary_lines(result) {
        console.summary(&line, false)?;
    }

    console.info("No.   Path", true)?;
    console.info("----- ----", false)?;
    for row in file_rows(result) {
        console.output(&row)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use textsearch::LineHit;

    fn result() -> SearchOutput {
        let hits = ["/data/b.log", "/data/a.txt", "/data/b.log"]
            .iter()
            .enumerate()
            .map(|(i, p)| LineHit {
                path: PathBuf::from(p),
                line_number: i + 1,
            });
        let mut result = SearchOutput::aggregate("hello", hits);
        result.elapsed = Duration::from_millis(1_234);
        result
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(
            format_elapsed(Duration::ZERO),
            "00 minutes, 00 seconds and 000 milliseconds"
        );
        assert_eq!(
            format_elapsed(Duration::from_millis(61_234)),
            "01 minutes, 01 seconds and 234 milliseconds"
        );
        assert_eq!(
            format_elapsed(Duration::from_secs(2 * 3600 + 5)),
            "120 minutes, 05 seconds and 000 milliseconds"
        );
    }

    #[test]
    fn test_summary_lines() {
        assert_eq!(
            summary_lines(&result()),
            vec![
                "Searched for   : hello",
                "Total text hits: 3",
                "Total file hits: 2",
                "Processing time: 00 minutes, 01 seconds and 234 milliseconds",
            ]
        );
    }

    #[test]
    fn test_file_rows_numbered_in_first_seen_order() {
        assert_eq!(
            file_rows(&result()),
            vec!["00001 /data/b.log", "00002 /data/a.txt"]
        );
    }

    #[test]
    fn test_file_rows_empty() {
        assert!(file_rows(&SearchOutput::new("x")).is_empty());
    }
}
