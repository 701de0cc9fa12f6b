use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use textsearch::{search, SearchRequest, Settings, SettingsOverrides, SettingsSources};
use tracing::debug;

use crate::console::Console;
use crate::report::write_report;

const TITLE: &str = "T E X T  - S E A R C H -  P R O G R A M";
const EXIT_TOKEN: &str = "x";
const MATCH_ALL: &str = "*";

/// Options fixed for the lifetime of the session
#[derive(Debug, Default)]
pub struct SessionOptions {
    /// File and environment layers to read settings from
    pub sources: SettingsSources,
    pub config_path: Option<PathBuf>,
    pub overrides: SettingsOverrides,
    /// Return the first search error instead of prompting again
    pub exit_on_error: bool,
}

/// Runs the prompt → search → report loop until the user types `x` or input
/// ends.
///
/// Settings are reloaded at the start of every iteration. A missing default
/// path or unreadable configuration ends the session. Search errors are shown
/// and the loop continues, unless `exit_on_error` is set.
pub fn run<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    options: &SessionOptions,
) -> Result<()> {
    loop {
        console.clear()?;

        let settings = Settings::load_with(&options.sources, options.config_path.as_deref())
            .context("Failed to load settings")?
            .merge_with_cli(&options.overrides);
        let default_path = settings.require_default_path()?.to_path_buf();

        console.summary(TITLE, false)?;

        let Some(path) = console.prompt(
            &format!(
                "Type file path to search or press Enter key to use '{}' as the default path:",
                default_path.display()
            ),
            false,
        )?
        else {
            break;
        };
        let path = path.trim();
        let root = if path.is_empty() {
            default_path
        } else {
            PathBuf::from(path)
        };

        let Some(filter) = console.prompt(
            "Type file name or fuzzy search using '*' as a wildcard character (e.g. *my file*.* or *.txt - * is the default):",
            false,
        )?
        else {
            break;
        };
        let filter = if filter.is_empty() {
            MATCH_ALL.to_string()
        } else {
            filter
        };

        let Some(term) = console.prompt("Type text to search for:", false)? else {
            break;
        };

        console.info(
            &format!(
                "Searching for text: '{}' within files named: '{}' and located in: '{}', please wait...",
                term,
                filter,
                root.display()
            ),
            true,
        )?;

        let request = SearchRequest::new(root, filter, term)
            .with_thread_count(settings.thread_count)
            .with_encoding_mode(settings.encoding_mode)
            .with_unreadable_policy(settings.unreadable_policy);

        match search(&request) {
            Ok(result) => write_report(console, &result)?,
            Err(e) if options.exit_on_error => return Err(e.into()),
            Err(e) => {
                debug!("Search failed: {:?}", e);
                console.error(&format!("Error: {}", e), true)?;
            }
        }

        let answer = console.prompt(
            "Press 'x' and Enter to close the app, or press any other key and Enter to continue: ",
            true,
        )?;
        match answer.as_deref() {
            None | Some(EXIT_TOKEN) => break,
            Some(_) => continue,
        }
    }

    Ok(())
}
