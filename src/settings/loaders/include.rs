//! Deprecated `{!file!}` inclusion inside project file metadata values.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex_lite::Regex;
use tracing::warn;

use crate::settings::error::SettingsError;


/// Leading line of the warning emitted whenever a metadata value includes another file.
pub const DEPRECATED_INCLUDE_WARNING: &str = "Including other files in project file metadata is \
                                              deprecated and will stop working in a future release.";


fn include_regex() -> &'static Regex {
    static INCLUDE_REGEX: OnceLock<Regex> = OnceLock::new();

    // PANIC SAFETY: The pattern is a valid constant regex.
    INCLUDE_REGEX.get_or_init(|| {
        Regex::new(r"\{!\s*(?P<file>.+?)\s*!(?:lines=(?P<lines>[0-9 -]+))?\}").unwrap()
    })
}

/// Returns `true` if `value` begins with an include marker.
pub fn starts_with_include(value: &str) -> bool {
    include_regex()
        .find(value)
        .is_some_and(|include| include.start() == 0)
}

/// The full warning text for setting `option` holding `value`.
pub fn deprecated_include_warning(option: &str, value: &str) -> String {
    format!("{}\n    {}: {}", DEPRECATED_INCLUDE_WARNING, option, value)
}

/// Keeps only the 1-based lines named by `selection`, e.g. `"1 3-5"`.
/// Numbers past the end of the file are ignored.
fn select_lines(contents: &str, selection: &str) -> String {
    let lines: Vec<&str> = contents.lines().collect();
    let mut selected = Vec::new();

    for token in selection.split_whitespace() {
        let range = match token.split_once('-') {
            Some((first, last)) => first.parse::<usize>().ok().zip(last.parse::<usize>().ok()),
            None => token.parse::<usize>().ok().map(|line| (line, line)),
        };

        let Some((first, last)) = range else {
            warn!("Ignoring malformed include line selection \"{}\".", token);
            continue;
        };

        let first = first.max(1);
        let last = last.min(lines.len());
        if first > last {
            continue;
        }

        selected.extend_from_slice(&lines[first - 1..last]);
    }

    selected.join("\n")
}

/// Replaces every `{!file!}` (or `{!file!lines=...}`) marker in `value` with the
/// contents of `file`, resolved relative to `base_directory`.
///
/// Included files may include further files, relative to the same base directory.
pub fn expand_includes(value: &str, base_directory: &Path) -> Result<String, SettingsError> {
    expand_includes_from(value, base_directory, &mut Vec::new())
}

fn expand_includes_from(
    value: &str,
    base_directory: &Path,
    include_chain: &mut Vec<PathBuf>,
) -> Result<String, SettingsError> {
    let mut expanded_lines = Vec::new();

    for line in value.lines() {
        let mut expanded = String::with_capacity(line.len());
        let mut last_end = 0;

        for captures in include_regex().captures_iter(line) {
            let (Some(marker), Some(file_name)) = (captures.get(0), captures.name("file")) else {
                continue;
            };

            let file_path = base_directory.join(file_name.as_str());
            if include_chain.contains(&file_path) {
                return Err(SettingsError::IncludeCycle { path: file_path });
            }

            let contents = fs::read_to_string(&file_path).map_err(|source| SettingsError::Io {
                path: file_path.clone(),
                source,
            })?;

            let contents = match captures.name("lines") {
                Some(selection) => select_lines(&contents, selection.as_str()),
                None => contents.trim_end_matches(['\r', '\n']).to_string(),
            };

            include_chain.push(file_path);
            let contents = expand_includes_from(&contents, base_directory, include_chain)?;
            include_chain.pop();

            expanded.push_str(&line[last_end..marker.start()]);
            expanded.push_str(&contents);
            last_end = marker.end();
        }

        expanded.push_str(&line[last_end..]);
        expanded_lines.push(expanded);
    }

    Ok(expanded_lines.join("\n"))
}
