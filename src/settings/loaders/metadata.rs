use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex_lite::Regex;
use toml::{Table, Value};
use tracing::{debug, warn};

use super::include::{deprecated_include_warning, expand_includes, starts_with_include};
use crate::settings::coercion::coerce_table;
use crate::settings::error::SettingsError;
use crate::settings::structure::{Settings, UnresolvedSettings};
use crate::settings::traits::{ResolvableConfiguration, ResolvableConfigurationWithContext};


struct MetadataPatterns {
    begin: Regex,
    end: Regex,
    key_value: Regex,
    continuation: Regex,
}

fn patterns() -> &'static MetadataPatterns {
    static PATTERNS: OnceLock<MetadataPatterns> = OnceLock::new();

    // PANIC SAFETY: All patterns are valid constant regexes.
    PATTERNS.get_or_init(|| MetadataPatterns {
        begin: Regex::new(r"^-{3}(\s.*)?$").unwrap(),
        end: Regex::new(r"^(-{3}|\.{3})(\s.*)?$").unwrap(),
        key_value: Regex::new(r"^[ ]{0,3}(?P<key>[A-Za-z0-9_-]+):\s*(?P<value>.*)$").unwrap(),
        continuation: Regex::new(r"^(?:[ ]{4}|\t)\s*(?P<value>.*)$").unwrap(),
    })
}

fn push_value(metadata: &mut Table, key: &str, value: &str) {
    let values = metadata
        .entry(key)
        .or_insert_with(|| Value::Array(Vec::new()));

    if let Value::Array(values) = values {
        values.push(Value::String(value.trim().to_string()));
    }
}


/// Split the metadata preamble off the start of a project file.
///
/// Every value is collected as a list of strings: one element per `key: value`
/// occurrence and per indented continuation line. Keys are lowercased and `-` is
/// read as `_`. Returns the metadata and the remaining document body.
pub fn meta_preprocessor(project_file: &str) -> (Table, String) {
    let patterns = patterns();
    let mut lines = project_file.lines().peekable();

    if lines
        .peek()
        .is_some_and(|line| patterns.begin.is_match(line))
    {
        lines.next();
    }

    let mut metadata = Table::new();
    let mut current_key: Option<String> = None;

    while let Some(&line) = lines.peek() {
        if line.trim().is_empty() || patterns.end.is_match(line) {
            lines.next();
            break;
        }

        if let Some(captures) = patterns.key_value.captures(line) {
            let key = captures["key"].to_lowercase().replace('-', "_");
            push_value(&mut metadata, &key, &captures["value"]);
            current_key = Some(key);
        } else {
            match (&current_key, patterns.continuation.captures(line)) {
                (Some(key), Some(captures)) => push_value(&mut metadata, key, &captures["value"]),
                _ => break,
            }
        }

        lines.next();
    }

    let body = lines.collect::<Vec<_>>().join("\n");

    (metadata, body)
}


/// Coerced metadata that still needs the deprecated file inclusion applied.
struct UnresolvedMetadata {
    coerced: Table,
}

impl ResolvableConfigurationWithContext for UnresolvedMetadata {
    type Resolved = Settings;
    /// The project directory.
    type Context = PathBuf;

    fn resolve(self, context: Self::Context) -> Result<Self::Resolved, SettingsError> {
        let mut coerced = self.coerced;

        let base_directory = match coerced.get("md_base_dir").and_then(Value::as_str) {
            Some(md_base_dir) => context.join(md_base_dir),
            None => context,
        };

        for (option, value) in coerced.iter_mut() {
            let Value::String(text) = value else {
                continue;
            };

            if !starts_with_include(text) {
                continue;
            }

            warn!("{}", deprecated_include_warning(option, text));

            *text = expand_includes(text, &base_directory)?;
        }

        UnresolvedSettings::from_coerced(coerced)?.resolve()
    }
}


/// Load settings from the metadata preamble of `project_file`.
///
/// `directory` is the project directory, used to resolve deprecated file inclusions.
/// Returns the settings together with the project file body without its preamble.
pub fn load_markdown_settings<P: AsRef<Path>>(
    directory: P,
    project_file: &str,
) -> Result<(Settings, String), SettingsError> {
    let (metadata, body) = meta_preprocessor(project_file);

    debug!("Found {} settings in the project file metadata.", metadata.len());

    let coerced = coerce_table(metadata)?;
    let settings = UnresolvedMetadata { coerced }.resolve(directory.as_ref().to_path_buf())?;

    Ok((settings, body))
}
