use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use super::schema::SettingKind;


/// Everything that can go wrong while loading, coercing or resolving settings.
///
/// Each variant carries the offending setting name (and value, where there is one),
/// so the message alone is enough to find the problem in the project file.
#[derive(Error, Diagnostic, Debug)]
pub enum SettingsError {
    #[error("Unrecognised setting '{name}'")]
    #[diagnostic(
        code(ford_settings::unknown_setting),
        help("Check the spelling of the option, the list of accepted settings is fixed.")
    )]
    UnknownSetting { name: String },

    #[error(
        "Could not convert option '{name}' to bool: \
         expected a single value but got a list ({values:?})"
    )]
    #[diagnostic(code(ford_settings::ambiguous_boolean))]
    AmbiguousBoolean { name: String, values: Vec<String> },

    #[error("Could not convert option '{name}' to bool: expected 'true'/'false', got: {value}")]
    #[diagnostic(
        code(ford_settings::invalid_boolean),
        help("Accepted spellings are true/yes/y/1 and false/no/n/0 (case-insensitive).")
    )]
    InvalidBoolean { name: String, value: String },

    #[error("Could not convert option '{name}' to integer: expected a base-10 number, got: {value}")]
    #[diagnostic(code(ford_settings::invalid_integer))]
    InvalidInteger { name: String, value: String },

    #[error("Option '{name}' expects {expected}, got: {found}")]
    #[diagnostic(code(ford_settings::type_mismatch))]
    TypeMismatch {
        name: String,
        expected: SettingKind,
        found: String,
    },

    #[error("{first} ('{mark}') and {second} ('{mark}') are the same")]
    #[diagnostic(
        code(ford_settings::docmark_collision),
        help("The documentation markers must all be different from each other.")
    )]
    DocmarkCollision {
        first: &'static str,
        second: &'static str,
        mark: String,
    },

    #[error("Could not read {}", .path.display())]
    #[diagnostic(code(ford_settings::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} includes itself", .path.display())]
    #[diagnostic(code(ford_settings::include_cycle))]
    IncludeCycle { path: PathBuf },

    #[error("Could not parse {}", .path.display())]
    #[diagnostic(code(ford_settings::toml_parse))]
    TomlParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Could not build settings from the coerced values")]
    #[diagnostic(code(ford_settings::deserialize))]
    Deserialize {
        #[source]
        source: toml::de::Error,
    },

    #[error("Could not get the current directory")]
    #[diagnostic(code(ford_settings::current_directory))]
    CurrentDirectory {
        #[source]
        source: std::io::Error,
    },
}
