//! The table of every recognised setting, its declared kind and its default.
//!
//! Coercion never dispatches on setting names: it asks this table for the
//! [`SettingKind`] of a key and converts the raw value accordingly.

use std::fmt::{self, Display, Formatter};

use toml::{Table, Value};

use super::utilities::{current_year, default_cpus};


/// Sentinel default for the `favicon` setting. While the setting still holds
/// this exact value, path normalisation substitutes the bundled favicon.
pub const FAVICON_SENTINEL: &str = "favicon.png";

/// Fixed-form Fortran source extensions.
pub const DEFAULT_FIXED_EXTENSIONS: &[&str] = &["f", "for", "F", "FOR"];

/// Free-form Fortran source extensions.
pub const DEFAULT_EXTENSIONS: &[&str] = &["f90", "f95", "f03", "f08", "f15"];

/// Extensions of sources that go through the preprocessor first.
pub const DEFAULT_FPP_EXTENSIONS: &[&str] = &["F90", "F95", "F03", "F08", "F15", "F", "FOR"];


/// The declared semantic type of a setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKind {
    String,
    OptionalString,
    Bool,
    Int,
    Path,
    OptionalPath,
    ListOfString,
    ListOfPath,
    /// A list whose elements are passed through as written (tables, numbers, ...).
    UntypedList,
}

impl SettingKind {
    /// String-like scalars: a list of strings is joined with newlines into one.
    pub fn is_textual(self) -> bool {
        matches!(
            self,
            SettingKind::String
                | SettingKind::OptionalString
                | SettingKind::Path
                | SettingKind::OptionalPath
        )
    }

    pub fn is_path(self) -> bool {
        matches!(
            self,
            SettingKind::Path | SettingKind::OptionalPath | SettingKind::ListOfPath
        )
    }
}

impl Display for SettingKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let description = match self {
            SettingKind::String => "a string",
            SettingKind::OptionalString => "an optional string",
            SettingKind::Bool => "a boolean",
            SettingKind::Int => "an integer",
            SettingKind::Path => "a path",
            SettingKind::OptionalPath => "an optional path",
            SettingKind::ListOfString => "a list of strings",
            SettingKind::ListOfPath => "a list of paths",
            SettingKind::UntypedList => "a list",
        };

        f.write_str(description)
    }
}


/// One row of the schema.
#[derive(Debug, Clone, Copy)]
pub struct SettingSpec {
    pub name: &'static str,
    pub kind: SettingKind,
    /// Produces the default value. `None` means the setting is unset by default,
    /// which is only meaningful for the optional kinds.
    pub default: fn() -> Option<Value>,
}

impl SettingSpec {
    pub fn default_value(&self) -> Option<Value> {
        (self.default)()
    }
}


fn string(value: &str) -> Option<Value> {
    Some(Value::String(value.to_string()))
}

fn strings(values: &[&str]) -> Option<Value> {
    Some(Value::Array(
        values
            .iter()
            .map(|value| Value::String(value.to_string()))
            .collect(),
    ))
}

fn boolean(value: bool) -> Option<Value> {
    Some(Value::Boolean(value))
}

fn integer(value: i64) -> Option<Value> {
    Some(Value::Integer(value))
}


macro_rules! settings_schema {
    ($($name:literal : $kind:ident = $default:expr),* $(,)?) => {
        /// Every recognised setting, sorted by name.
        pub static SCHEMA: &[SettingSpec] = &[
            $(
                SettingSpec {
                    name: $name,
                    kind: SettingKind::$kind,
                    default: || $default,
                },
            )*
        ];
    };
}

settings_schema! {
    "alias": ListOfString = strings(&[]),
    "author": OptionalString = None,
    "author_description": OptionalString = None,
    "author_pic": OptionalString = None,
    "bitbucket": OptionalString = None,
    "coloured_edges": Bool = boolean(false),
    "copy_subdir": ListOfPath = strings(&[]),
    "creation_date": String = string("%Y-%m-%dT%H:%M:%S.%f%z"),
    "css": OptionalPath = None,
    "dbg": Bool = boolean(true),
    "display": ListOfString = strings(&["public", "protected"]),
    "doc_license": String = string(""),
    "docmark": String = string("!"),
    "docmark_alt": String = string("*"),
    "email": OptionalString = None,
    "encoding": String = string("utf-8"),
    "exclude": ListOfString = strings(&[]),
    "exclude_dir": ListOfPath = strings(&[]),
    "extensions": ListOfString = strings(DEFAULT_EXTENSIONS),
    "external": UntypedList = strings(&[]),
    "externalize": Bool = boolean(false),
    "extra_filetypes": UntypedList = strings(&[]),
    "extra_mods": UntypedList = strings(&[]),
    "extra_vartypes": UntypedList = strings(&[]),
    "facebook": OptionalString = None,
    "favicon": Path = string(FAVICON_SENTINEL),
    "fixed_extensions": ListOfString = strings(DEFAULT_FIXED_EXTENSIONS),
    "fixed_length_limit": Bool = boolean(true),
    "force": Bool = boolean(false),
    "fpp_extensions": ListOfString = strings(DEFAULT_FPP_EXTENSIONS),
    "github": OptionalString = None,
    "gitlab": OptionalString = None,
    "gitter_sidecar": OptionalString = None,
    "google_plus": OptionalString = None,
    "graph": Bool = boolean(false),
    "graph_dir": OptionalPath = None,
    "graph_maxdepth": Int = integer(10_000),
    "graph_maxnodes": Int = integer(1_000_000_000),
    "hide_undoc": Bool = boolean(false),
    "incl_src": Bool = boolean(true),
    "include": ListOfPath = strings(&[]),
    "license": String = string(""),
    "linkedin": OptionalString = None,
    "lower": Bool = boolean(false),
    "macro": ListOfString = strings(&[]),
    "mathjax_config": OptionalPath = None,
    "max_frontpage_items": Int = integer(10),
    "md_base_dir": OptionalPath = None,
    "md_extensions": ListOfString = strings(&[]),
    "media_dir": OptionalPath = None,
    "output_dir": Path = string("./doc"),
    "page_dir": OptionalPath = None,
    "parallel": Int = integer(default_cpus()),
    "predocmark": String = string(">"),
    "predocmark_alt": String = string("|"),
    "preprocess": Bool = boolean(true),
    "preprocessor": String = string("cpp -traditional-cpp -E -D__GFORTRAN__"),
    "print_creation_date": Bool = boolean(false),
    "privacy_policy_url": OptionalString = None,
    "proc_internals": Bool = boolean(false),
    "project": String = string("Fortran Program"),
    "project_bitbucket": OptionalString = None,
    "project_download": OptionalString = None,
    "project_github": OptionalString = None,
    "project_gitlab": OptionalString = None,
    "project_sourceforge": OptionalString = None,
    "project_url": String = string(""),
    "project_website": OptionalString = None,
    "quiet": Bool = boolean(false),
    "revision": OptionalString = None,
    "search": Bool = boolean(true),
    "show_proc_parent": Bool = boolean(false),
    "sort": String = string("src"),
    "source": Bool = boolean(false),
    "src_dir": ListOfPath = strings(&["./src"]),
    "summary": OptionalString = None,
    "terms_of_service_url": OptionalString = None,
    "twitter": OptionalString = None,
    "version": OptionalString = None,
    "warn": Bool = boolean(false),
    "website": OptionalString = None,
    "year": String = string(&current_year().to_string()),
}


/// Look up the schema row for `name`.
pub fn lookup(name: &str) -> Option<&'static SettingSpec> {
    SCHEMA
        .binary_search_by(|spec| spec.name.cmp(name))
        .ok()
        .map(|index| &SCHEMA[index])
}

/// The declared kind of `name`, or `None` if it is not a recognised setting.
pub fn kind_of(name: &str) -> Option<SettingKind> {
    lookup(name).map(|spec| spec.kind)
}

/// A raw table holding the default of every setting that has one.
pub fn defaults() -> Table {
    SCHEMA
        .iter()
        .filter_map(|spec| spec.default_value().map(|value| (spec.name.to_string(), value)))
        .collect()
}
