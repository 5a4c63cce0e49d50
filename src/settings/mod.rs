//! This module contains all settings-relevant code: the schema of every
//! recognised setting, the coercion of loosely-typed input into that schema,
//! the two loaders and path normalisation.
//!
//! Your starting point should probably be [`load_toml_settings`] or
//! [`load_markdown_settings`], followed by [`Settings::normalise_paths`].
//!
//! # Internals
//! Settings are built in phases. A loader produces a raw table of
//! `name -> value`, where values from `fpm.toml` are natively typed and values from
//! project file metadata are always lists of strings.
//! Every entry is then coerced to the [`SettingKind`] the [`schema`] declares for it,
//! defaults are filled in and the table is deserialized into an unresolved
//! [`Settings`] record. Its `resolve`
//! method derives the remaining values (`relative`, the extension union,
//! lowercase `display`) and validates the documentation markers.
//!
//! The output is the [`Settings`]. Paths are kept as written until
//! [`Settings::normalise_paths`] makes them absolute.

#![allow(rustdoc::private_intra_doc_links)]

mod coercion;
mod error;
mod loaders;
mod paths;
pub mod schema;
mod structure;
mod traits;
mod utilities;

pub use coercion::{coerce_table, coerce_value, fill_defaults};
pub use error::SettingsError;
pub use loaders::*;
pub use paths::{absolute_directory, normalise_path};
pub use schema::{SettingKind, SettingSpec, FAVICON_SENTINEL, SCHEMA};
pub use structure::Settings;
pub use utilities::{get_bundled_favicon_path, str_to_bool};
