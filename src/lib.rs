//! Settings loading for the FORD documentation generator.
//!
//! Settings come either from the `[extra.ford]` table of a project's `fpm.toml`, or
//! from the metadata preamble of its project file. Both are coerced against one typed
//! schema with defaults, validated, and can then be resolved to absolute paths.
//! See the [`settings`] module for details.

pub mod settings;

pub use settings::{load_markdown_settings, load_toml_settings, Settings, SettingsError};
