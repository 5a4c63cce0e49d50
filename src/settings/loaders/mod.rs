//! The two ways of getting raw settings: the `[extra.ford]` table of `fpm.toml`
//! and the metadata preamble of the project file.

mod include;
mod metadata;
mod toml_file;

pub use include::{deprecated_include_warning, DEPRECATED_INCLUDE_WARNING};
pub use metadata::{load_markdown_settings, meta_preprocessor};
pub use toml_file::{load_toml_settings, CONFIGURATION_FILE_NAME};
