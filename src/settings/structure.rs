use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use toml::{Table, Value};
use tracing::debug;

use super::coercion::{coerce_table, fill_defaults};
use super::error::SettingsError;
use super::traits::ResolvableConfiguration;


/// The documentation markers, in the order collisions are reported.
const DOCMARK_SETTINGS: [&str; 4] = ["docmark", "predocmark", "docmark_alt", "predocmark_alt"];


/// The fully-typed settings of one documentation run.
///
/// Construct this through [`Settings::from_raw`] or one of the loaders
/// ([`load_toml_settings`][crate::settings::load_toml_settings],
/// [`load_markdown_settings`][crate::settings::load_markdown_settings]) so that derived
/// values and validation are applied. Paths stay as written until
/// [`Settings::normalise_paths`] is called.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    pub alias: Vec<String>,
    pub author: Option<String>,
    pub author_description: Option<String>,
    pub author_pic: Option<String>,
    pub bitbucket: Option<String>,
    pub coloured_edges: bool,
    pub copy_subdir: Vec<PathBuf>,
    pub creation_date: String,
    pub css: Option<PathBuf>,
    pub dbg: bool,

    /// Entity visibilities to document, always lowercase.
    pub display: Vec<String>,

    pub doc_license: String,
    pub docmark: String,
    pub docmark_alt: String,
    pub email: Option<String>,
    pub encoding: String,
    pub exclude: Vec<String>,
    pub exclude_dir: Vec<PathBuf>,

    /// Free-form extensions, including every entry of `fpp_extensions`.
    pub extensions: Vec<String>,

    pub external: Vec<Value>,
    pub externalize: bool,
    pub extra_filetypes: Vec<Value>,
    pub extra_mods: Vec<Value>,
    pub extra_vartypes: Vec<Value>,
    pub facebook: Option<String>,
    pub favicon: PathBuf,
    pub fixed_extensions: Vec<String>,
    pub fixed_length_limit: bool,
    pub force: bool,
    pub fpp_extensions: Vec<String>,
    pub github: Option<String>,
    pub gitlab: Option<String>,
    pub gitter_sidecar: Option<String>,
    pub google_plus: Option<String>,
    pub graph: bool,
    pub graph_dir: Option<PathBuf>,
    pub graph_maxdepth: u64,
    pub graph_maxnodes: u64,
    pub hide_undoc: bool,
    pub incl_src: bool,
    pub include: Vec<PathBuf>,
    pub license: String,
    pub linkedin: Option<String>,
    pub lower: bool,

    #[serde(rename = "macro")]
    pub macros: Vec<String>,

    pub mathjax_config: Option<PathBuf>,
    pub max_frontpage_items: usize,
    pub md_base_dir: Option<PathBuf>,
    pub md_extensions: Vec<String>,
    pub media_dir: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub page_dir: Option<PathBuf>,

    /// Worker count for the rendering pipeline. Not used while loading settings.
    pub parallel: usize,

    pub predocmark: String,
    pub predocmark_alt: String,
    pub preprocess: bool,
    pub preprocessor: String,
    pub print_creation_date: bool,
    pub privacy_policy_url: Option<String>,
    pub proc_internals: bool,
    pub project: String,
    pub project_bitbucket: Option<String>,
    pub project_download: Option<String>,
    pub project_github: Option<String>,
    pub project_gitlab: Option<String>,
    pub project_sourceforge: Option<String>,
    pub project_url: String,
    pub project_website: Option<String>,
    pub quiet: bool,

    /// Derived: links are written relative to each page when there is no `project_url`.
    #[serde(skip_deserializing)]
    pub relative: bool,

    pub revision: Option<String>,
    pub search: bool,
    pub show_proc_parent: bool,
    pub sort: String,
    pub source: bool,
    pub src_dir: Vec<PathBuf>,
    pub summary: Option<String>,
    pub terms_of_service_url: Option<String>,
    pub twitter: Option<String>,
    pub version: Option<String>,
    pub warn: bool,
    pub website: Option<String>,
    pub year: String,
}


/// Settings where every value has its declared type, but nothing has been derived
/// or validated yet.
#[derive(Debug)]
pub(crate) struct UnresolvedSettings {
    settings: Settings,
}

impl UnresolvedSettings {
    /// Builds the typed record from an already coerced table, filling in defaults.
    pub(crate) fn from_coerced(coerced: Table) -> Result<Self, SettingsError> {
        let settings = Value::Table(fill_defaults(coerced))
            .try_into::<Settings>()
            .map_err(|source| SettingsError::Deserialize { source })?;

        Ok(Self { settings })
    }
}


impl ResolvableConfiguration for UnresolvedSettings {
    type Resolved = Settings;

    fn resolve(self) -> Result<Self::Resolved, SettingsError> {
        let mut settings = self.settings;

        settings.relative = settings.project_url.is_empty();

        settings.display = settings
            .display
            .iter()
            .map(|item| item.to_lowercase())
            .collect();

        let mut extensions: Vec<String> = Vec::with_capacity(
            settings.extensions.len() + settings.fpp_extensions.len(),
        );
        for extension in settings.extensions.iter().chain(&settings.fpp_extensions) {
            if !extensions.contains(extension) {
                extensions.push(extension.clone());
            }
        }
        settings.extensions = extensions;

        settings.check_docmarks()?;

        debug!(
            "Resolved settings for project \"{}\" (relative links: {}).",
            settings.project, settings.relative
        );

        Ok(settings)
    }
}


impl Settings {
    /// Coerce, default, derive and validate a raw table of settings.
    pub fn from_raw(raw: Table) -> Result<Self, SettingsError> {
        UnresolvedSettings::from_coerced(coerce_table(raw)?)?.resolve()
    }

    fn docmark(&self, name: &str) -> &str {
        match name {
            "docmark" => &self.docmark,
            "predocmark" => &self.predocmark,
            "docmark_alt" => &self.docmark_alt,
            _ => &self.predocmark_alt,
        }
    }

    /// No two documentation markers may share the same non-empty value.
    fn check_docmarks(&self) -> Result<(), SettingsError> {
        for (index, &first) in DOCMARK_SETTINGS.iter().enumerate() {
            for &second in &DOCMARK_SETTINGS[index + 1..] {
                let mark = self.docmark(first);

                if !mark.is_empty() && mark == self.docmark(second) {
                    return Err(SettingsError::DocmarkCollision {
                        first,
                        second,
                        mark: mark.to_string(),
                    });
                }
            }
        }

        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        // PANIC SAFETY: The schema defaults have the declared types and distinct docmarks.
        Settings::from_raw(Table::new()).unwrap()
    }
}
