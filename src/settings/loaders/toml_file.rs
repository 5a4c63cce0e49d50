use std::fs;
use std::path::Path;

use toml::{Table, Value};
use tracing::{debug, info};

use crate::settings::error::SettingsError;
use crate::settings::structure::Settings;


/// Name of the project configuration file looked up in the project directory.
pub const CONFIGURATION_FILE_NAME: &str = "fpm.toml";


/// Load settings from the `[extra.ford]` table of `fpm.toml` in `directory`.
///
/// Returns `Ok(None)` if there is no `fpm.toml`, or if it has no `[extra.ford]` table.
/// Callers should then fall back to the project file metadata or the defaults.
pub fn load_toml_settings<P: AsRef<Path>>(directory: P) -> Result<Option<Settings>, SettingsError> {
    let file_path = directory.as_ref().join(CONFIGURATION_FILE_NAME);

    if !file_path.is_file() {
        debug!("No {} in {}.", CONFIGURATION_FILE_NAME, directory.as_ref().display());
        return Ok(None);
    }

    let configuration_string = fs::read_to_string(&file_path).map_err(|source| SettingsError::Io {
        path: file_path.clone(),
        source,
    })?;

    let mut document =
        toml::from_str::<Table>(&configuration_string).map_err(|source| SettingsError::TomlParse {
            path: file_path.clone(),
            source,
        })?;

    let Some(Value::Table(mut extra)) = document.remove("extra") else {
        debug!("{} has no [extra] table.", file_path.display());
        return Ok(None);
    };

    let Some(Value::Table(ford)) = extra.remove("ford") else {
        debug!("{} has no [extra.ford] table.", file_path.display());
        return Ok(None);
    };

    info!("Loading settings from {}.", file_path.display());

    Settings::from_raw(ford).map(Some)
}


#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn project_with_fpm(contents: &str) -> tempfile::TempDir {
        let directory = tempfile::tempdir().unwrap();
        fs::write(directory.path().join(CONFIGURATION_FILE_NAME), contents).unwrap();
        directory
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let directory = tempfile::tempdir().unwrap();

        assert_eq!(load_toml_settings(directory.path()).unwrap(), None);
    }

    #[test]
    fn missing_tables_are_not_an_error() {
        let directory = project_with_fpm("name = \"project\"\n");
        assert_eq!(load_toml_settings(directory.path()).unwrap(), None);

        let directory = project_with_fpm("[extra]\nother = 1\n");
        assert_eq!(load_toml_settings(directory.path()).unwrap(), None);
    }

    #[test]
    fn native_values_are_used() {
        let directory = project_with_fpm(
            r#"
name = "project"

[extra.ford]
project = "My Project"
graph = true
max_frontpage_items = 4
src_dir = "code"
exclude = ["a.f90", "b.f90"]
"#,
        );

        let settings = load_toml_settings(directory.path()).unwrap().unwrap();

        assert_eq!(settings.project, "My Project");
        assert!(settings.graph);
        assert_eq!(settings.max_frontpage_items, 4);
        assert_eq!(settings.src_dir, vec![PathBuf::from("code")]);
        assert_eq!(settings.exclude, vec!["a.f90", "b.f90"]);
        assert_eq!(settings.docmark, "!");
    }

    #[test]
    fn malformed_file_names_the_path() {
        let directory = project_with_fpm("[extra.ford\n");

        let error = load_toml_settings(directory.path()).unwrap_err();

        assert!(matches!(error, SettingsError::TomlParse { .. }));
        assert!(error.to_string().contains(CONFIGURATION_FILE_NAME));
    }

    #[test]
    fn unknown_settings_are_rejected() {
        let directory = project_with_fpm("[extra.ford]\nprojet = \"typo\"\n");

        let error = load_toml_settings(directory.path()).unwrap_err();

        assert!(matches!(error, SettingsError::UnknownSetting { ref name } if name == "projet"));
    }
}
