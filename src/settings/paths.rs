use std::path::{Path, PathBuf};

use tracing::debug;

use super::error::SettingsError;
use super::schema::FAVICON_SENTINEL;
use super::structure::Settings;
use super::utilities::get_bundled_favicon_path;


/// Returns `directory` (or the current directory) as an absolute path.
pub fn absolute_directory(directory: Option<&Path>) -> Result<PathBuf, SettingsError> {
    let current_directory =
        || std::env::current_dir().map_err(|source| SettingsError::CurrentDirectory { source });

    let directory = match directory {
        Some(directory) if directory.is_absolute() => directory.to_path_buf(),
        Some(directory) => current_directory()?.join(directory),
        None => current_directory()?,
    };

    Ok(dunce::simplified(&directory).components().collect())
}

/// Resolves `path` against `base_directory`. Absolute paths are returned unchanged.
///
/// This is purely lexical: `.` components are dropped, `..` and symlinks are kept as-is.
pub fn normalise_path(base_directory: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }

    let joined = base_directory.join(path);
    dunce::simplified(&joined).components().collect()
}


impl Settings {
    /// Every path-typed setting that currently holds a value.
    fn path_settings_mut(&mut self) -> Vec<&mut PathBuf> {
        let mut paths = vec![&mut self.favicon, &mut self.output_dir];

        paths.extend(
            [
                &mut self.css,
                &mut self.graph_dir,
                &mut self.mathjax_config,
                &mut self.md_base_dir,
                &mut self.media_dir,
                &mut self.page_dir,
            ]
            .into_iter()
            .flatten(),
        );

        paths.extend(
            self.copy_subdir
                .iter_mut()
                .chain(self.exclude_dir.iter_mut())
                .chain(self.include.iter_mut())
                .chain(self.src_dir.iter_mut()),
        );

        paths
    }

    /// Make every path setting absolute, relative to `directory`
    /// (the current directory if `None`).
    ///
    /// The favicon sentinel is replaced by the bundled favicon rather than being
    /// resolved against `directory`, and an unset `md_base_dir` becomes `directory`.
    /// Calling this again is harmless: absolute paths are left untouched.
    pub fn normalise_paths(&mut self, directory: Option<&Path>) -> Result<(), SettingsError> {
        let directory = absolute_directory(directory)?;

        if self.favicon == Path::new(FAVICON_SENTINEL) {
            self.favicon = get_bundled_favicon_path();
        }

        for path in self.path_settings_mut() {
            *path = normalise_path(&directory, path);
        }

        if self.md_base_dir.is_none() {
            self.md_base_dir = Some(directory.clone());
        }

        debug!("Normalised setting paths against {}.", directory.display());

        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use toml::{Table, Value};

    use super::*;
    use crate::settings::schema::{SettingKind, SCHEMA};

    #[cfg(unix)]
    #[test]
    fn relative_paths_are_joined_to_the_base() {
        assert_eq!(
            normalise_path(Path::new("/proj"), Path::new("./doc")),
            PathBuf::from("/proj/doc")
        );
        assert_eq!(
            normalise_path(Path::new("/proj"), Path::new("src/./api")),
            PathBuf::from("/proj/src/api")
        );
        assert_eq!(
            normalise_path(Path::new("/proj"), Path::new("../shared")),
            PathBuf::from("/proj/../shared")
        );
    }

    #[cfg(unix)]
    #[test]
    fn absolute_paths_are_unchanged() {
        assert_eq!(
            normalise_path(Path::new("/proj"), Path::new("/abs/doc")),
            PathBuf::from("/abs/doc")
        );
    }

    #[cfg(unix)]
    #[test]
    fn settings_paths_are_resolved() {
        let mut settings = Settings::default();
        settings.normalise_paths(Some(Path::new("/proj"))).unwrap();

        assert_eq!(settings.output_dir, PathBuf::from("/proj/doc"));
        assert_eq!(settings.src_dir, vec![PathBuf::from("/proj/src")]);
        assert_eq!(settings.md_base_dir, Some(PathBuf::from("/proj")));
    }

    #[cfg(unix)]
    #[test]
    fn favicon_sentinel_uses_the_bundled_favicon() {
        let mut settings = Settings::default();
        settings.normalise_paths(Some(Path::new("/proj"))).unwrap();

        assert_eq!(settings.favicon, get_bundled_favicon_path());
        assert_ne!(settings.favicon, PathBuf::from("/proj/favicon.png"));
    }

    #[cfg(unix)]
    #[test]
    fn overridden_favicon_is_resolved_normally() {
        let mut raw = Table::new();
        raw.insert("favicon".into(), Value::String("assets/icon.png".into()));

        let mut settings = Settings::from_raw(raw).unwrap();
        settings.normalise_paths(Some(Path::new("/proj"))).unwrap();

        assert_eq!(settings.favicon, PathBuf::from("/proj/assets/icon.png"));
    }

    #[cfg(unix)]
    #[test]
    fn second_normalisation_does_not_reroot() {
        let mut settings = Settings::default();
        settings.normalise_paths(Some(Path::new("/proj"))).unwrap();

        let first = settings.clone();
        settings.normalise_paths(Some(Path::new("/elsewhere"))).unwrap();

        assert_eq!(settings, first);
    }

    #[test]
    fn every_path_setting_is_normalised() {
        let mut raw = Table::new();

        for spec in SCHEMA.iter().filter(|spec| spec.kind.is_path()) {
            raw.insert(spec.name.to_string(), Value::String(format!("relative/{}", spec.name)));
        }

        let mut settings = Settings::from_raw(raw).unwrap();
        let base = std::env::temp_dir();
        settings.normalise_paths(Some(base.as_path())).unwrap();

        let serialized = Value::try_from(&settings).unwrap();

        for spec in SCHEMA.iter().filter(|spec| spec.kind.is_path()) {
            let paths: Vec<&str> = match (&serialized[spec.name], spec.kind) {
                (Value::Array(items), SettingKind::ListOfPath) => {
                    items.iter().filter_map(Value::as_str).collect()
                }
                (value, _) => value.as_str().into_iter().collect(),
            };

            assert_eq!(paths.len(), 1, "{}", spec.name);
            assert!(Path::new(paths[0]).is_absolute(), "{} was not normalised", spec.name);
        }
    }

    #[test]
    fn relative_base_directory_is_made_absolute() {
        let directory = absolute_directory(Some(Path::new("project"))).unwrap();

        assert!(directory.is_absolute());
        assert!(directory.ends_with("project"));
    }
}
