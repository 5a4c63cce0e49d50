use std::fs;
use std::path::Path;

use ford_settings::settings::{get_bundled_favicon_path, CONFIGURATION_FILE_NAME};
use ford_settings::{load_markdown_settings, load_toml_settings, Settings, SettingsError};

#[test]
fn absent_configuration_yields_normalised_defaults() {
    let directory = tempfile::tempdir().unwrap();

    let loaded = load_toml_settings(directory.path()).unwrap();
    assert!(loaded.is_none());

    let mut settings = loaded.unwrap_or_default();
    settings.normalise_paths(Some(directory.path())).unwrap();

    let mut expected = Settings::default();
    expected.output_dir = directory.path().join("doc");
    expected.src_dir = vec![directory.path().join("src")];
    expected.favicon = get_bundled_favicon_path();
    expected.md_base_dir = Some(directory.path().to_path_buf());

    assert_eq!(settings, expected);
}

#[test]
fn both_sources_converge_on_the_same_settings() {
    let directory = tempfile::tempdir().unwrap();

    fs::write(
        directory.path().join(CONFIGURATION_FILE_NAME),
        r#"
[extra.ford]
project = "Converge"
summary = "First line\nSecond line"
graph = true
search = false
max_frontpage_items = 25
src_dir = ["./src", "./lib"]
exclude_dir = "./src/old"
display = ["Public", "PRIVATE"]
project_url = "https://example.org/docs"
predocmark = ""
predocmark_alt = ""
"#,
    )
    .unwrap();

    let project_file = "\
project: Converge
summary: First line
    Second line
graph: Yes
search: no
max_frontpage_items: 25
src_dir: ./src
src_dir: ./lib
exclude_dir: ./src/old
display: Public
    PRIVATE
project_url: https://example.org/docs
predocmark:
predocmark_alt:

Body of the project file.";

    let mut from_toml = load_toml_settings(directory.path()).unwrap().unwrap();
    let (mut from_metadata, body) = load_markdown_settings(directory.path(), project_file).unwrap();

    assert_eq!(body, "Body of the project file.");
    assert_eq!(from_toml, from_metadata);

    assert_eq!(from_toml.summary.as_deref(), Some("First line\nSecond line"));
    assert_eq!(from_toml.display, vec!["public", "private"]);
    assert!(!from_toml.relative);

    from_toml.normalise_paths(Some(directory.path())).unwrap();
    from_metadata.normalise_paths(Some(directory.path())).unwrap();

    assert_eq!(from_toml, from_metadata);
    assert_eq!(
        from_toml.src_dir,
        vec![directory.path().join("src"), directory.path().join("lib")]
    );
    assert_eq!(from_toml.exclude_dir, vec![directory.path().join("src/old")]);
}

#[test]
fn docmark_collision_from_metadata() {
    let directory = tempfile::tempdir().unwrap();

    let error = load_markdown_settings(directory.path(), "docmark: !\npredocmark: !\n").unwrap_err();

    let message = error.to_string();
    assert!(matches!(error, SettingsError::DocmarkCollision { .. }));
    assert!(message.contains("docmark"));
    assert!(message.contains("predocmark"));
}

#[test]
fn absolute_paths_survive_normalisation() {
    let directory = tempfile::tempdir().unwrap();
    let output_directory = directory.path().join("elsewhere").join("doc");

    fs::write(
        directory.path().join(CONFIGURATION_FILE_NAME),
        format!(
            "[extra.ford]\noutput_dir = '{}'\n",
            output_directory.display()
        ),
    )
    .unwrap();

    let mut settings = load_toml_settings(directory.path()).unwrap().unwrap();
    settings
        .normalise_paths(Some(Path::new("/unrelated/base")))
        .unwrap();

    assert_eq!(settings.output_dir, output_directory);
}
