//! Command-line interface definitions for the settings inspection binary.

use std::path::PathBuf;

use clap::Parser;



/// Command-line arguments.
#[derive(Parser)]
#[command(
    name = "ford-settings",
    author,
    about = "Resolve FORD project settings and print them as TOML.",
    version
)]
pub struct CLIArgs {
    /// This is the project directory `fpm.toml` is looked up in and
    /// relative paths are resolved against.
    /// If unspecified, this defaults to the current directory.
    #[arg(
        short = 'd',
        long = "directory",
        help = "Project directory. Defaults to the current directory."
    )]
    pub directory: Option<PathBuf>,

    #[arg(
        short = 'p',
        long = "project-file",
        help = "Project file whose metadata is used when fpm.toml has no [extra.ford] table. \
                If unspecified, the defaults are used instead."
    )]
    pub project_file_path: Option<PathBuf>,

    #[arg(
        long = "console-log-filter",
        default_value = "warn",
        help = "Tracing level filter for console output, e.g. \"info\" or \"ford_settings=trace\"."
    )]
    pub console_log_filter: String,

    #[arg(
        long = "log-file-filter",
        default_value = "debug",
        help = "Tracing level filter for the log file."
    )]
    pub log_file_filter: String,

    #[arg(
        long = "log-file-output-directory",
        help = "If present, logs are also written to ford-settings.log in this directory."
    )]
    pub log_file_output_directory: Option<PathBuf>,

    #[arg(
        long = "keep-relative-paths",
        help = "If this flag is present, paths are printed as written instead of being \
                made absolute."
    )]
    pub keep_relative_paths: bool,
}


#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn arguments_are_consistent() {
        CLIArgs::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let arguments = CLIArgs::parse_from(["ford-settings"]);

        assert_eq!(arguments.directory, None);
        assert_eq!(arguments.console_log_filter, "warn");
        assert!(!arguments.keep_relative_paths);
    }

    #[test]
    fn project_file_and_directory() {
        let arguments =
            CLIArgs::parse_from(["ford-settings", "-d", "project", "-p", "project/README.md"]);

        assert_eq!(arguments.directory, Some(PathBuf::from("project")));
        assert_eq!(arguments.project_file_path, Some(PathBuf::from("project/README.md")));
    }
}
