use clap::Parser;
use ford_settings::settings::{
    absolute_directory,
    load_markdown_settings,
    load_toml_settings,
    Settings,
};
use miette::{miette, Context, IntoDiagnostic, Result};
use tracing::info;

use crate::{
    cli::CLIArgs,
    logging::{initialize_tracing, parse_level_filter},
};

mod cli;
mod logging;


fn main() -> Result<()> {
    let cli_args = CLIArgs::parse();

    let logging_raii_guard = initialize_tracing(
        parse_level_filter("console-log-filter", &cli_args.console_log_filter)?,
        parse_level_filter("log-file-filter", &cli_args.log_file_filter)?,
        cli_args.log_file_output_directory.as_deref(),
        "ford-settings.log",
    )
    .wrap_err("Failed to initialize tracing.")?;

    info!("Tracing initialized.");


    let directory = absolute_directory(cli_args.directory.as_deref())
        .wrap_err("Failed to resolve the project directory.")?;

    let toml_settings = load_toml_settings(&directory)
        .wrap_err_with(|| miette!("Failed to load settings from {}.", directory.display()))?;

    let mut settings = match (toml_settings, cli_args.project_file_path.as_ref()) {
        (Some(settings), _) => settings,
        (None, Some(project_file_path)) => {
            info!("Loading settings from {}.", project_file_path.display());

            let project_file = std::fs::read_to_string(project_file_path)
                .into_diagnostic()
                .wrap_err_with(|| {
                    miette!("Could not read project file {}.", project_file_path.display())
                })?;

            let (settings, _body) = load_markdown_settings(&directory, &project_file)
                .wrap_err("Failed to load settings from the project file metadata.")?;

            settings
        }
        (None, None) => {
            info!("No settings found, using the defaults.");
            Settings::default()
        }
    };

    if !cli_args.keep_relative_paths {
        settings
            .normalise_paths(Some(directory.as_path()))
            .wrap_err("Failed to normalise setting paths.")?;
    }


    let settings_string = toml::to_string_pretty(&settings)
        .into_diagnostic()
        .wrap_err("Failed to serialize settings.")?;

    println!("{}", settings_string);


    drop(logging_raii_guard);
    Ok(())
}
