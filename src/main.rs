//! Astra's main application entry point.
//! Handles command-line argument parsing, logger setup and dispatch to the
//! build, install, package and init stages.

use std::path::PathBuf;

use astra::{
    assets::HttpDownloader,
    build::build,
    cli::{get_args, Args, Command},
    config::load_config,
    error::{default_error_handler, Result},
    init::init,
    install::{install, InstallOutcome},
    package::package,
};

/// Main application entry point.
fn main() {
    let args = get_args();

    // Logger configuration
    env_logger::Builder::new()
        .filter_level(if args.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init();

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Anchors a command-line path to the working directory.
fn absolute(path: PathBuf) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path)
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

/// Main application logic execution.
fn run(args: Args) -> Result<()> {
    match args.command {
        Command::Build { config } => {
            let config = load_config(&config.config_path())?;
            let report = build(&config.build_plan())?;
            println!("Built {} script(s).", report.outputs.len());
        }
        Command::Install { config, destination } => {
            let config = load_config(&config.config_path())?;
            let destination = destination.map(absolute).transpose()?;
            match install(&config.install_plan(destination))? {
                InstallOutcome::NoDestination => {
                    println!("No install destination configured, nothing to do.")
                }
                InstallOutcome::Installed { files } => {
                    for file in &files {
                        println!("Installed: '{}'", file.display());
                    }
                }
            }
        }
        Command::Package { config } => {
            let config = load_config(&config.config_path())?;
            let plan = config.package_plan()?;
            let downloader = HttpDownloader::new()?;
            let report = package(&plan, &downloader)?;
            if let Some(archive) = report.archive {
                println!("Archive: '{}'", archive.display());
            }
            if let Some(notes) = report.notes {
                println!("Release notes: '{}'", notes.display());
            }
        }
        Command::Init { output, force } => {
            if let Some(path) = init(&output, force)? {
                println!("Created '{}'", path.display());
            }
        }
    }
    Ok(())
}
