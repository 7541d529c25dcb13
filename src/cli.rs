//! Command-line interface implementation for Astra.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, Args as ClapArgs, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

use crate::constants::CONFIG_FILE;

/// Command-line arguments structure for Astra.
#[derive(Parser, Debug)]
#[command(author, version, about = "Astra: script builder and packager for AviUtl2", long_about = None)]
pub struct Args {
    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Location of the project configuration.
#[derive(ClapArgs, Debug, Clone)]
pub struct ConfigArgs {
    /// Source directory containing the configuration file
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub source: PathBuf,

    /// Configuration file name
    #[arg(short, long, value_name = "FILE", default_value = CONFIG_FILE)]
    pub config: String,
}

impl ConfigArgs {
    pub fn config_path(&self) -> PathBuf {
        self.source.join(&self.config)
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build scripts for AviUtl2
    Build {
        #[command(flatten)]
        config: ConfigArgs,
    },

    /// Copy build artifacts to the target installation directory
    Install {
        #[command(flatten)]
        config: ConfigArgs,

        /// Destination directory for installation (default: as defined in config)
        #[arg(short, long, value_name = "DIR")]
        destination: Option<PathBuf>,
    },

    /// Create a distributable package from the project
    Package {
        #[command(flatten)]
        config: ConfigArgs,
    },

    /// Generate a template JSON configuration file for a new project
    Init {
        /// Destination directory for the generated configuration file
        #[arg(short, long, value_name = "DIR", default_value = ".")]
        output: PathBuf,

        /// Overwrite if exists
        #[arg(short, long)]
        force: bool,
    },
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 and the help text if no subcommand is given
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if matches!(
                e.kind(),
                ErrorKind::MissingRequiredArgument
                    | ErrorKind::MissingSubcommand
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) {
                Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help()
                    .unwrap();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
