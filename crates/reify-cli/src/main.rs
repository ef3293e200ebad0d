//! Reify CLI
//!
//! Lowers the resolved types in a JSON type file into runtime type-descriptor
//! construction expressions.

mod commands;
mod config;
mod logging;
mod output;
mod typefile;

use clap::{Parser, Subcommand};
use config::{OutputFormat, ReifyConfig};
use output::{resolve_color_choice, StyledOutput};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "reify")]
#[command(about = "Runtime type-descriptor lowering", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (defaults to ./reify.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// When to use colors: auto, always, never
    #[arg(long, global = true)]
    color: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lower every type in a type file
    Lower {
        /// JSON type file
        file: PathBuf,
        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
        /// Object the runtime helpers are called on
        #[arg(short, long)]
        namespace: Option<String>,
    },

    /// List runtime helpers
    Helpers {
        /// Object the runtime helpers are called on
        #[arg(short, long)]
        namespace: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cwd = std::env::current_dir()?;
    let config = ReifyConfig::discover(cli.config.as_deref(), &cwd)?;
    logging::init(&config.log.filter)?;

    let mut out = StyledOutput::new(resolve_color_choice(cli.color.as_deref()));

    let result = match cli.command {
        Commands::Lower {
            file,
            format,
            namespace,
        } => {
            let options = commands::lower::LowerOptions {
                format: format.unwrap_or(config.output.format),
                namespace: namespace.or(config.output.namespace),
            };
            commands::lower::execute(&file, &options, &mut out)
        }
        Commands::Helpers { namespace } => {
            let namespace = namespace.or(config.output.namespace);
            commands::helpers::execute(namespace.as_deref(), &mut out)
        }
    };

    if let Err(e) = result {
        out.stderr_error(&format!("error: {:#}", e));
        std::process::exit(1);
    }
    Ok(())
}
