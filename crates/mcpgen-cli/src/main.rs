use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "mcpgen", version, about = "Keep generated project artifacts in sync with the model registry")]
struct Cli {
    /// Path to the configuration file. Defaults apply when it does not exist.
    #[arg(long, global = true, default_value = mcpgen_core::config::CONFIG_FILE_NAME)]
    config: PathBuf,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Regenerate the schema, type definitions, project descriptor and documentation.
    Sync {
        /// Only report stale artifacts; write nothing.
        #[arg(long, default_value_t = false)]
        check: bool,
    },

    /// Validate the model registry against its JSON Schema and naming rules.
    Check,

    /// Interactively add a model to the registry.
    AddModel {
        /// Run a sync after the model is saved without asking.
        #[arg(long, default_value_t = false)]
        sync: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.cmd {
        Command::Sync { check } => commands::sync::run(&cli.config, check)?,
        Command::Check => commands::check::run(&cli.config)?,
        Command::AddModel { sync } => commands::add_model::run(&cli.config, sync)?,
    }

    Ok(())
}
