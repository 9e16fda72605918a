use std::error::Error;
use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use lab_core::{DataRoot, DATA_PATH_ENV, DEFAULT_VERSION};
use lab_store::NotebookConfig;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::{
    clear::{self, ClearArgs},
    init::{self, InitArgs},
    ls::{self, LsArgs},
    show::{self, ShowArgs},
};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "lab", about = "Experiment folder and artifact manager")]
struct Cli {
    /// Absolute directory holding every experiment folder.
    #[arg(long, global = true, env = DATA_PATH_ENV)]
    root: Option<PathBuf>,
    /// Log informational messages for every file touched.
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the folder skeleton (and optionally a starter config).
    Init(InitArgs),
    /// Print a config document as an indented listing.
    Show(ShowArgs),
    /// List the artifacts of one version.
    Ls(LsArgs),
    /// Delete the artifacts of one version.
    Clear(ClearArgs),
}

/// Folder and version shared by every subcommand.
#[derive(ClapArgs, Debug, Clone)]
pub struct Target {
    /// Experiment folder name under the root.
    pub folder: String,
    /// Config and artifact version tag.
    #[arg(long = "config-version", default_value = DEFAULT_VERSION)]
    pub version: String,
}

impl Target {
    pub fn notebook(&self) -> NotebookConfig {
        NotebookConfig::new(self.folder.clone()).with_version(self.version.clone())
    }
}

/// Settings resolved from global flags.
pub struct Context {
    pub root: DataRoot,
    pub verbose: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let root = match cli.root {
        Some(path) => DataRoot::new(path)?,
        None => DataRoot::from_env()?,
    };
    let ctx = Context {
        root,
        verbose: cli.verbose,
    };
    match cli.command {
        Command::Init(args) => init::run(&ctx, &args),
        Command::Show(args) => show::run(&ctx, &args),
        Command::Ls(args) => ls::run(&ctx, &args),
        Command::Clear(args) => clear::run(&ctx, &args),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "info" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
