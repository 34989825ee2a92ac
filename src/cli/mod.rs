pub mod commands;
pub mod output;

use crate::config::{InstallerKind, VenvBackend};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum BackendArg {
    Venv,
    Virtualenv,
    Uv,
}

impl From<BackendArg> for VenvBackend {
    fn from(value: BackendArg) -> Self {
        match value {
            BackendArg::Venv => VenvBackend::Venv,
            BackendArg::Virtualenv => VenvBackend::Virtualenv,
            BackendArg::Uv => VenvBackend::Uv,
        }
    }
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum InstallerArg {
    Pip,
    Uv,
}

impl From<InstallerArg> for InstallerKind {
    fn from(value: InstallerArg) -> Self {
        match value {
            InstallerArg::Pip => InstallerKind::Pip,
            InstallerArg::Uv => InstallerKind::Uv,
        }
    }
}

#[derive(Parser)]
#[command(
    name = "ghostenv",
    version,
    about = "👻 Temporary, disposable virtual environments for testing pip packages",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Args, Debug, Default)]
pub struct RunArgs {
    /// Package names to install (e.g., requests pandas)
    pub packages: Vec<String>,

    /// Path to a requirements.txt file
    #[arg(short = 'r', long)]
    pub requirements: Option<PathBuf>,

    /// Python script to run in the environment instead of starting a REPL
    #[arg(long = "run", value_name = "SCRIPT", conflicts_with = "ide")]
    pub script: Option<PathBuf>,

    /// Open the generated test script in an editor; pass a command or omit value to auto-detect
    #[arg(long, num_args = 0..=1, default_missing_value = "", value_name = "EDITOR")]
    pub ide: Option<String>,

    /// Keep the temporary environment after exiting
    #[arg(long)]
    pub keep: bool,

    /// Python interpreter used to create the environment (default: from config, or python3)
    #[arg(short, long)]
    pub python: Option<String>,

    /// Virtual environment backend (default: from config, or venv)
    #[arg(long, value_enum)]
    pub backend: Option<BackendArg>,

    /// Package installer (default: from config, or pip)
    #[arg(long, value_enum)]
    pub installer: Option<InstallerArg>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a temporary virtual environment, install packages, and start a REPL
    Run(RunArgs),

    /// Show the ghostenv version
    Version,

    /// Check interpreters, backends and editors
    Doctor,

    /// Show the configuration file and effective settings
    Config {
        /// Write a default configuration file if none exists
        #[arg(long)]
        init: bool,
    },
}

pub async fn run(cli: Cli) -> crate::core::error::Result<()> {
    match cli.command {
        Commands::Run(args) => commands::run::execute(args).await,

        Commands::Version => commands::version::execute(),

        Commands::Doctor => commands::doctor::execute().await,

        Commands::Config { init } => commands::config::execute(init).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("ghostenv").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn run_accepts_packages_and_flags() {
        let cli = parse(&["run", "requests", "pandas>=2", "--keep", "-r", "req.txt"]);
        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.packages, vec!["requests", "pandas>=2"]);
        assert!(args.keep);
        assert_eq!(args.requirements, Some(PathBuf::from("req.txt")));
        assert!(args.ide.is_none());
    }

    #[test]
    fn bare_ide_flag_means_auto_detect() {
        let cli = parse(&["run", "--ide", "--", "numpy"]);
        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.ide.as_deref(), Some(""));
        assert_eq!(args.packages, vec!["numpy"]);

        let cli = parse(&["run", "numpy", "--ide=code"]);
        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.ide.as_deref(), Some("code"));
    }

    #[test]
    fn run_script_conflicts_with_ide() {
        let result = Cli::try_parse_from(["ghostenv", "run", "x", "--run", "a.py", "--ide=code"]);
        assert!(result.is_err());
    }

    #[test]
    fn backend_and_installer_overrides() {
        let cli = parse(&["run", "httpx", "--backend", "uv", "--installer", "uv", "-p", "3.12"]);
        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(VenvBackend::from(args.backend.unwrap()), VenvBackend::Uv);
        assert_eq!(InstallerKind::from(args.installer.unwrap()), InstallerKind::Uv);
        assert_eq!(args.python.as_deref(), Some("3.12"));
    }

    #[test]
    fn version_subcommand_parses() {
        assert!(matches!(parse(&["version"]).command, Commands::Version));
    }
}
