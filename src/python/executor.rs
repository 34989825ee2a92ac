use crate::core::error::{GhostEnvError, Result};
use crate::core::ProcessExecutor;
use crate::python::env::VenvLayout;
use colored::Colorize;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tokio::process::Command;

/// Runs processes with a virtual environment activated.
pub struct VenvExecutor {
    layout: VenvLayout,
    working_dir: PathBuf,
}

impl VenvExecutor {
    pub fn new(layout: VenvLayout, working_dir: PathBuf) -> Self {
        Self {
            layout,
            working_dir,
        }
    }

    pub fn layout(&self) -> &VenvLayout {
        &self.layout
    }

    fn ensure_venv(&self) -> Result<PathBuf> {
        if !self.layout.exists() {
            return Err(GhostEnvError::PythonEnv(format!(
                "Virtual environment not found at {}",
                self.layout.venv_path().display()
            )));
        }

        let python = self.layout.python();
        if !python.exists() {
            return Err(GhostEnvError::PythonEnv(
                "Python executable not found in virtual environment".to_string(),
            ));
        }
        Ok(python)
    }

    /// A command that sees the environment as activated.
    pub fn command<S: AsRef<OsStr>>(&self, program: S) -> Command {
        let mut command = Command::new(program);
        command
            .env("VIRTUAL_ENV", self.layout.venv_path())
            .env("PATH", self.layout.path_var())
            .env_remove("PYTHONHOME")
            .current_dir(&self.working_dir);
        command
    }

    /// Run a script with the environment's interpreter.
    pub async fn run_script(&self, script: &Path, args: &[String]) -> Result<i32> {
        let python = self.ensure_venv()?;

        println!(
            "{} Running script: {}",
            "→".blue().bold(),
            script.display().to_string().yellow()
        );

        let mut command = self.command(&python);
        command.arg(script).args(args);
        ProcessExecutor::run_attached(command, "python")
            .await
            .map_err(session_error)
    }

    /// Start the environment's interactive interpreter.
    pub async fn start_repl(&self) -> Result<i32> {
        let python = self.ensure_venv()?;
        ProcessExecutor::run_attached(self.command(&python), "python")
            .await
            .map_err(session_error)
    }
}

fn session_error(err: GhostEnvError) -> GhostEnvError {
    match err {
        GhostEnvError::Interrupted => err,
        other => GhostEnvError::Session(other.to_string()),
    }
}
