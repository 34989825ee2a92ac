use crate::config::{VenvBackend, TEMP_DIR_PREFIX};
use crate::core::error::{GhostEnvError, Result};
use crate::core::{spinner, ProcessExecutor};
use colored::Colorize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::warn;

const VENV_DIR: &str = "venv";

/// Paths inside a virtual environment.
#[derive(Debug, Clone)]
pub struct VenvLayout {
    venv_path: PathBuf,
}

impl VenvLayout {
    pub fn new(venv_path: PathBuf) -> Self {
        Self { venv_path }
    }

    pub fn venv_path(&self) -> &Path {
        &self.venv_path
    }

    pub fn exists(&self) -> bool {
        self.venv_path.exists()
    }

    pub fn bin_dir(&self) -> PathBuf {
        if cfg!(windows) {
            self.venv_path.join("Scripts")
        } else {
            self.venv_path.join("bin")
        }
    }

    pub fn executable(&self, command: &str) -> PathBuf {
        let bin_dir = self.bin_dir();
        if cfg!(windows) {
            bin_dir.join(format!("{}.exe", command))
        } else {
            bin_dir.join(command)
        }
    }

    pub fn python(&self) -> PathBuf {
        self.executable("python")
    }

    /// `PATH` with the environment's bin directory in front.
    pub fn path_var(&self) -> OsString {
        let mut paths = vec![self.bin_dir()];
        if let Some(original) = std::env::var_os("PATH") {
            paths.extend(std::env::split_paths(&original));
        }
        std::env::join_paths(paths).unwrap_or_else(|_| self.bin_dir().into_os_string())
    }

    /// Shell command that activates the environment later.
    pub fn activate_command(&self) -> String {
        if cfg!(windows) {
            format!("{}", self.bin_dir().join("activate.bat").display())
        } else {
            format!("source {}", self.bin_dir().join("activate").display())
        }
    }
}

/// Command line that creates a virtual environment at `venv_path`.
pub fn venv_command(backend: VenvBackend, interpreter: &str, venv_path: &Path) -> (String, Vec<String>) {
    let path = venv_path.to_string_lossy().to_string();
    match backend {
        VenvBackend::Venv => (
            interpreter.to_string(),
            vec!["-m".to_string(), "venv".to_string(), path],
        ),
        VenvBackend::Virtualenv => (
            interpreter.to_string(),
            vec!["-m".to_string(), "virtualenv".to_string(), path],
        ),
        // --seed keeps pip available inside the environment.
        VenvBackend::Uv => (
            "uv".to_string(),
            vec![
                "venv".to_string(),
                "--seed".to_string(),
                "--python".to_string(),
                interpreter.to_string(),
                path,
            ],
        ),
    }
}

/// What happened to the environment directory at teardown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Teardown {
    Kept(PathBuf),
    Removed,
}

/// A throwaway directory holding one virtual environment.
///
/// The directory is removed when the value is dropped unless
/// [`GhostEnv::teardown`] was asked to keep it.
pub struct GhostEnv {
    root: TempDir,
    layout: VenvLayout,
}

impl GhostEnv {
    pub fn create(base_dir: Option<&Path>) -> Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(TEMP_DIR_PREFIX);

        let root = match base_dir {
            Some(base) => {
                std::fs::create_dir_all(base)?;
                builder.tempdir_in(base)?
            }
            None => builder.tempdir()?,
        };

        let layout = VenvLayout::new(root.path().join(VENV_DIR));
        Ok(Self { root, layout })
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    pub fn layout(&self) -> &VenvLayout {
        &self.layout
    }

    pub fn python(&self) -> PathBuf {
        self.layout.python()
    }

    pub async fn provision(&self, backend: VenvBackend, interpreter: &str) -> Result<()> {
        let (program, args) = venv_command(backend, interpreter, self.layout.venv_path());

        if !ProcessExecutor::check_command_exists(&program) && !Path::new(&program).is_file() {
            return Err(GhostEnvError::PythonEnv(match backend {
                VenvBackend::Uv => {
                    "uv is not installed. Please install it first: https://github.com/astral-sh/uv"
                        .to_string()
                }
                _ => format!("Python interpreter '{}' not found on PATH", program),
            }));
        }

        println!(
            "{} Creating virtual environment at {} ({})",
            "⚙".blue().bold(),
            self.layout.venv_path().display().to_string().yellow(),
            backend.as_str().cyan()
        );

        let pb = spinner(format!("{} {}", program, args.join(" ")));
        let output = ProcessExecutor::execute(&program, &args, None).await;
        pb.finish_and_clear();
        let output = output?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GhostEnvError::PythonEnv(format!(
                "Failed to create virtual environment with {}: {}",
                backend.as_str(),
                stderr.trim()
            )));
        }

        if !self.python().exists() {
            return Err(GhostEnvError::PythonEnv(
                "Python executable not found in virtual environment".to_string(),
            ));
        }

        println!("{} Virtual environment created", "✓".green().bold());
        Ok(())
    }

    /// Remove the environment, or persist it when `keep` is set.
    pub fn teardown(self, keep: bool) -> Result<Teardown> {
        if keep {
            return Ok(Teardown::Kept(self.root.keep()));
        }

        let path = self.root.path().to_path_buf();
        if let Err(e) = self.root.close() {
            warn!("failed to remove {}: {}", path.display(), e);
            return Err(GhostEnvError::Io(e));
        }
        Ok(Teardown::Removed)
    }
}
