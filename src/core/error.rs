use thiserror::Error;

#[derive(Error, Debug)]
pub enum GhostEnvError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Python environment error: {0}")]
    PythonEnv(String),

    #[error("Installation failed: {0}")]
    Install(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error("Editor error: {0}")]
    Editor(String),

    #[error("Command execution failed: {0}")]
    CommandFailed(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("You must specify packages to install or a requirements file")]
    NothingToInstall,

    #[error("Operation cancelled by user")]
    Interrupted,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    TomlSerialize(#[from] toml::ser::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GhostEnvError {
    /// Process exit code reported when this error ends a run.
    pub fn exit_code(&self) -> i32 {
        match self {
            GhostEnvError::Interrupted => 130,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, GhostEnvError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interrupt_maps_to_sigint_exit_code() {
        assert_eq!(GhostEnvError::Interrupted.exit_code(), 130);
        assert_eq!(GhostEnvError::Install("x".to_string()).exit_code(), 1);
    }
}
