use crate::config::schema::GlobalConfig;
use crate::core::error::{GhostEnvError, Result};

pub fn validate_script_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(GhostEnvError::Config(
            "session.script_name cannot be empty".to_string(),
        ));
    }

    if name.chars().any(|c| c == '/' || c == '\\') {
        return Err(GhostEnvError::Config(
            "session.script_name must be a file name (no path separators)".to_string(),
        ));
    }

    if !name.ends_with(".py") || name == ".py" {
        return Err(GhostEnvError::Config(
            "session.script_name must end with .py".to_string(),
        ));
    }

    Ok(())
}

pub fn validate_packages(packages: &[String]) -> Result<()> {
    if packages.iter().any(|p| p.trim().is_empty()) {
        return Err(GhostEnvError::Config(
            "package list cannot contain empty entries".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_global_config(config: &GlobalConfig) -> Result<()> {
    if config.python.interpreter.trim().is_empty() {
        return Err(GhostEnvError::Config(
            "python.interpreter cannot be empty".to_string(),
        ));
    }

    validate_script_name(&config.session.script_name)?;

    if let Some(url) = config.install.index_url.as_deref() {
        if url.trim().is_empty() {
            return Err(GhostEnvError::Config(
                "install.index_url cannot be empty".to_string(),
            ));
        }
    }

    if config
        .install
        .extra_index_urls
        .iter()
        .any(|u| u.trim().is_empty())
    {
        return Err(GhostEnvError::Config(
            "install.extra_index_urls cannot contain empty entries".to_string(),
        ));
    }

    if let Some(editor) = config.session.editor.as_deref() {
        if editor.trim().is_empty() {
            return Err(GhostEnvError::Config(
                "session.editor cannot be empty".to_string(),
            ));
        }
    }

    Ok(())
}
