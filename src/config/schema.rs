use serde::{Deserialize, Serialize};

pub const DEFAULT_SCRIPT_NAME: &str = "ghost_test.py";
pub const TEMP_DIR_PREFIX: &str = "ghostenv_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GlobalConfig {
    #[serde(default)]
    pub python: PythonConfig,
    #[serde(default)]
    pub install: InstallConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PythonConfig {
    #[serde(default = "default_interpreter")]
    pub interpreter: String,
    #[serde(default)]
    pub backend: VenvBackend,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InstallConfig {
    #[serde(default)]
    pub installer: InstallerKind,
    #[serde(default = "default_true")]
    pub quiet: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_url: Option<String>,
    #[serde(default)]
    pub extra_index_urls: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub keep: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp_dir: Option<String>,
    #[serde(default = "default_script_name")]
    pub script_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor: Option<String>,
}

/// Tool used to create the virtual environment.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VenvBackend {
    #[default]
    Venv,
    Virtualenv,
    Uv,
}

impl VenvBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            VenvBackend::Venv => "venv",
            VenvBackend::Virtualenv => "virtualenv",
            VenvBackend::Uv => "uv",
        }
    }
}

/// Tool used to install packages into the virtual environment.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InstallerKind {
    #[default]
    Pip,
    Uv,
}

impl InstallerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstallerKind::Pip => "pip",
            InstallerKind::Uv => "uv",
        }
    }
}

fn default_interpreter() -> String {
    if cfg!(windows) {
        "python".to_string()
    } else {
        "python3".to_string()
    }
}

fn default_true() -> bool {
    true
}

fn default_script_name() -> String {
    DEFAULT_SCRIPT_NAME.to_string()
}

impl Default for PythonConfig {
    fn default() -> Self {
        Self {
            interpreter: default_interpreter(),
            backend: VenvBackend::default(),
        }
    }
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            installer: InstallerKind::default(),
            quiet: default_true(),
            index_url: None,
            extra_index_urls: Vec::new(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            keep: false,
            temp_dir: None,
            script_name: default_script_name(),
            editor: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config: GlobalConfig = toml::from_str("").unwrap();
        assert_eq!(config.python.backend, VenvBackend::Venv);
        assert_eq!(config.install.installer, InstallerKind::Pip);
        assert!(config.install.quiet);
        assert!(!config.session.keep);
        assert_eq!(config.session.script_name, DEFAULT_SCRIPT_NAME);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config: GlobalConfig = toml::from_str(
            r#"
[python]
backend = "uv"

[session]
keep = true
editor = "code"
"#,
        )
        .unwrap();

        assert_eq!(config.python.backend, VenvBackend::Uv);
        assert_eq!(config.python.interpreter, default_interpreter());
        assert!(config.session.keep);
        assert_eq!(config.session.editor.as_deref(), Some("code"));
        assert_eq!(config.session.script_name, DEFAULT_SCRIPT_NAME);
    }

    #[test]
    fn unknown_backend_is_rejected() {
        let result: std::result::Result<GlobalConfig, _> =
            toml::from_str("[python]\nbackend = \"conda\"\n");
        assert!(result.is_err());
    }
}
