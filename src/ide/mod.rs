use crate::core::error::{GhostEnvError, Result};
use crate::core::{write_file, ProcessExecutor};
use crate::python::VenvExecutor;
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Editors looked up on PATH when nothing is configured.
const KNOWN_EDITORS: &[&str] = &["code", "codium", "pycharm", "charm", "zed", "subl"];

/// A resolved editor command line, e.g. `code --wait`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Editor {
    pub program: String,
    pub args: Vec<String>,
}

impl Editor {
    /// Split an editor command line on whitespace.
    ///
    /// A command naming an existing file is taken whole, so a program path
    /// with spaces works as long as it carries no extra arguments.
    pub fn parse(command: &str) -> Option<Self> {
        let trimmed = command.trim();
        if trimmed.contains(char::is_whitespace) && Path::new(trimmed).is_file() {
            return Some(Self {
                program: trimmed.to_string(),
                args: Vec::new(),
            });
        }

        let mut parts = trimmed.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
        })
    }

    fn stem(&self) -> String {
        Path::new(&self.program)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.program)
            .to_lowercase()
    }

    /// VS Code-family editors read `.vscode/settings.json`.
    pub fn is_vscode_family(&self) -> bool {
        matches!(self.stem().as_str(), "code" | "code-insiders" | "codium")
    }

    /// GUI launchers that return immediately unless asked to wait.
    fn wait_flag(&self) -> Option<&'static str> {
        match self.stem().as_str() {
            "code" | "code-insiders" | "codium" | "zed" | "subl" => Some("--wait"),
            _ => None,
        }
    }

    /// Full argument list to open `script`, with `workspace` as the project
    /// folder for editors that understand one.
    pub fn open_args(&self, workspace: &Path, script: &Path) -> Vec<String> {
        let mut args = self.args.clone();
        if let Some(flag) = self.wait_flag() {
            if !args.iter().any(|a| a == flag || a == "-w") {
                args.push(flag.to_string());
            }
        }
        if self.is_vscode_family() || self.stem() == "zed" {
            args.push(workspace.to_string_lossy().to_string());
        }
        args.push(script.to_string_lossy().to_string());
        args
    }
}

/// Pick the editor to use.
///
/// Order: explicit choice, configured editor, `$VISUAL`, `$EDITOR`, then the
/// first known IDE found on PATH.
pub fn resolve_editor<F, P>(
    explicit: Option<&str>,
    configured: Option<&str>,
    env_var: F,
    on_path: P,
) -> Option<Editor>
where
    F: Fn(&str) -> Option<String>,
    P: Fn(&str) -> bool,
{
    let chosen = explicit
        .map(str::to_string)
        .or_else(|| configured.map(str::to_string))
        .or_else(|| env_var("VISUAL"))
        .or_else(|| env_var("EDITOR"))
        .filter(|s| !s.trim().is_empty());

    if let Some(command) = chosen {
        return Editor::parse(&command);
    }

    KNOWN_EDITORS
        .iter()
        .find(|name| on_path(**name))
        .and_then(|name| Editor::parse(name))
}

pub fn detect_editor(explicit: Option<&str>, configured: Option<&str>) -> Result<Editor> {
    resolve_editor(
        explicit,
        configured,
        |key| std::env::var(key).ok(),
        ProcessExecutor::check_command_exists,
    )
    .ok_or_else(|| {
        GhostEnvError::Editor(format!(
            "No editor found. Pass one with --ide <EDITOR>, set session.editor, $VISUAL or $EDITOR, or install one of: {}",
            KNOWN_EDITORS.join(", ")
        ))
    })
}

pub fn installed_editors() -> Vec<&'static str> {
    KNOWN_EDITORS
        .iter()
        .copied()
        .filter(|name| ProcessExecutor::check_command_exists(name))
        .collect()
}

fn vscode_settings(python: &Path) -> String {
    let settings = serde_json::json!({
        "python.defaultInterpreterPath": python.to_string_lossy(),
        "python.terminal.activateEnvironment": true,
    });
    serde_json::to_string_pretty(&settings).unwrap_or_default()
}

/// Open the sample script in `editor` and wait for it to close.
pub async fn launch_editor(
    editor: &Editor,
    executor: &VenvExecutor,
    workspace: &Path,
    script: &Path,
) -> Result<i32> {
    if editor.is_vscode_family() {
        let settings: PathBuf = workspace.join(".vscode").join("settings.json");
        write_file(&settings, &vscode_settings(&executor.layout().python())).await?;
    }

    println!(
        "{} Opening {} in {}",
        "→".blue().bold(),
        script.display().to_string().yellow(),
        editor.program.cyan()
    );
    println!("  Close the editor to finish the session");

    let mut command = executor.command(&editor.program);
    command.args(editor.open_args(workspace, script));

    ProcessExecutor::run_attached(command, &editor.program)
        .await
        .map_err(|e| GhostEnvError::Editor(format!("{}: {}", editor.program, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn editor_path_with_spaces_is_kept_whole() {
        let dir = tempfile::tempdir().unwrap();
        let program = dir.path().join("My Editor").join("bin");
        std::fs::create_dir_all(&program).unwrap();
        let program = program.join("edit");
        std::fs::write(&program, "").unwrap();
        let command = program.to_string_lossy().to_string();

        let editor = Editor::parse(&format!("  {}  ", command)).unwrap();
        assert_eq!(editor.program, command);
        assert!(editor.args.is_empty());

        let editor = Editor::parse("code --new-window").unwrap();
        assert_eq!(editor.program, "code");
        assert_eq!(editor.args, vec!["--new-window".to_string()]);
    }

    #[test]
    fn explicit_choice_wins() {
        let editor = resolve_editor(
            Some("nvim"),
            Some("code"),
            env_of(&[("EDITOR", "nano")]),
            |_| true,
        )
        .unwrap();
        assert_eq!(editor.program, "nvim");
    }

    #[test]
    fn visual_before_editor() {
        let editor = resolve_editor(
            None,
            None,
            env_of(&[("VISUAL", "subl -n"), ("EDITOR", "vi")]),
            |_| false,
        )
        .unwrap();
        assert_eq!(editor.program, "subl");
        assert_eq!(editor.args, vec!["-n"]);
    }

    #[test]
    fn falls_back_to_known_editor_on_path() {
        let editor = resolve_editor(None, None, env_of(&[]), |name| name == "zed").unwrap();
        assert_eq!(editor.program, "zed");

        assert!(resolve_editor(None, None, env_of(&[("EDITOR", "  ")]), |_| false).is_none());
    }

    #[test]
    fn vscode_waits_and_opens_workspace() {
        let editor = Editor::parse("code").unwrap();
        let args = editor.open_args(Path::new("/tmp/ghostenv_a"), Path::new("/tmp/ghostenv_a/ghost_test.py"));
        assert_eq!(
            args,
            vec!["--wait", "/tmp/ghostenv_a", "/tmp/ghostenv_a/ghost_test.py"]
        );
    }

    #[test]
    fn existing_wait_flag_is_not_duplicated() {
        let editor = Editor::parse("subl -w").unwrap();
        let args = editor.open_args(Path::new("/w"), Path::new("/w/s.py"));
        assert_eq!(args, vec!["-w", "/w/s.py"]);
    }

    #[test]
    fn terminal_editors_only_get_the_script() {
        let editor = Editor::parse("/usr/bin/vim").unwrap();
        assert!(!editor.is_vscode_family());
        let args = editor.open_args(Path::new("/w"), Path::new("/w/s.py"));
        assert_eq!(args, vec!["/w/s.py"]);
    }

    #[test]
    fn settings_point_at_interpreter() {
        let json = vscode_settings(Path::new("/tmp/g/venv/bin/python"));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            value["python.defaultInterpreterPath"],
            "/tmp/g/venv/bin/python"
        );
    }
}
