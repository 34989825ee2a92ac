use crate::config::{GlobalConfigManager, InstallerKind, VenvBackend};
use crate::core::error::Result;
use crate::core::{expand_home, ProcessExecutor};
use crate::ide::installed_editors;
use crate::python::GhostEnv;
use colored::Colorize;
use std::path::PathBuf;

pub async fn execute() -> Result<()> {
    println!("{}", "Running environment checks...".bold());
    println!();

    let mut all_ok = true;

    // Config
    print!("Checking config... ");
    let global_mgr = GlobalConfigManager::new()?;
    let config = match global_mgr.load().await {
        Ok(config) => {
            if global_mgr.exists() {
                println!("{} ({})", "✓".green(), global_mgr.config_path().display());
            } else {
                println!("{}", "○ Using defaults".yellow());
            }
            config
        }
        Err(e) => {
            println!("{} {}", "✗".red(), e);
            println!("  Falling back to defaults for the remaining checks");
            all_ok = false;
            Default::default()
        }
    };

    // Interpreter
    let interpreter = config.python.interpreter.as_str();
    print!("Checking {}... ", interpreter);
    if ProcessExecutor::check_command_exists(interpreter) {
        match ProcessExecutor::execute_with_output(interpreter, &["--version"]).await {
            Ok(v) => println!("{} ({})", "✓".green(), v.trim().yellow()),
            Err(_) => println!("{}", "✓".green()),
        }
    } else {
        println!("{}", "✗ Not found".red());
        println!("  Install Python 3 or set python.interpreter in the config");
        all_ok = false;
    }

    // Backend
    let backend = config.python.backend;
    print!("Checking backend {}... ", backend.as_str());
    let backend_ok = match backend {
        VenvBackend::Venv => {
            ProcessExecutor::execute_with_output(interpreter, &["-c", "import venv, ensurepip"])
                .await
                .is_ok()
        }
        VenvBackend::Virtualenv => {
            ProcessExecutor::execute_with_output(interpreter, &["-m", "virtualenv", "--version"])
                .await
                .is_ok()
        }
        VenvBackend::Uv => ProcessExecutor::check_command_exists("uv"),
    };
    if backend_ok {
        println!("{}", "✓".green());
    } else {
        println!("{}", "✗ Unavailable".red());
        match backend {
            VenvBackend::Venv => println!("  Install the venv/ensurepip module (e.g. python3-venv)"),
            VenvBackend::Virtualenv => println!("  Install virtualenv: pip install virtualenv"),
            VenvBackend::Uv => println!("  Install from: https://github.com/astral-sh/uv"),
        }
        all_ok = false;
    }

    // uv
    print!("Checking uv... ");
    if ProcessExecutor::check_command_exists("uv") {
        match ProcessExecutor::execute_with_output("uv", &["--version"]).await {
            Ok(v) => println!("{} ({})", "✓".green(), v.trim().yellow()),
            Err(_) => println!("{}", "✓".green()),
        }
    } else if config.install.installer == InstallerKind::Uv {
        println!("{}", "✗ Not found (install.installer = \"uv\")".red());
        println!("  Install from: https://github.com/astral-sh/uv");
        all_ok = false;
    } else {
        println!("{}", "○ Not installed (optional)".yellow());
    }

    // Temp directory
    print!("Checking temp directory... ");
    let base_dir = config
        .session
        .temp_dir
        .as_deref()
        .map(|dir| PathBuf::from(expand_home(dir)));
    match GhostEnv::create(base_dir.as_deref()).and_then(|ghost| {
        let root = ghost.root().to_path_buf();
        ghost.teardown(false).map(|_| root)
    }) {
        Ok(root) => println!(
            "{} ({})",
            "✓ Writable".green(),
            root.parent()
                .map(|p| p.display().to_string())
                .unwrap_or_default()
        ),
        Err(e) => {
            println!("{} {}", "✗".red(), e);
            all_ok = false;
        }
    }

    // Editors
    print!("Checking editors... ");
    let configured = config
        .session
        .editor
        .clone()
        .or_else(|| std::env::var("VISUAL").ok())
        .or_else(|| std::env::var("EDITOR").ok())
        .filter(|e| !e.trim().is_empty());
    let found = installed_editors();
    match (&configured, found.is_empty()) {
        (None, true) => println!("{}", "○ None detected (--ide needs one)".yellow()),
        _ => {
            println!("{}", "✓".green());
            if let Some(editor) = &configured {
                println!("  Preferred: {}", editor.cyan());
            }
            if !found.is_empty() {
                println!("  On PATH: {}", found.join(", ").cyan());
            }
        }
    }

    println!();
    if all_ok {
        println!("{}", "All checks passed!".green().bold());
    } else {
        println!(
            "{}",
            "Some checks failed. Please fix the issues above."
                .yellow()
                .bold()
        );
    }

    Ok(())
}
