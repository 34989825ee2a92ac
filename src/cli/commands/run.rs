use crate::cli::output::print_panel;
use crate::cli::RunArgs;
use crate::config::{
    validate_packages, GlobalConfig, GlobalConfigManager, InstallerKind, VenvBackend,
};
use crate::core::error::{GhostEnvError, Result};
use crate::core::{expand_home, interruptible, require_file, resolve_path};
use crate::ide::{detect_editor, launch_editor};
use crate::python::{resolve_requested, GhostEnv, Installer, Teardown, VenvExecutor};
use crate::template::write_sample_script;
use colored::Colorize;
use std::env;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Everything a run needs, resolved from CLI flags and configuration.
#[derive(Debug)]
struct RunPlan {
    packages: Vec<String>,
    requirements: Option<PathBuf>,
    script: Option<PathBuf>,
    ide: Option<String>,
    keep: bool,
    interpreter: String,
    backend: VenvBackend,
    installer: InstallerKind,
    base_dir: Option<PathBuf>,
    script_name: String,
    working_dir: PathBuf,
}

fn plan(args: RunArgs, config: &GlobalConfig, working_dir: PathBuf) -> Result<RunPlan> {
    if args.packages.is_empty() && args.requirements.is_none() {
        return Err(GhostEnvError::NothingToInstall);
    }
    validate_packages(&args.packages)?;

    let requirements = args
        .requirements
        .as_deref()
        .map(|p| require_file(&working_dir.join(p), "Requirements file"))
        .transpose()?;
    let script = args
        .script
        .as_deref()
        .map(|p| require_file(&working_dir.join(p), "Script"))
        .transpose()?;

    let base_dir = config
        .session
        .temp_dir
        .as_deref()
        .map(|dir| resolve_path(&working_dir, &expand_home(dir)));

    Ok(RunPlan {
        packages: args.packages,
        requirements,
        script,
        ide: args.ide,
        keep: args.keep || config.session.keep,
        interpreter: args
            .python
            .unwrap_or_else(|| config.python.interpreter.clone()),
        backend: args
            .backend
            .map(Into::into)
            .unwrap_or(config.python.backend),
        installer: args
            .installer
            .map(Into::into)
            .unwrap_or(config.install.installer),
        base_dir,
        script_name: config.session.script_name.clone(),
        working_dir,
    })
}

pub async fn execute(args: RunArgs) -> Result<()> {
    let config = GlobalConfigManager::new()?.load().await?;
    let working_dir = env::current_dir()?;

    let plan = match plan(args, &config, working_dir) {
        Ok(plan) => plan,
        Err(e @ GhostEnvError::NothingToInstall) => {
            for line in nothing_to_install_report(&e) {
                eprintln!("{}", line);
            }
            std::process::exit(e.exit_code());
        }
        Err(e) => return Err(e),
    };

    let ghost = GhostEnv::create(plan.base_dir.as_deref())?;
    print_panel(
        "ghostenv",
        &format!(
            "👻 Created temporary environment in {}",
            ghost.root().display()
        ),
    );

    let exit_code = run_in(ghost, &plan, &config).await;
    std::process::exit(exit_code);
}

/// The error followed by usage examples.
fn nothing_to_install_report(err: &GhostEnvError) -> Vec<String> {
    vec![
        format!("{} {}", "Error:".red().bold(), err),
        format!("Example: {}", "ghostenv run requests pandas".cyan()),
        format!("Example: {}", "ghostenv run -r requirements.txt".cyan()),
    ]
}

/// Run the session in `ghost`, report any failure, then tear it down.
///
/// Returns the process exit code.
async fn run_in(ghost: GhostEnv, plan: &RunPlan, config: &GlobalConfig) -> i32 {
    let exit_code = match session(&ghost, plan, config).await {
        Ok(code) => code,
        Err(GhostEnvError::Interrupted) => {
            println!("\n{} Operation cancelled by user", "🛑".red());
            GhostEnvError::Interrupted.exit_code()
        }
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            e.exit_code()
        }
    };

    let sample = ghost.root().join(&plan.script_name);
    finish(ghost, plan.keep, &sample);
    exit_code
}

/// Provision, install, then hand the terminal to the session process.
async fn session(ghost: &GhostEnv, plan: &RunPlan, config: &GlobalConfig) -> Result<i32> {
    interruptible(ghost.provision(plan.backend, &plan.interpreter)).await?;

    let installer = Installer::new(plan.installer, ghost.layout(), &config.install);
    if let Some(requirements) = &plan.requirements {
        interruptible(installer.install_requirements(requirements)).await?;
    }
    if !plan.packages.is_empty() {
        interruptible(installer.install_packages(&plan.packages)).await?;
        interruptible(report_installed(&installer, &plan.packages)).await?;
    }

    let executor = VenvExecutor::new(ghost.layout().clone(), plan.working_dir.clone());

    if let Some(script) = &plan.script {
        return executor.run_script(script, &[]).await;
    }

    let sample = write_sample_script(ghost.root(), &plan.script_name, &plan.packages).await?;

    match plan.ide.as_deref() {
        Some(choice) => {
            let explicit = Some(choice).filter(|c| !c.trim().is_empty());
            let editor = detect_editor(explicit, config.session.editor.as_deref())?;
            launch_editor(&editor, &executor, ghost.root(), &sample).await
        }
        None => {
            print_panel(
                "Interactive Session",
                &format!(
                    "🐍 Starting Python REPL. Type `exit()` or `Ctrl+D` to quit.\nUsing python from: {}\nTest script: {}",
                    ghost.python().display(),
                    sample.display()
                ),
            );
            executor.start_repl().await
        }
    }
}

async fn report_installed(installer: &Installer, requested: &[String]) -> Result<()> {
    let installed = installer.installed_packages().await?;
    let resolved = resolve_requested(requested, &installed);

    let mut missing = Vec::new();
    for (name, found) in &resolved {
        match found {
            Some(pkg) => println!("  {} {}", pkg.name.cyan(), pkg.version.yellow()),
            None => missing.push(name.as_str()),
        }
    }

    if !missing.is_empty() {
        return Err(GhostEnvError::Install(format!(
            "{} reported success but these packages are not installed: {}",
            installer.kind().as_str(),
            missing.join(", ")
        )));
    }
    Ok(())
}

fn finish(ghost: GhostEnv, keep: bool, sample: &Path) {
    if !keep {
        println!("\n{} Cleaning up temporary environment...", "⚙".blue().bold());
    }
    let activate = ghost.layout().activate_command();

    match ghost.teardown(keep) {
        Ok(Teardown::Kept(root)) => {
            let mut text = format!(
                "✅ Environment saved at: {}\nTo activate it later, run:\n{}",
                root.display(),
                activate
            );
            if sample.exists() {
                text.push_str(&format!(
                    "\n\n📝 Your test script is saved at:\n{}",
                    sample.display()
                ));
            }
            print_panel("Environment Kept", &text);
        }
        Ok(Teardown::Removed) => println!("{} Cleanup complete", "✓".green().bold()),
        Err(e) => warn!("cleanup failed: {}", e),
    }
}
