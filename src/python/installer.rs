use crate::config::{InstallConfig, InstallerKind};
use crate::core::error::{GhostEnvError, Result};
use crate::core::{spinner, ProcessExecutor};
use crate::python::env::VenvLayout;
use crate::python::requirement::{normalize_name, requirement_name};
use anyhow::Context;
use colored::Colorize;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct InstalledPackage {
    pub name: String,
    pub version: String,
}

/// What to hand to the installer.
#[derive(Debug, Clone)]
pub enum InstallTarget<'a> {
    Packages(&'a [String]),
    Requirements(&'a Path),
}

/// Installs packages into one virtual environment with pip or uv.
pub struct Installer {
    kind: InstallerKind,
    python: PathBuf,
    quiet: bool,
    index_url: Option<String>,
    extra_index_urls: Vec<String>,
}

impl Installer {
    pub fn new(kind: InstallerKind, layout: &VenvLayout, config: &InstallConfig) -> Self {
        Self {
            kind,
            python: layout.python(),
            quiet: config.quiet,
            index_url: config.index_url.clone(),
            extra_index_urls: config.extra_index_urls.clone(),
        }
    }

    pub fn kind(&self) -> InstallerKind {
        self.kind
    }

    fn base_command(&self, subcommand: &str) -> (String, Vec<String>) {
        let python = self.python.to_string_lossy().to_string();
        match self.kind {
            InstallerKind::Pip => (
                python,
                vec![
                    "-m".to_string(),
                    "pip".to_string(),
                    subcommand.to_string(),
                    "--disable-pip-version-check".to_string(),
                ],
            ),
            InstallerKind::Uv => (
                "uv".to_string(),
                vec![
                    "pip".to_string(),
                    subcommand.to_string(),
                    "--python".to_string(),
                    python,
                ],
            ),
        }
    }

    pub fn install_command(&self, target: &InstallTarget<'_>) -> (String, Vec<String>) {
        let (program, mut args) = self.base_command("install");

        if self.quiet {
            args.push("--quiet".to_string());
        }
        if let Some(url) = &self.index_url {
            args.push("--index-url".to_string());
            args.push(url.clone());
        }
        for url in &self.extra_index_urls {
            args.push("--extra-index-url".to_string());
            args.push(url.clone());
        }

        match target {
            InstallTarget::Packages(packages) => args.extend(packages.iter().cloned()),
            InstallTarget::Requirements(file) => {
                args.push("-r".to_string());
                args.push(file.to_string_lossy().to_string());
            }
        }

        (program, args)
    }

    pub fn list_command(&self) -> (String, Vec<String>) {
        let (program, mut args) = self.base_command("list");
        args.push("--format".to_string());
        args.push("json".to_string());
        (program, args)
    }

    pub async fn install_packages(&self, packages: &[String]) -> Result<()> {
        if packages.is_empty() {
            return Ok(());
        }

        println!(
            "{} Installing packages ({}): {}",
            "⚙".blue().bold(),
            packages.len().to_string().cyan(),
            packages.join(", ").yellow()
        );

        self.run_install(&InstallTarget::Packages(packages)).await?;

        println!("{} Packages installed successfully", "✓".green().bold());
        Ok(())
    }

    pub async fn install_requirements(&self, requirements: &Path) -> Result<()> {
        println!(
            "{} Installing from requirements file: {}",
            "⚙".blue().bold(),
            requirements.display().to_string().yellow()
        );

        self.run_install(&InstallTarget::Requirements(requirements))
            .await?;

        println!("{} Requirements installed successfully", "✓".green().bold());
        Ok(())
    }

    async fn run_install(&self, target: &InstallTarget<'_>) -> Result<()> {
        self.check_installed()?;

        let (program, args) = self.install_command(target);
        let pb = spinner(format!("{} install", self.kind.as_str()));
        let output = ProcessExecutor::execute(&program, &args, None).await;
        pb.finish_and_clear();
        let output = output?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);

        eprintln!("\n{}", "Installer output:".yellow().bold());
        if !stdout.trim().is_empty() {
            eprintln!("{}", stdout.trim_end());
        }
        if !stderr.trim().is_empty() {
            eprintln!("{}", stderr.trim_end());
        }

        Err(GhostEnvError::Install(format!(
            "`{} {}` exited with {}. See output above for details.",
            program,
            args.join(" "),
            output
                .status
                .code()
                .map(|c| c.to_string())
                .unwrap_or_else(|| "a signal".to_string())
        )))
    }

    pub async fn installed_packages(&self) -> Result<Vec<InstalledPackage>> {
        let (program, args) = self.list_command();
        let output = ProcessExecutor::execute_with_output(&program, &args).await?;
        parse_package_list(&output)
    }

    fn check_installed(&self) -> Result<()> {
        if self.kind == InstallerKind::Uv && !ProcessExecutor::check_command_exists("uv") {
            return Err(GhostEnvError::Install(
                "uv is not installed. Please install it first: https://github.com/astral-sh/uv"
                    .to_string(),
            ));
        }
        Ok(())
    }
}

/// Parse the JSON emitted by `pip list --format json` (uv uses the same shape).
pub fn parse_package_list(json: &str) -> Result<Vec<InstalledPackage>> {
    let packages: Vec<InstalledPackage> =
        serde_json::from_str(json).context("installer returned a malformed package list")?;
    Ok(packages)
}

/// Installed version of each named requirement, in request order.
///
/// Requirements without a distribution name (URLs, paths) are skipped.
pub fn resolve_requested<'a>(
    requested: &[String],
    installed: &'a [InstalledPackage],
) -> Vec<(String, Option<&'a InstalledPackage>)> {
    requested
        .iter()
        .filter_map(|req| requirement_name(req))
        .map(|name| {
            let wanted = normalize_name(&name);
            let found = installed
                .iter()
                .find(|pkg| normalize_name(&pkg.name) == wanted);
            (name, found)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn installer(kind: InstallerKind, config: InstallConfig) -> Installer {
        let layout = VenvLayout::new(PathBuf::from("/tmp/g/venv"));
        Installer::new(kind, &layout, &config)
    }

    #[test]
    fn pip_install_uses_venv_interpreter() {
        let inst = installer(InstallerKind::Pip, InstallConfig::default());
        let packages = vec!["requests".to_string(), "pandas>=2".to_string()];

        let (program, args) = inst.install_command(&InstallTarget::Packages(&packages));

        assert_eq!(PathBuf::from(program), VenvLayout::new(PathBuf::from("/tmp/g/venv")).python());
        assert_eq!(&args[..3], ["-m", "pip", "install"]);
        assert!(args.contains(&"--quiet".to_string()));
        assert_eq!(&args[args.len() - 2..], ["requests", "pandas>=2"]);
    }

    #[test]
    fn uv_install_selects_environment_python() {
        let config = InstallConfig {
            quiet: false,
            index_url: Some("https://mirror.example/simple".to_string()),
            extra_index_urls: vec!["https://extra.example/simple".to_string()],
            ..InstallConfig::default()
        };
        let inst = installer(InstallerKind::Uv, config);

        let (program, args) =
            inst.install_command(&InstallTarget::Requirements(Path::new("/w/requirements.txt")));

        assert_eq!(program, "uv");
        assert_eq!(&args[..3], ["pip", "install", "--python"]);
        assert!(!args.contains(&"--quiet".to_string()));

        let idx = args.iter().position(|a| a == "--index-url").unwrap();
        assert_eq!(args[idx + 1], "https://mirror.example/simple");
        let idx = args.iter().position(|a| a == "--extra-index-url").unwrap();
        assert_eq!(args[idx + 1], "https://extra.example/simple");

        assert_eq!(&args[args.len() - 2..], ["-r", "/w/requirements.txt"]);
    }

    #[test]
    fn list_command_requests_json() {
        let (_, args) = installer(InstallerKind::Pip, InstallConfig::default()).list_command();
        assert_eq!(&args[args.len() - 2..], ["--format", "json"]);

        let (program, args) = installer(InstallerKind::Uv, InstallConfig::default()).list_command();
        assert_eq!(program, "uv");
        assert_eq!(args[1], "list");
    }

    #[test]
    fn parses_pip_list_output() {
        let json = r#"[{"name": "pip", "version": "24.2"}, {"name": "requests", "version": "2.32.3"}]"#;
        let packages = parse_package_list(json).unwrap();
        assert_eq!(packages.len(), 2);
        assert_eq!(packages[1].name, "requests");
        assert_eq!(packages[1].version, "2.32.3");
    }

    #[test]
    fn malformed_list_is_an_error() {
        let err = parse_package_list("WARNING: not json").unwrap_err();
        assert!(err.to_string().contains("malformed package list"));
    }

    #[test]
    fn requested_packages_are_matched_by_normalized_name() {
        let installed = parse_package_list(
            r#"[{"name": "scikit_learn", "version": "1.5.2"},
                {"name": "PyYAML", "version": "6.0.2"},
                {"name": "requests", "version": "2.32.3"}]"#,
        )
        .unwrap();
        let requested = vec![
            "Scikit-Learn>=1.4".to_string(),
            "pyyaml".to_string(),
            "flask".to_string(),
            "git+https://github.com/psf/black".to_string(),
        ];

        let resolved = resolve_requested(&requested, &installed);

        assert_eq!(resolved.len(), 3);
        assert_eq!(resolved[0].0, "Scikit-Learn");
        assert_eq!(resolved[0].1.map(|p| p.version.as_str()), Some("1.5.2"));
        assert_eq!(resolved[1].1.map(|p| p.name.as_str()), Some("PyYAML"));
        assert_eq!(resolved[2].0, "flask");
        assert!(resolved[2].1.is_none());
    }

    #[test]
    fn local_archives_are_not_checked_by_name() {
        let installed =
            parse_package_list(r#"[{"name": "mypkg", "version": "1.0"}]"#).unwrap();
        let requested = vec![
            "dist/mypkg-1.0-py3-none-any.whl".to_string(),
            "mypkg-1.0.tar.gz".to_string(),
        ];

        assert!(resolve_requested(&requested, &installed).is_empty());
    }
}
