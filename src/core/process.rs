use crate::core::error::{GhostEnvError, Result};
use std::ffi::OsStr;
use std::future::Future;
use std::process::{Output, Stdio};
use tokio::process::Command;
use tracing::debug;

pub struct ProcessExecutor;

impl ProcessExecutor {
    pub async fn execute<S: AsRef<OsStr>>(
        cmd: &str,
        args: &[S],
        env: Option<&[(&str, &str)]>,
    ) -> Result<Output> {
        let mut command = Command::new(cmd);
        command.args(args).kill_on_drop(true);

        if let Some(env_vars) = env {
            for (key, value) in env_vars {
                command.env(key, value);
            }
        }

        debug!(
            "exec: {} {}",
            cmd,
            args.iter()
                .map(|a| a.as_ref().to_string_lossy())
                .collect::<Vec<_>>()
                .join(" ")
        );

        let output = command
            .output()
            .await
            .map_err(|e| GhostEnvError::CommandFailed(format!("{}: {}", cmd, e)))?;

        Ok(output)
    }

    pub async fn execute_with_output<S: AsRef<OsStr>>(cmd: &str, args: &[S]) -> Result<String> {
        let output = Self::execute(cmd, args, None).await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GhostEnvError::CommandFailed(format!(
                "{} failed: {}",
                cmd, stderr
            )));
        }

        // Older interpreters print `--version` to stderr.
        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if stdout.is_empty() {
            return Ok(String::from_utf8_lossy(&output.stderr).trim().to_string());
        }
        Ok(stdout)
    }

    /// Run a command attached to the terminal and wait for it to exit.
    ///
    /// Ctrl-C belongs to the child while it runs: the interrupt is delivered
    /// to the whole foreground process group, so ghostenv swallows its copy
    /// and keeps waiting.
    pub async fn run_attached(mut command: Command, label: &str) -> Result<i32> {
        debug!("attach: {:?}", command.as_std());

        let mut child = command
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| {
                GhostEnvError::CommandFailed(format!("Failed to execute {}: {}", label, e))
            })?;

        let status = loop {
            tokio::select! {
                status = child.wait() => break status?,
                _ = tokio::signal::ctrl_c() => {
                    debug!("interrupt left to {}", label);
                }
            }
        };

        Ok(status.code().unwrap_or(1))
    }

    pub fn check_command_exists(cmd: &str) -> bool {
        let locator = if cfg!(windows) { "where" } else { "which" };
        std::process::Command::new(locator)
            .arg(cmd)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }
}

/// Await `fut`, turning a Ctrl-C into [`GhostEnvError::Interrupted`].
///
/// Dropping the future kills any child spawned through [`ProcessExecutor`].
pub async fn interruptible<T, F>(fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    tokio::select! {
        result = fut => result,
        _ = tokio::signal::ctrl_c() => Err(GhostEnvError::Interrupted),
    }
}
