use crate::config::GlobalConfigManager;
use crate::core::error::Result;
use colored::Colorize;

pub async fn execute(init: bool) -> Result<()> {
    let global_mgr = GlobalConfigManager::new()?;

    if init {
        if global_mgr.ensure_initialized().await? {
            println!(
                "{} Wrote default configuration to {}",
                "✓".green().bold(),
                global_mgr.config_path().display().to_string().yellow()
            );
        } else {
            println!(
                "{} Configuration already exists at {}",
                "ℹ".blue().bold(),
                global_mgr.config_path().display().to_string().yellow()
            );
        }
    }

    let config = global_mgr.load().await?;
    let source = if global_mgr.exists() {
        "file"
    } else {
        "defaults, no file yet"
    };

    println!(
        "{} {} ({})",
        "Config:".bold(),
        global_mgr.config_path().display().to_string().yellow(),
        source
    );
    println!();
    print!("{}", toml::to_string_pretty(&config)?);

    Ok(())
}
