use anyhow::{Context, Result};
use ccrun_core::{SettingsLayer, config::LOCAL_CONFIG_FILE};
use std::{env, path::Path};
use tracing::info;

pub fn init_command(cwd: Option<&Path>, force: bool) -> Result<()> {
    let project_root = match cwd {
        Some(cwd) => cwd.to_path_buf(),
        None => env::current_dir().context("Failed to get current directory")?,
    };
    let project_root = project_root
        .canonicalize()
        .context("Failed to canonicalize project root")?;

    let config_path = project_root.join(LOCAL_CONFIG_FILE);
    if config_path.exists() && !force {
        println!("❌ Config already exists at: {}", config_path.display());
        println!("   Use --force to overwrite");
        return Ok(());
    }

    info!("Writing {}", config_path.display());
    SettingsLayer::template()
        .save_to_file(&config_path)
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

    println!("✅ Created config: {}", config_path.display());
    println!("\n📌 Settings apply to every source file below this directory.");
    println!("   Remove a key to fall back to the global settings.");
    Ok(())
}
