use anyhow::{Context, Result};
use ccrun_core::{HostEnv, interfaces::ConfigStore};
use std::path::Path;

use super::config_store;

pub fn config_command(file: &Path, global_config: Option<&Path>) -> Result<()> {
    let file = std::path::absolute(file)
        .with_context(|| format!("Failed to resolve {}", file.display()))?;
    let start_dir = file.parent().unwrap_or(Path::new("/"));
    let store = config_store(global_config);

    println!("📁 Config sources:");
    let sources = store.sources(start_dir);
    if sources.is_empty() {
        println!("   (built-in defaults)");
    }
    for source in &sources {
        println!("   {}", source.display());
    }

    let settings = store.load(start_dir)?;
    let env = HostEnv::detect(settings.shell.as_deref());
    print!("🖥️  Platform: {:?}", env.platform);
    if env.is_wsl {
        print!(" (WSL)");
    }
    println!();
    println!("🐚 Shell: {}", env.shell);
    println!("📂 Run directory: {}", settings.run_directory(start_dir).display());

    println!(
        "\n{}",
        serde_json::to_string_pretty(&settings).context("Failed to serialize settings")?
    );
    Ok(())
}
