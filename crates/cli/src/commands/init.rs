//! `kinrelay init` — write a starter config file.

use std::path::Path;

use kinrelay_config::AppConfig;

pub fn run(force: bool) -> Result<(), Box<dyn std::error::Error>> {
    let path = AppConfig::config_path();
    if write_default(&path, force)? {
        println!("✅ Wrote {}", path.display());
        println!("   Set KINDROID_API_KEY (or api_key in the file) before sending messages.");
    } else {
        println!("  Config already exists: {} (use --force to overwrite)", path.display());
    }
    Ok(())
}

/// Returns whether the file was written.
fn write_default(path: &Path, force: bool) -> std::io::Result<bool> {
    if path.exists() && !force {
        return Ok(false);
    }
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(path, AppConfig::default_toml())?;
    Ok(true)
}
