//! Config command implementations

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cadence_core::config::{default_config_path, DEFAULT_CONFIG};

use super::load_config;

/// Explicit path if given, otherwise the per-user override location
fn target_path(config_path: Option<&Path>) -> Result<PathBuf> {
    match config_path {
        Some(path) => Ok(path.to_path_buf()),
        None => default_config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine the user config directory")),
    }
}

pub fn cmd_config_path(config_path: Option<&Path>) -> Result<()> {
    let path = target_path(config_path)?;
    let state = if path.exists() { "exists" } else { "not created" };
    println!("{} ({})", path.display(), state);
    Ok(())
}

pub fn cmd_config_show(config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    print!("{}", config.to_toml()?);
    Ok(())
}

pub fn cmd_config_init(config_path: Option<&Path>, force: bool) -> Result<()> {
    let path = target_path(config_path)?;

    if path.exists() && !force {
        anyhow::bail!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write config: {}", path.display()))?;

    println!("✅ Wrote default config to: {}", path.display());
    Ok(())
}
