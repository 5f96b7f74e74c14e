use anyhow::{Context, Result};
use directories_next::BaseDirs;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use crate::game::quiz::settings::Settings;

fn get_settings_path() -> Result<PathBuf> {
    let mut path = BaseDirs::new()
        .context("could not locate system directories")?
        .config_dir()
        .to_path_buf();
    path.push("quiz-session");
    path.push("settings.toml");
    Ok(path)
}

pub fn parse(content: &str) -> Result<Settings> {
    toml::from_str(content).context("Invalid settings")
}

fn read(path: &Path) -> Result<Settings> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Could not read settings file {:?}", path))?;
    let settings = parse(&content).with_context(|| format!("In settings file {:?}", path))?;
    info!("Loaded settings from {:?}", path);
    Ok(settings)
}

/// Reads the given settings file, or the per-user one if it exists, or falls back to defaults.
pub fn load(path: Option<&Path>) -> Result<Settings> {
    if let Some(path) = path {
        return read(path);
    }
    match get_settings_path() {
        Ok(path) if path.exists() => read(&path),
        _ => Ok(Settings::default()),
    }
}
