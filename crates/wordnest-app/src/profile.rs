use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use wordnest_config::Config;

/// Load the default config shipped next to the binary, if any
fn load_repo_default_config() -> anyhow::Result<Config> {
    let path = Path::new("config.json");
    if !path.exists() {
        return Ok(Config::default());
    }

    tracing::info!("Loading repo default config...");
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let config = serde_json::from_reader(reader)?;
    Ok(config)
}

/// Per-user settings root
pub fn config_root() -> anyhow::Result<PathBuf> {
    let dir = dirs::config_dir().context("no user config directory on this platform")?;
    Ok(dir.join("wordnest"))
}

/// Per-user data root; wordbooks live below it
pub fn data_root() -> anyhow::Result<PathBuf> {
    let dir = dirs::data_dir().context("no user data directory on this platform")?;
    Ok(dir.join("wordnest"))
}

fn profiles_dir(root: &Path) -> PathBuf {
    root.join("profiles")
}

/// Represents a user profile
#[derive(Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub value: Config,
}

/// Initialize user config folders and main profile if missing
pub fn init_user_config(root: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(profiles_dir(root))?;

    let main_profile = profiles_dir(root).join("main.json");

    if !main_profile.exists() {
        let profile = Profile {
            name: "main".into(),
            value: load_repo_default_config()?,
        };
        fs::write(&main_profile, serde_json::to_string_pretty(&profile)?)?;
        tracing::info!("Created main profile at {}", main_profile.display());
    }

    Ok(())
}

fn read_profile(path: &Path) -> anyhow::Result<Config> {
    let data = fs::read_to_string(path)?;
    let profile: Profile = serde_json::from_str(&data)
        .with_context(|| format!("invalid profile {}", path.display()))?;
    Ok(profile.value)
}

/// Load a user profile by name, defaulting to main if name not found
pub fn load_user_profile(root: &Path, name: &str) -> anyhow::Result<Config> {
    let profile_file = profiles_dir(root).join(format!("{name}.json"));

    if profile_file.exists() {
        read_profile(&profile_file)
    } else {
        tracing::warn!("Profile {name} not found, falling back to main profile or repo default");
        let main_file = profiles_dir(root).join("main.json");
        if main_file.exists() {
            read_profile(&main_file)
        } else {
            load_repo_default_config()
        }
    }
}

/// Load a config file given explicitly on the command line
pub fn load_config_file(path: &Path) -> anyhow::Result<Config> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("cannot read config {}", path.display()))?;
    let config = serde_json::from_str(&data)
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(config)
}

/// Where the wordbook of `profile` is stored
pub fn wordbook_dir(config: &Config, data_root: &Path, profile: &str) -> PathBuf {
    match &config.wordbook.storage_dir {
        Some(dir) => PathBuf::from(dir),
        None => profiles_dir(data_root).join(profile),
    }
}
