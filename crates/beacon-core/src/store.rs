use crate::{Error, Result};
use beacon_types::{Config, Profile};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const CONFIG_FILE: &str = "config.toml";
const PROFILES_DIR: &str = "profiles";
const PROFILE_EXT: &str = "beacon";

/// Persistence boundary for the config record and named profiles.
pub trait Store: Send + Sync {
    fn load_config(&self) -> Result<Config>;
    fn save_config(&self, config: &Config) -> Result<()>;
    fn list_profiles(&self) -> Result<Vec<Profile>>;
    fn load_profile(&self, name: &str) -> Result<Profile>;
    fn save_profile(&self, profile: &Profile) -> Result<()>;
    fn delete_profile(&self, name: &str) -> Result<()>;

    /// Clear every other default flag, then set it on `name`.
    ///
    /// A write failure part way through can leave no default, never two.
    fn set_default(&self, name: &str) -> Result<()> {
        let profiles = self.list_profiles()?;
        let Some(mut target) = profiles.iter().find(|p| p.name == name).cloned() else {
            return Err(Error::ProfileNotFound(name.to_string()));
        };

        for mut profile in profiles.into_iter().filter(|p| p.is_default && p.name != name) {
            profile.is_default = false;
            self.save_profile(&profile)?;
        }

        if !target.is_default {
            target.is_default = true;
            self.save_profile(&target)?;
        }
        Ok(())
    }
}

/// Filesystem-backed store rooted at the config directory.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    pub fn profiles_dir(&self) -> PathBuf {
        self.root.join(PROFILES_DIR)
    }

    fn profile_path(&self, name: &str) -> Result<PathBuf> {
        validate_profile_name(name)?;
        Ok(self
            .profiles_dir()
            .join(format!("{}.{}", name, PROFILE_EXT)))
    }

    fn read_profile(path: &Path) -> Result<Profile> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

impl Store for FsStore {
    fn load_config(&self) -> Result<Config> {
        let path = self.config_path();
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&path)?;
        Ok(toml::from_str(&content)?)
    }

    fn save_config(&self, config: &Config) -> Result<()> {
        std::fs::create_dir_all(&self.root)?;
        let content = toml::to_string_pretty(config)?;
        std::fs::write(self.config_path(), content)?;
        debug!(path = %self.config_path().display(), "config saved");
        Ok(())
    }

    fn list_profiles(&self) -> Result<Vec<Profile>> {
        let dir = self.profiles_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut profiles = Vec::new();
        for entry in std::fs::read_dir(&dir)? {
            let path = entry?.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(PROFILE_EXT) {
                continue;
            }

            match Self::read_profile(&path) {
                Ok(profile) => profiles.push(profile),
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "skipping unreadable profile");
                }
            }
        }

        profiles.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(profiles)
    }

    fn load_profile(&self, name: &str) -> Result<Profile> {
        let path = self.profile_path(name)?;
        if !path.exists() {
            return Err(Error::ProfileNotFound(name.to_string()));
        }
        Self::read_profile(&path)
    }

    fn save_profile(&self, profile: &Profile) -> Result<()> {
        let path = self.profile_path(&profile.name)?;
        std::fs::create_dir_all(self.profiles_dir())?;
        let content = serde_json::to_string_pretty(profile)?;
        std::fs::write(&path, content)?;
        debug!(profile = %profile.name, "profile saved");
        Ok(())
    }

    fn delete_profile(&self, name: &str) -> Result<()> {
        let path = self.profile_path(name)?;
        if !path.exists() {
            return Err(Error::ProfileNotFound(name.to_string()));
        }
        std::fs::remove_file(&path)?;
        debug!(profile = %name, "profile deleted");
        Ok(())
    }
}

/// Profile names double as file names.
pub fn validate_profile_name(name: &str) -> Result<()> {
    let invalid = name.trim().is_empty()
        || name.contains(['/', '\\'])
        || name == "."
        || name == ".."
        || name.chars().any(char::is_control);
    if invalid {
        return Err(Error::InvalidProfileName(name.to_string()));
    }
    Ok(())
}
