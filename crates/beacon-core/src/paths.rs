use crate::{Error, Result};
use std::path::PathBuf;

pub const CONFIG_DIR_ENV: &str = "FIGMA_BEACON_HOME";
const APP_DIR: &str = "figma-beacon";

/// Resolve the config directory path based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. FIGMA_BEACON_HOME environment variable (with tilde expansion)
/// 3. System config directory
/// 4. ~/.config/figma-beacon (fallback for systems without a standard config directory)
pub fn resolve_config_dir(explicit_path: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(path));
    }

    if let Ok(env_path) = std::env::var(CONFIG_DIR_ENV)
        && !env_path.is_empty()
    {
        return Ok(expand_tilde(&env_path));
    }

    if let Some(config_dir) = dirs::config_dir() {
        return Ok(config_dir.join(APP_DIR));
    }

    if let Some(home) = std::env::var_os("HOME") {
        return Ok(PathBuf::from(home).join(".config").join(APP_DIR));
    }

    Err(Error::NoConfigDir)
}

/// Expand tilde (~) in paths to the user's home directory
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_path_wins() {
        let dir = resolve_config_dir(Some("/tmp/beacon-explicit")).unwrap();
        assert_eq!(dir, PathBuf::from("/tmp/beacon-explicit"));
    }

    #[test]
    fn test_expand_tilde_keeps_plain_paths() {
        assert_eq!(expand_tilde("/etc/beacon"), PathBuf::from("/etc/beacon"));
        assert_eq!(expand_tilde("relative"), PathBuf::from("relative"));
    }
}
