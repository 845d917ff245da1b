use std::env;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories_next::ProjectDirs;

pub const ENV_CONFIG_DIR: &str = "VITRINE_CONFIG_DIR";

const QUALIFIER: &str = "dev";
const ORGANISATION: &str = "vitrine";
const APPLICATION: &str = "vitrine";

/// Resolved per-user locations for the config file and persisted state.
#[derive(Debug, Clone)]
pub struct AppPaths {
    config_dir: PathBuf,
}

impl AppPaths {
    pub fn discover() -> Result<Self> {
        let project_dirs = ProjectDirs::from(QUALIFIER, ORGANISATION, APPLICATION)
            .ok_or_else(|| anyhow!("failed to determine user directories"))?;
        let config_dir = resolve_dir(ENV_CONFIG_DIR, project_dirs.config_dir())
            .context("failed to resolve vitrine config directory")?;
        Ok(Self { config_dir })
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// The site configuration file (window, dots, rotation, relay).
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("vitrine.toml")
    }

    /// The persisted theme choice.
    pub fn theme_state_file(&self) -> PathBuf {
        self.config_dir.join("theme.toml")
    }
}

/// An environment override wins over the platform default.
fn resolve_dir(env_var: &str, default: &Path) -> Result<PathBuf> {
    match env::var_os(env_var) {
        Some(value) if !value.is_empty() => Ok(PathBuf::from(value)),
        _ => Ok(default.to_path_buf()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_override_wins() {
        let dir = tempfile::tempdir().unwrap();
        env::set_var(ENV_CONFIG_DIR, dir.path());
        let paths = AppPaths::discover().unwrap();
        assert_eq!(paths.config_dir(), dir.path());
        assert_eq!(paths.config_file(), dir.path().join("vitrine.toml"));
        assert_eq!(paths.theme_state_file(), dir.path().join("theme.toml"));
        env::remove_var(ENV_CONFIG_DIR);
    }
}
