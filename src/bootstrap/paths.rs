use std::path::PathBuf;

use anyhow::Context;
use sp_core::config::StorageConfig;

const APP_DIR_NAME: &str = "spardha";

/// Concrete on-disk locations derived from one data root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub data_root: PathBuf,
    pub config_path: PathBuf,
    pub store_path: PathBuf,
    pub logs_dir: PathBuf,
}

impl AppPaths {
    pub fn from_data_root(data_root: PathBuf) -> Self {
        Self {
            config_path: data_root.join("config.toml"),
            store_path: data_root.join("media_cache.json"),
            logs_dir: data_root.join("logs"),
            data_root,
        }
    }

    /// `<data_local_dir>/spardha` for the current user.
    pub fn discover() -> anyhow::Result<Self> {
        let base = dirs::data_local_dir().context("Failed to resolve local data directory")?;
        Ok(Self::from_data_root(base.join(APP_DIR_NAME)))
    }

    /// Store file to open: the configured path, or the default one when empty.
    pub fn resolve_store_path(&self, storage: &StorageConfig) -> PathBuf {
        if storage.path.as_os_str().is_empty() {
            self.store_path.clone()
        } else {
            storage.path.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_paths_derive_from_data_root() {
        let paths = AppPaths::from_data_root(PathBuf::from("/tmp/spardha"));

        assert_eq!(paths.config_path, PathBuf::from("/tmp/spardha/config.toml"));
        assert_eq!(paths.store_path, PathBuf::from("/tmp/spardha/media_cache.json"));
        assert_eq!(paths.logs_dir, PathBuf::from("/tmp/spardha/logs"));
    }

    #[test]
    fn configured_store_path_wins_over_default() {
        let paths = AppPaths::from_data_root(PathBuf::from("/tmp/spardha"));

        let default = StorageConfig::default();
        assert_eq!(paths.resolve_store_path(&default), paths.store_path);

        let custom = StorageConfig {
            path: PathBuf::from("/srv/cache.json"),
            ..StorageConfig::default()
        };
        assert_eq!(paths.resolve_store_path(&custom), PathBuf::from("/srv/cache.json"));
    }
}
