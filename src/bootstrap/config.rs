//! # Configuration Loader / 配置加载器
//!
//! Reads the TOML file and maps it onto [`AppConfig`]. No validation: every
//! key is optional and whatever the file says is taken as-is.
//! 仅做纯数据加载，不做校验。

use std::path::Path;

use anyhow::Context;
use sp_core::config::AppConfig;
use tracing::{info, warn};

/// Load configuration from a TOML file
/// 从 TOML 文件加载配置
///
/// # Errors / 错误
///
/// - File cannot be read (I/O error)
/// - Content is not valid TOML or does not map onto [`AppConfig`]
pub fn load_config(config_path: &Path) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    AppConfig::from_toml_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", config_path.display()))
}

/// Like [`load_config`], but a missing file means defaults.
///
/// A file that exists and does not parse is still an error.
pub fn load_config_or_default(config_path: &Path) -> anyhow::Result<AppConfig> {
    if !config_path.exists() {
        warn!(path = %config_path.display(), "Config file not found, using defaults");
        return Ok(AppConfig::default());
    }
    let config = load_config(config_path)?;
    info!(path = %config_path.display(), "Loaded config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sp_core::config::StorageBackend;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config_reads_valid_toml() {
        let toml_content = r#"
            [media_cache]
            max_cache_bytes = 1048576
            base_url = "https://spardha.example"

            [performance]
            max_particles_per_section = 250
            media_preload_list = ["/img/hero.webp"]

            [storage]
            backend = "memory"
        "#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = load_config(temp_file.path()).unwrap();

        assert_eq!(config.media_cache.max_cache_bytes, 1_048_576);
        assert_eq!(config.media_cache.base_url, "https://spardha.example");
        assert_eq!(config.media_cache.key_prefix, "spardha_media_");
        assert_eq!(config.performance.max_particles_per_section, 250);
        assert_eq!(config.performance.media_preload_list, vec!["/img/hero.webp"]);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.particle_pool.max_pool_size, 1000);
    }

    #[test]
    fn test_load_config_rejects_invalid_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[performance\nmax = ").unwrap();

        let err = load_config(temp_file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config file"));
    }

    #[test]
    fn test_load_config_reports_missing_file() {
        let err = load_config(Path::new("/nonexistent/spardha/config.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = load_config_or_default(Path::new("/nonexistent/spardha/config.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }
}
