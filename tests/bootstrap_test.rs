//! Composition-root tests: config file in, wired coordinator out.

use std::io::Write;

use anyhow::Result;
use spardha_lib::bootstrap::{build_coordinator, build_store, load_config, AppPaths};
use spardha_lib::bootstrap::run::execute;
use spardha_lib::cli::Commands;
use sp_core::config::{AppConfig, StorageBackend};
use sp_core::particle::Bounds;
use sp_core::ports::KeyValueStorePort;
use tempfile::{NamedTempFile, TempDir};

fn memory_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.storage.backend = StorageBackend::Memory;
    config
}

#[tokio::test]
async fn memory_backend_wires_a_working_coordinator() -> Result<()> {
    let dir = TempDir::new()?;
    let paths = AppPaths::from_data_root(dir.path().to_path_buf());
    let coordinator = build_coordinator(&memory_config(), &paths)?;

    let batch = coordinator.create_optimized_particles("star", 10_000, Bounds::new(800.0, 600.0));
    assert_eq!(batch.len(), 500);
    assert_eq!(coordinator.return_particles(batch), 200);

    // Nothing was fetched, so lookups fall through to the URL.
    assert_eq!(coordinator.get_optimized_media_url("/img/a.png"), "/img/a.png");
    assert!(!paths.store_path.exists());
    coordinator.cleanup();
    Ok(())
}

#[tokio::test]
async fn file_backend_creates_store_under_data_root() -> Result<()> {
    let dir = TempDir::new()?;
    let paths = AppPaths::from_data_root(dir.path().join("nested"));
    let store = build_store(&AppConfig::default(), &paths)?;

    store.set_item("spardha_media_x", "{}")?;
    assert!(paths.store_path.exists());
    Ok(())
}

#[tokio::test]
async fn config_file_limits_flow_into_services() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    file.write_all(
        br#"
            [performance]
            max_particles_per_section = 40
            enable_particle_pooling = false

            [storage]
            backend = "memory"
        "#,
    )?;
    let config = load_config(file.path())?;
    let dir = TempDir::new()?;
    let coordinator = build_coordinator(&config, &AppPaths::from_data_root(dir.path().to_path_buf()))?;

    let batch = coordinator.create_optimized_particles("orb", 100, Bounds::new(100.0, 100.0));
    assert_eq!(batch.len(), 40);
    assert_eq!(coordinator.get_metrics().particle_pool.active_particles, 0);
    Ok(())
}

#[tokio::test]
async fn commands_run_against_memory_backend() -> Result<()> {
    let dir = TempDir::new()?;
    let config = memory_config();
    let coordinator = build_coordinator(&config, &AppPaths::from_data_root(dir.path().to_path_buf()))?;

    execute(
        Commands::Particles {
            kind: "shooting".to_string(),
            count: 3,
            width: 640.0,
            height: 480.0,
            json: true,
        },
        &coordinator,
        &config,
    )
    .await?;
    execute(Commands::Preload { urls: Vec::new() }, &coordinator, &config).await?;
    execute(Commands::Metrics { json: false }, &coordinator, &config).await?;
    execute(Commands::Clear, &coordinator, &config).await?;

    let stats = coordinator.get_metrics().particle_pool;
    assert_eq!(stats.total_created, 3);
    assert_eq!(stats.pooled_particles, 3);
    assert_eq!(stats.active_particles, 0);
    Ok(())
}
